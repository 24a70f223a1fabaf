use std::sync::OnceLock;

use crate::error::LoadError;
use crate::loader::{DataFormat, load_locale_str};
use crate::registry::Registry;
use crate::validate;

/// Locale files compiled into the crate.
const SOURCES: &[(&str, &str)] = &[
    ("ar", include_str!("../data/ar.json")),
    ("bn", include_str!("../data/bn.json")),
    ("bs_Cyrl", include_str!("../data/bs_Cyrl.json")),
    ("dz", include_str!("../data/dz.json")),
    ("fa", include_str!("../data/fa.json")),
    ("fi", include_str!("../data/fi.json")),
    ("hi", include_str!("../data/hi.json")),
    ("lv", include_str!("../data/lv.json")),
    ("th", include_str!("../data/th.json")),
    ("uz_Cyrl", include_str!("../data/uz_Cyrl.json")),
    ("yue_Hans", include_str!("../data/yue_Hans.json")),
];

/// Parse and validate the bundled files.
pub fn load() -> Result<Registry, LoadError> {
    let tables = SOURCES
        .iter()
        .map(|(tag, body)| load_locale_str(tag, DataFormat::Json, body))
        .collect::<Result<Vec<_>, _>>()?;
    let registry = Registry::from_tables(tables)?;
    validate::ensure_valid(&registry)?;
    Ok(registry)
}

/// The bundled data set, parsed on first use.
pub fn bundled() -> Result<&'static Registry, &'static LoadError> {
    static BUNDLED: OnceLock<Result<Registry, LoadError>> = OnceLock::new();
    BUNDLED.get_or_init(load).as_ref()
}

pub fn locales() -> impl Iterator<Item = &'static str> {
    SOURCES.iter().map(|(tag, _)| *tag)
}
