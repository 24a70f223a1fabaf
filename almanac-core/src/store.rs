use std::sync::OnceLock;
use tracing::{error, info};

use crate::bundled;
use crate::error::{LoadError, LookupError};
use crate::registry::Registry;
use crate::value::Value;

static INSTALLED: OnceLock<Registry> = OnceLock::new();
static GLOBAL_REGISTRY: OnceLock<&'static Registry> = OnceLock::new();

/// Install the process-wide registry.
///
/// Fails once a registry is in place, including the bundled one chosen by an
/// earlier call to [`global`].
pub fn install(registry: Registry) -> Result<(), LoadError> {
    let count = registry.len();
    let mut installed = false;
    GLOBAL_REGISTRY.get_or_init(|| {
        installed = true;
        INSTALLED.get_or_init(|| registry)
    });

    if !installed {
        error!("Global locale registry already initialized");
        return Err(LoadError::AlreadyInstalled);
    }
    info!("Installed global locale registry with {} locale(s)", count);
    Ok(())
}

/// The installed registry; the bundled data set when nothing was installed
/// before the first call.
pub fn global() -> &'static Registry {
    GLOBAL_REGISTRY.get_or_init(|| {
        info!("No locale registry installed, using bundled data");
        bundled::bundled().unwrap_or_else(|e| {
            error!("Failed to load bundled locale data: {}", e);
            static EMPTY: OnceLock<Registry> = OnceLock::new();
            EMPTY.get_or_init(Registry::new)
        })
    })
}

pub fn get(locale: &str, key: &str) -> Result<&'static Value, LookupError> {
    global().get(locale, key)
}
