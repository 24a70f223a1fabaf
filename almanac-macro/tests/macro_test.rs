use almanac_core::{LookupError, Value};
use almanac_macro::locale_assets;

// Resolved against CARGO_MANIFEST_DIR (almanac-macro).
locale_assets!("tests/assets");

#[test]
fn test_locale_assets_installed_at_startup() {
    let registry = almanac_core::global();
    assert_eq!(registry.locales().collect::<Vec<_>>(), ["ar", "fi", "th"]);

    // JSON
    assert_eq!(almanac_core::get("fi", "field.year").unwrap(), &Value::text("vuosi"));
    assert_eq!(registry.list("fi", "DayNames").unwrap()[0], "sunnuntaina");

    // YAML
    assert_eq!(registry.list("th", "MonthAbbreviations").unwrap()[12], "");
    assert_eq!(registry.list("th", "DatePatterns").unwrap()[2], "d MMM y");

    // TOML
    let arab = registry.table("ar").unwrap().number_symbols("arab").unwrap();
    assert_eq!(arab.zero_digit, "٠");
}

#[test]
fn test_embedded_lists_keep_sharing() {
    let fi = almanac_core::global().table("fi").unwrap();
    let eras = fi.get("Eras").unwrap();
    assert!(eras.shares_storage_with(fi.get("buddhist.Eras").unwrap()));
}

#[test]
fn test_missing_data_is_reported() {
    assert_eq!(
        almanac_core::get("bs_Cyrl", "field.year"),
        Err(LookupError::UnknownLocale("bs_Cyrl".to_string()))
    );
    assert!(matches!(
        almanac_core::get("th", "NoSuchKey"),
        Err(LookupError::UnknownKey { .. })
    ));
}
