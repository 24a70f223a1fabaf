use almanac_core::{LoadError, LocaleTable, LookupError, Registry, Value};

// One test per binary: the global registry is process-wide.
#[test]
fn install_once_then_read_globally() {
    let registry = Registry::from_tables([LocaleTable::builder("fi")
        .text("field.year", "vuosi")
        .list("AmPmMarkers", ["ap.", "ip."])
        .build()])
    .unwrap();

    almanac_core::install(registry).unwrap();

    assert_eq!(almanac_core::get("fi", "field.year").unwrap(), &Value::text("vuosi"));
    assert_eq!(
        almanac_core::get("th", "field.year"),
        Err(LookupError::UnknownLocale("th".to_string()))
    );
    assert_eq!(almanac_core::global().len(), 1);

    let again = almanac_core::install(Registry::new());
    assert!(matches!(again, Err(LoadError::AlreadyInstalled)));
    assert_eq!(almanac_core::global().len(), 1);
}
