use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::error::{LoadError, LookupError};
use crate::table::LocaleTable;
use crate::value::Value;

/// All locale tables known to the process, keyed by locale tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    tables: BTreeMap<String, LocaleTable>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect tables into a registry; a tag seen twice is an error.
    pub fn from_tables<I>(tables: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = LocaleTable>,
    {
        let mut registry = Registry::new();
        for table in tables {
            registry.add(table)?;
        }
        Ok(registry)
    }

    pub fn add(&mut self, table: LocaleTable) -> Result<(), LoadError> {
        if self.tables.contains_key(table.tag()) {
            return Err(LoadError::DuplicateLocale(table.tag().to_string()));
        }
        self.tables.insert(table.tag().to_string(), table);
        Ok(())
    }

    /// Look up `key` in the table for `locale`.
    ///
    /// An empty string is a legitimate value (the 13th month slot, for one),
    /// so absence is only ever reported through the error.
    pub fn get(&self, locale: &str, key: &str) -> Result<&Value, LookupError> {
        self.table(locale)?.get(key)
    }

    pub fn table(&self, locale: &str) -> Result<&LocaleTable, LookupError> {
        self.tables
            .get(locale)
            .ok_or_else(|| LookupError::UnknownLocale(locale.to_string()))
    }

    pub fn text(&self, locale: &str, key: &str) -> Result<&str, LookupError> {
        self.table(locale)?.text(key)
    }

    pub fn list(&self, locale: &str, key: &str) -> Result<&[String], LookupError> {
        self.table(locale)?.list(key)
    }

    pub fn contains_locale(&self, locale: &str) -> bool {
        self.tables.contains_key(locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn tables(&self) -> impl Iterator<Item = &LocaleTable> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tables.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::from_tables([
            LocaleTable::builder("fi")
                .text("field.year", "vuosi")
                .list("AmPmMarkers", ["ap.", "ip."])
                .build(),
            LocaleTable::builder("th").text("field.year", "ปี").build(),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup() {
        let reg = registry();
        assert_eq!(reg.get("fi", "field.year").unwrap(), &Value::text("vuosi"));
        assert_eq!(reg.text("th", "field.year").unwrap(), "ปี");
        assert_eq!(reg.list("fi", "AmPmMarkers").unwrap(), ["ap.", "ip."]);
        assert_eq!(reg.locales().collect::<Vec<_>>(), ["fi", "th"]);
    }

    #[test]
    fn test_not_found_kinds() {
        let reg = registry();
        assert_eq!(
            reg.get("xx", "anything"),
            Err(LookupError::UnknownLocale("xx".to_string()))
        );
        assert_eq!(
            reg.get("fi", "NoSuchKey"),
            Err(LookupError::unknown_key("fi", "NoSuchKey"))
        );
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let reg = registry();
        let first = reg.get("fi", "AmPmMarkers").unwrap().clone();
        let second = reg.get("fi", "AmPmMarkers").unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_locale_rejected() {
        let result = Registry::from_tables([
            LocaleTable::builder("fi").build(),
            LocaleTable::builder("fi").build(),
        ]);
        assert!(matches!(result, Err(LoadError::DuplicateLocale(tag)) if tag == "fi"));
    }
}
