use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::error::{LoadError, LookupError};
use crate::keys;
use crate::value::Value;

/// Formatting data for one locale: unique keys mapped to values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTable {
    tag: String,
    entries: BTreeMap<String, Value>,
}

impl LocaleTable {
    pub fn builder(tag: impl Into<String>) -> TableBuilder {
        TableBuilder {
            tag: tag.into(),
            entries: BTreeMap::new(),
            lists: HashSet::new(),
        }
    }

    /// Build a table from decoded entries, checking the tag and every key.
    pub fn from_entries<I>(tag: impl Into<String>, entries: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let tag = tag.into();
        if !keys::is_valid_locale_tag(&tag) {
            return Err(LoadError::InvalidLocaleTag(tag));
        }

        let mut builder = LocaleTable::builder(tag);
        for (key, value) in entries {
            if !keys::is_valid_key(&key) {
                return Err(LoadError::InvalidKey {
                    locale: builder.tag,
                    key,
                });
            }
            builder.insert(key, value);
        }
        Ok(builder.build())
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn get(&self, key: &str) -> Result<&Value, LookupError> {
        self.entries
            .get(key)
            .ok_or_else(|| LookupError::unknown_key(&self.tag, key))
    }

    pub fn text(&self, key: &str) -> Result<&str, LookupError> {
        self.get(key)?
            .as_text()
            .ok_or_else(|| self.wrong_shape(key, "text"))
    }

    pub fn list(&self, key: &str) -> Result<&[String], LookupError> {
        self.get(key)?
            .as_list()
            .ok_or_else(|| self.wrong_shape(key, "list"))
    }

    /// Entry `index` of the list under `key`.
    pub fn list_item(&self, key: &str, index: usize) -> Result<&str, LookupError> {
        self.list(key)?
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| self.wrong_shape(key, "list long enough"))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> &BTreeMap<String, Value> {
        &self.entries
    }

    fn wrong_shape(&self, key: &str, expected: &'static str) -> LookupError {
        LookupError::WrongShape {
            locale: self.tag.clone(),
            key: key.to_string(),
            expected,
        }
    }
}

impl Serialize for LocaleTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

/// Accumulates entries for a [`LocaleTable`]. Equal lists inserted into the
/// same builder end up sharing one allocation.
#[derive(Debug)]
pub struct TableBuilder {
    tag: String,
    entries: BTreeMap<String, Value>,
    lists: HashSet<Arc<[String]>>,
}

impl TableBuilder {
    /// Insert an entry; a later insert for the same key shadows the earlier
    /// one, which is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let value = match value.into() {
            Value::List(items) => Value::List(self.intern(items)),
            text => text,
        };
        self.entries.insert(key.into(), value)
    }

    pub fn text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, Value::Text(value.into()));
        self
    }

    pub fn list<I, S>(mut self, key: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(key, Value::list(items));
        self
    }

    pub fn build(self) -> LocaleTable {
        LocaleTable {
            tag: self.tag,
            entries: self.entries,
        }
    }

    fn intern(&mut self, items: Arc<[String]>) -> Arc<[String]> {
        if let Some(existing) = self.lists.get(&*items) {
            return Arc::clone(existing);
        }
        self.lists.insert(Arc::clone(&items));
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LocaleTable {
        LocaleTable::builder("fi")
            .text("field.year", "vuosi")
            .list("Eras", ["eKr.", "jKr."])
            .list("buddhist.Eras", ["eKr.", "jKr."])
            .list("long.Eras", ["ennen Kristuksen syntymää", "jälkeen Kristuksen syntymän"])
            .build()
    }

    #[test]
    fn test_get_and_typed_access() {
        let table = sample();
        assert_eq!(table.tag(), "fi");
        assert_eq!(table.text("field.year").unwrap(), "vuosi");
        assert_eq!(table.list("Eras").unwrap(), ["eKr.", "jKr."]);
        assert_eq!(table.list_item("Eras", 1).unwrap(), "jKr.");
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_missing_and_wrong_shape() {
        let table = sample();
        assert_eq!(
            table.get("NoSuchKey"),
            Err(LookupError::unknown_key("fi", "NoSuchKey"))
        );
        let err = table.list("field.year").unwrap_err();
        assert!(matches!(err, LookupError::WrongShape { expected: "list", .. }));
        assert!(!err.is_not_found());
        assert!(table.list_item("Eras", 2).is_err());
    }

    #[test]
    fn test_equal_lists_are_shared() {
        let table = sample();
        let eras = table.get("Eras").unwrap();
        let buddhist = table.get("buddhist.Eras").unwrap();
        let long = table.get("long.Eras").unwrap();
        assert!(eras.shares_storage_with(buddhist));
        assert!(!eras.shares_storage_with(long));
    }

    #[test]
    fn test_duplicate_key_shadows() {
        let mut builder = LocaleTable::builder("th");
        assert!(builder.insert("field.era", "ยุค").is_none());
        assert_eq!(builder.insert("field.era", "สมัย"), Some(Value::text("ยุค")));
        assert_eq!(builder.build().text("field.era").unwrap(), "สมัย");
    }

    #[test]
    fn test_from_entries_rejects_bad_input() {
        let bad_tag = LocaleTable::from_entries("EN-us", Vec::new());
        assert!(matches!(bad_tag, Err(LoadError::InvalidLocaleTag(_))));

        let bad_key = LocaleTable::from_entries("fi", vec![("a..b".to_string(), Value::text("x"))]);
        assert!(matches!(bad_key, Err(LoadError::InvalidKey { .. })));
    }
}
