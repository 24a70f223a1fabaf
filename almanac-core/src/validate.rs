use std::fmt;

use crate::error::LoadError;
use crate::keys::{self, KeyShape};
use crate::registry::Registry;
use crate::table::LocaleTable;
use crate::value::Value;

/// A value whose shape does not match what its key promises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeViolation {
    pub locale: String,
    pub key: String,
    pub expected: KeyShape,
    pub found: String,
}

impl fmt::Display for ShapeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}: expected {}, found {}",
            self.locale, self.key, self.expected, self.found
        )
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Text(_) => "text".to_string(),
        Value::List(items) => format!("list of {}", items.len()),
    }
}

fn conforms(shape: KeyShape, value: &Value) -> bool {
    match (shape, value) {
        (KeyShape::Any, _) => true,
        (KeyShape::Text, Value::Text(_)) => true,
        (KeyShape::AnyList, Value::List(_)) => true,
        (KeyShape::List(n), Value::List(items)) => items.len() == n,
        _ => false,
    }
}

pub fn validate_table(table: &LocaleTable) -> Vec<ShapeViolation> {
    table
        .iter()
        .filter_map(|(key, value)| {
            let expected = keys::shape_of(key);
            (!conforms(expected, value)).then(|| ShapeViolation {
                locale: table.tag().to_string(),
                key: key.to_string(),
                expected,
                found: describe(value),
            })
        })
        .collect()
}

pub fn validate_registry(registry: &Registry) -> Vec<ShapeViolation> {
    registry.tables().flat_map(validate_table).collect()
}

/// Fail with [`LoadError::Shape`] if any table has a malformed value.
pub fn ensure_valid(registry: &Registry) -> Result<(), LoadError> {
    let violations = validate_registry(registry);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(LoadError::Shape(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_table_has_no_violations() {
        let table = LocaleTable::builder("th")
            .list("DayNarrows", ["อา", "จ", "อ", "พ", "พฤ", "ศ", "ส"])
            .list("DatePatterns", ["a", "b", "c", "d"])
            .text("field.day", "วัน")
            .text("DefaultNumberingSystem", "")
            .build();
        assert!(validate_table(&table).is_empty());
    }

    #[test]
    fn test_reports_every_violation() {
        let table = LocaleTable::builder("fi")
            .list("MonthNames", ["tammikuuta"; 12])
            .list("latn.NumberElements", [",", " "])
            .list("field.year", ["vuosi"])
            .text("Eras", "jKr.")
            .build();
        let violations = validate_table(&table);
        let keys: Vec<_> = violations.iter().map(|v| v.key.as_str()).collect();
        assert_eq!(keys, ["Eras", "MonthNames", "field.year", "latn.NumberElements"]);
        assert_eq!(violations[1].expected, KeyShape::List(13));
        assert_eq!(violations[1].found, "list of 12");
        assert_eq!(
            violations[1].to_string(),
            "fi/MonthNames: expected list of 13, found list of 12"
        );
    }

    #[test]
    fn test_ensure_valid() {
        let registry = Registry::from_tables([LocaleTable::builder("ar")
            .list("TimePatterns", ["h:mm a"])
            .build()])
        .unwrap();
        let err = ensure_valid(&registry).unwrap_err();
        assert!(matches!(&err, LoadError::Shape(v) if v.len() == 1));
        assert!(err.to_string().starts_with("1 shape violation(s)"));
    }
}
