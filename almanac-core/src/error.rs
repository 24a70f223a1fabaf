use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::validate::ShapeViolation;

/// Failure of a single `(locale, key)` lookup.
///
/// Both variants are ordinary outcomes: callers usually react by trying a
/// parent locale or a root table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("unknown locale: {0}")]
    UnknownLocale(String),
    #[error("unknown key `{key}` for locale {locale}")]
    UnknownKey { locale: String, key: String },
    /// Only returned by the typed accessors (`text`, `list`, views).
    #[error("key `{key}` for locale {locale} is not a {expected}")]
    WrongShape {
        locale: String,
        key: String,
        expected: &'static str,
    },
}

impl LookupError {
    pub fn unknown_key(locale: impl Into<String>, key: impl Into<String>) -> Self {
        LookupError::UnknownKey {
            locale: locale.into(),
            key: key.into(),
        }
    }

    /// True for `UnknownLocale` and `UnknownKey`.
    pub fn is_not_found(&self) -> bool {
        !matches!(self, LookupError::WrongShape { .. })
    }
}

/// Failure while reading, parsing or installing locale data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("unsupported data format: {0}")]
    UnsupportedFormat(String),
    #[error("invalid locale tag: {0:?}")]
    InvalidLocaleTag(String),
    #[error("invalid key {key:?} in locale {locale}")]
    InvalidKey { locale: String, key: String },
    #[error("locale {0} is defined more than once")]
    DuplicateLocale(String),
    #[error("{}", ShapeReport(.0))]
    Shape(Vec<ShapeViolation>),
    #[error("global registry already installed")]
    AlreadyInstalled,
    #[error("invalid variable format: {0}")]
    InvalidVariable(String),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}

struct ShapeReport<'a>(&'a [ShapeViolation]);

impl fmt::Display for ShapeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} shape violation(s)", self.0.len())?;
        for v in self.0 {
            write!(f, "; {v}")?;
        }
        Ok(())
    }
}
