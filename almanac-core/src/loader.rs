//! Reading and writing locale data in JSON, YAML or TOML.
//!
//! Two layouts are supported: a consolidated document mapping each locale
//! tag to its table, and a directory holding one `<tag>.<ext>` file per
//! locale whose body is the table itself.

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use crate::config::DataSource;
use crate::error::LoadError;
use crate::registry::Registry;
use crate::table::LocaleTable;
use crate::validate;
use crate::value::Value;

type RawTable = BTreeMap<String, Value>;
type RawRegistry = BTreeMap<String, RawTable>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Json,
    Yaml,
    Toml,
}

impl DataFormat {
    pub const ALL: [DataFormat; 3] = [DataFormat::Json, DataFormat::Yaml, DataFormat::Toml];

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(DataFormat::Json),
            "yaml" | "yml" => Some(DataFormat::Yaml),
            "toml" => Some(DataFormat::Toml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str().and_then(Self::from_extension)
    }

    pub fn extension(self) -> &'static str {
        match self {
            DataFormat::Json => "json",
            DataFormat::Yaml => "yaml",
            DataFormat::Toml => "toml",
        }
    }

    fn decode<T: DeserializeOwned>(self, content: &str) -> Result<T, LoadError> {
        Ok(match self {
            DataFormat::Json => serde_json::from_str(content)?,
            DataFormat::Yaml => serde_yaml::from_str(content)?,
            DataFormat::Toml => toml::from_str(content)?,
        })
    }

    fn encode<T: serde::Serialize>(self, data: &T) -> Result<String, LoadError> {
        Ok(match self {
            DataFormat::Json => serde_json::to_string_pretty(data)?,
            DataFormat::Yaml => serde_yaml::to_string(data)?,
            DataFormat::Toml => toml::to_string(data)?,
        })
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for DataFormat {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| LoadError::UnsupportedFormat(s.to_string()))
    }
}

fn format_of(path: &Path) -> Result<DataFormat, LoadError> {
    DataFormat::from_path(path)
        .ok_or_else(|| LoadError::UnsupportedFormat(path.display().to_string()))
}

/// Parse a single locale's `{ key: value }` document.
pub fn load_locale_str(
    tag: &str,
    format: DataFormat,
    content: &str,
) -> Result<LocaleTable, LoadError> {
    let raw: RawTable = format.decode(content)?;
    LocaleTable::from_entries(tag, raw)
}

/// Parse a consolidated `{ locale: { key: value } }` document.
pub fn load_registry_str(format: DataFormat, content: &str) -> Result<Registry, LoadError> {
    let raw: RawRegistry = format.decode(content)?;
    let tables = raw
        .into_iter()
        .map(|(tag, entries)| LocaleTable::from_entries(tag, entries))
        .collect::<Result<Vec<_>, _>>()?;
    Registry::from_tables(tables)
}

pub fn load_registry_file(path: impl AsRef<Path>) -> Result<Registry, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let registry = load_registry_str(format_of(path)?, &content)?;
    info!("Loaded {} locale(s) from {}", registry.len(), path.display());
    Ok(registry)
}

fn load_locale_file(path: &Path) -> Result<Option<LocaleTable>, LoadError> {
    let Some(format) = DataFormat::from_path(path) else {
        debug!("Skipping non-data file {}", path.display());
        return Ok(None);
    };

    let tag = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| LoadError::InvalidLocaleTag(path.display().to_string()))?;

    let content = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let table = load_locale_str(tag, format, &content)?;

    info!("Loaded locale data for {}: {} keys", tag, table.len());
    Ok(Some(table))
}

/// Load every `<tag>.<ext>` file directly under `dir`.
pub fn load_registry_dir(dir: impl AsRef<Path>) -> Result<Registry, LoadError> {
    let dir = dir.as_ref();
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| LoadError::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()).map_err(|e| LoadError::io(dir, e)))
        .collect::<Result<_, _>>()?;
    paths.sort();

    let mut registry = Registry::new();
    for path in paths.iter().filter(|p| p.is_file()) {
        if let Some(table) = load_locale_file(path)? {
            registry.add(table)?;
        }
    }
    Ok(registry)
}

/// Load the registry described by `source`, validating shapes when
/// `source.strict` is set.
pub fn load(source: &DataSource) -> Result<Registry, LoadError> {
    let path = &source.path;
    let registry = if path.is_dir() {
        load_registry_dir(path)?
    } else {
        let content = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let format = match source.format {
            Some(format) => format,
            None => format_of(path)?,
        };
        load_registry_str(format, &content)?
    };

    if source.strict {
        validate::ensure_valid(&registry)?;
    }
    Ok(registry)
}

impl Registry {
    /// See [`load`].
    pub fn load(source: &DataSource) -> Result<Registry, LoadError> {
        load(source)
    }
}

/// Serialize the whole registry as one consolidated document.
pub fn to_string(registry: &Registry, format: DataFormat) -> Result<String, LoadError> {
    format.encode(registry)
}

pub fn table_to_string(table: &LocaleTable, format: DataFormat) -> Result<String, LoadError> {
    format.encode(table)
}

/// Write one `<tag>.<ext>` file per locale into `dir`, creating it if needed.
pub fn write_registry_dir(
    registry: &Registry,
    dir: impl AsRef<Path>,
    format: DataFormat,
) -> Result<(), LoadError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| LoadError::io(dir, e))?;
    for table in registry.tables() {
        let path = dir.join(format!("{}.{}", table.tag(), format.extension()));
        let body = table_to_string(table, format)?;
        fs::write(&path, body).map_err(|e| LoadError::io(&path, e))?;
    }
    Ok(())
}
