//! YAML configuration with environment variable substitution.
//!
//! Placeholders are `${VAR}` or `${VAR:default}`. An unset variable with
//! no default becomes the empty string.

use dotenvy::dotenv;
use regex::Regex;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::LoadError;
use crate::loader::DataFormat;

/// Where locale data is loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataSource {
    /// A consolidated file, or a directory with one file per locale.
    pub path: PathBuf,
    /// Overrides the format detected from the extension (single files only).
    #[serde(default)]
    pub format: Option<DataFormat>,
    /// Validate value shapes after loading.
    #[serde(default = "default_strict")]
    pub strict: bool,
}

fn default_strict() -> bool {
    true
}

impl DataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: None,
            strict: true,
        }
    }
}

/// Top-level configuration. Other sections such as `logging` are read by
/// their own crates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlmanacConfig {
    pub data: DataSource,
}

fn replace_vars(yaml_content: &str) -> Result<String, LoadError> {
    // A missing .env file is fine.
    let _ = dotenv();

    static VAR_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = VAR_REGEX.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z0-9_]+)(?::([^\}]*))?\}").expect("Invalid regex pattern")
    });

    if let Some(pos) = unmatched_placeholder(re, yaml_content) {
        let rest: String = yaml_content[pos..].chars().take(32).collect();
        return Err(LoadError::InvalidVariable(rest));
    }

    let result = re.replace_all(yaml_content, |caps: &regex::Captures| {
        let default = caps.get(2).map(|m| m.as_str());
        env::var(&caps[1]).unwrap_or_else(|_| default.unwrap_or("").to_string())
    });

    Ok(result.into_owned())
}

/// Position of a `${` in `text` that does not start a well-formed placeholder.
///
/// Only the input is scanned, so substituted values may contain `${`.
fn unmatched_placeholder(re: &Regex, text: &str) -> Option<usize> {
    let mut last = 0;
    for m in re.find_iter(text) {
        if let Some(pos) = text[last..m.start()].find("${") {
            return Some(last + pos);
        }
        last = m.end();
    }
    text[last..].find("${").map(|pos| last + pos)
}

pub fn load_config_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    load_config_str(&content)
}

pub fn load_config_str<T: DeserializeOwned>(yaml_content: &str) -> Result<T, LoadError> {
    let replaced = replace_vars(yaml_content)?;
    let data = serde_yaml::from_str(&replaced)?;
    Ok(data)
}

/// Embed a YAML config at compile time and parse it.
#[macro_export]
macro_rules! include_config {
    ($path:expr, $t:ty) => {
        $crate::config::load_config_str::<$t>(include_str!($path))
    };
}
