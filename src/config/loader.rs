//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

/// Files probed, in order, when no configuration source is given.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["superstatic.json", "firebase.json"];

/// Key under which Firebase-style documents nest the hosting section.
pub const HOSTING_KEY: &str = "hosting";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} does not hold a configuration object", .path.display())]
    NotAnObject { path: PathBuf },
}

/// Default candidate list as paths.
pub fn default_config_files() -> Vec<PathBuf> {
    DEFAULT_CONFIG_FILES.iter().map(PathBuf::from).collect()
}

/// First candidate that exists as a file under `base_dir`.
pub fn find_config_file(base_dir: &Path, candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|name| base_dir.join(name))
        .find(|path| path.is_file())
}

/// Whether `path` names a JSON document.
pub fn is_json_file(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "json")
}

/// Load a hosting configuration from a JSON file.
///
/// A document with a truthy `hosting` entry yields that entry.
pub fn load_config(path: &Path) -> Result<Map<String, Value>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match unwrap_hosting(document) {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Returns the `hosting` section of a document if it has a truthy one,
/// otherwise the document itself.
pub fn unwrap_hosting(document: Value) -> Value {
    match document {
        Value::Object(mut map) => {
            if map.get(HOSTING_KEY).is_some_and(is_truthy) {
                if let Some(hosting) = map.remove(HOSTING_KEY) {
                    return hosting;
                }
            }
            Value::Object(map)
        }
        other => other,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
