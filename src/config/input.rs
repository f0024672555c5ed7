//! Accepted forms of configuration input.
//!
//! The kind of input is decided once, when it is converted into
//! [`ConfigInput`]; the resolver then handles each variant explicitly.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::schema::Configuration;

/// Deferred configuration supplied by the embedding application.
pub type ConfigProvider = Arc<dyn Fn() -> Configuration + Send + Sync>;

/// Configuration input handed to the resolver.
#[derive(Clone, Default)]
pub enum ConfigInput {
    /// Loaded later by calling the provider; passed through untouched.
    Deferred(ConfigProvider),
    /// JSON text holding the configuration object.
    RawText(String),
    /// Configuration object already in memory.
    Inline(Map<String, Value>),
    /// Candidate files; the first one that exists is read.
    FilenameList(Vec<PathBuf>),
    /// A single configuration file.
    Filename(PathBuf),
    /// Nothing given; the default candidate files are used.
    #[default]
    Absent,
}

impl ConfigInput {
    /// Wrap a configuration provider.
    pub fn deferred<F>(provider: F) -> Self
    where
        F: Fn() -> Configuration + Send + Sync + 'static,
    {
        ConfigInput::Deferred(Arc::new(provider))
    }

    /// Text that parses as JSON is raw configuration, anything else is a path.
    /// Empty text counts as no input.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            ConfigInput::Absent
        } else if serde_json::from_str::<Value>(&text).is_ok() {
            ConfigInput::RawText(text)
        } else {
            ConfigInput::Filename(PathBuf::from(text))
        }
    }
}

impl fmt::Debug for ConfigInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigInput::Deferred(_) => f.write_str("Deferred(..)"),
            ConfigInput::RawText(text) => f.debug_tuple("RawText").field(text).finish(),
            ConfigInput::Inline(map) => f.debug_tuple("Inline").field(map).finish(),
            ConfigInput::FilenameList(names) => {
                f.debug_tuple("FilenameList").field(names).finish()
            }
            ConfigInput::Filename(name) => f.debug_tuple("Filename").field(name).finish(),
            ConfigInput::Absent => f.write_str("Absent"),
        }
    }
}

impl From<&str> for ConfigInput {
    fn from(text: &str) -> Self {
        ConfigInput::from_text(text)
    }
}

impl From<String> for ConfigInput {
    fn from(text: String) -> Self {
        ConfigInput::from_text(text)
    }
}

impl From<PathBuf> for ConfigInput {
    fn from(path: PathBuf) -> Self {
        ConfigInput::Filename(path)
    }
}

impl From<&Path> for ConfigInput {
    fn from(path: &Path) -> Self {
        ConfigInput::Filename(path.to_path_buf())
    }
}

impl From<Vec<PathBuf>> for ConfigInput {
    fn from(names: Vec<PathBuf>) -> Self {
        ConfigInput::FilenameList(names)
    }
}

impl From<Map<String, Value>> for ConfigInput {
    fn from(map: Map<String, Value>) -> Self {
        ConfigInput::Inline(map)
    }
}

impl From<Configuration> for ConfigInput {
    fn from(config: Configuration) -> Self {
        ConfigInput::Inline(config.into_map())
    }
}

impl From<ConfigProvider> for ConfigInput {
    fn from(provider: ConfigProvider) -> Self {
        ConfigInput::Deferred(provider)
    }
}

impl<T: Into<ConfigInput>> From<Option<T>> for ConfigInput {
    fn from(input: Option<T>) -> Self {
        input.map(Into::into).unwrap_or_default()
    }
}

/// Dynamic input; shapes that fit no variant fall back to the defaults.
impl From<Value> for ConfigInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => ConfigInput::Inline(map),
            Value::String(text) => ConfigInput::from_text(text),
            Value::Array(items) => {
                let names: Option<Vec<PathBuf>> = items
                    .iter()
                    .map(|v| v.as_str().map(PathBuf::from))
                    .collect();
                names.map_or(ConfigInput::Absent, ConfigInput::FilenameList)
            }
            _ => ConfigInput::Absent,
        }
    }
}
