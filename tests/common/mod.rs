//! Shared utilities for integration tests.

use std::fs;
use std::path::Path;

use hosting_rules::{ConfigResolver, RegexEngine};
use serde_json::Value;
use tempfile::TempDir;

/// A temporary site directory holding configuration files.
pub struct Site {
    pub dir: TempDir,
}

impl Site {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write `content` as JSON to `name` inside the site directory.
    pub fn write_json(&self, name: &str, content: &Value) -> &Self {
        self.write_raw(name, &serde_json::to_string_pretty(content).unwrap())
    }

    pub fn write_raw(&self, name: &str, content: &str) -> &Self {
        fs::write(self.dir.path().join(name), content).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Resolver rooted at this site, checking diagnostics against `engine`.
    pub fn resolver(&self, engine: RegexEngine) -> ConfigResolver {
        ConfigResolver::new()
            .with_base_dir(self.path())
            .with_engine(engine)
    }
}
