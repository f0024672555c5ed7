//! Configuration schema definitions.
//!
//! Hosting configuration is open-ended: only `rewrites`, `redirects` and
//! `headers` are interpreted here, every other key is carried through as-is.
//! Both types are transparent wrappers over a JSON object so they serialize
//! back to exactly what was loaded.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Rule list a configured rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Rewrite,
    Redirect,
    Header,
}

impl RuleKind {
    /// All rule kinds in scan order.
    pub const ALL: [RuleKind; 3] = [RuleKind::Rewrite, RuleKind::Redirect, RuleKind::Header];

    /// Configuration key holding this kind's rule list.
    pub fn key(self) -> &'static str {
        match self {
            RuleKind::Rewrite => "rewrites",
            RuleKind::Redirect => "redirects",
            RuleKind::Header => "headers",
        }
    }

    /// Human-readable name used in warnings.
    pub fn label(self) -> &'static str {
        match self {
            RuleKind::Rewrite => "rewrite",
            RuleKind::Redirect => "redirect",
            RuleKind::Header => "custom header",
        }
    }
}

/// Root hosting configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Configuration(Map<String, Value>);

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Shallow merge: every key in `overrides` replaces the same key here.
    /// Nested values are replaced wholesale, never merged.
    pub fn merge(&mut self, overrides: Map<String, Value>) {
        for (key, value) in overrides {
            self.0.insert(key, value);
        }
    }

    /// Raw rule list for `kind`, if present and a sequence.
    pub fn rule_values(&self, kind: RuleKind) -> Option<&Vec<Value>> {
        self.0.get(kind.key()).and_then(Value::as_array)
    }

    /// Rules of `kind` in configured order, paired with their list index.
    /// Entries that are not objects are skipped.
    pub fn rules(&self, kind: RuleKind) -> Vec<(usize, Rule)> {
        self.rule_values(kind)
            .map(|values| {
                values
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| Rule::from_value(v).map(|rule| (i, rule)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl From<Map<String, Value>> for Configuration {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A single rewrite, redirect or header rule.
///
/// Path selection uses `glob` (or its synonym `source`) or `regex`; all other
/// fields belong to whoever applies the rule.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Rule(Map<String, Value>);

impl Rule {
    /// Rule matched by a glob pattern.
    pub fn glob(pattern: impl Into<String>) -> Self {
        Self::default().with("glob", Value::String(pattern.into()))
    }

    /// Rule matched by a `source` glob.
    pub fn source(pattern: impl Into<String>) -> Self {
        Self::default().with("source", Value::String(pattern.into()))
    }

    /// Rule matched by a regular expression.
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::default().with("regex", Value::String(pattern.into()))
    }

    /// Set an arbitrary field.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Rule view of a JSON value; `None` unless it is an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().cloned().map(Self)
    }

    /// Glob pattern, preferring `glob` over `source`.
    pub fn glob_pattern(&self) -> Option<&str> {
        self.non_empty_str("glob")
            .or_else(|| self.non_empty_str("source"))
    }

    /// Regex pattern, if any.
    pub fn regex_pattern(&self) -> Option<&str> {
        self.non_empty_str("regex")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}
