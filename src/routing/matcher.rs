//! Rule matching logic.
//!
//! # Responsibilities
//! - Match request paths against glob rules (`glob` / `source`)
//! - Match request paths against regex rules (`regex`)
//! - Combine the two with "glob first" semantics
//!
//! # Design Decisions
//! - `/` is a literal separator: `*` stays inside a segment, `**` crosses them
//! - A glob that fails to parse never matches (same as a literal miss)
//! - Regex rules search anywhere in the path; anchors are up to the author
//! - Regex compile errors are returned, never folded into `false`

use globset::GlobBuilder;

use crate::config::schema::Rule;
use crate::routing::engine::{active_engine, CompiledPattern, PatternError, RegexEngine};

/// Compiled shell-style glob for request paths.
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    inner: globset::GlobMatcher,
}

impl GlobMatcher {
    /// Compile a glob pattern.
    pub fn new(pattern: &str) -> Result<Self, globset::Error> {
        let glob = GlobBuilder::new(pattern).literal_separator(true).build()?;
        Ok(Self {
            inner: glob.compile_matcher(),
        })
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.inner.is_match(path)
    }
}

/// Returns true if `path` matches the glob `pattern`.
pub fn glob_matches(path: &str, pattern: &str) -> bool {
    match GlobMatcher::new(pattern) {
        Ok(glob) => glob.is_match(path),
        Err(e) => {
            tracing::debug!(pattern, error = %e, "Ignoring unparseable glob");
            false
        }
    }
}

/// Decides whether a configured rule applies to a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatcher {
    engine: RegexEngine,
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::active()
    }
}

impl PatternMatcher {
    /// Matcher bound to an explicit engine.
    pub fn new(engine: RegexEngine) -> Self {
        Self { engine }
    }

    /// Matcher bound to the process-wide engine.
    pub fn active() -> Self {
        Self::new(active_engine())
    }

    pub fn engine(&self) -> RegexEngine {
        self.engine
    }

    /// Whether this matcher evaluates regex rules with the RE2-style engine.
    pub fn engine_available(&self) -> bool {
        self.engine.is_re2()
    }

    pub fn compile(&self, pattern: &str) -> Result<CompiledPattern, PatternError> {
        self.engine.compile(pattern)
    }

    /// Returns true if `rule` applies to `path`.
    ///
    /// The glob is tried first and a hit returns immediately, so a bad or
    /// non-matching `regex` next to a matching glob is never looked at.
    pub fn matches(&self, path: &str, rule: &Rule) -> Result<bool, PatternError> {
        if let Some(glob) = rule.glob_pattern() {
            if glob_matches(path, glob) {
                return Ok(true);
            }
        }

        match rule.regex_pattern() {
            Some(regex) => self.compile(regex)?.is_match(path),
            None => Ok(false),
        }
    }
}

/// [`PatternMatcher::matches`] with the process-wide engine.
pub fn matches(path: &str, rule: &Rule) -> Result<bool, PatternError> {
    PatternMatcher::active().matches(path, rule)
}

/// [`PatternMatcher::compile`] with the process-wide engine.
pub fn compile(pattern: &str) -> Result<CompiledPattern, PatternError> {
    PatternMatcher::active().compile(pattern)
}

/// Whether the RE2-style engine resolved at startup.
pub fn engine_available() -> bool {
    PatternMatcher::active().engine_available()
}
