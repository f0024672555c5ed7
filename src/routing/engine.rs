//! Regex engine selection and compiled patterns.
//!
//! # Responsibilities
//! - Resolve the process-wide regex engine exactly once
//! - Compile rule patterns with a given engine
//! - Report match-time failures to the caller
//!
//! # Design Decisions
//! - RE2-style engine (`regex` crate) is optional, behind the `re2` feature
//! - Standard engine (`fancy-regex`) is always compiled in and used as fallback
//! - The handle is a plain `Copy` value so matchers can take it by injection

use once_cell::sync::Lazy;
use thiserror::Error;

/// Engine used for every regex rule in this process unless one is injected.
static ACTIVE_ENGINE: Lazy<RegexEngine> = Lazy::new(RegexEngine::detect);

/// Errors raised while compiling or evaluating a regex rule.
#[derive(Debug, Error)]
pub enum PatternError {
    /// Pattern rejected by the RE2-style engine.
    #[cfg(feature = "re2")]
    #[error("invalid RE2 pattern {pattern:?}: {source}")]
    Re2Compile {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Pattern rejected by the standard engine.
    #[error("invalid regex pattern {pattern:?}: {source}")]
    StandardCompile {
        pattern: String,
        #[source]
        source: fancy_regex::Error,
    },

    /// Pattern compiled but failed while running (e.g. backtrack limit).
    #[error("regex pattern {pattern:?} failed during matching: {source}")]
    Evaluation {
        pattern: String,
        #[source]
        source: fancy_regex::Error,
    },
}

/// Which regex implementation evaluates `regex` rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexEngine {
    /// Linear-time engine with RE2 syntax.
    #[cfg(feature = "re2")]
    Re2,
    /// Backtracking engine with conventional syntax.
    Standard,
}

impl RegexEngine {
    /// Pick the preferred engine available in this build.
    pub fn detect() -> Self {
        #[cfg(feature = "re2")]
        let engine = RegexEngine::Re2;
        #[cfg(not(feature = "re2"))]
        let engine = RegexEngine::Standard;

        tracing::debug!(engine = engine.name(), "Regex engine resolved");
        engine
    }

    /// True for the RE2-style engine.
    pub fn is_re2(self) -> bool {
        match self {
            #[cfg(feature = "re2")]
            RegexEngine::Re2 => true,
            RegexEngine::Standard => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "re2")]
            RegexEngine::Re2 => "re2",
            RegexEngine::Standard => "standard",
        }
    }

    /// Compile `pattern` with this engine.
    pub fn compile(self, pattern: &str) -> Result<CompiledPattern, PatternError> {
        match self {
            #[cfg(feature = "re2")]
            RegexEngine::Re2 => regex::Regex::new(pattern)
                .map(CompiledPattern::Re2)
                .map_err(|source| PatternError::Re2Compile {
                    pattern: pattern.to_string(),
                    source,
                }),
            RegexEngine::Standard => fancy_regex::Regex::new(pattern)
                .map(CompiledPattern::Standard)
                .map_err(|source| PatternError::StandardCompile {
                    pattern: pattern.to_string(),
                    source,
                }),
        }
    }
}

/// A regex compiled by one of the engines.
#[derive(Debug, Clone)]
pub enum CompiledPattern {
    #[cfg(feature = "re2")]
    Re2(regex::Regex),
    Standard(fancy_regex::Regex),
}

impl CompiledPattern {
    /// Returns true if the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> Result<bool, PatternError> {
        match self {
            #[cfg(feature = "re2")]
            CompiledPattern::Re2(re) => Ok(re.is_match(text)),
            CompiledPattern::Standard(re) => {
                re.is_match(text).map_err(|source| PatternError::Evaluation {
                    pattern: re.as_str().to_string(),
                    source,
                })
            }
        }
    }

    /// Source text of the pattern.
    pub fn as_str(&self) -> &str {
        match self {
            #[cfg(feature = "re2")]
            CompiledPattern::Re2(re) => re.as_str(),
            CompiledPattern::Standard(re) => re.as_str(),
        }
    }

    pub fn engine(&self) -> RegexEngine {
        match self {
            #[cfg(feature = "re2")]
            CompiledPattern::Re2(_) => RegexEngine::Re2,
            CompiledPattern::Standard(_) => RegexEngine::Standard,
        }
    }
}

/// The process-wide engine, resolved on first use.
pub fn active_engine() -> RegexEngine {
    *ACTIVE_ENGINE
}

/// Whether the RE2-style engine was resolved for this process.
pub fn re2_available() -> bool {
    active_engine().is_re2()
}
