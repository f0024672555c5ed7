//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (ordered rule lookup per kind)
//!     → matcher.rs (glob first, then regex)
//!     → engine.rs (process-wide RE2-style or standard engine)
//!     → Return: matched rule(s), no match, or a pattern error
//!
//! Diagnostics (at config load):
//!     rule.regex
//!     → capture.rs (named-group dialect probes)
//! ```
//!
//! # Design Decisions
//! - Engine resolved once per process, injectable per matcher
//! - Deterministic: same input always matches same rule
//! - First match wins for rewrites and redirects

pub mod capture;
pub mod engine;
pub mod matcher;
pub mod router;

pub use capture::{contains_pcre_capture, contains_re2_capture, has_capture_syntax, CaptureDialect};
pub use engine::{active_engine, re2_available, CompiledPattern, PatternError, RegexEngine};
pub use matcher::{compile, engine_available, matches, GlobMatcher, PatternMatcher};
pub use router::RuleTable;
