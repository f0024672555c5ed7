//! Hosting configuration resolution and request-path rule matching.
//!
//! ```text
//!   input ──▶ config::resolver ──▶ Configuration ──▶ routing::router ──▶ matched rule
//!                  │                                        │
//!                  ▼                                        ▼
//!           config::diagnostics ◀── routing::capture   routing::matcher ──▶ routing::engine
//! ```

pub mod config;
pub mod observability;
pub mod routing;

pub use config::{
    resolve, ConfigInput, ConfigResolver, Configuration, ResolvedConfig, Rule, RuleKind,
};
pub use routing::{matches, PatternError, PatternMatcher, RegexEngine, RuleTable};
