//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! input (provider | JSON text | object | file list | file | nothing)
//!     → input.rs (decide the input kind once)
//!     → resolver.rs (normalize, pick candidate file)
//!     → loader.rs (read JSON, unwrap `hosting`)
//!     → resolver.rs (shallow merge: object over file)
//!     → diagnostics.rs (capture-syntax warnings, advisory)
//!     → Configuration
//! ```
//!
//! # Design Decisions
//! - Resolution never fails; bad sources contribute nothing
//! - Unknown keys are passed through untouched
//! - Only rule lists are interpreted (`rewrites`, `redirects`, `headers`)

pub mod diagnostics;
pub mod input;
pub mod loader;
pub mod resolver;
pub mod schema;

pub use diagnostics::{CaptureIssue, Diagnostic};
pub use input::{ConfigInput, ConfigProvider};
pub use loader::{ConfigError, DEFAULT_CONFIG_FILES};
pub use resolver::{resolve, ConfigResolver, ResolvedConfig};
pub use schema::{Configuration, Rule, RuleKind};
