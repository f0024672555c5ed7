//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config + routing subsystems produce:
//!     → tracing events (debug: absorbed failures, warn: capture diagnostics)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr)
//! ```

pub mod logging;
