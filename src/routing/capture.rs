//! Named capture-group dialect probes.
//!
//! # Responsibilities
//! - Detect RE2 named captures (`?P<`)
//! - Detect PCRE named captures (`?<`)
//!
//! # Design Decisions
//! - Plain substring checks, no regex-syntax validation
//! - Used for operator warnings only, never for matching decisions

/// Named capture-group syntax of a regex dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureDialect {
    /// RE2 style: `(?P<name>...)`.
    Re2,
    /// PCRE / conventional style: `(?<name>...)`.
    Pcre,
}

impl CaptureDialect {
    /// The substring that opens a named group in this dialect.
    pub fn marker(self) -> &'static str {
        match self {
            CaptureDialect::Re2 => "?P<",
            CaptureDialect::Pcre => "?<",
        }
    }
}

/// Returns true if `pattern` is non-empty and contains the dialect's named
/// capture marker.
pub fn has_capture_syntax(pattern: Option<&str>, dialect: CaptureDialect) -> bool {
    match pattern {
        Some(p) if !p.is_empty() => p.contains(dialect.marker()),
        _ => false,
    }
}

/// Pattern opens an RE2 named group, which the standard engine may not read
/// the same way.
pub fn contains_re2_capture(pattern: Option<&str>) -> bool {
    has_capture_syntax(pattern, CaptureDialect::Re2)
}

/// Pattern opens a PCRE named group, which is not RE2 syntax.
pub fn contains_pcre_capture(pattern: Option<&str>) -> bool {
    has_capture_syntax(pattern, CaptureDialect::Pcre)
}
