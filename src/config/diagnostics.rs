//! Capture-syntax diagnostics for regex rules.
//!
//! # Responsibilities
//! - Flag RE2 named groups when only the standard engine is available
//! - Flag PCRE named groups, which Firebase Hosting (RE2) will not accept
//!
//! # Design Decisions
//! - Pure function: Configuration → Vec<Diagnostic>
//! - Advisory only; never changes or rejects the configuration
//! - Reports every finding, not just the first

use std::fmt;

use crate::config::schema::{Configuration, RuleKind};
use crate::routing::capture::{contains_pcre_capture, contains_re2_capture};
use crate::routing::engine::RegexEngine;

/// What is wrong with a rule's named capture groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureIssue {
    /// `?P<` used while the RE2-style engine is unavailable.
    Re2CaptureWithoutRe2,
    /// `?<` used; wording depends on whether RE2 is active.
    PcreCapture { re2_available: bool },
}

/// A warning about one rule's regex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: RuleKind,
    /// Position of the rule in its list.
    pub index: usize,
    pub pattern: String,
    pub issue: CaptureIssue,
}

impl Diagnostic {
    /// Warning text, one entry per output line.
    pub fn lines(&self) -> [String; 2] {
        let label = self.kind.label();
        let short = match self.kind {
            RuleKind::Header => "header",
            _ => label,
        };

        match self.issue {
            CaptureIssue::Re2CaptureWithoutRe2 => [
                format!(
                    "Warning: RE2 is not currently available, and your configured {} {} appears to use RE2 capturing groups.",
                    label, self.pattern
                ),
                format!(
                    "This {} is unlikely to behave as intended until the RE2 engine is enabled.",
                    short
                ),
            ],
            CaptureIssue::PcreCapture { re2_available } => [
                format!(
                    "Warning: your configured {} {} appears to use PCRE regular expression syntax for named capture groups.",
                    label, self.pattern
                ),
                if re2_available {
                    format!(
                        "The local RE2 engine accepts this {}, but Firebase Hosting requires RE2 syntax (?P<> instead of ?<>).",
                        short
                    )
                } else {
                    "Although this works locally, Firebase Hosting requires RE2 syntax (?P<> instead of ?<>)."
                        .to_string()
                },
            ],
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [first, second] = self.lines();
        write!(f, "{}\n{}", first, second)
    }
}

/// Scan `rewrites`, `redirects` and `headers` for capture syntax the
/// given engine will not read as intended.
pub fn scan(config: &Configuration, engine: RegexEngine) -> Vec<Diagnostic> {
    let re2_available = engine.is_re2();
    let mut diagnostics = Vec::new();

    for kind in RuleKind::ALL {
        for (index, rule) in config.rules(kind) {
            let Some(pattern) = rule.regex_pattern() else {
                continue;
            };

            if contains_re2_capture(Some(pattern)) && !re2_available {
                diagnostics.push(Diagnostic {
                    kind,
                    index,
                    pattern: pattern.to_string(),
                    issue: CaptureIssue::Re2CaptureWithoutRe2,
                });
            }
            if contains_pcre_capture(Some(pattern)) {
                diagnostics.push(Diagnostic {
                    kind,
                    index,
                    pattern: pattern.to_string(),
                    issue: CaptureIssue::PcreCapture { re2_available },
                });
            }
        }
    }

    diagnostics
}
