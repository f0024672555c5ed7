//! Rule lookup for a request path.
//!
//! # Responsibilities
//! - Hold the rewrite, redirect and header rules of one configuration
//! - Find the first matching rewrite/redirect for a path
//! - Collect every matching header rule for a path
//!
//! # Design Decisions
//! - Immutable after construction
//! - Configuration order is match order; first match wins
//! - A regex error stops the lookup and is returned to the caller

use std::collections::HashMap;

use crate::config::schema::{Configuration, Rule, RuleKind};
use crate::routing::engine::PatternError;
use crate::routing::matcher::PatternMatcher;

/// Indexed rule with its position in the configured list.
pub type IndexedRule = (usize, Rule);

/// Rules of a resolved configuration, grouped by kind.
#[derive(Debug, Clone)]
pub struct RuleTable {
    matcher: PatternMatcher,
    rules: HashMap<RuleKind, Vec<IndexedRule>>,
}

impl RuleTable {
    /// Build a table evaluated with the process-wide engine.
    pub fn new(config: &Configuration) -> Self {
        Self::with_matcher(config, PatternMatcher::active())
    }

    pub fn with_matcher(config: &Configuration, matcher: PatternMatcher) -> Self {
        let rules = RuleKind::ALL
            .iter()
            .map(|&kind| (kind, config.rules(kind)))
            .collect();

        Self { matcher, rules }
    }

    /// Configured rules of `kind`, in order.
    pub fn rules(&self, kind: RuleKind) -> &[IndexedRule] {
        self.rules.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First rule of `kind` matching `path`.
    pub fn first_match(
        &self,
        kind: RuleKind,
        path: &str,
    ) -> Result<Option<(usize, &Rule)>, PatternError> {
        for (index, rule) in self.rules(kind) {
            if self.matcher.matches(path, rule)? {
                return Ok(Some((*index, rule)));
            }
        }
        Ok(None)
    }

    /// Every rule of `kind` matching `path`, in order.
    pub fn all_matches(
        &self,
        kind: RuleKind,
        path: &str,
    ) -> Result<Vec<(usize, &Rule)>, PatternError> {
        let mut matched = Vec::new();
        for (index, rule) in self.rules(kind) {
            if self.matcher.matches(path, rule)? {
                matched.push((*index, rule));
            }
        }
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::engine::RegexEngine;
    use serde_json::json;

    fn table(value: serde_json::Value) -> RuleTable {
        let config: Configuration = serde_json::from_value(value).unwrap();
        RuleTable::with_matcher(&config, PatternMatcher::new(RegexEngine::Standard))
    }

    #[test]
    fn test_first_match_wins() {
        let table = table(json!({
            "rewrites": [
                {"source": "/app/**", "destination": "/app.html"},
                {"source": "**", "destination": "/index.html"}
            ]
        }));

        let (index, rule) = table
            .first_match(RuleKind::Rewrite, "/app/settings")
            .unwrap()
            .unwrap();
        assert_eq!(index, 0);
        assert_eq!(rule.get("destination"), Some(&json!("/app.html")));

        let (index, _) = table.first_match(RuleKind::Rewrite, "/about").unwrap().unwrap();
        assert_eq!(index, 1);
    }

    #[test]
    fn test_no_match() {
        let table = table(json!({
            "redirects": [{"source": "/old", "destination": "/new", "type": 301}]
        }));
        assert!(table.first_match(RuleKind::Redirect, "/other").unwrap().is_none());
        assert!(table.first_match(RuleKind::Rewrite, "/old").unwrap().is_none());
    }

    #[test]
    fn test_all_header_rules_apply() {
        let table = table(json!({
            "headers": [
                {
                    "source": "**/*.js",
                    "headers": [{"key": "Cache-Control", "value": "max-age=3600"}]
                },
                {"regex": "^/static/", "headers": [{"key": "X-Static", "value": "1"}]},
                {"source": "/api/**", "headers": []}
            ]
        }));

        let matched = table.all_matches(RuleKind::Header, "/static/app.js").unwrap();
        let indices: Vec<usize> = matched.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_regex_error_is_returned() {
        let table = table(json!({
            "rewrites": [{"regex": "(bad", "destination": "/x"}]
        }));
        assert!(table.first_match(RuleKind::Rewrite, "/x").is_err());
    }

    #[test]
    fn test_rules_keep_configured_indices() {
        let table = table(json!({"rewrites": [null, {"source": "/a"}]}));
        let rules = table.rules(RuleKind::Rewrite);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].0, 1);
        assert!(table.rules(RuleKind::Header).is_empty());
    }
}
