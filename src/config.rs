use std::env;

use crate::error::{Error, Result};
use crate::tree::KeyMatcher;

/// Environment variable holding the default nesting limit.
pub const MAX_DEPTH_ENV: &str = "KEYFINDER_MAX_DEPTH";

/// How a search decides what matches and how deep it may go.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub matcher: KeyMatcher,
    /// Deepest container the search may enter; the root container is depth 0.
    /// `None` means unbounded.
    pub max_depth: Option<usize>,
}

impl SearchOptions {
    /// Exact matching on `key` with no depth limit.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            matcher: KeyMatcher::exact(key),
            max_depth: None,
        }
    }

    /// Like `new`, with `KEYFINDER_MAX_DEPTH` applied when set.
    pub fn from_env(key: impl Into<String>) -> Result<Self> {
        Self::new(key).with_max_depth_var(env::var(MAX_DEPTH_ENV))
    }

    fn with_max_depth_var(self, var: std::result::Result<String, env::VarError>) -> Result<Self> {
        match var {
            Ok(raw) => Ok(self.max_depth(parse_max_depth(&raw)?)),
            Err(env::VarError::NotPresent) => Ok(self),
            Err(e) => Err(Error::Config(format!("{}: {}", MAX_DEPTH_ENV, e))),
        }
    }

    pub fn matcher(mut self, matcher: KeyMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }
}

fn parse_max_depth(raw: &str) -> Result<usize> {
    raw.trim().parse::<usize>().map_err(|e| {
        Error::Config(format!(
            "{} must be a non-negative integer, got {:?}: {}",
            MAX_DEPTH_ENV, raw, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_exact_and_unbounded() {
        let options = SearchOptions::new("issueSummary");
        assert!(options.max_depth.is_none());
        assert!(options.matcher.matches("issueSummary"));
        assert!(!options.matcher.matches("issuesummary"));
    }

    #[test]
    fn test_builder_setters() {
        let options = SearchOptions::new("x")
            .matcher(KeyMatcher::ignore_case("X"))
            .max_depth(3);
        assert_eq!(options.max_depth, Some(3));
        assert!(options.matcher.matches("x"));
    }

    #[test]
    fn test_max_depth_var_branches() {
        let unset = SearchOptions::new("k")
            .with_max_depth_var(Err(env::VarError::NotPresent))
            .unwrap();
        assert_eq!(unset.max_depth, None);

        let valid = SearchOptions::new("k")
            .with_max_depth_var(Ok("12".to_string()))
            .unwrap();
        assert_eq!(valid.max_depth, Some(12));

        let invalid = SearchOptions::new("k").with_max_depth_var(Ok("deep".to_string()));
        assert!(matches!(invalid, Err(Error::Config(_))));

        let not_unicode = SearchOptions::new("k")
            .with_max_depth_var(Err(env::VarError::NotUnicode("\u{fffd}".into())));
        assert!(matches!(not_unicode, Err(Error::Config(_))));
    }

    // The only test in this crate that touches the process environment.
    #[test]
    fn test_from_env_reads_variable() {
        env::remove_var(MAX_DEPTH_ENV);
        assert_eq!(SearchOptions::from_env("k").unwrap().max_depth, None);

        env::set_var(MAX_DEPTH_ENV, "5");
        assert_eq!(SearchOptions::from_env("k").unwrap().max_depth, Some(5));

        env::set_var(MAX_DEPTH_ENV, "deep");
        let invalid = SearchOptions::from_env("k");
        env::remove_var(MAX_DEPTH_ENV);
        assert!(matches!(invalid, Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_max_depth() {
        assert_eq!(parse_max_depth("64").unwrap(), 64);
        assert_eq!(parse_max_depth(" 0 ").unwrap(), 0);
        assert!(matches!(parse_max_depth("-1"), Err(Error::Config(_))));
        assert!(matches!(parse_max_depth("deep"), Err(Error::Config(_))));
    }
}
