//! Name matching strategies for roles and domains
//!
//! A [`MatchingFn`] decides whether a candidate name is equivalent to a
//! target name. The default is exact string equality; a custom predicate
//! switches the role manager into pattern mode, where names that match each
//! other are linked in the synthesized query graph.
//!
//! Predicates take `(candidate, pattern)`. The built-in helpers follow the
//! usual policy-library conventions:
//!
//! - [`key_match`]: `"/data/*"` matches `"/data/1"` (prefix up to `*`)
//! - [`key_match2`]: `"/data/:id"` matches `"/data/1"`, `"/data/*"` any suffix
//! - [`regex_match`]: full regular expression
//! - [`glob_match`]: shell-style `*` and `?` globs
//! - [`wildcard_match`]: `*`, `prefix:*` and `*:suffix` role patterns

use regex::Regex;
use std::fmt;
use std::sync::{Arc, OnceLock};
use wildmatch::WildMatch;

/// Shared predicate type stored inside [`MatchingFn::Custom`]
pub type MatchingPredicate = dyn Fn(&str, &str) -> bool + Send + Sync;

/// Matching strategy for role or domain names
#[derive(Clone, Default)]
pub enum MatchingFn {
    /// Strict string equality
    #[default]
    Exact,
    /// Caller-supplied `(candidate, pattern) -> bool` predicate
    Custom(Arc<MatchingPredicate>),
}

impl MatchingFn {
    /// Wraps a closure as a custom strategy
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        MatchingFn::Custom(Arc::new(predicate))
    }

    /// Strategy backed by [`key_match`]
    pub fn key_match() -> Self {
        Self::custom(key_match)
    }

    /// Strategy backed by [`key_match2`]
    pub fn key_match2() -> Self {
        Self::custom(key_match2)
    }

    /// Strategy backed by [`regex_match`]
    pub fn regex_match() -> Self {
        Self::custom(regex_match)
    }

    /// Strategy backed by [`glob_match`]
    pub fn glob_match() -> Self {
        Self::custom(glob_match)
    }

    /// Strategy backed by [`wildcard_match`]
    pub fn wildcard_match() -> Self {
        Self::custom(wildcard_match)
    }

    /// Whether this strategy enables pattern mode
    pub fn is_pattern(&self) -> bool {
        matches!(self, MatchingFn::Custom(_))
    }

    /// Evaluates the strategy
    pub fn matches(&self, candidate: &str, pattern: &str) -> bool {
        match self {
            MatchingFn::Exact => candidate == pattern,
            MatchingFn::Custom(predicate) => predicate(candidate, pattern),
        }
    }

    /// Evaluates only a custom predicate; `Exact` never matches here
    ///
    /// Used where exact equality has already been checked separately.
    pub(crate) fn matches_pattern(&self, candidate: &str, pattern: &str) -> bool {
        match self {
            MatchingFn::Exact => false,
            MatchingFn::Custom(predicate) => predicate(candidate, pattern),
        }
    }
}

impl fmt::Debug for MatchingFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchingFn::Exact => write!(f, "MatchingFn::Exact"),
            MatchingFn::Custom(_) => write!(f, "MatchingFn::Custom(..)"),
        }
    }
}

/// Matches `key` against `pattern`, where `pattern` may end in `*`
///
/// ```
/// use cretoai_rbac::matching::key_match;
///
/// assert!(key_match("/foo/bar", "/foo/*"));
/// assert!(key_match("/foo", "/foo*"));
/// assert!(!key_match("/bar", "/foo/*"));
/// ```
pub fn key_match(key: &str, pattern: &str) -> bool {
    match pattern.find('*') {
        Some(idx) => key.starts_with(&pattern[..idx]),
        None => key == pattern,
    }
}

/// Matches `key` against a path pattern with `:param` segments and `/*` tails
///
/// ```
/// use cretoai_rbac::matching::key_match2;
///
/// assert!(key_match2("/resource/123", "/resource/:id"));
/// assert!(key_match2("/resource/123/edit", "/resource/*"));
/// assert!(!key_match2("/resource/123/edit", "/resource/:id"));
/// ```
pub fn key_match2(key: &str, pattern: &str) -> bool {
    static PARAM: OnceLock<Regex> = OnceLock::new();
    let param = PARAM.get_or_init(|| Regex::new(r":[^/]+").expect("valid parameter regex"));

    let pattern = pattern.replace("/*", "/.*");
    let pattern = param.replace_all(&pattern, "[^/]+");
    regex_match(key, &format!("^{}$", pattern))
}

/// Matches `key` against a regular expression; invalid expressions never match
pub fn regex_match(key: &str, pattern: &str) -> bool {
    Regex::new(pattern)
        .map(|re| re.is_match(key))
        .unwrap_or(false)
}

/// Matches `key` against a shell-style glob (`*` and `?`)
pub fn glob_match(key: &str, pattern: &str) -> bool {
    WildMatch::new(pattern).matches(key)
}

/// Matches a `resource:action` role name against a wildcard role pattern
///
/// A bare `*` accepts every role; otherwise one side of the colon may be `*`.
///
/// ```
/// use cretoai_rbac::matching::wildcard_match;
///
/// assert!(wildcard_match("invoice:approve", "invoice:*"));
/// assert!(wildcard_match("ledger:audit", "*:audit"));
/// assert!(wildcard_match("billing", "*"));
/// assert!(!wildcard_match("invoice", "invoice:*"));
/// ```
pub fn wildcard_match(role: &str, pattern: &str) -> bool {
    if role == pattern || pattern == "*" {
        return true;
    }

    if let Some(prefix) = pattern.strip_suffix(":*") {
        return role.starts_with(&format!("{}:", prefix));
    }

    if let Some(suffix) = pattern.strip_prefix("*:") {
        return role.ends_with(&format!(":{}", suffix));
    }

    false
}
