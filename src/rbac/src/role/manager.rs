//! Default role manager
//!
//! Owns one [`Roles`] registry per domain plus the role and domain matching
//! strategies. Without custom strategies every query runs against the
//! domain's own registry. Once either strategy is custom ("pattern mode"),
//! each query synthesizes a temporary registry that merges every matching
//! domain and links pattern-equivalent role names; it is built per call and
//! never cached or written back. Queries take `&self`, so querying a domain
//! that has no registry never creates one, in pattern mode or not.

use indexmap::IndexMap;
use std::borrow::Cow;
use tracing::{debug, info, trace};

use super::registry::Roles;
use crate::config::{RoleManagerConfig, DEFAULT_MAX_HIERARCHY_LEVEL};
use crate::error::{RbacError, Result};
use crate::matching::MatchingFn;

/// Reserved domain used when no domain token is supplied
pub const DEFAULT_DOMAIN: &str = "casbin::default";

/// Resolves the zero-or-one domain token convention
fn domain_token<'a>(domain: &[&'a str]) -> Result<&'a str> {
    match domain {
        [] => Ok(DEFAULT_DOMAIN),
        [single] => Ok(*single),
        _ => Err(RbacError::InvalidArgument(format!(
            "expected at most 1 domain, got {}",
            domain.len()
        ))),
    }
}

/// In-memory role hierarchy manager
///
/// # Examples
///
/// ```
/// use cretoai_rbac::DefaultRoleManager;
///
/// let mut rm = DefaultRoleManager::new(10);
/// rm.add_link("alice", "admin", &[]).unwrap();
/// rm.add_link("admin", "editor", &[]).unwrap();
///
/// assert!(rm.has_link("alice", "editor", &[]).unwrap());
/// assert_eq!(rm.get_roles("alice", &[]).unwrap(), vec!["admin", "editor"]);
/// assert_eq!(rm.get_users("admin", &[]).unwrap(), vec!["alice"]);
/// ```
#[derive(Debug, Clone)]
pub struct DefaultRoleManager {
    /// Domain -> registry, in domain creation order
    registries: IndexMap<String, Roles>,
    max_hierarchy_level: usize,
    role_matcher: MatchingFn,
    domain_matcher: MatchingFn,
    /// Set once a custom strategy is installed; never cleared
    has_pattern: bool,
    has_domain_pattern: bool,
}

impl DefaultRoleManager {
    /// Creates a manager following at most `max_hierarchy_level` hops (minimum 1)
    pub fn new(max_hierarchy_level: usize) -> Self {
        let mut registries = IndexMap::new();
        registries.insert(DEFAULT_DOMAIN.to_string(), Roles::new());

        Self {
            registries,
            max_hierarchy_level: max_hierarchy_level.max(1),
            role_matcher: MatchingFn::Exact,
            domain_matcher: MatchingFn::Exact,
            has_pattern: false,
            has_domain_pattern: false,
        }
    }

    /// Creates a manager from a validated config
    pub fn from_config(config: &RoleManagerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.max_hierarchy_level))
    }

    /// Hop bound applied to every traversal
    pub fn max_hierarchy_level(&self) -> usize {
        self.max_hierarchy_level
    }

    /// Whether role names are matched through a custom predicate
    pub fn has_pattern(&self) -> bool {
        self.has_pattern
    }

    /// Whether domain names are matched through a custom predicate
    pub fn has_domain_pattern(&self) -> bool {
        self.has_domain_pattern
    }

    fn pattern_mode(&self) -> bool {
        self.has_pattern() || self.has_domain_pattern()
    }

    /// Installs the role-name matching strategy
    ///
    /// A custom strategy turns role pattern mode on for the rest of the
    /// manager's lifetime; a later `Exact` replaces the predicate only.
    pub fn add_matching_fn(&mut self, matcher: MatchingFn) {
        self.has_pattern |= matcher.is_pattern();
        self.role_matcher = matcher;
    }

    /// Installs the domain-name matching strategy
    ///
    /// Pattern mode for domains is sticky in the same way as for roles.
    pub fn add_domain_matching_fn(&mut self, matcher: MatchingFn) {
        self.has_domain_pattern |= matcher.is_pattern();
        self.domain_matcher = matcher;
    }

    /// Drops every registry and recreates an empty default domain
    pub fn clear(&mut self) {
        self.registries.clear();
        self.registries.insert(DEFAULT_DOMAIN.to_string(), Roles::new());
        debug!("cleared all role registries");
    }

    /// Adds the link `name1 -> name2`, creating both roles if needed
    pub fn add_link(&mut self, name1: &str, name2: &str, domain: &[&str]) -> Result<()> {
        let domain = domain_token(domain)?;

        let roles = self.registries.entry(domain.to_string()).or_default();
        let from = roles.load_or_store(name1);
        let to = roles.load_or_store(name2);

        if roles.add_link(from, to) {
            debug!(domain, name1, name2, "added role link");
        }
        Ok(())
    }

    /// Removes the link `name1 -> name2`
    ///
    /// Both roles must already exist in the domain. A missing link between
    /// existing roles is not an error.
    pub fn delete_link(&mut self, name1: &str, name2: &str, domain: &[&str]) -> Result<()> {
        let domain = domain_token(domain)?;

        let not_found = |name: &str| RbacError::NotFound {
            name: name.to_string(),
            domain: domain.to_string(),
        };

        let roles = self
            .registries
            .get_mut(domain)
            .ok_or_else(|| not_found(name1))?;
        let from = roles.id_of(name1).ok_or_else(|| not_found(name1))?;
        let to = roles.id_of(name2).ok_or_else(|| not_found(name2))?;

        if roles.delete_link(from, to) {
            debug!(domain, name1, name2, "deleted role link");
        }
        Ok(())
    }

    /// Whether `name1` inherits `name2` within the hop bound
    pub fn has_link(&self, name1: &str, name2: &str, domain: &[&str]) -> Result<bool> {
        let domain = domain_token(domain)?;

        if name1 == name2 {
            return Ok(true);
        }

        if !self.pattern_mode() {
            let Some(roles) = self.registries.get(domain) else {
                return Ok(false);
            };
            return Ok(match (roles.load(name1), roles.load(name2)) {
                (Some(role), Some(_)) => {
                    role.has_role(name2, self.max_hierarchy_level, &MatchingFn::Exact)
                }
                _ => false,
            });
        }

        let mut roles = self.temp_roles_for_domain(domain);
        if !roles.has_role(name1, &self.role_matcher) || !roles.has_role(name2, &self.role_matcher)
        {
            return Ok(false);
        }

        let from = roles.create_role(name1, &self.role_matcher);
        roles.create_role(name2, &self.role_matcher);

        Ok(roles
            .get(from)
            .has_role(name2, self.max_hierarchy_level, &self.role_matcher))
    }

    /// Roles `name` inherits within the hop bound, nearest first
    pub fn get_roles(&self, name: &str, domain: &[&str]) -> Result<Vec<String>> {
        let domain = domain_token(domain)?;

        if !self.pattern_mode() {
            return Ok(self
                .registries
                .get(domain)
                .and_then(|roles| roles.load(name))
                .map(|role| role.get_roles(self.max_hierarchy_level))
                .unwrap_or_default());
        }

        let mut roles = self.temp_roles_for_domain(domain);
        if !roles.has_role(name, &self.role_matcher) {
            return Ok(Vec::new());
        }

        let id = roles.create_role(name, &self.role_matcher);
        Ok(roles.get(id).get_roles(self.max_hierarchy_level))
    }

    /// Roles holding a direct link to `name` in the effective registry
    ///
    /// Edge targets compare exactly. The existence check for `name` goes
    /// through the domain matching strategy, not the role strategy.
    pub fn get_users(&self, name: &str, domain: &[&str]) -> Result<Vec<String>> {
        let domain = domain_token(domain)?;
        let roles = self.effective_roles(domain);

        if !roles.has_role(name, &self.domain_matcher) {
            return Ok(Vec::new());
        }

        Ok(roles
            .iter()
            .filter(|role| role.has_direct_role(name))
            .map(|role| role.name().to_string())
            .collect())
    }

    /// Domains whose registry contains a role named exactly `name`
    pub fn get_domains(&self, name: &str) -> Vec<String> {
        self.registries
            .iter()
            .filter(|(_, roles)| roles.id_of(name).is_some())
            .map(|(domain, _)| domain.clone())
            .collect()
    }

    /// Every domain with a registry, in creation order
    pub fn get_all_domains(&self) -> Vec<String> {
        self.registries.keys().cloned().collect()
    }

    /// Drops one domain's registry; the default domain is emptied instead
    pub fn delete_domain(&mut self, domain: &str) -> Result<()> {
        if domain == DEFAULT_DOMAIN {
            if let Some(roles) = self.registries.get_mut(DEFAULT_DOMAIN) {
                *roles = Roles::new();
            }
        } else if self.registries.shift_remove(domain).is_none() {
            return Err(RbacError::DomainNotFound(domain.to_string()));
        }

        debug!(domain, "deleted domain");
        Ok(())
    }

    /// Every non-empty role descriptor joined with `", "`
    pub fn role_summary(&self) -> String {
        self.registries
            .values()
            .flat_map(|roles| roles.iter().map(|role| role.to_string()))
            .filter(|descriptor| !descriptor.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Logs [`role_summary`](Self::role_summary) at INFO level
    pub fn print_roles(&self) {
        let roles = self.role_summary();
        info!(roles = %roles, "role hierarchy");
    }

    /// Registry a query should run against
    fn effective_roles(&self, domain: &str) -> Cow<'_, Roles> {
        if self.pattern_mode() {
            return Cow::Owned(self.temp_roles_for_domain(domain));
        }

        match self.registries.get(domain) {
            Some(roles) => Cow::Borrowed(roles),
            None => Cow::Owned(Roles::new()),
        }
    }

    /// Merges every matching domain into a fresh registry
    ///
    /// Nodes are re-created through the role matcher so pattern-equivalent
    /// names end up linked. Source registries are only read: a queried
    /// domain without a registry merges as empty and is not inserted, so it
    /// stays absent from [`get_all_domains`](Self::get_all_domains) and
    /// [`get_domains`](Self::get_domains).
    fn temp_roles_for_domain(&self, domain: &str) -> Roles {
        let mut domains = vec![domain];
        if self.has_domain_pattern {
            domains.extend(
                self.registries
                    .keys()
                    .map(String::as_str)
                    .filter(|key| *key != domain && self.domain_matcher.matches(domain, key)),
            );
        }

        let mut merged = Roles::new();
        for source in domains.iter().filter_map(|d| self.registries.get(*d)) {
            for role in source.iter() {
                let from = merged.create_role(role.name(), &self.role_matcher);
                for target in role.direct_roles() {
                    let to = merged.create_role(target.name(), &self.role_matcher);
                    merged.add_link(from, to);
                }
            }
        }

        trace!(
            domain,
            merged_domains = domains.len(),
            roles = merged.len(),
            "synthesized temporary role registry"
        );
        merged
    }
}

impl Default for DefaultRoleManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HIERARCHY_LEVEL)
    }
}
