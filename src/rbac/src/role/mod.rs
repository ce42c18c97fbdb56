//! Role hierarchy
//!
//! - [`node`]: graph vertices and bounded breadth-first traversal
//! - [`registry`]: per-domain arena of roles
//! - [`manager`]: domain-scoped link/query API with pattern-mode synthesis
//! - [`synced`]: reader-writer guarded manager for shared use

pub mod manager;
pub mod node;
pub mod registry;
pub mod synced;


pub use manager::{DefaultRoleManager, DEFAULT_DOMAIN};
pub use node::{Role, RoleId, RoleRef};
pub use registry::Roles;
pub use synced::SyncedRoleManager;

use crate::error::Result;
use crate::matching::MatchingFn;

/// Operation surface a policy evaluator uses to expand role rules
///
/// Domain-scoped operations take zero or one domain token; zero selects
/// [`DEFAULT_DOMAIN`], more than one is `RbacError::InvalidArgument`.
pub trait RoleManager: Send + Sync {
    /// Drops every registry, leaving an empty default domain
    fn clear(&mut self);

    /// Adds the link `name1 -> name2`
    fn add_link(&mut self, name1: &str, name2: &str, domain: &[&str]) -> Result<()>;

    /// Removes the link `name1 -> name2`; both roles must exist
    fn delete_link(&mut self, name1: &str, name2: &str, domain: &[&str]) -> Result<()>;

    /// Whether `name1` inherits `name2`
    fn has_link(&self, name1: &str, name2: &str, domain: &[&str]) -> Result<bool>;

    /// Roles inherited by `name`
    fn get_roles(&self, name: &str, domain: &[&str]) -> Result<Vec<String>>;

    /// Roles directly linked to `name`
    fn get_users(&self, name: &str, domain: &[&str]) -> Result<Vec<String>>;

    /// Domains in which `name` exists
    fn get_domains(&self, name: &str) -> Vec<String>;

    /// All known domains
    fn get_all_domains(&self) -> Vec<String>;

    /// Drops a domain's registry
    fn delete_domain(&mut self, domain: &str) -> Result<()>;

    /// Logs the role hierarchy
    fn print_roles(&self);

    /// Installs the role-name matching strategy
    fn add_matching_fn(&mut self, matcher: MatchingFn);

    /// Installs the domain-name matching strategy
    fn add_domain_matching_fn(&mut self, matcher: MatchingFn);
}

impl RoleManager for DefaultRoleManager {
    fn clear(&mut self) {
        DefaultRoleManager::clear(self)
    }

    fn add_link(&mut self, name1: &str, name2: &str, domain: &[&str]) -> Result<()> {
        DefaultRoleManager::add_link(self, name1, name2, domain)
    }

    fn delete_link(&mut self, name1: &str, name2: &str, domain: &[&str]) -> Result<()> {
        DefaultRoleManager::delete_link(self, name1, name2, domain)
    }

    fn has_link(&self, name1: &str, name2: &str, domain: &[&str]) -> Result<bool> {
        DefaultRoleManager::has_link(self, name1, name2, domain)
    }

    fn get_roles(&self, name: &str, domain: &[&str]) -> Result<Vec<String>> {
        DefaultRoleManager::get_roles(self, name, domain)
    }

    fn get_users(&self, name: &str, domain: &[&str]) -> Result<Vec<String>> {
        DefaultRoleManager::get_users(self, name, domain)
    }

    fn get_domains(&self, name: &str) -> Vec<String> {
        DefaultRoleManager::get_domains(self, name)
    }

    fn get_all_domains(&self) -> Vec<String> {
        DefaultRoleManager::get_all_domains(self)
    }

    fn delete_domain(&mut self, domain: &str) -> Result<()> {
        DefaultRoleManager::delete_domain(self, domain)
    }

    fn print_roles(&self) {
        DefaultRoleManager::print_roles(self)
    }

    fn add_matching_fn(&mut self, matcher: MatchingFn) {
        DefaultRoleManager::add_matching_fn(self, matcher)
    }

    fn add_domain_matching_fn(&mut self, matcher: MatchingFn) {
        DefaultRoleManager::add_domain_matching_fn(self, matcher)
    }
}

impl RoleManager for SyncedRoleManager {
    fn clear(&mut self) {
        SyncedRoleManager::clear(self)
    }

    fn add_link(&mut self, name1: &str, name2: &str, domain: &[&str]) -> Result<()> {
        SyncedRoleManager::add_link(self, name1, name2, domain)
    }

    fn delete_link(&mut self, name1: &str, name2: &str, domain: &[&str]) -> Result<()> {
        SyncedRoleManager::delete_link(self, name1, name2, domain)
    }

    fn has_link(&self, name1: &str, name2: &str, domain: &[&str]) -> Result<bool> {
        SyncedRoleManager::has_link(self, name1, name2, domain)
    }

    fn get_roles(&self, name: &str, domain: &[&str]) -> Result<Vec<String>> {
        SyncedRoleManager::get_roles(self, name, domain)
    }

    fn get_users(&self, name: &str, domain: &[&str]) -> Result<Vec<String>> {
        SyncedRoleManager::get_users(self, name, domain)
    }

    fn get_domains(&self, name: &str) -> Vec<String> {
        SyncedRoleManager::get_domains(self, name)
    }

    fn get_all_domains(&self) -> Vec<String> {
        SyncedRoleManager::get_all_domains(self)
    }

    fn delete_domain(&mut self, domain: &str) -> Result<()> {
        SyncedRoleManager::delete_domain(self, domain)
    }

    fn print_roles(&self) {
        SyncedRoleManager::print_roles(self)
    }

    fn add_matching_fn(&mut self, matcher: MatchingFn) {
        SyncedRoleManager::add_matching_fn(self, matcher)
    }

    fn add_domain_matching_fn(&mut self, matcher: MatchingFn) {
        SyncedRoleManager::add_domain_matching_fn(self, matcher)
    }
}
