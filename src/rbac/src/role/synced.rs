//! Thread-safe role manager
//!
//! Wraps [`DefaultRoleManager`] in a reader-writer lock. Queries share the
//! lock; link mutation, clearing, domain deletion and matcher installation
//! take it exclusively. Clones share the same underlying manager.

use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

use super::manager::DefaultRoleManager;
use crate::config::RoleManagerConfig;
use crate::error::Result;
use crate::matching::MatchingFn;

/// Role manager safe to share across threads
///
/// # Examples
///
/// ```
/// use cretoai_rbac::SyncedRoleManager;
/// use std::thread;
///
/// let rm = SyncedRoleManager::new(10);
/// rm.add_link("alice", "admin", &[]).unwrap();
///
/// let reader = rm.clone();
/// let handle = thread::spawn(move || reader.has_link("alice", "admin", &[]).unwrap());
/// assert!(handle.join().unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct SyncedRoleManager {
    inner: Arc<RwLock<DefaultRoleManager>>,
}

impl SyncedRoleManager {
    /// Creates a guarded manager with the given hop bound
    pub fn new(max_hierarchy_level: usize) -> Self {
        Self::from_manager(DefaultRoleManager::new(max_hierarchy_level))
    }

    /// Creates a guarded manager from a validated config
    pub fn from_config(config: &RoleManagerConfig) -> Result<Self> {
        DefaultRoleManager::from_config(config).map(Self::from_manager)
    }

    /// Takes ownership of an existing manager
    pub fn from_manager(manager: DefaultRoleManager) -> Self {
        Self {
            inner: Arc::new(RwLock::new(manager)),
        }
    }

    /// Shared read access for running several queries under one lock
    pub fn read(&self) -> RwLockReadGuard<'_, DefaultRoleManager> {
        self.inner.read()
    }

    /// Hop bound applied to every traversal
    pub fn max_hierarchy_level(&self) -> usize {
        self.inner.read().max_hierarchy_level()
    }

    /// Drops every registry, leaving an empty default domain
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Adds the link `name1 -> name2` under the write lock
    pub fn add_link(&self, name1: &str, name2: &str, domain: &[&str]) -> Result<()> {
        self.inner.write().add_link(name1, name2, domain)
    }

    /// Removes the link `name1 -> name2`; both roles must exist
    pub fn delete_link(&self, name1: &str, name2: &str, domain: &[&str]) -> Result<()> {
        self.inner.write().delete_link(name1, name2, domain)
    }

    /// Whether `name1` inherits `name2` within the hop bound
    pub fn has_link(&self, name1: &str, name2: &str, domain: &[&str]) -> Result<bool> {
        self.inner.read().has_link(name1, name2, domain)
    }

    /// Roles `name` inherits, nearest first
    pub fn get_roles(&self, name: &str, domain: &[&str]) -> Result<Vec<String>> {
        self.inner.read().get_roles(name, domain)
    }

    /// Roles holding a direct link to `name`
    pub fn get_users(&self, name: &str, domain: &[&str]) -> Result<Vec<String>> {
        self.inner.read().get_users(name, domain)
    }

    /// Domains whose registry contains `name`
    pub fn get_domains(&self, name: &str) -> Vec<String> {
        self.inner.read().get_domains(name)
    }

    /// Every domain with a registry, in creation order
    pub fn get_all_domains(&self) -> Vec<String> {
        self.inner.read().get_all_domains()
    }

    /// Drops one domain's registry; the default domain is emptied instead
    pub fn delete_domain(&self, domain: &str) -> Result<()> {
        self.inner.write().delete_domain(domain)
    }

    /// Every non-empty role descriptor joined with `", "`
    pub fn role_summary(&self) -> String {
        self.inner.read().role_summary()
    }

    /// Logs the role summary at INFO level
    pub fn print_roles(&self) {
        self.inner.read().print_roles();
    }

    /// Installs the role-name matching strategy
    pub fn add_matching_fn(&self, matcher: MatchingFn) {
        self.inner.write().add_matching_fn(matcher);
    }

    /// Installs the domain-name matching strategy
    pub fn add_domain_matching_fn(&self, matcher: MatchingFn) {
        self.inner.write().add_domain_matching_fn(matcher);
    }
}

impl Default for SyncedRoleManager {
    fn default() -> Self {
        Self::from_manager(DefaultRoleManager::default())
    }
}
