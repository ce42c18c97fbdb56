//! Per-domain role registry
//!
//! `Roles` is an insertion-ordered arena: a node's position in the map is its
//! [`RoleId`]. Nodes are never removed, so handles stay valid for the
//! registry's lifetime.

use indexmap::IndexMap;

use super::node::{Role, RoleId, RoleRef};
use crate::matching::MatchingFn;

/// Collection of roles for one domain
#[derive(Debug, Clone, Default)]
pub struct Roles {
    nodes: IndexMap<String, Role>,
}

impl Roles {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of roles
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the registry holds no roles
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Exact lookup
    pub fn load(&self, name: &str) -> Option<RoleRef<'_>> {
        self.id_of(name).map(|id| RoleRef::new(self, id))
    }

    /// Handle of the role named exactly `name`
    pub fn id_of(&self, name: &str) -> Option<RoleId> {
        self.nodes.get_index_of(name).map(RoleId)
    }

    /// Exact get-or-create
    pub fn load_or_store(&mut self, name: &str) -> RoleId {
        if let Some(idx) = self.nodes.get_index_of(name) {
            return RoleId(idx);
        }
        let (idx, _) = self.nodes.insert_full(name.to_string(), Role::new(name));
        RoleId(idx)
    }

    /// Get-or-create, linking pattern-equivalent roles for custom strategies
    ///
    /// With `MatchingFn::Custom(p)`, every other role `k` for which `p(k, name)`
    /// or `p(name, k)` holds is linked to the new role in both directions, so
    /// a concrete name inherits whatever its pattern inherits and vice versa.
    pub fn create_role(&mut self, name: &str, matcher: &MatchingFn) -> RoleId {
        let id = self.load_or_store(name);

        if let MatchingFn::Custom(predicate) = matcher {
            let matched: Vec<RoleId> = self
                .nodes
                .keys()
                .enumerate()
                .filter(|(idx, _)| *idx != id.0)
                .filter(|(_, key)| predicate(key.as_str(), name) || predicate(name, key.as_str()))
                .map(|(idx, _)| RoleId(idx))
                .collect();

            for other in matched {
                self.nodes[id.0].add_role(other);
                self.nodes[other.0].add_role(id);
            }
        }

        id
    }

    /// Exact existence, or for a custom strategy any role `k` with `p(name, k)`
    pub fn has_role(&self, name: &str, matcher: &MatchingFn) -> bool {
        if self.nodes.contains_key(name) {
            return true;
        }

        match matcher {
            MatchingFn::Exact => false,
            MatchingFn::Custom(predicate) => {
                self.nodes.keys().any(|key| predicate(name, key.as_str()))
            }
        }
    }

    /// Adds edge `from -> to`; returns false if it already existed
    pub fn add_link(&mut self, from: RoleId, to: RoleId) -> bool {
        self.nodes[from.0].add_role(to)
    }

    /// Removes edge `from -> to`; returns whether one was removed
    pub fn delete_link(&mut self, from: RoleId, to: RoleId) -> bool {
        self.nodes[from.0].delete_role(to)
    }

    /// View of the role behind `id`
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this registry.
    pub fn get(&self, id: RoleId) -> RoleRef<'_> {
        RoleRef::new(self, id)
    }

    pub(crate) fn role(&self, id: RoleId) -> &Role {
        &self.nodes[id.0]
    }

    /// Roles in insertion order
    pub fn iter(&self) -> impl Iterator<Item = RoleRef<'_>> + '_ {
        (0..self.nodes.len()).map(move |idx| RoleRef::new(self, RoleId(idx)))
    }

    /// Roles in insertion order, collected
    pub fn to_array(&self) -> Vec<RoleRef<'_>> {
        self.iter().collect()
    }

    /// Role names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }
}
