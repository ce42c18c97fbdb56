//! Role graph nodes and bounded traversal
//!
//! Nodes are owned by their [`Roles`] registry and refer to each other by
//! [`RoleId`] handles, so cyclic inheritance never creates ownership cycles.
//! Traversal goes through [`RoleRef`], a borrowed view pairing a node with
//! the registry that resolves its edges.

use indexmap::IndexSet;
use std::collections::{HashSet, VecDeque};
use std::fmt;

use super::registry::Roles;
use crate::matching::MatchingFn;

/// Handle of a role inside its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoleId(pub(crate) usize);

impl RoleId {
    /// Position of the role in registry insertion order
    pub fn index(self) -> usize {
        self.0
    }
}

/// A named vertex with its direct "inherits-from" edges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    name: String,
    /// Direct targets in the order they were linked
    edges: IndexSet<RoleId>,
}

impl Role {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            edges: IndexSet::new(),
        }
    }

    /// Role name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds an edge to `other`; returns false if it already existed
    pub fn add_role(&mut self, other: RoleId) -> bool {
        self.edges.insert(other)
    }

    /// Removes the edge to `other` if present; returns whether one was removed
    pub fn delete_role(&mut self, other: RoleId) -> bool {
        self.edges.shift_remove(&other)
    }

    /// Direct edge targets in link order
    pub fn edges(&self) -> impl Iterator<Item = RoleId> + '_ {
        self.edges.iter().copied()
    }

    /// Whether the role inherits anything
    pub fn has_edges(&self) -> bool {
        !self.edges.is_empty()
    }
}

/// Borrowed view of a role inside its registry
#[derive(Clone, Copy)]
pub struct RoleRef<'a> {
    roles: &'a Roles,
    id: RoleId,
}

impl<'a> RoleRef<'a> {
    pub(crate) fn new(roles: &'a Roles, id: RoleId) -> Self {
        Self { roles, id }
    }

    /// Handle of this role
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Role name
    pub fn name(&self) -> &'a str {
        self.role().name()
    }

    /// Underlying node
    pub fn role(&self) -> &'a Role {
        self.roles.role(self.id)
    }

    /// Direct targets in link order
    pub fn direct_roles(&self) -> impl Iterator<Item = RoleRef<'a>> + 'a {
        let roles = self.roles;
        self.role().edges().map(move |id| RoleRef::new(roles, id))
    }

    /// Whether `name` is reachable within `max_level` hops
    ///
    /// Hop 0 compares this role's own name exactly. Every reached node is
    /// compared exactly and, for a custom strategy, through the predicate as
    /// `(node, name)`. Each node is expanded at most once, so cycles
    /// terminate whatever the bound.
    pub fn has_role(&self, name: &str, max_level: usize, matcher: &MatchingFn) -> bool {
        if self.name() == name {
            return true;
        }

        self.breadth_first(max_level, |role| {
            role.name() == name || matcher.matches_pattern(role.name(), name)
        })
    }

    /// Whether `name` is an immediate edge target (exactly one hop, exact name)
    pub fn has_direct_role(&self, name: &str) -> bool {
        self.direct_roles().any(|role| role.name() == name)
    }

    /// Unique names reachable within `max_level` hops, nearest first
    ///
    /// The start role is never listed, even when a cycle leads back to it.
    pub fn get_roles(&self, max_level: usize) -> Vec<String> {
        let mut names = Vec::new();
        self.breadth_first(max_level, |role| {
            names.push(role.name().to_string());
            false
        });
        names
    }

    /// Visit-once BFS over outbound edges, stopping early when `visit`
    /// returns true. Returns whether it stopped early.
    fn breadth_first<F>(&self, max_level: usize, mut visit: F) -> bool
    where
        F: FnMut(&Role) -> bool,
    {
        if max_level == 0 {
            return false;
        }

        let mut visited: HashSet<RoleId> = HashSet::from([self.id]);
        let mut queue: VecDeque<(RoleId, usize)> = VecDeque::new();

        for id in self.role().edges() {
            if visited.insert(id) {
                queue.push_back((id, 1));
            }
        }

        while let Some((id, depth)) = queue.pop_front() {
            let role = self.roles.role(id);
            if visit(role) {
                return true;
            }

            if depth < max_level {
                for next in role.edges() {
                    if visited.insert(next) {
                        queue.push_back((next, depth + 1));
                    }
                }
            }
        }

        false
    }
}

impl fmt::Debug for RoleRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}

/// `"name > e1,e2"`, or an empty string for a role without edges
impl fmt::Display for RoleRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.role().has_edges() {
            return Ok(());
        }

        let targets: Vec<&str> = self.direct_roles().map(|role| role.name()).collect();
        write!(f, "{} > {}", self.name(), targets.join(","))
    }
}
