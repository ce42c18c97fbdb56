//! # CretoAI RBAC Role Manager
//!
//! In-memory role hierarchy used by the policy engine to expand RBAC rules
//! such as `g(alice, admin)` before matching requests.
//!
//! ## Features
//!
//! - **Domain scoping**: independent role graphs per tenant
//! - **Bounded traversal**: breadth-first, visit-once, capped at a hop limit
//! - **Cycle tolerant**: cyclic inheritance is allowed and always terminates
//! - **Pattern mode**: wildcard role and domain names via [`MatchingFn`]
//! - **Thread-safe wrapper**: [`SyncedRoleManager`] guards a manager with a
//!   reader-writer lock
//!
//! ## Example
//!
//! ```rust
//! use cretoai_rbac::{DefaultRoleManager, MatchingFn};
//!
//! let mut rm = DefaultRoleManager::new(10);
//! rm.add_link("alice", "admin", &["tenant1"]).unwrap();
//!
//! assert!(rm.has_link("alice", "admin", &["tenant1"]).unwrap());
//! assert!(!rm.has_link("alice", "admin", &["tenant2"]).unwrap());
//!
//! // Policies written for domain "*" apply to every tenant
//! rm.add_domain_matching_fn(MatchingFn::key_match());
//! rm.add_link("bob", "auditor", &["*"]).unwrap();
//! assert!(rm.has_link("bob", "auditor", &["tenant2"]).unwrap());
//! ```

pub mod config;
pub mod error;
pub mod matching;
pub mod role;

pub use config::RoleManagerConfig;
pub use error::{RbacError, Result};
pub use matching::MatchingFn;
pub use role::{
    DefaultRoleManager, RoleManager, Roles, SyncedRoleManager, DEFAULT_DOMAIN,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
