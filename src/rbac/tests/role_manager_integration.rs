//! Integration tests for the role manager
//!
//! Covers organizational hierarchies, multi-tenant scoping, wildcard role and
//! domain matching, and shared access through the synced manager.

use cretoai_rbac::matching::{glob_match, wildcard_match};
use cretoai_rbac::{
    DefaultRoleManager, MatchingFn, RbacError, RoleManager, RoleManagerConfig, SyncedRoleManager,
    DEFAULT_DOMAIN,
};
use std::sync::Once;
use std::thread;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// ceo <- vp_engineering <- director_backend <- manager_api <- engineer_alice
fn organizational_hierarchy(rm: &mut dyn RoleManager, tenant: &str) {
    let links = [
        ("vp_engineering", "ceo"),
        ("vp_sales", "ceo"),
        ("director_backend", "vp_engineering"),
        ("director_frontend", "vp_engineering"),
        ("manager_api", "director_backend"),
        ("engineer_alice", "manager_api"),
        ("engineer_bob", "director_frontend"),
    ];
    for (user, role) in links {
        rm.add_link(user, role, &[tenant]).unwrap();
    }
}

// ============================================================================
// HIERARCHY TESTS
// ============================================================================

#[test]
fn test_organizational_hierarchy() {
    init_tracing();
    let mut rm = DefaultRoleManager::new(10);
    organizational_hierarchy(&mut rm, "acme");

    assert!(rm.has_link("engineer_alice", "ceo", &["acme"]).unwrap());
    assert!(rm.has_link("engineer_bob", "vp_engineering", &["acme"]).unwrap());
    assert!(!rm.has_link("engineer_bob", "director_backend", &["acme"]).unwrap());
    assert!(!rm.has_link("vp_sales", "vp_engineering", &["acme"]).unwrap());

    assert_eq!(
        rm.get_roles("engineer_alice", &["acme"]).unwrap(),
        vec!["manager_api", "director_backend", "vp_engineering", "ceo"]
    );
    assert_eq!(
        rm.get_users("vp_engineering", &["acme"]).unwrap(),
        vec!["director_backend", "director_frontend"]
    );

    rm.print_roles();
}

#[test]
fn test_shallow_bound_from_config() {
    let config = RoleManagerConfig::from_json(r#"{ "max_hierarchy_level": 2 }"#).unwrap();
    let mut rm = DefaultRoleManager::from_config(&config).unwrap();
    organizational_hierarchy(&mut rm, "acme");

    assert!(rm.has_link("engineer_alice", "director_backend", &["acme"]).unwrap());
    assert!(!rm.has_link("engineer_alice", "vp_engineering", &["acme"]).unwrap());
    assert_eq!(
        rm.get_roles("engineer_alice", &["acme"]).unwrap(),
        vec!["manager_api", "director_backend"]
    );
}

#[test]
fn test_invalid_config() {
    assert!(matches!(
        RoleManagerConfig::from_json(r#"{ "max_hierarchy_level": 0 }"#),
        Err(RbacError::InvalidArgument(_))
    ));
    assert!(matches!(
        RoleManagerConfig::from_json("not json"),
        Err(RbacError::Config(_))
    ));
    assert_eq!(RoleManagerConfig::from_json("{}").unwrap(), RoleManagerConfig::default());
}

#[test]
fn test_revoking_middle_link_cuts_inheritance() {
    let mut rm = DefaultRoleManager::new(10);
    organizational_hierarchy(&mut rm, "acme");

    rm.delete_link("manager_api", "director_backend", &["acme"]).unwrap();

    assert!(rm.has_link("engineer_alice", "manager_api", &["acme"]).unwrap());
    assert!(!rm.has_link("engineer_alice", "ceo", &["acme"]).unwrap());
    assert!(rm.get_users("director_backend", &["acme"]).unwrap().is_empty());
}

// ============================================================================
// MULTI-TENANT TESTS
// ============================================================================

#[test]
fn test_tenants_do_not_leak() {
    let mut rm = DefaultRoleManager::new(10);
    organizational_hierarchy(&mut rm, "acme");
    rm.add_link("engineer_alice", "contractor", &["globex"]).unwrap();

    assert!(!rm.has_link("engineer_alice", "ceo", &["globex"]).unwrap());
    assert_eq!(
        rm.get_roles("engineer_alice", &["globex"]).unwrap(),
        vec!["contractor"]
    );
    assert_eq!(rm.get_domains("engineer_alice"), vec!["acme", "globex"]);
    assert_eq!(rm.get_all_domains(), vec![DEFAULT_DOMAIN, "acme", "globex"]);

    rm.delete_domain("acme").unwrap();
    assert_eq!(rm.get_domains("engineer_alice"), vec!["globex"]);
}

#[test]
fn test_wildcard_domain_policies() {
    let mut rm = DefaultRoleManager::new(10);
    rm.add_domain_matching_fn(MatchingFn::glob_match());
    rm.add_link("support", "reader", &["tenant-*"]).unwrap();
    rm.add_link("alice", "support", &["tenant-1"]).unwrap();
    rm.add_link("bob", "support", &["other"]).unwrap();

    assert!(rm.has_link("alice", "reader", &["tenant-1"]).unwrap());
    assert!(!rm.has_link("bob", "reader", &["other"]).unwrap());
    assert!(glob_match("tenant-1", "tenant-*"));
}

#[test]
fn test_one_way_domain_pattern() {
    let mut rm = DefaultRoleManager::new(10);
    rm.add_domain_matching_fn(MatchingFn::key_match());
    rm.add_link("admin", "auditor", &["org/*"]).unwrap();
    rm.add_link("alice", "admin", &["org/acme"]).unwrap();

    // the concrete domain pulls in the pattern domain's links
    assert!(rm.has_link("alice", "auditor", &["org/acme"]).unwrap());
    assert_eq!(
        rm.get_roles("alice", &["org/acme"]).unwrap(),
        vec!["admin", "auditor"]
    );

    // but the pattern domain does not see the concrete domain's links
    assert!(!rm.has_link("alice", "auditor", &["org/*"]).unwrap());
    assert!(!rm.has_link("alice", "auditor", &["team/acme"]).unwrap());
}

// ============================================================================
// ROLE PATTERN TESTS
// ============================================================================

#[test]
fn test_wildcard_role_patterns() {
    let mut rm = DefaultRoleManager::new(10);
    rm.add_matching_fn(MatchingFn::wildcard_match());
    rm.add_link("alice", "document:*", &[]).unwrap();

    assert!(rm.has_link("alice", "document:editor", &[]).unwrap());
    assert!(rm.has_link("alice", "document:viewer", &[]).unwrap());
    assert!(!rm.has_link("alice", "invoice:viewer", &[]).unwrap());
    assert!(wildcard_match("document:editor", "document:*"));
}

#[test]
fn test_regex_role_patterns() {
    let mut rm = DefaultRoleManager::new(10);
    rm.add_matching_fn(MatchingFn::regex_match());
    rm.add_link("alice", "^admin_.*$", &[]).unwrap();

    assert!(rm.has_link("alice", "admin_us", &[]).unwrap());
    assert!(!rm.has_link("alice", "editor_us", &[]).unwrap());

    // an invalid expression simply never matches
    let mut broken = DefaultRoleManager::new(10);
    broken.add_matching_fn(MatchingFn::regex_match());
    broken.add_link("bob", "admin_(", &[]).unwrap();
    assert!(!broken.has_link("bob", "admin_x", &[]).unwrap());
}

#[test]
fn test_key_match2_route_roles() {
    let mut rm = DefaultRoleManager::new(10);
    rm.add_matching_fn(MatchingFn::key_match2());
    rm.add_link("alice", "/orders/:id", &[]).unwrap();

    assert!(rm.has_link("alice", "/orders/42", &[]).unwrap());
    assert!(!rm.has_link("alice", "/invoices/7", &[]).unwrap());
}

#[test]
fn test_exact_matcher_after_pattern_compares_exactly() {
    let mut rm = DefaultRoleManager::new(10);
    rm.add_matching_fn(MatchingFn::wildcard_match());
    rm.add_link("alice", "document:*", &[]).unwrap();
    assert!(rm.has_link("alice", "document:editor", &[]).unwrap());

    rm.add_matching_fn(MatchingFn::Exact);
    // pattern mode stays on, names now compare exactly
    assert!(rm.has_pattern());
    assert!(!rm.has_link("alice", "document:editor", &[]).unwrap());
    assert!(rm.has_link("alice", "document:*", &[]).unwrap());
}

// ============================================================================
// CONCURRENCY TESTS
// ============================================================================

#[test]
fn test_synced_manager_parallel_tenants() {
    let rm = SyncedRoleManager::new(10);
    let mut handles = Vec::new();

    for t in 0..4 {
        let rm = rm.clone();
        handles.push(thread::spawn(move || {
            let tenant = format!("tenant{}", t);
            for u in 0..25 {
                let user = format!("user{}", u);
                rm.add_link(&user, "member", &[tenant.as_str()]).unwrap();
            }
            rm.add_link("member", "reader", &[tenant.as_str()]).unwrap();
        }));
    }

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let rm = rm.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    let _ = rm.has_link("user1", "reader", &["tenant0"]).unwrap();
                }
            })
        })
        .collect();

    for handle in handles.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    for t in 0..4 {
        let tenant = format!("tenant{}", t);
        assert!(rm.has_link("user24", "reader", &[tenant.as_str()]).unwrap());
        assert_eq!(rm.get_users("member", &[tenant.as_str()]).unwrap().len(), 25);
    }
    assert_eq!(rm.get_all_domains().len(), 5);
}

#[test]
fn test_synced_manager_pattern_mode() {
    let rm = SyncedRoleManager::default();
    rm.add_domain_matching_fn(MatchingFn::key_match());
    rm.add_link("root", "superuser", &["*"]).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rm = rm.clone();
            thread::spawn(move || {
                let tenant = format!("tenant{}", i);
                rm.has_link("root", "superuser", &[tenant.as_str()]).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
