//! Role manager configuration

use serde::{Deserialize, Serialize};

use crate::error::{RbacError, Result};

/// Default maximum number of hops followed when resolving inheritance
pub const DEFAULT_MAX_HIERARCHY_LEVEL: usize = 10;

/// Configuration for a role manager
///
/// # Examples
///
/// ```
/// use cretoai_rbac::RoleManagerConfig;
///
/// let config = RoleManagerConfig::from_json(r#"{ "max_hierarchy_level": 4 }"#).unwrap();
/// assert_eq!(config.max_hierarchy_level, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleManagerConfig {
    /// Maximum depth of the role hierarchy followed by queries (must be >= 1)
    pub max_hierarchy_level: usize,
}

impl RoleManagerConfig {
    /// Creates a config with the given hierarchy bound
    pub fn new(max_hierarchy_level: usize) -> Self {
        Self { max_hierarchy_level }
    }

    /// Parses and validates a JSON config document
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_hierarchy_level == 0 {
            return Err(RbacError::InvalidArgument(
                "max_hierarchy_level must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RoleManagerConfig {
    fn default() -> Self {
        Self {
            max_hierarchy_level: DEFAULT_MAX_HIERARCHY_LEVEL,
        }
    }
}
