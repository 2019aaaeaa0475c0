//! Deployment environments and the ECS names derived from them.
//!
//! The cluster is shared by every environment; the service name is
//! templated from the environment: `carton-case-mgmt-{env}-service`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// ECS cluster hosting every Carton Case Management environment.
pub const CLUSTER_NAME: &str = "carton-case-management-cluster";

/// Command run inside the application container to reset and reseed the
/// database.
pub const DB_SETUP_COMMAND: &str = "npm run db:setup";

/// Production environment identifier.
pub const ENV_PRODUCTION: &str = "production";

/// Staging environment identifier.
pub const ENV_STAGING: &str = "staging";

/// Valid environment values.
const VALID_ENVIRONMENTS: &[&str] = &[ENV_PRODUCTION, ENV_STAGING];

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// A deployment environment of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    Staging,
}

impl Environment {
    /// Resolve an operator-supplied value, falling back to staging.
    ///
    /// Only the exact strings `"production"` and `"staging"` are
    /// recognized. Anything else (wrong case, surrounding whitespace,
    /// typos, empty input) resolves to [`Environment::Staging`] so that
    /// malformed input never targets production.
    pub fn from_arg(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Value as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => ENV_PRODUCTION,
            Self::Staging => ENV_STAGING,
        }
    }

    /// ECS service name running this environment.
    pub fn service_name(self) -> String {
        format!("carton-case-mgmt-{}-service", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ENV_PRODUCTION => Ok(Self::Production),
            ENV_STAGING => Ok(Self::Staging),
            other => Err(CoreError::Validation(format!(
                "Unknown environment '{other}'. Must be one of: {VALID_ENVIRONMENTS:?}"
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
