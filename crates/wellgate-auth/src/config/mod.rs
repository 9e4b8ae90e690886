//! Route guard configuration.
//!
//! # Sources
//!
//! | Layer | Source |
//! |-------|--------|
//! | 1 | compiled defaults ([`GuardConfig::default`]) |
//! | 2 | `wellgate.toml` (or the file given to [`ConfigLoader::with_config_file`]) |
//! | 3 | `WELLGATE_*` environment variables |
//!
//! # File format
//!
//! ```toml
//! login_path = "/login"
//! denied_path = "/acesso-negado"
//! strict_unmapped = false
//!
//! [home]
//! user = "/dashboard"
//! admin = "/dashboard"
//! master = "/dashboard"
//!
//! [legacy_routes]
//! user = ["/ajuda", "/meus-resultados"]
//! admin = ["/ajuda", "/meus-resultados", "/admin"]
//! master = ["/"]
//! ```
//!
//! `[legacy_routes]` is the role-to-route table consulted for paths the
//! registry does not know. A role absent from the table is let through
//! (and logged); `strict_unmapped = true` denies those paths instead.

mod error;
mod loader;

pub use error::ConfigError;
pub use loader::{ConfigLoader, DEFAULT_CONFIG_FILE};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wellgate_types::Role;

/// Landing page per authenticated role.
///
/// Denied navigations redirect here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomePaths {
    pub user: String,
    pub admin: String,
    pub master: String,
}

impl HomePaths {
    /// Home of `role`. Visitors have none.
    #[must_use]
    pub fn for_role(&self, role: Role) -> Option<&str> {
        match role {
            Role::Visitor => None,
            Role::User => Some(self.user.as_str()),
            Role::Admin => Some(self.admin.as_str()),
            Role::Master => Some(self.master.as_str()),
        }
    }
}

impl Default for HomePaths {
    fn default() -> Self {
        Self {
            user: "/dashboard".into(),
            admin: "/dashboard".into(),
            master: "/dashboard".into(),
        }
    }
}

/// Configuration consumed by [`RouteGuard`](crate::RouteGuard).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Where unauthenticated navigations are sent.
    pub login_path: String,

    /// Fallback for denied navigations whose target is the role's own home.
    pub denied_path: String,

    /// Deny unmapped paths for roles missing from `legacy_routes`.
    pub strict_unmapped: bool,

    pub home: HomePaths,

    /// Role name → allowed path prefixes for unmapped paths.
    pub legacy_routes: BTreeMap<String, Vec<String>>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        let shared = ["/ajuda", "/meus-resultados"];
        let mut legacy_routes = BTreeMap::new();
        legacy_routes.insert(
            Role::User.as_str().to_string(),
            shared.iter().map(|s| s.to_string()).collect(),
        );
        legacy_routes.insert(
            Role::Admin.as_str().to_string(),
            shared
                .iter()
                .chain(&["/admin"])
                .map(|s| s.to_string())
                .collect(),
        );
        legacy_routes.insert(Role::Master.as_str().to_string(), vec!["/".to_string()]);

        Self {
            login_path: "/login".into(),
            denied_path: "/acesso-negado".into(),
            strict_unmapped: false,
            home: HomePaths::default(),
            legacy_routes,
        }
    }
}

impl GuardConfig {
    /// Parses a config from TOML.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if `content` is malformed.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serializes the config to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks that every configured path is absolute and every
    /// `legacy_routes` key names a role.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_absolute("login_path", &self.login_path)?;
        require_absolute("denied_path", &self.denied_path)?;
        require_absolute("home.user", &self.home.user)?;
        require_absolute("home.admin", &self.home.admin)?;
        require_absolute("home.master", &self.home.master)?;

        for (role, prefixes) in &self.legacy_routes {
            let field = format!("legacy_routes.{role}");
            if Role::parse(role).is_none() {
                return Err(ConfigError::invalid_value(field, "unknown role"));
            }
            for prefix in prefixes {
                require_absolute(&field, prefix)?;
            }
        }
        Ok(())
    }
}

fn require_absolute(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with('/') {
        Ok(())
    } else {
        Err(ConfigError::invalid_value(
            field,
            format!("'{value}' must start with '/'"),
        ))
    }
}
