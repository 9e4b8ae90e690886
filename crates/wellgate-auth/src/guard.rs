//! Route guard.
//!
//! Decides whether a navigation may proceed, combining the matcher,
//! the resolver and the legacy role-route table.
//!
//! # Decision Flow
//!
//! ```text
//! path ──► PathMatcher::resolve ──► PathLookup
//!                                      │
//!            ┌─────────────────────────┼──────────────────────────┐
//!            ▼                         ▼                          ▼
//!         Public                 Protected(p)                  Unknown
//!            │                         │                          │
//!          Allow          anonymous? ──► RedirectToLogin    anonymous? ──► RedirectToLogin
//!                         p granted? ──► Allow              legacy table:
//!                         otherwise  ──► Redirect(home)       covered      ──► Allow
//!                                                             role listed  ──► Redirect(home)
//!                                                             role absent  ──► Allow (warn)
//!                                                                          or Redirect if strict
//! ```
//!
//! Unmapped paths fail open unless `strict_unmapped` is set. The guard
//! only shapes navigation; the server enforces access independently.

use crate::config::GuardConfig;
use crate::error::AccessDenied;
use crate::matcher::{strip_trailing_slashes, PathMatcher};
use crate::registry::PathLookup;
use crate::resolver::PermissionResolver;
use crate::session::SessionContext;
use serde::Serialize;
use std::collections::HashMap;
use wellgate_types::{Permission, PermissionSet, Role};

/// Outcome of [`RouteGuard::check`].
///
/// Every variant carries the normalized key the path matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NavigationDecision {
    /// Proceed.
    Allow { key: String },

    /// Send the user to the login page.
    RedirectToLogin { key: String, to: String },

    /// Send the user elsewhere (normally the role's home).
    ///
    /// `required` is the missing permission, or `None` when the legacy
    /// route table refused an unmapped path.
    Redirect {
        key: String,
        to: String,
        required: Option<Permission>,
    },
}

impl NavigationDecision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow { .. })
    }

    /// The normalized key the path matched.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Allow { key } | Self::RedirectToLogin { key, .. } | Self::Redirect { key, .. } => {
                key
            }
        }
    }

    /// Redirect target, if any.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Allow { .. } => None,
            Self::RedirectToLogin { to, .. } | Self::Redirect { to, .. } => Some(to.as_str()),
        }
    }
}

/// Role-to-route table for paths the registry does not map.
///
/// Implement this to back the fallback with something other than the
/// configured [`LegacyRouteTable`].
pub trait LegacyRoutes: Send + Sync + std::fmt::Debug {
    /// Whether `role` may open `path`.
    ///
    /// Returns `None` when the table has no entry for the role at all.
    fn allows(&self, role: Role, path: &str) -> Option<bool>;
}

/// Prefix table keyed by role.
///
/// Prefixes match whole segments: `/admin` covers `/admin` and
/// `/admin/logs` but not `/administrativo`. `/` covers every path.
///
/// # Example
///
/// ```
/// use wellgate_auth::{LegacyRouteTable, LegacyRoutes};
/// use wellgate_types::Role;
///
/// let table = LegacyRouteTable::new().with_routes(Role::Admin, ["/admin"]);
///
/// assert_eq!(table.allows(Role::Admin, "/admin/logs"), Some(true));
/// assert_eq!(table.allows(Role::Admin, "/administrativo"), Some(false));
/// assert_eq!(table.allows(Role::User, "/admin"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyRouteTable {
    routes: HashMap<Role, Vec<String>>,
}

impl LegacyRouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table from `[legacy_routes]`.
    ///
    /// Unknown role names are skipped with a warning;
    /// [`GuardConfig::validate`] rejects them up front.
    #[must_use]
    pub fn from_config(config: &GuardConfig) -> Self {
        let mut table = Self::new();
        for (name, prefixes) in &config.legacy_routes {
            match Role::parse(name) {
                Some(role) => table = table.with_routes(role, prefixes.iter().map(String::as_str)),
                None => tracing::warn!(role = %name, "skipping legacy routes for unknown role"),
            }
        }
        table
    }

    /// Adds prefixes for `role`, keeping any it already has.
    ///
    /// Prefixes that are not absolute (including the empty string) are
    /// skipped with a warning. The role still gets an entry, so a role
    /// whose every prefix was skipped is refused rather than let through.
    #[must_use]
    pub fn with_routes<I, S>(mut self, role: Role, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.routes.entry(role).or_default();
        for prefix in prefixes {
            let prefix = prefix.as_ref();
            if !prefix.starts_with('/') {
                tracing::warn!(role = %role, prefix, "skipping legacy route prefix that is not absolute");
                continue;
            }
            entry.push(strip_trailing_slashes(prefix).to_string());
        }
        self
    }

    /// Prefixes listed for `role`.
    #[must_use]
    pub fn routes_for(&self, role: Role) -> Option<&[String]> {
        self.routes.get(&role).map(Vec::as_slice)
    }

    fn covers(prefix: &str, path: &str) -> bool {
        prefix == "/"
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}

impl LegacyRoutes for LegacyRouteTable {
    fn allows(&self, role: Role, path: &str) -> Option<bool> {
        let prefixes = self.routes.get(&role)?;
        let path = strip_trailing_slashes(path);
        Some(prefixes.iter().any(|prefix| Self::covers(prefix, path)))
    }
}

/// Decides navigations for a session.
///
/// # Example
///
/// ```
/// use wellgate_auth::{GuardConfig, NavigationDecision, PathMatcher, PermissionRegistry,
///     PermissionResolver, RouteGuard, SessionContext};
/// use wellgate_types::{Permission, Role};
///
/// let registry = PermissionRegistry::standard();
/// let guard = RouteGuard::new(
///     PathMatcher::new(&registry),
///     PermissionResolver::standard(),
///     &GuardConfig::default(),
/// );
///
/// let user = SessionContext::authenticated(Role::User);
/// assert!(guard.check("/planos-acao/42", &user).is_allowed());
///
/// let decision = guard.check("/relatorios", &user);
/// assert_eq!(decision, NavigationDecision::Redirect {
///     key: "/relatorios".into(),
///     to: "/dashboard".into(),
///     required: Some(Permission::RelatorioView),
/// });
///
/// let anonymous = SessionContext::visitor();
/// assert_eq!(guard.check("/dashboard", &anonymous).target(), Some("/login"));
/// ```
#[derive(Debug)]
pub struct RouteGuard<'r> {
    matcher: PathMatcher<'r>,
    resolver: PermissionResolver,
    legacy: Box<dyn LegacyRoutes>,
    config: GuardConfig,
}

impl<'r> RouteGuard<'r> {
    /// Guard whose legacy table comes from `config.legacy_routes`.
    #[must_use]
    pub fn new(matcher: PathMatcher<'r>, resolver: PermissionResolver, config: &GuardConfig) -> Self {
        Self {
            matcher,
            resolver,
            legacy: Box::new(LegacyRouteTable::from_config(config)),
            config: config.clone(),
        }
    }

    /// Replaces the legacy route table.
    #[must_use]
    pub fn with_legacy_routes(mut self, legacy: Box<dyn LegacyRoutes>) -> Self {
        self.legacy = legacy;
        self
    }

    #[must_use]
    pub fn matcher(&self) -> &PathMatcher<'r> {
        &self.matcher
    }

    #[must_use]
    pub fn resolver(&self) -> &PermissionResolver {
        &self.resolver
    }

    #[must_use]
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Decides a navigation, resolving the session's permissions.
    #[must_use]
    pub fn check(&self, path: &str, session: &SessionContext) -> NavigationDecision {
        self.check_with(path, session, session.effective(&self.resolver))
    }

    /// Decides a navigation against an already resolved permission set.
    ///
    /// Use when the caller keeps the effective set as a snapshot.
    #[must_use]
    pub fn check_with(
        &self,
        path: &str,
        session: &SessionContext,
        effective: PermissionSet,
    ) -> NavigationDecision {
        let matched = self.matcher.resolve(path);
        let key = matched.key;
        let role = session.role();

        if matched.lookup.is_public() {
            tracing::trace!(path, key = %key, "public path");
            return NavigationDecision::Allow { key };
        }

        if !session.is_authenticated() {
            tracing::debug!(path, key = %key, "navigation requires login");
            return NavigationDecision::RedirectToLogin {
                key,
                to: self.config.login_path.clone(),
            };
        }

        match matched.lookup {
            PathLookup::Protected(required) if effective.grants(required) => {
                tracing::debug!(role = %role, key = %key, permission = %required, "navigation allowed");
                NavigationDecision::Allow { key }
            }
            PathLookup::Protected(required) => {
                tracing::warn!(role = %role, key = %key, permission = %required, "navigation denied");
                self.redirect(role, key, Some(required))
            }
            PathLookup::Public | PathLookup::Unknown => self.check_unmapped(role, key),
        }
    }

    /// [`check`](Self::check) as a `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] for every decision other than `Allow`.
    pub fn require(&self, path: &str, session: &SessionContext) -> Result<(), AccessDenied> {
        match self.check(path, session) {
            NavigationDecision::Allow { .. } => Ok(()),
            NavigationDecision::RedirectToLogin { key, .. } => {
                Err(AccessDenied::Unauthenticated { path: key })
            }
            NavigationDecision::Redirect {
                key,
                required: Some(required),
                ..
            } => Err(AccessDenied::MissingPermission {
                path: key,
                required,
                role: session.role(),
            }),
            NavigationDecision::Redirect { key, .. } => Err(AccessDenied::RouteNotAllowed {
                path: key,
                role: session.role(),
            }),
        }
    }

    fn check_unmapped(&self, role: Role, key: String) -> NavigationDecision {
        match self.legacy.allows(role, &key) {
            Some(true) => {
                tracing::debug!(role = %role, key = %key, "unmapped path allowed by legacy routes");
                NavigationDecision::Allow { key }
            }
            Some(false) => {
                tracing::warn!(role = %role, key = %key, "unmapped path denied by legacy routes");
                self.redirect(role, key, None)
            }
            None if self.config.strict_unmapped => {
                tracing::warn!(role = %role, key = %key, "unmapped path denied (strict)");
                self.redirect(role, key, None)
            }
            None => {
                tracing::warn!(
                    role = %role,
                    key = %key,
                    "unmapped path allowed: no legacy routes for role"
                );
                NavigationDecision::Allow { key }
            }
        }
    }

    fn redirect(&self, role: Role, key: String, required: Option<Permission>) -> NavigationDecision {
        let home = self
            .config
            .home
            .for_role(role)
            .unwrap_or(self.config.denied_path.as_str());

        // Redirecting to the page that was just refused would loop.
        let to = if self.matcher.normalize(home) == key {
            self.config.denied_path.clone()
        } else {
            home.to_string()
        };

        NavigationDecision::Redirect { key, to, required }
    }
}
