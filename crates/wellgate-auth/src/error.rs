//! Navigation denial error.
//!
//! [`AccessDenied`] is the `Result` form of a non-`Allow`
//! [`NavigationDecision`](crate::NavigationDecision), for callers that
//! prefer `?` over matching on decisions:
//!
//! ```text
//! check(path) ──► Allow ─────────────► Ok(())
//!             ├─► RedirectToLogin ───► Unauthenticated
//!             └─► Redirect
//!                   ├─ required: Some ► MissingPermission
//!                   └─ required: None ► RouteNotAllowed
//! ```

use thiserror::Error;
use wellgate_types::{ErrorCode, Permission, Role};

/// A navigation the guard refused.
///
/// # Example
///
/// ```
/// use wellgate_auth::AccessDenied;
/// use wellgate_types::{ErrorCode, Permission, Role};
///
/// let err = AccessDenied::MissingPermission {
///     path: "/relatorios".to_string(),
///     required: Permission::RelatorioView,
///     role: Role::User,
/// };
///
/// assert!(err.to_string().contains("relatorio.view"));
/// assert_eq!(err.code(), "ACCESS_MISSING_PERMISSION");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// The path needs a logged-in session.
    #[error("authentication required for '{path}'")]
    Unauthenticated { path: String },

    /// The path maps to a permission the session does not hold.
    #[error("'{path}' requires {required}, not granted to {role}")]
    MissingPermission {
        path: String,
        required: Permission,
        role: Role,
    },

    /// The path is unmapped and the legacy route table refuses the role.
    #[error("'{path}' is not available to {role}")]
    RouteNotAllowed { path: String, role: Role },
}

impl AccessDenied {
    /// The normalized path that was refused.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Unauthenticated { path }
            | Self::MissingPermission { path, .. }
            | Self::RouteNotAllowed { path, .. } => path,
        }
    }

    /// Which check refused the navigation.
    #[must_use]
    pub fn layer(&self) -> &'static str {
        match self {
            Self::Unauthenticated { .. } => "session",
            Self::MissingPermission { .. } => "permission",
            Self::RouteNotAllowed { .. } => "legacy_route",
        }
    }
}

impl ErrorCode for AccessDenied {
    fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated { .. } => "ACCESS_UNAUTHENTICATED",
            Self::MissingPermission { .. } => "ACCESS_MISSING_PERMISSION",
            Self::RouteNotAllowed { .. } => "ACCESS_ROUTE_NOT_ALLOWED",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Logging in can fix it; a missing grant cannot be fixed client-side.
        matches!(self, Self::Unauthenticated { .. })
    }
}
