//! Session context (role + grant lists).

use crate::resolver::PermissionResolver;
use serde::{Deserialize, Serialize};
use wellgate_types::{PermissionSet, Role};

/// The authorization-relevant slice of a user session.
///
/// Supplied by the session provider as plain data; the core never
/// fetches it. Holds:
///
/// - **Role**: exactly one [`Role`]
/// - **Custom permissions**: extra grants attached to the user record
/// - **Explicit permissions**: the user's explicit permission list
/// - **Authenticated**: whether a login is active
///
/// # Immutability
///
/// # Provider payloads
///
/// Deserialization never rejects a payload for its authorization fields:
/// a missing, `null`, malformed or unrecognized `role` becomes
/// [`Role::Visitor`], and a missing, `null` or malformed list is empty.
///
/// `SessionContext` is a value type. The `with_*` methods return a new
/// context, and [`effective`](Self::effective) recomputes the set from
/// scratch every time, so a grant removed from a list leaves no residue.
///
/// # Example
///
/// ```
/// use wellgate_auth::{PermissionResolver, SessionContext};
/// use wellgate_types::{Permission, Role};
///
/// let resolver = PermissionResolver::standard();
///
/// let session = SessionContext::authenticated(Role::User)
///     .with_custom_permissions(["relatorio.view"]);
/// assert!(session.effective(&resolver).grants(Permission::RelatorioView));
///
/// let revoked = session.with_custom_permissions(Vec::<String>::new());
/// assert!(!revoked.effective(&resolver).grants(Permission::RelatorioView));
///
/// // Logging out discards everything.
/// assert!(session.logout().effective(&resolver).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionContext {
    #[serde(deserialize_with = "lenient::role")]
    role: Role,
    #[serde(deserialize_with = "lenient::ids")]
    custom_permissions: Vec<String>,
    #[serde(deserialize_with = "lenient::ids")]
    explicit_permissions: Vec<String>,
    #[serde(deserialize_with = "lenient::flag")]
    authenticated: bool,
}

impl SessionContext {
    /// An unauthenticated session.
    #[must_use]
    pub fn visitor() -> Self {
        Self::default()
    }

    /// An authenticated session with no extra grants.
    ///
    /// Passing [`Role::Visitor`] yields an unauthenticated session.
    #[must_use]
    pub fn authenticated(role: Role) -> Self {
        Self {
            role,
            authenticated: role.is_authenticated(),
            ..Self::default()
        }
    }

    /// Builds a context from loosely-typed provider data.
    ///
    /// Missing or unrecognized roles degrade to [`Role::Visitor`]; missing
    /// lists are empty. Never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use wellgate_auth::SessionContext;
    /// use wellgate_types::Role;
    ///
    /// let s = SessionContext::from_raw(Some("admin"), None, Some(&["user.view"][..]), true);
    /// assert_eq!(s.role(), Role::Admin);
    ///
    /// let s = SessionContext::from_raw(Some("superadmin"), None, None::<&[&str]>, true);
    /// assert_eq!(s.role(), Role::Visitor);
    /// assert!(!s.is_authenticated());
    /// ```
    #[must_use]
    pub fn from_raw<S: AsRef<str>>(
        role: Option<&str>,
        custom: Option<&[S]>,
        explicit: Option<&[S]>,
        authenticated: bool,
    ) -> Self {
        let role = role.map(parse_role).unwrap_or_default();
        let to_vec = |list: Option<&[S]>| -> Vec<String> {
            list.map(|l| l.iter().map(|s| s.as_ref().to_string()).collect())
                .unwrap_or_default()
        };

        Self {
            role,
            custom_permissions: to_vec(custom),
            explicit_permissions: to_vec(explicit),
            authenticated: authenticated && role.is_authenticated(),
        }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn custom_permissions(&self) -> &[String] {
        &self.custom_permissions
    }

    #[must_use]
    pub fn explicit_permissions(&self) -> &[String] {
        &self.explicit_permissions
    }

    /// Returns `true` when a login is active with a non-visitor role.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated && self.role.is_authenticated()
    }

    /// Returns a new context with a different role.
    ///
    /// The login state is kept; switching roles never logs anyone in.
    #[must_use]
    pub fn with_role(&self, role: Role) -> Self {
        Self {
            role,
            ..self.clone()
        }
    }

    /// Returns a new context with the custom list replaced.
    #[must_use]
    pub fn with_custom_permissions<I, S>(&self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            custom_permissions: ids.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }

    /// Returns a new context with the explicit list replaced.
    #[must_use]
    pub fn with_explicit_permissions<I, S>(&self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            explicit_permissions: ids.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }

    /// Returns an unauthenticated context; all grants are discarded.
    #[must_use]
    pub fn logout(&self) -> Self {
        Self::visitor()
    }

    /// Computes the effective permission set for this context.
    ///
    /// Unauthenticated contexts always resolve to the empty set.
    #[must_use]
    pub fn effective(&self, resolver: &PermissionResolver) -> PermissionSet {
        if !self.is_authenticated() {
            return PermissionSet::empty();
        }
        resolver.resolve(
            self.role,
            Some(self.custom_permissions.as_slice()),
            Some(self.explicit_permissions.as_slice()),
        )
    }
}

/// Parses a provider role name, degrading unknown names to visitor.
fn parse_role(raw: &str) -> Role {
    Role::parse(raw).unwrap_or_else(|| {
        tracing::warn!(role = raw, "unrecognized role, treating session as visitor");
        Role::Visitor
    })
}

/// Field deserializers that degrade instead of failing.
mod lenient {
    use super::parse_role;
    use serde::de::{Deserializer, IgnoredAny};
    use serde::Deserialize;
    use wellgate_types::Role;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Value(T),
        Other(IgnoredAny),
    }

    fn well_formed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(match Raw::<T>::deserialize(deserializer)? {
            Raw::Value(v) => Some(v),
            Raw::Other(_) => None,
        })
    }

    pub(super) fn role<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Role, D::Error> {
        Ok(well_formed::<D, String>(deserializer)?
            .map(|raw| parse_role(&raw))
            .unwrap_or_default())
    }

    pub(super) fn ids<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let ids = well_formed::<D, Vec<String>>(deserializer)?;
        if ids.is_none() {
            tracing::debug!("malformed permission list, treating as empty");
        }
        Ok(ids.unwrap_or_default())
    }

    pub(super) fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(well_formed::<D, bool>(deserializer)?.unwrap_or_default())
    }
}

impl std::fmt::Display for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.is_authenticated() {
            "authenticated"
        } else {
            "anonymous"
        };
        write!(f, "{}@{}", self.role, state)
    }
}
