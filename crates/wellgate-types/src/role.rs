//! Session roles.

use serde::{Deserialize, Serialize};

/// Coarse-grained classification of the current session.
///
/// Every session has exactly one role at a time; roles are never
/// combined. The baseline permissions each role implies live in the
/// resolver, not here.
///
/// | Role | Authenticated |
/// |------|---------------|
/// | `Visitor` | no |
/// | `User` | yes |
/// | `Admin` | yes |
/// | `Master` | yes |
///
/// # Example
///
/// ```
/// use wellgate_types::Role;
///
/// assert_eq!(Role::parse("admin"), Some(Role::Admin));
/// assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
/// assert_eq!(Role::parse("superuser"), None);
/// assert!(!Role::Visitor.is_authenticated());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Unauthenticated.
    #[default]
    Visitor,
    User,
    Admin,
    Master,
}

impl Role {
    /// Every role, least privileged first.
    pub const ALL: [Role; 4] = [Self::Visitor, Self::User, Self::Admin, Self::Master];

    /// Returns the wire name (`"admin"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visitor => "visitor",
            Self::User => "user",
            Self::Admin => "admin",
            Self::Master => "master",
        }
    }

    /// Parses a role name (case-insensitive, surrounding whitespace ignored).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "visitor" => Some(Self::Visitor),
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            "master" => Some(Self::Master),
            _ => None,
        }
    }

    /// Returns `true` for every role except [`Role::Visitor`].
    #[must_use]
    pub fn is_authenticated(self) -> bool {
        !matches!(self, Self::Visitor)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
