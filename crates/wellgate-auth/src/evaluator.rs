//! Access evaluation.
//!
//! Answers "does this permission set satisfy this requirement?" for the
//! three query shapes the UI uses:
//!
//! | Query | True when |
//! |-------|-----------|
//! | [`has_permission`] | the permission is in the set |
//! | [`has_any_permission`] | the list is empty, or one of its permissions is in the set |
//! | [`has_all_permissions`] | every permission of the list is in the set (empty list included) |
//!
//! [`evaluate`] combines them the way a gated element declares its
//! requirement: a single permission, or a list with an ANY/ALL switch.
//! An absent requirement grants access; callers that want protection
//! must say what they require.
//!
//! Every query accepts typed [`Permission`]s or raw identifiers. Raw
//! identifiers outside the catalogue are never satisfied (fail-closed).
//!
//! # Example
//!
//! ```
//! use wellgate_auth::evaluator::{evaluate, has_all_permissions, has_any_permission, Requirement};
//! use wellgate_types::PermissionSet;
//!
//! let set = PermissionSet::PLANO_VIEW | PermissionSet::PLANO_EDIT;
//!
//! assert!(has_any_permission(set, &["plano.edit", "plano.create"]));
//! assert!(!has_all_permissions(set, &["plano.edit", "plano.create"]));
//!
//! let edit_or_create = Requirement::from(vec!["plano.edit", "plano.create"]);
//! assert!(evaluate(set, Some(&edit_or_create), false));
//! assert!(!evaluate(set, Some(&edit_or_create), true));
//! assert!(evaluate(set, None, true));
//! ```

use serde::{Deserialize, Serialize};
use wellgate_types::{Permission, PermissionSet};

/// What a gated element requires.
///
/// Deserializes from either a string or a list of strings, matching how
/// gates are declared in front-end configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requirement {
    Single(String),
    List(Vec<String>),
}

impl From<Permission> for Requirement {
    fn from(p: Permission) -> Self {
        Self::Single(p.as_str().to_string())
    }
}

impl From<&str> for Requirement {
    fn from(id: &str) -> Self {
        Self::Single(id.to_string())
    }
}

impl From<String> for Requirement {
    fn from(id: String) -> Self {
        Self::Single(id)
    }
}

impl From<&[Permission]> for Requirement {
    fn from(ps: &[Permission]) -> Self {
        Self::List(ps.iter().map(|p| p.as_str().to_string()).collect())
    }
}

impl From<Vec<Permission>> for Requirement {
    fn from(ps: Vec<Permission>) -> Self {
        Self::from(ps.as_slice())
    }
}

impl From<Vec<&str>> for Requirement {
    fn from(ids: Vec<&str>) -> Self {
        Self::List(ids.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Requirement {
    fn from(ids: Vec<String>) -> Self {
        Self::List(ids)
    }
}

/// Returns `true` iff `permission` is in `set`.
#[must_use]
pub fn has_permission(set: PermissionSet, permission: impl AsRef<str>) -> bool {
    set.grants_id(permission.as_ref())
}

/// Returns `true` if `permissions` is empty or any of them is in `set`.
#[must_use]
pub fn has_any_permission<S: AsRef<str>>(set: PermissionSet, permissions: &[S]) -> bool {
    permissions.is_empty() || permissions.iter().any(|p| has_permission(set, p))
}

/// Returns `true` if every permission in `permissions` is in `set`.
#[must_use]
pub fn has_all_permissions<S: AsRef<str>>(set: PermissionSet, permissions: &[S]) -> bool {
    permissions.iter().all(|p| has_permission(set, p))
}

/// Evaluates a requirement against a set.
///
/// - `None` → `true` (no gate configured)
/// - `Single(p)` → [`has_permission`]
/// - `List(ps)` → [`has_all_permissions`] if `require_all`, else [`has_any_permission`]
#[must_use]
pub fn evaluate(set: PermissionSet, requirement: Option<&Requirement>, require_all: bool) -> bool {
    let allowed = match requirement {
        None => return true,
        Some(Requirement::Single(p)) => has_permission(set, p),
        Some(Requirement::List(ps)) if require_all => has_all_permissions(set, ps),
        Some(Requirement::List(ps)) => has_any_permission(set, ps),
    };

    if !allowed {
        tracing::debug!(
            requirement = ?requirement,
            require_all,
            granted = %set,
            "requirement not satisfied"
        );
    }
    allowed
}

/// A declarative gate: an optional requirement plus the ANY/ALL switch.
///
/// This is the shape a gated button or section carries.
///
/// # Example
///
/// ```
/// use wellgate_auth::Gate;
/// use wellgate_types::{Permission, PermissionSet};
///
/// let gate = Gate::all([Permission::ConteudoEdit, Permission::ConteudoDelete]);
/// assert!(!gate.allows(PermissionSet::CONTEUDO_EDIT));
/// assert!(gate.allows(PermissionSet::CONTEUDO_EDIT | PermissionSet::CONTEUDO_DELETE));
///
/// assert!(Gate::open().allows(PermissionSet::empty()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement: Option<Requirement>,
    #[serde(default)]
    pub require_all: bool,
}

impl Gate {
    /// A gate with no requirement. Always allows.
    #[must_use]
    pub fn open() -> Self {
        Self::default()
    }

    /// A gate on one permission.
    #[must_use]
    pub fn single(requirement: impl Into<Requirement>) -> Self {
        Self {
            requirement: Some(requirement.into()),
            require_all: false,
        }
    }

    /// A gate satisfied by any of the permissions.
    #[must_use]
    pub fn any(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            requirement: Some(Requirement::from(permissions.into_iter().collect::<Vec<_>>())),
            require_all: false,
        }
    }

    /// A gate satisfied only by all of the permissions.
    #[must_use]
    pub fn all(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            requirement: Some(Requirement::from(permissions.into_iter().collect::<Vec<_>>())),
            require_all: true,
        }
    }

    #[must_use]
    pub fn allows(&self, set: PermissionSet) -> bool {
        evaluate(set, self.requirement.as_ref(), self.require_all)
    }
}
