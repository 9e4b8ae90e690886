//! Role-permission resolution.
//!
//! Computes the effective permission set of a session:
//!
//! ```text
//! Effective = Baseline(role) ∪ Custom(user record) ∪ Explicit(user record)
//! ```
//!
//! The model is monotonic. Every source only adds; there is no deny
//! permission, so no source can take away what another granted and
//! the order of the sources does not matter.
//!
//! Unauthenticated sessions ([`Role::Visitor`]) resolve to the empty set
//! whatever lists they carry.

use wellgate_types::{PermissionSet, Role};

/// Role baselines for [`PermissionResolver::standard`].
mod baseline {
    use wellgate_types::PermissionSet as S;

    pub(super) const USER: S = S::DASHBOARD_VIEW
        .union(S::QUESTIONARIO_VIEW)
        .union(S::QUESTIONARIO_RESPOND)
        .union(S::DIAGNOSTICO_VIEW)
        .union(S::PLANO_VIEW)
        .union(S::GAMIFICACAO_VIEW)
        .union(S::CONTEUDO_VIEW)
        .union(S::NOTIFICACAO_VIEW)
        .union(S::PERFIL_VIEW);

    pub(super) const ADMIN: S = USER
        .union(S::QUESTIONARIO_MANAGE)
        .union(S::PLANO_CREATE)
        .union(S::PLANO_EDIT)
        .union(S::GAMIFICACAO_MANAGE)
        .union(S::CONTEUDO_CREATE)
        .union(S::CONTEUDO_EDIT)
        .union(S::CONTEUDO_DELETE)
        .union(S::RELATORIO_VIEW)
        .union(S::RELATORIO_EXPORT)
        .union(S::USER_VIEW)
        .union(S::USER_MANAGE);

    pub(super) const MASTER: S = S::all();
}

/// Computes effective permission sets from a role and grant lists.
///
/// Stateless apart from the role baselines; callers recompute whenever
/// the role or the lists change and treat each result as a snapshot.
///
/// # Example
///
/// ```
/// use wellgate_auth::PermissionResolver;
/// use wellgate_types::{Permission, PermissionSet, Role};
///
/// let resolver = PermissionResolver::standard();
///
/// let base = resolver.resolve::<&str>(Role::User, None, None);
/// assert!(base.grants(Permission::PlanoView));
/// assert!(!base.grants(Permission::RelatorioView));
///
/// let custom = ["relatorio.view", "not.a.permission"];
/// let extended = resolver.resolve(Role::User, Some(&custom[..]), None);
/// assert!(extended.grants(Permission::RelatorioView));
/// assert_eq!(extended, base | PermissionSet::RELATORIO_VIEW);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionResolver {
    user: PermissionSet,
    admin: PermissionSet,
    master: PermissionSet,
}

impl PermissionResolver {
    /// Resolver with the conventional role baselines.
    ///
    /// | Role | Baseline |
    /// |------|----------|
    /// | `visitor` | nothing |
    /// | `user` | read access to the employee-facing modules |
    /// | `admin` | `user` + content/plan authoring, reports, user management |
    /// | `master` | every known permission |
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            user: baseline::USER,
            admin: baseline::ADMIN,
            master: baseline::MASTER,
        }
    }

    /// Replaces the baseline of an authenticated role.
    ///
    /// The visitor baseline is fixed to the empty set and cannot be
    /// overridden; passing [`Role::Visitor`] is a no-op.
    #[must_use]
    pub fn with_baseline(mut self, role: Role, set: PermissionSet) -> Self {
        match role {
            Role::Visitor => {
                tracing::warn!("ignoring baseline override for visitor role");
            }
            Role::User => self.user = set,
            Role::Admin => self.admin = set,
            Role::Master => self.master = set,
        }
        self
    }

    /// Permissions a role carries by convention.
    #[must_use]
    pub fn role_baseline(&self, role: Role) -> PermissionSet {
        match role {
            Role::Visitor => PermissionSet::empty(),
            Role::User => self.user,
            Role::Admin => self.admin,
            Role::Master => self.master,
        }
    }

    /// Computes the effective set for a session.
    ///
    /// `None` and empty lists are equivalent. Unknown identifiers are
    /// dropped (and logged at debug level); they never cause a failure.
    #[must_use]
    pub fn resolve<S: AsRef<str>>(
        &self,
        role: Role,
        custom: Option<&[S]>,
        explicit: Option<&[S]>,
    ) -> PermissionSet {
        if !role.is_authenticated() {
            return PermissionSet::empty();
        }

        let mut effective = self.role_baseline(role);
        for (source, list) in [("custom", custom), ("explicit", explicit)] {
            let Some(list) = list else { continue };
            let (granted, unknown) = PermissionSet::parse_list(list);
            if !unknown.is_empty() {
                tracing::debug!(
                    role = %role,
                    source,
                    unknown = ?unknown,
                    "ignoring unknown permission identifiers"
                );
            }
            effective |= granted;
        }

        tracing::trace!(role = %role, effective = %effective, "permissions resolved");
        effective
    }
}

impl Default for PermissionResolver {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellgate_types::Permission;

    const NONE: Option<&[&str]> = None;

    #[test]
    fn visitor_resolves_to_empty_even_with_lists() {
        let resolver = PermissionResolver::standard();
        let lists = ["plano.view", "user.manage"];
        let set = resolver.resolve(Role::Visitor, Some(&lists[..]), Some(&lists[..]));
        assert!(set.is_empty());
    }

    #[test]
    fn baselines_are_nested() {
        let resolver = PermissionResolver::standard();
        let user = resolver.role_baseline(Role::User);
        let admin = resolver.role_baseline(Role::Admin);
        let master = resolver.role_baseline(Role::Master);

        assert!(admin.contains(user));
        assert!(master.contains(admin));
        assert_eq!(master, PermissionSet::all());
    }

    #[test]
    fn admin_lacks_platform_permissions() {
        let admin = PermissionResolver::standard().role_baseline(Role::Admin);
        assert!(!admin.grants(Permission::EmpresaManage));
        assert!(!admin.grants(Permission::ConfigManage));
        assert!(!admin.grants(Permission::PermissaoManage));
    }

    #[test]
    fn none_and_empty_lists_are_equivalent() {
        let resolver = PermissionResolver::standard();
        let empty: [&str; 0] = [];
        for role in Role::ALL {
            assert_eq!(
                resolver.resolve(role, NONE, NONE),
                resolver.resolve(role, Some(&empty[..]), Some(&empty[..])),
            );
        }
    }

    #[test]
    fn custom_and_explicit_are_unioned() {
        let resolver = PermissionResolver::standard();
        let custom = ["relatorio.view"];
        let explicit = ["relatorio.export", "relatorio.view"];
        let set = resolver.resolve(Role::User, Some(&custom[..]), Some(&explicit[..]));

        assert_eq!(
            set,
            resolver.role_baseline(Role::User)
                | PermissionSet::RELATORIO_VIEW
                | PermissionSet::RELATORIO_EXPORT
        );
    }

    #[test]
    fn grants_already_in_baseline_change_nothing() {
        let resolver = PermissionResolver::standard();
        let custom = ["plano.view"];
        assert_eq!(
            resolver.resolve(Role::User, Some(&custom[..]), None),
            resolver.role_baseline(Role::User)
        );
    }

    #[test]
    fn unknown_identifiers_are_inert() {
        let resolver = PermissionResolver::standard();
        let custom = ["beta.dashboard", "", "PLANO.EDIT"];
        assert_eq!(
            resolver.resolve(Role::User, Some(&custom[..]), None),
            resolver.role_baseline(Role::User)
        );
    }

    #[test]
    fn accepts_owned_strings() {
        let resolver = PermissionResolver::standard();
        let custom = vec!["user.view".to_string()];
        let set = resolver.resolve(Role::User, Some(custom.as_slice()), None);
        assert!(set.grants(Permission::UserView));
    }

    #[test]
    fn baseline_override() {
        let resolver = PermissionResolver::standard()
            .with_baseline(Role::User, PermissionSet::PERFIL_VIEW)
            .with_baseline(Role::Visitor, PermissionSet::all());

        assert_eq!(resolver.role_baseline(Role::User), PermissionSet::PERFIL_VIEW);
        assert!(resolver.role_baseline(Role::Visitor).is_empty());
    }
}
