//! Effective permission sets.
//!
//! A [`PermissionSet`] is the materialized set of permissions granted to
//! a session. It is a bitflags value: union, intersection and membership
//! are single instructions, duplicates collapse by construction, and
//! order is irrelevant.
//!
//! # Example
//!
//! ```
//! use wellgate_types::{Permission, PermissionSet};
//!
//! let set = PermissionSet::PLANO_VIEW | PermissionSet::CONTEUDO_VIEW;
//! assert!(set.grants(Permission::PlanoView));
//! assert!(!set.grants(Permission::PlanoEdit));
//!
//! // Raw identifiers work too; unknown ones are never granted.
//! assert!(set.grants_id("conteudo.view"));
//! assert!(!set.grants_id("conteudo.fly"));
//! ```

use crate::Permission;
use bitflags::bitflags;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

bitflags! {
    /// A set of [`Permission`]s.
    ///
    /// One flag per catalogue entry; the flag's bit is the permission's
    /// discriminant, so the two cannot drift apart.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PermissionSet: u32 {
        const DASHBOARD_VIEW       = 1 << Permission::DashboardView as u32;
        const QUESTIONARIO_VIEW    = 1 << Permission::QuestionarioView as u32;
        const QUESTIONARIO_RESPOND = 1 << Permission::QuestionarioRespond as u32;
        const QUESTIONARIO_MANAGE  = 1 << Permission::QuestionarioManage as u32;
        const DIAGNOSTICO_VIEW     = 1 << Permission::DiagnosticoView as u32;
        const PLANO_VIEW           = 1 << Permission::PlanoView as u32;
        const PLANO_CREATE         = 1 << Permission::PlanoCreate as u32;
        const PLANO_EDIT           = 1 << Permission::PlanoEdit as u32;
        const GAMIFICACAO_VIEW     = 1 << Permission::GamificacaoView as u32;
        const GAMIFICACAO_MANAGE   = 1 << Permission::GamificacaoManage as u32;
        const CONTEUDO_VIEW        = 1 << Permission::ConteudoView as u32;
        const CONTEUDO_CREATE      = 1 << Permission::ConteudoCreate as u32;
        const CONTEUDO_EDIT        = 1 << Permission::ConteudoEdit as u32;
        const CONTEUDO_DELETE      = 1 << Permission::ConteudoDelete as u32;
        const RELATORIO_VIEW       = 1 << Permission::RelatorioView as u32;
        const RELATORIO_EXPORT     = 1 << Permission::RelatorioExport as u32;
        const NOTIFICACAO_VIEW     = 1 << Permission::NotificacaoView as u32;
        const PERFIL_VIEW          = 1 << Permission::PerfilView as u32;
        const USER_VIEW            = 1 << Permission::UserView as u32;
        const USER_MANAGE          = 1 << Permission::UserManage as u32;
        const EMPRESA_MANAGE       = 1 << Permission::EmpresaManage as u32;
        const CONFIG_MANAGE        = 1 << Permission::ConfigManage as u32;
        const PERMISSAO_MANAGE     = 1 << Permission::PermissaoManage as u32;
    }
}

impl PermissionSet {
    /// Returns `true` if `permission` is in the set.
    #[must_use]
    pub fn grants(self, permission: Permission) -> bool {
        self.contains(Self::from(permission))
    }

    /// Returns `true` if `id` names a known permission that is in the set.
    ///
    /// Unknown identifiers are never granted.
    #[must_use]
    pub fn grants_id(self, id: &str) -> bool {
        Permission::parse(id).is_some_and(|p| self.grants(p))
    }

    /// Iterates over the granted permissions in catalogue order.
    pub fn permissions(self) -> impl Iterator<Item = Permission> {
        Permission::ALL.into_iter().filter(move |p| self.grants(*p))
    }

    /// Returns the wire identifiers of the granted permissions.
    #[must_use]
    pub fn ids(self) -> Vec<&'static str> {
        self.permissions().map(Permission::as_str).collect()
    }

    /// Parses a list of identifiers into a set.
    ///
    /// Returns the combined set and the identifiers that were not
    /// recognized. Callers decide what to do with the leftovers; the
    /// resolver logs and drops them.
    ///
    /// # Example
    ///
    /// ```
    /// use wellgate_types::PermissionSet;
    ///
    /// let (set, unknown) = PermissionSet::parse_list(&["plano.view", "beta.feature", "plano.view"]);
    /// assert_eq!(set, PermissionSet::PLANO_VIEW);
    /// assert_eq!(unknown, vec!["beta.feature"]);
    /// ```
    #[must_use]
    pub fn parse_list<S: AsRef<str>>(ids: &[S]) -> (Self, Vec<&str>) {
        let mut set = Self::empty();
        let mut unknown = Vec::new();
        for id in ids {
            let id = id.as_ref();
            match Permission::parse(id) {
                Some(p) => set |= Self::from(p),
                None => unknown.push(id),
            }
        }
        (set, unknown)
    }
}

impl From<Permission> for PermissionSet {
    fn from(permission: Permission) -> Self {
        Self::from_bits_retain(1 << permission as u32)
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |acc, p| acc | Self::from(p))
    }
}

impl std::fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids = self.ids();
        if ids.is_empty() {
            write!(f, "(none)")
        } else {
            write!(f, "{}", ids.join(", "))
        }
    }
}

// Serialized as a list of wire identifiers so the backend and the
// front end share one representation.
impl Serialize for PermissionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.permissions())
    }
}

impl<'de> Deserialize<'de> for PermissionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ids = Vec::<String>::deserialize(deserializer)?;
        Ok(Self::parse_list(&ids).0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_line_up_with_permissions() {
        let named: Vec<PermissionSet> = PermissionSet::all().iter().collect();
        assert_eq!(named.len(), Permission::ALL.len());
        for (flag, p) in named.iter().zip(Permission::ALL) {
            assert_eq!(*flag, PermissionSet::from(p), "{p}");
        }
    }

    #[test]
    fn flag_bit_is_permission_discriminant() {
        for p in Permission::ALL {
            let bits = PermissionSet::from(p).bits();
            assert_eq!(bits.count_ones(), 1, "{p}");
            assert_eq!(bits.trailing_zeros(), p as u32, "{p}");
        }
        assert_eq!(
            PermissionSet::PERMISSAO_MANAGE.bits(),
            1 << Permission::PermissaoManage as u32
        );
    }

    #[test]
    fn all_is_union_of_catalogue() {
        let union: PermissionSet = Permission::ALL.into_iter().collect();
        assert_eq!(union, PermissionSet::all());
    }

    #[test]
    fn duplicates_collapse() {
        let set: PermissionSet = [Permission::PlanoView, Permission::PlanoView]
            .into_iter()
            .collect();
        assert_eq!(set.permissions().count(), 1);
    }

    #[test]
    fn empty_set_grants_nothing() {
        let empty = PermissionSet::empty();
        for p in Permission::ALL {
            assert!(!empty.grants(p));
        }
        assert_eq!(empty.to_string(), "(none)");
    }

    #[test]
    fn grants_id_is_fail_closed() {
        let set = PermissionSet::all();
        assert!(set.grants_id("permissao.manage"));
        assert!(!set.grants_id("permissao.destroy"));
        assert!(!set.grants_id(""));
    }

    #[test]
    fn parse_list_keeps_unknown_separately() {
        let ids = vec!["user.view".to_string(), "nope".to_string()];
        let (set, unknown) = PermissionSet::parse_list(&ids);
        assert_eq!(set, PermissionSet::USER_VIEW);
        assert_eq!(unknown, vec!["nope"]);
    }

    #[test]
    fn display_lists_identifiers() {
        let set = PermissionSet::PLANO_VIEW | PermissionSet::DASHBOARD_VIEW;
        assert_eq!(set.to_string(), "dashboard.view, plano.view");
    }

    #[test]
    fn serializes_as_identifier_list() {
        let set = PermissionSet::CONTEUDO_EDIT | PermissionSet::USER_MANAGE;
        let json = serde_json::to_string(&set).expect("serialize");
        assert_eq!(json, r#"["conteudo.edit","user.manage"]"#);
    }

    #[test]
    fn deserialize_drops_unknown_identifiers() {
        let set: PermissionSet =
            serde_json::from_str(r#"["plano.view","future.thing"]"#).expect("deserialize");
        assert_eq!(set, PermissionSet::PLANO_VIEW);
    }
}
