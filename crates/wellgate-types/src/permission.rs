//! Permission identifiers.
//!
//! A permission is a `<module>.<action>` identifier such as `plano.view`
//! or `user.manage`. The catalogue of known identifiers is closed and
//! modelled as the [`Permission`] enum.
//!
//! Identifiers arrive from the backend as plain strings. Strings that do
//! not name a known permission are *inert*: [`Permission::parse`] returns
//! `None`, so they grant nothing and match nothing, but they never cause
//! a failure either. This keeps older front ends working when the
//! backend starts handing out permissions they do not know about yet.
//!
//! # Example
//!
//! ```
//! use wellgate_types::Permission;
//!
//! let p = Permission::parse("plano.view").unwrap();
//! assert_eq!(p, Permission::PlanoView);
//! assert_eq!(p.module(), "plano");
//! assert_eq!(p.action(), "view");
//!
//! // Unknown identifiers are not errors, they are simply not permissions.
//! assert_eq!(Permission::parse("plano.fly"), None);
//! ```

use crate::ErrorCode;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A known capability identifier.
///
/// The discriminant of each variant is its bit position inside a
/// [`PermissionSet`](crate::PermissionSet); do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Permission {
    #[serde(rename = "dashboard.view")]
    DashboardView = 0,
    #[serde(rename = "questionario.view")]
    QuestionarioView = 1,
    #[serde(rename = "questionario.respond")]
    QuestionarioRespond = 2,
    #[serde(rename = "questionario.manage")]
    QuestionarioManage = 3,
    #[serde(rename = "diagnostico.view")]
    DiagnosticoView = 4,
    #[serde(rename = "plano.view")]
    PlanoView = 5,
    #[serde(rename = "plano.create")]
    PlanoCreate = 6,
    #[serde(rename = "plano.edit")]
    PlanoEdit = 7,
    #[serde(rename = "gamificacao.view")]
    GamificacaoView = 8,
    #[serde(rename = "gamificacao.manage")]
    GamificacaoManage = 9,
    #[serde(rename = "conteudo.view")]
    ConteudoView = 10,
    #[serde(rename = "conteudo.create")]
    ConteudoCreate = 11,
    #[serde(rename = "conteudo.edit")]
    ConteudoEdit = 12,
    #[serde(rename = "conteudo.delete")]
    ConteudoDelete = 13,
    #[serde(rename = "relatorio.view")]
    RelatorioView = 14,
    #[serde(rename = "relatorio.export")]
    RelatorioExport = 15,
    #[serde(rename = "notificacao.view")]
    NotificacaoView = 16,
    #[serde(rename = "perfil.view")]
    PerfilView = 17,
    #[serde(rename = "user.view")]
    UserView = 18,
    #[serde(rename = "user.manage")]
    UserManage = 19,
    #[serde(rename = "empresa.manage")]
    EmpresaManage = 20,
    #[serde(rename = "config.manage")]
    ConfigManage = 21,
    #[serde(rename = "permissao.manage")]
    PermissaoManage = 22,
}

impl Permission {
    /// Every known permission, in catalogue order.
    pub const ALL: [Permission; 23] = [
        Self::DashboardView,
        Self::QuestionarioView,
        Self::QuestionarioRespond,
        Self::QuestionarioManage,
        Self::DiagnosticoView,
        Self::PlanoView,
        Self::PlanoCreate,
        Self::PlanoEdit,
        Self::GamificacaoView,
        Self::GamificacaoManage,
        Self::ConteudoView,
        Self::ConteudoCreate,
        Self::ConteudoEdit,
        Self::ConteudoDelete,
        Self::RelatorioView,
        Self::RelatorioExport,
        Self::NotificacaoView,
        Self::PerfilView,
        Self::UserView,
        Self::UserManage,
        Self::EmpresaManage,
        Self::ConfigManage,
        Self::PermissaoManage,
    ];

    /// Returns the wire identifier (`"plano.view"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DashboardView => "dashboard.view",
            Self::QuestionarioView => "questionario.view",
            Self::QuestionarioRespond => "questionario.respond",
            Self::QuestionarioManage => "questionario.manage",
            Self::DiagnosticoView => "diagnostico.view",
            Self::PlanoView => "plano.view",
            Self::PlanoCreate => "plano.create",
            Self::PlanoEdit => "plano.edit",
            Self::GamificacaoView => "gamificacao.view",
            Self::GamificacaoManage => "gamificacao.manage",
            Self::ConteudoView => "conteudo.view",
            Self::ConteudoCreate => "conteudo.create",
            Self::ConteudoEdit => "conteudo.edit",
            Self::ConteudoDelete => "conteudo.delete",
            Self::RelatorioView => "relatorio.view",
            Self::RelatorioExport => "relatorio.export",
            Self::NotificacaoView => "notificacao.view",
            Self::PerfilView => "perfil.view",
            Self::UserView => "user.view",
            Self::UserManage => "user.manage",
            Self::EmpresaManage => "empresa.manage",
            Self::ConfigManage => "config.manage",
            Self::PermissaoManage => "permissao.manage",
        }
    }

    /// Parses a wire identifier.
    ///
    /// Matching is exact: identifiers are lowercase on the wire and
    /// `"Plano.View"` is treated as an unknown identifier like any other.
    ///
    /// # Example
    ///
    /// ```
    /// use wellgate_types::Permission;
    ///
    /// assert_eq!(Permission::parse("user.manage"), Some(Permission::UserManage));
    /// assert_eq!(Permission::parse("User.Manage"), None);
    /// assert_eq!(Permission::parse(""), None);
    /// ```
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == id)
    }

    /// The module half of the identifier (`"plano"` for `plano.view`).
    #[must_use]
    pub fn module(self) -> &'static str {
        let id = self.as_str();
        id.split_once('.').map_or(id, |(module, _)| module)
    }

    /// The action half of the identifier (`"view"` for `plano.view`).
    #[must_use]
    pub fn action(self) -> &'static str {
        let id = self.as_str();
        id.split_once('.').map_or("", |(_, action)| action)
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`Permission::from_str`] for identifiers outside the catalogue.
///
/// Only typed parsing produces this error. The resolver and evaluator
/// never surface it; they treat unknown identifiers as inert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown permission identifier: '{0}'")]
pub struct UnknownPermission(pub String);

impl ErrorCode for UnknownPermission {
    fn code(&self) -> &'static str {
        "PERMISSION_UNKNOWN"
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownPermission(s.to_string()))
    }
}
