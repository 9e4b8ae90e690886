//! Built-in permission catalogue.
//!
//! Declarative source for [`PermissionRegistry::standard`](crate::PermissionRegistry::standard).
//! Bump [`REGISTRY_VERSION`] whenever a record, rule or public path changes.

use crate::registry::{Affordance, AffordanceVariant, PermissionRecord};
use wellgate_types::Permission;

/// Version of the built-in catalogue.
pub const REGISTRY_VERSION: &str = "2.3.0";

/// Path keys gated by a permission. Keys are post-normalization.
pub(crate) const PATH_RULES: &[(&str, Permission)] = &[
    ("/dashboard", Permission::DashboardView),
    ("/questionarios", Permission::QuestionarioView),
    ("/questionarios/gerenciar", Permission::QuestionarioManage),
    ("/diagnosticos", Permission::DiagnosticoView),
    ("/planos-acao", Permission::PlanoView),
    ("/planos-acao/:id", Permission::PlanoView),
    ("/gamificacao", Permission::GamificacaoView),
    ("/gamificacao/configurar", Permission::GamificacaoManage),
    ("/conteudos", Permission::ConteudoView),
    ("/conteudos/:id", Permission::ConteudoView),
    ("/conteudos/novo", Permission::ConteudoCreate),
    ("/conteudos/:id/editar", Permission::ConteudoEdit),
    ("/relatorios", Permission::RelatorioView),
    ("/notificacoes", Permission::NotificacaoView),
    ("/perfil", Permission::PerfilView),
    ("/usuarios", Permission::UserView),
    ("/usuarios/gerenciar", Permission::UserManage),
    ("/empresas", Permission::EmpresaManage),
    ("/configuracoes", Permission::ConfigManage),
    ("/permissoes", Permission::PermissaoManage),
];

/// Path keys reachable without any permission.
pub(crate) const PUBLIC_PATHS: &[&str] = &[
    "/",
    "/login",
    "/cadastro",
    "/esqueci-senha",
    "/redefinir-senha",
    "/acesso-negado",
];

pub(crate) fn records() -> Vec<PermissionRecord> {
    use AffordanceVariant::{Danger, Outline, Primary, Secondary};
    use Permission as P;

    vec![
        page(P::DashboardView, "Painel", "Visão geral de bem-estar da equipe", "/dashboard", "layout-dashboard"),
        page(P::QuestionarioView, "Questionários", "Lista de questionários disponíveis", "/questionarios", "clipboard-list"),
        action(P::QuestionarioRespond, "Responder questionário", "Enviar respostas de um questionário", "clipboard-check", Primary, "Responder"),
        page(P::QuestionarioManage, "Gerenciar questionários", "Criar, publicar e encerrar questionários", "/questionarios/gerenciar", "clipboard-pen"),
        page(P::DiagnosticoView, "Diagnósticos", "Diagnósticos gerados a partir das respostas", "/diagnosticos", "activity"),
        page(P::PlanoView, "Planos de ação", "Planos de ação e seu andamento", "/planos-acao", "target"),
        action(P::PlanoCreate, "Novo plano de ação", "Criar um plano de ação", "plus", Primary, "Novo plano"),
        action(P::PlanoEdit, "Editar plano de ação", "Alterar metas e prazos de um plano", "pencil", Secondary, "Editar"),
        page(P::GamificacaoView, "Gamificação", "Pontos, conquistas e ranking", "/gamificacao", "trophy"),
        page(P::GamificacaoManage, "Configurar gamificação", "Regras de pontuação e conquistas", "/gamificacao/configurar", "settings-2"),
        page(P::ConteudoView, "Conteúdos", "Biblioteca de conteúdos", "/conteudos", "book-open"),
        page(P::ConteudoCreate, "Novo conteúdo", "Publicar um conteúdo na biblioteca", "/conteudos/novo", "file-plus")
            .with_affordance(Affordance::action("file-plus", Primary, "Novo conteúdo")),
        action(P::ConteudoEdit, "Editar conteúdo", "Alterar um conteúdo publicado", "pencil", Secondary, "Editar"),
        action(P::ConteudoDelete, "Excluir conteúdo", "Remover um conteúdo da biblioteca", "trash-2", Danger, "Excluir"),
        page(P::RelatorioView, "Relatórios", "Relatórios consolidados por equipe", "/relatorios", "bar-chart-3"),
        action(P::RelatorioExport, "Exportar relatórios", "Baixar relatórios em planilha", "download", Outline, "Exportar"),
        page(P::NotificacaoView, "Notificações", "Avisos e lembretes", "/notificacoes", "bell"),
        page(P::PerfilView, "Meu perfil", "Dados pessoais e preferências", "/perfil", "user"),
        page(P::UserView, "Usuários", "Colaboradores cadastrados", "/usuarios", "users"),
        page(P::UserManage, "Gerenciar usuários", "Convidar, desativar e trocar papéis", "/usuarios/gerenciar", "user-cog"),
        page(P::EmpresaManage, "Empresas", "Empresas clientes e contratos", "/empresas", "building-2"),
        page(P::ConfigManage, "Configurações", "Parâmetros gerais da plataforma", "/configuracoes", "settings"),
        page(P::PermissaoManage, "Permissões", "Permissões personalizadas por usuário", "/permissoes", "shield"),
    ]
}

fn page(p: Permission, title: &str, description: &str, path: &str, icon: &str) -> PermissionRecord {
    PermissionRecord::new(p, title, description)
        .with_path(path)
        .with_affordance(Affordance::icon(icon))
}

fn action(
    p: Permission,
    title: &str,
    description: &str,
    icon: &str,
    variant: AffordanceVariant,
    text: &str,
) -> PermissionRecord {
    PermissionRecord::new(p, title, description)
        .with_affordance(Affordance::action(icon, variant, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_follow_permission_order() {
        let permissions: Vec<Permission> = records().iter().map(|r| r.permission).collect();
        assert_eq!(permissions, Permission::ALL.to_vec());
    }

    #[test]
    fn keys_are_normalized() {
        for (path, _) in PATH_RULES {
            assert!(path.starts_with('/') && !path.ends_with('/'), "{path}");
        }
        for path in PUBLIC_PATHS.iter().filter(|p| **p != "/") {
            assert!(!path.ends_with('/'), "{path}");
        }
    }
}
