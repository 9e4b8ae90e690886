//! Integration tests for the authorization flow.
//!
//! Tests the complete flow: Session → Resolver → Matcher → Evaluator / RouteGuard

use wellgate_auth::evaluator::{evaluate, has_all_permissions, has_any_permission, has_permission};
use wellgate_auth::{
    ConfigLoader, GuardConfig, NavigationDecision, PathLookup, PathMatcher, PermissionRegistry,
    PermissionResolver, RegistryBuilder, Requirement, RouteGuard, SessionContext,
};
use wellgate_types::{Permission, PermissionSet, Role};

const NO_GRANTS: Option<&[&str]> = None;

/// A permission outside the role baseline is not held without a grant.
#[test]
fn ungranted_permission_is_not_held() {
    let resolver = PermissionResolver::standard();

    for role in Role::ALL {
        let effective = resolver.resolve(role, NO_GRANTS, NO_GRANTS);
        let baseline = resolver.role_baseline(role);
        for p in Permission::ALL {
            if !baseline.grants(p) {
                assert!(!has_permission(effective, p), "{role} should not hold {p}");
            }
        }
    }
}

#[test]
fn empty_requirement_lists_are_vacuous() {
    let empty: [Permission; 0] = [];
    for role in Role::ALL {
        let set = PermissionResolver::standard().resolve(role, NO_GRANTS, NO_GRANTS);
        assert!(has_any_permission(set, &empty.map(|p| p.as_str())));
        assert!(has_all_permissions(set, &empty.map(|p| p.as_str())));
    }
}

#[test]
fn all_implies_any() {
    let resolver = PermissionResolver::standard();
    let lists = [
        vec!["plano.view", "plano.edit"],
        vec!["relatorio.view"],
        vec!["empresa.manage", "dashboard.view"],
        vec!["dashboard.view", "not.a.permission"],
    ];

    for role in Role::ALL {
        let set = resolver.resolve(role, NO_GRANTS, NO_GRANTS);
        for list in &lists {
            if has_all_permissions(set, list) {
                assert!(has_any_permission(set, list), "{role}: {list:?}");
            }
        }
    }
}

#[test]
fn reference_path_scenarios() {
    let registry = PermissionRegistry::standard();
    let matcher = PathMatcher::new(&registry);

    assert_eq!(matcher.normalize("/planos-acao/:id"), "/planos-acao/:id");

    let cases = [
        ("/planos-acao/42", PathLookup::Protected(Permission::PlanoView)),
        ("/planos-acao/", PathLookup::Protected(Permission::PlanoView)),
        ("/conteudos", PathLookup::Protected(Permission::ConteudoView)),
        ("/conteudos/7", PathLookup::Protected(Permission::ConteudoView)),
        ("/conteudos/7/editar", PathLookup::Protected(Permission::ConteudoEdit)),
        ("/conteudos/novo", PathLookup::Protected(Permission::ConteudoCreate)),
        ("/unknown-path", PathLookup::Unknown),
    ];
    for (path, expected) in cases {
        assert_eq!(matcher.match_path(path), expected, "{path}");
    }
}

#[test]
fn normalize_is_idempotent_on_sample_paths() {
    let registry = PermissionRegistry::standard();
    let matcher = PathMatcher::new(&registry);

    for path in [
        "/planos-acao/42",
        "/conteudos/7/editar/",
        "/conteudos/novo",
        "/dashboard///",
        "",
        "/unknown-path/",
    ] {
        let once = matcher.normalize(path).to_string();
        assert_eq!(matcher.normalize(&once), once, "{path}");
    }
}

#[test]
fn custom_grant_added_then_removed() {
    let resolver = PermissionResolver::standard();
    let registry = PermissionRegistry::standard();
    let guard = RouteGuard::new(PathMatcher::new(&registry), resolver.clone(), &GuardConfig::default());

    let user = SessionContext::authenticated(Role::User);
    assert!(!guard.check("/relatorios", &user).is_allowed());

    let granted = user.with_custom_permissions(["relatorio.view"]);
    assert!(has_permission(granted.effective(&resolver), Permission::RelatorioView));
    assert!(guard.check("/relatorios", &granted).is_allowed());

    let revoked = granted.with_custom_permissions(Vec::<String>::new());
    assert_eq!(revoked.effective(&resolver), user.effective(&resolver));
    assert!(!guard.check("/relatorios", &revoked).is_allowed());
}

#[test]
fn require_all_needs_both_permissions() {
    let req = Requirement::from(vec![Permission::ConteudoEdit, Permission::ConteudoDelete]);
    let resolver = PermissionResolver::standard();

    let user = SessionContext::authenticated(Role::User);
    let editor = user.with_explicit_permissions(["conteudo.edit"]);
    let full = editor.with_custom_permissions(["conteudo.delete"]);

    assert!(!evaluate(editor.effective(&resolver), Some(&req), true));
    assert!(evaluate(editor.effective(&resolver), Some(&req), false));
    assert!(evaluate(full.effective(&resolver), Some(&req), true));
}

#[test]
fn logout_clears_access() {
    let registry = PermissionRegistry::standard();
    let guard = RouteGuard::new(
        PathMatcher::new(&registry),
        PermissionResolver::standard(),
        &GuardConfig::default(),
    );

    let master = SessionContext::authenticated(Role::Master);
    assert!(guard.check("/permissoes", &master).is_allowed());

    let after = master.logout();
    assert!(matches!(
        guard.check("/permissoes", &after),
        NavigationDecision::RedirectToLogin { .. }
    ));
    assert!(guard.check("/login", &after).is_allowed());
}

#[test]
fn sidebar_follows_effective_set() {
    let registry = PermissionRegistry::standard();
    let resolver = PermissionResolver::standard();

    let user_pages: Vec<_> = registry
        .navigation_for(SessionContext::authenticated(Role::User).effective(&resolver))
        .filter_map(|r| r.path.as_deref())
        .collect();
    assert!(user_pages.contains(&"/dashboard"));
    assert!(!user_pages.contains(&"/usuarios"));

    let master_pages = registry
        .navigation_for(SessionContext::authenticated(Role::Master).effective(&resolver))
        .count();
    assert!(master_pages > user_pages.len());

    assert_eq!(registry.navigation_for(PermissionSet::empty()).count(), 0);
}

#[test]
fn extended_registry_gates_new_page() {
    let registry = RegistryBuilder::from_standard()
        .version("2.3.0-test")
        .protect("/pesquisas", Permission::QuestionarioManage)
        .build()
        .expect("extended registry");
    let guard = RouteGuard::new(
        PathMatcher::new(&registry),
        PermissionResolver::standard(),
        &GuardConfig::default(),
    );

    assert_eq!(registry.version(), "2.3.0-test");
    assert!(guard
        .check("/pesquisas/", &SessionContext::authenticated(Role::Admin))
        .is_allowed());
    assert_eq!(
        guard.check("/pesquisas", &SessionContext::authenticated(Role::User)),
        NavigationDecision::Redirect {
            key: "/pesquisas".into(),
            to: "/dashboard".into(),
            required: Some(Permission::QuestionarioManage),
        }
    );
}

#[test]
fn guard_built_from_config_file() {
    let temp = tempfile::TempDir::new().expect("temp dir");
    let path = temp.path().join("wellgate.toml");
    std::fs::write(
        &path,
        r#"
login_path = "/entrar"
strict_unmapped = true

[home]
user = "/perfil"

[legacy_routes]
admin = ["/admin"]
"#,
    )
    .expect("write config");

    let config = ConfigLoader::new()
        .with_config_file(&path)
        .skip_env_vars()
        .load()
        .expect("load config");
    let registry = PermissionRegistry::standard();
    let guard = RouteGuard::new(PathMatcher::new(&registry), PermissionResolver::standard(), &config);

    assert_eq!(
        guard.check("/dashboard", &SessionContext::visitor()).target(),
        Some("/entrar")
    );

    // user has no legacy entry and strict mode is on
    let user = SessionContext::authenticated(Role::User);
    assert_eq!(guard.check("/ajuda", &user).target(), Some("/perfil"));

    let admin = SessionContext::authenticated(Role::Admin);
    assert!(guard.check("/admin/auditoria", &admin).is_allowed());
}

#[test]
fn provider_payload_end_to_end() {
    let session: SessionContext = serde_json::from_str(
        r#"{
            "role": "admin",
            "custom_permissions": ["empresa.manage", "beta.feature"],
            "explicit_permissions": [],
            "authenticated": true
        }"#,
    )
    .expect("session payload");

    let registry = PermissionRegistry::standard();
    let guard = RouteGuard::new(
        PathMatcher::new(&registry),
        PermissionResolver::standard(),
        &GuardConfig::default(),
    );

    assert!(guard.check("/empresas", &session).is_allowed());
    assert!(!guard.check("/configuracoes", &session).is_allowed());
    assert!(guard.require("/permissoes", &session).is_err());
}
