//! Benchmark: path matching and route guard checks
//!
//! # Background
//!
//! `PathMatcher::normalize` runs on every navigation, and `RouteGuard::check`
//! additionally resolves the session's permission set. Key rules are a
//! linear scan over a short ordered list, and lookups are a single hash
//! probe, so both should stay flat as the registry grows.
//!
//! # When to revisit
//!
//! - If the key rule list grows past a few dozen entries
//! - If `check` shows up in UI frame profiles
//! - If the registry moves from exact keys to pattern keys

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wellgate_auth::{
    GuardConfig, PathMatcher, PermissionRegistry, PermissionResolver, RouteGuard, SessionContext,
};
use wellgate_types::Role;

const PATHS: &[&str] = &[
    "/dashboard",
    "/planos-acao/42",
    "/conteudos/7/editar/",
    "/conteudos/novo",
    "/usuarios/gerenciar",
    "/ajuda/faq",
    "/unknown-path",
];

fn bench_normalize(c: &mut Criterion) {
    let registry = PermissionRegistry::standard();
    let matcher = PathMatcher::new(&registry);
    let mut group = c.benchmark_group("normalize");

    for path in PATHS {
        group.bench_with_input(BenchmarkId::from_parameter(path), path, |b, path| {
            b.iter(|| black_box(matcher.normalize(black_box(path))));
        });
    }

    group.finish();
}

fn bench_match_path(c: &mut Criterion) {
    let registry = PermissionRegistry::standard();
    let matcher = PathMatcher::new(&registry);
    let mut group = c.benchmark_group("match_path");
    group.throughput(Throughput::Elements(PATHS.len() as u64));

    group.bench_function("all_sample_paths", |b| {
        b.iter(|| {
            for path in PATHS {
                black_box(matcher.match_path(black_box(path)));
            }
        });
    });

    group.finish();
}

fn bench_guard_check(c: &mut Criterion) {
    let registry = PermissionRegistry::standard();
    let guard = RouteGuard::new(
        PathMatcher::new(&registry),
        PermissionResolver::standard(),
        &GuardConfig::default(),
    );
    let mut group = c.benchmark_group("guard_check");

    for role in [Role::User, Role::Admin, Role::Master] {
        let session = SessionContext::authenticated(role)
            .with_custom_permissions(["relatorio.view", "not.a.permission"]);
        let effective = session.effective(guard.resolver());

        group.bench_function(BenchmarkId::new("resolve_each_time", role), |b| {
            b.iter(|| {
                for path in PATHS {
                    black_box(guard.check(black_box(path), &session));
                }
            });
        });

        group.bench_function(BenchmarkId::new("snapshot", role), |b| {
            b.iter(|| {
                for path in PATHS {
                    black_box(guard.check_with(black_box(path), &session, effective));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_match_path, bench_guard_check);
criterion_main!(benches);
