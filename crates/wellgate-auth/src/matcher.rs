//! Path-to-permission matching.
//!
//! Turns a navigated path into the registry key that governs it, then
//! looks the key up. Normalization runs in two stages:
//!
//! 1. Trailing slashes are stripped; the root (and the empty path) stay `/`.
//! 2. An ordered list of [`KeyRule`]s is tried; the first rule that
//!    matches rewrites the path into a template key. No match leaves the
//!    path unchanged.
//!
//! # Standard rules (priority order)
//!
//! | # | Rule | Example input | Key |
//! |---|------|---------------|-----|
//! | 1 | prefix `/planos-acao/` | `/planos-acao/42/metas` | `/planos-acao/:id` |
//! | 2 | literal `/conteudos` | `/conteudos` | `/conteudos` |
//! | 3 | prefix `/conteudos/` + suffix `/editar` | `/conteudos/7/editar` | `/conteudos/:id/editar` |
//! | 4 | prefix `/conteudos/` + suffix `/novo` | `/conteudos/novo` | `/conteudos/novo` |
//! | 5 | prefix `/conteudos/` | `/conteudos/7` | `/conteudos/:id` |
//!
//! Every template key is a fixed point of its own rule, so normalizing
//! an already-normalized key is a no-op.
//!
//! The matcher never fails. A path no rule and no registry entry covers
//! comes back as [`PathLookup::Unknown`], which the caller resolves
//! through its fallback policy.

use crate::registry::{PathLookup, PermissionRegistry};
use serde::Serialize;
use std::borrow::Cow;

/// A single path-rewriting rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyRule {
    /// Matches exactly `path` and keeps it as the key.
    Literal { path: Cow<'static, str> },
    /// Matches any path starting with `prefix`, at any depth.
    Prefix {
        prefix: Cow<'static, str>,
        key: Cow<'static, str>,
    },
    /// Matches paths starting with `prefix` and ending with `suffix`.
    PrefixSuffix {
        prefix: Cow<'static, str>,
        suffix: Cow<'static, str>,
        key: Cow<'static, str>,
    },
}

impl KeyRule {
    #[must_use]
    pub fn literal(path: impl Into<Cow<'static, str>>) -> Self {
        Self::Literal { path: path.into() }
    }

    #[must_use]
    pub fn prefix(
        prefix: impl Into<Cow<'static, str>>,
        key: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::Prefix {
            prefix: prefix.into(),
            key: key.into(),
        }
    }

    #[must_use]
    pub fn prefix_suffix(
        prefix: impl Into<Cow<'static, str>>,
        suffix: impl Into<Cow<'static, str>>,
        key: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::PrefixSuffix {
            prefix: prefix.into(),
            suffix: suffix.into(),
            key: key.into(),
        }
    }

    /// Returns the rewritten key if this rule matches `path`.
    ///
    /// `path` must already have its trailing slashes stripped.
    #[must_use]
    pub fn apply<'a>(&'a self, path: &'a str) -> Option<&'a str> {
        match self {
            Self::Literal { path: literal } => (path == literal.as_ref()).then_some(path),
            Self::Prefix { prefix, key } => path.starts_with(prefix.as_ref()).then_some(key.as_ref()),
            Self::PrefixSuffix {
                prefix,
                suffix,
                key,
            } => (path.starts_with(prefix.as_ref()) && path.ends_with(suffix.as_ref()))
                .then_some(key.as_ref()),
        }
    }

    /// The standard rule list, in priority order.
    #[must_use]
    pub fn standard() -> Vec<KeyRule> {
        vec![
            Self::prefix("/planos-acao/", "/planos-acao/:id"),
            Self::literal("/conteudos"),
            Self::prefix_suffix("/conteudos/", "/editar", "/conteudos/:id/editar"),
            Self::prefix_suffix("/conteudos/", "/novo", "/conteudos/novo"),
            Self::prefix("/conteudos/", "/conteudos/:id"),
        ]
    }
}

/// Strips trailing slashes, keeping the root as `/`.
///
/// # Example
///
/// ```
/// use wellgate_auth::matcher::strip_trailing_slashes;
///
/// assert_eq!(strip_trailing_slashes("/conteudos///"), "/conteudos");
/// assert_eq!(strip_trailing_slashes("///"), "/");
/// assert_eq!(strip_trailing_slashes(""), "/");
/// ```
#[must_use]
pub fn strip_trailing_slashes(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Result of matching a path: the key that was looked up and the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathMatch {
    pub key: String,
    pub lookup: PathLookup,
}

/// Maps request paths to the permission that protects them.
///
/// Borrows the registry; build one per registry and reuse it.
///
/// # Example
///
/// ```
/// use wellgate_auth::{PathLookup, PathMatcher, PermissionRegistry};
/// use wellgate_types::Permission;
///
/// let registry = PermissionRegistry::standard();
/// let matcher = PathMatcher::new(&registry);
///
/// assert_eq!(matcher.normalize("/conteudos/7/editar/"), "/conteudos/:id/editar");
/// assert_eq!(matcher.match_path("/planos-acao/42"), PathLookup::Protected(Permission::PlanoView));
/// assert_eq!(matcher.match_path("/unknown-path"), PathLookup::Unknown);
/// ```
#[derive(Debug, Clone)]
pub struct PathMatcher<'r> {
    registry: &'r PermissionRegistry,
    rules: Vec<KeyRule>,
}

impl<'r> PathMatcher<'r> {
    /// Matcher with the standard rule list.
    #[must_use]
    pub fn new(registry: &'r PermissionRegistry) -> Self {
        Self::with_rules(registry, KeyRule::standard())
    }

    /// Matcher with a custom rule list, tried in order.
    #[must_use]
    pub fn with_rules(registry: &'r PermissionRegistry, rules: Vec<KeyRule>) -> Self {
        Self { registry, rules }
    }

    #[must_use]
    pub fn registry(&self) -> &'r PermissionRegistry {
        self.registry
    }

    #[must_use]
    pub fn rules(&self) -> &[KeyRule] {
        &self.rules
    }

    /// Rewrites a path into its registry key.
    #[must_use]
    pub fn normalize<'p>(&'p self, path: &'p str) -> &'p str {
        let trimmed = strip_trailing_slashes(path);
        self.rules
            .iter()
            .find_map(|rule| rule.apply(trimmed))
            .unwrap_or(trimmed)
    }

    /// Normalizes `path` and looks the key up.
    #[must_use]
    pub fn match_path(&self, path: &str) -> PathLookup {
        self.registry.lookup_by_path(self.normalize(path))
    }

    /// Like [`match_path`](Self::match_path), keeping the key.
    #[must_use]
    pub fn resolve(&self, path: &str) -> PathMatch {
        let key = self.normalize(path);
        let lookup = self.registry.lookup_by_path(key);
        tracing::trace!(path, key, lookup = %lookup, "path matched");
        PathMatch {
            key: key.to_string(),
            lookup,
        }
    }
}
