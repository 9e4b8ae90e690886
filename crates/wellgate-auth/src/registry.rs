//! Permission registry.
//!
//! The registry is the immutable catalogue behind every authorization
//! decision. It keeps two indices over one declarative source:
//!
//! | Index | Key | Value | Consumer |
//! |-------|-----|-------|----------|
//! | by permission | [`Permission`] | [`PermissionRecord`] | affordance renderer, sidebar |
//! | by path | normalized path key | [`PathLookup`] | [`PathMatcher`](crate::PathMatcher) |
//!
//! # Lifetime
//!
//! A registry is built once at application start and passed by
//! reference (or `Arc`) to whatever needs it. It is never mutated after
//! construction, so sharing it across threads needs no locking.
//!
//! ```text
//! RegistryBuilder ──build()──► PermissionRegistry ──&──► PathMatcher ──► RouteGuard
//!                                       │
//!                                       └──────────&──► navigation_for(set)
//! ```

use crate::catalogue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use wellgate_types::{ErrorCode, Permission, PermissionSet};

// ─── Records ────────────────────────────────────────────────────────

/// Visual emphasis of a gated button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffordanceVariant {
    Primary,
    Secondary,
    Outline,
    Danger,
}

/// Presentation hints attached to a permission.
///
/// Irrelevant to the authorization decision itself; carried so the UI
/// has one place to look up how a gated element should be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affordance {
    /// Icon name understood by the front end's icon set.
    pub icon: String,
    /// Button emphasis, for permissions that gate an action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<AffordanceVariant>,
    /// Button label, for permissions that gate an action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_text: Option<String>,
}

impl Affordance {
    /// Icon-only affordance (sidebar entries).
    #[must_use]
    pub fn icon(icon: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            variant: None,
            action_text: None,
        }
    }

    /// Button affordance with emphasis and label.
    #[must_use]
    pub fn action(
        icon: impl Into<String>,
        variant: AffordanceVariant,
        text: impl Into<String>,
    ) -> Self {
        Self {
            icon: icon.into(),
            variant: Some(variant),
            action_text: Some(text.into()),
        }
    }
}

/// Registry entry describing one permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    pub permission: Permission,
    pub title: String,
    pub description: String,
    /// Page this permission opens, if it gates a navigable page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affordance: Option<Affordance>,
}

impl PermissionRecord {
    /// Creates a record with no destination and no affordance.
    #[must_use]
    pub fn new(
        permission: Permission,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            permission,
            title: title.into(),
            description: description.into(),
            path: None,
            affordance: None,
        }
    }

    /// Sets the destination page.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the presentation hints.
    #[must_use]
    pub fn with_affordance(mut self, affordance: Affordance) -> Self {
        self.affordance = Some(affordance);
        self
    }
}

// ─── Path lookup ────────────────────────────────────────────────────

/// Outcome of looking a path key up in the registry.
///
/// Three distinct states; `Unknown` is *not* an error. It tells the
/// caller to consult its own fallback (the legacy role-route table).
///
/// # Example
///
/// ```
/// use wellgate_auth::{PathLookup, PermissionRegistry};
/// use wellgate_types::Permission;
///
/// let registry = PermissionRegistry::standard();
/// assert_eq!(registry.lookup_by_path("/login"), PathLookup::Public);
/// assert_eq!(
///     registry.lookup_by_path("/planos-acao/:id"),
///     PathLookup::Protected(Permission::PlanoView)
/// );
/// assert_eq!(registry.lookup_by_path("/planos-acao/42"), PathLookup::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "permission", rename_all = "lowercase")]
pub enum PathLookup {
    /// The path is gated by this permission.
    Protected(Permission),
    /// The path is reachable without any permission.
    Public,
    /// No rule covers the path.
    Unknown,
}

impl PathLookup {
    /// Returns the gating permission, if any.
    #[must_use]
    pub fn permission(self) -> Option<Permission> {
        match self {
            Self::Protected(p) => Some(p),
            Self::Public | Self::Unknown => None,
        }
    }

    #[must_use]
    pub fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }

    #[must_use]
    pub fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Short label for logs ("public", "unknown" or the permission id).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Protected(p) => p.as_str(),
            Self::Public => "public",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PathLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What a path rule points at. `Unknown` is expressed by absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathTarget {
    Protected(Permission),
    Public,
}

// ─── Error ──────────────────────────────────────────────────────────

/// Errors raised while assembling a registry.
///
/// Lookups on a built registry never fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two rules claim the same path key.
    #[error("path '{path}' is already mapped")]
    DuplicatePath { path: String },

    /// Two records describe the same permission.
    #[error("permission '{permission}' already has a record")]
    DuplicateRecord { permission: Permission },

    /// Path keys must be absolute and carry no trailing slash.
    #[error("invalid path key '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },
}

impl ErrorCode for RegistryError {
    fn code(&self) -> &'static str {
        match self {
            Self::DuplicatePath { .. } => "REGISTRY_DUPLICATE_PATH",
            Self::DuplicateRecord { .. } => "REGISTRY_DUPLICATE_RECORD",
            Self::InvalidPath { .. } => "REGISTRY_INVALID_PATH",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

// ─── Registry ───────────────────────────────────────────────────────

/// Immutable, process-wide permission catalogue.
///
/// # Example
///
/// ```
/// use wellgate_auth::PermissionRegistry;
/// use wellgate_types::Permission;
///
/// let registry = PermissionRegistry::standard();
///
/// let record = registry.lookup_by_permission(Permission::ConteudoEdit).unwrap();
/// assert_eq!(record.title, "Editar conteúdo");
///
/// // Unknown identifiers resolve to "not found" rather than failing.
/// assert!(registry.lookup_by_id("conteudo.publish").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PermissionRegistry {
    version: String,
    records: Vec<PermissionRecord>,
    by_permission: HashMap<Permission, usize>,
    by_path: HashMap<String, PathTarget>,
}

impl PermissionRegistry {
    /// Builds the registry from the built-in catalogue.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::empty(catalogue::REGISTRY_VERSION);
        for record in catalogue::records() {
            registry.insert_record(record);
        }
        for (path, permission) in catalogue::PATH_RULES {
            registry
                .by_path
                .insert((*path).to_string(), PathTarget::Protected(*permission));
        }
        for path in catalogue::PUBLIC_PATHS {
            registry.by_path.insert((*path).to_string(), PathTarget::Public);
        }
        registry
    }

    /// Starts a custom registry.
    #[must_use]
    pub fn builder(version: impl Into<String>) -> RegistryBuilder {
        RegistryBuilder::new(version)
    }

    fn empty(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            records: Vec::new(),
            by_permission: HashMap::new(),
            by_path: HashMap::new(),
        }
    }

    fn insert_record(&mut self, record: PermissionRecord) {
        self.by_permission
            .insert(record.permission, self.records.len());
        self.records.push(record);
    }

    /// Catalogue version string.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Looks up the record for a permission.
    #[must_use]
    pub fn lookup_by_permission(&self, permission: Permission) -> Option<&PermissionRecord> {
        self.by_permission
            .get(&permission)
            .and_then(|&i| self.records.get(i))
    }

    /// Looks up a record by raw identifier. Unknown identifiers yield `None`.
    #[must_use]
    pub fn lookup_by_id(&self, id: &str) -> Option<&PermissionRecord> {
        Permission::parse(id).and_then(|p| self.lookup_by_permission(p))
    }

    /// Looks up an already-normalized path key.
    ///
    /// This is an exact lookup. Use
    /// [`PathMatcher::match_path`](crate::PathMatcher::match_path) for raw
    /// request paths.
    #[must_use]
    pub fn lookup_by_path(&self, key: &str) -> PathLookup {
        match self.by_path.get(key) {
            Some(PathTarget::Protected(p)) => PathLookup::Protected(*p),
            Some(PathTarget::Public) => PathLookup::Public,
            None => PathLookup::Unknown,
        }
    }

    /// All records in catalogue order.
    #[must_use]
    pub fn records(&self) -> &[PermissionRecord] {
        &self.records
    }

    /// Number of path keys (protected and public).
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.by_path.len()
    }

    /// Records that open a page the given set may visit, in catalogue order.
    ///
    /// This is what a sidebar renders.
    ///
    /// # Example
    ///
    /// ```
    /// use wellgate_auth::PermissionRegistry;
    /// use wellgate_types::PermissionSet;
    ///
    /// let registry = PermissionRegistry::standard();
    /// let set = PermissionSet::PLANO_VIEW | PermissionSet::PLANO_EDIT;
    ///
    /// let entries: Vec<_> = registry.navigation_for(set).map(|r| r.title.as_str()).collect();
    /// assert_eq!(entries, vec!["Planos de ação"]);
    /// ```
    pub fn navigation_for(&self, set: PermissionSet) -> impl Iterator<Item = &PermissionRecord> {
        self.records
            .iter()
            .filter(move |r| r.path.is_some() && set.grants(r.permission))
    }
}

impl Default for PermissionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

// ─── Builder ────────────────────────────────────────────────────────

/// Validating builder for custom registries.
///
/// # Example
///
/// ```
/// use wellgate_auth::{PathLookup, PermissionRecord, PermissionRegistry, RegistryError};
/// use wellgate_types::Permission;
///
/// let registry = PermissionRegistry::builder("test")
///     .record(PermissionRecord::new(Permission::PlanoView, "Planos", "Lista planos").with_path("/planos"))
///     .protect("/planos", Permission::PlanoView)
///     .public("/login")
///     .build()
///     .unwrap();
/// assert_eq!(registry.lookup_by_path("/planos"), PathLookup::Protected(Permission::PlanoView));
///
/// let err = PermissionRegistry::builder("test")
///     .public("/login")
///     .public("/login")
///     .build()
///     .unwrap_err();
/// assert!(matches!(err, RegistryError::DuplicatePath { .. }));
/// ```
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    version: String,
    records: Vec<PermissionRecord>,
    rules: Vec<(String, PathTarget)>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            records: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Starts from the built-in catalogue, for extending it.
    #[must_use]
    pub fn from_standard() -> Self {
        let mut builder = Self::new(catalogue::REGISTRY_VERSION);
        builder.records = catalogue::records();
        builder.rules = catalogue::PATH_RULES
            .iter()
            .map(|(path, p)| ((*path).to_string(), PathTarget::Protected(*p)))
            .chain(
                catalogue::PUBLIC_PATHS
                    .iter()
                    .map(|path| ((*path).to_string(), PathTarget::Public)),
            )
            .collect();
        builder
    }

    /// Overrides the version string.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Adds a permission record.
    #[must_use]
    pub fn record(mut self, record: PermissionRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Gates a path key behind a permission.
    #[must_use]
    pub fn protect(mut self, path: impl Into<String>, permission: Permission) -> Self {
        self.rules
            .push((path.into(), PathTarget::Protected(permission)));
        self
    }

    /// Marks a path key as public.
    #[must_use]
    pub fn public(mut self, path: impl Into<String>) -> Self {
        self.rules.push((path.into(), PathTarget::Public));
        self
    }

    /// Validates and freezes the registry.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateRecord`] when a permission is described twice
    /// - [`RegistryError::DuplicatePath`] when a path key is mapped twice
    /// - [`RegistryError::InvalidPath`] for relative keys or keys with a trailing slash
    pub fn build(self) -> Result<PermissionRegistry, RegistryError> {
        let mut registry = PermissionRegistry::empty(self.version);

        for record in self.records {
            if registry.by_permission.contains_key(&record.permission) {
                return Err(RegistryError::DuplicateRecord {
                    permission: record.permission,
                });
            }
            registry.insert_record(record);
        }

        for (path, target) in self.rules {
            validate_key(&path)?;
            if registry.by_path.contains_key(&path) {
                return Err(RegistryError::DuplicatePath { path });
            }
            registry.by_path.insert(path, target);
        }

        tracing::debug!(
            version = %registry.version,
            records = registry.records.len(),
            paths = registry.by_path.len(),
            "permission registry built"
        );
        Ok(registry)
    }
}

fn validate_key(path: &str) -> Result<(), RegistryError> {
    if !path.starts_with('/') {
        return Err(RegistryError::InvalidPath {
            path: path.to_string(),
            reason: "must start with '/'",
        });
    }
    if path.len() > 1 && path.ends_with('/') {
        return Err(RegistryError::InvalidPath {
            path: path.to_string(),
            reason: "must not end with '/'",
        });
    }
    Ok(())
}
