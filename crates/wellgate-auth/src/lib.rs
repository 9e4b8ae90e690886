//! Authorization core for wellgate.
//!
//! Turns "who is logged in" into "what may they see and do", for the
//! front end of the HR/wellness platform. Everything here is pure and
//! synchronous over immutable data; the server enforces access on its
//! own and this crate only shapes navigation and UI affordances.
//!
//! # Components
//!
//! ```text
//! Effective = Baseline(role) ∪ Custom(user) ∪ Explicit(user)
//! ```
//!
//! | Component | Type | Answers |
//! |-----------|------|---------|
//! | Registry | [`PermissionRegistry`] | which permissions exist, what protects a path key |
//! | Resolver | [`PermissionResolver`] | what a role plus grant lists adds up to |
//! | Evaluator | [`evaluator`], [`Gate`] | does a set satisfy a requirement |
//! | Matcher | [`PathMatcher`] | which key (and permission) a concrete path maps to |
//! | Guard | [`RouteGuard`] | allow, send to login, or redirect |
//!
//! # Crate Architecture
//!
//! ```text
//! wellgate-types  (Permission, PermissionSet, Role, ErrorCode)
//!        ↑
//! wellgate-auth   (Registry, Resolver, Evaluator, Matcher, RouteGuard)  ◄── THIS CRATE
//! ```
//!
//! # Example
//!
//! ```
//! use wellgate_auth::{PathLookup, PathMatcher, PermissionRegistry, PermissionResolver,
//!     SessionContext};
//! use wellgate_auth::evaluator::has_permission;
//! use wellgate_types::{Permission, Role};
//!
//! let registry = PermissionRegistry::standard();
//! let matcher = PathMatcher::new(&registry);
//! let resolver = PermissionResolver::standard();
//!
//! let session = SessionContext::authenticated(Role::Admin);
//! let effective = session.effective(&resolver);
//!
//! let PathLookup::Protected(required) = matcher.match_path("/conteudos/7/editar") else {
//!     unreachable!("editing a content item is protected");
//! };
//! assert_eq!(required, Permission::ConteudoEdit);
//! assert!(has_permission(effective, required));
//! ```

mod catalogue;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod guard;
pub mod matcher;
pub mod registry;
pub mod resolver;
pub mod session;

pub use catalogue::REGISTRY_VERSION;
pub use config::{ConfigError, ConfigLoader, GuardConfig, HomePaths};
pub use error::AccessDenied;
pub use evaluator::{Gate, Requirement};
pub use guard::{LegacyRouteTable, LegacyRoutes, NavigationDecision, RouteGuard};
pub use matcher::{KeyRule, PathMatch, PathMatcher};
pub use registry::{
    Affordance, AffordanceVariant, PathLookup, PermissionRecord, PermissionRegistry,
    RegistryBuilder, RegistryError,
};
pub use resolver::PermissionResolver;
pub use session::SessionContext;

// Re-export the shared vocabulary for convenience
pub use wellgate_types::{ErrorCode, Permission, PermissionSet, Role};
