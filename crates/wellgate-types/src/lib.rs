//! Core types for wellgate.
//!
//! This crate holds the vocabulary shared by the authorization core and
//! by anything that hands data to it (session providers, routers,
//! affordance renderers). It carries no decision logic.
//!
//! # Crate Architecture
//!
//! ```text
//! wellgate-types  (Permission, PermissionSet, Role, ErrorCode)  ◄── THIS CRATE
//!        ↑
//! wellgate-auth   (Registry, Resolver, Evaluator, Matcher, RouteGuard)
//! ```
//!
//! # Example
//!
//! ```
//! use wellgate_types::{Permission, PermissionSet, Role};
//!
//! let set: PermissionSet = [Permission::PlanoView, Permission::ConteudoView]
//!     .into_iter()
//!     .collect();
//!
//! assert!(set.grants(Permission::PlanoView));
//! assert!(Role::Admin.is_authenticated());
//! ```

pub mod error;
pub mod permission;
pub mod role;
pub mod set;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use permission::{Permission, UnknownPermission};
pub use role::Role;
pub use set::PermissionSet;
