//! Machine-readable error codes.
//!
//! The authorization core itself never fails: lookups return explicit
//! "not found" variants and evaluations return `false`. Errors only
//! surface at the edges (configuration files, registry construction,
//! typed parsing), and every one of those error enums implements
//! [`ErrorCode`] so callers can branch on a stable code instead of on
//! the `Display` text.
//!
//! # Example
//!
//! ```
//! use wellgate_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum LoadError {
//!     Missing,
//!     Corrupt,
//! }
//!
//! impl ErrorCode for LoadError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Missing => "LOAD_MISSING",
//!             Self::Corrupt => "LOAD_CORRUPT",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Missing)
//!     }
//! }
//!
//! assert_eq!(LoadError::Corrupt.code(), "LOAD_CORRUPT");
//! assert!(LoadError::Missing.is_recoverable());
//! ```

/// Stable error code interface shared by all wellgate error types.
///
/// # Code Format
///
/// - UPPER_SNAKE_CASE, prefixed by the owning area
///   (`"CONFIG_"`, `"REGISTRY_"`, `"PERMISSION_"`, `"ACCESS_"`)
/// - Never renamed once published
pub trait ErrorCode {
    /// Returns the machine-readable code.
    fn code(&self) -> &'static str;

    /// Returns whether the caller can fix the condition without a code change.
    ///
    /// - `true`: editing a config file, logging in, or retrying may help
    /// - `false`: the input is structurally wrong and stays wrong
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error code is non-empty, prefixed and UPPER_SNAKE_CASE.
///
/// Intended for tests that walk every variant of an error enum.
///
/// # Panics
///
/// Panics with a descriptive message when a check fails.
///
/// # Example
///
/// ```
/// use wellgate_types::{assert_error_code, ErrorCode};
///
/// struct Denied;
///
/// impl ErrorCode for Denied {
///     fn code(&self) -> &'static str { "ACCESS_DENIED" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&Denied, "ACCESS_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "error code '{code}' must start with prefix '{expected_prefix}'"
    );
    assert!(
        is_upper_snake_case(code),
        "error code '{code}' must be UPPER_SNAKE_CASE"
    );
}

/// Runs [`assert_error_code`] over a list of errors.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
