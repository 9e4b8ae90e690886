//! Configuration errors.

use std::path::PathBuf;
use thiserror::Error;
use wellgate_types::ErrorCode;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config file '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Failed to serialize config.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Invalid environment variable value.
    #[error("invalid value for environment variable '{name}': {message}")]
    InvalidEnvVar { name: String, message: String },

    /// A field holds a value the guard cannot use.
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse_toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ParseToml {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_env_var(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEnvVar {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "CONFIG_READ_FILE",
            Self::ParseToml { .. } => "CONFIG_PARSE_TOML",
            Self::Serialize(_) => "CONFIG_SERIALIZE",
            Self::InvalidEnvVar { .. } => "CONFIG_INVALID_ENV_VAR",
            Self::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Everything except serialization is fixed by editing the file or the environment.
        !matches!(self, Self::Serialize(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellgate_types::assert_error_codes;

    #[test]
    fn codes_follow_convention() {
        assert_error_codes(
            &[
                ConfigError::read_file(
                    "/x",
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                ),
                ConfigError::invalid_env_var("WELLGATE_STRICT_UNMAPPED", "expected bool"),
                ConfigError::invalid_value("login_path", "must start with '/'"),
            ],
            "CONFIG_",
        );
    }

    #[test]
    fn display_includes_context() {
        let err = ConfigError::invalid_env_var("WELLGATE_LOGIN_PATH", "must start with '/'");
        let msg = err.to_string();
        assert!(msg.contains("WELLGATE_LOGIN_PATH"), "got: {msg}");
        assert!(err.is_recoverable());
    }

    #[test]
    fn read_file_keeps_source() {
        use std::error::Error;
        let err = ConfigError::read_file(
            "wellgate.toml",
            std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        );
        assert!(err.source().is_some());
    }
}
