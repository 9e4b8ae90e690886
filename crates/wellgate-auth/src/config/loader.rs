//! Configuration loader.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. Config file (`wellgate.toml` in the working directory, unless overridden)
//! 3. Environment variables (`WELLGATE_*`)
//!
//! Each layer overrides the previous. The result is validated before it
//! is returned.

use super::{ConfigError, GuardConfig};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File read when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "wellgate.toml";

/// Overrides the config file path.
const ENV_CONFIG_FILE: &str = "WELLGATE_CONFIG";
const ENV_LOGIN_PATH: &str = "WELLGATE_LOGIN_PATH";
const ENV_DENIED_PATH: &str = "WELLGATE_DENIED_PATH";
const ENV_STRICT_UNMAPPED: &str = "WELLGATE_STRICT_UNMAPPED";

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```no_run
/// use wellgate_auth::config::ConfigLoader;
///
/// let config = ConfigLoader::new()
///     .with_config_file("/etc/wellgate/wellgate.toml")
///     .skip_env_vars()
///     .load()?;
/// assert!(config.login_path.starts_with('/'));
/// # Ok::<(), wellgate_auth::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_file: Option<PathBuf>,
    skip_file: bool,
    skip_env: bool,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the config file to read instead of [`DEFAULT_CONFIG_FILE`].
    #[must_use]
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Skips the config file layer.
    #[must_use]
    pub fn skip_config_file(mut self) -> Self {
        self.skip_file = true;
        self
    }

    /// Skips environment variable loading.
    ///
    /// Useful for testing with deterministic config.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Loads and merges configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file exists but cannot be
    /// read or parsed, an environment variable holds an invalid value,
    /// or the merged config fails [`GuardConfig::validate`].
    /// A missing config file is silently ignored.
    pub fn load(&self) -> Result<GuardConfig, ConfigError> {
        let mut config = GuardConfig::default();

        if !self.skip_file {
            let path = self.config_path();
            if let Some(file_config) = Self::load_file(&path)? {
                debug!(path = %path.display(), "loaded guard config");
                config = file_config;
            }
        }

        if !self.skip_env {
            Self::apply_env_vars(&mut config)?;
        }

        config.validate()?;
        Ok(config)
    }

    fn config_path(&self) -> PathBuf {
        if let Some(path) = &self.config_file {
            return path.clone();
        }
        if !self.skip_env {
            if let Ok(path) = std::env::var(ENV_CONFIG_FILE) {
                return PathBuf::from(path);
            }
        }
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    /// Loads a config file, returning None if it doesn't exist.
    fn load_file(path: &Path) -> Result<Option<GuardConfig>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config =
            GuardConfig::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;

        Ok(Some(config))
    }

    fn apply_env_vars(config: &mut GuardConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var(ENV_STRICT_UNMAPPED) {
            config.strict_unmapped = parse_bool(&val)
                .ok_or_else(|| ConfigError::invalid_env_var(ENV_STRICT_UNMAPPED, "expected bool"))?;
        }

        for (var, field) in [
            (ENV_LOGIN_PATH, &mut config.login_path),
            (ENV_DENIED_PATH, &mut config.denied_path),
        ] {
            if let Ok(val) = std::env::var(var) {
                if !val.starts_with('/') {
                    return Err(ConfigError::invalid_env_var(var, "must start with '/'"));
                }
                *field = val;
            }
        }

        Ok(())
    }
}

/// Parses a boolean from string.
///
/// Accepts: "true", "false", "1", "0", "yes", "no", "on", "off" (case-insensitive).
fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_config_file(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_defaults_only() {
        let config = ConfigLoader::new()
            .skip_config_file()
            .skip_env_vars()
            .load()
            .unwrap();

        assert_eq!(config, GuardConfig::default());
    }

    #[test]
    fn load_config_file() {
        let temp = TempDir::new().unwrap();
        let path = create_config_file(
            temp.path(),
            r#"
login_path = "/entrar"
strict_unmapped = true

[legacy_routes]
admin = ["/admin"]
"#,
        );

        let config = ConfigLoader::new()
            .with_config_file(&path)
            .skip_env_vars()
            .load()
            .unwrap();

        assert_eq!(config.login_path, "/entrar");
        assert!(config.strict_unmapped);
        assert_eq!(config.legacy_routes.len(), 1);
        assert_eq!(config.home, super::super::HomePaths::default());
    }

    #[test]
    fn missing_config_file_ok() {
        let config = ConfigLoader::new()
            .with_config_file("/nonexistent/path/wellgate.toml")
            .skip_env_vars()
            .load()
            .unwrap();

        assert_eq!(config, GuardConfig::default());
    }

    #[test]
    fn malformed_file_is_parse_error() {
        use wellgate_types::ErrorCode;

        let temp = TempDir::new().unwrap();
        let path = create_config_file(temp.path(), "login_path = [");

        let err = ConfigLoader::new()
            .with_config_file(&path)
            .skip_env_vars()
            .load()
            .unwrap_err();

        assert_eq!(err.code(), "CONFIG_PARSE_TOML");
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn invalid_file_fails_validation() {
        use wellgate_types::ErrorCode;

        let temp = TempDir::new().unwrap();
        let path = create_config_file(
            temp.path(),
            r#"
[home]
user = "dashboard"
"#,
        );

        let err = ConfigLoader::new()
            .with_config_file(&path)
            .skip_env_vars()
            .load()
            .unwrap_err();

        assert_eq!(err.code(), "CONFIG_INVALID_VALUE");
    }

    fn clear_env() {
        for var in [
            ENV_CONFIG_FILE,
            ENV_LOGIN_PATH,
            ENV_DENIED_PATH,
            ENV_STRICT_UNMAPPED,
        ] {
            std::env::remove_var(var);
        }
    }

    // Environment is process-wide, so every env case lives in this one test.
    #[test]
    fn env_var_override() {
        use wellgate_types::ErrorCode;

        clear_env();

        std::env::set_var(ENV_LOGIN_PATH, "/entrar");
        std::env::set_var(ENV_DENIED_PATH, "/sem-acesso");
        std::env::set_var(ENV_STRICT_UNMAPPED, "yes");
        let config = ConfigLoader::new().skip_config_file().load();
        clear_env();
        let config = config.unwrap();
        assert_eq!(config.login_path, "/entrar");
        assert_eq!(config.denied_path, "/sem-acesso");
        assert!(config.strict_unmapped);

        std::env::set_var(ENV_STRICT_UNMAPPED, "maybe");
        let err = ConfigLoader::new().skip_config_file().load();
        clear_env();
        let err = err.unwrap_err();
        assert_eq!(err.code(), "CONFIG_INVALID_ENV_VAR");
        assert!(err.to_string().contains(ENV_STRICT_UNMAPPED));

        std::env::set_var(ENV_LOGIN_PATH, "entrar");
        let err = ConfigLoader::new().skip_config_file().load();
        clear_env();
        let err = err.unwrap_err();
        assert_eq!(err.code(), "CONFIG_INVALID_ENV_VAR");
        assert!(err.to_string().contains(ENV_LOGIN_PATH));

        // Env overrides win over the file named by WELLGATE_CONFIG.
        let temp = TempDir::new().unwrap();
        let path = create_config_file(
            temp.path(),
            r#"
login_path = "/arquivo"
strict_unmapped = true
"#,
        );
        std::env::set_var(ENV_CONFIG_FILE, &path);
        std::env::set_var(ENV_STRICT_UNMAPPED, "off");
        let config = ConfigLoader::new().load();
        clear_env();
        let config = config.unwrap();
        assert_eq!(config.login_path, "/arquivo");
        assert!(!config.strict_unmapped);

        // skip_env_vars ignores WELLGATE_CONFIG as well.
        std::env::set_var(ENV_CONFIG_FILE, &path);
        let config = ConfigLoader::new().skip_env_vars().load();
        clear_env();
        assert_eq!(config.unwrap().login_path, "/login");
    }

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool(" on "), Some(true));

        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("off"), Some(false));

        assert_eq!(parse_bool("invalid"), None);
    }
}
