//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services.
//! Nothing in the engine reads environment variables while handling a request.

use crate::constants::{DEFAULT_MAX_CONDITIONS, DEFAULT_SEARCH_LIMIT};
use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    catalog_path: Option<PathBuf>,
    max_conditions: usize,
    search_limit: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            max_conditions: DEFAULT_MAX_CONDITIONS,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if either limit is zero.
    pub fn new(
        catalog_path: Option<PathBuf>,
        max_conditions: usize,
        search_limit: usize,
    ) -> ConfigResult<Self> {
        if max_conditions == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_conditions",
                message: "must be at least 1".into(),
            });
        }
        if search_limit == 0 {
            return Err(ConfigError::InvalidValue {
                name: "search_limit",
                message: "must be at least 1".into(),
            });
        }

        Ok(Self {
            catalog_path,
            max_conditions,
            search_limit,
        })
    }

    /// Build a configuration from raw (typically environment) values.
    ///
    /// Missing or blank values fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a limit is not a positive integer.
    pub fn from_env_values(
        catalog_path: Option<String>,
        max_conditions: Option<String>,
        search_limit: Option<String>,
    ) -> ConfigResult<Self> {
        let catalog_path = non_blank(catalog_path).map(PathBuf::from);
        let max_conditions =
            parse_limit("SYMCHECK_MAX_CONDITIONS", max_conditions, DEFAULT_MAX_CONDITIONS)?;
        let search_limit = parse_limit("SYMCHECK_SEARCH_LIMIT", search_limit, DEFAULT_SEARCH_LIMIT)?;
        Self::new(catalog_path, max_conditions, search_limit)
    }

    /// Read configuration from the process environment.
    ///
    /// Intended to be called once from `main`.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_env_values(
            std::env::var("SYMCHECK_CATALOG_PATH").ok(),
            std::env::var("SYMCHECK_MAX_CONDITIONS").ok(),
            std::env::var("SYMCHECK_SEARCH_LIMIT").ok(),
        )
    }

    /// Catalog override; `None` means the embedded catalog.
    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }

    pub fn max_conditions(&self) -> usize {
        self.max_conditions
    }

    pub fn search_limit(&self) -> usize {
        self.search_limit
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_limit(name: &'static str, value: Option<String>, default: usize) -> ConfigResult<usize> {
    match non_blank(value) {
        None => Ok(default),
        Some(v) => match v.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::InvalidValue {
                name,
                message: format!("expected a positive integer, got {v:?}"),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        let cfg = CoreConfig::from_env_values(None, None, Some("  ".into())).expect("defaults");
        assert_eq!(cfg, CoreConfig::default());
        assert_eq!(cfg.max_conditions(), DEFAULT_MAX_CONDITIONS);
        assert!(cfg.catalog_path().is_none());
    }

    #[test]
    fn parses_overrides() {
        let cfg = CoreConfig::from_env_values(
            Some("/etc/symcheck/catalog.yaml".into()),
            Some("3".into()),
            Some(" 20 ".into()),
        )
        .expect("valid overrides");
        assert_eq!(cfg.catalog_path(), Some(Path::new("/etc/symcheck/catalog.yaml")));
        assert_eq!(cfg.max_conditions(), 3);
        assert_eq!(cfg.search_limit(), 20);
    }

    #[test]
    fn rejects_zero_and_garbage_limits() {
        let err = CoreConfig::from_env_values(None, Some("0".into()), None).expect_err("zero");
        assert!(err.to_string().contains("SYMCHECK_MAX_CONDITIONS"));

        let err = CoreConfig::from_env_values(None, None, Some("ten".into())).expect_err("garbage");
        assert!(err.to_string().contains("SYMCHECK_SEARCH_LIMIT"));

        assert!(CoreConfig::new(None, 5, 0).is_err());
    }
}
