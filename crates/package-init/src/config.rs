//! # Configuration
//!
//! The binary is configured through the environment:
//!
//! | Variable                      | Meaning                                   | Default |
//! |-------------------------------|-------------------------------------------|---------|
//! | `PACKAGE_INIT_PROVIDERS`      | comma-separated provider references       | none    |
//! | `PACKAGE_INIT_CONFIGURATIONS` | comma-separated configuration references  | none    |
//! | `PACKAGE_INIT_STORE_BUFFER`   | request channel capacity of each store    | 32      |
//!
//! Blank entries in the lists are ignored, so `a,,b, ` yields `["a", "b"]`.
//! References are not validated here; the installer does that.

use crate::installer::PackageInstaller;
use std::num::ParseIntError;
use thiserror::Error;

pub const PROVIDERS_ENV: &str = "PACKAGE_INIT_PROVIDERS";
pub const CONFIGURATIONS_ENV: &str = "PACKAGE_INIT_CONFIGURATIONS";
pub const STORE_BUFFER_ENV: &str = "PACKAGE_INIT_STORE_BUFFER";

pub const DEFAULT_STORE_BUFFER: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PACKAGE_INIT_STORE_BUFFER is not a number: {value:?}")]
    InvalidBuffer {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("PACKAGE_INIT_STORE_BUFFER must be greater than zero")]
    ZeroBuffer,
}

/// Everything the `package-init` binary needs to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitConfig {
    pub providers: Vec<String>,
    pub configurations: Vec<String>,
    pub store_buffer: usize,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            configurations: Vec::new(),
            store_buffer: DEFAULT_STORE_BUFFER,
        }
    }
}

impl InitConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of a
    /// variable or `None` if it is unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store_buffer = match lookup(STORE_BUFFER_ENV) {
            Some(value) if !value.trim().is_empty() => parse_buffer(value)?,
            _ => DEFAULT_STORE_BUFFER,
        };

        Ok(Self {
            providers: split_list(lookup(PROVIDERS_ENV)),
            configurations: split_list(lookup(CONFIGURATIONS_ENV)),
            store_buffer,
        })
    }

    pub fn installer(&self) -> PackageInstaller {
        PackageInstaller::new(self.providers.clone(), self.configurations.clone())
    }
}

fn parse_buffer(value: String) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::ZeroBuffer),
        Ok(n) => Ok(n),
        Err(source) => Err(ConfigError::InvalidBuffer { value, source }),
    }
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = InitConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, InitConfig::default());
        assert_eq!(config.store_buffer, DEFAULT_STORE_BUFFER);
    }

    #[test]
    fn test_splits_lists_and_skips_blanks() {
        let config = InitConfig::from_lookup(lookup(&[
            (PROVIDERS_ENV, "crossplane/provider-aws:v1, ,crossplane/provider-gcp:v1,"),
            (CONFIGURATIONS_ENV, "  getting-started:v1  "),
            (STORE_BUFFER_ENV, " 8 "),
        ]))
        .unwrap();

        assert_eq!(
            config.providers,
            ["crossplane/provider-aws:v1", "crossplane/provider-gcp:v1"]
        );
        assert_eq!(config.configurations, ["getting-started:v1"]);
        assert_eq!(config.store_buffer, 8);
    }

    #[test]
    fn test_rejects_bad_buffer() {
        let err = InitConfig::from_lookup(lookup(&[(STORE_BUFFER_ENV, "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBuffer { ref value, .. } if value == "lots"));

        let err = InitConfig::from_lookup(lookup(&[(STORE_BUFFER_ENV, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroBuffer));
    }

    #[test]
    fn test_installer_carries_lists() {
        let config = InitConfig {
            providers: vec!["a".into()],
            configurations: vec!["b".into(), "c".into()],
            ..InitConfig::default()
        };
        let installer = config.installer();
        assert_eq!(installer.providers(), ["a"]);
        assert_eq!(installer.configurations(), ["b", "c"]);
    }
}
