//! Configuration from the environment

use std::path::PathBuf;

use crate::error::{CliError, Result};

/// Where generated files are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Storage root, `FAKEFILE_ROOT`
    pub root: PathBuf,

    /// Directory under the root, `FAKEFILE_REL_PATH`
    pub rel_path: PathBuf,

    /// Print absolute instead of root-relative paths, `FAKEFILE_ABSOLUTE`
    pub absolute: bool,

    /// Delete generated files again before exiting, `FAKEFILE_CLEAN_UP`
    pub clean_up: bool,
}

impl CliConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            root: lookup("FAKEFILE_ROOT")
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.root),
            rel_path: lookup("FAKEFILE_REL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.rel_path),
            absolute: flag(&lookup, "FAKEFILE_ABSOLUTE")?.unwrap_or(defaults.absolute),
            clean_up: flag(&lookup, "FAKEFILE_CLEAN_UP")?.unwrap_or(defaults.clean_up),
        })
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<bool>> {
    lookup(key)
        .map(|value| parse_bool(&value).ok_or_else(|| CliError::Config(format!("Invalid {key} value `{value}`"))))
        .transpose()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            root: std::env::temp_dir(),
            rel_path: PathBuf::from("tmp"),
            absolute: false,
            clean_up: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.rel_path, PathBuf::from("tmp"));
    }

    #[test]
    fn test_overrides() {
        let config = CliConfig::from_lookup(lookup(&[
            ("FAKEFILE_ROOT", "/srv/fixtures"),
            ("FAKEFILE_REL_PATH", ""),
            ("FAKEFILE_ABSOLUTE", "yes"),
            ("FAKEFILE_CLEAN_UP", "1"),
        ]))
        .unwrap();
        assert_eq!(config.root, PathBuf::from("/srv/fixtures"));
        assert_eq!(config.rel_path, PathBuf::new());
        assert!(config.absolute);
        assert!(config.clean_up);
    }

    #[test]
    fn test_invalid_flag() {
        let err = CliConfig::from_lookup(lookup(&[("FAKEFILE_CLEAN_UP", "maybe")])).unwrap_err();
        assert!(matches!(err, CliError::Config(ref message) if message.contains("FAKEFILE_CLEAN_UP")));
    }
}
