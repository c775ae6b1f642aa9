use crate::{core::factory::SyncCategories, schema::types::Category};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// FailurePolicy
/// What a startup run does when one category fails.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop and surface the error; startup fails.
    #[default]
    Abort,

    /// Log the error and carry on with the next category.
    Log,
}

///
/// TypesyncConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypesyncConfig {
    /// Categories synchronized on startup.
    pub categories: Vec<Category>,
    pub failure_policy: FailurePolicy,

    /// Durable tracking table; tracking stays in memory when unset.
    pub tracking_file: Option<PathBuf>,
}

impl Default for TypesyncConfig {
    fn default() -> Self {
        Self {
            categories: Category::ALL.to_vec(),
            failure_policy: FailurePolicy::default(),
            tracking_file: None,
        }
    }
}

impl TypesyncConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    #[must_use]
    pub fn selected(&self) -> SyncCategories {
        self.categories.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_selects_everything() {
        let config = TypesyncConfig::from_toml_str("").unwrap();

        assert_eq!(config, TypesyncConfig::default());
        assert_eq!(config.selected(), SyncCategories::all());
    }

    #[test]
    fn categories_use_plural_names() {
        let config = TypesyncConfig::from_toml_str(
            r#"
            categories = ["DocumentTypes", "DataTypes"]
            failure_policy = "log"
            tracking_file = "state/tracking.json"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.selected(),
            SyncCategories::DOCUMENT_TYPES | SyncCategories::DATA_TYPES
        );
        assert_eq!(config.failure_policy, FailurePolicy::Log);
        assert_eq!(
            config.tracking_file.as_deref(),
            Some(Path::new("state/tracking.json"))
        );
    }

    #[test]
    fn unknown_keys_and_categories_are_rejected() {
        assert!(TypesyncConfig::from_toml_str("verbose = true").is_err());
        assert!(TypesyncConfig::from_toml_str("categories = [\"Templates\"]").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typesync.toml");

        let err = TypesyncConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { path: p, .. } if p == path));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typesync.toml");
        fs::write(&path, "categories = []\n").unwrap();

        let config = TypesyncConfig::from_file(&path).unwrap();
        assert!(config.selected().is_empty());
    }
}
