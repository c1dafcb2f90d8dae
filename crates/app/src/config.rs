//! Layered configuration: defaults, then a TOML file, then `FLASHCARDS_*`
//! environment variables (`__` separates nested keys).

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use flash_core::RoleSecrets;
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "flashcards.toml";

/// Prefix for environment overrides, e.g. `FLASHCARDS_STORAGE__DATABASE_URL`.
pub const ENV_PREFIX: &str = "FLASHCARDS_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    /// Per-role login secrets.
    pub auth: RoleSecrets,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// `sqlite://<path>`, a bare path, or `sqlite::memory:`.
    pub database_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://flashcards.sqlite3".into(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or [`DEFAULT_CONFIG_FILE`] when `None`. A missing
    /// file is not an error.
    ///
    /// # Errors
    ///
    /// Returns a `figment::Error` when a source cannot be parsed into
    /// `AppConfig`.
    pub fn load_from(path: Option<&Path>) -> Result<Self, figment::Error> {
        let file = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let config = AppConfig::load_from(None)?;
            assert_eq!(config, AppConfig::default());
            assert_eq!(config.auth.learner, "user123");
            Ok(())
        });
    }

    #[test]
    fn toml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
                [storage]
                database_url = "sqlite::memory:"

                [auth]
                editor = "edit-me"
                "#,
            )?;
            let config = AppConfig::load_from(Some(Path::new("custom.toml")))?;
            assert_eq!(config.storage.database_url, "sqlite::memory:");
            assert_eq!(config.auth.editor, "edit-me");
            assert_eq!(config.auth.super_admin, "super123");
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                [storage]
                database_url = "sqlite://from-file.sqlite3"
                "#,
            )?;
            jail.set_env("FLASHCARDS_STORAGE__DATABASE_URL", "sqlite://from-env.sqlite3");
            jail.set_env("FLASHCARDS_AUTH__LEARNER", "learn!");
            let config = AppConfig::load_from(None)?;
            assert_eq!(config.storage.database_url, "sqlite://from-env.sqlite3");
            assert_eq!(config.auth.learner, "learn!");
            Ok(())
        });
    }
}
