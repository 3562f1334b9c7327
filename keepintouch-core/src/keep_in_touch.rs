//! Application root: loads configuration and opens the stores it points at.

use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};

use crate::actions::SystemDispatcher;
use crate::config::KeepInTouchConfig;
use crate::contact_book::VdirContactBook;
use crate::error::{KeepInTouchError, KeepInTouchResult};
use crate::store::TomlContactStore;

#[derive(Debug, Clone)]
pub struct KeepInTouch {
    config: KeepInTouchConfig,
    config_path: PathBuf,
}

impl KeepInTouch {
    /// Load the config file, writing a commented default on first run.
    pub fn load() -> KeepInTouchResult<Self> {
        let config_path = KeepInTouchConfig::config_path()?;

        if !config_path.exists() {
            KeepInTouchConfig::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> KeepInTouchResult<Self> {
        let config: KeepInTouchConfig = Config::builder()
            .add_source(
                File::from(config_path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .build()
            .map_err(|e| KeepInTouchError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| KeepInTouchError::Config(e.to_string()))?;

        tracing::debug!(path = %config_path.display(), "loaded config");

        Ok(KeepInTouch {
            config,
            config_path: config_path.to_path_buf(),
        })
    }

    pub fn config(&self) -> &KeepInTouchConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data_path(&self) -> PathBuf {
        expand(&self.config.data_dir)
    }

    pub fn contacts_path(&self) -> PathBuf {
        expand(&self.config.contacts_dir)
    }

    pub fn store(&self) -> KeepInTouchResult<TomlContactStore> {
        TomlContactStore::open(&self.data_path())
    }

    pub fn contact_book(&self) -> VdirContactBook {
        VdirContactBook::new(self.contacts_path())
    }

    pub fn dispatcher(&self) -> SystemDispatcher {
        SystemDispatcher::from_config(&self.config)
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ContactRepository;

    #[test]
    fn opens_stores_from_configured_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let data = dir.path().join("data");
        let cards = dir.path().join("cards");
        std::fs::create_dir_all(&cards).unwrap();
        std::fs::write(
            &config_path,
            format!(
                "data_dir = {:?}\ncontacts_dir = {:?}\n",
                data.display().to_string(),
                cards.display().to_string()
            ),
        )
        .unwrap();

        let app = KeepInTouch::load_from(&config_path).unwrap();
        assert_eq!(app.data_path(), data);
        assert_eq!(app.contact_book().dir(), cards.as_path());

        let mut store = app.store().unwrap();
        store.track("someone").unwrap();
        assert!(data.join("contacts.toml").exists());
    }

    #[test]
    fn tilde_is_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand(Path::new("~/contacts")), home.join("contacts"));
    }

    #[test]
    fn config_without_extension_is_read_as_toml() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("kit-conf");
        std::fs::write(&config_path, "date_format = \"%Y\"\n").unwrap();

        let app = KeepInTouch::load_from(&config_path).unwrap();
        assert_eq!(app.config().date_format, "%Y");
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let app = KeepInTouch::load_from(&dir.path().join("absent")).unwrap();
        assert_eq!(app.config().date_format, KeepInTouchConfig::default().date_format);
    }
}
