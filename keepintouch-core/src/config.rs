//! Global keepintouch configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KeepInTouchError, KeepInTouchResult};

static DEFAULT_DATA_DIR: &str = "~/.local/share/keepintouch";
static DEFAULT_CONTACTS_DIR: &str = "~/contacts";
static DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";
static DEFAULT_VOICE_SCHEME: &str = "tel";
static DEFAULT_VIDEO_SCHEME: &str = "facetime";

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV_VAR: &str = "KEEPINTOUCH_CONFIG";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_contacts_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CONTACTS_DIR)
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_voice_scheme() -> String {
    DEFAULT_VOICE_SCHEME.to_string()
}

fn default_video_scheme() -> String {
    DEFAULT_VIDEO_SCHEME.to_string()
}

/// Configuration at ~/.config/keepintouch/config.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct KeepInTouchConfig {
    /// Where the tracked contact list is stored.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory of .vcf files used as the address book.
    #[serde(default = "default_contacts_dir")]
    pub contacts_dir: PathBuf,

    /// strftime format for "Caught up" dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_voice_scheme")]
    pub voice_scheme: String,

    #[serde(default = "default_video_scheme")]
    pub video_scheme: String,
}

impl Default for KeepInTouchConfig {
    fn default() -> Self {
        KeepInTouchConfig {
            data_dir: default_data_dir(),
            contacts_dir: default_contacts_dir(),
            date_format: default_date_format(),
            voice_scheme: default_voice_scheme(),
            video_scheme: default_video_scheme(),
        }
    }
}

impl KeepInTouchConfig {
    /// Path of the config file, honouring `KEEPINTOUCH_CONFIG`.
    pub fn config_path() -> KeepInTouchResult<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| KeepInTouchError::Config("Could not determine config directory".into()))?
            .join("keepintouch");

        Ok(config_dir.join("config.toml"))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> KeepInTouchResult<()> {
        let contents = format!(
            "\
# keepintouch configuration

# Where the list of tracked contacts is stored:
# data_dir = \"{DEFAULT_DATA_DIR}\"

# Address book: a directory of .vcf files (e.g. synced by vdirsyncer):
# contacts_dir = \"{DEFAULT_CONTACTS_DIR}\"

# How \"Caught up\" dates are shown:
# date_format = \"{DEFAULT_DATE_FORMAT}\"

# URL schemes used to start voice and video calls:
# voice_scheme = \"{DEFAULT_VOICE_SCHEME}\"
# video_scheme = \"{DEFAULT_VIDEO_SCHEME}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                KeepInTouchError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| KeepInTouchError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
