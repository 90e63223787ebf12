//! User settings at ~/.config/calctl/config.toml
//!
//! Every key is optional. `CALCTL_*` environment variables override the file,
//! e.g. `CALCTL_TIME_ZONE=Europe/Berlin`.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{CalctlError, CalctlResult};
use crate::time::TimeConfig;

static DEFAULT_CREDENTIALS_FILE: &str = "credentials.json";
static DEFAULT_TIME_ZONE: &str = "Asia/Kolkata";
static DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const DEFAULT_LIST_LIMIT: u32 = 10;

fn default_credentials_file() -> PathBuf {
    PathBuf::from(DEFAULT_CREDENTIALS_FILE)
}

fn default_time_zone() -> String {
    DEFAULT_TIME_ZONE.to_string()
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

fn default_list_limit() -> u32 {
    DEFAULT_LIST_LIMIT
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// OAuth client configuration downloaded from the Google Cloud console.
    #[serde(default = "default_credentials_file")]
    pub credentials_file: PathBuf,

    /// Cached credential. Defaults to `<home>/token.json`.
    #[serde(default)]
    pub token_file: Option<PathBuf>,

    /// IANA zone used to interpret entered times and attached to created events.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    /// strftime pattern for entered times.
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Maximum number of upcoming events shown by the list operation.
    #[serde(default = "default_list_limit")]
    pub list_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            credentials_file: default_credentials_file(),
            token_file: None,
            time_zone: default_time_zone(),
            time_format: default_time_format(),
            list_limit: default_list_limit(),
        }
    }
}

impl Settings {
    pub fn config_path() -> CalctlResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalctlError::Config("Could not determine config directory".into()))?
            .join("calctl");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> CalctlResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> CalctlResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("CALCTL"))
            .build()
            .map_err(|e| CalctlError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalctlError::Config(e.to_string()))
    }

    pub fn credentials_path(&self) -> PathBuf {
        expand(&self.credentials_file)
    }

    pub fn token_path(&self) -> CalctlResult<PathBuf> {
        match &self.token_file {
            Some(path) => Ok(expand(path)),
            None => Ok(dirs::home_dir()
                .ok_or_else(|| CalctlError::Config("Could not determine home directory".into()))?
                .join("token.json")),
        }
    }

    pub fn time_config(&self) -> CalctlResult<TimeConfig> {
        TimeConfig::new(&self.time_format, &self.time_zone)
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
