//! Global caldesk configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_DATA_FILE, DEFAULT_MAX_FILE_SIZE};
use crate::error::{CalDeskError, CalDeskResult};
use crate::persist;
use crate::store::StoreOptions;

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

/// Global configuration at ~/.config/caldesk/config.toml
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CaldeskConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Data files larger than this many bytes are moved aside on load.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for CaldeskConfig {
    fn default() -> Self {
        CaldeskConfig {
            data_file: default_data_file(),
            max_file_size: default_max_file_size(),
        }
    }
}

impl CaldeskConfig {
    pub fn config_path() -> CalDeskResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalDeskError::Config("Could not determine config directory".into()))?
            .join("caldesk");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/caldesk/config.toml, writing a commented template first
    /// if there is none.
    pub fn load() -> CalDeskResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> CalDeskResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| CalDeskError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalDeskError::Config(e.to_string()))
    }

    /// The data file with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_file.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions::new(self.data_path()).with_max_file_size(self.max_file_size)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalDeskResult<()> {
        let contents = format!(
            "\
# caldesk configuration

# Where appointments and todo lists are stored:
# data_file = \"{}\"

# Data files larger than this (in bytes) are moved to <data_file>.backup on start:
# max_file_size = {}
",
            DEFAULT_DATA_FILE, DEFAULT_MAX_FILE_SIZE
        );

        persist::write_file(path, contents.as_bytes()).map_err(|e| {
            CalDeskError::Config(format!(
                "Could not write config file {}: {e}",
                path.display()
            ))
        })
    }
}
