use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{copy, create_dir_all, File},
    io::Read,
    path::{Path, PathBuf},
};

use crate::{icon::DEFAULT_ASSETS_DIR, Error, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    pub assets_dir: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
    pub tooltip: Option<String>,
}

impl std::ops::Add for Config {
    type Output = Config;
    fn add(self, other: Config) -> Config {
        Config {
            assets_dir: merge_option_string(self.assets_dir, other.assets_dir),
            log_level: merge_option_string(self.log_level, other.log_level),
            log_file: merge_option_string(self.log_file, other.log_file),
            tooltip: merge_option_string(self.tooltip, other.tooltip),
        }
    }
}

impl Config {
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Reading config file from {:?}", path);
        Self::from_reader(File::open(path)?)
    }

    /// Reads `default.yaml` from the executable's directory.
    pub fn load_default() -> Result<Self> {
        let mut config_path = env::current_exe()?;
        config_path.set_file_name("default.yaml");
        Self::load(config_path)
    }

    /// Merges the per-user config over `self`, creating it from the
    /// `user.yaml` template next to the executable on first run.
    pub fn load_or_create_user_config(self) -> Result<Self> {
        let user_config_path = user_config_path()?;
        if !user_config_path.exists() {
            if let Some(dir) = user_config_path.parent() {
                create_dir_all(dir)?;
            }
            let mut template_path = env::current_exe()?;
            template_path.set_file_name("user.yaml");
            info!("Creating {:?} from {:?}", user_config_path, template_path);
            copy(template_path, &user_config_path)?;
        }
        let user_config = Self::load(user_config_path)?;
        Ok(self + user_config)
    }

    pub fn assets_dir(&self) -> &str {
        self.assets_dir.as_deref().unwrap_or(DEFAULT_ASSETS_DIR)
    }

    /// Unknown or missing levels fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Info)
    }

    pub fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref()
    }

    pub fn tooltip(&self) -> &str {
        self.tooltip.as_deref().unwrap_or(env!("CARGO_PKG_NAME"))
    }
}

fn user_config_path() -> Result<PathBuf> {
    let mut path = dirs::data_local_dir()
        .ok_or_else(|| Error::Platform("no local data directory".into()))?;
    path.push(env!("CARGO_PKG_NAME"));
    path.push("config.yaml");
    Ok(path)
}

fn merge_option_string(lhs: Option<String>, rhs: Option<String>) -> Option<String> {
    match (lhs, rhs) {
        (Some(_), Some(b)) => Some(b),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        _ => None,
    }
}
