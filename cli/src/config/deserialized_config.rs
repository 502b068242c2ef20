use anyhow::{anyhow, Context, Result};
use log::{debug, info, trace};
use serde::Deserialize;
use std::{collections::HashMap, env, fs, path::PathBuf};
use toml;

use crate::config::DeserializedDeckConfig;

/// Represents the user config file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeserializedConfig {
    /// Represents all the user decks.
    #[serde(flatten)]
    pub decks: HashMap<String, DeserializedDeckConfig>,
}

impl DeserializedConfig {
    /// Tries to create a config from an optional path. Without an explicit
    /// path, a missing config file falls back to the default config.
    pub fn from_opt_path(path: Option<&str>) -> Result<Self> {
        info!("begin: try to parse config from path");
        debug!("path: {:?}", path);

        let path = match path {
            Some(path) => PathBuf::from(path),
            None => match Self::path() {
                Ok(path) => path,
                Err(err) => {
                    debug!("{:?}, using default config", err);
                    return Ok(Self::default());
                }
            },
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("cannot read config file {:?}", path))?;
        let config = Self::from_toml(&content)?;
        info!("end: try to parse config from path");
        trace!("config: {:?}", config);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("cannot parse config file")
    }

    fn home_var() -> &'static str {
        if cfg!(target_family = "windows") {
            "USERPROFILE"
        } else {
            "HOME"
        }
    }

    /// Tries to get the XDG config file path from XDG_CONFIG_HOME environment variable.
    fn path_from_xdg() -> Result<PathBuf> {
        let path =
            env::var("XDG_CONFIG_HOME").context("cannot find \"XDG_CONFIG_HOME\" env var")?;
        let path = PathBuf::from(path).join("vocard").join("config.toml");
        if path.is_file() {
            Ok(path)
        } else {
            Err(anyhow!("cannot find config file {:?}", path))
        }
    }

    /// Tries to get the XDG config file path from HOME environment variable.
    fn path_from_xdg_alt() -> Result<PathBuf> {
        let home_var = Self::home_var();
        let path = env::var(home_var).context(format!("cannot find {:?} env var", home_var))?;
        let path = PathBuf::from(path)
            .join(".config")
            .join("vocard")
            .join("config.toml");
        if path.is_file() {
            Ok(path)
        } else {
            Err(anyhow!("cannot find config file {:?}", path))
        }
    }

    /// Tries to get the .vocardrc config file path from HOME environment variable.
    fn path_from_home() -> Result<PathBuf> {
        let home_var = Self::home_var();
        let path = env::var(home_var).context(format!("cannot find {:?} env var", home_var))?;
        let path = PathBuf::from(path).join(".vocardrc");
        if path.is_file() {
            Ok(path)
        } else {
            Err(anyhow!("cannot find config file {:?}", path))
        }
    }

    /// Tries to get the config file path.
    pub fn path() -> Result<PathBuf> {
        Self::path_from_xdg()
            .or_else(|_| Self::path_from_xdg_alt())
            .or_else(|_| Self::path_from_home())
            .context("cannot find config path")
    }
}
