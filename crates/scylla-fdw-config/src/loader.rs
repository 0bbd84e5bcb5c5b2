//! Layered loading of wrapper-wide defaults.
//!
//! Files are read in [`ConfigLayer`] order, each overriding the previous one,
//! then `SCYLLA_FDW_*` environment variables override them all. Nested keys
//! use a double underscore: `SCYLLA_FDW_SERVER__CONNECT_TIMEOUT=2000`.

use std::env;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use crate::{ConfigError, ScyllaFdwConfig};

const PROJECT_FILE: &str = "scylla_fdw.toml";
const LOCAL_FILE: &str = "scylla_fdw.local.toml";
const USER_FILE: &str = "config.toml";

/// A configuration file layer, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigLayer {
    /// `~/.config/scylla-fdw/config.toml` or the platform equivalent.
    User,
    /// `scylla_fdw.toml` in the project directory.
    Project,
    /// `scylla_fdw.local.toml` in the project directory, kept out of version control.
    Local,
}

impl Display for ConfigLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfigLayer::User => "user",
            ConfigLayer::Project => "project",
            ConfigLayer::Local => "local",
        })
    }
}

/// Directory holding the per-user configuration file.
pub fn user_config_dir() -> std::result::Result<PathBuf, ConfigError> {
    ProjectDirs::from("io", "scylla-fdw", "scylla-fdw")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ConfigError::NoUserConfigDir("home directory not found".to_string()))
}

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
    user_config: bool,
}

impl ConfigLoader {
    /// Loader for the current directory.
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "SCYLLA_FDW".to_string(),
            user_config: true,
        }
    }

    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Environment variable prefix, `SCYLLA_FDW` by default.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Skips the user layer.
    pub fn without_user_config(mut self) -> Self {
        self.user_config = false;
        self
    }

    /// Candidate files in precedence order, whether or not they exist.
    pub fn layers(&self) -> Vec<(ConfigLayer, PathBuf)> {
        let mut layers = Vec::with_capacity(3);
        if self.user_config {
            match user_config_dir() {
                Ok(dir) => layers.push((ConfigLayer::User, dir.join(USER_FILE))),
                Err(err) => debug!(error = %err, "skipping user config"),
            }
        }
        layers.push((ConfigLayer::Project, self.project_dir.join(PROJECT_FILE)));
        layers.push((ConfigLayer::Local, self.project_dir.join(LOCAL_FILE)));
        layers
    }

    /// Loads defaults, then every existing layer, then the environment.
    pub fn load(self) -> Result<ScyllaFdwConfig> {
        let defaults = ScyllaFdwConfig::default();
        let mut builder = config::Config::builder().add_source(config::Config::try_from(&defaults)?);

        for (layer, path) in self.layers() {
            if !path.exists() {
                continue;
            }
            debug!(%layer, path = %path.display(), "loading config file");
            builder = builder.add_source(
                config::File::from(path)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Like [`load`](Self::load), falling back to built-in defaults on any error.
    pub fn load_or_default(self) -> ScyllaFdwConfig {
        self.load().unwrap_or_default()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
