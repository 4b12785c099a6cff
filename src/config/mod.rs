pub mod args;
pub mod error;
pub mod file_handler;

use crate::backend::CreateMode;
use args::CommandLine;
use error::ConfigError;
use file_handler::ConfigFileHandler;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_NAME: &str = "config";

/// Path templates for the video collection. `{id}` and `{title}` are
/// substituted as single, percent-encoded path segments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub list: String,
    pub create: String,
    pub upload: String,
    pub update: String,
    pub delete: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            list: String::from("/videos"),
            create: String::from("/videos"),
            upload: String::from("/videos/{title}"),
            update: String::from("/videos/{id}"),
            delete: String::from("/videos/{id}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub create_mode: CreateMode,
    pub upload_field: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:3000"),
            create_mode: CreateMode::Url,
            upload_field: String::from("video"),
            request_timeout_secs: 30,
            log_level: String::from("info"),
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    pub fn apply_overrides(&mut self, command_line: &CommandLine) {
        if let Some(ref server) = command_line.server {
            self.base_url = server.clone();
        }
        if command_line.upload {
            self.create_mode = CreateMode::File;
        }
    }
}

pub struct ConfigHandler {
    config: Config,
    path: PathBuf,
}

impl ConfigHandler {
    pub async fn load(command_line: &CommandLine) -> Result<Self, ConfigError> {
        let mut file_handler = match command_line.config {
            Some(ref path) => ConfigFileHandler::from_path(path.clone()),
            None => ConfigFileHandler::from_config_file(CONFIG_NAME).await?,
        };

        let mut config: Config = file_handler.read().await?;
        config.apply_overrides(command_line);

        Ok(Self {
            config,
            path: file_handler.path().to_path_buf(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
