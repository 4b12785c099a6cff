use crate::config::error::ConfigError;

use serde::{de::DeserializeOwned, Serialize};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::{fs, fs::File, io::AsyncWriteExt};

const APP_DIR_NAME: &str = "vidman";

pub struct ConfigFileHandler<C> {
    config_type: std::marker::PhantomData<C>,
    path: PathBuf,
}

impl<C: Serialize + DeserializeOwned + Default + Clone> ConfigFileHandler<C> {
    pub async fn from_config_file(config_name: &str) -> Result<Self, ConfigError> {
        let config_file_name = format!("{}.toml", config_name);
        let mut path = app_dir("XDG_CONFIG_HOME", &[".config"])?;
        fs::create_dir_all(&path)
            .await
            .map_err(ConfigError::CreateConfigDir)?;
        path.push(config_file_name);

        Ok(Self::from_path(path))
    }

    pub fn from_path(path: PathBuf) -> Self {
        Self {
            config_type: std::marker::PhantomData,
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&mut self) -> Result<C, ConfigError> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(error) => match error.kind() {
                io::ErrorKind::NotFound => {
                    log::info!("No config at {}, writing defaults", self.path.display());
                    let config = Default::default();
                    Self::write_to_path(&self.path, &config).await?;
                    Ok(config)
                }
                _ => Err(ConfigError::ReadConfigFile(error)),
            },
        }
    }

    async fn write_to_path(path: &Path, config: &C) -> Result<(), ConfigError> {
        let toml = toml::to_string(config)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(ConfigError::CreateConfigDir)?;
        }
        let mut file = File::create(path)
            .await
            .map_err(ConfigError::CreateConfigFile)?;
        file.write_all(toml.as_bytes())
            .await
            .map_err(ConfigError::WriteConfigFile)?;
        file.flush().await.map_err(ConfigError::WriteConfigFile)?;
        Ok(())
    }
}

/// Resolves `$<xdg_var>/vidman`, falling back to `$HOME/<fallback..>/vidman`.
pub fn app_dir(xdg_var: &str, fallback: &[&str]) -> Result<PathBuf, ConfigError> {
    let mut path = PathBuf::new();

    match std::env::var(xdg_var) {
        Ok(dir) if !dir.is_empty() => path.push(dir),
        _ => {
            let home = std::env::var("HOME")?;
            path.push(home);
            fallback.iter().for_each(|segment| path.push(segment));
        }
    }

    path.push(APP_DIR_NAME);
    Ok(path)
}
