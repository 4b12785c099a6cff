use crate::config::{error::ConfigError, file_handler::app_dir};

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::{fs, fs::File, path::PathBuf};

const LOG_FILE_NAME: &str = "vidman.log";

/// Sends all log output to a file, the terminal belongs to the interface.
pub fn init(level: &str) -> Result<PathBuf, ConfigError> {
    let level = parse_level(level);
    let dir = app_dir("XDG_STATE_HOME", &[".local", "state"])?;
    fs::create_dir_all(&dir).map_err(ConfigError::CreateConfigDir)?;

    let path = dir.join(LOG_FILE_NAME);
    let file = File::create(&path).map_err(ConfigError::CreateLogFile)?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .build();
    WriteLogger::init(level, config, file)?;

    Ok(path)
}

fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Info)
}
