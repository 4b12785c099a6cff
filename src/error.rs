use crate::{backend::BackendError, config::error::ConfigError};

use err_derive::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(display = "{}", _0)]
    Config(#[error(from)] ConfigError),

    #[error(display = "{}", _0)]
    Backend(#[error(from)] BackendError),
}
