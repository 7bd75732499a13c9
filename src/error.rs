use resource_sync::FrameworkError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the console runtime.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Framework(#[from] FrameworkError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Store task failed: {0}")]
    Task(String),
}
