use std::io::Error as IoError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0:#}")]
    Io(#[from] IoError),
    #[error("Address parsing error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
    #[error("Configuration error: {0:?}")]
    Config(heartbeat::config::Error),
    #[error("Failed to restore tracked endpoints: {0}")]
    Restore(#[from] heartbeat::TrackerError),
    #[error(transparent)]
    Startup(#[from] anyhow::Error),
}

impl From<heartbeat::config::Error> for AppError {
    fn from(err: heartbeat::config::Error) -> Self {
        Self::Config(err)
    }
}
