//! Error types for Seedbed.

use thiserror::Error;

use crate::engine::launch::LaunchError;
use crate::engine::lifecycle::ShutdownError;
use crate::engine::readiness::TimeoutError;
use crate::engine::template::ProvisionError;

/// Seedbed error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Template or instance directory setup failed
    #[error("Provisioning error: {0}")]
    Provision(#[from] ProvisionError),

    /// The server process failed to start
    #[error("Launch error: {0}")]
    Launch(#[from] LaunchError),

    /// The server did not signal readiness in time
    #[error("Readiness error: {0}")]
    Timeout(#[from] TimeoutError),

    /// Signal delivery or directory cleanup failed during stop
    #[error("Shutdown error: {0}")]
    Shutdown(#[from] ShutdownError),
}

/// Result type alias for Seedbed operations.
pub type Result<T> = std::result::Result<T, Error>;
