//! Server process launch.

use std::fs::File;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use thiserror::Error;

use crate::defaults;
use crate::engine::locate::{self, LocateError};

/// Errors that can occur while starting the server process.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// The server process could not be spawned
    #[error("failed to spawn server: {0}")]
    Spawn(String),

    /// The server log file could not be created
    #[error("failed to open server log: {0}")]
    Log(String),

    /// The server executable could not be resolved
    #[error(transparent)]
    Locate(#[from] LocateError),
}

/// Start the server against `workdir` without waiting for readiness.
///
/// Output goes to a log file inside the working directory, so a failed
/// instance can be diagnosed before its directory is reclaimed. The
/// returned handle is the sole means of terminating the process later.
pub fn launch(workdir: &Path) -> Result<Child, LaunchError> {
    let server = locate::server()?;

    let log_path = workdir.join(defaults::SERVER_LOG_NAME);
    let log = File::create(&log_path).map_err(|e| LaunchError::Log(format!("{}: {}", log_path.display(), e)))?;
    let log_err = log
        .try_clone()
        .map_err(|e| LaunchError::Log(format!("{}: {}", log_path.display(), e)))?;

    let child = Command::new(&server)
        .arg("-D")
        .arg(workdir)
        .stdout(Stdio::from(log))
        .stderr(Stdio::from(log_err))
        .spawn()
        .map_err(|e| LaunchError::Spawn(format!("{}: {}", server.display(), e)))?;

    log::info!(
        "Launched {} (pid {}) against {:?}",
        server.display(),
        child.id(),
        workdir
    );
    Ok(child)
}
