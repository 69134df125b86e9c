//! Instance lifecycle management.
//!
//! Provides the `Postgres` handle which manages:
//! - Template and working-directory provisioning
//! - Server process launch and readiness
//! - Graceful shutdown with directory reclamation

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Child;
use std::time::Duration;

use thiserror::Error;

use crate::defaults;
use crate::endpoint::Endpoint;
use crate::engine::instance;
use crate::engine::launch;
use crate::engine::process;
use crate::engine::readiness;
use crate::engine::template;
use crate::error::Error;

/// Errors that can occur while stopping an instance.
#[derive(Error, Debug)]
pub enum ShutdownError {
    /// `stop` was called on an instance that is already stopped. Usually
    /// indicates a double-cleanup bug in the calling test.
    #[error("instance already stopped")]
    AlreadyStopped,

    /// The termination signal could not be delivered
    #[error("failed to signal server (pid {pid}): {message}")]
    Signal { pid: u32, message: String },

    /// The working directory could not be removed
    #[error("failed to remove {dir:?}: {message}")]
    Cleanup { dir: PathBuf, message: String },
}

/// One running server instance.
///
/// Exclusively owns its working directory and server process for its
/// entire lifetime. Dropping the handle without calling [`stop`](Self::stop)
/// performs the same teardown best-effort, so a panicking test still
/// reclaims its resources; an explicit double `stop` is an error.
#[derive(Debug)]
pub struct Postgres {
    workdir: PathBuf,
    endpoint: Endpoint,
    server: Child,
    stopped: bool,
}

impl Postgres {
    /// Provision and start a fresh instance, returning once it accepts
    /// connections.
    ///
    /// The first call in a process also initializes the shared template
    /// directory. Any failure tears down whatever this instance had
    /// already acquired; nothing leaks on the error paths.
    pub fn start() -> Result<Self, Error> {
        Self::start_with(defaults::READY_ATTEMPTS, defaults::READY_INTERVAL)
    }

    /// Like [`start`](Self::start) with a custom readiness poll budget.
    pub fn start_with(ready_attempts: u32, ready_interval: Duration) -> Result<Self, Error> {
        let template = template::ensure()?;
        let work = instance::provision(template)?;

        let mut server = match launch::launch(work.path()) {
            Ok(child) => child,
            Err(e) => {
                work.discard();
                return Err(e.into());
            }
        };

        if let Err(e) = readiness::await_ready(work.endpoint(), ready_attempts, ready_interval) {
            // The poller left the process running; take it down with the
            // directory before reporting.
            let _ = process::interrupt(&mut server);
            work.discard();
            return Err(e.into());
        }

        let (workdir, endpoint) = work.into_parts();
        Ok(Self {
            workdir,
            endpoint,
            server,
            stopped: false,
        })
    }

    /// The instance's working directory.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Connection information for this instance.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Key/value connection string for libpq-compatible clients.
    pub fn conninfo(&self) -> String {
        self.endpoint.conninfo()
    }

    /// Process id of the server.
    pub fn pid(&self) -> u32 {
        self.server.id()
    }

    /// Stop the server and remove its working directory.
    ///
    /// Sends a graceful termination request without waiting for the
    /// process to exit. Directory removal is attempted even when the
    /// signal fails; if both fail, the signal error is reported. Callable
    /// exactly once; later calls return [`ShutdownError::AlreadyStopped`].
    pub fn stop(&mut self) -> Result<(), ShutdownError> {
        if self.stopped {
            return Err(ShutdownError::AlreadyStopped);
        }
        self.stopped = true;

        let pid = self.server.id();
        let signal = match self.server.try_wait() {
            Ok(Some(status)) => {
                // Already exited; nothing to signal.
                log::debug!("Server (pid {}) exited before stop: {}", pid, status);
                Ok(())
            }
            _ => process::interrupt(&mut self.server).map_err(|e| ShutdownError::Signal {
                pid,
                message: e.to_string(),
            }),
        };

        let cleanup = fs::remove_dir_all(&self.workdir).map_err(|e| ShutdownError::Cleanup {
            dir: self.workdir.clone(),
            message: e.to_string(),
        });

        log::debug!("Stopped instance at {:?}", self.workdir);
        match (signal, cleanup) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(signal), _) => Err(signal),
            (Ok(()), Err(cleanup)) => Err(cleanup),
        }
    }
}

impl Drop for Postgres {
    fn drop(&mut self) {
        if !self.stopped {
            let _ = self.stop();
        }
    }
}
