//! Bounded readiness polling.
//!
//! The server signals readiness by creating its socket file; this module
//! polls for that artifact at a fixed interval, up to a fixed number of
//! attempts. This is the only suspension point in the whole lifecycle,
//! and it is a blocking wait on the calling thread.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::endpoint::Endpoint;

/// The readiness signal did not appear within the attempt budget.
///
/// The server process is left running; the caller decides whether to
/// terminate it.
#[derive(Error, Debug)]
#[error("server not ready after {attempts} attempts ({interval:?} apart); no socket at {socket:?}")]
pub struct TimeoutError {
    pub attempts: u32,
    pub interval: Duration,
    pub socket: PathBuf,
}

/// Block until `endpoint` signals readiness or the attempt budget runs out.
pub fn await_ready(endpoint: &Endpoint, attempts: u32, interval: Duration) -> Result<(), TimeoutError> {
    let socket = endpoint.socket_path();
    for attempt in 0..attempts {
        if socket.exists() {
            log::debug!("Server ready after {} attempt(s)", attempt + 1);
            return Ok(());
        }
        thread::sleep(interval);
    }
    Err(TimeoutError {
        attempts,
        interval,
        socket,
    })
}
