//! Engine executable resolution.
//!
//! The server binaries are expected to be installed already; this module
//! only finds them. Resolution order: the `SEEDBED_PG_BINDIR` override,
//! the directory reported by `pg_config --bindir`, then the bare name on
//! `PATH` (deferring a missing-executable error to spawn time).

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use thiserror::Error;

/// Environment variable naming a directory that holds the engine
/// executables. Overrides all other resolution when set.
pub const BINDIR_ENV: &str = "SEEDBED_PG_BINDIR";

/// Errors that can occur while resolving engine executables.
#[derive(Error, Debug, Clone)]
pub enum LocateError {
    /// The override directory is missing the requested executable
    #[error("{var} points at {dir:?}, which does not contain {name}")]
    OverrideMissing {
        var: &'static str,
        dir: PathBuf,
        name: &'static str,
    },
}

/// Path of the `initdb` executable.
pub fn initdb() -> Result<PathBuf, LocateError> {
    resolve("initdb")
}

/// Path of the `postgres` server executable.
pub fn server() -> Result<PathBuf, LocateError> {
    resolve("postgres")
}

fn resolve(name: &'static str) -> Result<PathBuf, LocateError> {
    if let Ok(dir) = env::var(BINDIR_ENV) {
        let path = Path::new(&dir).join(name);
        if path.is_file() {
            return Ok(path);
        }
        return Err(LocateError::OverrideMissing {
            var: BINDIR_ENV,
            dir: PathBuf::from(dir),
            name,
        });
    }

    if let Some(bindir) = pg_config_bindir() {
        let path = bindir.join(name);
        if path.is_file() {
            return Ok(path);
        }
        log::debug!("{} not found in {:?}, falling back to PATH", name, bindir);
    }

    Ok(PathBuf::from(name))
}

/// Ask `pg_config` where the server binaries live. The answer cannot change
/// within one process, so probe once and cache it.
fn pg_config_bindir() -> Option<PathBuf> {
    static BINDIR: OnceLock<Option<PathBuf>> = OnceLock::new();
    BINDIR
        .get_or_init(|| {
            let output = Command::new("pg_config").arg("--bindir").output().ok()?;
            if !output.status.success() {
                return None;
            }
            let dir = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if dir.is_empty() {
                None
            } else {
                Some(PathBuf::from(dir))
            }
        })
        .clone()
}
