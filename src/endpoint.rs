//! Connection endpoints for provisioned instances.

use std::path::{Path, PathBuf};

use crate::defaults;

/// Connection information for one instance.
///
/// Derived from the instance's working directory and read-only afterwards.
/// The descriptor is only meaningful while the owning instance is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    socket_dir: PathBuf,
    port: u16,
}

impl Endpoint {
    /// Derive the endpoint for an instance rooted at `workdir`.
    ///
    /// The socket directory lives inside the working directory, so two
    /// instances can never collide and teardown removes it with the rest.
    pub(crate) fn for_workdir(workdir: &Path) -> Self {
        Self {
            socket_dir: workdir.join(defaults::SOCKET_DIR_NAME),
            port: defaults::PORT,
        }
    }

    /// Directory the server binds its Unix socket in.
    pub fn socket_dir(&self) -> &Path {
        &self.socket_dir
    }

    /// Port number embedded in the socket file name.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Path of the socket file the server creates once it accepts
    /// connections. Its existence is the readiness signal.
    pub fn socket_path(&self) -> PathBuf {
        self.socket_dir.join(format!(".s.PGSQL.{}", self.port))
    }

    /// Key/value connection string for libpq-compatible clients.
    ///
    /// Local trust only; no credentials are involved.
    pub fn conninfo(&self) -> String {
        format!(
            "host={} port={} user={} dbname=postgres",
            self.socket_dir.display(),
            self.port,
            current_user(),
        )
    }
}

/// The bootstrap superuser created by `initdb` is named after the OS user.
fn current_user() -> String {
    std::env::var("USER")
        .ok()
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| "postgres".to_string())
}
