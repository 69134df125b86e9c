//! Fixed parameters for template and instance provisioning.

use std::time::Duration;

/// Name of the shared template data directory under the system temp root.
pub const TEMPLATE_DIR_NAME: &str = "seedbed-template";

/// Prefix for per-instance working directories.
pub const WORKDIR_PREFIX: &str = "seedbed-";

/// Name of the socket directory inside an instance's working directory.
pub const SOCKET_DIR_NAME: &str = "sock";

/// Server configuration file inside a data directory.
pub const CONF_FILE_NAME: &str = "postgresql.conf";

/// File capturing server stdout/stderr inside the working directory.
pub const SERVER_LOG_NAME: &str = "server.log";

/// Port number embedded in the socket file name. TCP listening is disabled,
/// so this never claims a network port.
pub const PORT: u16 = 5432;

/// Readiness poll budget: attempts x interval, roughly one second total.
pub const READY_ATTEMPTS: u32 = 20;
pub const READY_INTERVAL: Duration = Duration::from_millis(50);

/// Overrides appended to the template's configuration file. The socket
/// directory is instance-specific and appended per instance instead.
pub const TEMPLATE_CONF: &str = "\nfsync = off\nlisten_addresses = ''\n";
