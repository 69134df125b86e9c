//! Seedbed - disposable PostgreSQL servers for integration tests.
//!
//! Starts a real `postgres` process, quickly and conveniently, for tests
//! that want an actual database instead of a mock. The first start in a
//! process initializes a shared template data directory once; every
//! instance then gets its own throwaway copy of that template, bound to a
//! private Unix socket, and removes it again on [`Postgres::stop`]:
//!
//! ```no_run
//! let mut pg = seedbed::Postgres::start().expect("start postgres");
//! // open a connection with pg.conninfo(), run queries...
//! pg.stop().expect("stop postgres");
//! ```
//!
//! This crate is not very configurable by design: instances always listen
//! on a private socket directory only, with durability syncing disabled
//! for speed.

mod defaults;
pub mod error;

pub mod endpoint;
pub mod engine;

pub use error::{Error, Result};

pub use endpoint::Endpoint;
pub use engine::instance::Workdir;
pub use engine::launch::LaunchError;
pub use engine::lifecycle::{Postgres, ShutdownError};
pub use engine::locate::{LocateError, BINDIR_ENV};
pub use engine::process;
pub use engine::readiness::{await_ready, TimeoutError};
pub use engine::template::{init_runs, template_path, ProvisionError, TemplateDir};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
