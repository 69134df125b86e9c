//! One-time provisioning of the shared template data directory.
//!
//! The template is built at most once per process and shared read-only by
//! every instance, which only ever copies it. A template left behind by
//! an earlier process invocation is reused as-is.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use thiserror::Error;

use crate::defaults;
use crate::engine::locate::{self, LocateError};

/// Errors that can occur during template or instance provisioning.
///
/// Carries rendered messages rather than source errors so a template
/// failure can be cached and replayed to every caller in the process.
#[derive(Error, Debug, Clone)]
pub enum ProvisionError {
    /// The template directory could not be created
    #[error("failed to create template directory: {0}")]
    Template(String),

    /// `initdb` could not run or reported failure
    #[error("initdb failed: {0}")]
    Init(String),

    /// Writing configuration overrides failed
    #[error("failed to write configuration: {0}")]
    Config(String),

    /// The instance working directory could not be set up
    #[error("failed to create instance directory: {0}")]
    Workdir(String),

    /// Copying the template into the working directory failed
    #[error("failed to copy template: {0}")]
    Copy(String),

    /// An engine executable could not be resolved
    #[error(transparent)]
    Locate(#[from] LocateError),
}

/// The shared, read-only baseline data directory.
#[derive(Debug)]
pub struct TemplateDir {
    path: PathBuf,
}

impl TemplateDir {
    #[cfg(test)]
    pub(crate) fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

static TEMPLATE: OnceLock<Result<TemplateDir, ProvisionError>> = OnceLock::new();
static INIT_RUNS: AtomicU32 = AtomicU32::new(0);

/// Location of the template data directory.
pub fn template_path() -> PathBuf {
    std::env::temp_dir().join(defaults::TEMPLATE_DIR_NAME)
}

/// Number of times template initialization actually ran in this process.
///
/// Stays at zero when a template from an earlier process was reused.
pub fn init_runs() -> u32 {
    INIT_RUNS.load(Ordering::SeqCst)
}

/// Return the process-wide template, building it on first call.
///
/// The expensive initialization runs at most once even under concurrent
/// first use; all callers, including later ones, observe the same success
/// or failure without re-running any side effects.
pub fn ensure() -> Result<&'static TemplateDir, ProvisionError> {
    TEMPLATE
        .get_or_init(|| build(template_path()))
        .as_ref()
        .map_err(|e| e.clone())
}

fn build(path: PathBuf) -> Result<TemplateDir, ProvisionError> {
    // Exclusive create doubles as the cross-process guard: if the
    // directory exists, a prior run (possibly from an earlier process
    // invocation) already completed it.
    match fs::create_dir(&path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            log::debug!("Reusing existing template at {:?}", path);
            return Ok(TemplateDir { path });
        }
        Err(e) => {
            return Err(ProvisionError::Template(format!(
                "{}: {}",
                path.display(),
                e
            )));
        }
    }

    INIT_RUNS.fetch_add(1, Ordering::SeqCst);
    log::info!("Initializing template data directory at {:?}", path);

    if let Err(e) = initialize(&path) {
        // A half-initialized template must never be reused by a later test.
        let _ = fs::remove_dir_all(&path);
        return Err(e);
    }

    Ok(TemplateDir { path })
}

fn initialize(path: &Path) -> Result<(), ProvisionError> {
    let initdb = locate::initdb()?;

    let output = Command::new(&initdb)
        .arg("-D")
        .arg(path)
        .output()
        .map_err(|e| ProvisionError::Init(format!("failed to run {}: {}", initdb.display(), e)))?;

    if !output.status.success() {
        return Err(ProvisionError::Init(format!(
            "{} exited with {}: {}",
            initdb.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    append_conf(&path.join(defaults::CONF_FILE_NAME), defaults::TEMPLATE_CONF).map_err(|e| {
        ProvisionError::Config(format!("{}: {}", defaults::CONF_FILE_NAME, e))
    })
}

/// Append overrides to a generated configuration file. Later settings win,
/// so appending is enough to override what `initdb` wrote.
pub(crate) fn append_conf(path: &Path, text: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().append(true).open(path)?;
    file.write_all(text.as_bytes())
}
