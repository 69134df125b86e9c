//! Per-instance working directories.
//!
//! Every instance gets a fresh, uniquely named copy of the template so
//! concurrently running tests never share state. The template itself is
//! never mutated; instance-specific configuration is layered onto the copy
//! before launch.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::defaults;
use crate::endpoint::Endpoint;
use crate::engine::template::{append_conf, ProvisionError, TemplateDir};

/// An exclusively owned working directory, ready to launch a server in.
#[derive(Debug)]
pub struct Workdir {
    path: PathBuf,
    endpoint: Endpoint,
}

impl Workdir {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Remove the working directory, best effort.
    pub(crate) fn discard(self) {
        let _ = fs::remove_dir_all(&self.path);
    }

    pub(crate) fn into_parts(self) -> (PathBuf, Endpoint) {
        (self.path, self.endpoint)
    }
}

/// Materialize a fresh working directory from the template.
///
/// The copy preserves file attributes; the instance socket-directory
/// override is appended to the copied configuration afterwards. On any
/// failure the partially built directory is removed and only this
/// instance is affected.
pub fn provision(template: &TemplateDir) -> Result<Workdir, ProvisionError> {
    let path = tempfile::Builder::new()
        .prefix(defaults::WORKDIR_PREFIX)
        .tempdir()
        .map_err(|e| ProvisionError::Workdir(e.to_string()))?
        .keep();

    let endpoint = Endpoint::for_workdir(&path);

    if let Err(e) = populate(template, &path, &endpoint) {
        let _ = fs::remove_dir_all(&path);
        return Err(e);
    }

    log::debug!("Provisioned instance directory {:?}", path);
    Ok(Workdir { path, endpoint })
}

fn populate(template: &TemplateDir, path: &Path, endpoint: &Endpoint) -> Result<(), ProvisionError> {
    copy_tree(template.path(), path)
        .map_err(|e| ProvisionError::Copy(format!("{} -> {}: {}", template.path().display(), path.display(), e)))?;

    fs::create_dir_all(endpoint.socket_dir())
        .map_err(|e| ProvisionError::Workdir(format!("socket directory: {}", e)))?;

    let overrides = format!(
        "\nunix_socket_directories = '{}'\n",
        endpoint.socket_dir().display()
    );
    append_conf(&path.join(defaults::CONF_FILE_NAME), &overrides)
        .map_err(|e| ProvisionError::Config(format!("{}: {}", defaults::CONF_FILE_NAME, e)))
}

/// Recursively copy `src` into the existing directory `dst`, preserving
/// permissions. The server refuses to start on a data directory with
/// open permissions.
fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let target = dst.join(entry.file_name());

        if file_type.is_dir() {
            fs::create_dir(&target)?;
            fs::set_permissions(&target, entry.metadata()?.permissions())?;
            copy_tree(&entry.path(), &target)?;
        } else if file_type.is_symlink() {
            #[cfg(unix)]
            std::os::unix::fs::symlink(fs::read_link(entry.path())?, &target)?;
            #[cfg(not(unix))]
            fs::copy(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
