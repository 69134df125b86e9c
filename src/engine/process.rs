//! Signal helpers for the owned server process.

use std::io;
use std::process::Child;

/// Check if a process is still alive.
#[cfg(unix)]
pub fn pid_is_alive(pid: u32) -> bool {
    if pid == 0 {
        return false;
    }

    // Signal 0 doesn't send a signal but checks if the process exists.
    // EPERM means it exists but belongs to someone else.
    let result = unsafe { libc::kill(pid as libc::pid_t, 0) };
    result == 0 || io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}

#[cfg(not(unix))]
pub fn pid_is_alive(pid: u32) -> bool {
    pid != 0 // Non-Unix: can't check liveness, assume running
}

/// Request graceful termination of an owned child process.
///
/// On Unix this delivers SIGINT (the server's fast-shutdown request) and
/// returns without waiting for the process to exit.
#[cfg(unix)]
pub fn interrupt(child: &mut Child) -> io::Result<()> {
    let result = unsafe { libc::kill(child.id() as libc::pid_t, libc::SIGINT) };
    if result == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
pub fn interrupt(child: &mut Child) -> io::Result<()> {
    // No signals to send; a hard kill is the only termination available.
    child.kill()
}
