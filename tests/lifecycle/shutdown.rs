//! Teardown: cleanup completeness, double-stop, Drop, crash resilience.

use std::thread;
use std::time::Duration;

use seedbed::{Postgres, ShutdownError};

use crate::fixture::stub_bindir;

#[test]
fn test_stop_removes_workdir() {
    stub_bindir();

    let mut pg = Postgres::start().expect("start");
    let dir = pg.workdir().to_path_buf();
    assert!(dir.exists());

    pg.stop().expect("stop");
    assert!(!dir.exists(), "working directory survived stop");
}

#[test]
fn test_double_stop_is_a_caller_error() {
    stub_bindir();

    let mut pg = Postgres::start().expect("start");
    pg.stop().expect("first stop");

    match pg.stop() {
        Err(ShutdownError::AlreadyStopped) => {}
        other => panic!("expected AlreadyStopped, got {:?}", other),
    }
}

#[test]
fn test_drop_reclaims_resources() {
    stub_bindir();

    let dir = {
        let pg = Postgres::start().expect("start");
        pg.workdir().to_path_buf()
    };
    assert!(!dir.exists(), "working directory survived drop");
}

#[cfg(unix)]
#[test]
fn test_stop_tolerates_already_exited_server() {
    stub_bindir();

    let mut pg = Postgres::start().expect("start");
    let dir = pg.workdir().to_path_buf();

    // Take the server down behind the handle's back.
    let rc = unsafe { libc::kill(pg.pid() as libc::pid_t, libc::SIGTERM) };
    assert_eq!(rc, 0, "failed to deliver SIGTERM");
    thread::sleep(Duration::from_millis(500));

    // stop() must still reclaim the directory and report success.
    pg.stop().expect("stop after server exit");
    assert!(!dir.exists());
}
