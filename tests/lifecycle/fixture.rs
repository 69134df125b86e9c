//! Shared setup for the hermetic lifecycle tests.
//!
//! Real PostgreSQL binaries are slow and may be absent on CI, so these
//! tests drive the full lifecycle against stub `initdb`/`postgres` shell
//! scripts, installed once per test binary through the bindir override.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub(crate) struct TestFixture {
    bindir: PathBuf,
    _dir: tempfile::TempDir,
}

static FIXTURE: OnceLock<TestFixture> = OnceLock::new();

const FAKE_INITDB: &str = r#"#!/bin/sh
dir=
while [ $# -gt 0 ]; do
  case "$1" in
    -D) dir="$2"; shift 2 ;;
    *) shift ;;
  esac
done
[ -n "$dir" ] || exit 64
mkdir -p "$dir" || exit 1
printf '# stub initdb configuration\n' > "$dir/postgresql.conf"
printf '17\n' > "$dir/PG_VERSION"
exit 0
"#;

// The stub server cuts one corner: it knows provisioned instances keep
// their socket directory at <datadir>/sock instead of parsing the config.
const FAKE_POSTGRES: &str = r#"#!/bin/sh
dir=
while [ $# -gt 0 ]; do
  case "$1" in
    -D) dir="$2"; shift 2 ;;
    *) shift ;;
  esac
done
[ -n "$dir" ] || exit 64
mkdir -p "$dir/sock" || exit 1
: > "$dir/sock/.s.PGSQL.5432"
trap 'exit 0' INT TERM
while :; do sleep 0.2; done
"#;

/// Install the stub binaries and point the crate at them. Idempotent;
/// every test calls this first.
pub(crate) fn stub_bindir() -> &'static Path {
    &FIXTURE.get_or_init(init_fixture).bindir
}

fn init_fixture() -> TestFixture {
    let dir = tempfile::tempdir().expect("create stub bindir");
    write_script(&dir.path().join("initdb"), FAKE_INITDB);
    write_script(&dir.path().join("postgres"), FAKE_POSTGRES);

    // A template left behind by an earlier run was built by different
    // binaries; start this suite from a clean slate.
    let _ = fs::remove_dir_all(seedbed::template_path());
    std::env::set_var(seedbed::BINDIR_ENV, dir.path());

    TestFixture {
        bindir: dir.path().to_path_buf(),
        _dir: dir,
    }
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).expect("write stub script");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("chmod stub script");
    }
}
