use std::fs;
use std::sync::OnceLock;

static CLEAN: OnceLock<()> = OnceLock::new();

/// Remove any template a previous (possibly stubbed) run left behind, so
/// this suite provisions one with the real binaries. Runs once per binary.
pub(crate) fn reset_template() {
    CLEAN.get_or_init(|| {
        let _ = fs::remove_dir_all(seedbed::template_path());
    });
}
