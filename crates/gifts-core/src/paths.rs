use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const GIFTS_DIR: &str = ".gifts";
pub const RESULTS_DIR: &str = ".gifts/results";
pub const PLANS_DIR: &str = ".gifts/plans";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn gifts_dir(root: &Path) -> PathBuf {
    root.join(GIFTS_DIR)
}

pub fn results_dir(root: &Path) -> PathBuf {
    root.join(RESULTS_DIR)
}

pub fn plans_dir(root: &Path) -> PathBuf {
    root.join(PLANS_DIR)
}

pub fn result_path(root: &Path, id: &str) -> PathBuf {
    results_dir(root).join(format!("{id}.yaml"))
}

/// `key` must already be sanitized (see [`crate::sanitize::store_key`]).
pub fn plan_path(root: &Path, key: &str) -> PathBuf {
    plans_dir(root).join(format!("{key}.yaml"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
