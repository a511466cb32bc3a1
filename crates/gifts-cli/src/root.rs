use std::path::{Path, PathBuf};

/// Resolve the data root directory.
///
/// Priority: explicit `--root` / `GIFTS_ROOT`, then the nearest ancestor of
/// the working directory containing `.gifts/`, then the nearest containing
/// `.git/`, then the working directory itself.
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_root_from(explicit, &cwd)
}

fn resolve_root_from(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    find_up(cwd, ".gifts")
        .or_else(|| find_up(cwd, ".git"))
        .unwrap_or_else(|| cwd.to_path_buf())
}

/// Nearest ancestor of `start` (inclusive) containing the marker directory.
fn find_up(start: &Path, marker: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_dir())
        .map(Path::to_path_buf)
}
