use gifts_core::{io, paths};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    io::ensure_dir(&paths::results_dir(root))?;
    io::ensure_dir(&paths::plans_dir(root))?;
    println!("Initialized {}", paths::gifts_dir(root).display());
    Ok(())
}
