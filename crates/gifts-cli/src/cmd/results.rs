use crate::cmd::submit::print_result;
use crate::output::print_json;
use anyhow::bail;
use gifts_core::identity::validate_email;
use gifts_core::store::{FsResultStore, ResultStore};
use std::path::Path;

pub fn run(root: &Path, email: &str, json: bool) -> anyhow::Result<()> {
    let email = email.trim();
    validate_email(email)?;

    let store = FsResultStore::new(root);
    let Some(result) = store.find_latest_by_email(email)? else {
        bail!("no stored results for {email}");
    };

    if json {
        return print_json(&result);
    }
    print_result(&result);
    println!(
        "\nTaken: {}",
        result.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}
