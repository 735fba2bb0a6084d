use std::path::Path;

use meetpack_core::{SourceTree, lockfile};

pub async fn sanitize_lockfile(input: &Path) -> anyhow::Result<()> {
    let source = SourceTree::new(input);
    if lockfile::strip_git_integrity(&source)? {
        println!(
            "Removed git dependency checksums from {}",
            source.package_lock().display()
        );
    } else {
        println!("{} needs no changes", source.package_lock().display());
    }
    Ok(())
}
