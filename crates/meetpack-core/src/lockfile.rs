//! `package-lock.json` sanitizing.
//!
//! npm hashes git dependencies by packing the checked-out repository, and the
//! resulting checksum differs between architectures. Git dependencies are
//! already pinned by commit, so their `integrity` fields are removed.

use serde_json::Value;

use crate::SourceTree;

const GIT_SSH_PREFIX: &str = "git+ssh://";

/// Remove `integrity` from every git-sourced package in the source tree's
/// lockfile. The file is rewritten only when something was removed.
///
/// Returns whether the lockfile changed.
pub fn strip_git_integrity(source: &SourceTree) -> crate::Result<bool> {
    let path = source.package_lock();
    let content = std::fs::read_to_string(&path).map_err(|e| crate::Error::LockfileRead {
        path: path.clone(),
        source: e,
    })?;
    let mut lockfile: Value =
        serde_json::from_str(&content).map_err(|e| crate::Error::LockfileParse {
            path: path.clone(),
            source: e,
        })?;

    let stripped = strip_packages(&mut lockfile);
    if stripped == 0 {
        tracing::debug!(path = %path.display(), "lockfile has no git integrity checksums");
        return Ok(false);
    }

    let rendered = serde_json::to_string(&lockfile).map_err(|e| crate::Error::LockfileParse {
        path: path.clone(),
        source: e,
    })?;
    std::fs::write(&path, rendered).map_err(|e| crate::Error::LockfileWrite {
        path: path.clone(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), stripped, "removed git integrity checksums");
    Ok(true)
}

/// Strip in place; returns the number of packages touched.
pub fn strip_packages(lockfile: &mut Value) -> usize {
    let Some(packages) = lockfile.get_mut("packages").and_then(Value::as_object_mut) else {
        return 0;
    };

    let mut stripped = 0;
    for package in packages.values_mut() {
        let Some(entry) = package.as_object_mut() else {
            continue;
        };
        let from_git = entry
            .get("resolved")
            .and_then(Value::as_str)
            .is_some_and(|resolved| resolved.starts_with(GIT_SSH_PREFIX));
        if from_git && entry.shift_remove("integrity").is_some() {
            stripped += 1;
        }
    }
    stripped
}
