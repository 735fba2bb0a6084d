//! Metadata-preserving file and directory copies.

use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Copy a single file, keeping permissions and access/modification times.
pub fn copy_file(src: &Path, dst: &Path) -> Result<(), CopyError> {
    fs::copy(src, dst).map_err(|e| CopyError::CopyFile {
        path: src.to_path_buf(),
        source: e,
    })?;

    copy_times(src, dst).map_err(|e| CopyError::Metadata {
        path: dst.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(src = %src.display(), dst = %dst.display(), "copied file");
    Ok(())
}

fn copy_times(src: &Path, dst: &Path) -> std::io::Result<()> {
    let metadata = fs::metadata(src)?;
    let times = FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);
    // Read-only handle: the destination may have inherited a read-only mode.
    File::open(dst)?.set_times(times)
}

fn copy_dir_metadata(src: &Path, dst: &Path) -> std::io::Result<()> {
    copy_times(src, dst)?;
    fs::set_permissions(dst, fs::metadata(src)?.permissions())
}

/// Recursively copy `src` to `dst`. `dst` must not exist yet. Directory
/// permissions and times are carried over along with file metadata.
///
/// Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize, CopyError> {
    if !src.is_dir() {
        return Err(CopyError::SourceMissing(src.to_path_buf()));
    }
    if dst.exists() {
        return Err(CopyError::DestinationExists(dst.to_path_buf()));
    }

    let mut copied = 0;
    let mut dirs = Vec::new();
    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| CopyError::Walk {
            path: src.to_path_buf(),
            source: e,
        })?;
        let target = dst.join(relative_to(entry.path(), src)?);

        if entry.file_type().is_dir() {
            fs::create_dir(&target).map_err(|e| CopyError::CreateDir {
                path: target.clone(),
                source: e,
            })?;
            dirs.push((entry.into_path(), target));
        } else {
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }

    // Deepest first: creating entries inside a directory resets its mtime.
    for (src_dir, dst_dir) in dirs.iter().rev() {
        copy_dir_metadata(src_dir, dst_dir).map_err(|e| CopyError::Metadata {
            path: dst_dir.clone(),
            source: e,
        })?;
    }

    Ok(copied)
}

/// `path` with the `root` prefix removed.
pub fn relative_to<'p>(path: &'p Path, root: &Path) -> Result<&'p Path, CopyError> {
    path.strip_prefix(root).map_err(|e| CopyError::OutsideRoot {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Files directly under `dir` (no recursion) whose extension is `ext`,
/// sorted by name. A missing `dir` matches nothing, like a shell glob.
pub fn files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, CopyError> {
    let mut files = Vec::new();
    if !dir.is_dir() {
        return Ok(files);
    }
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| CopyError::Walk {
            path: dir.to_path_buf(),
            source: e,
        })?;
        // `*.ext` never matches a leading dot.
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        let is_match = entry
            .path()
            .extension()
            .is_some_and(|found| found == ext);
        if is_match && !hidden && !entry.file_type().is_dir() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error("source directory {0} does not exist")]
    SourceMissing(PathBuf),
    #[error("destination {0} already exists")]
    DestinationExists(PathBuf),
    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to copy file {path}")]
    CopyFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to carry over metadata for {path}")]
    Metadata {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to walk {path}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("path {path} is outside the directory being copied")]
    OutsideRoot {
        path: PathBuf,
        source: std::path::StripPrefixError,
    },
}
