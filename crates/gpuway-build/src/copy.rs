//! Recursive directory mirroring.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::builder::BuildError;

/// Mirror every directory and regular file under `src` into `dst`.
///
/// `dst` and any missing parents are created. Files are copied byte for byte
/// and overwrite existing files of the same name. Symlinks and other special
/// entries are skipped.
///
/// Returns the number of files copied.
///
/// # Errors
///
/// Returns [`BuildError::Io`] naming the offending path on the first failure.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize, BuildError> {
    let mut copied = 0;

    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| src.to_path_buf(), Path::to_path_buf);
            BuildError::Io {
                path,
                source: io::Error::from(e),
            }
        })?;

        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|source| io_error(&target, source))?;
        } else if file_type.is_file() {
            copy_file(entry.path(), &target)?;
            copied += 1;
        } else {
            tracing::debug!(path = %entry.path().display(), "Skipping non-regular file");
        }
    }

    Ok(copied)
}

/// Copy one file. Both handles are closed before this returns.
fn copy_file(from: &Path, to: &Path) -> Result<(), BuildError> {
    let mut reader = fs::File::open(from).map_err(|source| io_error(from, source))?;
    let mut writer = fs::File::create(to).map_err(|source| io_error(to, source))?;
    io::copy(&mut reader, &mut writer).map_err(|source| io_error(to, source))?;
    writer.sync_all().map_err(|source| io_error(to, source))?;
    tracing::debug!(from = %from.display(), to = %to.display(), "Copied file");
    Ok(())
}

fn io_error(path: &Path, source: io::Error) -> BuildError {
    BuildError::Io {
        path: PathBuf::from(path),
        source,
    }
}
