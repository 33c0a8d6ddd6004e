use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use sorted_core::error::SortedError;

/// Permanently unlinks a file or directory. A missing path is reported
/// and returns `false`, since cleanup callers routinely pass paths that
/// may already be gone.
pub fn delete_permanently(path: &Path) -> Result<bool, SortedError> {
    if !path.exists() {
        info!("path does not exist: {}", path.display());
        return Ok(false);
    }

    if path.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    info!("deleted: {}", path.display());
    Ok(true)
}

/// Moves a path into the trash directory instead of unlinking it, so the
/// deletion is recoverable. Returns the resting place, or `None` when the
/// path did not exist. An occupied name in the trash gets a numeric
/// suffix rather than clobbering the earlier file.
pub fn move_to_trash(path: &Path, trash_dir: &Path) -> Result<Option<PathBuf>, SortedError> {
    if !path.exists() {
        info!("path does not exist: {}", path.display());
        return Ok(None);
    }

    fs::create_dir_all(trash_dir)?;

    let file_name = path.file_name().ok_or_else(|| SortedError::NotAFile {
        path: path.to_path_buf(),
    })?;

    let mut dest = trash_dir.join(file_name);
    let mut counter = 1usize;
    while dest.exists() {
        dest = trash_dir.join(format!("{}.{counter}", file_name.to_string_lossy()));
        counter += 1;
    }

    match fs::rename(path, &dest) {
        Ok(()) => {}
        // rename fails across filesystems; fall back to copy + remove
        Err(_) if path.is_file() => {
            fs::copy(path, &dest)?;
            fs::remove_file(path)?;
        }
        Err(err) => return Err(err.into()),
    }

    info!("moved to trash: {} -> {}", path.display(), dest.display());
    Ok(Some(dest))
}
