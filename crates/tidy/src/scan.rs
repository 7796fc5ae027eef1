use std::path::{Path, PathBuf};
use anyhow::Result;
use walkdir::{DirEntry, WalkDir};
use crate::error::TidyError;
use log::{debug, info, warn};

/// Find audio files under `root`.
///
/// Dotfiles and symlinks are skipped, hidden directories are not entered, and
/// without `recursive` only the root itself is listed. Paths come back sorted
/// by file name within each directory so repeated runs report in the same order.
pub fn discover(root: &Path, recursive: bool, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(TidyError::RootMissing(root.to_path_buf()).into());
    }
    if !root.is_dir() {
        return Err(TidyError::RootNotDirectory(root.to_path_buf()).into());
    }

    let root = std::fs::canonicalize(root)?;
    info!("Scanning directory: {}", root.display());

    let max_depth = if recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(&root)
        .follow_links(false)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    let mut files = Vec::new();
    let mut entry_count = 0;
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            // The root itself could not be listed
            Err(e) if e.depth() == 0 => {
                return Err(TidyError::RootUnreadable(root.clone(), e.to_string()).into());
            }
            Err(e) => {
                warn!("Error reading directory entry: {}", e);
                continue;
            }
        };
        entry_count += 1;

        // file_type() does not follow links, so symlinks are neither files nor dirs here
        if !entry.file_type().is_file() {
            continue;
        }

        if !has_extension(entry.path(), extensions) {
            continue;
        }

        debug!("Found audio file: {}", entry.path().display());
        files.push(entry.into_path());
    }

    info!("Scan complete: {} entries, {} audio files", entry_count, files.len());
    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

/// Case-insensitive match of the file extension against the configured set
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}
