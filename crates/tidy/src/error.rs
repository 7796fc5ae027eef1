use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a run before any file is inspected
#[derive(Debug, Error)]
pub enum TidyError {
    #[error("no directory given (use --dir)")]
    NoRoot,
    #[error("directory does not exist: {}", .0.display())]
    RootMissing(PathBuf),
    #[error("not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),
    #[error("cannot read directory {}: {}", .0.display(), .1)]
    RootUnreadable(PathBuf, String),
    #[error("naming pattern is empty")]
    EmptyPattern,
    #[error("no audio extensions configured")]
    NoExtensions,
}
