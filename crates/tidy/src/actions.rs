use std::fs;
use std::io::{self, Write};
use anyhow::{Context, Result};
use log::{error, info};
use crate::inspect::FileRecord;

/// Outcome counts for one mutation phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseResult {
    /// Files acted on, or that would have been in preview mode
    pub done: usize,
    pub failed: usize,
}

/// Delete every broken file, or just announce it in preview mode.
///
/// A failed delete is logged and leaves the file in place; the rest still run.
pub fn delete_broken<W: Write>(out: &mut W, records: &[FileRecord], dry_run: bool) -> io::Result<PhaseResult> {
    let mut result = PhaseResult::default();

    for record in records.iter().filter(|r| !r.playable) {
        if dry_run {
            writeln!(out, "Would delete: {}", record.path.display())?;
            result.done += 1;
            continue;
        }

        match delete_file(record) {
            Ok(()) => {
                writeln!(out, "Deleted: {}", record.path.display())?;
                result.done += 1;
            }
            Err(e) => {
                error!("{:#}", e);
                result.failed += 1;
            }
        }
    }

    Ok(result)
}

fn delete_file(record: &FileRecord) -> Result<()> {
    fs::remove_file(&record.path)
        .with_context(|| format!("Failed to delete {}", record.path.display()))?;
    info!("Deleted {}", record.path.display());
    Ok(())
}

/// Rename every playable file that has a new name, within its own directory.
///
/// A failed rename is logged and leaves the file under its old name.
pub fn rename_playable<W: Write>(out: &mut W, records: &[FileRecord]) -> io::Result<PhaseResult> {
    let mut result = PhaseResult::default();

    for record in records.iter().filter(|r| r.should_rename()) {
        match rename_file(record) {
            Ok(()) => {
                writeln!(out, "Renamed: {} -> {}", record.old_name, record.new_name)?;
                result.done += 1;
            }
            Err(e) => {
                error!("{:#}", e);
                result.failed += 1;
            }
        }
    }

    Ok(result)
}

fn rename_file(record: &FileRecord) -> Result<()> {
    let target = record.new_path();
    // Last-moment check; the plan was made against an earlier view of the directory
    if target.exists() {
        anyhow::bail!(
            "Not renaming {}: {} already exists",
            record.path.display(),
            target.display()
        );
    }

    fs::rename(&record.path, &target)
        .with_context(|| format!("Failed to rename {} to {}", record.path.display(), target.display()))?;
    info!("Renamed {} -> {}", record.path.display(), target.display());
    Ok(())
}
