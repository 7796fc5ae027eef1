use std::io::{self, Write};
use std::path::Path;
use humansize::{format_size, DECIMAL};
use crate::inspect::FileRecord;

/// How many discovered files are listed before eliding the rest
pub const PREVIEW_LIMIT: usize = 30;

/// Aggregate counts for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub playable: usize,
    pub broken: usize,
    /// Renames done, or planned in preview mode
    pub renamed: usize,
    /// Deletions done (or planned in preview mode); `None` when deletion was not requested
    pub deleted: Option<usize>,
    /// Deletes and renames that failed
    pub failed: usize,
    pub dry_run: bool,
}

/// Print the capped list of discovered files followed by one status line per file
pub fn write_plan<W: Write>(out: &mut W, root: &Path, records: &[FileRecord]) -> io::Result<()> {
    if records.is_empty() {
        writeln!(out, "No audio files found in {}", root.display())?;
        return Ok(());
    }

    writeln!(out, "Found {} audio file(s) in {}:", records.len(), root.display())?;
    for record in records.iter().take(PREVIEW_LIMIT) {
        writeln!(out, "  {} ({})", relative(root, &record.path), format_size(record.size, DECIMAL))?;
    }
    if records.len() > PREVIEW_LIMIT {
        writeln!(out, "  ... and {} more", records.len() - PREVIEW_LIMIT)?;
    }
    writeln!(out)?;

    for record in records {
        write_status(out, root, record)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_status<W: Write>(out: &mut W, root: &Path, record: &FileRecord) -> io::Result<()> {
    let verdict = if record.playable { "[OK]    " } else { "[BROKEN]" };
    let empty = if record.zero_byte { " (empty file)" } else { "" };
    let action = if record.should_rename() {
        format!("-> {}", record.new_name)
    } else if record.will_rename {
        format!("no change (broken, would be {})", record.new_name)
    } else {
        "no change".to_string()
    };
    writeln!(out, "{} {}{}: {}", verdict, relative(root, &record.path), empty, action)
}

/// Print the aggregate counts
pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    let (renamed, deleted) = if summary.dry_run {
        ("would rename", "would delete")
    } else {
        ("renamed", "deleted")
    };

    write!(
        out,
        "Summary: {} playable, {} broken, {} {}",
        summary.playable, summary.broken, summary.renamed, renamed
    )?;
    if let Some(count) = summary.deleted {
        write!(out, ", {} {}", count, deleted)?;
    }
    if summary.failed > 0 {
        write!(out, ", {} failed", summary.failed)?;
    }
    writeln!(out)?;

    if summary.dry_run {
        writeln!(out, "(dry run: no changes made)")?;
    }
    Ok(())
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
