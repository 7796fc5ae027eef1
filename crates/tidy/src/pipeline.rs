use std::io::Write;
use anyhow::{Context, Result};
use log::info;
use crate::actions;
use crate::config::RunOptions;
use crate::ffprobe::ExternalDecoder;
use crate::inspect::{FileRecord, Inspector};
use crate::report::{self, Summary};
use crate::scan;

/// Run the whole scan, inspect, report, act sequence.
///
/// Looks for the external decoder first unless it is disabled in `opts`.
pub async fn run<W: Write>(opts: &RunOptions, out: &mut W) -> Result<Summary> {
    let decoder = if opts.use_ffprobe {
        ExternalDecoder::detect(&opts.ffprobe_bin).await
    } else {
        info!("External decoder disabled");
        None
    };
    run_with_decoder(opts, decoder.as_ref(), out).await
}

/// Same as [`run`] with the external decoder chosen by the caller
pub async fn run_with_decoder<W: Write>(
    opts: &RunOptions,
    decoder: Option<&ExternalDecoder>,
    out: &mut W,
) -> Result<Summary> {
    let mut opts = opts.clone();
    let root = opts.validate()?;

    let files = scan::discover(&root, opts.recursive, &opts.extensions)?;
    let root = std::fs::canonicalize(&root)
        .with_context(|| format!("Failed to resolve {}", root.display()))?;

    // One file at a time; the next starts only after the previous record is final
    let mut inspector = Inspector::new(&opts.pattern, decoder);
    let mut records: Vec<FileRecord> = Vec::with_capacity(files.len());
    for path in &files {
        records.push(inspector.inspect(path).await);
    }

    report::write_plan(out, &root, &records)?;

    let mut summary = Summary {
        playable: records.iter().filter(|r| r.playable).count(),
        broken: records.iter().filter(|r| !r.playable).count(),
        dry_run: opts.dry_run,
        ..Summary::default()
    };

    if opts.delete_bad {
        let phase = if summary.broken > 0 {
            actions::delete_broken(out, &records, opts.dry_run)?
        } else {
            actions::PhaseResult::default()
        };
        summary.deleted = Some(phase.done);
        summary.failed += phase.failed;
    }

    if opts.dry_run {
        summary.renamed = records.iter().filter(|r| r.should_rename()).count();
    } else {
        let phase = actions::rename_playable(out, &records)?;
        summary.renamed = phase.done;
        summary.failed += phase.failed;
    }

    report::write_summary(out, &summary)?;
    info!(
        "Run complete: {} playable, {} broken, {} renamed",
        summary.playable, summary.broken, summary.renamed
    );
    Ok(summary)
}
