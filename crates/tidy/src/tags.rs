use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;
use std::time::Duration;
use anyhow::{Context, Result};
use lofty::config::ParseOptions;
use lofty::file::{FileType, TaggedFile};
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::{ItemKey, Tag};
use log::debug;

/// How much of the file the quick metadata probe reads
pub const PREFIX_BYTES: usize = 64 * 1024;

/// Tag values normalized for templating.
///
/// Blank strings are dropped at this boundary so the naming code only ever
/// sees "present and non-empty" or "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackTags {
    pub title: Option<String>,
    pub artists: Vec<String>,
    pub album: Option<String>,
    pub track: Option<u32>,
}

impl TrackTags {
    /// Collect fields from a lofty tag
    pub fn from_tag(tag: &Tag) -> Self {
        let mut artists: Vec<String> = tag
            .get_strings(&ItemKey::TrackArtist)
            .filter_map(non_blank)
            .collect();
        if artists.is_empty() {
            artists.extend(tag.artist().as_deref().and_then(non_blank));
        }

        Self {
            title: tag.title().as_deref().and_then(non_blank),
            artists,
            album: tag.album().as_deref().and_then(non_blank),
            track: tag.track(),
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Read tags from a file. Failures degrade to empty tags.
pub fn read_tags(path: &Path) -> TrackTags {
    match try_read_tags(path) {
        Ok(tags) => tags,
        Err(e) => {
            debug!("No usable tags in {}: {:#}", path.display(), e);
            TrackTags::default()
        }
    }
}

fn try_read_tags(path: &Path) -> Result<TrackTags> {
    let parse_opts = ParseOptions::new().read_properties(false);
    let tagged_file = Probe::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .options(parse_opts)
        .read()
        .with_context(|| format!("Failed to read tags from {}", path.display()))?;

    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
        .context("file has no tags")?;

    Ok(TrackTags::from_tag(tag))
}

/// Quick playability signal from the metadata layer.
///
/// Parses the first [`PREFIX_BYTES`] of the file and asks for a stream duration.
/// If the prefix yields none, parses the whole file. True iff a positive
/// duration is found; any error counts as a negative.
pub fn metadata_probe(path: &Path) -> bool {
    match prefix_duration(path) {
        Ok(d) if !d.is_zero() => return true,
        Ok(_) => debug!("Prefix parse of {} reported no duration", path.display()),
        Err(e) => debug!("Prefix parse of {} failed: {:#}", path.display(), e),
    }

    match full_duration(path) {
        Ok(d) => !d.is_zero(),
        Err(e) => {
            debug!("Full parse of {} failed: {:#}", path.display(), e);
            false
        }
    }
}

fn prefix_duration(path: &Path) -> Result<Duration> {
    let mut buf = Vec::with_capacity(PREFIX_BYTES);
    File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .take(PREFIX_BYTES as u64)
        .read_to_end(&mut buf)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    // The extension stands in for a declared mime type; sniff the bytes otherwise
    let reader = Cursor::new(buf);
    let probe = match path.extension().and_then(FileType::from_ext) {
        Some(file_type) => Probe::with_file_type(reader, file_type),
        None => Probe::new(reader).guess_file_type()?,
    };

    let tagged_file = probe
        .options(ParseOptions::new().read_properties(true))
        .read()?;
    Ok(duration_of(&tagged_file))
}

fn full_duration(path: &Path) -> Result<Duration> {
    let tagged_file = Probe::open(path)?
        .options(ParseOptions::new().read_properties(true))
        .read()?;
    Ok(duration_of(&tagged_file))
}

fn duration_of(tagged_file: &TaggedFile) -> Duration {
    tagged_file.properties().duration()
}
