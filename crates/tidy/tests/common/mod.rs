#![allow(dead_code)]

use lofty::config::WriteOptions;
use lofty::prelude::*;
use lofty::tag::{Tag, TagType};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tidy::RunOptions;

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, joint stereo, no padding
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
const FRAME_LEN: usize = 417;

/// Write a short silent MP3 made of constant-bitrate frames.
///
/// Generated on the fly so the repository carries no binary fixtures.
pub fn write_mp3(path: &Path, frames: usize) {
    let mut data = Vec::with_capacity(frames * FRAME_LEN);
    for _ in 0..frames {
        let mut frame = vec![0u8; FRAME_LEN];
        frame[..4].copy_from_slice(&FRAME_HEADER);
        data.extend_from_slice(&frame);
    }
    fs::write(path, data).unwrap();
}

/// Write a silent MP3 carrying an ID3v2 tag
pub fn write_tagged_mp3(path: &Path, artist: Option<&str>, title: Option<&str>) {
    write_mp3(path, 100);

    let mut tag = Tag::new(TagType::Id3v2);
    if let Some(artist) = artist {
        tag.set_artist(artist.to_string());
    }
    if let Some(title) = title {
        tag.set_title(title.to_string());
    }
    tag.save_to_path(path, WriteOptions::default()).unwrap();
}

/// Options for a run over `root` with everything else at defaults
pub fn options(root: &Path) -> RunOptions {
    let mut opts = RunOptions::default_config();
    opts.root = Some(root.to_path_buf());
    opts.use_ffprobe = false;
    opts
}

/// File names and contents under `root`, recursively
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    for entry in walkdir::WalkDir::new(root) {
        let entry = entry.unwrap();
        if entry.file_type().is_file() {
            let rel = entry.path().strip_prefix(root).unwrap().to_path_buf();
            files.insert(rel, fs::read(entry.path()).unwrap());
        }
    }
    files
}

/// Sorted file names directly inside `dir`
pub fn names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
