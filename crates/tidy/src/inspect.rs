use std::path::{Path, PathBuf};
use log::{debug, warn};
use crate::collision::NameClaims;
use crate::ffprobe::ExternalDecoder;
use crate::naming;
use crate::playability;
use crate::tags;

/// Everything decided about one discovered file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Absolute path at discovery time
    pub path: PathBuf,
    /// File name at discovery time
    pub old_name: String,
    /// Target file name, equal to `old_name` when nothing changes
    pub new_name: String,
    /// `new_name != old_name`
    pub will_rename: bool,
    pub playable: bool,
    /// The file had no bytes; probes and naming were skipped
    pub zero_byte: bool,
    /// File size in bytes
    pub size: u64,
}

impl FileRecord {
    /// Directory the file lives in
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Path after the planned rename
    pub fn new_path(&self) -> PathBuf {
        self.dir().join(&self.new_name)
    }

    /// A rename is planned and allowed to happen
    pub fn should_rename(&self) -> bool {
        self.will_rename && self.playable
    }
}

/// Builds records one file at a time, sharing the run's claimed names
pub struct Inspector<'a> {
    pattern: &'a str,
    decoder: Option<&'a ExternalDecoder>,
    claims: NameClaims,
}

impl<'a> Inspector<'a> {
    pub fn new(pattern: &'a str, decoder: Option<&'a ExternalDecoder>) -> Self {
        Self {
            pattern,
            decoder,
            claims: NameClaims::new(),
        }
    }

    /// Inspect a single file. Never fails; problems degrade the record.
    pub async fn inspect(&mut self, path: &Path) -> FileRecord {
        let old_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let size = match std::fs::metadata(path) {
            Ok(meta) => Some(meta.len()),
            Err(e) => {
                warn!("Failed to stat {}: {}", path.display(), e);
                None
            }
        };

        if size == Some(0) {
            debug!("{} is empty, marking broken", path.display());
            return FileRecord {
                path: path.to_path_buf(),
                new_name: old_name.clone(),
                old_name,
                will_rename: false,
                playable: false,
                zero_byte: true,
                size: 0,
            };
        }

        let playable = playability::check(path, self.decoder).await.verdict();

        let new_name = self.plan_name(path, &old_name);
        FileRecord {
            path: path.to_path_buf(),
            will_rename: new_name != old_name,
            new_name,
            old_name,
            playable,
            zero_byte: false,
            size: size.unwrap_or(0),
        }
    }

    fn plan_name(&mut self, path: &Path, old_name: &str) -> String {
        let tags = tags::read_tags(path);
        let base = naming::build_name(self.pattern, &tags);
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        let dir = path.parent().unwrap_or_else(|| Path::new(""));

        self.claims.resolve(dir, &base, &ext, Some(old_name))
    }
}
