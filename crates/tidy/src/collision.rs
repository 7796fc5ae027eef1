use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Target names handed out so far in this run.
///
/// Renames happen after the whole plan is built, so a name can be taken by an
/// earlier record before anything exists on disk under it.
#[derive(Debug, Default)]
pub struct NameClaims {
    claimed: HashSet<PathBuf>,
}

impl NameClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick a free file name in `dir` for `base` + `ext` and claim it.
    ///
    /// Tries `base.ext`, then `base (1).ext`, `base (2).ext`, ... A name is taken if
    /// it exists on disk or was claimed earlier, unless it is `current`, the
    /// file's own name. The disk check is advisory: nothing stops another process
    /// from creating the name between now and the rename.
    pub fn resolve(&mut self, dir: &Path, base: &str, ext: &str, current: Option<&str>) -> String {
        let mut suffix = 0usize;
        loop {
            let candidate = candidate_name(base, ext, suffix);
            let path = dir.join(&candidate);

            let is_current = current == Some(candidate.as_str());
            let taken = self.claimed.contains(&path) || (!is_current && path.exists());
            if !taken {
                self.claimed.insert(path);
                return candidate;
            }
            suffix += 1;
        }
    }
}

fn candidate_name(base: &str, ext: &str, suffix: usize) -> String {
    let stem = if suffix == 0 {
        base.to_string()
    } else {
        format!("{} ({})", base, suffix)
    };
    if ext.is_empty() {
        stem
    } else {
        format!("{}.{}", stem, ext)
    }
}
