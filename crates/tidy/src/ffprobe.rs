use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use log::{debug, info};
use tokio::process::Command;

/// An ffprobe binary that answered `-version` at startup.
///
/// Holding one of these means the external decoder is available; its absence
/// (`None` at the call site) means "no opinion" rather than "unplayable".
#[derive(Debug, Clone)]
pub struct ExternalDecoder {
    bin: PathBuf,
}

impl ExternalDecoder {
    /// Check whether `bin` runs. Returns `None` when it cannot be executed or fails.
    pub async fn detect(bin: &Path) -> Option<Self> {
        let output = Command::new(bin)
            .arg("-version")
            .output()
            .await;

        match output {
            Ok(out) if out.status.success() => {
                info!("External decoder available: {}", bin.display());
                Some(Self { bin: bin.to_path_buf() })
            }
            Ok(out) => {
                info!("External decoder {} exited with {}, skipping decode checks", bin.display(), out.status);
                None
            }
            Err(e) => {
                info!("External decoder {} not available ({}), skipping decode checks", bin.display(), e);
                None
            }
        }
    }

    /// Decode verdict for one file. Any failure counts as unplayable.
    pub async fn verdict(&self, file_path: &Path) -> bool {
        match self.probe_duration(file_path).await {
            Ok(secs) => {
                debug!("ffprobe: {} has duration {}s", file_path.display(), secs);
                secs > 0.0
            }
            Err(e) => {
                debug!("ffprobe: {:#}", e);
                false
            }
        }
    }

    /// Ask ffprobe for the container duration in seconds
    pub async fn probe_duration(&self, file_path: &Path) -> Result<f64> {
        let mut cmd = Command::new(&self.bin);
        cmd.arg("-v")
            .arg("error")
            .arg("-show_entries")
            .arg("format=duration")
            .arg("-of")
            .arg("default=noprint_wrappers=1:nokey=1")
            .arg(file_path);

        let output = cmd
            .output()
            .await
            .with_context(|| format!("Failed to execute ffprobe for: {}", file_path.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            anyhow::bail!(
                "ffprobe failed (exit code {}) for {}: {}",
                exit_code,
                file_path.display(),
                stderr.trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_duration(&stdout)
            .with_context(|| format!("Unusable ffprobe duration for {}: {:?}", file_path.display(), stdout.trim()))
    }
}

/// Parse the first non-empty line of ffprobe output as seconds.
///
/// Returns `None` for "N/A", non-numeric, non-finite or non-positive values.
pub fn parse_duration(output: &str) -> Option<f64> {
    let line = output.lines().map(str::trim).find(|l| !l.is_empty())?;
    let secs: f64 = line.parse().ok()?;
    if secs.is_finite() && secs > 0.0 {
        Some(secs)
    } else {
        None
    }
}
