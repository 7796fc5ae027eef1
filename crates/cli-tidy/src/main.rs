use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::io;
use std::path::PathBuf;
use tidy::{pipeline, RunOptions};

/// Rename audio files from their tags and weed out the ones that will not play
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root directory to scan
    #[arg(long)]
    dir: PathBuf,

    /// Include subdirectories
    #[arg(long)]
    recursive: bool,

    /// Naming template; placeholders: {title} {artist} {album} {track}
    #[arg(long)]
    pattern: Option<String>,

    /// Report the plan without deleting or renaming anything
    #[arg(long)]
    dry_run: bool,

    /// Delete files that fail the playability check
    #[arg(long)]
    delete_bad: bool,

    /// Audio file extension to scan for (repeatable, default mp3)
    #[arg(long = "ext")]
    extensions: Vec<String>,

    /// ffprobe binary used for decode checks
    #[arg(long)]
    ffprobe: Option<PathBuf>,

    /// Skip the ffprobe decode check even if ffprobe is installed
    #[arg(long)]
    no_ffprobe: bool,

    /// Path to configuration file (JSON or TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Layer command-line flags over the loaded configuration
    fn apply(self, mut cfg: RunOptions) -> RunOptions {
        cfg.root = Some(self.dir);
        cfg.recursive |= self.recursive;
        cfg.dry_run |= self.dry_run;
        cfg.delete_bad |= self.delete_bad;
        if let Some(pattern) = self.pattern {
            cfg.pattern = pattern;
        }
        if !self.extensions.is_empty() {
            cfg.extensions = self.extensions;
        }
        if let Some(bin) = self.ffprobe {
            cfg.ffprobe_bin = bin;
        }
        if self.no_ffprobe {
            cfg.use_ffprobe = false;
        }
        cfg
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins; otherwise info, or debug with --verbose
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();

    let cfg = RunOptions::load_config(args.config.as_deref())
        .context("Failed to load configuration")?;
    let cfg = args.apply(cfg);

    info!("tunetidy starting");
    debug!("Options: {:?}", cfg);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    pipeline::run(&cfg, &mut out).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "tunetidy", "--dir", "/music", "--dry-run", "--pattern", "{track} {title}",
            "--ext", "flac", "--ext", "mp3", "--no-ffprobe",
        ]);
        let mut base = RunOptions::default_config();
        base.delete_bad = true;

        let cfg = args.apply(base);
        assert_eq!(cfg.root, Some(PathBuf::from("/music")));
        assert!(cfg.dry_run);
        assert!(cfg.delete_bad);
        assert!(!cfg.recursive);
        assert_eq!(cfg.pattern, "{track} {title}");
        assert_eq!(cfg.extensions, vec!["flac".to_string(), "mp3".to_string()]);
        assert!(!cfg.use_ffprobe);
    }

    #[test]
    fn test_defaults_survive_when_flags_absent() {
        let args = Args::parse_from(["tunetidy", "--dir", "/music"]);
        let cfg = args.apply(RunOptions::default_config());
        assert_eq!(cfg.pattern, tidy::config::DEFAULT_PATTERN);
        assert_eq!(cfg.extensions, vec!["mp3".to_string()]);
        assert!(cfg.use_ffprobe);
    }

    #[test]
    fn test_dir_is_required() {
        assert!(Args::try_parse_from(["tunetidy", "--dry-run"]).is_err());
    }
}
