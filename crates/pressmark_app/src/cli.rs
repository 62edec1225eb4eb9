use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use pressmark_core::{ImportOptions, DEFAULT_ASSETS_FOLDER, DEFAULT_SOURCE};
use pressmark_engine::FetchSettings;

use crate::logging::LogDestination;

const DEFAULT_LOG_FILE: &str = "pressmark.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

/// Import a WordPress export into a Jekyll site.
#[derive(Debug, Parser)]
#[command(name = "pressmark", version, about, long_about = None)]
pub struct Cli {
    /// WordPress export (WXR) to read
    #[arg(long, value_name = "FILE", default_value = DEFAULT_SOURCE)]
    pub source: PathBuf,

    /// Site root the `_posts`, `_drafts`, ... directories are written under
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Rewrite image references but do not download anything
    #[arg(long)]
    pub no_fetch_images: bool,

    /// Folder name for downloaded images
    #[arg(long, value_name = "NAME", default_value = DEFAULT_ASSETS_FOLDER)]
    pub assets_folder: String,

    /// Embed every postmeta key/value under `meta`
    #[arg(long)]
    pub include_meta: bool,

    /// Keep the first image of each post instead of dropping it
    #[arg(long)]
    pub keep_hero_image: bool,

    /// Put the original URL back when an image download fails
    #[arg(long)]
    pub strict_assets: bool,

    /// Per-request timeout for image downloads, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Also write the batch report as JSON
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Where log lines go
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log_to: LogTarget,

    /// Log file used by `--log-to file|both`
    #[arg(long, value_name = "FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short, long, action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,
}

impl Cli {
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            source: self.source.clone(),
            output_dir: self.output.clone(),
            no_fetch_images: self.no_fetch_images,
            assets_folder: self.assets_folder.clone(),
            include_meta: self.include_meta,
            strip_hero_image: !self.keep_hero_image,
            strict_assets: self.strict_assets,
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            request_timeout: Duration::from_secs(self.timeout),
            ..FetchSettings::default()
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        match self.log_to {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File(self.log_file.clone()),
            LogTarget::Both => LogDestination::Both(self.log_file.clone()),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        pressmark_logging::level_for_verbosity(self.verbose, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pressmark").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_import_options() {
        let cli = parse(&[]);
        assert_eq!(cli.import_options(), ImportOptions::default());
        assert_eq!(
            cli.fetch_settings().request_timeout,
            FetchSettings::default().request_timeout
        );
        assert_eq!(cli.log_destination(), LogDestination::Terminal);
        assert_eq!(cli.log_level(), LevelFilter::Info);
    }

    #[test]
    fn flags_map_onto_options() {
        let cli = parse(&[
            "--source",
            "export.xml",
            "-o",
            "site",
            "--no-fetch-images",
            "--assets-folder",
            "media",
            "--include-meta",
            "--keep-hero-image",
            "--strict-assets",
            "--timeout",
            "5",
        ]);
        let opts = cli.import_options();
        assert_eq!(opts.source, PathBuf::from("export.xml"));
        assert_eq!(opts.output_dir, PathBuf::from("site"));
        assert!(!opts.fetch_images());
        assert_eq!(opts.assets_folder, "media");
        assert!(opts.include_meta);
        assert!(!opts.strip_hero_image);
        assert!(opts.strict_assets);
        assert_eq!(cli.fetch_settings().request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn log_flags() {
        let cli = parse(&["--log-to", "both", "--log-file", "run.log", "-vv"]);
        assert_eq!(
            cli.log_destination(),
            LogDestination::Both(PathBuf::from("run.log"))
        );
        assert_eq!(cli.log_level(), LevelFilter::Trace);

        assert_eq!(parse(&["-q"]).log_level(), LevelFilter::Warn);
        assert!(Cli::try_parse_from(["pressmark", "-v", "-q"]).is_err());
    }
}
