//! CLI argument definitions for mtgaup.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use mtgaup_updater::{BinaryPreference, RunMode, SourceKind};

#[derive(Parser)]
#[command(
    name = "mtgaup",
    version,
    about = "Download and install MTG Arena updates under Wine",
    long_about = "This program, when called with no argument, will do the following:\n\n  \
                  1. Fetch the URLs of the current msp (patch) and msi (installer) binaries.\n  \
                  2. Download, given user provided options, the preferred binary.\n  \
                  3. Install the chosen binary with `wine msiexec'."
)]
pub struct Cli {
    /// Only look up the binaries available for download.
    #[arg(short = 'I', long = "info")]
    pub info: bool,

    /// Print environment variables information and exit.
    #[arg(short = 'E', long = "env-info")]
    pub env_info: bool,

    /// Look up the binaries and download the preferred one, without installing.
    #[arg(short = 'D', long = "download")]
    pub download: bool,

    /// Prefer the MSP patch to the MSI installer, if available (default).
    #[arg(short = 'p', long = "patch")]
    pub patch: bool,

    /// Prefer the MSI installer to the MSP patch, if available.
    #[arg(short = 'i', long = "install")]
    pub install: bool,

    /// Where to download binaries (default: current directory).
    #[arg(short = 'd', long = "download-folder", value_name = "FOLDER")]
    pub download_folder: Option<PathBuf>,

    /// Where to look up the binary URLs.
    #[arg(long = "source", value_enum, default_value = "version")]
    pub source: SourceArg,

    /// Query this URL instead of the source's default endpoint.
    #[arg(long = "metadata-url", value_name = "URL")]
    pub metadata_url: Option<String>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Timestamp pretty and compact log lines (JSON lines always carry one).
    #[arg(long = "log-timestamps")]
    pub log_timestamps: bool,
}

impl Cli {
    /// Run mode selected by `--info` / `--download`.
    pub fn mode(&self) -> RunMode {
        RunMode::from_flags(self.info, self.download)
    }

    /// Binary preference selected by `--patch` / `--install`.
    pub fn preference(&self) -> BinaryPreference {
        BinaryPreference::from_flags(self.patch, self.install)
    }
}

/// CLI metadata source choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// The launcher's JSON version file.
    Version,
    /// The community forum announcement (legacy).
    Forum,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Version => Self::Version,
            SourceArg::Forum => Self::Forum,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
