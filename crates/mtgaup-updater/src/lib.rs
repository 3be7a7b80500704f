//! Update pipeline for MTG Arena running under Wine.
//!
//! This crate finds the current MTG Arena update binaries, downloads the
//! preferred one and installs it with `wine msiexec`.
//!
//! # Overview
//!
//! A run goes through four stages:
//!
//! - Configuration: [`WineEnvironment`] reads `MTGA_WINE_PREFIX` and
//!   `MTGA_WINE_BINARY`, [`RunConfig`] carries the resolved flags
//! - Metadata: a [`MetadataSource`] yields a [`BinaryReference`] with an
//!   optional patch (`.msp`) and installer (`.msi`) URL
//! - Download: the selected artifact is written to the download folder
//! - Install: `wine msiexec /p|/i <file>` runs with `WINEPREFIX` set
//!
//! Network access and process spawning sit behind the [`HttpFetch`] and
//! [`CommandRunner`] traits so [`Updater`] can be driven by fakes.
//!
//! # Example
//!
//! ```no_run
//! use mtgaup_updater::{RunConfig, SourceKind, WineEnvironment, run_update};
//!
//! fn update() -> mtgaup_updater::Result<()> {
//!     let wine = WineEnvironment::from_env().require()?;
//!     let config = RunConfig::new(wine, std::env::current_dir().unwrap());
//!     let source = SourceKind::Version.build(None);
//!
//!     let outcome = run_update(&config, source.as_ref(), |selection| {
//!         println!("Found {} binary {}", selection.kind, selection.url);
//!     })?;
//!     println!("Installed: {}", outcome.installed);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod error;
pub mod http;
pub mod metadata;
pub mod service;

// Individual steps
pub mod steps;

// Re-export main types for convenience
pub use config::{BinaryPreference, RunConfig, RunMode, WineConfig, WineEnvironment};
pub use error::{Result, UpdateError};
pub use http::{HttpClient, HttpFetch, HttpResponse};
pub use metadata::{BinaryReference, ForumPost, MetadataSource, SourceKind, VersionEndpoint};
pub use service::{RunOutcome, Updater, run_update};

// Re-export step functions and types
pub use steps::download::{download_path, download_to, file_name_from_url};
pub use steps::install::{CommandRunner, CommandSpec, SystemRunner, run_installer};
pub use steps::select::{BinaryKind, Selection, select_binary};

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the Wine prefix of the MTG Arena install.
pub const WINE_PREFIX_VAR: &str = "MTGA_WINE_PREFIX";

/// Environment variable holding the path to the wine executable.
pub const WINE_BINARY_VAR: &str = "MTGA_WINE_BINARY";

/// Pointer to the setup guide, shown when configuration is missing.
pub const SETUP_HELP: &str = "FIND OUT HOW: https://github.com/jsamr/mtgaup/wiki/Setup";

/// Project wiki.
pub const WIKI_URL: &str = "https://github.com/jsamr/mtgaup/wiki";

/// Issue tracker.
pub const ISSUES_URL: &str = "https://github.com/jsamr/mtgaup/issues";
