//! Runs the whole pipeline: fetch metadata, select, download, install.

use std::path::PathBuf;

use crate::config::RunConfig;
use crate::error::{Result, UpdateError};
use crate::http::{HttpClient, HttpFetch};
use crate::metadata::{MetadataSource, fetch_binaries};
use crate::steps::download::{download_path, download_to};
use crate::steps::install::{CommandRunner, SystemRunner, run_installer};
use crate::steps::select::{Selection, select_binary};

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// The artifact picked.
    pub selection: Selection,
    /// Where it was written, when it was downloaded.
    pub downloaded: Option<PathBuf>,
    /// Whether msiexec ran successfully.
    pub installed: bool,
}

/// Pipeline wired to its HTTP, metadata and process capabilities.
pub struct Updater<'a> {
    http: &'a dyn HttpFetch,
    source: &'a dyn MetadataSource,
    runner: &'a dyn CommandRunner,
}

impl<'a> Updater<'a> {
    /// Creates an updater from explicit capabilities.
    pub fn new(
        http: &'a dyn HttpFetch,
        source: &'a dyn MetadataSource,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            http,
            source,
            runner,
        }
    }

    /// Runs the pipeline for `config`.
    ///
    /// `on_selected` is called once the artifact is chosen, before anything
    /// is downloaded. Steps the mode does not call for are skipped entirely.
    pub fn run(
        &self,
        config: &RunConfig,
        on_selected: impl FnOnce(&Selection),
    ) -> Result<RunOutcome> {
        let binaries = fetch_binaries(self.http, self.source)?;
        tracing::debug!("Resolved binaries: {:?}", binaries);

        if binaries.is_empty() {
            tracing::warn!("Couldn't find any binary.");
            return Err(UpdateError::NoBinaryFound);
        }

        let selection =
            select_binary(&binaries, config.preference).ok_or(UpdateError::NoBinaryFound)?;
        tracing::debug!("Selected {} binary {}", selection.kind, selection.url);
        on_selected(&selection);

        let path = download_path(&config.download_folder, &selection.url);

        let downloaded = if config.mode.should_download() {
            download_to(self.http, &selection.url, &path)?;
            Some(path)
        } else {
            None
        };

        let installed = match &downloaded {
            Some(path) if config.mode.should_install() => {
                run_installer(self.runner, &config.wine, selection.kind, path)?;
                true
            }
            _ => false,
        };

        Ok(RunOutcome {
            selection,
            downloaded,
            installed,
        })
    }
}

/// Runs the pipeline against the network and the real wine binary.
pub fn run_update(
    config: &RunConfig,
    source: &dyn MetadataSource,
    on_selected: impl FnOnce(&Selection),
) -> Result<RunOutcome> {
    let http = HttpClient::new()?;
    Updater::new(&http, source, &SystemRunner).run(config, on_selected)
}
