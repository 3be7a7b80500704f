use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mtgaup_updater::{
    BinaryPreference, ISSUES_URL, RunConfig, RunOutcome, Selection, SourceKind, UpdateError,
    WIKI_URL, WineConfig, WineEnvironment, run_update,
};
use tracing::info_span;

use crate::cli::Cli;

/// Text appended to `--help`: the live environment report and project links.
pub fn help_epilogue(env: &WineEnvironment) -> String {
    format!(
        "{}\nONLINE RESOURCES\n  Wiki:        {WIKI_URL}\n  Bug Reports: {ISSUES_URL}",
        env.report()
    )
}

/// Resolves the download folder against `cwd`; defaults to `cwd` itself.
pub fn resolve_download_folder(folder: Option<&Path>, cwd: &Path) -> PathBuf {
    match folder {
        Some(folder) if folder.is_absolute() => folder.to_path_buf(),
        Some(folder) => cwd.join(folder),
        None => cwd.to_path_buf(),
    }
}

/// Printed when neither `--patch` nor `--install` was given.
pub fn preference_notice(preference: BinaryPreference) -> Option<&'static str> {
    (preference == BinaryPreference::Unspecified)
        .then_some("You didn't provide any option. Defaulting to patch, if available.")
}

/// Line announcing the chosen artifact.
pub fn found_line(selection: &Selection) -> String {
    format!("Found {} binary {}", selection.kind, selection.url)
}

/// Builds the run configuration from parsed flags.
pub fn build_config(cli: &Cli, wine: WineConfig, cwd: &Path) -> RunConfig {
    let folder = resolve_download_folder(cli.download_folder.as_deref(), cwd);
    RunConfig::new(wine, folder)
        .with_mode(cli.mode())
        .with_preference(cli.preference())
}

/// Checks the environment, then fetches, downloads and installs as the flags ask.
///
/// The environment is validated before any network access. The default
/// preference notice and the found binary go to stdout so they survive `-q`.
pub fn run_update_command(cli: &Cli, env: WineEnvironment) -> Result<RunOutcome> {
    let wine = env.require()?;
    let cwd = std::env::current_dir().context("resolve current directory")?;
    let config = build_config(cli, wine, &cwd);

    let kind = SourceKind::from(cli.source);
    let source = kind.build(cli.metadata_url.clone());

    let span = info_span!("update", source = %kind, mode = ?config.mode);
    let _guard = span.enter();
    tracing::debug!("Download folder: {}", config.download_folder.display());

    if let Some(notice) = preference_notice(config.preference) {
        println!("{notice}");
    }

    let outcome = run_update(&config, source.as_ref(), |selection| {
        println!("{}", found_line(selection));
    })?;
    Ok(outcome)
}

/// Renders an error for the terminal.
pub fn format_error(error: &anyhow::Error) -> String {
    match error.downcast_ref::<UpdateError>() {
        Some(update_error) => update_error.user_message(),
        None => format!("{error:#}"),
    }
}
