//! Launcher version file (JSON endpoint).

use serde::Deserialize;

use super::{BinaryReference, MetadataSource};
use crate::error::Result;

/// Default location of the version file.
pub const VERSION_URL: &str = "https://mtgarena.downloads.wizards.com/Live/Windows32/version";

/// Subset of the version file we care about.
#[derive(Debug, Deserialize)]
struct VersionFile {
    #[serde(rename = "CurrentPatchURL", default)]
    current_patch_url: Option<String>,

    #[serde(rename = "CurrentInstallerURL", default)]
    current_installer_url: Option<String>,
}

/// Reads `CurrentPatchURL` and `CurrentInstallerURL` from the version file.
#[derive(Debug, Clone)]
pub struct VersionEndpoint {
    url: String,
}

impl VersionEndpoint {
    /// Creates a source that reads the version file at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for VersionEndpoint {
    fn default() -> Self {
        Self::new(VERSION_URL)
    }
}

impl MetadataSource for VersionEndpoint {
    fn endpoint(&self) -> &str {
        &self.url
    }

    fn parse(&self, body: &[u8]) -> Result<BinaryReference> {
        let file: VersionFile = serde_json::from_slice(body)?;

        Ok(BinaryReference {
            patch: checked_slot(file.current_patch_url, "CurrentPatchURL", ".msp"),
            installer: checked_slot(file.current_installer_url, "CurrentInstallerURL", ".msi"),
        })
    }
}

/// Keeps a non-empty URL whose path ends in `extension`.
fn checked_slot(url: Option<String>, field: &str, extension: &str) -> Option<String> {
    let url = url.filter(|u| !u.trim().is_empty())?;
    if has_extension(&url, extension) {
        Some(url)
    } else {
        tracing::warn!("Ignoring {} {}: expected a {} file", field, url, extension);
        None
    }
}

/// Whether the path of `url`, without query or fragment, ends in `extension`.
fn has_extension(url: &str, extension: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.to_ascii_lowercase().ends_with(extension)
}
