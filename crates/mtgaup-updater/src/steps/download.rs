//! Download the selected artifact to disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, UpdateError};
use crate::http::HttpFetch;

/// Returns everything after the last `/` of `url`.
#[must_use]
pub fn file_name_from_url(url: &str) -> &str {
    url.rsplit_once('/').map_or(url, |(_, name)| name)
}

/// Computes where `url` is written inside `folder`.
#[must_use]
pub fn download_path(folder: &Path, url: &str) -> PathBuf {
    folder.join(file_name_from_url(url))
}

/// Fetches `url` and writes the whole body to `dest`, replacing any existing file.
///
/// Returns the number of bytes written.
pub fn download_to(http: &dyn HttpFetch, url: &str, dest: &Path) -> Result<u64> {
    tracing::info!("Starting download from {}", url);

    let response = http
        .get(url)
        .map_err(|e| UpdateError::download(url, e.to_string()))?;

    if !response.is_success() {
        return Err(UpdateError::download(
            url,
            format!("server returned status {}", response.status),
        ));
    }

    fs::write(dest, &response.body).map_err(|e| {
        UpdateError::download(url, format!("failed to write {}: {e}", dest.display()))
    })?;

    let size = response.body.len() as u64;
    tracing::info!("Download of {} finished.", dest.display());
    tracing::debug!("Wrote {} bytes to {}", size, dest.display());

    Ok(size)
}
