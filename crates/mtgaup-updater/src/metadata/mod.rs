//! Metadata sources that resolve the current patch and installer URLs.
//!
//! Two endpoints are supported:
//!
//! - [`VersionEndpoint`]: the launcher's JSON version file (canonical)
//! - [`ForumPost`]: a community forum article scraped for `.msp`/`.msi` links (legacy)
//!
//! Both go through [`fetch_binaries`], which treats a non-2xx response as
//! "nothing found" rather than an error.

pub mod forum;
pub mod version;

use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::http::HttpFetch;

pub use forum::ForumPost;
pub use version::VersionEndpoint;

/// Candidate download URLs found by a metadata source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryReference {
    /// URL of the MSP patch, if any.
    pub patch: Option<String>,
    /// URL of the MSI installer, if any.
    pub installer: Option<String>,
}

impl BinaryReference {
    /// Whether neither URL was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patch.is_none() && self.installer.is_none()
    }
}

/// A remote resource that lists the current update binaries.
pub trait MetadataSource {
    /// URL to request.
    fn endpoint(&self) -> &str;

    /// Extracts the binary URLs from a successful response body.
    fn parse(&self, body: &[u8]) -> Result<BinaryReference>;
}

/// Which metadata source to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// The JSON version file.
    #[default]
    Version,
    /// The legacy forum article.
    Forum,
}

impl SourceKind {
    /// Builds the source, optionally pointed at another URL.
    #[must_use]
    pub fn build(self, endpoint: Option<String>) -> Box<dyn MetadataSource> {
        match (self, endpoint) {
            (Self::Version, None) => Box::new(VersionEndpoint::default()),
            (Self::Version, Some(url)) => Box::new(VersionEndpoint::new(url)),
            (Self::Forum, None) => Box::new(ForumPost::default()),
            (Self::Forum, Some(url)) => Box::new(ForumPost::new(url)),
        }
    }

    /// Get a human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::Forum => "forum",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "version" => Ok(Self::Version),
            "forum" => Ok(Self::Forum),
            other => Err(format!("unknown metadata source: {other}")),
        }
    }
}

/// Requests the source's endpoint and parses the result.
///
/// A non-2xx status yields an empty [`BinaryReference`].
pub fn fetch_binaries(http: &dyn HttpFetch, source: &dyn MetadataSource) -> Result<BinaryReference> {
    let url = source.endpoint();
    tracing::debug!("Fetching binary metadata from {}", url);

    let response = http.get(url)?;
    if !response.is_success() {
        tracing::warn!("Metadata request to {} returned status {}", url, response.status);
        return Ok(BinaryReference::default());
    }

    source.parse(&response.body)
}
