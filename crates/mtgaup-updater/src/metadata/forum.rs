//! Community forum article scraped for binary links.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::{BinaryReference, MetadataSource};
use crate::error::Result;

/// Default forum article that announces new builds.
pub const FORUM_POST_URL: &str = "https://mtgarena-api.community.gl/forums/articles/58489?logView=0";

static PATCH_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"a href=["'](https://[^\s"'<>]+\.msp)["']"#).expect("valid patch link regex")
});

static INSTALLER_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"a href=["'](https://[^\s"'<>]+\.msi)["']"#).expect("valid installer link regex")
});

#[derive(Debug, Deserialize)]
struct ArticleResponse {
    article: Option<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    content: Option<ArticleContent>,
}

#[derive(Debug, Deserialize)]
struct ArticleContent {
    text: Option<String>,
}

/// Scrapes `article.content.text` of a forum article for the first
/// `.msp` and the first `.msi` anchor.
#[derive(Debug, Clone)]
pub struct ForumPost {
    url: String,
}

impl ForumPost {
    /// Creates a source that scrapes the article at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for ForumPost {
    fn default() -> Self {
        Self::new(FORUM_POST_URL)
    }
}

impl MetadataSource for ForumPost {
    fn endpoint(&self) -> &str {
        &self.url
    }

    fn parse(&self, body: &[u8]) -> Result<BinaryReference> {
        let response: ArticleResponse = serde_json::from_slice(body)?;
        let text = response
            .article
            .and_then(|a| a.content)
            .and_then(|c| c.text)
            .unwrap_or_default();

        Ok(scrape_links(&text))
    }
}

/// Returns the first patch and first installer link found in `text`.
#[must_use]
pub fn scrape_links(text: &str) -> BinaryReference {
    let first = |re: &Regex| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    };

    BinaryReference {
        patch: first(&PATCH_LINK),
        installer: first(&INSTALLER_LINK),
    }
}
