//! Error types for the update pipeline.

use thiserror::Error;

use crate::SETUP_HELP;

/// Errors that can occur while fetching, downloading or installing an update.
///
/// Every variant is terminal for the run: nothing is retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UpdateError {
    /// A required environment variable is not set.
    #[error("You must provide {variable} environment variable.")]
    MissingConfiguration {
        /// Name of the missing variable.
        variable: &'static str,
    },

    /// The metadata request failed at the transport level.
    #[error("network error: {0}")]
    Network(String),

    /// The metadata response was not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Neither a patch nor an installer URL could be resolved.
    #[error("Couldn't find any binary.")]
    NoBinaryFound,

    /// Fetching or writing the artifact failed.
    #[error("download of {url} failed: {message}")]
    Download {
        /// Artifact URL.
        url: String,
        /// What went wrong.
        message: String,
    },

    /// The installer could not be started or exited with a failure.
    #[error("command {command} failed: {message}")]
    Install {
        /// Display form of the command line.
        command: String,
        /// What went wrong.
        message: String,
    },
}

impl UpdateError {
    /// Returns the message shown on the terminal when the run aborts.
    ///
    /// Configuration errors carry a pointer to the setup guide.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingConfiguration { .. } => format!("{self}\n{SETUP_HELP}"),
            _ => self.to_string(),
        }
    }

    /// Builds a download error for `url`.
    pub(crate) fn download(url: &str, message: impl Into<String>) -> Self {
        Self::Download {
            url: url.to_string(),
            message: message.into(),
        }
    }

    /// Builds an install error for the displayed `command`.
    pub(crate) fn install(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Install {
            command: command.into(),
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for UpdateError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for UpdateError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

/// Result type alias for update operations.
pub type Result<T> = std::result::Result<T, UpdateError>;
