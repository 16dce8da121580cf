//! Fatal error taxonomy. Anything here aborts the run with a nonzero exit.
//!
//! Recoverable failures (one catalog type failing, one download exhausting its
//! retries) have their own component-level error types and never reach this enum.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    /// A required setting is missing or still holds its placeholder value.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The catalog rejected the configured credentials.
    #[error("credential error: {message}; refresh access_token/client_id in the config file")]
    Credential { message: String },

    /// A required external tool is not installed or not on PATH.
    #[error("missing dependency: '{name}' not found on PATH ({hint})")]
    DependencyMissing { name: String, hint: String },
}

impl ArchiveError {
    pub fn configuration(message: impl Into<String>) -> Self {
        ArchiveError::Configuration {
            message: message.into(),
        }
    }

    pub fn credential(message: impl Into<String>) -> Self {
        ArchiveError::Credential {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_actionable() {
        let e = ArchiveError::configuration("client_id is not set in /tmp/config.toml");
        assert_eq!(
            e.to_string(),
            "configuration error: client_id is not set in /tmp/config.toml"
        );
        let e = ArchiveError::DependencyMissing {
            name: "yt-dlp".to_string(),
            hint: "install it with pipx install yt-dlp".to_string(),
        };
        assert!(e.to_string().contains("'yt-dlp' not found on PATH"));
        let e = ArchiveError::credential("HTTP 401");
        assert!(e.to_string().starts_with("credential error: HTTP 401"));
    }
}
