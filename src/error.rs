use thiserror::Error;
use tracing::{error, warn};

/// Marker prepended to every failure shown to the user.
pub const ERROR_MARKER: &str = "❌";

#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("Failed to parse URL: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Http(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("JSON encoding error: {0}")]
    Encoding(String),

    #[error("Failed to decode response")]
    Decode,

    #[error("No content found")]
    NoContent,

    #[error("Failed to scrape post: {0}")]
    ScrapeFailed(String),

    #[error("No email found")]
    MissingIdentity,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl ReplyError {
    /// Message suitable for direct display, prefixed with [`ERROR_MARKER`].
    pub fn user_message(&self) -> String {
        format!("{ERROR_MARKER} {self}")
    }

    pub fn log(&self) {
        match self {
            ReplyError::UrlParse(e) => {
                warn!(error = %e, "URL parsing failed");
            }
            ReplyError::InvalidUrl(url) => {
                warn!(url = %url, "Rejected post URL");
            }
            ReplyError::Network(e) => {
                error!(error = %e, "Network request failed");
            }
            ReplyError::Http(status) => {
                error!(status = %status, "Unexpected HTTP status");
            }
            ReplyError::Parse(e) => {
                error!(error = %e, "Response parsing failed");
            }
            ReplyError::Encoding(e) => {
                error!(error = %e, "Request body encoding failed");
            }
            ReplyError::Decode => {
                error!("Response body is not valid UTF-8");
            }
            ReplyError::NoContent => {
                warn!("No post content found in response");
            }
            ReplyError::ScrapeFailed(cause) => {
                warn!(cause = %cause, "Post could not be scraped");
            }
            ReplyError::MissingIdentity => {
                warn!("No identity e-mail configured");
            }
            ReplyError::InvalidConfiguration(e) => {
                error!(error = %e, "Invalid configuration");
            }
        }
    }
}

impl From<reqwest::Error> for ReplyError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return ReplyError::Http(status.as_u16());
        }
        if e.is_decode() {
            return ReplyError::Parse(e.to_string());
        }
        ReplyError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_parse_conversion() {
        let err: ReplyError = url::Url::parse("no scheme here").unwrap_err().into();
        assert!(matches!(err, ReplyError::UrlParse(_)));
        assert!(err.user_message().starts_with("❌ Failed to parse URL"));
    }

    #[test]
    fn test_user_message_has_marker() {
        assert_eq!(ReplyError::Http(500).user_message(), "❌ HTTP 500");
        assert_eq!(
            ReplyError::Network("timed out".into()).user_message(),
            "❌ Network error: timed out"
        );
        assert_eq!(ReplyError::Decode.user_message(), "❌ Failed to decode response");
    }
}
