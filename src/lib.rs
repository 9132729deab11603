use async_trait::async_trait;
use url::Url;

mod client;
mod config;
mod error;
mod fetcher;
mod logging;
mod normalizer;
mod pipeline;
mod prompt;
mod utils;

pub use client::{ApiClient, CommentExtras};
pub use config::{Credentials, Endpoints, PipelineConfig};
pub use error::{ReplyError, ERROR_MARKER};
pub use fetcher::{Fetcher, FetcherConfig, OEmbedResponse, RawContent};
#[cfg(feature = "logging")]
pub use logging::{setup_logging, LogConfig};
pub use logging::{log_error_card, log_post_card};
pub use normalizer::{
    clean_content, strip_oembed_html, NormalizerConfig, PostNormalizer, NO_CONTENT,
    NO_MEANINGFUL_CONTENT, RECENT_DATE, UNKNOWN_AUTHOR, UNKNOWN_DATE,
};
pub use pipeline::{CommentPipeline, ReplyOptions};
pub use prompt::{build_prompt, Platform, PromptRequest, Tone, DEFAULT_LANGUAGE};

pub const ERROR_AUTHOR: &str = "Error";
const ERROR_CONTENT_PREFIX: &str = "Error: ";

/// Canonical form of a scraped LinkedIn or X post.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Post {
    pub content: String,
    pub author: String,
    pub date: String,
    pub like_count: u64,
    pub comment_count: u64,
    pub images: Vec<String>,
    pub comments: Vec<PostComment>,
    pub source_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PostComment {
    pub author: String,
    pub text: String,
}

impl Post {
    /// Placeholder post describing why scraping failed.
    pub fn from_error(source_url: &str, error: &ReplyError) -> Self {
        Self {
            content: format!("{ERROR_CONTENT_PREFIX}{}", error.user_message()),
            author: ERROR_AUTHOR.to_string(),
            date: UNKNOWN_DATE.to_string(),
            like_count: 0,
            comment_count: 0,
            images: Vec::new(),
            comments: Vec::new(),
            source_url: source_url.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.author == ERROR_AUTHOR && self.content.starts_with(ERROR_CONTENT_PREFIX)
    }

    /// The failure description carried by an error post, without markers.
    pub fn error_cause(&self) -> Option<&str> {
        if !self.is_error() {
            return None;
        }
        let cause = &self.content[ERROR_CONTENT_PREFIX.len()..];
        Some(cause.strip_prefix(ERROR_MARKER).unwrap_or(cause).trim_start())
    }
}

#[async_trait]
pub trait ReplyGenerator {
    async fn generate_reply(&self, url: &str, options: &ReplyOptions) -> Result<String, ReplyError>;
}

/// True for twitter.com and x.com links, including subdomains.
pub fn is_twitter_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str().is_some_and(|host| {
            let host = host.to_ascii_lowercase();
            ["twitter.com", "x.com"]
                .iter()
                .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
        }),
        Err(_) => url.contains("twitter.com") || url.contains("x.com"),
    }
}
