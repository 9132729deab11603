use crate::client::{ApiClient, CommentExtras};
use crate::config::{Credentials, PipelineConfig};
use crate::fetcher::{Fetcher, FetcherConfig};
use crate::logging::{log_error_card, log_post_card};
use crate::normalizer::PostNormalizer;
use crate::prompt::{build_prompt, Platform, PromptRequest, Tone, DEFAULT_LANGUAGE};
use crate::{Post, ReplyError, ReplyGenerator};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Caller-facing knobs for one reply; the platform is derived from the URL.
#[derive(Debug, Clone)]
pub struct ReplyOptions {
    /// Sent to the backend as given; [`Tone::parse`] picks the template
    pub tone: String,
    pub language: String,
    pub include_emoji: bool,
    pub include_hashtag: bool,
    /// Forwarded to the backend as `tone_details`, together with the tone
    pub tone_details: Option<String>,
}

impl Default for ReplyOptions {
    fn default() -> Self {
        Self {
            tone: Tone::General.as_str().to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            include_emoji: false,
            include_hashtag: false,
            tone_details: None,
        }
    }
}

impl ReplyOptions {
    pub fn new(tone: impl Into<String>) -> Self {
        Self {
            tone: tone.into(),
            ..Self::default()
        }
    }

    pub fn prompt_request(&self, url: &str) -> PromptRequest {
        PromptRequest::new(Platform::from_url(url), Tone::parse(&self.tone))
            .with_language(self.language.clone())
            .with_emoji(self.include_emoji)
            .with_hashtags(self.include_hashtag)
    }

    fn extras(&self) -> CommentExtras {
        match &self.tone_details {
            Some(details) => CommentExtras {
                tone: Some(self.tone.clone()),
                tone_details: Some(details.clone()),
            },
            None => CommentExtras::default(),
        }
    }
}

/// URL → fetch → normalize → prompt → generate, one stage after another.
#[derive(Clone)]
pub struct CommentPipeline {
    fetcher: Fetcher,
    normalizer: PostNormalizer,
    client: ApiClient,
}

impl CommentPipeline {
    pub fn new(credentials: Credentials) -> Result<Self, ReplyError> {
        Self::new_with_config(PipelineConfig::default(), credentials)
    }

    pub fn new_with_config(
        config: PipelineConfig,
        credentials: Credentials,
    ) -> Result<Self, ReplyError> {
        config.validate()?;
        debug!("Initializing CommentPipeline with custom configuration");

        let fetcher = Fetcher::new_with_config(FetcherConfig::from(&config))?;
        let normalizer = PostNormalizer::with_config(config.normalizer.clone());
        let client = ApiClient::new(&config, credentials)?;

        Ok(Self::from_parts(fetcher, normalizer, client))
    }

    pub fn from_parts(fetcher: Fetcher, normalizer: PostNormalizer, client: ApiClient) -> Self {
        Self {
            fetcher,
            normalizer,
            client,
        }
    }

    /// Access to the summarize / translate / create-* calls.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Fetches and normalizes a post. Failures come back as an error post.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_post(&self, url: &str) -> Post {
        let fetched = self.fetcher.fetch(url).await;
        let post = self.normalizer.normalize_result(fetched, url);
        log_post_card(&post);
        post
    }

    /// Same as [`ReplyGenerator::generate_reply`], with failures rendered as a
    /// marker-prefixed message instead of an error.
    pub async fn generate_reply_text(&self, url: &str, options: &ReplyOptions) -> String {
        match self.generate_reply(url, options).await {
            Ok(reply) => reply,
            Err(e) => e.user_message(),
        }
    }
}

#[async_trait]
impl ReplyGenerator for CommentPipeline {
    async fn generate_reply(&self, url: &str, options: &ReplyOptions) -> Result<String, ReplyError> {
        let credentials = self.client.credentials();
        if !credentials.has_identity() {
            let error = ReplyError::MissingIdentity;
            error.log();
            return Err(error);
        }

        let post = self.fetch_post(url).await;
        if let Some(cause) = post.error_cause() {
            warn!(url = %url, cause = %cause, "Skipping generation for unscraped post");
            return Err(ReplyError::ScrapeFailed(cause.to_string()));
        }

        let request = options.prompt_request(url);
        let prompt = build_prompt(&request, &post);
        debug!(
            platform = %request.platform,
            tone = %request.tone,
            prompt_length = prompt.len(),
            "Built prompt"
        );

        self.client
            .comment(&prompt, &credentials.email, &options.extras())
            .await
            .map_err(|e| {
                log_error_card(url, &e);
                e
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_tone_is_forwarded_verbatim() {
        let options = ReplyOptions {
            tone_details: Some("witty".to_string()),
            ..ReplyOptions::new("sarcastic")
        };
        let extras = options.extras();
        assert_eq!(extras.tone.as_deref(), Some("sarcastic"));
        assert_eq!(extras.tone_details.as_deref(), Some("witty"));

        let request = options.prompt_request("https://x.com/jane/status/1");
        assert_eq!(request.tone, Tone::General);
        assert_eq!(request.platform, Platform::X);
    }

    #[test]
    fn test_extras_empty_without_details() {
        let extras = ReplyOptions::new("agree").extras();
        assert!(extras.tone.is_none());
        assert!(extras.tone_details.is_none());
    }
}
