//! Endpoint, credential and pipeline configuration

use crate::normalizer::NormalizerConfig;
use crate::ReplyError;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://backend.einsteini.ai/api";
pub const DEFAULT_SCRAPE_URL: &str = "https://backend.einsteini.ai/scrape";
pub const DEFAULT_OEMBED_URL: &str = "https://publish.twitter.com/oembed";
/// The usage counter lives outside the `/api` prefix.
pub const DEFAULT_USAGE_BASE: &str = "http://backend.einsteini.ai";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote endpoints used by the fetcher and the generation client.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Base for `/comment`, `/summarize`, `/translate` and the `create-*` calls
    pub api_base: String,
    /// Full URL of the scrape endpoint
    pub scrape_url: String,
    /// Full URL of the oEmbed endpoint used for X posts
    pub oembed_url: String,
    /// Base for `/increaseComments`
    pub usage_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            scrape_url: DEFAULT_SCRAPE_URL.to_string(),
            oembed_url: DEFAULT_OEMBED_URL.to_string(),
            usage_base: DEFAULT_USAGE_BASE.to_string(),
        }
    }
}

impl Endpoints {
    /// Points every endpoint at one server, keeping the production path layout.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            api_base: format!("{base}/api"),
            scrape_url: format!("{base}/scrape"),
            oembed_url: format!("{base}/oembed"),
            usage_base: base.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ReplyError> {
        for (name, value) in [
            ("api_base", &self.api_base),
            ("scrape_url", &self.scrape_url),
            ("oembed_url", &self.oembed_url),
            ("usage_base", &self.usage_base),
        ] {
            if value.is_empty() {
                return Err(ReplyError::InvalidConfiguration(format!(
                    "{name} cannot be empty"
                )));
            }
            let url = Url::parse(value).map_err(|e| {
                ReplyError::InvalidConfiguration(format!("{name} is not a valid URL: {e}"))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ReplyError::InvalidConfiguration(format!(
                    "{name} must use http or https, got {}",
                    url.scheme()
                )));
            }
        }
        Ok(())
    }
}

/// Identity attached to backend calls.
///
/// `email` doubles as the identity token in request bodies. `bearer_token`,
/// when set, is sent as an `Authorization` header.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub email: String,
    pub bearer_token: Option<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            bearer_token: None,
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.bearer_token = if token.is_empty() { None } else { Some(token) };
        self
    }

    /// Reads `POST_REPLY_EMAIL` and `POST_REPLY_BEARER_TOKEN`.
    pub fn from_env() -> Result<Self, ReplyError> {
        let email = std::env::var("POST_REPLY_EMAIL").map_err(|_| {
            ReplyError::InvalidConfiguration(
                "POST_REPLY_EMAIL environment variable not set".to_string(),
            )
        })?;
        let credentials = Self::new(email);
        Ok(match std::env::var("POST_REPLY_BEARER_TOKEN") {
            Ok(token) => credentials.with_bearer_token(token),
            Err(_) => credentials,
        })
    }

    pub fn has_identity(&self) -> bool {
        !self.email.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub endpoints: Endpoints,
    pub timeout: Duration,
    pub user_agent: String,
    /// Value of the `x-app-platform` header expected by the backend
    pub app_platform: String,
    pub normalizer: NormalizerConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("post_reply/", env!("CARGO_PKG_VERSION")).to_string(),
            app_platform: "android".to_string(),
            normalizer: NormalizerConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Starts from the defaults and applies any `POST_REPLY_*` overrides.
    pub fn from_env() -> Result<Self, ReplyError> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("POST_REPLY_API_BASE") {
            config.endpoints.api_base = value;
        }
        if let Ok(value) = std::env::var("POST_REPLY_SCRAPE_URL") {
            config.endpoints.scrape_url = value;
        }
        if let Ok(value) = std::env::var("POST_REPLY_OEMBED_URL") {
            config.endpoints.oembed_url = value;
        }
        if let Ok(value) = std::env::var("POST_REPLY_USAGE_BASE") {
            config.endpoints.usage_base = value;
        }
        if let Ok(value) = std::env::var("POST_REPLY_TIMEOUT_SECS") {
            let secs: u64 = value.parse().map_err(|_| {
                ReplyError::InvalidConfiguration(format!(
                    "POST_REPLY_TIMEOUT_SECS must be a whole number of seconds, got {value}"
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Ok(value) = std::env::var("POST_REPLY_FIXTURE_HEURISTICS") {
            config.normalizer.fixture_heuristics =
                matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReplyError> {
        self.endpoints.validate()?;
        if self.timeout.is_zero() {
            return Err(ReplyError::InvalidConfiguration(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
