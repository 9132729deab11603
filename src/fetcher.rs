use super::is_twitter_url;
use crate::config::{PipelineConfig, DEFAULT_OEMBED_URL, DEFAULT_SCRAPE_URL, DEFAULT_TIMEOUT};
use crate::ReplyError;
use reqwest::{header::HeaderMap, Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};
use url::Url;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OEmbedResponse {
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_url: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub provider_url: Option<String>,
}

/// Unprocessed output of one fetch.
#[derive(Debug, Clone)]
pub enum RawContent {
    /// Body returned by the scrape endpoint, either a JSON object or free text
    Scraped(Vec<u8>),
    OEmbed(OEmbedResponse),
}

#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    scrape_url: String,
    oembed_url: String,
}

/// Creates a fetcher with custom configuration.
///
/// # Examples
/// ```ignore
/// let fetcher = Fetcher::new_with_config(FetcherConfig {
///     timeout: Duration::from_secs(10),
///     scrape_url: "http://localhost:8080/scrape".to_string(),
///     ..Default::default()
/// })?;
/// ```
pub struct FetcherConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub headers: Option<HeaderMap>,
    pub redirect_policy: Option<reqwest::redirect::Policy>,
    pub scrape_url: String,
    pub oembed_url: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("post_reply/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: DEFAULT_TIMEOUT,
            headers: None,
            redirect_policy: None,
            scrape_url: DEFAULT_SCRAPE_URL.to_string(),
            oembed_url: DEFAULT_OEMBED_URL.to_string(),
        }
    }
}

impl From<&PipelineConfig> for FetcherConfig {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            timeout: config.timeout,
            headers: None,
            redirect_policy: None,
            scrape_url: config.endpoints.scrape_url.clone(),
            oembed_url: config.endpoints.oembed_url.clone(),
        }
    }
}

impl Fetcher {
    pub fn new() -> Result<Self, ReplyError> {
        debug!("Fetcher initialized with default configuration");
        Self::new_with_config(FetcherConfig::default())
    }

    pub fn new_with_config(config: FetcherConfig) -> Result<Self, ReplyError> {
        let mut client_builder = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout);

        if let Some(headers) = config.headers {
            client_builder = client_builder.default_headers(headers);
        }

        if let Some(redirect_policy) = config.redirect_policy {
            client_builder = client_builder.redirect(redirect_policy);
        }

        let client = client_builder.build().map_err(|e| {
            error!(error = %e, "Failed to create HTTP client");
            ReplyError::InvalidConfiguration(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Self::with_client(client, config.scrape_url, config.oembed_url))
    }

    pub fn with_client(client: Client, scrape_url: String, oembed_url: String) -> Self {
        Self {
            client,
            scrape_url,
            oembed_url,
        }
    }

    /// Fetches the raw content behind a post URL.
    ///
    /// X/Twitter links go through oEmbed, everything else through the scrape
    /// endpoint. A single attempt is made; there is no retry.
    #[instrument(level = "debug", skip(self), err)]
    pub async fn fetch(&self, url: &str) -> Result<RawContent, ReplyError> {
        debug!(url = %url, "Starting fetch request");
        validate_post_url(url)?;

        if is_twitter_url(url) {
            debug!(url = %url, "Detected X/Twitter URL, using oEmbed API");
            let oembed = self.fetch_twitter_oembed(url).await?;
            Ok(RawContent::OEmbed(oembed))
        } else {
            let body = self.fetch_scraped(url).await?;
            Ok(RawContent::Scraped(body))
        }
    }

    async fn fetch_scraped(&self, post_url: &str) -> Result<Vec<u8>, ReplyError> {
        let request_url = with_url_param(&self.scrape_url, post_url)?;
        debug!(request = %request_url, "Requesting scrape endpoint");

        let response = self
            .client
            .get(request_url)
            .header("Content-Type", "application/json")
            .header("Cache-Control", "no-cache")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!(url = %post_url, "Scrape request timed out");
                } else {
                    error!(error = %e, url = %post_url, "Failed to send scrape request");
                }
                ReplyError::Network(e.to_string())
            })?;

        ensure_ok(response.status(), post_url)?;

        let body = response.bytes().await.map_err(|e| {
            error!(error = %e, url = %post_url, "Failed to read scrape response body");
            ReplyError::from(e)
        })?;

        debug!(url = %post_url, content_length = body.len(), "Successfully fetched scraped post");
        Ok(body.to_vec())
    }

    #[instrument(level = "debug", skip(self), err)]
    async fn fetch_twitter_oembed(&self, tweet_url: &str) -> Result<OEmbedResponse, ReplyError> {
        let oembed_url = with_url_param(&self.oembed_url, tweet_url)?;

        debug!(tweet_url = %tweet_url, "Fetching Twitter oEmbed data");

        let response = self.client.get(oembed_url).send().await.map_err(|e| {
            error!(error = %e, url = %tweet_url, "Failed to fetch Twitter oEmbed");
            ReplyError::Network(e.to_string())
        })?;

        ensure_ok(response.status(), tweet_url)?;

        let oembed: OEmbedResponse = response.json().await.map_err(|e| {
            error!(error = %e, url = %tweet_url, "Failed to parse Twitter oEmbed response");
            ReplyError::Parse(e.to_string())
        })?;

        debug!(tweet_url = %tweet_url, "Successfully fetched Twitter oEmbed data");
        Ok(oembed)
    }
}

fn ensure_ok(status: StatusCode, url: &str) -> Result<(), ReplyError> {
    if status == StatusCode::OK {
        return Ok(());
    }
    warn!(status = %status, url = %url, "Fetch returned non-200 status");
    Err(ReplyError::Http(status.as_u16()))
}

/// Appends `url=<post_url>` to an endpoint, percent-encoding the post URL.
fn with_url_param(endpoint: &str, post_url: &str) -> Result<Url, ReplyError> {
    Ok(Url::parse_with_params(endpoint, &[("url", post_url)])?)
}

fn validate_post_url(url: &str) -> Result<(), ReplyError> {
    let parsed = Url::parse(url).map_err(|e| ReplyError::InvalidUrl(format!("{url} ({e})")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ReplyError::InvalidUrl(format!(
            "{url} (unsupported scheme {})",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none() {
        return Err(ReplyError::InvalidUrl(format!("{url} (no host)")));
    }
    Ok(())
}
