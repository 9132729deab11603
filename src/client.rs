use crate::config::{Credentials, PipelineConfig};
use crate::ReplyError;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use tracing::{debug, error, instrument, warn};

#[derive(Debug, Serialize)]
struct RequestContext {
    #[serde(rename = "httpMethod")]
    http_method: &'static str,
}

const POST_CONTEXT: RequestContext = RequestContext { http_method: "POST" };

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    #[serde(rename = "requestContext")]
    request_context: RequestContext,
    prompt: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tone_details: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SummarizeRequest<'a> {
    #[serde(rename = "requestContext")]
    request_context: RequestContext,
    text: &'a str,
    email: &'a str,
    style: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest<'a> {
    text: &'a str,
    target_language: String,
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePostRequest<'a> {
    post_topic: &'a str,
    content_tone: &'a str,
    post_length: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateRepostRequest<'a> {
    post_url: &'a str,
    content_tone: String,
    post_length: &'a str,
}

#[derive(Debug, Serialize)]
struct AboutMeRequest<'a> {
    industry: &'a str,
    experience: &'a str,
    skills: &'a str,
    goal: &'a str,
}

#[derive(Debug, Serialize)]
struct IncreaseCommentsRequest<'a> {
    email: &'a str,
    increment: i64,
}

/// Optional tone metadata forwarded alongside a comment prompt.
#[derive(Debug, Clone, Default)]
pub struct CommentExtras {
    pub tone: Option<String>,
    pub tone_details: Option<String>,
}

/// Client for the generation backend.
///
/// Every call is a single POST whose response body is returned as raw text.
/// Nothing is retried.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    api_base: String,
    usage_base: String,
    app_platform: String,
    credentials: Credentials,
}

impl ApiClient {
    pub fn new(config: &PipelineConfig, credentials: Credentials) -> Result<Self, ReplyError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                error!(error = %e, "Failed to create HTTP client");
                ReplyError::InvalidConfiguration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self::with_client(client, config, credentials))
    }

    pub fn with_client(client: Client, config: &PipelineConfig, credentials: Credentials) -> Self {
        Self {
            client,
            api_base: config.endpoints.api_base.trim_end_matches('/').to_string(),
            usage_base: config.endpoints.usage_base.trim_end_matches('/').to_string(),
            app_platform: config.app_platform.clone(),
            credentials,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// POST `/comment`. `identity` is sent as the `email` field.
    #[instrument(level = "debug", skip(self, prompt), err)]
    pub async fn comment(
        &self,
        prompt: &str,
        identity: &str,
        extras: &CommentExtras,
    ) -> Result<String, ReplyError> {
        let body = CommentRequest {
            request_context: POST_CONTEXT,
            prompt,
            email: identity,
            tone: extras.tone.as_deref(),
            tone_details: extras.tone_details.as_deref(),
        };
        let request = self
            .api_post("comment")
            .header("x-app-platform", self.app_platform.as_str());
        self.send_json(request, &body).await
    }

    /// POST `/summarize`. The style is sent lower-cased.
    #[instrument(level = "debug", skip(self, text), err)]
    pub async fn summarize(
        &self,
        text: &str,
        style: &str,
        email: Option<&str>,
    ) -> Result<String, ReplyError> {
        let body = SummarizeRequest {
            request_context: POST_CONTEXT,
            text,
            email: self.resolve_email(email),
            style: style.to_lowercase(),
        };
        self.send_json(self.api_post("summarize"), &body).await
    }

    /// POST `/translate`. The target language is sent lower-cased.
    #[instrument(level = "debug", skip(self, text), err)]
    pub async fn translate(
        &self,
        text: &str,
        target_language: &str,
        email: Option<&str>,
    ) -> Result<String, ReplyError> {
        let body = TranslateRequest {
            text,
            target_language: target_language.to_lowercase(),
            email: self.resolve_email(email),
        };
        let request = self
            .api_post("translate")
            .header("x-app-platform", self.app_platform.as_str());
        self.send_json(request, &body).await
    }

    #[instrument(level = "debug", skip(self), err)]
    pub async fn create_post(
        &self,
        post_topic: &str,
        content_tone: &str,
        post_length: &str,
    ) -> Result<String, ReplyError> {
        let body = CreatePostRequest {
            post_topic,
            content_tone,
            post_length,
        };
        self.send_json(self.api_post("create-post"), &body).await
    }

    /// POST `/create-repost`. Emoji and hashtag instructions are appended to
    /// the tone string.
    #[instrument(level = "debug", skip(self), err)]
    pub async fn create_repost(
        &self,
        post_url: &str,
        content_tone: &str,
        post_length: &str,
        use_emoji: bool,
        use_hashtag: bool,
    ) -> Result<String, ReplyError> {
        let body = CreateRepostRequest {
            post_url,
            content_tone: repost_tone(content_tone, use_emoji, use_hashtag),
            post_length,
        };
        self.send_json(self.api_post("create-repost"), &body).await
    }

    #[instrument(level = "debug", skip(self), err)]
    pub async fn create_about_me(
        &self,
        industry: &str,
        experience: &str,
        skills: &str,
        goal: &str,
    ) -> Result<String, ReplyError> {
        let body = AboutMeRequest {
            industry,
            experience,
            skills,
            goal,
        };
        self.send_json(self.api_post("create-about-me"), &body).await
    }

    /// POST `/increaseComments` on the usage base, outside the `/api` prefix.
    /// No bearer header is attached.
    #[instrument(level = "debug", skip(self), err)]
    pub async fn increase_comments(
        &self,
        email: Option<&str>,
        increment: i64,
    ) -> Result<String, ReplyError> {
        let body = IncreaseCommentsRequest {
            email: self.resolve_email(email),
            increment,
        };
        let request = self
            .client
            .post(format!("{}/increaseComments", self.usage_base));
        self.send_json(request, &body).await
    }

    fn resolve_email<'a>(&'a self, email: Option<&'a str>) -> &'a str {
        email.unwrap_or(&self.credentials.email)
    }

    fn api_post(&self, path: &str) -> RequestBuilder {
        let request = self.client.post(format!("{}/{}", self.api_base, path));
        match &self.credentials.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_json<T: Serialize>(
        &self,
        request: RequestBuilder,
        body: &T,
    ) -> Result<String, ReplyError> {
        let payload = serde_json::to_vec(body).map_err(|e| {
            error!(error = %e, "Failed to encode request body");
            ReplyError::Encoding(e.to_string())
        })?;

        let response = request
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!("Generation request timed out");
                } else {
                    error!(error = %e, "Failed to send generation request");
                }
                ReplyError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, url = %response.url(), "Backend returned error status");
            return Err(ReplyError::Http(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(|e| {
            error!(error = %e, "Failed to read generation response body");
            ReplyError::from(e)
        })?;

        debug!(content_length = bytes.len(), "Received generation response");
        String::from_utf8(bytes.to_vec()).map_err(|_| ReplyError::Decode)
    }
}

fn repost_tone(content_tone: &str, use_emoji: bool, use_hashtag: bool) -> String {
    let emoji = if use_emoji {
        "Use emoji, "
    } else {
        "Strictly do not Use emoji, "
    };
    let hashtag = if use_hashtag {
        "Use emojis and hashtags"
    } else {
        "Strictly do not Use emojis and hashtags"
    };
    format!("{content_tone}{emoji}{hashtag}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repost_tone_suffix() {
        assert_eq!(
            repost_tone("Professional. ", true, false),
            "Professional. Use emoji, Strictly do not Use emojis and hashtags"
        );
        assert_eq!(
            repost_tone("Casual. ", false, true),
            "Casual. Strictly do not Use emoji, Use emojis and hashtags"
        );
    }

    #[test]
    fn test_comment_body_shape() {
        let body = CommentRequest {
            request_context: POST_CONTEXT,
            prompt: "p",
            email: "me@example.com",
            tone: None,
            tone_details: Some("short"),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "requestContext": {"httpMethod": "POST"},
                "prompt": "p",
                "email": "me@example.com",
                "tone_details": "short"
            })
        );
    }
}
