use crate::{Completion, GenerationParams, VisionModel, VisionRequest, image_data_url};
use async_trait::async_trait;
use bon::bon;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error (status {status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("model returned an empty reply")]
    EmptyReply,
    #[error("no API key configured")]
    MissingApiKey,
}

impl ModelError {
    /// The provider could not be reached at all (connection refused, timed out).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_connect() || e.is_timeout())
    }
}

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Message {
    pub role: String,
    pub content: MessageContent,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<MessagePart>),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum MessagePart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ImageUrl {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Serialize, Debug)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
pub struct ChatFullResponse {
    pub choices: Vec<FullChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Deserialize)]
pub struct FullChoice {
    pub message: FullMessage,
}

#[derive(Deserialize)]
pub struct FullMessage {
    pub content: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct Usage {
    #[serde(default)]
    pub total_tokens: u64,
}

/// Client for an OpenAI-compatible `/v1/chat/completions` endpoint.
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

#[bon]
impl ChatClient {
    #[builder(start_fn = with_base_url)]
    #[must_use]
    pub fn new(
        #[builder(start_fn)] base_url: &str,
        model: Option<String>,
        api_key: Option<String>,
        http: Option<reqwest::Client>,
    ) -> Self {
        Self {
            http: http.unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.unwrap_or_else(|| "gpt-4o".to_string()),
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }

    #[must_use]
    pub fn prepare_message(&self, prompt: &str, image: &[u8], mime_type: &str, detail: &str) -> Message {
        Message {
            role: "user".to_string(),
            content: MessageContent::Parts(vec![
                MessagePart::Text {
                    text: prompt.to_string(),
                },
                MessagePart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_data_url(image, mime_type),
                        detail: Some(detail.to_string()).filter(|d| !d.is_empty()),
                    },
                },
            ]),
        }
    }

    pub async fn call(&self, messages: Vec<Message>, params: GenerationParams) -> ModelResult<Completion> {
        let Some(api_key) = &self.api_key else {
            return Err(ModelError::MissingApiKey);
        };
        let req_body = self.build_request(messages, params);
        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!(model = %self.model, max_tokens = params.max_tokens, "Sending chat completion");

        let response = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(&req_body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ModelError::Api {
                status: response.status(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let full: ChatFullResponse = response.json().await?;
        let content = full
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(ModelError::EmptyReply)?;
        Ok(Completion {
            content,
            total_tokens: full.usage.unwrap_or_default().total_tokens,
        })
    }

    fn build_request(&self, messages: Vec<Message>, params: GenerationParams) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
        }
    }
}

#[async_trait]
impl VisionModel for ChatClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, request: VisionRequest<'_>) -> ModelResult<Completion> {
        let message = self.prepare_message(
            request.prompt,
            request.image,
            request.mime_type,
            request.detail,
        );
        self.call(vec![message], request.params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PARAMS: GenerationParams = GenerationParams {
        max_tokens: 800,
        temperature: 0.5,
        top_p: 0.75,
    };

    #[test]
    fn request_carries_low_detail_image_and_sampling() -> serde_json::Result<()> {
        let client = ChatClient::with_base_url("https://api.openai.com/")
            .api_key("sk-test".to_string())
            .build();
        let message = client.prepare_message("Analyse", b"abc", "image/png", "low");
        let body = serde_json::to_value(client.build_request(vec![message], PARAMS))?;

        assert_eq!(body["model"], json!("gpt-4o"));
        assert_eq!(body["max_tokens"], json!(800));
        assert_eq!(body["temperature"], json!(0.5));
        assert_eq!(body["top_p"], json!(0.75));
        assert_eq!(
            body["messages"][0]["content"],
            json!([
                { "type": "text", "text": "Analyse" },
                {
                    "type": "image_url",
                    "image_url": { "url": "data:image/png;base64,YWJj", "detail": "low" }
                }
            ])
        );
        Ok(())
    }

    #[test]
    fn api_error_display_keeps_provider_body() {
        let error = ModelError::Api {
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
            body: r#"{"error":{"code":"rate_limit_exceeded"}}"#.to_string(),
        };
        assert!(error.to_string().contains("rate_limit_exceeded"));
        assert!(!error.is_transport());
    }

    #[test]
    fn configured_only_with_a_key() {
        let anonymous = ChatClient::with_base_url("http://localhost:8080").build();
        assert!(!anonymous.is_configured());

        let empty = ChatClient::with_base_url("http://localhost:8080")
            .api_key(String::new())
            .build();
        assert!(!empty.is_configured());
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let client = ChatClient::with_base_url("http://127.0.0.1:9").build();
        let result = client
            .complete(VisionRequest {
                prompt: "p",
                image: b"img",
                mime_type: "image/jpeg",
                detail: "low",
                params: PARAMS,
            })
            .await;
        assert!(matches!(result, Err(ModelError::MissingApiKey)));
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_transport_error() {
        // Port 9 (discard) is closed on test machines.
        let client = ChatClient::with_base_url("http://127.0.0.1:9")
            .api_key("sk-test".to_string())
            .build();
        let result = client
            .complete(VisionRequest {
                prompt: "p",
                image: b"img",
                mime_type: "image/jpeg",
                detail: "low",
                params: PARAMS,
            })
            .await;
        let error = result.err();
        assert!(error.as_ref().is_some_and(ModelError::is_transport), "{error:?}");
    }
}
