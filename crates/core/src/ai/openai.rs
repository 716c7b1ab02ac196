//! OpenAI-compatible HTTP client.
//!
//! Text goes through `POST {base}/chat/completions`, images through
//! `POST {base}/images/generations`. The base URL is configurable so the same client works
//! against proxies and mock servers.

use super::{AiError, AiResult, ImageGenerator, ImageRequest, TextGenerator, TextRequest};
use crate::config::AiConfig;
use crate::{BrandError, BrandResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    text_model: String,
    image_model: String,
    image_size: String,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
}

#[derive(Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    #[serde(default)]
    url: Option<String>,
}

impl OpenAiClient {
    pub fn new(cfg: &AiConfig) -> BrandResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(BrandError::AiClientSetup)?;

        Ok(Self {
            http,
            base_url: cfg.base_url().to_string(),
            api_key: cfg.api_key().map(str::to_string),
            text_model: cfg.text_model().to_string(),
            image_model: cfg.image_model().to_string(),
            image_size: cfg.image_size().to_string(),
        })
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AiResult<R> {
        let api_key = self.api_key.as_deref().ok_or(AiError::MissingApiKey)?;

        let response = self
            .http
            .post(format!("{}/{}", self.base_url, path))
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate_text(&self, request: &TextRequest<'_>) -> AiResult<String> {
        let body = ChatRequest {
            model: &self.text_model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.json_reply.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let reply: ChatResponse = self.post_json("chat/completions", &body).await?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AiError::EmptyResponse("message content"))
    }
}

#[async_trait]
impl ImageGenerator for OpenAiClient {
    async fn generate_image(&self, request: &ImageRequest) -> AiResult<String> {
        let body = ImageGenerationRequest {
            model: &self.image_model,
            prompt: &request.prompt,
            n: 1,
            size: &self.image_size,
        };

        let reply: ImageGenerationResponse = self.post_json("images/generations", &body).await?;
        reply
            .data
            .into_iter()
            .next()
            .and_then(|datum| datum.url)
            .ok_or(AiError::EmptyResponse("image url"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, api_key: Option<&str>) -> OpenAiClient {
        let cfg = AiConfig::new(
            &format!("{}/v1", server.uri()),
            api_key.map(String::from),
            "gpt-4o",
            "dall-e-3",
            "512x512",
            Duration::from_secs(5),
        )
        .unwrap();
        OpenAiClient::new(&cfg).unwrap()
    }

    fn text_request(json_reply: bool) -> TextRequest<'static> {
        TextRequest {
            system: "You are terse.",
            user: "Say hi".into(),
            max_tokens: 10,
            temperature: 0.0,
            json_reply,
        }
    }

    #[tokio::test]
    async fn chat_completion_returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gpt-4o",
                "max_tokens": 10,
                "messages": [
                    {"role": "system", "content": "You are terse."},
                    {"role": "user", "content": "Say hi"}
                ],
                "response_format": {"type": "json_object"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "{\"ok\":true}"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-key"));
        let reply = client.generate_text(&text_request(true)).await.unwrap();
        assert_eq!(reply, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn plain_text_requests_omit_response_format() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "approved"}}]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-key"));
        client.generate_text(&text_request(false)).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("response_format").is_none());
    }

    #[tokio::test]
    async fn error_status_is_reported_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-key"));
        let err = client.generate_text(&text_request(false)).await.unwrap_err();
        match err {
            AiError::Status { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn reply_without_choices_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-key"));
        let err = client.generate_text(&text_request(false)).await.unwrap_err();
        assert!(matches!(err, AiError::EmptyResponse(_)));
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_a_request() {
        let server = MockServer::start().await;
        let client = client_for(&server, None);

        let err = client.generate_text(&text_request(false)).await.unwrap_err();
        assert!(matches!(err, AiError::MissingApiKey));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn image_generation_returns_first_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .and(body_partial_json(json!({
                "model": "dall-e-3",
                "n": 1,
                "size": "512x512",
                "prompt": "A teal logo"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"url": "https://images.example/logo.png"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-key"));
        let url = client
            .generate_image(&ImageRequest {
                prompt: "A teal logo".into(),
            })
            .await
            .unwrap();
        assert_eq!(url, "https://images.example/logo.png");
    }
}
