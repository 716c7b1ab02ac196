//! The seam between the generators and the generative-AI API.
//!
//! Generators only see the [`TextGenerator`] and [`ImageGenerator`] traits. [`OpenAiClient`]
//! implements both over HTTP; tests substitute scripted stubs.
//!
//! [`AiError`] never leaves a generator. Every use site collapses a failed or unparseable reply
//! into its documented fallback value.

mod openai;
#[cfg(test)]
pub(crate) mod stub;

pub use openai::OpenAiClient;

use crate::config::AiConfig;
use crate::BrandResult;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("OPENAI_API_KEY is not configured")]
    MissingApiKey,
    #[error("AI request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("AI API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("AI API reply had no {0}")]
    EmptyResponse(&'static str),
}

pub type AiResult<T> = std::result::Result<T, AiError>;

/// One text-generation call: fixed instructions, user content and sampling bounds.
#[derive(Clone, Debug)]
pub struct TextRequest<'a> {
    pub system: &'a str,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Ask the model for a JSON object reply.
    pub json_reply: bool,
}

/// One image-generation call producing a single image.
#[derive(Clone, Debug)]
pub struct ImageRequest {
    pub prompt: String,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the model's reply text.
    async fn generate_text(&self, request: &TextRequest<'_>) -> AiResult<String>;
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Returns the URL of the generated image.
    async fn generate_image(&self, request: &ImageRequest) -> AiResult<String>;
}

/// The AI collaborators handed to the services.
#[derive(Clone)]
pub struct AiClients {
    pub text: Arc<dyn TextGenerator>,
    pub image: Arc<dyn ImageGenerator>,
}

impl AiClients {
    pub fn new(text: Arc<dyn TextGenerator>, image: Arc<dyn ImageGenerator>) -> Self {
        Self { text, image }
    }

    /// Both capabilities served by one [`OpenAiClient`].
    pub fn openai(cfg: &AiConfig) -> BrandResult<Self> {
        let client = Arc::new(OpenAiClient::new(cfg)?);
        Ok(Self {
            text: client.clone(),
            image: client,
        })
    }
}

/// Why a structured reply could not be used.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ParseFailure {
    #[error("AI call failed: {0}")]
    Call(#[from] AiError),
    #[error("reply is not the expected JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reply contained no usable brand names")]
    NoBrandNames,
}

/// Sends `request` and parses the reply strictly as `T`.
///
/// Missing keys and type mismatches are parse failures, as is anything that is not JSON.
pub(crate) async fn request_json<T: DeserializeOwned>(
    text: &dyn TextGenerator,
    request: &TextRequest<'_>,
) -> Result<T, ParseFailure> {
    let reply = text.generate_text(request).await?;
    Ok(serde_json::from_str(reply.trim())?)
}
