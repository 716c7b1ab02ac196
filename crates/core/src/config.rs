//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into services as an
//! `Arc<CoreConfig>`. Request handling never reads environment variables.

use crate::constants::{
    DEFAULT_AI_BASE_URL, DEFAULT_AI_TIMEOUT_SECS, DEFAULT_DB_PATH, DEFAULT_IMAGE_MODEL,
    DEFAULT_IMAGE_SIZE, DEFAULT_TEXT_MODEL, DEFAULT_USER_ID,
};
use crate::{BrandError, BrandResult};
use brandgen_types::NonEmptyText;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings for the OpenAI-compatible AI API.
#[derive(Clone, Debug)]
pub struct AiConfig {
    base_url: String,
    api_key: Option<String>,
    text_model: NonEmptyText,
    image_model: NonEmptyText,
    image_size: NonEmptyText,
    timeout: Duration,
}

impl AiConfig {
    /// Create a new `AiConfig`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Root of the OpenAI-compatible API, e.g. `https://api.openai.com/v1`
    /// * `api_key` - Bearer token; blank counts as unset
    /// * `text_model` - Model used for chat completions
    /// * `image_model` - Model used for image generation
    /// * `image_size` - Requested image dimensions, e.g. `512x512`
    /// * `timeout` - Per-request timeout applied to every AI call
    ///
    /// # Errors
    ///
    /// Returns `BrandError::InvalidInput` if the base URL, a model name or the image size is
    /// blank, or if the timeout is zero.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        text_model: &str,
        image_model: &str,
        image_size: &str,
        timeout: Duration,
    ) -> BrandResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(BrandError::InvalidInput(
                "AI base URL cannot be empty".into(),
            ));
        }
        if timeout.is_zero() {
            return Err(BrandError::InvalidInput(
                "AI timeout must be greater than zero".into(),
            ));
        }

        let required = |value: &str, what: &str| {
            NonEmptyText::new(value)
                .map_err(|_| BrandError::InvalidInput(format!("{what} cannot be empty")))
        };

        Ok(Self {
            base_url: base_url.to_string(),
            api_key: api_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            text_model: required(text_model, "text model")?,
            image_model: required(image_model, "image model")?,
            image_size: required(image_size, "image size")?,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `None` when no key was configured; every AI call then fails without a request.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn text_model(&self) -> &str {
        self.text_model.as_str()
    }

    pub fn image_model(&self) -> &str {
        self.image_model.as_str()
    }

    pub fn image_size(&self) -> &str {
        self.image_size.as_str()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database_path: PathBuf,
    default_user_id: NonEmptyText,
    ai: AiConfig,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `BrandError::InvalidInput` if `default_user_id` is blank.
    pub fn new(database_path: PathBuf, default_user_id: &str, ai: AiConfig) -> BrandResult<Self> {
        let default_user_id = NonEmptyText::new(default_user_id).map_err(|_| {
            BrandError::InvalidInput("default user id cannot be empty".into())
        })?;

        Ok(Self {
            database_path,
            default_user_id,
            ai,
        })
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Owner recorded on projects created without an explicit caller.
    pub fn default_user_id(&self) -> &str {
        self.default_user_id.as_str()
    }

    pub fn ai(&self) -> &AiConfig {
        &self.ai
    }
}

/// Parse the AI timeout from an optional string value (seconds).
///
/// `None` or blank yields the default timeout.
pub fn ai_timeout_from_env_value(value: Option<String>) -> BrandResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let secs = match value {
        None => DEFAULT_AI_TIMEOUT_SECS,
        Some(v) => v.parse::<u64>().map_err(|_| {
            BrandError::InvalidInput(format!(
                "BRANDGEN_AI_TIMEOUT_SECS must be a whole number of seconds, got: '{v}'"
            ))
        })?,
    };

    Ok(Duration::from_secs(secs))
}

/// Resolve [`CoreConfig`] from the process environment.
///
/// Intended to be called once from a binary's `main`, after `.env` has been loaded.
pub fn core_config_from_env() -> BrandResult<CoreConfig> {
    let var = |name: &str| std::env::var(name).ok();
    let var_or = |name: &str, default: &str| var(name).unwrap_or_else(|| default.to_string());

    let ai = AiConfig::new(
        &var_or("OPENAI_BASE_URL", DEFAULT_AI_BASE_URL),
        var("OPENAI_API_KEY"),
        &var_or("BRANDGEN_TEXT_MODEL", DEFAULT_TEXT_MODEL),
        &var_or("BRANDGEN_IMAGE_MODEL", DEFAULT_IMAGE_MODEL),
        &var_or("BRANDGEN_IMAGE_SIZE", DEFAULT_IMAGE_SIZE),
        ai_timeout_from_env_value(var("BRANDGEN_AI_TIMEOUT_SECS"))?,
    )?;

    CoreConfig::new(
        PathBuf::from(var_or("BRANDGEN_DB_PATH", DEFAULT_DB_PATH)),
        &var_or("BRANDGEN_DEFAULT_USER_ID", DEFAULT_USER_ID),
        ai,
    )
}
