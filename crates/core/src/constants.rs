//! Constants used throughout the brandgen core crate.

/// Default SQLite database file when `BRANDGEN_DB_PATH` is not set.
pub const DEFAULT_DB_PATH: &str = "brandgen.db";

/// Default owner for projects created without an explicit caller identity.
pub const DEFAULT_USER_ID: &str = "demo-user";

/// Default base URL for the OpenAI-compatible API.
pub const DEFAULT_AI_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_TEXT_MODEL: &str = "gpt-4o";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
pub const DEFAULT_IMAGE_SIZE: &str = "512x512";
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 60;

/// Sampling settings for the insight generator.
pub const INSIGHTS_TEMPERATURE: f32 = 0.7;
pub const INSIGHTS_MAX_TOKENS: u32 = 600;

/// Sampling settings for the brand text stage.
pub const BRAND_TEXT_TEMPERATURE: f32 = 0.8;
pub const BRAND_TEXT_MAX_TOKENS: u32 = 700;

/// Sampling settings for the compliance verdict: deterministic, one word.
pub const COMPLIANCE_TEMPERATURE: f32 = 0.0;
pub const COMPLIANCE_MAX_TOKENS: u32 = 10;

/// Brand names used when the brand text stage fails.
pub const FALLBACK_BRAND_NAMES: [&str; 3] = ["BrandX", "BrandY", "BrandZ"];
pub const FALLBACK_SLOGAN_EN: &str = "Innovate Health.";
pub const FALLBACK_SLOGAN_BN: &str = "স্বাস্থ্য উদ্ভাবন করুন।";

/// Host used for placeholder logo URLs when an image call fails.
pub const PLACEHOLDER_LOGO_BASE: &str = "https://dummy.dalle.api";

/// Host used by the leaflet export stub.
pub const PDF_EXPORT_BASE: &str = "https://example.com";
