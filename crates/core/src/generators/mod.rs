//! AI-backed content generators.
//!
//! Both generators always return a usable value. Call and parse failures are logged and
//! replaced with fixed fallbacks inside the generator.

mod brand_package;
mod insights;

pub use brand_package::{placeholder_logo_url, BrandPackageGenerator};
pub use insights::InsightGenerator;

use api_shared::ColorSwatch;

/// Renders a palette for inclusion in a prompt; an empty palette renders as nothing.
pub(crate) fn palette_prompt_text(palette: &[ColorSwatch]) -> String {
    if palette.is_empty() {
        return String::new();
    }
    serde_json::to_string(palette).unwrap_or_default()
}
