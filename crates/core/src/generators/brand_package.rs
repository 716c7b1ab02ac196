use super::palette_prompt_text;
use crate::ai::{
    request_json, ImageGenerator, ImageRequest, ParseFailure, TextGenerator, TextRequest,
};
use crate::constants::{
    BRAND_TEXT_MAX_TOKENS, BRAND_TEXT_TEMPERATURE, FALLBACK_BRAND_NAMES, FALLBACK_SLOGAN_BN,
    FALLBACK_SLOGAN_EN, PLACEHOLDER_LOGO_BASE,
};
use api_shared::{BrandPackage, ColorSwatch, Leaflet, LogoConcept, SloganPair};
use futures::future::join_all;
use serde::Deserialize;
use std::sync::Arc;

const BRAND_TEXT_SYSTEM_PROMPT: &str = "You are a pharmaceutical branding AI. \
Given a molecule, therapeutic area, and color palette, generate: \
- 3 creative brand names (list)\n\
- 1 English slogan (short, catchy)\n\
- Bengali translation of the slogan\n\
- A leaflet draft (JSON with sections: Introduction, Benefits, Clinical References, Patient Info (BN), Compliance)\n\
Respond in JSON with keys: brand_names, slogan_en, slogan_bn, leaflet_json.";

/// Shape the text stage must reply with; every key is required.
#[derive(Deserialize)]
struct BrandTextReply {
    brand_names: Vec<String>,
    slogan_en: String,
    slogan_bn: String,
    leaflet_json: Leaflet,
}

struct BrandText {
    names: Vec<String>,
    slogan: SloganPair,
    leaflet: Leaflet,
}

impl BrandText {
    fn fallback() -> Self {
        Self {
            names: FALLBACK_BRAND_NAMES.iter().map(|n| n.to_string()).collect(),
            slogan: SloganPair {
                en: FALLBACK_SLOGAN_EN.into(),
                bn: FALLBACK_SLOGAN_BN.into(),
            },
            leaflet: Leaflet::empty(),
        }
    }
}

/// Placeholder logo URL used when the image call for `name` fails.
pub fn placeholder_logo_url(name: &str) -> String {
    format!("{PLACEHOLDER_LOGO_BASE}/logo_{}.png", name.to_lowercase())
}

/// Produces brand names, a slogan pair, a leaflet draft and one logo per name.
#[derive(Clone)]
pub struct BrandPackageGenerator {
    text: Arc<dyn TextGenerator>,
    image: Arc<dyn ImageGenerator>,
}

impl BrandPackageGenerator {
    pub fn new(text: Arc<dyn TextGenerator>, image: Arc<dyn ImageGenerator>) -> Self {
        Self { text, image }
    }

    /// Runs the text stage, then one image call per brand name.
    ///
    /// Never fails: a failed text stage yields the fixed fallback names and slogan, and each
    /// failed image call yields a placeholder URL for that name only.
    pub async fn generate(
        &self,
        molecule: &str,
        therapeutic_area: &str,
        palette: &[ColorSwatch],
    ) -> BrandPackage {
        let palette_text = palette_prompt_text(palette);

        let text = match self.brand_text(molecule, therapeutic_area, &palette_text).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("brand text generation failed, using fallback names: {err}");
                BrandText::fallback()
            }
        };

        let logo_concepts = self
            .logos(&text.names, therapeutic_area, &palette_text)
            .await;

        BrandPackage {
            brand_names: text.names,
            logo_concepts,
            slogans: vec![text.slogan],
            color_palette: palette.to_vec(),
            leaflet_json: text.leaflet,
        }
    }

    async fn brand_text(
        &self,
        molecule: &str,
        therapeutic_area: &str,
        palette_text: &str,
    ) -> Result<BrandText, ParseFailure> {
        let request = TextRequest {
            system: BRAND_TEXT_SYSTEM_PROMPT,
            user: format!(
                "Molecule: {molecule}\nTherapeutic Area: {therapeutic_area}\nColor Palette: {palette_text}"
            ),
            max_tokens: BRAND_TEXT_MAX_TOKENS,
            temperature: BRAND_TEXT_TEMPERATURE,
            json_reply: true,
        };
        let reply: BrandTextReply = request_json(self.text.as_ref(), &request).await?;

        let names: Vec<String> = reply
            .brand_names
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        if names.is_empty() {
            return Err(ParseFailure::NoBrandNames);
        }

        Ok(BrandText {
            names,
            slogan: SloganPair {
                en: reply.slogan_en,
                bn: reply.slogan_bn,
            },
            leaflet: reply.leaflet_json,
        })
    }

    /// Issues the image calls concurrently; results keep the order of `names`.
    async fn logos(
        &self,
        names: &[String],
        therapeutic_area: &str,
        palette_text: &str,
    ) -> Vec<LogoConcept> {
        let calls = names.iter().map(|name| async move {
            let request = ImageRequest {
                prompt: format!(
                    "Pharmaceutical brand logo for '{name}', therapeutic area: {therapeutic_area}, \
                     color palette: {palette_text}. Minimal, modern, professional, high quality."
                ),
            };
            let url = match self.image.generate_image(&request).await {
                Ok(url) => url,
                Err(err) => {
                    tracing::warn!("logo generation failed for {name}, using placeholder: {err}");
                    placeholder_logo_url(name)
                }
            };
            LogoConcept { url }
        });

        join_all(calls).await
    }
}
