use crate::ai::{request_json, ParseFailure, TextGenerator, TextRequest};
use crate::constants::{INSIGHTS_MAX_TOKENS, INSIGHTS_TEMPERATURE};
use crate::validation::ProjectInput;
use api_shared::Insights;
use brandgen_types::NonEmptyText;
use std::sync::Arc;

const INSIGHTS_SYSTEM_PROMPT: &str = "You are a pharmaceutical brand strategist. \
Given a molecule, therapeutic area, and product benefits, generate: \
- Key competitors (list)\n\
- Brand positioning (1-2 lines)\n\
- Color palette (3-4 colors, each with name, hex, and reason)\n\
- Clinical trials (list, each with name and 1-line summary). \
Respond in JSON with keys: competitors, brand_positioning, color_palette, clinical_trials.";

/// Produces the strategic insight record for a new project.
#[derive(Clone)]
pub struct InsightGenerator {
    text: Arc<dyn TextGenerator>,
}

impl InsightGenerator {
    pub fn new(text: Arc<dyn TextGenerator>) -> Self {
        Self { text }
    }

    /// Generates insights, falling back to an empty record on any failure.
    pub async fn generate(&self, input: &ProjectInput) -> Insights {
        match self.try_generate(input).await {
            Ok(insights) => insights,
            Err(err) => {
                tracing::warn!("insight generation failed, using empty insights: {err}");
                Insights::default()
            }
        }
    }

    async fn try_generate(&self, input: &ProjectInput) -> Result<Insights, ParseFailure> {
        let request = TextRequest {
            system: INSIGHTS_SYSTEM_PROMPT,
            user: insights_user_prompt(input),
            max_tokens: INSIGHTS_MAX_TOKENS,
            temperature: INSIGHTS_TEMPERATURE,
            json_reply: true,
        };
        request_json(self.text.as_ref(), &request).await
    }
}

fn insights_user_prompt(input: &ProjectInput) -> String {
    format!(
        "Molecule: {}\nTherapeutic Area: {}\nBenefits: {}\n{}",
        input.molecule_str(),
        input.therapeutic_area_str(),
        input.benefits.as_ref().map_or("", NonEmptyText::as_str),
        input.prompt.as_ref().map_or("", NonEmptyText::as_str),
    )
}
