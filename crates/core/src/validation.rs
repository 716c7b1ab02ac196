//! Input validation for project creation.
//!
//! Validation runs before any AI call so that a request which cannot produce a project never
//! costs an external round trip.

use crate::{BrandError, BrandResult};
use api_shared::CreateProjectReq;
use brandgen_types::NonEmptyText;

/// A creation request after normalisation: blank fields are `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectInput {
    pub project_name: Option<NonEmptyText>,
    pub molecule: Option<NonEmptyText>,
    pub therapeutic_area: Option<NonEmptyText>,
    pub benefits: Option<NonEmptyText>,
    pub prompt: Option<NonEmptyText>,
}

impl ProjectInput {
    pub fn molecule_str(&self) -> &str {
        self.molecule.as_ref().map_or("", NonEmptyText::as_str)
    }

    pub fn therapeutic_area_str(&self) -> &str {
        self.therapeutic_area
            .as_ref()
            .map_or("", NonEmptyText::as_str)
    }
}

/// Normalises `req` and checks that generation has something to work with.
///
/// Molecule and therapeutic area must both be present, unless a natural-language prompt is
/// given in their place.
///
/// # Errors
///
/// Returns [`BrandError::InvalidInput`] when neither condition holds.
pub fn validate_create_request(req: &CreateProjectReq) -> BrandResult<ProjectInput> {
    let input = ProjectInput {
        project_name: NonEmptyText::from_optional(req.project_name.as_deref()),
        molecule: NonEmptyText::from_optional(req.molecule_names.as_deref()),
        therapeutic_area: NonEmptyText::from_optional(req.therapeutic_area.as_deref()),
        benefits: NonEmptyText::from_optional(req.key_differentiating_benefits.as_deref()),
        prompt: NonEmptyText::from_optional(req.natural_language_prompt.as_deref()),
    };

    let has_core_fields = input.molecule.is_some() && input.therapeutic_area.is_some();
    if !has_core_fields {
        if input.prompt.is_none() {
            return Err(BrandError::InvalidInput(
                "molecule names and therapeutic area are required if not using a natural language prompt"
                    .into(),
            ));
        }
        tracing::warn!(
            "core fields (molecule_names, therapeutic_area) missing, relying on prompt for generation"
        );
    }

    Ok(input)
}
