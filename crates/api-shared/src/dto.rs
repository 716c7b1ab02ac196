//! Wire types for the brandgen APIs.
//!
//! These are the JSON shapes callers see. The core services build and return them directly, so
//! the REST layer only has to wrap them in `Json`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

// ============================================================================
// PROJECTS
// ============================================================================

/// Body of `POST /projects`.
///
/// Every field is optional on the wire; the pipeline requires molecule and therapeutic area, or
/// a natural-language prompt in their place.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateProjectReq {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub molecule_names: Option<String>,
    #[serde(default)]
    pub therapeutic_area: Option<String>,
    #[serde(default)]
    pub key_differentiating_benefits: Option<String>,
    #[serde(default)]
    pub natural_language_prompt: Option<String>,
}

/// A stored project row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Project {
    pub id: String,
    pub user_id: String,
    pub project_name: Option<String>,
    pub molecule_names: Option<String>,
    pub therapeutic_area: Option<String>,
    pub key_differentiating_benefits: Option<String>,
    pub natural_language_prompt: Option<String>,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ListProjectsRes {
    pub projects: Vec<Project>,
}

/// Response of `POST /projects`: the stored project plus the raw generator output.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateProjectRes {
    pub project: Project,
    pub insights: Insights,
    pub brand_package: BrandPackage,
}

/// Response of `GET /projects/{id}`: the project folded back together from its elements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectDetailRes {
    pub project: Project,
    pub insights: InsightsView,
    pub brand_package: BrandPackageView,
}

// ============================================================================
// INSIGHTS
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ColorSwatch {
    pub name: String,
    pub hex: String,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClinicalTrial {
    pub name: String,
    pub summary: String,
}

/// Output of the insight generator. All four keys are always present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Insights {
    pub competitors: Vec<String>,
    pub brand_positioning: String,
    pub color_palette: Vec<ColorSwatch>,
    pub clinical_trials: Vec<ClinicalTrial>,
}

/// Insights as reconstructed from stored elements; absent element types stay empty or null.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InsightsView {
    pub competitors: Vec<String>,
    pub brand_positioning: Option<String>,
    pub color_palette: Option<Vec<ColorSwatch>>,
    pub clinical_trials: Vec<ClinicalTrial>,
}

// ============================================================================
// BRAND PACKAGE
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SloganPair {
    pub en: String,
    pub bn: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LogoConcept {
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NameSuggestion {
    pub name: String,
}

/// Leaflet draft sections as produced by the model.
///
/// The model is asked for Introduction, Benefits, Clinical References, Patient Info and
/// Compliance sections, but the exact layout varies between replies, so the object is kept
/// as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaflet(pub Map<String, Value>);

impl Leaflet {
    /// The empty leaflet used when brand text generation fails.
    pub fn empty() -> Self {
        let mut map = Map::new();
        map.insert("sections".into(), Value::Array(Vec::new()));
        Self(map)
    }

    /// A leaflet holding one free-text section, as written by manual leaflet edits.
    pub fn single_section(content: &str) -> Self {
        let mut map = Map::new();
        map.insert(
            "sections".into(),
            serde_json::json!([{ "title": "Leaflet", "content": content }]),
        );
        Self(map)
    }

    /// True when no key carries any content (nulls, blank strings, empty arrays and objects).
    pub fn is_blank(&self) -> bool {
        fn blank(value: &Value) -> bool {
            match value {
                Value::Null => true,
                Value::String(s) => s.trim().is_empty(),
                Value::Array(items) => items.iter().all(blank),
                Value::Object(map) => map.values().all(blank),
                Value::Bool(_) | Value::Number(_) => false,
            }
        }
        self.0.values().all(blank)
    }
}

/// Output of the brand package generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BrandPackage {
    pub brand_names: Vec<String>,
    /// One entry per brand name, in the same order.
    pub logo_concepts: Vec<LogoConcept>,
    pub slogans: Vec<SloganPair>,
    pub color_palette: Vec<ColorSwatch>,
    #[schema(value_type = Object)]
    pub leaflet_json: Leaflet,
}

/// Brand package as reconstructed from stored elements.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BrandPackageView {
    pub brand_name_suggestions: Vec<NameSuggestion>,
    /// Flat list of the names in `brand_name_suggestions`.
    pub brand_names: Vec<String>,
    pub logo_concepts: Vec<LogoConcept>,
    pub slogans: Vec<SloganPair>,
    #[schema(value_type = Option<Object>)]
    pub leaflet_json: Option<Leaflet>,
    pub compliance_status: Option<ComplianceStatus>,
}

// ============================================================================
// EDITS, COMPLIANCE, EXPORT
// ============================================================================

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateRes {
    pub success: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceStatus {
    Approved,
    Rejected,
    Pending,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Pending => "pending",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ComplianceCheckRes {
    pub success: bool,
    pub status: ComplianceStatus,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ExportPdfRes {
    pub url: String,
}

/// Error body returned with every non-2xx response.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub detail: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}
