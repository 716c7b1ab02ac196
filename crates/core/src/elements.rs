//! Brand elements: the tagged units of generated content attached to a project.
//!
//! The store keeps every element in one table as an `element_type` tag plus a schema-less JSON
//! payload. In process the pair is decoded straight into [`ElementContent`], where the tag is the
//! enum discriminant and the payload shape follows from it:
//!
//! | tag | stored payload |
//! |---|---|
//! | `insight_competitors` | `{"competitors": [..]}` |
//! | `insight_brand_positioning` | `{"positioning": ".."}` |
//! | `insight_color_palette` | `[{name, hex, reason}, ..]` |
//! | `insight_cited_trials` | `{"trials": [{name, summary}, ..]}` |
//! | `brand_name_suggestion` | `{"name": ".."}` |
//! | `logo_concept` | `{"url": ".."}` |
//! | `slogan_suggestion` | `{"en": "..", "bn": ".."}` |
//! | `leaflet_draft` | leaflet object |

use crate::uuid::RecordId;
use crate::{BrandError, BrandResult};
use api_shared::{ClinicalTrial, ColorSwatch, ComplianceStatus, Leaflet, SloganPair};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    InsightCompetitors,
    InsightBrandPositioning,
    InsightColorPalette,
    InsightCitedTrials,
    BrandNameSuggestion,
    LogoConcept,
    SloganSuggestion,
    LeafletDraft,
}

impl ElementType {
    /// Element types that make up the brand content reviewed for compliance.
    pub const BRAND_CONTENT: [ElementType; 4] = [
        ElementType::BrandNameSuggestion,
        ElementType::LogoConcept,
        ElementType::SloganSuggestion,
        ElementType::LeafletDraft,
    ];

    /// The tag as stored in the `element_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InsightCompetitors => "insight_competitors",
            Self::InsightBrandPositioning => "insight_brand_positioning",
            Self::InsightColorPalette => "insight_color_palette",
            Self::InsightCitedTrials => "insight_cited_trials",
            Self::BrandNameSuggestion => "brand_name_suggestion",
            Self::LogoConcept => "logo_concept",
            Self::SloganSuggestion => "slogan_suggestion",
            Self::LeafletDraft => "leaflet_draft",
        }
    }

    /// Parses a stored tag.
    ///
    /// # Arguments
    ///
    /// * `s` - The exact tag text; no trimming or case folding is applied
    ///
    /// # Returns
    ///
    /// The matching `ElementType`.
    ///
    /// # Errors
    ///
    /// Returns `BrandError::UnknownElementType` for any tag outside the vocabulary.
    pub fn parse(s: &str) -> BrandResult<Self> {
        match s {
            "insight_competitors" => Ok(Self::InsightCompetitors),
            "insight_brand_positioning" => Ok(Self::InsightBrandPositioning),
            "insight_color_palette" => Ok(Self::InsightColorPalette),
            "insight_cited_trials" => Ok(Self::InsightCitedTrials),
            "brand_name_suggestion" => Ok(Self::BrandNameSuggestion),
            "logo_concept" => Ok(Self::LogoConcept),
            "slogan_suggestion" => Ok(Self::SloganSuggestion),
            "leaflet_draft" => Ok(Self::LeafletDraft),
            other => Err(BrandError::UnknownElementType(other.to_string())),
        }
    }

    pub fn is_brand_content(&self) -> bool {
        Self::BRAND_CONTENT.contains(self)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded element payload; the variant is the type tag.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementContent {
    InsightCompetitors(Vec<String>),
    InsightBrandPositioning(String),
    InsightColorPalette(Vec<ColorSwatch>),
    InsightCitedTrials(Vec<ClinicalTrial>),
    BrandNameSuggestion(String),
    LogoConcept(String),
    SloganSuggestion(SloganPair),
    LeafletDraft(Leaflet),
}

#[derive(Serialize, Deserialize)]
struct CompetitorsPayload {
    competitors: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct PositioningPayload {
    positioning: String,
}

#[derive(Serialize, Deserialize)]
struct TrialsPayload {
    trials: Vec<ClinicalTrial>,
}

#[derive(Serialize, Deserialize)]
struct NamePayload {
    name: String,
}

#[derive(Serialize, Deserialize)]
struct UrlPayload {
    url: String,
}

impl ElementContent {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::InsightCompetitors(_) => ElementType::InsightCompetitors,
            Self::InsightBrandPositioning(_) => ElementType::InsightBrandPositioning,
            Self::InsightColorPalette(_) => ElementType::InsightColorPalette,
            Self::InsightCitedTrials(_) => ElementType::InsightCitedTrials,
            Self::BrandNameSuggestion(_) => ElementType::BrandNameSuggestion,
            Self::LogoConcept(_) => ElementType::LogoConcept,
            Self::SloganSuggestion(_) => ElementType::SloganSuggestion,
            Self::LeafletDraft(_) => ElementType::LeafletDraft,
        }
    }

    /// Encodes the payload in its stored JSON shape.
    pub fn to_json(&self) -> BrandResult<Value> {
        let value = match self {
            Self::InsightCompetitors(competitors) => serde_json::to_value(CompetitorsPayload {
                competitors: competitors.clone(),
            }),
            Self::InsightBrandPositioning(positioning) => {
                serde_json::to_value(PositioningPayload {
                    positioning: positioning.clone(),
                })
            }
            Self::InsightColorPalette(palette) => serde_json::to_value(palette),
            Self::InsightCitedTrials(trials) => serde_json::to_value(TrialsPayload {
                trials: trials.clone(),
            }),
            Self::BrandNameSuggestion(name) => {
                serde_json::to_value(NamePayload { name: name.clone() })
            }
            Self::LogoConcept(url) => serde_json::to_value(UrlPayload { url: url.clone() }),
            Self::SloganSuggestion(pair) => serde_json::to_value(pair),
            Self::LeafletDraft(leaflet) => serde_json::to_value(leaflet),
        };
        value.map_err(BrandError::Serialization)
    }

    /// Decodes a stored payload according to its type tag.
    ///
    /// # Errors
    ///
    /// Returns [`BrandError::Deserialization`] when the payload does not have the shape its tag
    /// requires.
    pub fn from_json(element_type: ElementType, value: Value) -> BrandResult<Self> {
        fn decode<T: serde::de::DeserializeOwned>(value: Value) -> BrandResult<T> {
            serde_json::from_value(value).map_err(BrandError::Deserialization)
        }

        Ok(match element_type {
            ElementType::InsightCompetitors => {
                Self::InsightCompetitors(decode::<CompetitorsPayload>(value)?.competitors)
            }
            ElementType::InsightBrandPositioning => {
                Self::InsightBrandPositioning(decode::<PositioningPayload>(value)?.positioning)
            }
            ElementType::InsightColorPalette => Self::InsightColorPalette(decode(value)?),
            ElementType::InsightCitedTrials => {
                Self::InsightCitedTrials(decode::<TrialsPayload>(value)?.trials)
            }
            ElementType::BrandNameSuggestion => {
                Self::BrandNameSuggestion(decode::<NamePayload>(value)?.name)
            }
            ElementType::LogoConcept => Self::LogoConcept(decode::<UrlPayload>(value)?.url),
            ElementType::SloganSuggestion => Self::SloganSuggestion(decode(value)?),
            ElementType::LeafletDraft => Self::LeafletDraft(decode(value)?),
        })
    }
}

/// A brand element read back from the store.
#[derive(Clone, Debug, PartialEq)]
pub struct BrandElement {
    pub id: RecordId,
    pub project_id: RecordId,
    pub content: ElementContent,
    pub compliance_status: Option<ComplianceStatus>,
}

impl BrandElement {
    pub fn element_type(&self) -> ElementType {
        self.content.element_type()
    }
}
