//! Folding stored elements back into the insight and brand-package views.
//!
//! Competitors and trials concatenate across elements of the same type. Positioning, palette
//! and leaflet take the first element found. Brand content keeps encounter order, which the
//! store guarantees is insertion order.

use crate::elements::{BrandElement, ElementContent};
use api_shared::{BrandPackageView, InsightsView, NameSuggestion};

/// Builds both views from a project's elements.
pub fn fold_elements(elements: &[BrandElement]) -> (InsightsView, BrandPackageView) {
    let mut insights = InsightsView::default();
    let mut package = BrandPackageView::default();

    for element in elements {
        match &element.content {
            ElementContent::InsightCompetitors(competitors) => {
                insights.competitors.extend(competitors.iter().cloned());
            }
            ElementContent::InsightBrandPositioning(positioning) => {
                insights.brand_positioning.get_or_insert_with(|| positioning.clone());
            }
            ElementContent::InsightColorPalette(palette) => {
                insights.color_palette.get_or_insert_with(|| palette.clone());
            }
            ElementContent::InsightCitedTrials(trials) => {
                insights.clinical_trials.extend(trials.iter().cloned());
            }
            ElementContent::BrandNameSuggestion(name) => {
                package
                    .brand_name_suggestions
                    .push(NameSuggestion { name: name.clone() });
            }
            ElementContent::LogoConcept(url) => {
                package
                    .logo_concepts
                    .push(api_shared::LogoConcept { url: url.clone() });
            }
            ElementContent::SloganSuggestion(pair) => package.slogans.push(pair.clone()),
            ElementContent::LeafletDraft(leaflet) => {
                package.leaflet_json.get_or_insert_with(|| leaflet.clone());
            }
        }

        if element.element_type().is_brand_content() && package.compliance_status.is_none() {
            package.compliance_status = element.compliance_status;
        }
    }

    package.brand_names = package
        .brand_name_suggestions
        .iter()
        .map(|s| s.name.clone())
        .collect();

    (insights, package)
}
