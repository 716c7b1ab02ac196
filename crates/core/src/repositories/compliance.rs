//! Regulatory compliance review of a project's brand content.
//!
//! The reviewed snapshot is the project's first brand name, first slogan and first leaflet.
//! The model is asked for a one-word verdict; anything other than a clear approval or
//! rejection, including a failed call, becomes [`ComplianceStatus::Pending`].

use crate::ai::{TextGenerator, TextRequest};
use crate::constants::{COMPLIANCE_MAX_TOKENS, COMPLIANCE_TEMPERATURE};
use crate::elements::{ElementContent, ElementType};
use crate::store::ProjectStore;
use crate::uuid::RecordId;
use crate::{BrandError, BrandResult};
use api_shared::{ComplianceCheckRes, ComplianceStatus};
use std::sync::Arc;

const COMPLIANCE_SYSTEM_PROMPT: &str = "You are a pharmaceutical regulatory compliance expert for Bangladesh DGDA. \
Given the following brand name, slogan, and leaflet sections, check if the content is compliant with DGDA rules for pharmaceutical marketing. \
Respond ONLY with one word: 'approved' or 'rejected'.";

/// Maps a model reply onto a compliance status.
pub fn verdict(reply: &str) -> ComplianceStatus {
    let reply = reply.trim().to_lowercase();
    if reply.contains("approved") {
        ComplianceStatus::Approved
    } else if reply.contains("rejected") {
        ComplianceStatus::Rejected
    } else {
        ComplianceStatus::Pending
    }
}

#[derive(Clone)]
pub struct ComplianceService {
    store: Arc<dyn ProjectStore>,
    text: Arc<dyn TextGenerator>,
}

impl ComplianceService {
    pub fn new(store: Arc<dyn ProjectStore>, text: Arc<dyn TextGenerator>) -> Self {
        Self { store, text }
    }

    /// Reviews the project's brand content and stamps the verdict on every brand element.
    ///
    /// # Errors
    ///
    /// Returns [`BrandError::NotFound`] if the project has no brand name, slogan or leaflet.
    /// No status is written in that case.
    pub async fn check(&self, project_id: &RecordId) -> BrandResult<ComplianceCheckRes> {
        let first = |element_type| -> BrandResult<Option<ElementContent>> {
            Ok(self
                .store
                .first_element_of_type(project_id, element_type)?
                .map(|element| element.content))
        };

        let name = match first(ElementType::BrandNameSuggestion)? {
            Some(ElementContent::BrandNameSuggestion(name)) => Some(name),
            _ => None,
        };
        let slogan = match first(ElementType::SloganSuggestion)? {
            Some(ElementContent::SloganSuggestion(pair)) => Some(pair.en),
            _ => None,
        };
        let leaflet = match first(ElementType::LeafletDraft)? {
            Some(ElementContent::LeafletDraft(leaflet)) => Some(leaflet),
            _ => None,
        };

        if name.is_none() && slogan.is_none() && leaflet.is_none() {
            return Err(BrandError::NotFound(format!(
                "brand content for project {project_id}"
            )));
        }

        let leaflet_text = match &leaflet {
            Some(leaflet) => serde_json::to_string(leaflet).map_err(BrandError::Serialization)?,
            None => String::new(),
        };
        let request = TextRequest {
            system: COMPLIANCE_SYSTEM_PROMPT,
            user: format!(
                "Brand: {}\nSlogan: {}\nLeaflet: {leaflet_text}",
                name.as_deref().unwrap_or(""),
                slogan.as_deref().unwrap_or(""),
            ),
            max_tokens: COMPLIANCE_MAX_TOKENS,
            temperature: COMPLIANCE_TEMPERATURE,
            json_reply: false,
        };

        let status = match self.text.generate_text(&request).await {
            Ok(reply) => verdict(&reply),
            Err(err) => {
                tracing::warn!(
                    "compliance call failed for project {project_id}, marking pending: {err}"
                );
                ComplianceStatus::Pending
            }
        };

        let stamped = self.store.update_compliance_status(project_id, status)?;
        tracing::info!("project {project_id} compliance {status} ({stamped} elements)");

        Ok(ComplianceCheckRes {
            success: true,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::stub::ScriptedText;
    use crate::identity::CallerIdentity;
    use crate::repositories::test_support::memory_store;
    use crate::store::SqliteProjectStore;
    use crate::validation::validate_create_request;
    use api_shared::{CreateProjectReq, Leaflet, SloganPair};

    fn seeded(store: &SqliteProjectStore, contents: &[ElementContent]) -> RecordId {
        let input = validate_create_request(&CreateProjectReq {
            molecule_names: Some("Metformin".into()),
            therapeutic_area: Some("Diabetes".into()),
            ..Default::default()
        })
        .unwrap();
        let project = store
            .insert_project(&CallerIdentity::new("demo-user").unwrap(), &input)
            .unwrap();
        let id = RecordId::parse(&project.id).unwrap();
        store.insert_elements(&id, contents).unwrap();
        id
    }

    fn brand_contents() -> Vec<ElementContent> {
        vec![
            ElementContent::InsightCompetitors(vec!["Glucophage".into()]),
            ElementContent::BrandNameSuggestion("Glucara".into()),
            ElementContent::LogoConcept("https://images.test/1.png".into()),
            ElementContent::SloganSuggestion(SloganPair {
                en: "Balance every day.".into(),
                bn: "প্রতিদিন ভারসাম্য।".into(),
            }),
            ElementContent::LeafletDraft(Leaflet::single_section("Once daily.")),
        ]
    }

    #[test]
    fn verdict_reads_the_reply_loosely() {
        assert_eq!(verdict("Approved."), ComplianceStatus::Approved);
        assert_eq!(verdict("  APPROVED\n"), ComplianceStatus::Approved);
        assert_eq!(verdict("I think rejected"), ComplianceStatus::Rejected);
        assert_eq!(verdict("unsure"), ComplianceStatus::Pending);
        assert_eq!(verdict(""), ComplianceStatus::Pending);
    }

    #[tokio::test]
    async fn approval_is_stamped_on_brand_content_only() {
        let store = memory_store();
        let id = seeded(&store, &brand_contents());
        let text = Arc::new(ScriptedText::new().reply("Approved."));
        let service = ComplianceService::new(store.clone(), text.clone());

        let res = service.check(&id).await.unwrap();
        assert!(res.success);
        assert_eq!(res.status, ComplianceStatus::Approved);

        let elements = store.elements_for_project(&id).unwrap();
        for element in &elements {
            if element.element_type().is_brand_content() {
                assert_eq!(element.compliance_status, Some(ComplianceStatus::Approved));
            } else {
                assert_eq!(element.compliance_status, None);
            }
        }

        let (_, user) = &text.seen()[0];
        assert!(user.starts_with("Brand: Glucara\nSlogan: Balance every day.\nLeaflet: {"));
    }

    #[tokio::test]
    async fn call_failure_records_pending() {
        let store = memory_store();
        let id = seeded(&store, &brand_contents());
        let service = ComplianceService::new(store.clone(), Arc::new(ScriptedText::new().fail()));

        let res = service.check(&id).await.unwrap();
        assert_eq!(res.status, ComplianceStatus::Pending);
        let name = store
            .first_element_of_type(&id, ElementType::BrandNameSuggestion)
            .unwrap()
            .unwrap();
        assert_eq!(name.compliance_status, Some(ComplianceStatus::Pending));
    }

    #[tokio::test]
    async fn rejection_is_recorded() {
        let store = memory_store();
        let id = seeded(&store, &brand_contents());
        let service =
            ComplianceService::new(store.clone(), Arc::new(ScriptedText::new().reply("rejected")));
        assert_eq!(service.check(&id).await.unwrap().status, ComplianceStatus::Rejected);
    }

    #[tokio::test]
    async fn project_without_brand_content_is_not_found() {
        let store = memory_store();
        let id = seeded(
            &store,
            &[ElementContent::InsightBrandPositioning("Simple.".into())],
        );
        let text = Arc::new(ScriptedText::new().reply("approved"));
        let service = ComplianceService::new(store.clone(), text.clone());

        let err = service.check(&id).await.unwrap_err();
        assert!(matches!(err, BrandError::NotFound(_)));
        assert_eq!(text.calls(), 0);
        assert!(
            store
                .elements_for_project(&id)
                .unwrap()
                .iter()
                .all(|e| e.compliance_status.is_none())
        );
    }

    #[tokio::test]
    async fn unknown_project_is_not_found() {
        let service = ComplianceService::new(memory_store(), Arc::new(ScriptedText::new()));
        let err = service.check(&RecordId::new()).await.unwrap_err();
        assert!(matches!(err, BrandError::NotFound(_)));
    }
}
