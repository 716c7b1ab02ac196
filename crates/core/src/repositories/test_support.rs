//! Shared fixtures for the service tests.

use crate::config::{AiConfig, CoreConfig};
use crate::elements::{BrandElement, ElementContent, ElementType};
use crate::identity::CallerIdentity;
use crate::store::{ProjectStore, SqliteProjectStore};
use crate::uuid::RecordId;
use crate::validation::ProjectInput;
use crate::{BrandError, BrandResult};
use api_shared::{ComplianceStatus, CreateProjectReq, Project};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub(crate) fn test_config() -> Arc<CoreConfig> {
    let ai = AiConfig::new(
        "http://127.0.0.1:9/v1",
        None,
        "gpt-4o",
        "dall-e-3",
        "512x512",
        Duration::from_secs(1),
    )
    .expect("ai config");
    Arc::new(CoreConfig::new(PathBuf::from(":memory:"), "demo-user", ai).expect("core config"))
}

pub(crate) fn memory_store() -> Arc<SqliteProjectStore> {
    Arc::new(SqliteProjectStore::open_in_memory().expect("in-memory store"))
}

pub(crate) fn metformin_request() -> CreateProjectReq {
    CreateProjectReq {
        project_name: Some("Launch".into()),
        molecule_names: Some("Metformin".into()),
        therapeutic_area: Some("Diabetes".into()),
        key_differentiating_benefits: Some("Once daily".into()),
        natural_language_prompt: None,
    }
}

pub(crate) const INSIGHTS_REPLY: &str = r##"{
    "competitors": ["Glucophage", "Januvia"],
    "brand_positioning": "Simple daily control.",
    "color_palette": [{"name": "Teal", "hex": "#008080", "reason": "Calm"}],
    "clinical_trials": [{"name": "UKPDS", "summary": "Long-term outcomes."}]
}"##;

pub(crate) const BRAND_TEXT_REPLY: &str = r#"{
    "brand_names": ["Glucara", "Metiva", "Sugarin"],
    "slogan_en": "Balance every day.",
    "slogan_bn": "প্রতিদিন ভারসাম্য।",
    "leaflet_json": {"sections": [{"title": "Introduction", "content": "Metformin once daily."}]}
}"#;

/// A SQLite store whose element batch insert always fails.
pub(crate) struct ElementWritesFail {
    pub(crate) inner: SqliteProjectStore,
}

impl ProjectStore for ElementWritesFail {
    fn insert_project(&self, owner: &CallerIdentity, input: &ProjectInput) -> BrandResult<Project> {
        self.inner.insert_project(owner, input)
    }

    fn insert_elements(
        &self,
        _project_id: &RecordId,
        _contents: &[ElementContent],
    ) -> BrandResult<Vec<BrandElement>> {
        Err(BrandError::StoreUnavailable)
    }

    fn get_project(&self, id: &RecordId) -> BrandResult<Option<Project>> {
        self.inner.get_project(id)
    }

    fn list_projects(&self, user_id: Option<&str>) -> BrandResult<Vec<Project>> {
        self.inner.list_projects(user_id)
    }

    fn elements_for_project(&self, project_id: &RecordId) -> BrandResult<Vec<BrandElement>> {
        self.inner.elements_for_project(project_id)
    }

    fn first_element_of_type(
        &self,
        project_id: &RecordId,
        element_type: ElementType,
    ) -> BrandResult<Option<BrandElement>> {
        self.inner.first_element_of_type(project_id, element_type)
    }

    fn update_element_content(
        &self,
        element_id: &RecordId,
        content: &ElementContent,
    ) -> BrandResult<()> {
        self.inner.update_element_content(element_id, content)
    }

    fn update_compliance_status(
        &self,
        project_id: &RecordId,
        status: ComplianceStatus,
    ) -> BrandResult<usize> {
        self.inner.update_compliance_status(project_id, status)
    }
}
