//! Project creation, reconstruction, targeted edits and export.
//!
//! ## Creation pipeline
//!
//! [`ProjectService::create`] runs strictly in sequence:
//!
//! 1. validate the request (no AI call is made for an invalid request)
//! 2. generate insights
//! 3. generate the brand package from the insight palette
//! 4. insert the project row
//! 5. insert one element per non-empty insight field and per brand item, as one batch
//!
//! AI failures never abort the pipeline; the generators substitute fallbacks. Store failures
//! do. The project row and the element batch are separate writes, so a failed batch leaves a
//! project without elements.

use crate::ai::AiClients;
use crate::config::CoreConfig;
use crate::constants::PDF_EXPORT_BASE;
use crate::elements::{ElementContent, ElementType};
use crate::generators::{BrandPackageGenerator, InsightGenerator};
use crate::identity::CallerIdentity;
use crate::store::ProjectStore;
use crate::uuid::RecordId;
use crate::validation::validate_create_request;
use crate::views::fold_elements;
use crate::{BrandError, BrandResult};
use api_shared::{
    BrandPackage, CreateProjectReq, CreateProjectRes, ExportPdfRes, Insights, Leaflet,
    ListProjectsRes, Project, ProjectDetailRes, SloganPair, UpdateRes,
};
use brandgen_types::NonEmptyText;
use std::sync::Arc;

// ============================================================================
// PROJECT SERVICE
// ============================================================================

/// Entry point for every project operation except the compliance check.
#[derive(Clone)]
pub struct ProjectService {
    cfg: Arc<CoreConfig>,
    store: Arc<dyn ProjectStore>,
    insights: InsightGenerator,
    brand_package: BrandPackageGenerator,
}

impl ProjectService {
    /// # Arguments
    ///
    /// * `cfg` - Resolved configuration; supplies the default caller identity
    /// * `store` - Project persistence
    /// * `ai` - Text and image generators used by the creation pipeline
    pub fn new(cfg: Arc<CoreConfig>, store: Arc<dyn ProjectStore>, ai: &AiClients) -> Self {
        Self {
            cfg,
            store,
            insights: InsightGenerator::new(ai.text.clone()),
            brand_package: BrandPackageGenerator::new(ai.text.clone(), ai.image.clone()),
        }
    }

    /// Resolves the caller from an optionally supplied user id, falling back to the configured
    /// default.
    pub fn caller(&self, supplied: Option<&str>) -> BrandResult<CallerIdentity> {
        CallerIdentity::resolve(supplied, self.cfg.default_user_id())
    }

    /// Runs the creation pipeline and returns the stored project with the raw generator output.
    ///
    /// # Errors
    ///
    /// - [`BrandError::InvalidInput`] if neither molecule and therapeutic area nor a prompt
    ///   were given. Nothing is generated or stored.
    /// - Any store error from the project insert or the element batch. If the batch fails the
    ///   project row has already been written and is left in place.
    pub async fn create(
        &self,
        caller: &CallerIdentity,
        req: &CreateProjectReq,
    ) -> BrandResult<CreateProjectRes> {
        let input = validate_create_request(req)?;

        let insights = self.insights.generate(&input).await;
        let brand_package = self
            .brand_package
            .generate(
                input.molecule_str(),
                input.therapeutic_area_str(),
                &insights.color_palette,
            )
            .await;

        let project = self.store.insert_project(caller, &input)?;
        let project_id = RecordId::parse(&project.id)?;

        let contents = element_contents(&insights, &brand_package);
        if let Err(err) = self.store.insert_elements(&project_id, &contents) {
            tracing::error!(
                "element batch failed, project {project_id} stored without elements: {err}"
            );
            return Err(err);
        }

        tracing::info!(
            "created project {project_id} for {} with {} elements",
            caller.user_id(),
            contents.len()
        );

        Ok(CreateProjectRes {
            project,
            insights,
            brand_package,
        })
    }

    /// Projects in creation order, optionally only those owned by `user_id`.
    pub fn list(&self, user_id: Option<&str>) -> BrandResult<ListProjectsRes> {
        let user_id = user_id.map(str::trim).filter(|u| !u.is_empty());
        Ok(ListProjectsRes {
            projects: self.store.list_projects(user_id)?,
        })
    }

    /// Reconstructs a project and its insight and brand-package views.
    ///
    /// # Errors
    ///
    /// Returns [`BrandError::NotFound`] if the project does not exist.
    pub fn get(&self, id: &RecordId) -> BrandResult<ProjectDetailRes> {
        let project = self.require_project(id)?;
        let elements = self.store.elements_for_project(id)?;
        let (insights, brand_package) = fold_elements(&elements);

        Ok(ProjectDetailRes {
            project,
            insights,
            brand_package,
        })
    }

    /// Replaces the project's first brand name suggestion.
    ///
    /// # Errors
    ///
    /// [`BrandError::InvalidInput`] for a blank name, [`BrandError::NotFound`] for an unknown
    /// project.
    pub fn update_brand_name(&self, id: &RecordId, name: &str) -> BrandResult<UpdateRes> {
        let name = NonEmptyText::new(name)
            .map_err(|_| BrandError::InvalidInput("brand name must not be empty".into()))?;
        self.require_project(id)?;

        self.replace_or_append(id, ElementType::BrandNameSuggestion, |_| {
            ElementContent::BrandNameSuggestion(name.into_string())
        })
    }

    /// Replaces the source-language slogan, keeping any existing translation.
    pub fn update_slogan(&self, id: &RecordId, slogan: &str) -> BrandResult<UpdateRes> {
        self.require_project(id)?;

        self.replace_or_append(id, ElementType::SloganSuggestion, |existing| {
            let bn = match existing {
                Some(ElementContent::SloganSuggestion(pair)) => pair.bn,
                _ => String::new(),
            };
            ElementContent::SloganSuggestion(SloganPair {
                en: slogan.to_string(),
                bn,
            })
        })
    }

    /// Replaces the leaflet draft with a single free-text section.
    pub fn update_leaflet(&self, id: &RecordId, leaflet: &str) -> BrandResult<UpdateRes> {
        self.require_project(id)?;

        self.replace_or_append(id, ElementType::LeafletDraft, |_| {
            ElementContent::LeafletDraft(Leaflet::single_section(leaflet))
        })
    }

    /// Returns the download location of the rendered leaflet.
    ///
    /// Rendering is not implemented; the URL is a fixed placeholder.
    pub fn export_pdf(&self, id: &RecordId) -> BrandResult<ExportPdfRes> {
        self.require_project(id)?;
        Ok(ExportPdfRes {
            url: format!("{PDF_EXPORT_BASE}/fake-leaflet-{id}.pdf"),
        })
    }

    fn require_project(&self, id: &RecordId) -> BrandResult<Project> {
        self.store
            .get_project(id)?
            .ok_or_else(|| BrandError::NotFound(format!("project {id}")))
    }

    fn replace_or_append(
        &self,
        project_id: &RecordId,
        element_type: ElementType,
        build: impl FnOnce(Option<ElementContent>) -> ElementContent,
    ) -> BrandResult<UpdateRes> {
        match self.store.first_element_of_type(project_id, element_type)? {
            Some(element) => {
                let content = build(Some(element.content));
                self.store.update_element_content(&element.id, &content)?;
                tracing::info!("updated {element_type} {} of project {project_id}", element.id);
            }
            None => {
                let content = build(None);
                self.store.insert_elements(project_id, &[content])?;
                tracing::info!("added {element_type} to project {project_id}");
            }
        }
        Ok(UpdateRes { success: true })
    }
}

/// Element contents for a new project, in storage order.
///
/// Insight fields are only stored when non-empty. Brand names and logos are stored one
/// element each, logos in the same order as the names they belong to.
fn element_contents(insights: &Insights, package: &BrandPackage) -> Vec<ElementContent> {
    let mut contents = Vec::new();

    if !insights.competitors.is_empty() {
        contents.push(ElementContent::InsightCompetitors(insights.competitors.clone()));
    }
    if !insights.brand_positioning.trim().is_empty() {
        contents.push(ElementContent::InsightBrandPositioning(
            insights.brand_positioning.clone(),
        ));
    }
    if !insights.color_palette.is_empty() {
        contents.push(ElementContent::InsightColorPalette(insights.color_palette.clone()));
    }
    if !insights.clinical_trials.is_empty() {
        contents.push(ElementContent::InsightCitedTrials(insights.clinical_trials.clone()));
    }

    contents.extend(
        package
            .brand_names
            .iter()
            .map(|name| ElementContent::BrandNameSuggestion(name.clone())),
    );
    contents.extend(
        package
            .logo_concepts
            .iter()
            .map(|logo| ElementContent::LogoConcept(logo.url.clone())),
    );
    contents.extend(
        package
            .slogans
            .iter()
            .cloned()
            .map(ElementContent::SloganSuggestion),
    );
    if !package.leaflet_json.is_blank() {
        contents.push(ElementContent::LeafletDraft(package.leaflet_json.clone()));
    }

    contents
}
