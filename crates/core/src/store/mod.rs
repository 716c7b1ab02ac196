//! Project persistence.
//!
//! Two logical collections: `projects` and `brand_elements`. The services depend on the
//! [`ProjectStore`] trait; [`SqliteProjectStore`] is the production implementation.
//!
//! Writing a project and writing its elements are two separate calls. If the element batch
//! fails after the project row was written, the project row stays behind without elements.

mod sqlite;

pub use sqlite::SqliteProjectStore;

use crate::elements::{BrandElement, ElementContent, ElementType};
use crate::identity::CallerIdentity;
use crate::uuid::RecordId;
use crate::validation::ProjectInput;
use crate::BrandResult;
use api_shared::{ComplianceStatus, Project};

pub trait ProjectStore: Send + Sync {
    /// Inserts one project row owned by `owner`, assigning its id and creation time.
    fn insert_project(&self, owner: &CallerIdentity, input: &ProjectInput) -> BrandResult<Project>;

    /// Inserts `contents` as elements of `project_id`, in order, as one batch.
    fn insert_elements(
        &self,
        project_id: &RecordId,
        contents: &[ElementContent],
    ) -> BrandResult<Vec<BrandElement>>;

    fn get_project(&self, id: &RecordId) -> BrandResult<Option<Project>>;

    /// Projects in creation order, optionally limited to one owner.
    fn list_projects(&self, user_id: Option<&str>) -> BrandResult<Vec<Project>>;

    /// All elements of a project in insertion order.
    fn elements_for_project(&self, project_id: &RecordId) -> BrandResult<Vec<BrandElement>>;

    /// The earliest-inserted element of `element_type` for a project.
    fn first_element_of_type(
        &self,
        project_id: &RecordId,
        element_type: ElementType,
    ) -> BrandResult<Option<BrandElement>>;

    /// Replaces an element's content and clears its compliance status.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BrandError::NotFound`] if no element has `element_id`.
    fn update_element_content(
        &self,
        element_id: &RecordId,
        content: &ElementContent,
    ) -> BrandResult<()>;

    /// Stamps `status` on every brand-content element of a project; returns the rows touched.
    fn update_compliance_status(
        &self,
        project_id: &RecordId,
        status: ComplianceStatus,
    ) -> BrandResult<usize>;
}
