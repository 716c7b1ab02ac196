//! SQLite-backed [`ProjectStore`].

use super::ProjectStore;
use crate::elements::{BrandElement, ElementContent, ElementType};
use crate::identity::CallerIdentity;
use crate::uuid::RecordId;
use crate::validation::ProjectInput;
use crate::{BrandError, BrandResult};
use api_shared::{ComplianceStatus, Project};
use brandgen_types::NonEmptyText;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const SCHEMA_SQL: &str = include_str!("../../schema.sql");

const PROJECT_COLUMNS: &str = "id, user_id, project_name, molecule_names, therapeutic_area, \
     key_differentiating_benefits, natural_language_prompt, created_at";

const ELEMENT_COLUMNS: &str = "id, project_id, element_type, content, compliance_status";

/// Element row as stored, before the payload is decoded.
struct ElementRow {
    id: String,
    project_id: String,
    element_type: String,
    content: String,
    compliance_status: Option<String>,
}

impl ElementRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            project_id: row.get(1)?,
            element_type: row.get(2)?,
            content: row.get(3)?,
            compliance_status: row.get(4)?,
        })
    }

    fn decode(self) -> BrandResult<BrandElement> {
        let element_type = ElementType::parse(&self.element_type)?;
        let payload = serde_json::from_str(&self.content).map_err(BrandError::Deserialization)?;
        let compliance_status = self
            .compliance_status
            .map(|s| {
                ComplianceStatus::parse(&s).ok_or(BrandError::UnknownComplianceStatus(s))
            })
            .transpose()?;

        Ok(BrandElement {
            id: RecordId::parse(&self.id)?,
            project_id: RecordId::parse(&self.project_id)?,
            content: ElementContent::from_json(element_type, payload)?,
            compliance_status,
        })
    }
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        user_id: row.get(1)?,
        project_name: row.get(2)?,
        molecule_names: row.get(3)?,
        therapeutic_area: row.get(4)?,
        key_differentiating_benefits: row.get(5)?,
        natural_language_prompt: row.get(6)?,
        created_at: row.get(7)?,
    })
}

pub struct SqliteProjectStore {
    conn: Mutex<Connection>,
}

impl SqliteProjectStore {
    /// Opens (creating if needed) the database at `path` and applies the schema.
    pub fn open(path: &Path) -> BrandResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(BrandError::DatabaseDirCreation)?;
        }

        let conn = Connection::open(path)?;
        Self::apply_schema(&conn)?;

        tracing::debug!(path = %path.display(), "project store opened");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a private in-memory database. Contents vanish when the store is dropped.
    pub fn open_in_memory() -> BrandResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::apply_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn apply_schema(conn: &Connection) -> BrandResult<()> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    fn lock(&self) -> BrandResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| BrandError::StoreUnavailable)
    }
}

impl ProjectStore for SqliteProjectStore {
    fn insert_project(&self, owner: &CallerIdentity, input: &ProjectInput) -> BrandResult<Project> {
        let text = |v: &Option<NonEmptyText>| v.as_ref().map(|t| t.as_str().to_string());

        let project = Project {
            id: RecordId::new().to_string(),
            user_id: owner.user_id().to_string(),
            project_name: text(&input.project_name),
            molecule_names: text(&input.molecule),
            therapeutic_area: text(&input.therapeutic_area),
            key_differentiating_benefits: text(&input.benefits),
            natural_language_prompt: text(&input.prompt),
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = self.lock()?;
        conn.execute(
            &format!(
                "INSERT INTO projects ({PROJECT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
            ),
            params![
                project.id,
                project.user_id,
                project.project_name,
                project.molecule_names,
                project.therapeutic_area,
                project.key_differentiating_benefits,
                project.natural_language_prompt,
                project.created_at,
            ],
        )?;

        tracing::debug!(project_id = %project.id, user_id = %project.user_id, "inserted project");
        Ok(project)
    }

    fn insert_elements(
        &self,
        project_id: &RecordId,
        contents: &[ElementContent],
    ) -> BrandResult<Vec<BrandElement>> {
        let encoded = contents
            .iter()
            .map(|c| -> BrandResult<(&ElementContent, String)> {
                let json =
                    serde_json::to_string(&c.to_json()?).map_err(BrandError::Serialization)?;
                Ok((c, json))
            })
            .collect::<BrandResult<Vec<_>>>()?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let created_at = Utc::now().to_rfc3339();
        let mut inserted = Vec::with_capacity(encoded.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO brand_elements (id, project_id, element_type, content, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (content, json) in encoded {
                let id = RecordId::new();
                stmt.execute(params![
                    id.to_string(),
                    project_id.to_string(),
                    content.element_type().as_str(),
                    json,
                    created_at,
                ])?;
                inserted.push(BrandElement {
                    id,
                    project_id: project_id.clone(),
                    content: content.clone(),
                    compliance_status: None,
                });
            }
        }
        tx.commit()?;

        tracing::debug!(
            project_id = %project_id,
            count = inserted.len(),
            "inserted brand elements"
        );
        Ok(inserted)
    }

    fn get_project(&self, id: &RecordId) -> BrandResult<Option<Project>> {
        let conn = self.lock()?;
        let project = conn
            .query_row(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
                params![id.to_string()],
                project_from_row,
            )
            .optional()?;
        Ok(project)
    }

    fn list_projects(&self, user_id: Option<&str>) -> BrandResult<Vec<Project>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE (?1 IS NULL OR user_id = ?1)
             ORDER BY created_at, rowid"
        ))?;
        let projects = stmt
            .query_map(params![user_id], project_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(projects)
    }

    fn elements_for_project(&self, project_id: &RecordId) -> BrandResult<Vec<BrandElement>> {
        let rows = {
            let conn = self.lock()?;
            let mut stmt = conn.prepare(&format!(
                "SELECT {ELEMENT_COLUMNS} FROM brand_elements WHERE project_id = ?1 ORDER BY seq"
            ))?;
            let rows = stmt
                .query_map(params![project_id.to_string()], ElementRow::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };
        rows.into_iter().map(ElementRow::decode).collect()
    }

    fn first_element_of_type(
        &self,
        project_id: &RecordId,
        element_type: ElementType,
    ) -> BrandResult<Option<BrandElement>> {
        let row = {
            let conn = self.lock()?;
            conn.query_row(
                &format!(
                    "SELECT {ELEMENT_COLUMNS} FROM brand_elements
                     WHERE project_id = ?1 AND element_type = ?2
                     ORDER BY seq LIMIT 1"
                ),
                params![project_id.to_string(), element_type.as_str()],
                ElementRow::from_row,
            )
            .optional()?
        };
        row.map(ElementRow::decode).transpose()
    }

    fn update_element_content(
        &self,
        element_id: &RecordId,
        content: &ElementContent,
    ) -> BrandResult<()> {
        let json = serde_json::to_string(&content.to_json()?).map_err(BrandError::Serialization)?;
        let conn = self.lock()?;
        let updated = conn.execute(
            "UPDATE brand_elements SET content = ?1, element_type = ?2, compliance_status = NULL
             WHERE id = ?3",
            params![json, content.element_type().as_str(), element_id.to_string()],
        )?;
        if updated == 0 {
            return Err(BrandError::NotFound(format!("brand element {element_id}")));
        }
        Ok(())
    }

    fn update_compliance_status(
        &self,
        project_id: &RecordId,
        status: ComplianceStatus,
    ) -> BrandResult<usize> {
        let brand_types = ElementType::BRAND_CONTENT
            .iter()
            .map(|t| format!("'{}'", t.as_str()))
            .collect::<Vec<_>>()
            .join(", ");

        let conn = self.lock()?;
        let updated = conn.execute(
            &format!(
                "UPDATE brand_elements SET compliance_status = ?1
                 WHERE project_id = ?2 AND element_type IN ({brand_types})"
            ),
            params![status.as_str(), project_id.to_string()],
        )?;

        tracing::debug!(
            project_id = %project_id,
            status = %status,
            updated,
            "stamped compliance status"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_shared::{ColorSwatch, Leaflet, SloganPair};
    use tempfile::TempDir;

    fn owner() -> CallerIdentity {
        CallerIdentity::new("demo-user").unwrap()
    }

    fn input(molecule: &str) -> ProjectInput {
        ProjectInput {
            project_name: NonEmptyText::from_optional(Some("Launch")),
            molecule: NonEmptyText::from_optional(Some(molecule)),
            therapeutic_area: NonEmptyText::from_optional(Some("Diabetes")),
            benefits: None,
            prompt: None,
        }
    }

    fn sample_contents() -> Vec<ElementContent> {
        vec![
            ElementContent::InsightCompetitors(vec!["Januvia".into()]),
            ElementContent::InsightColorPalette(vec![ColorSwatch {
                name: "Teal".into(),
                hex: "#008080".into(),
                reason: String::new(),
            }]),
            ElementContent::BrandNameSuggestion("Glucora".into()),
            ElementContent::LogoConcept("https://img/glucora.png".into()),
            ElementContent::SloganSuggestion(SloganPair {
                en: "Balance made simple".into(),
                bn: "ভারসাম্য সহজ".into(),
            }),
            ElementContent::LeafletDraft(Leaflet::single_section("Take once daily")),
        ]
    }

    #[test]
    fn project_round_trips_through_the_store() {
        let store = SqliteProjectStore::open_in_memory().unwrap();
        let project = store.insert_project(&owner(), &input("Metformin")).unwrap();

        assert!(RecordId::is_canonical(&project.id));
        let id = RecordId::parse(&project.id).unwrap();
        assert_eq!(store.get_project(&id).unwrap(), Some(project));
    }

    #[test]
    fn missing_project_reads_as_none() {
        let store = SqliteProjectStore::open_in_memory().unwrap();
        assert_eq!(store.get_project(&RecordId::new()).unwrap(), None);
    }

    #[test]
    fn elements_come_back_in_insertion_order() {
        let store = SqliteProjectStore::open_in_memory().unwrap();
        let project = store.insert_project(&owner(), &input("Metformin")).unwrap();
        let id = RecordId::parse(&project.id).unwrap();

        let contents = sample_contents();
        store.insert_elements(&id, &contents).unwrap();

        let read: Vec<ElementContent> = store
            .elements_for_project(&id)
            .unwrap()
            .into_iter()
            .map(|e| e.content)
            .collect();
        assert_eq!(read, contents);
    }

    #[test]
    fn elements_for_unknown_project_fail_the_whole_batch() {
        let store = SqliteProjectStore::open_in_memory().unwrap();
        let orphan = RecordId::new();
        assert!(store.insert_elements(&orphan, &sample_contents()).is_err());
        assert!(store.elements_for_project(&orphan).unwrap().is_empty());
    }

    #[test]
    fn list_filters_by_owner() {
        let store = SqliteProjectStore::open_in_memory().unwrap();
        store.insert_project(&owner(), &input("Metformin")).unwrap();
        store
            .insert_project(&CallerIdentity::new("alice").unwrap(), &input("Atorvastatin"))
            .unwrap();

        assert_eq!(store.list_projects(None).unwrap().len(), 2);
        let alice = store.list_projects(Some("alice")).unwrap();
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].molecule_names.as_deref(), Some("Atorvastatin"));
    }

    #[test]
    fn first_element_of_type_picks_the_earliest() {
        let store = SqliteProjectStore::open_in_memory().unwrap();
        let project = store.insert_project(&owner(), &input("Metformin")).unwrap();
        let id = RecordId::parse(&project.id).unwrap();
        store
            .insert_elements(
                &id,
                &[
                    ElementContent::BrandNameSuggestion("First".into()),
                    ElementContent::BrandNameSuggestion("Second".into()),
                ],
            )
            .unwrap();

        let first = store
            .first_element_of_type(&id, ElementType::BrandNameSuggestion)
            .unwrap()
            .unwrap();
        assert_eq!(first.content, ElementContent::BrandNameSuggestion("First".into()));
        assert!(store
            .first_element_of_type(&id, ElementType::LeafletDraft)
            .unwrap()
            .is_none());
    }

    #[test]
    fn compliance_status_only_touches_brand_content() {
        let store = SqliteProjectStore::open_in_memory().unwrap();
        let project = store.insert_project(&owner(), &input("Metformin")).unwrap();
        let id = RecordId::parse(&project.id).unwrap();
        store.insert_elements(&id, &sample_contents()).unwrap();

        let updated = store
            .update_compliance_status(&id, ComplianceStatus::Approved)
            .unwrap();
        assert_eq!(updated, 4);

        for element in store.elements_for_project(&id).unwrap() {
            if element.element_type().is_brand_content() {
                assert_eq!(element.compliance_status, Some(ComplianceStatus::Approved));
            } else {
                assert_eq!(element.compliance_status, None);
            }
        }
    }

    #[test]
    fn content_update_clears_compliance_status() {
        let store = SqliteProjectStore::open_in_memory().unwrap();
        let project = store.insert_project(&owner(), &input("Metformin")).unwrap();
        let id = RecordId::parse(&project.id).unwrap();
        let inserted = store
            .insert_elements(&id, &[ElementContent::BrandNameSuggestion("Old".into())])
            .unwrap();
        store
            .update_compliance_status(&id, ComplianceStatus::Rejected)
            .unwrap();

        let new_content = ElementContent::BrandNameSuggestion("New".into());
        store
            .update_element_content(&inserted[0].id, &new_content)
            .unwrap();

        let element = store
            .first_element_of_type(&id, ElementType::BrandNameSuggestion)
            .unwrap()
            .unwrap();
        assert_eq!(element.content, new_content);
        assert_eq!(element.compliance_status, None);
    }

    #[test]
    fn updating_a_missing_element_is_not_found() {
        let store = SqliteProjectStore::open_in_memory().unwrap();
        let result = store.update_element_content(
            &RecordId::new(),
            &ElementContent::LogoConcept("https://x".into()),
        );
        assert!(matches!(result, Err(BrandError::NotFound(_))));
    }

    #[test]
    fn on_disk_store_persists_across_reopen() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("brandgen.db");

        let project_id = {
            let store = SqliteProjectStore::open(&path).unwrap();
            store.insert_project(&owner(), &input("Metformin")).unwrap().id
        };

        let store = SqliteProjectStore::open(&path).unwrap();
        let id = RecordId::parse(&project_id).unwrap();
        assert!(store.get_project(&id).unwrap().is_some());
    }
}
