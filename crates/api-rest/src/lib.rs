//! # API REST
//!
//! REST API implementation for brandgen.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, CORS, status codes, the `x-user-id` header)
//!
//! All behaviour lives in `brandgen-core`; handlers only translate between HTTP and the core
//! services.

#![warn(rust_2018_idioms)]

mod error;
pub mod handlers;

pub use error::{ApiError, ApiResult};

use api_shared::{
    BrandPackage, BrandPackageView, ClinicalTrial, ColorSwatch, ComplianceCheckRes,
    ComplianceStatus, CreateProjectReq, CreateProjectRes, ErrorRes, ExportPdfRes, HealthRes,
    Insights, InsightsView, ListProjectsRes, LogoConcept, NameSuggestion, Project,
    ProjectDetailRes, SloganPair, UpdateRes,
};
use axum::{
    routing::{get, patch, post},
    Router,
};
use brandgen_core::{AiClients, ComplianceService, CoreConfig, ProjectService, ProjectStore};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared by the handlers.
#[derive(Clone)]
pub struct AppState {
    pub projects: ProjectService,
    pub compliance: ComplianceService,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>, store: Arc<dyn ProjectStore>, ai: AiClients) -> Self {
        Self {
            projects: ProjectService::new(cfg, store.clone(), &ai),
            compliance: ComplianceService::new(store, ai.text),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::create_project,
        handlers::list_projects,
        handlers::get_project,
        handlers::update_brand_name,
        handlers::update_slogan,
        handlers::update_leaflet,
        handlers::compliance_check,
        handlers::export_pdf,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        CreateProjectReq,
        CreateProjectRes,
        Project,
        ListProjectsRes,
        ProjectDetailRes,
        Insights,
        InsightsView,
        ColorSwatch,
        ClinicalTrial,
        BrandPackage,
        BrandPackageView,
        NameSuggestion,
        LogoConcept,
        SloganPair,
        UpdateRes,
        ComplianceStatus,
        ComplianceCheckRes,
        ExportPdfRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route("/projects/:id", get(handlers::get_project))
        .route("/projects/:id/brand_name", patch(handlers::update_brand_name))
        .route("/projects/:id/slogan", patch(handlers::update_slogan))
        .route("/projects/:id/leaflet", patch(handlers::update_leaflet))
        .route(
            "/projects/:id/compliance_check",
            post(handlers::compliance_check),
        )
        .route("/projects/:id/export/pdf", get(handlers::export_pdf))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
