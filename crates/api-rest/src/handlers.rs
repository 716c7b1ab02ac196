use crate::error::ApiResult;
use crate::AppState;
use api_shared::{
    ComplianceCheckRes, CreateProjectReq, CreateProjectRes, ExportPdfRes, HealthRes,
    HealthService, ListProjectsRes, ProjectDetailRes, UpdateRes,
};
use axum::{
    extract::{Path as AxumPath, Query, State},
    http::HeaderMap,
    response::Json,
};
use brandgen_core::{CallerIdentity, RecordId};
use serde::Deserialize;
use utoipa::IntoParams;

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Only list projects owned by this user.
    pub user_id: Option<String>,
}

fn caller(state: &AppState, headers: &HeaderMap) -> Result<CallerIdentity, crate::ApiError> {
    let supplied = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok());
    Ok(state.projects.caller(supplied)?)
}

fn record_id(raw: &str) -> Result<RecordId, crate::ApiError> {
    Ok(RecordId::parse(raw)?)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint
///
/// Used by monitoring and load balancers; does not touch the database or the AI API.
#[axum::debug_handler]
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/projects",
    request_body = CreateProjectReq,
    params(
        ("x-user-id" = Option<String>, Header, description = "Owning user; defaults to the configured user")
    ),
    responses(
        (status = 200, description = "Project created with its insights and brand package", body = CreateProjectRes),
        (status = 400, description = "Molecule and therapeutic area, or a prompt, are required", body = api_shared::ErrorRes),
        (status = 500, description = "Storing the project failed", body = api_shared::ErrorRes)
    )
)]
/// Create a project
///
/// Generates insights and a brand package, then stores the project and its brand elements.
/// AI failures are replaced with fallback content and never fail the request.
#[axum::debug_handler]
pub async fn create_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateProjectReq>,
) -> ApiResult<CreateProjectRes> {
    let caller = caller(&state, &headers)?;
    let res = state.projects.create(&caller, &req).await?;
    Ok(Json(res))
}

#[utoipa::path(
    get,
    path = "/projects",
    params(ListQuery),
    responses(
        (status = 200, description = "Projects in creation order", body = ListProjectsRes),
        (status = 500, description = "Internal server error", body = api_shared::ErrorRes)
    )
)]
/// List projects
#[axum::debug_handler]
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<ListProjectsRes> {
    Ok(Json(state.projects.list(query.user_id.as_deref())?))
}

#[utoipa::path(
    get,
    path = "/projects/{id}",
    params(("id" = String, Path, description = "Project id (32 lowercase hex characters)")),
    responses(
        (status = 200, description = "Project with reconstructed insights and brand package", body = ProjectDetailRes),
        (status = 400, description = "Malformed project id", body = api_shared::ErrorRes),
        (status = 404, description = "Project not found", body = api_shared::ErrorRes)
    )
)]
/// Get a project
///
/// Folds the project's stored brand elements back into insight and brand-package views.
#[axum::debug_handler]
pub async fn get_project(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<ProjectDetailRes> {
    let id = record_id(&id)?;
    Ok(Json(state.projects.get(&id)?))
}

#[utoipa::path(
    patch,
    path = "/projects/{id}/brand_name",
    params(("id" = String, Path, description = "Project id")),
    request_body(content = String, description = "New brand name as a JSON string"),
    responses(
        (status = 200, description = "Brand name updated", body = UpdateRes),
        (status = 400, description = "Blank name or malformed id", body = api_shared::ErrorRes),
        (status = 404, description = "Project not found", body = api_shared::ErrorRes)
    )
)]
/// Replace the first brand name suggestion
#[axum::debug_handler]
pub async fn update_brand_name(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(brand_name): Json<String>,
) -> ApiResult<UpdateRes> {
    let id = record_id(&id)?;
    Ok(Json(state.projects.update_brand_name(&id, &brand_name)?))
}

#[utoipa::path(
    patch,
    path = "/projects/{id}/slogan",
    params(("id" = String, Path, description = "Project id")),
    request_body(content = String, description = "New English slogan as a JSON string"),
    responses(
        (status = 200, description = "Slogan updated", body = UpdateRes),
        (status = 404, description = "Project not found", body = api_shared::ErrorRes)
    )
)]
/// Replace the English slogan
///
/// The Bengali translation is kept as it was.
#[axum::debug_handler]
pub async fn update_slogan(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(slogan): Json<String>,
) -> ApiResult<UpdateRes> {
    let id = record_id(&id)?;
    Ok(Json(state.projects.update_slogan(&id, &slogan)?))
}

#[utoipa::path(
    patch,
    path = "/projects/{id}/leaflet",
    params(("id" = String, Path, description = "Project id")),
    request_body(content = String, description = "Leaflet text as a JSON string"),
    responses(
        (status = 200, description = "Leaflet updated", body = UpdateRes),
        (status = 404, description = "Project not found", body = api_shared::ErrorRes)
    )
)]
/// Replace the leaflet draft with a single text section
#[axum::debug_handler]
pub async fn update_leaflet(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(leaflet): Json<String>,
) -> ApiResult<UpdateRes> {
    let id = record_id(&id)?;
    Ok(Json(state.projects.update_leaflet(&id, &leaflet)?))
}

#[utoipa::path(
    post,
    path = "/projects/{id}/compliance_check",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Verdict recorded on the brand content", body = ComplianceCheckRes),
        (status = 404, description = "Project has no brand content", body = api_shared::ErrorRes)
    )
)]
/// Run the compliance review
///
/// An unclear or failed model reply records `pending`.
#[axum::debug_handler]
pub async fn compliance_check(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<ComplianceCheckRes> {
    let id = record_id(&id)?;
    Ok(Json(state.compliance.check(&id).await?))
}

#[utoipa::path(
    get,
    path = "/projects/{id}/export/pdf",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Download location of the leaflet PDF", body = ExportPdfRes),
        (status = 404, description = "Project not found", body = api_shared::ErrorRes)
    )
)]
/// Export the leaflet as PDF
///
/// Returns a placeholder URL; no PDF is rendered.
#[axum::debug_handler]
pub async fn export_pdf(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<ExportPdfRes> {
    let id = record_id(&id)?;
    Ok(Json(state.projects.export_pdf(&id)?))
}
