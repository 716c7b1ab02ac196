use api_shared::ErrorRes;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use brandgen_core::BrandError;

/// A core error on its way out of a handler.
///
/// Validation failures map to 400, missing records to 404 and everything else to 500 with the
/// underlying message.
#[derive(Debug)]
pub struct ApiError(pub BrandError);

impl From<BrandError> for ApiError {
    fn from(err: BrandError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            BrandError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            BrandError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self.0);
        }
        let body = ErrorRes {
            detail: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;
