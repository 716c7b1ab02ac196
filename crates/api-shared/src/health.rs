use crate::dto::HealthRes;

/// Health check shared by the REST API and the CLI.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Reports the service as alive.
    ///
    /// Liveness only: neither the AI API nor the database is probed.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "brandgen is alive".into(),
        }
    }
}
