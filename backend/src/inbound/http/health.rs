//! Health endpoint: liveness probe for orchestration and load balancers.
//!
//! Deliberately independent of the orchestrator and its store: the probe
//! answers from process state alone.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use chrono::Utc;
use serde_json::json;

/// Name reported by the liveness payload.
const SERVICE_NAME: &str = "user-directory";

/// Tracks whether the process should report itself alive.
pub struct HealthState {
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag the service as unhealthy so probes fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return liveness state. When false, probes emit 503 to trigger restarts.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

/// Liveness probe. Returns 200 with a status payload while the process is
/// alive and 503 once draining.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses(
        (status = 200, description = "Service is running"),
        (status = 503, description = "Service is shutting down")
    )
)]
#[get("/health")]
pub async fn health(state: web::Data<HealthState>) -> HttpResponse {
    if !state.is_alive() {
        return HttpResponse::ServiceUnavailable()
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish();
    }

    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(json!({
            "success": true,
            "message": "service is running",
            "data": {
                "service": SERVICE_NAME,
                "timestamp": Utc::now().to_rfc3339(),
            },
        }))
}
