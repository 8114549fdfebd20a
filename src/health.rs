use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    storage: &'static str,
}

/// LIVENESS PROBE
/// - No I/O
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

/// READINESS PROBE
/// - Pings the configured storage backend
#[get("/ready")]
pub async fn readiness(data: web::Data<AppState>) -> impl Responder {
    match data.storage_probe.ping().await {
        Ok(()) => HttpResponse::Ok().json(ReadinessResponse {
            status: "ok",
            storage: "ok",
        }),
        Err(err) => {
            warn!("readiness check failed: {}", err);
            HttpResponse::ServiceUnavailable().json(ReadinessResponse {
                status: "unhealthy",
                storage: "unhealthy",
            })
        }
    }
}
