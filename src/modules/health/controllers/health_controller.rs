use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use std::time::Duration;

/// Longest the readiness check waits on the database
const READINESS_TIMEOUT: Duration = Duration::from_secs(2);

/// Liveness response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}

/// Readiness response
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessChecks {
    pub database: bool,
}

/// GET /health - Liveness check
/// Does not touch the database
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /ready - Readiness check
/// 200 when the database answers in time, 503 otherwise
pub async fn readiness_check(pool: web::Data<MySqlPool>) -> impl Responder {
    let ping = sqlx::query("SELECT 1").fetch_one(pool.get_ref());

    let database = match tokio::time::timeout(READINESS_TIMEOUT, ping).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            tracing::error!("Database readiness check failed: {}", e);
            false
        }
        Err(_) => {
            tracing::error!(
                timeout_secs = READINESS_TIMEOUT.as_secs(),
                "Database readiness check timed out"
            );
            false
        }
    };

    let response = ReadinessResponse {
        status: if database { "ready" } else { "unavailable" }.to_string(),
        checks: ReadinessChecks { database },
    };

    if database {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
