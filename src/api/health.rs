use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::services::UserService;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub database: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "User store unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(service: web::Data<UserService>) -> impl Responder {
    let reachable = service.is_store_reachable().await;

    let body = HealthResponse {
        status: if reachable { "healthy" } else { "degraded" }.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if reachable { "connected" } else { "unreachable" }.to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    };

    if reachable {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
