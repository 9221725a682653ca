use actix_web::{get, web, HttpResponse};
use std::sync::Arc;

use crate::state::AppState;
use crate::types::HealthResponse;

/// Service name reported by the health check
pub const SERVICE_NAME: &str = "staffsearch - Semantic Employee Search";

/// Health check; only reachable once startup indexing succeeded
#[get("/")]
pub async fn health(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        service: SERVICE_NAME.to_string(),
        status: "running".to_string(),
        indexed_employees: state.engine.employee_count(),
    })
}

/// Index statistics
#[get("/stats")]
pub async fn stats(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(state.engine.stats())
}
