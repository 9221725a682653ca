use actix_web::{get, web, HttpResponse};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::ProfileResponse;

/// Full profile for one employee
#[get("/profile/{employee_id}")]
pub async fn get_profile(
    employee_id: web::Path<String>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let profile = state.engine.get_profile(&employee_id)?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(profile)))
}
