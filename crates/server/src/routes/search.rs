use actix_web::{post, web, HttpResponse};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{MatchItem, SearchRequest, SearchResponse};

/// Rank employees against a natural-language role description
#[post("/search")]
pub async fn search(
    req: web::Json<SearchRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let matches = state
        .engine
        .search_by_text(&req.role_description, req.top_k)
        .await
        .map_err(ApiError::search_failed)?;

    info!("Search returned {} matches (top_k={})", matches.len(), req.top_k);

    Ok(HttpResponse::Ok().json(SearchResponse {
        matches: matches.into_iter().map(MatchItem::from).collect(),
    }))
}
