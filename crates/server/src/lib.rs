//! staffsearch HTTP server
//!
//! Actix-web REST API over a prebuilt [`SearchEngine`].

pub mod error;
pub mod routes;
pub mod state;
pub mod types;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use staffsearch_common::{AppConfig, Result};
use staffsearch_vector::SearchEngine;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::error::ApiError;
use crate::state::AppState;

/// Register all routes; malformed JSON bodies become JSON 400s
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into());

    cfg.app_data(json_config)
        .service(routes::system::health)
        .service(routes::system::stats)
        .service(routes::search::search)
        .service(routes::profile::get_profile)
        .service(routes::openapi::openapi);
}

/// Serve the API until shutdown
///
/// The engine must already be built; the server never starts on a failed
/// index build.
pub async fn start_server(config: AppConfig, engine: Arc<SearchEngine>) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let state = Arc::new(AppState::new(config, engine));
    let data = web::Data::new(state);

    info!("Starting HTTP server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .configure(configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
