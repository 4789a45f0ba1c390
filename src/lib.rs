pub mod config;
pub mod error;
pub mod state;
pub mod db;
pub mod models;
pub mod routes;
pub mod email;
pub mod submission;
pub mod rate_limit;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::email::{Mailer, SmtpMailer};
use crate::rate_limit::ContactRateLimiter;
use crate::state::{AppState, SharedState};

pub fn build_app(pool: SqlitePool, config: Config) -> (Router, SharedState) {
    let mailer: Option<Arc<dyn Mailer>> =
        config
            .smtp
            .as_ref()
            .and_then(|smtp| match SmtpMailer::new(smtp) {
                Ok(mailer) => {
                    tracing::info!("SMTP relay configured");
                    Some(Arc::new(mailer) as Arc<dyn Mailer>)
                }
                Err(e) => {
                    tracing::warn!("SMTP relay not available: {e}");
                    None
                }
            });

    build_app_with_mailer(pool, config, mailer)
}

/// Assemble the router with an explicit mailer. Tests use this to inject a
/// recording or failing double in place of the real relay.
pub fn build_app_with_mailer(
    pool: SqlitePool,
    config: Config,
    mailer: Option<Arc<dyn Mailer>>,
) -> (Router, SharedState) {
    let static_dir = config.static_dir.clone();
    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState {
        pool,
        config,
        mailer,
        contact_limiter: ContactRateLimiter::new(),
    });

    // Static frontend with index.html fallback for unmatched routes
    let static_files = ServeDir::new(&static_dir)
        .not_found_service(ServeFile::new(format!("{static_dir}/index.html")));

    let router = Router::new()
        .merge(routes::api_routes())
        .fallback_service(static_files)
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state.clone());

    (router, state)
}
