use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::openapi;
use super::AppState;
use crate::config::ServerConfig;

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origin = if server.cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([axum::http::HeaderName::from_static(
            handlers::analysis::ANALYSIS_STATUS_HEADER,
        )])
}

pub fn create_router(state: AppState) -> Router {
    let journals = Router::new()
        .route(
            "/",
            get(handlers::entries::list_entries).post(handlers::entries::create_entry),
        )
        .route("/analyze", post(handlers::analysis::analyze_entry))
        .route("/insights", get(handlers::insights::get_insights))
        .route(
            "/{id}",
            get(handlers::entries::get_entry).patch(handlers::entries::update_entry),
        )
        .route(
            "/{id}/comments",
            get(handlers::community::list_comments).post(handlers::community::add_comment),
        )
        .route("/{id}/reactions", post(handlers::community::add_reaction));

    let api = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(openapi::redoc_router())
        .nest("/journals", journals)
        .route("/comments/{id}/like", post(handlers::community::like_comment))
        .route("/community/feed", get(handlers::community::get_feed));

    let cors = cors_layer(&state.config.server);
    // Enforced by the body extractors, so oversized JSON gets the usual error body.
    let body_limit = DefaultBodyLimit::max(state.config.server.max_body_bytes);

    Router::new()
        .nest("/api", api)
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
