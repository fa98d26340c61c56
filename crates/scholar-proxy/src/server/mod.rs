//! HTTP server exposing the publications proxy.
//!
//! Single retrieval route, `GET /api/publications`, plus health endpoints.
//! Stateless per request: every page fetch is independent and nothing is
//! cached across requests. Errors never unwind past the handler; every
//! failure becomes a structured JSON body with the matching status code.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::client::SerpApiClient;
use crate::config::Config;
use crate::error::ProxyError;
use crate::models::PageRequest;

/// Shared state for HTTP handlers.
pub struct AppState {
    /// SerpAPI client.
    pub client: SerpApiClient,

    /// Server-side credential fallback; a `serpApiKey` query parameter,
    /// when present, wins.
    pub serpapi_key: Option<String>,

    /// Page size applied when `limit` is absent or unparseable.
    pub default_page_size: u32,
}

/// Query parameters for the publications route.
///
/// `start` and `limit` arrive as strings and are coerced to defaults when
/// absent or unparseable, never rejected.
#[derive(Debug, Deserialize)]
pub struct PublicationsQuery {
    #[serde(rename = "scholarId")]
    scholar_id: Option<String>,

    #[serde(rename = "serpApiKey")]
    serp_api_key: Option<String>,

    start: Option<String>,

    limit: Option<String>,
}

/// Create the HTTP router.
///
/// # Errors
///
/// Returns error if the HTTP client cannot be initialized.
pub fn create_router(config: &Config) -> anyhow::Result<Router> {
    let client = SerpApiClient::new(config)?;

    let state = Arc::new(AppState {
        client,
        serpapi_key: config.serpapi_key.clone(),
        default_page_size: config.default_page_size,
    });

    Ok(Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/api/publications", get(get_publications))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Serve the proxy on the given port until ctrl-c.
///
/// # Errors
///
/// Returns error on bind or server failure.
pub async fn serve(config: &Config, port: u16) -> anyhow::Result<()> {
    let router = create_router(config)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!("publications proxy listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("publications proxy shut down");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.expect("Failed to install CTRL+C handler");
    tracing::info!("Received shutdown signal");
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "scholar-proxy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Handle `GET /api/publications`.
async fn get_publications(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PublicationsQuery>,
) -> Response {
    let scholar_id = query.scholar_id.unwrap_or_default();
    let api_key = query
        .serp_api_key
        .filter(|key| !key.is_empty())
        .or_else(|| state.serpapi_key.clone())
        .unwrap_or_default();

    let start = parse_or(query.start.as_deref(), 0);
    let limit = match parse_or(query.limit.as_deref(), state.default_page_size) {
        0 => state.default_page_size,
        n => n,
    };

    tracing::info!(scholar_id = %scholar_id, start, limit, "publications page requested");

    let request = PageRequest {
        scholar_id,
        api_key,
        offset: start,
        page_size: limit,
    };

    match state.client.get_publications_page(&request).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => error_response(&err),
    }
}

fn parse_or(value: Option<&str>, default: u32) -> u32 {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Map a proxy error to its wire representation.
fn error_response(err: &ProxyError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match err {
        ProxyError::InvalidRequest => json!({
            "error": "Missing scholarId or serpApiKey"
        }),
        ProxyError::Upstream { status, body } => json!({
            "error": format!("SerpAPI error: {status}"),
            "details": body
        }),
        ProxyError::UpstreamSchema { data } => json!({
            "error": "No articles found in SerpAPI response",
            "data": data
        }),
        ProxyError::Unexpected(message) => json!({
            "error": "Failed to fetch publications",
            "message": message,
            "details": err.to_string()
        }),
    };

    (status, Json(body)).into_response()
}
