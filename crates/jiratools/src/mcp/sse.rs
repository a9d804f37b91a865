use crate::prelude::{eprintln, *};
use axum::{
    extract::State,
    response::sse::{Event, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, Stream};
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub const EVENTS_ROUTE: &str = "/sse";
pub const MESSAGE_ROUTE: &str = "/message";

pub fn router(global: crate::Global) -> Router {
    Router::new()
        .route(EVENTS_ROUTE, get(events))
        .route(MESSAGE_ROUTE, post(message))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(global))
}

pub async fn run_sse(options: super::cli::HttpOptions, global: crate::Global) -> Result<()> {
    let addr = options.addr();
    let verbose = global.verbose;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {addr}"))?;

    if verbose {
        eprintln!("jiratools MCP server on http://{addr}");
        eprintln!("  GET  {EVENTS_ROUTE}  announces {MESSAGE_ROUTE}");
        eprintln!("  POST {MESSAGE_ROUTE}  JSON-RPC requests");
    }
    log::info!("MCP server bound to {addr}");

    axum::serve(listener, router(global))
        .await
        .wrap_err("MCP server stopped")
}

/// Announce where clients post their JSON-RPC messages.
async fn events(
    State(_global): State<Arc<crate::Global>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let endpoint = Event::default().event("endpoint").data(MESSAGE_ROUTE);
    Sse::new(stream::once(async move { Ok(endpoint) }))
}

async fn message(
    State(global): State<Arc<crate::Global>>,
    Json(request): Json<serde_json::Value>,
) -> Json<super::JsonRpcResponse> {
    Json(super::handle_message(request, &global).await)
}
