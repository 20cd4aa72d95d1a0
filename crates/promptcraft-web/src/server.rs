//! Axum server setup and router construction.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use promptcraft::Enhancer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::api::{self, AppState};
use crate::page::PageRenderer;

/// Build the full axum router.
///
/// The router serves:
/// - the form page at `/` (GET renders it, POST submits it)
/// - a liveness probe at `/healthz`
pub fn build_router(enhancer: Enhancer, pages: Arc<PageRenderer>) -> Router {
    let app_state = AppState { enhancer, pages };

    Router::new()
        .route("/", get(api::get_index).post(api::post_index))
        .route("/healthz", get(api::get_health))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}

/// Bind `bind_addr`, serve `router` on a Tokio task and return the bound address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!("Web server stopped: {e}");
        }
    });

    Ok(addr)
}
