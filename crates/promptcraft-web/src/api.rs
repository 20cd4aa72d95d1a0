//! Request handlers.
//!
//! Every request builds its own [`FormSubmission`] and
//! [`PromptComponents`](promptcraft::PromptComponents); nothing mutable is
//! shared between requests.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use promptcraft::Enhancer;
use tracing::{error, info};

use crate::form::FormSubmission;
use crate::page::{PageRenderer, RenderError};

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub enhancer: Enhancer,
    pub pages: Arc<PageRenderer>,
}

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        error!("{self}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
    }
}

/// GET / — Empty form.
pub async fn get_index(State(app): State<AppState>) -> Result<Html<String>, RenderError> {
    Ok(Html(app.pages.render(&FormSubmission::default(), None)?))
}

/// POST / — Assemble, enhance and render the three result blocks.
///
/// Always answers 200 once the page renders; model failures show up as text
/// in the enhanced-prompt block.
pub async fn post_index(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<Html<String>, RenderError> {
    let form = FormSubmission::parse(&body);
    let components = form.to_components();
    info!(
        "Enhancement requested: {} context, {} constraint(s), {} example(s)",
        components.context().len(),
        components.constraints().len(),
        components.examples().len(),
    );

    let result = app.enhancer.enhance(&components).await;
    Ok(Html(app.pages.render(&form, Some(&result))?))
}

/// GET /healthz — Liveness probe.
pub async fn get_health() -> &'static str {
    "ok"
}
