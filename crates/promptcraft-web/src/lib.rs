//! Browser form front-end for `promptcraft`.
//!
//! `promptcraft-web` serves one page. `GET /` shows a form for the prompt
//! components; `POST /` assembles them, asks the model for an enhanced prompt,
//! and renders the assembled text, the enhanced prompt and the pitfalls list.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use promptcraft::{Enhancer, GatewayConfig, OpenRouterClient};
//! use promptcraft_web::{WebConfig, spawn_web};
//!
//! let client = OpenRouterClient::new(api_key, GatewayConfig::default())?;
//! let enhancer = Enhancer::new(Arc::new(client));
//!
//! let addr = spawn_web(enhancer, WebConfig::default()).await?;
//! println!("Web UI: http://{addr}");
//! ```
//!
//! # Form fields
//!
//! `base_prompt`, `role`, `task`, `format`, and the repeated keys `context[]`,
//! `constraint[]` and `example[]`. Missing fields are treated as empty.

mod api;
pub mod form;
pub mod page;
mod server;

pub use form::FormSubmission;
pub use page::{PageRenderer, RenderError};
pub use server::build_router;

use std::net::SocketAddr;
use std::sync::Arc;

use promptcraft::Enhancer;
use thiserror::Error;

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:5000`.
    pub bind_addr: SocketAddr,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
        }
    }
}

/// Failure to bring the server up.
#[derive(Debug, Error)]
pub enum StartError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to bind: {0}")]
    Bind(#[from] std::io::Error),
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// Bind to port 0 to get a random free port. The server runs until the Tokio
/// runtime shuts down.
pub async fn spawn_web(enhancer: Enhancer, config: WebConfig) -> Result<SocketAddr, StartError> {
    let pages = Arc::new(PageRenderer::new()?);
    let router = server::build_router(enhancer, pages);
    Ok(server::start_server(router, config.bind_addr).await?)
}
