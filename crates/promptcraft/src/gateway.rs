//! The text-generation boundary.
//!
//! [`ModelGateway`] is the only thing the enhancement flow knows about the
//! model vendor: a system instruction and a user message go in, text comes
//! out. [`OpenRouterClient`](crate::OpenRouterClient) is the production
//! implementation; tests inject scripted gateways.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

/// Boxed future returned by [`ModelGateway::generate`].
pub type GatewayFuture<'a> = Pin<Box<dyn Future<Output = Result<String, GatewayError>> + Send + 'a>>;

/// A text-in, text-out model call.
pub trait ModelGateway: Send + Sync {
    /// Generate a completion for `user_text` under `system_instruction`.
    ///
    /// Uses a boxed future so that the trait is dyn-compatible and can be
    /// shared as `Arc<dyn ModelGateway>`.
    fn generate<'a>(&'a self, system_instruction: &'a str, user_text: &'a str)
    -> GatewayFuture<'a>;
}

/// Failure of an outbound model call.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API error: {0}")]
    Api(String),

    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("model returned no text")]
    EmptyResponse,

    #[error("model call timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_readable() {
        let err = GatewayError::Status {
            status: 401,
            body: "unauthorized".into(),
        };
        assert_eq!(err.to_string(), "API HTTP 401: unauthorized");
        assert_eq!(
            GatewayError::Timeout(Duration::from_secs(30)).to_string(),
            "model call timed out after 30s"
        );
        assert_eq!(GatewayError::EmptyResponse.to_string(), "model returned no text");
    }

    #[tokio::test]
    async fn gateway_is_object_safe() {
        struct Echo;
        impl ModelGateway for Echo {
            fn generate<'a>(&'a self, _system: &'a str, user: &'a str) -> GatewayFuture<'a> {
                Box::pin(async move { Ok(user.to_uppercase()) })
            }
        }

        let gw: std::sync::Arc<dyn ModelGateway> = std::sync::Arc::new(Echo);
        assert_eq!(gw.generate("sys", "hi").await.unwrap(), "HI");
    }
}
