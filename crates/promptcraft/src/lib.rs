//! Turn loosely structured prompt ideas into an enhanced prompt with an LLM.
//!
//! `promptcraft` collects a user's prompt components (initial request, role,
//! task, format, and lists of context, constraints and examples), renders them
//! into one semi-structured text block, asks a model to rewrite it as an
//! optimized prompt with a list of potential pitfalls, and splits the model's
//! reply back into those two sections.
//!
//! # Getting started
//!
//! ```ignore
//! use std::sync::Arc;
//! use promptcraft::{Enhancer, GatewayConfig, OpenRouterClient, PromptComponents, api_key_from_env};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GatewayConfig::default();
//!     let client = OpenRouterClient::new(api_key_from_env()?, config.clone())?;
//!     let enhancer = Enhancer::new(Arc::new(client)).with_timeout(config.timeout);
//!
//!     let components = PromptComponents::new()
//!         .with_base_prompt("Write a poem")
//!         .with_role("poet")
//!         .with_constraint("Fewer than 12 lines");
//!
//!     let out = enhancer.enhance(&components).await;
//!     println!("{}\n\n{}", out.enhanced_prompt, out.pitfalls);
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`components`] | [`PromptComponents`] immutable input value |
//! | [`assembler`] | [`assemble`] components into labelled text |
//! | [`splitter`] | [`split`] a model reply on its section markers |
//! | [`gateway`] | [`ModelGateway`] trait and [`GatewayError`] |
//! | [`enhancer`] | [`Enhancer`] end-to-end flow with timeout and error recovery |
//! | [`config`] | [`GatewayConfig`] and API key loading |

pub mod assembler;
pub mod components;
pub mod config;
pub mod enhancer;
pub mod gateway;
pub mod splitter;

pub use assembler::{NO_COMPONENTS_MESSAGE, assemble};
pub use components::PromptComponents;
pub use config::{API_KEY_ENV, ConfigError, DEFAULT_MODEL, GatewayConfig, api_key_from_env};
pub use enhancer::{Enhancement, Enhancer, SYSTEM_INSTRUCTION};
pub use gateway::{GatewayError, GatewayFuture, ModelGateway};
pub use splitter::{SplitOutcome, SplitResult, split};

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace};

// ── Constants ──────────────────────────────────────────────────────

pub const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

// ── Request types ──────────────────────────────────────────────────

/// Chat completion request body.
#[derive(Serialize, Debug, Default)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub max_tokens: u32,
    pub temperature: f32,
}

fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}

/// Role of a chat message.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A chat message.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

// ── Response types ─────────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct RawChatResponse {
    choices: Option<Vec<RawChoice>>,
    error: Option<ApiErrorResponse>,
    #[serde(default)]
    usage: Option<UsageInfo>,
}

#[derive(Deserialize, Debug)]
struct RawChoice {
    message: RawResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    message: String,
}

/// Parsed chat completion.
#[derive(Debug)]
pub struct ChatCompletion {
    pub content: Option<String>,
    pub usage: Option<UsageInfo>,
    pub finish_reason: Option<String>,
}

/// Token usage reported by the API.
#[derive(Deserialize, Debug, Clone)]
pub struct UsageInfo {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

// ── Client ─────────────────────────────────────────────────────────

/// Async client for the OpenRouter chat completions API.
pub struct OpenRouterClient {
    client: reqwest::Client,
    api_key: String,
    referer: String,
    title: String,
    endpoint: String,
    config: GatewayConfig,
}

impl OpenRouterClient {
    /// Create a new client with the given API key and default headers.
    pub fn new(api_key: impl Into<String>, config: GatewayConfig) -> Result<Self, ConfigError> {
        Self::with_headers(
            api_key,
            config,
            "https://github.com/tacryt-socryp/promptcraft",
            "promptcraft",
        )
    }

    /// Create a new client with custom Referer and X-Title headers.
    pub fn with_headers(
        api_key: impl Into<String>,
        config: GatewayConfig,
        referer: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("promptcraft/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            referer: referer.into(),
            title: title.into(),
            endpoint: OPENROUTER_URL.to_string(),
            config,
        })
    }

    /// Send requests to `endpoint` instead of [`OPENROUTER_URL`].
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Send a chat completion request.
    pub async fn chat(&self, body: &ChatRequest) -> Result<ChatCompletion, GatewayError> {
        debug!(
            "LLM request: model={}, messages={}, max_tokens={}, temp={}",
            body.model,
            body.messages.len(),
            body.max_tokens,
            body.temperature,
        );
        trace!(
            "Request payload size: {} bytes",
            serde_json::to_string(body).map_or(0, |s| s.len())
        );

        let start = Instant::now();

        let resp = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        debug!(
            "LLM response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );

        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: RawChatResponse = serde_json::from_str(&text)?;

        if let Some(err) = parsed.error {
            return Err(GatewayError::Api(err.message));
        }

        if let Some(ref usage) = parsed.usage {
            debug!(
                "Token usage: prompt={}, completion={}, total={}",
                usage.prompt_tokens.unwrap_or(0),
                usage.completion_tokens.unwrap_or(0),
                usage.total_tokens.unwrap_or(0),
            );
        }

        let choice = parsed.choices.and_then(|c| c.into_iter().next());
        Ok(match choice {
            Some(c) => ChatCompletion {
                content: c.message.content,
                usage: parsed.usage,
                finish_reason: c.finish_reason,
            },
            None => ChatCompletion {
                content: None,
                usage: parsed.usage,
                finish_reason: None,
            },
        })
    }
}

impl ModelGateway for OpenRouterClient {
    fn generate<'a>(&'a self, system_instruction: &'a str, user_text: &'a str) -> GatewayFuture<'a> {
        Box::pin(async move {
            let body = ChatRequest {
                model: self.config.model.clone(),
                messages: vec![Message::system(system_instruction), Message::user(user_text)],
                max_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
            };
            self.chat(&body)
                .await?
                .content
                .filter(|c| !c.trim().is_empty())
                .ok_or(GatewayError::EmptyResponse)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use std::net::SocketAddr;
    use std::time::Duration;

    /// Serve `handler` at `/v1/chat/completions` on a random port.
    async fn stub_endpoint(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v1/chat/completions")
    }

    fn client(endpoint: String) -> OpenRouterClient {
        OpenRouterClient::new("sk-test", GatewayConfig::default())
            .unwrap()
            .with_endpoint(endpoint)
    }

    #[test]
    fn message_constructors() {
        let sys = Message::system("hello");
        assert_eq!(sys.role, MessageRole::System);
        assert_eq!(sys.content, "hello");
        assert_eq!(Message::user("world").role, MessageRole::User);
    }

    #[test]
    fn chat_request_serializes_wire_shape() {
        let req = ChatRequest {
            model: "test-model".into(),
            messages: vec![Message::system("s"), Message::user("u")],
            max_tokens: 0,
            temperature: 0.7,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "u");
        assert!(json.get("max_tokens").is_none());
    }

    #[tokio::test]
    async fn generate_sends_system_and_user_messages() {
        let router = axum::Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<serde_json::Value>| async move {
                assert_eq!(headers["authorization"], "Bearer sk-test");
                assert_eq!(body["model"], DEFAULT_MODEL);
                assert_eq!(body["messages"][0]["content"], "be helpful");
                let user = body["messages"][1]["content"].as_str().unwrap_or_default();
                Json(serde_json::json!({
                    "choices": [{
                        "message": {"role": "assistant", "content": format!("echo: {user}")},
                        "finish_reason": "stop"
                    }],
                    "usage": {"prompt_tokens": 3, "completion_tokens": 2, "total_tokens": 5}
                }))
            }),
        );
        let gw = client(stub_endpoint(router).await);

        let text = gw.generate("be helpful", "hi there").await.unwrap();
        assert_eq!(text, "echo: hi there");
    }

    #[tokio::test]
    async fn http_error_status_is_reported() {
        let router = axum::Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "bad key") }),
        );
        let gw = client(stub_endpoint(router).await);

        let err = gw.generate("s", "u").await.unwrap_err();
        assert!(
            matches!(err, GatewayError::Status { status: 401, ref body } if body == "bad key"),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn api_error_body_is_reported() {
        let router = axum::Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(serde_json::json!({"error": {"message": "quota exceeded"}})) }),
        );
        let gw = client(stub_endpoint(router).await);

        let err = gw.generate("s", "u").await.unwrap_err();
        assert_eq!(err.to_string(), "API error: quota exceeded");
    }

    #[tokio::test]
    async fn empty_choices_are_an_empty_response() {
        let router = axum::Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(serde_json::json!({"choices": []})) }),
        );
        let gw = client(stub_endpoint(router).await);

        let err = gw.generate("s", "u").await.unwrap_err();
        assert!(matches!(err, GatewayError::EmptyResponse));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let router = axum::Router::new().route(
            "/v1/chat/completions",
            post(|| async { "not json" }),
        );
        let gw = client(stub_endpoint(router).await);

        let err = gw.generate("s", "u").await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_request_error() {
        let gw = OpenRouterClient::new(
            "sk-test",
            GatewayConfig::default().with_timeout(Duration::from_secs(2)),
        )
        .unwrap()
        .with_endpoint("http://127.0.0.1:1/v1/chat/completions");

        let err = gw.generate("s", "u").await.unwrap_err();
        assert!(matches!(err, GatewayError::Request(_)));
    }
}
