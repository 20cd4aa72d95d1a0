//! Prompt enhancer web server.
//!
//! Serves the prompt form and forwards submissions to the model through
//! OpenRouter. The API key is read from `OPENROUTER_KEY` (a `.env` file in the
//! working directory is honored); the server refuses to start without it.
//!
//! # Usage
//!
//! ```bash
//! OPENROUTER_KEY=sk-... cargo run -p promptcraft-web
//! OPENROUTER_KEY=sk-... cargo run -p promptcraft-web -- --port 8080
//! OPENROUTER_KEY=sk-... cargo run -p promptcraft-web -- --model openai/gpt-4o-mini --temperature 0.3
//! ```
//!
//! Then open the printed URL in a browser.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use promptcraft::{DEFAULT_MODEL, Enhancer, GatewayConfig, OpenRouterClient, api_key_from_env};
use promptcraft_web::{WebConfig, spawn_web};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Prompt enhancer web server.
#[derive(Parser)]
#[command(about = "Browser form that turns prompt components into an enhanced prompt")]
struct Args {
    /// Interface to listen on.
    #[arg(long, env = "PROMPTCRAFT_HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port for the web UI server.
    #[arg(long, env = "PROMPTCRAFT_PORT", default_value_t = 5000)]
    port: u16,

    /// LLM model to use.
    #[arg(long, env = "PROMPTCRAFT_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Sampling temperature.
    #[arg(long, env = "PROMPTCRAFT_TEMPERATURE", default_value_t = 0.7)]
    temperature: f32,

    /// Maximum tokens per model response.
    #[arg(long, default_value_t = 2048)]
    max_tokens: u32,

    /// Give up on a model call after this many seconds.
    #[arg(long, env = "PROMPTCRAFT_TIMEOUT_SECS", default_value_t = 60)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    // Fail fast on missing credentials, before binding anything.
    let api_key = match api_key_from_env() {
        Ok(key) => key,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let config = GatewayConfig::default()
        .with_model(args.model)
        .with_temperature(args.temperature)
        .with_max_tokens(args.max_tokens)
        .with_timeout(Duration::from_secs(args.timeout_secs));

    let client = match OpenRouterClient::with_headers(
        api_key,
        config.clone(),
        "https://github.com/tacryt-socryp/promptcraft",
        "promptcraft-web",
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let enhancer = Enhancer::new(Arc::new(client)).with_timeout(config.timeout);
    let web_config = WebConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
    };

    let addr = match spawn_web(enhancer, web_config).await {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    info!("Using model {} (timeout {}s)", config.model, args.timeout_secs);
    println!("Web UI: http://{addr}");

    if let Err(e) = tokio::signal::ctrl_c().await {
        eprintln!("Error: failed to listen for shutdown signal: {e}");
    }
    info!("Shutting down");
}
