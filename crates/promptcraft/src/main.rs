//! Enhance a prompt from the command line.
//!
//! Reads the API key from the `OPENROUTER_KEY` environment variable (a `.env`
//! file in the working directory is honored).
//!
//! # Examples
//!
//! ```sh
//! # Preview the text that would be sent to the model
//! promptcraft --base-prompt "Write a poem" --role poet --assemble-only
//!
//! # Full enhancement with list entries
//! promptcraft --base-prompt "Summarize this paper" \
//!   --context "Audience is undergraduates" \
//!   --constraint "Under 200 words" --constraint "No equations"
//!
//! # Different model and a tighter timeout
//! promptcraft --base-prompt "Plan a trip" --model openai/gpt-4o-mini --timeout-secs 20
//! ```

use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use promptcraft::{
    DEFAULT_MODEL, Enhancer, GatewayConfig, OpenRouterClient, PromptComponents, api_key_from_env,
    assemble,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Turn prompt components into an enhanced prompt with a list of pitfalls.
#[derive(Parser)]
#[command(name = "promptcraft")]
struct Cli {
    // ── Prompt components ──────────────────────────────────────
    /// The initial request
    #[arg(long, default_value = "")]
    base_prompt: String,

    /// Role the model should take
    #[arg(long, default_value = "")]
    role: String,

    /// Task description
    #[arg(long, default_value = "")]
    task: String,

    /// Desired output format
    #[arg(long, default_value = "")]
    format: String,

    /// Context entry (repeatable)
    #[arg(long)]
    context: Vec<String>,

    /// Constraint entry (repeatable)
    #[arg(long)]
    constraint: Vec<String>,

    /// Example entry (repeatable)
    #[arg(long)]
    example: Vec<String>,

    // ── Model settings ─────────────────────────────────────────
    /// Model to use
    #[arg(long, env = "PROMPTCRAFT_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Sampling temperature (0.0 = deterministic, 2.0 = very creative)
    #[arg(long, env = "PROMPTCRAFT_TEMPERATURE", default_value_t = 0.7)]
    temperature: f32,

    /// Maximum tokens in the response
    #[arg(long, default_value_t = 2048)]
    max_tokens: u32,

    /// Give up on the model call after this many seconds
    #[arg(long, env = "PROMPTCRAFT_TIMEOUT_SECS", default_value_t = 60)]
    timeout_secs: u64,

    // ── Output mode ────────────────────────────────────────────
    /// Print the assembled text and exit without calling the model
    #[arg(long)]
    assemble_only: bool,
}

impl Cli {
    fn components(&self) -> PromptComponents {
        PromptComponents::new()
            .with_base_prompt(&self.base_prompt)
            .with_role(&self.role)
            .with_task(&self.task)
            .with_format(&self.format)
            .with_contexts(&self.context)
            .with_constraints(&self.constraint)
            .with_examples(&self.example)
    }

    fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig::default()
            .with_model(&self.model)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let components = cli.components();

    if cli.assemble_only {
        println!("{}", assemble(&components));
        return;
    }

    let api_key = match api_key_from_env() {
        Ok(key) => key,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let config = cli.gateway_config();
    let client = match OpenRouterClient::new(api_key, config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let enhancer = Enhancer::new(Arc::new(client)).with_timeout(config.timeout);
    let out = enhancer.enhance(&components).await;

    println!("── Your assembled prompt ──\n\n{}\n", out.assembled);
    println!("── Enhanced prompt ──\n\n{}\n", out.enhanced_prompt);
    println!("── Potential pitfalls & suggestions ──\n\n{}", out.pitfalls);
}
