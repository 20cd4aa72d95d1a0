//! End-to-end enhancement: assemble, call the model, split.
//!
//! [`Enhancer::enhance`] never fails. Gateway errors and timeouts are turned
//! into readable text in the enhanced-prompt slot so the caller can render
//! them like any other result.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use crate::assembler::assemble;
use crate::components::PromptComponents;
use crate::gateway::{GatewayError, ModelGateway};
use crate::splitter::{SplitOutcome, split};

/// Fixed system instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "\
You are an expert Prompt Engineer specializing in crafting highly effective prompts \
for large language models. Your goal is to take a user's initial or semi-structured prompt \
and transform it into an optimal prompt that:
1.  **Reduces Hallucination:** Adds clarity and constraints.
2.  **Increases Efficiency:** Makes the request precise.
3.  **Adds Crucial Elements:** Infers missing roles, formats, or constraints.
4.  **Provides Pitfall Warnings:** Identifies potential issues.

The user's message contains their input for a prompt. Provide the enhanced prompt and \
potential pitfalls for it.

Your output MUST be in two distinct sections, clearly labeled:
**Enhanced Prompt:** [Your completely rewritten and optimized prompt goes here]

**Potential Pitfalls & Suggestions:** [Bulleted list of what could go wrong]
";

/// Prefix of the enhanced-prompt slot when the model call fails.
pub const GATEWAY_ERROR_PREFIX: &str = "Error enhancing prompt with AI:";

/// Pitfalls slot when the model call fails.
pub const GATEWAY_FAILURE_PITFALLS: &str = "Error in AI call.";

/// Default upper bound on a single model call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The three text blocks shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enhancement {
    /// The user's components rendered by the assembler.
    pub assembled: String,
    pub enhanced_prompt: String,
    pub pitfalls: String,
}

impl Enhancement {
    fn from_error(assembled: String, err: &GatewayError) -> Self {
        Self {
            assembled,
            enhanced_prompt: format!("{GATEWAY_ERROR_PREFIX} {err}"),
            pitfalls: GATEWAY_FAILURE_PITFALLS.to_string(),
        }
    }
}

/// Drives one enhancement per call. Holds no per-request state, so a single
/// instance can be shared across concurrent requests.
#[derive(Clone)]
pub struct Enhancer {
    gateway: Arc<dyn ModelGateway>,
    timeout: Duration,
}

impl Enhancer {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            gateway,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Bound each model call by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Assemble `components`, send them to the model and split the reply.
    ///
    /// Dropping the returned future drops the in-flight model call.
    pub async fn enhance(&self, components: &PromptComponents) -> Enhancement {
        let assembled = assemble(components);
        let start = Instant::now();

        let generated = match tokio::time::timeout(
            self.timeout,
            self.gateway.generate(SYSTEM_INSTRUCTION, &assembled),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Timeout(self.timeout)),
        };

        let raw = match generated {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "Model call failed after {:.1}s: {err}",
                    start.elapsed().as_secs_f64()
                );
                return Enhancement::from_error(assembled, &err);
            }
        };

        let parts = split(&raw);
        if parts.outcome == SplitOutcome::Unparsed {
            warn!("Model response had no section markers ({} chars)", raw.len());
        }
        info!(
            "Enhanced prompt in {:.1}s: {} input chars, {} output chars, outcome={:?}",
            start.elapsed().as_secs_f64(),
            assembled.len(),
            raw.len(),
            parts.outcome,
        );

        Enhancement {
            assembled,
            enhanced_prompt: parts.enhanced_prompt,
            pitfalls: parts.pitfalls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayFuture;
    use crate::splitter::{UNPARSED_PITFALLS, UNPARSED_PREFIX};
    use std::sync::Mutex;

    /// Returns a scripted reply and records what it was asked.
    struct Scripted {
        reply: Result<String, fn() -> GatewayError>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl Scripted {
        fn ok(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(err: fn() -> GatewayError) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(err),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl ModelGateway for Scripted {
        fn generate<'a>(&'a self, system: &'a str, user: &'a str) -> GatewayFuture<'a> {
            self.seen
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            let reply = match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            };
            Box::pin(async move { reply })
        }
    }

    struct Hangs;

    impl ModelGateway for Hangs {
        fn generate<'a>(&'a self, _system: &'a str, _user: &'a str) -> GatewayFuture<'a> {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(String::new())
            })
        }
    }

    #[tokio::test]
    async fn assembled_text_is_sent_as_user_content() {
        let gw = Scripted::ok(
            "**Enhanced Prompt:** Act as a poet.\n\n**Potential Pitfalls & Suggestions:** - vague",
        );
        let enhancer = Enhancer::new(gw.clone());
        let components = PromptComponents::new()
            .with_base_prompt("Write a poem")
            .with_role("poet");

        let out = enhancer.enhance(&components).await;

        let expected = "User's Initial Request: Write a poem\n\nUser suggested role: poet";
        assert_eq!(out.assembled, expected);
        assert_eq!(out.enhanced_prompt, "Act as a poet.");
        assert_eq!(out.pitfalls, "- vague");

        let seen = gw.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, SYSTEM_INSTRUCTION);
        assert_eq!(seen[0].1, expected);
    }

    #[tokio::test]
    async fn gateway_error_becomes_text() {
        let gw = Scripted::failing(|| GatewayError::Status {
            status: 429,
            body: "quota exceeded".into(),
        });
        let out = Enhancer::new(gw)
            .enhance(&PromptComponents::new().with_task("t"))
            .await;

        assert_eq!(out.assembled, "User suggested task: t");
        assert!(out.enhanced_prompt.starts_with(GATEWAY_ERROR_PREFIX));
        assert!(out.enhanced_prompt.contains("quota exceeded"));
        assert_eq!(out.pitfalls, GATEWAY_FAILURE_PITFALLS);
    }

    #[tokio::test]
    async fn unmarked_reply_is_returned_verbatim() {
        let gw = Scripted::ok("Sure! Here you go.");
        let out = Enhancer::new(gw).enhance(&PromptComponents::new()).await;
        assert_eq!(
            out.enhanced_prompt,
            format!("{UNPARSED_PREFIX}Sure! Here you go.")
        );
        assert_eq!(out.pitfalls, UNPARSED_PITFALLS);
    }

    #[tokio::test]
    async fn empty_components_still_call_the_model() {
        let gw = Scripted::ok("**Potential Pitfalls & Suggestions:** say more");
        let out = Enhancer::new(gw.clone()).enhance(&PromptComponents::new()).await;
        assert_eq!(out.assembled, crate::assembler::NO_COMPONENTS_MESSAGE);
        assert_eq!(out.enhanced_prompt, "");
        assert_eq!(out.pitfalls, "say more");
        assert_eq!(gw.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_gateway_times_out() {
        let enhancer = Enhancer::new(Arc::new(Hangs)).with_timeout(Duration::from_secs(5));
        let out = enhancer.enhance(&PromptComponents::new()).await;
        assert_eq!(
            out.enhanced_prompt,
            format!("{GATEWAY_ERROR_PREFIX} model call timed out after 5s")
        );
        assert_eq!(out.pitfalls, GATEWAY_FAILURE_PITFALLS);
    }
}
