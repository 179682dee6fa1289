//! AI gateway
//!
//! ## Stack
//! - `async-openai` against any OpenAI-compatible chat endpoint
//! - candidate models are rotated in priority order with a small bounded
//!   retry for transient failures
//!
//! The gateway never panics and never returns `Err` to callers: every
//! failure mode ends up as data inside `GenOutcome`, so the caller can show
//! it and move on.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use rand::Rng;
use tracing::{debug, warn};

use crate::config::Config;

/// Prompts above this many characters are cut before sending.
const MAX_PROMPT_CHARS: usize = 20_000;

/// Attempts per model before rotating to the next candidate.
const ATTEMPTS_PER_MODEL: usize = 2;

/// Generation parameters forwarded with every request.
#[derive(Debug, Clone)]
pub struct GenParams {
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            top_p: 0.9,
            max_output_tokens: 2048,
        }
    }
}

/// Outcome of one generation round-trip. Exactly one of `text` or `error`
/// is set; `model` names the candidate that answered.
#[derive(Debug, Clone, Default)]
pub struct GenOutcome {
    pub text: Option<String>,
    pub model: Option<String>,
    pub error: Option<String>,
}

impl GenOutcome {
    fn ok(text: String, model: &str) -> Self {
        Self {
            text: Some(text),
            model: Some(model.to_string()),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            text: None,
            model: None,
            error: Some(message.into()),
        }
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }
}

/// AI gateway service.
///
/// Responsibilities:
/// - one chat round-trip per call, prompt in, text out
/// - model rotation and bounded retry
/// - prompt truncation
/// - no exam/session types anywhere in here
pub struct AiGateway {
    client: Client<OpenAIConfig>,
    api_key: String,
    models: Vec<String>,
}

impl AiGateway {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.ai_api_key)
            .with_api_base(&config.ai_api_base_url);

        let client = Client::with_config(openai_config);

        let candidates: Vec<String> = config
            .ai_model_names
            .split(',')
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();

        Self {
            client,
            api_key: config.ai_api_key.trim().to_string(),
            models: prioritize_models(&candidates),
        }
    }

    /// Whether generation can be attempted at all.
    pub fn ready(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Generate text for `prompt`, rotating through the candidate models.
    pub async fn generate(&self, prompt: &str, params: &GenParams) -> GenOutcome {
        if !self.ready() {
            return GenOutcome::err("no API key configured; set DEKIEMTRA_API_KEY");
        }
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return GenOutcome::err("empty prompt");
        }
        if self.models.is_empty() {
            return GenOutcome::err("no candidate model configured");
        }

        let prompt = truncate_prompt(prompt, MAX_PROMPT_CHARS);

        let mut last_error = String::new();
        for model in &self.models {
            for attempt in 0..ATTEMPTS_PER_MODEL {
                debug!("calling model {} (attempt {})", model, attempt + 1);
                match self.send(model, &prompt, params).await {
                    Ok(text) => return GenOutcome::ok(text, model),
                    Err(e) => {
                        last_error = e.to_string();
                        warn!("model {} failed: {}", model, last_error);
                        if is_transient(&last_error) {
                            backoff(attempt).await;
                            continue;
                        }
                        // non-transient: rotate to the next candidate
                        break;
                    }
                }
            }
        }

        GenOutcome::err(format!("no usable model left; last error: {last_error}"))
    }

    async fn send(&self, model: &str, prompt: &str, params: &GenParams) -> anyhow::Result<String> {
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(params.temperature)
            .top_p(params.top_p)
            .max_tokens(params.max_output_tokens)
            .build()?;

        let response = self.client.chat().create(request).await?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        let content = content.trim();
        if content.is_empty() {
            anyhow::bail!("model returned empty text");
        }

        Ok(content.to_string())
    }
}

/// Order candidate models: flash variants first, then pro, then the rest.
fn prioritize_models(candidates: &[String]) -> Vec<String> {
    let mut priority: Vec<String> = Vec::new();
    for m in candidates {
        if m.to_lowercase().contains("flash") {
            priority.push(m.clone());
        }
    }
    for m in candidates {
        if m.to_lowercase().contains("pro") && !priority.contains(m) {
            priority.push(m.clone());
        }
    }
    for m in candidates {
        if !priority.contains(m) {
            priority.push(m.clone());
        }
    }
    priority
}

fn truncate_prompt(prompt: &str, max_chars: usize) -> String {
    if prompt.chars().count() <= max_chars {
        return prompt.to_string();
    }
    let cut: String = prompt.chars().take(max_chars).collect();
    format!("{cut}\n\n[...TRUNCATED, PROMPT TOO LONG...]")
}

fn is_transient(message: &str) -> bool {
    let lowered = message.to_lowercase();
    ["429", "rate", "resource_exhausted", "temporarily", "unavailable"]
        .iter()
        .any(|k| lowered.contains(k))
}

/// Exponential backoff capped at 8 s, plus a little jitter.
async fn backoff(attempt: usize) {
    let base = f64::min(8.0, 2.0_f64.powi(attempt as i32));
    let jitter = rand::thread_rng().gen_range(0.0..0.6);
    tokio::time::sleep(std::time::Duration::from_secs_f64(base + jitter)).await;
}
