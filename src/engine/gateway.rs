//! Delegated-inference strategy: forwards the symptom list to an
//! OpenAI-compatible chat-completions gateway and parses the reply.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::GatewayConfig;
use crate::engine::{parser, prompt, CancelToken, EngineMode, PredictionError, Predictor};
use crate::models::Prediction;

/// Cap on the upstream body carried inside [`PredictionError::Upstream`].
const BODY_EXCERPT_LIMIT: usize = 300;

// ── Wire types ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// ── Client ──────────────────────────────────────────────────

/// HTTP client for the prediction gateway.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl GatewayClient {
    /// Creates a client against `base_url`. A trailing slash on the URL
    /// is tolerated.
    pub fn new(base_url: &str, api_key: &str, model: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(
            &config.base_url,
            &config.api_key,
            &config.model,
            config.timeout,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One chat-completion round trip. Returns the assistant text.
    /// Exactly one attempt; the engine never retries.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, PredictionError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(match status.as_u16() {
                429 => PredictionError::RateLimited,
                402 => PredictionError::QuotaExceeded,
                code => PredictionError::Upstream {
                    status: code,
                    body: excerpt(&body),
                },
            });
        }

        let completion: ChatCompletion =
            serde_json::from_str(&body).map_err(|e| PredictionError::MalformedResponse {
                reason: format!("not a chat completion: {e}"),
                raw: body.clone(),
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| PredictionError::MalformedResponse {
                reason: "no content in gateway reply".to_string(),
                raw: body,
            })
    }

    fn transport_error(&self, e: reqwest::Error) -> PredictionError {
        if e.is_timeout() {
            PredictionError::Transport(format!(
                "no reply from {} within {}s",
                self.base_url,
                self.timeout.as_secs()
            ))
        } else if e.is_connect() {
            PredictionError::Transport(format!("cannot connect to {}", self.base_url))
        } else {
            PredictionError::Transport(e.to_string())
        }
    }
}

fn excerpt(body: &str) -> String {
    if body.len() <= BODY_EXCERPT_LIMIT {
        return body.to_string();
    }
    let mut cut = BODY_EXCERPT_LIMIT;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}

// ── Strategy ────────────────────────────────────────────────

/// Engine that delegates every prediction to the gateway.
pub struct GatewayPredictor {
    client: GatewayClient,
}

impl GatewayPredictor {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    async fn infer(&self, symptoms: &[String]) -> Result<Prediction, PredictionError> {
        let user = prompt::build_user_prompt(symptoms);
        let content = self.client.complete(prompt::SYSTEM_PROMPT, &user).await?;
        parser::parse_prediction(&content)
    }
}

#[async_trait]
impl Predictor for GatewayPredictor {
    async fn predict(
        &self,
        symptoms: &[String],
        cancel: &CancelToken,
    ) -> Result<Prediction, PredictionError> {
        if symptoms.is_empty() {
            return Err(PredictionError::EmptyInput);
        }
        // A token cancelled up front never reaches the network.
        if cancel.is_cancelled() {
            return Err(PredictionError::Cancelled);
        }

        tokio::select! {
            _ = cancel.cancelled() => Err(PredictionError::Cancelled),
            outcome = self.infer(symptoms) => outcome,
        }
    }

    fn mode(&self) -> EngineMode {
        EngineMode::Gateway
    }
}
