//! Semantic fallback classifier
//!
//! Used only when no alias or pattern matches. The classifier is an opaque
//! "text -> intent" capability; the bundled implementation talks to a local
//! Ollama server.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::SemanticSettings;
use crate::domain::CommandIntent;

/// Classifier output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Intent name, e.g. "openApp"
    pub intent: String,
    #[serde(default)]
    pub entities: BTreeMap<String, String>,
    #[serde(default)]
    pub confidence: f64,
}

/// Slow-path intent classifier
#[async_trait]
pub trait SemanticClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Classification>;
}

/// Classifier backed by an Ollama `/api/generate` endpoint in JSON mode
#[derive(Clone)]
pub struct OllamaClassifier {
    endpoint: String,
    model: String,
    agent: ureq::Agent,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    format: &'static str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClassifier {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_millis(500))
            .timeout(timeout)
            .build();

        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            agent,
        }
    }

    pub fn from_settings(settings: &SemanticSettings) -> Self {
        Self::new(
            settings.endpoint.clone(),
            settings.model.clone(),
            Duration::from_millis(settings.timeout_ms),
        )
    }

    fn generate(&self, text: &str) -> Result<Classification> {
        let url = format!("{}/api/generate", self.endpoint);
        let request = GenerateRequest {
            model: &self.model,
            prompt: build_prompt(text),
            format: "json",
            stream: false,
        };

        let response: GenerateResponse = self
            .agent
            .post(&url)
            .send_json(&request)
            .with_context(|| format!("Failed to reach classifier at {}", url))?
            .into_json()
            .context("Failed to decode classifier response")?;

        serde_json::from_str(&response.response)
            .context("Classifier returned malformed JSON")
    }
}

#[async_trait]
impl SemanticClassifier for OllamaClassifier {
    async fn classify(&self, text: &str) -> Result<Classification> {
        let classifier = self.clone();
        let text = text.to_string();
        tokio::task::spawn_blocking(move || classifier.generate(&text))
            .await
            .context("Classifier task panicked")?
    }
}

fn build_prompt(text: &str) -> String {
    let intents = CommandIntent::ALL
        .iter()
        .filter(|i| !matches!(i, CommandIntent::ChainedCommand | CommandIntent::CustomAlias))
        .map(|i| i.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Classify the voice command into one intent.\n\
         Intents: {intents}\n\
         Entity keys: appName, level, shortcutName\n\
         Reply with JSON only: {{\"intent\": \"<intent>\", \"entities\": {{}}, \"confidence\": <0..1>}}\n\
         Command: {text}"
    )
}
