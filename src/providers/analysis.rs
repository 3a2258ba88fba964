//! Natural-language deck analysis through a chat-completion API.
//!
//! One request per analysis, no streaming, no retries. Any failure turns
//! into `ANALYSIS_APOLOGY`.

use std::fmt::Write as _;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::average_elixir;
use crate::error::{DeckError, Result};

/// Returned in place of an analysis when the model cannot be reached.
pub const ANALYSIS_APOLOGY: &str =
    "Sorry, I couldn't analyze your deck at the moment. Please try again later.";

/// Fixed system instruction for the model.
pub const SYSTEM_PROMPT: &str = "\
You are an expert Clash Royale strategist and deck analyst. Give detailed, \
actionable feedback on player decks based on:

1. Current meta trends from the supplied meta data
2. Card synergies and interactions
3. Elixir efficiency and cycle potential
4. Win condition viability
5. Defensive capabilities
6. Counter-play strategies

Be concise but thorough. Cover:
- Strengths and weaknesses of the deck
- Specific card interactions and synergies
- Meta relevance and matchup considerations
- Concrete improvement suggestions
- Strategic gameplay tips

Keep responses under 600 words and use bullet points.";

/// Produces strategic feedback for a deck.
#[async_trait::async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Analyze `deck` against the user's question. Never fails.
    async fn analyze(&self, deck: &[Card], user_query: &str, meta_summary: &str) -> String;

    /// Provider name for logging.
    fn name(&self) -> &str {
        "AnalysisProvider"
    }
}

/// Build the user prompt: card list, average elixir, question, meta data.
#[must_use]
pub fn build_user_prompt(deck: &[Card], user_query: &str, meta_summary: &str) -> String {
    let mut prompt = String::from("**User's Deck:**\n");
    for card in deck {
        let _ = writeln!(
            prompt,
            "- {} ({} elixir, {}, {})",
            card.name, card.elixir_cost, card.role, card.card_type
        );
    }

    let _ = write!(
        prompt,
        "\n**Average Elixir Cost:** {:.2}\n\n",
        average_elixir(deck)
    );
    let _ = write!(prompt, "**User's Question/Request:** {user_query}\n\n");

    if !meta_summary.is_empty() {
        let _ = write!(prompt, "**Current Meta Data:**\n{meta_summary}\n\n");
    }

    prompt.push_str(
        "Please analyze this deck and provide strategic feedback based on the user's specific question.",
    );
    prompt
}

/// Returns a fixed response. Used in tests and offline deployments.
#[derive(Debug, Clone)]
pub struct CannedAnalysisProvider {
    response: String,
}

impl CannedAnalysisProvider {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait::async_trait]
impl AnalysisProvider for CannedAnalysisProvider {
    async fn analyze(&self, _deck: &[Card], _user_query: &str, _meta_summary: &str) -> String {
        self.response.clone()
    }

    fn name(&self) -> &str {
        "CannedAnalysisProvider"
    }
}

/// Chat-completion model settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisProviderConfig {
    pub base_url: String,
    /// Bearer token. Without one the provider always apologises.
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl Default for AnalysisProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 800,
            temperature: 0.7,
            timeout_seconds: 30,
        }
    }
}

impl AnalysisProviderConfig {
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Analysis provider backed by an OpenAI-compatible chat-completion API.
pub struct OpenAiAnalysisProvider {
    client: reqwest::Client,
    config: AnalysisProviderConfig,
}

impl OpenAiAnalysisProvider {
    pub fn new(config: AnalysisProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| DeckError::Config(format!("cannot build analysis API client: {e}")))?;
        Ok(Self { client, config })
    }

    async fn complete_chat(&self, api_key: &str, user_prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let response: ChatResponse = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DeckError::ExternalService(format!("analysis request failed: {e}")))?
            .error_for_status()
            .map_err(|e| DeckError::ExternalService(format!("analysis API returned error: {e}")))?
            .json()
            .await
            .map_err(|e| DeckError::ExternalService(format!("malformed analysis response: {e}")))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| DeckError::ExternalService("analysis response had no content".into()))
    }
}

#[async_trait::async_trait]
impl AnalysisProvider for OpenAiAnalysisProvider {
    async fn analyze(&self, deck: &[Card], user_query: &str, meta_summary: &str) -> String {
        let Some(api_key) = self.config.api_key.as_deref() else {
            log::warn!("No analysis API key configured");
            return ANALYSIS_APOLOGY.to_string();
        };

        let prompt = build_user_prompt(deck, user_query, meta_summary);
        match self.complete_chat(api_key, &prompt).await {
            Ok(text) => {
                log::info!("Generated deck analysis for user query: {user_query}");
                text
            }
            Err(e) => {
                log::error!("Error generating deck analysis: {e}");
                ANALYSIS_APOLOGY.to_string()
            }
        }
    }

    fn name(&self) -> &str {
        "OpenAiAnalysisProvider"
    }
}
