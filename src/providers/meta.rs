//! Meta-game context from the card-game API.
//!
//! `fetch_meta_summary` never fails: a live summary when the API answers,
//! the static fallback text otherwise.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DeckError, Result};

/// Static meta summary used whenever the live API is unavailable.
pub const FALLBACK_META_SUMMARY: &str = "\
Current Meta Information:

Popular Archetypes:
- Hog Cycle: fast cycle with cheap cards (2.6-3.0 average elixir)
- Beatdown: heavy tanks with support (4.0+ average elixir)
- Control: defensive focus with counter-push potential
- Bridge Spam: quick pressure with dual lane potential

Strong Cards in Meta:
- Win Conditions: Hog Rider, Giant, Balloon, Miner, Goblin Barrel
- Spells: Fireball, The Log, Arrows (essential for clearing swarms)
- Defense: Tesla, Cannon, Inferno Tower (anti-tank)
- Support: Musketeer, Archers, Ice Spirit (versatile)

Key Strategies:
- Elixir efficiency is crucial
- Spell coverage is essential
- Balance offense and defense
- Cycle speed shapes the playstyle
";

const META_INSIGHTS: &str = "\
Meta Insights:
- A balanced elixir curve is crucial for competitive play
- Most successful decks sit between 2.6 and 4.2 average elixir
- Spells clear swarms and finish towers
- Win conditions need defensive and cycle support

Current Meta Trends:
- Fast cycle decks remain popular (Hog 2.6, Miner cycle)
- Beatdown with heavy tanks is strong in certain metas
- Bridge spam and dual-lane pressure
- Control decks built around defensive value
";

/// Source of meta-game context for deck analysis.
#[async_trait::async_trait]
pub trait MetaDataProvider: Send + Sync {
    /// Human-readable meta summary. Never fails.
    async fn fetch_meta_summary(&self) -> String;

    /// Provider name for logging.
    fn name(&self) -> &str {
        "MetaDataProvider"
    }
}

/// Returns a fixed summary. Used in tests and offline deployments.
#[derive(Debug, Clone)]
pub struct StaticMetaProvider {
    summary: String,
}

impl StaticMetaProvider {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
        }
    }
}

impl Default for StaticMetaProvider {
    fn default() -> Self {
        Self::new(FALLBACK_META_SUMMARY)
    }
}

#[async_trait::async_trait]
impl MetaDataProvider for StaticMetaProvider {
    async fn fetch_meta_summary(&self) -> String {
        self.summary.clone()
    }

    fn name(&self) -> &str {
        "StaticMetaProvider"
    }
}

/// Connection settings for the card-game API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetaProviderConfig {
    pub base_url: String,
    /// Bearer token. Without one the provider always serves the fallback.
    pub api_key: Option<String>,
    pub card_limit: u32,
    pub timeout_seconds: u64,
}

impl Default for MetaProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.clashroyale.com/v1".to_string(),
            api_key: None,
            card_limit: 300,
            timeout_seconds: 10,
        }
    }
}

impl MetaProviderConfig {
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
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

#[derive(Debug, Deserialize)]
struct CardListing {
    items: Vec<ApiCard>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCard {
    #[serde(default)]
    elixir_cost: Option<u8>,
}

/// Meta provider backed by the official Clash Royale API.
pub struct ClashRoyaleMetaProvider {
    client: reqwest::Client,
    config: MetaProviderConfig,
}

impl ClashRoyaleMetaProvider {
    pub fn new(config: MetaProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| DeckError::Config(format!("cannot build meta API client: {e}")))?;
        Ok(Self { client, config })
    }

    async fn fetch_cards(&self, api_key: &str) -> Result<CardListing> {
        let url = format!(
            "{}/cards?limit={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.card_limit
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| DeckError::ExternalService(format!("card API request failed: {e}")))?
            .error_for_status()
            .map_err(|e| DeckError::ExternalService(format!("card API returned error: {e}")))?;

        response
            .json::<CardListing>()
            .await
            .map_err(|e| DeckError::ExternalService(format!("malformed card API response: {e}")))
    }
}

#[async_trait::async_trait]
impl MetaDataProvider for ClashRoyaleMetaProvider {
    async fn fetch_meta_summary(&self) -> String {
        let Some(api_key) = self.config.api_key.as_deref() else {
            log::debug!("No card API key configured, serving fallback meta summary");
            return FALLBACK_META_SUMMARY.to_string();
        };

        match self.fetch_cards(api_key).await {
            Ok(listing) => {
                log::info!("Received {} cards from card API", listing.items.len());
                summarize_cards(&listing.items)
            }
            Err(e) => {
                log::warn!("Could not fetch live meta data, using fallback: {e}");
                FALLBACK_META_SUMMARY.to_string()
            }
        }
    }

    fn name(&self) -> &str {
        "ClashRoyaleMetaProvider"
    }
}

/// Card counts per elixir cost plus the standing meta commentary.
fn summarize_cards(items: &[ApiCard]) -> String {
    let mut distribution = [0usize; 11];
    for cost in items.iter().filter_map(|c| c.elixir_cost) {
        if let Some(slot) = distribution.get_mut(usize::from(cost)) {
            *slot += 1;
        }
    }

    let mut summary = String::from("Current Meta Information from Clash Royale API:\n\n");
    summary.push_str(&format!("Total available cards: {}\n\n", items.len()));
    summary.push_str("Card Distribution by Elixir Cost:\n");
    for (cost, count) in distribution.iter().enumerate().skip(1) {
        if *count > 0 {
            summary.push_str(&format!("- {cost} elixir: {count} cards\n"));
        }
    }
    summary.push('\n');
    summary.push_str(META_INSIGHTS);
    summary
}
