//! Request boundary: the four deck operations over a shared catalog.
//!
//! `DeckService` is cheap to share (`Arc`) and holds no mutable state. Each
//! call resolves its card references, builds its own RNG and works on local
//! data only.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardRef, Catalog};
use crate::core::{DeckConfig, DeckRng, DECK_SIZE};
use crate::deck::{average_elixir, CompletedDeck, Deck, DeckCompleter, DeckGenerator};
use crate::error::{DeckError, Result};
use crate::providers::{AnalysisProvider, MetaDataProvider};

/// User-facing text for a failed analysis request.
pub const ANALYSIS_REQUEST_FAILED: &str = "Sorry, I couldn't analyze your deck. Please try again.";

/// Analysis request body. Both fields are required; they are optional here
/// so a missing field becomes a `Request` error instead of a parse failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub deck: Option<Vec<CardRef>>,
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Success,
    Error,
}

/// Analysis response body: `{analysis, status, message?}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: String,
    pub status: AnalysisStatus,
    /// Diagnostic detail for operators, only set on error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AnalysisResponse {
    #[must_use]
    pub fn success(analysis: String) -> Self {
        Self {
            analysis,
            status: AnalysisStatus::Success,
            message: None,
        }
    }

    #[must_use]
    pub fn failure(error: &DeckError) -> Self {
        Self {
            analysis: ANALYSIS_REQUEST_FAILED.to_string(),
            status: AnalysisStatus::Error,
            message: Some(error.to_string()),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == AnalysisStatus::Success
    }
}

/// Deck operations exposed to the HTTP layer.
pub struct DeckService {
    catalog: Arc<Catalog>,
    config: DeckConfig,
    meta: Arc<dyn MetaDataProvider>,
    analysis: Arc<dyn AnalysisProvider>,
}

impl DeckService {
    pub fn new(
        catalog: Arc<Catalog>,
        config: DeckConfig,
        meta: Arc<dyn MetaDataProvider>,
        analysis: Arc<dyn AnalysisProvider>,
    ) -> Result<Self> {
        config.validate()?;
        log::info!(
            "Deck service ready: {} cards, meta via {}, analysis via {}",
            catalog.len(),
            meta.name(),
            analysis.name()
        );
        Ok(Self {
            catalog,
            config,
            meta,
            analysis,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    fn rng(&self) -> DeckRng {
        let rng = match self.config.seed {
            Some(seed) => DeckRng::new(seed),
            None => DeckRng::from_entropy(),
        };
        log::debug!("Request RNG seed {}", rng.seed());
        rng
    }

    /// Generate a random balanced deck.
    pub fn generate(&self) -> Result<Deck> {
        DeckGenerator::new(&self.catalog, &self.config).generate(&mut self.rng())
    }

    /// Complete a partial deck and validate it.
    pub fn complete(&self, selected: &[CardRef]) -> Result<CompletedDeck> {
        let selected = self.resolve(selected)?;
        DeckCompleter::new(&self.catalog, &self.config).complete(&selected, &mut self.rng())
    }

    /// Validate a deck as-is, without filling empty slots.
    pub fn validate(&self, cards: &[CardRef]) -> Result<CompletedDeck> {
        let deck = self.resolve(cards)?;
        let warnings = self.config.rules.validate(&deck);
        Ok(CompletedDeck {
            average_elixir: average_elixir(&deck),
            deck,
            warnings,
        })
    }

    /// Analyze a deck against a free-text question.
    ///
    /// Collaborator failures are already absorbed by the providers; the only
    /// errors reported here are malformed requests.
    pub async fn analyze(&self, request: AnalysisRequest) -> AnalysisResponse {
        match self.try_analyze(request).await {
            Ok(text) => AnalysisResponse::success(text),
            Err(e) => {
                log::warn!("Rejected analysis request: {e}");
                AnalysisResponse::failure(&e)
            }
        }
    }

    async fn try_analyze(&self, request: AnalysisRequest) -> Result<String> {
        let refs = request
            .deck
            .ok_or_else(|| DeckError::Request("missing required field `deck`".into()))?;
        let query = request
            .query
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| DeckError::Request("missing required field `query`".into()))?;
        if refs.is_empty() {
            return Err(DeckError::Request("deck must contain at least one card".into()));
        }

        let deck = self.resolve(&refs)?;
        let meta_summary = self.meta.fetch_meta_summary().await;
        Ok(self.analysis.analyze(&deck, &query, &meta_summary).await)
    }

    /// Resolve card references against the catalog.
    ///
    /// Rejects unknown names, repeated names and more than `DECK_SIZE` cards.
    pub fn resolve(&self, refs: &[CardRef]) -> Result<Vec<Card>> {
        if refs.len() > DECK_SIZE {
            return Err(DeckError::Request(format!(
                "a deck holds at most {} cards, got {}",
                DECK_SIZE,
                refs.len()
            )));
        }

        let mut seen = FxHashSet::default();
        refs.iter()
            .map(|r| {
                if !seen.insert(r.name.as_str()) {
                    return Err(DeckError::Request(format!("duplicate card {}", r.name)));
                }
                self.catalog
                    .get(&r.name)
                    .cloned()
                    .ok_or_else(|| DeckError::Request(format!("unknown card {}", r.name)))
            })
            .collect()
    }
}
