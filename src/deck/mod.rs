//! Deck assembly: random generation, custom completion and validation.
//!
//! ## Key Types
//!
//! - `Deck`: Finished 8-card deck with its average elixir cost
//! - `CompletedDeck`: Completer output (cards, average, warnings)
//! - `DeckGenerator`: Rejection-sampling random deck builder
//! - `DeckCompleter`: Fills a partial deck with elixir-aware picks
//! - `ValidationRules`: Heuristic deck checks

pub mod completer;
pub mod generator;
pub mod validator;

use serde::Serialize;
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::DECK_SIZE;

pub use completer::{is_elixir_suitable, DeckCompleter};
pub use generator::DeckGenerator;
pub use validator::{validate, ValidationRules};

/// Arithmetic mean of the cards' elixir costs, `0.0` for no cards.
#[must_use]
pub fn average_elixir(cards: &[Card]) -> f64 {
    if cards.is_empty() {
        return 0.0;
    }
    let total: u32 = cards.iter().map(|c| u32::from(c.elixir_cost)).sum();
    f64::from(total) / cards.len() as f64
}

/// A finished deck: exactly `DECK_SIZE` distinct cards in selection order.
///
/// Only the generator builds these, after checking size and uniqueness.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    cards: SmallVec<[Card; DECK_SIZE]>,
    average_elixir: f64,
}

impl Deck {
    pub(crate) fn new(cards: SmallVec<[Card; DECK_SIZE]>) -> Self {
        let average_elixir = average_elixir(&cards);
        Self {
            cards,
            average_elixir,
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn average_elixir(&self) -> f64 {
        self.average_elixir
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card names in selection order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cards.iter().map(|c| c.name.as_str())
    }

    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.cards.into_vec()
    }
}

/// Result of completing (or just validating) a user deck.
///
/// Serialized as `{deck, averageElixir, warnings}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedDeck {
    pub deck: Vec<Card>,
    pub average_elixir: f64,
    pub warnings: Vec<String>,
}
