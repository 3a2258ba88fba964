//! Custom deck completion.
//!
//! Starts from the user's picks and appends catalog cards one at a time,
//! steering the running elixir average with `is_elixir_suitable`. The
//! result is validated but never rejected: a catalog too small to reach
//! eight cards just yields a shorter deck.

use super::{average_elixir, CompletedDeck, DeckGenerator};
use crate::cards::{Card, Catalog};
use crate::core::{DeckConfig, DeckRng, DECK_SIZE};
use crate::error::Result;

/// Below this many cards any cost is accepted.
const OPEN_SLOTS: usize = 4;
/// Below this running average any cost is accepted.
const LOW_AVERAGE: f64 = 3.0;
/// Above this running average only cheap cards are accepted.
const HIGH_AVERAGE: f64 = 4.0;
const CHEAP_COST_CAP: u8 = 4;
const DEFAULT_COST_CAP: u8 = 6;

/// Whether `card` keeps the elixir curve in shape for a deck of `deck_size`
/// cards averaging `current_avg`.
#[must_use]
pub fn is_elixir_suitable(card: &Card, current_avg: f64, deck_size: usize) -> bool {
    if deck_size < OPEN_SLOTS || current_avg < LOW_AVERAGE {
        true
    } else if current_avg > HIGH_AVERAGE {
        card.elixir_cost <= CHEAP_COST_CAP
    } else {
        card.elixir_cost <= DEFAULT_COST_CAP
    }
}

/// Fills partial decks from a catalog.
pub struct DeckCompleter<'a> {
    catalog: &'a Catalog,
    config: &'a DeckConfig,
}

impl<'a> DeckCompleter<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog, config: &'a DeckConfig) -> Self {
        Self { catalog, config }
    }

    /// Complete `selected` up to eight cards and validate the result.
    ///
    /// An empty selection falls back to the random generator. That branch
    /// reports an average of `0.0` and no warnings, whatever the generated
    /// cards cost; clients rely on it, so it stays.
    pub fn complete(&self, selected: &[Card], rng: &mut DeckRng) -> Result<CompletedDeck> {
        if selected.is_empty() {
            let deck = DeckGenerator::new(self.catalog, self.config).generate(rng)?;
            return Ok(CompletedDeck {
                deck: deck.into_cards(),
                average_elixir: 0.0,
                warnings: Vec::new(),
            });
        }

        let mut deck: Vec<Card> = selected.to_vec();
        let mut pool: Vec<&Card> = self
            .catalog
            .all()
            .iter()
            .filter(|c| !selected.contains(c))
            .collect();

        while deck.len() < DECK_SIZE && !pool.is_empty() {
            rng.shuffle(&mut pool);
            let current_avg = average_elixir(&deck);
            let index = pool
                .iter()
                .position(|c| is_elixir_suitable(c, current_avg, deck.len()))
                .unwrap_or(0);
            deck.push(pool.remove(index).clone());
        }

        if deck.len() < DECK_SIZE {
            log::warn!(
                "Catalog exhausted while completing deck: {} of {} cards",
                deck.len(),
                DECK_SIZE
            );
        }

        let average_elixir = average_elixir(&deck);
        let warnings = self.config.rules.validate(&deck);
        log::info!(
            "Completed deck from {} selected cards (avg {:.2}, {} warnings)",
            selected.len(),
            average_elixir,
            warnings.len()
        );

        Ok(CompletedDeck {
            deck,
            average_elixir,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, cost: u8) -> Card {
        Card::new(name, "Troop", cost, "Support", "Common")
    }

    #[test]
    fn test_suitability_rule() {
        let heavy = card("Golem", 8);
        let mid = card("Giant", 5);
        let light = card("Knight", 3);

        // Early slots accept anything
        assert!(is_elixir_suitable(&heavy, 9.0, 3));
        // Low average accepts anything
        assert!(is_elixir_suitable(&heavy, 2.9, 6));
        // High average wants 4 or less
        assert!(!is_elixir_suitable(&mid, 4.1, 6));
        assert!(is_elixir_suitable(&card("Hog", 4), 4.1, 6));
        // Middle band caps at 6
        assert!(is_elixir_suitable(&mid, 3.5, 6));
        assert!(!is_elixir_suitable(&heavy, 3.5, 6));
        assert!(is_elixir_suitable(&light, 4.0, 4));
        assert!(is_elixir_suitable(&card("Pekka", 6), 3.0, 4));
    }

    #[test]
    fn test_fills_to_eight_without_duplicates() {
        let cards: Vec<_> = (0..20u8).map(|i| card(&format!("Card {i}"), 1 + i % 7)).collect();
        let catalog = Catalog::from_cards(cards.clone()).unwrap();
        let config = DeckConfig::default();
        let selected = vec![cards[3].clone(), cards[11].clone()];

        let completed = DeckCompleter::new(&catalog, &config)
            .complete(&selected, &mut DeckRng::new(4))
            .unwrap();

        assert_eq!(completed.deck.len(), DECK_SIZE);
        assert_eq!(&completed.deck[..2], &selected[..]);
        let mut names: Vec<_> = completed.deck.iter().map(|c| c.name.clone()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), DECK_SIZE);
        assert!((completed.average_elixir - average_elixir(&completed.deck)).abs() < 1e-9);
    }

    #[test]
    fn test_prefers_cheap_cards_when_expensive() {
        let mut cards: Vec<_> = (0..4).map(|i| card(&format!("Heavy {i}"), 7)).collect();
        cards.extend((0..6).map(|i| card(&format!("Pricey {i}"), 8)));
        cards.push(card("Skeletons", 1));
        cards.push(card("Ice Spirit", 1));
        cards.push(card("Bats", 2));
        cards.push(card("Knight", 3));
        let catalog = Catalog::from_cards(cards.clone()).unwrap();
        let config = DeckConfig::default();

        let completed = DeckCompleter::new(&catalog, &config)
            .complete(&cards[..4], &mut DeckRng::new(11))
            .unwrap();

        // Average starts at 7.0, so every added card must cost 4 or less
        assert_eq!(completed.deck.len(), DECK_SIZE);
        assert!(completed.deck[4..].iter().all(|c| c.elixir_cost <= 4));
    }

    #[test]
    fn test_falls_back_to_any_card() {
        let cards: Vec<_> = (0..10).map(|i| card(&format!("Heavy {i}"), 9)).collect();
        let catalog = Catalog::from_cards(cards.clone()).unwrap();
        let config = DeckConfig::default();

        let completed = DeckCompleter::new(&catalog, &config)
            .complete(&cards[..5], &mut DeckRng::new(2))
            .unwrap();

        assert_eq!(completed.deck.len(), DECK_SIZE);
        assert!(completed.warnings.iter().any(|w| w.contains("too expensive")));
    }

    #[test]
    fn test_short_catalog_yields_short_deck() {
        let cards: Vec<_> = (0..5u8).map(|i| card(&format!("Card {i}"), 3)).collect();
        let catalog = Catalog::from_cards(cards.clone()).unwrap();
        let config = DeckConfig::default();

        let completed = DeckCompleter::new(&catalog, &config)
            .complete(&cards[..1], &mut DeckRng::new(0))
            .unwrap();

        assert_eq!(completed.deck.len(), 5);
        assert!((completed.average_elixir - 3.0).abs() < 1e-9);
    }
}
