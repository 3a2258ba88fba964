//! Random balanced deck generation.
//!
//! Each attempt picks one or two win conditions, one or two spells, then
//! fills the remaining slots from everything else except win conditions.
//! Attempts that come up short are thrown away and retried until the
//! configured budget runs out.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::Deck;
use crate::cards::{Card, Catalog};
use crate::core::{DeckConfig, DeckRng, DECK_SIZE};
use crate::error::{DeckError, Result};

/// Outcome of a single sampling attempt.
#[derive(Debug)]
enum Attempt<'a> {
    /// Full deck of distinct cards, in selection order.
    Complete(SmallVec<[&'a Card; DECK_SIZE]>),
    /// The pool ran dry before the deck filled up.
    Short(usize),
    /// Safety check tripped on a repeated name.
    Duplicate(String),
}

/// Rejection-sampling deck generator over a catalog.
///
/// ## Example
///
/// ```
/// use deck_forge::cards::{Card, Catalog};
/// use deck_forge::core::{DeckConfig, DeckRng};
/// use deck_forge::deck::DeckGenerator;
///
/// let cards = (0..12u8)
///     .map(|i| Card::new(format!("Troop {i}"), "Troop", 1 + i % 6, "Support", "Common"))
///     .collect();
/// let catalog = Catalog::from_cards(cards).unwrap();
/// let config = DeckConfig::default();
///
/// let deck = DeckGenerator::new(&catalog, &config)
///     .generate(&mut DeckRng::new(42))
///     .unwrap();
/// assert_eq!(deck.len(), 8);
/// ```
pub struct DeckGenerator<'a> {
    catalog: &'a Catalog,
    config: &'a DeckConfig,
}

impl<'a> DeckGenerator<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog, config: &'a DeckConfig) -> Self {
        Self { catalog, config }
    }

    /// Generate a deck, retrying up to `config.max_attempts` times.
    pub fn generate(&self, rng: &mut DeckRng) -> Result<Deck> {
        self.config.validate()?;
        if self.catalog.is_empty() {
            return Err(DeckError::Generation { attempts: 0 });
        }

        for attempt in 1..=self.config.max_attempts {
            match self.attempt(rng) {
                Attempt::Complete(cards) => {
                    let deck = Deck::new(cards.into_iter().cloned().collect());
                    log::info!(
                        "Generated deck on attempt {}: {:?} (avg {:.2})",
                        attempt,
                        deck.names().collect::<Vec<_>>(),
                        deck.average_elixir()
                    );
                    return Ok(deck);
                }
                Attempt::Short(size) => {
                    log::debug!("Attempt {attempt}: pool exhausted at {size} cards");
                }
                Attempt::Duplicate(name) => {
                    log::warn!("Attempt {attempt}: duplicate card {name} in deck, retrying");
                }
            }
        }

        log::error!(
            "No valid deck after {} attempts over {} cards",
            self.config.max_attempts,
            self.catalog.len()
        );
        Err(DeckError::Generation {
            attempts: self.config.max_attempts,
        })
    }

    fn attempt(&self, rng: &mut DeckRng) -> Attempt<'a> {
        let catalog: &'a Catalog = self.catalog;
        let mut deck: SmallVec<[&'a Card; DECK_SIZE]> = SmallVec::new();

        let mut win_conditions: Vec<&'a Card> =
            catalog.all().iter().filter(|c| c.is_win_condition()).collect();
        pick_one_or_two(
            &mut win_conditions,
            self.config.second_win_condition_chance,
            &mut deck,
            rng,
        );

        let mut spells: Vec<&'a Card> = catalog
            .all()
            .iter()
            .filter(|c| !deck.contains(c) && c.is_spell())
            .collect();
        pick_one_or_two(&mut spells, self.config.second_spell_chance, &mut deck, rng);

        let mut pool: Vec<&'a Card> = catalog
            .all()
            .iter()
            .filter(|c| !deck.contains(c) && !c.is_win_condition())
            .collect();
        while deck.len() < DECK_SIZE && !pool.is_empty() {
            rng.shuffle(&mut pool);
            let next = pool.swap_remove(0);
            if !deck.contains(&next) {
                deck.push(next);
            }
        }

        if deck.len() < DECK_SIZE {
            return Attempt::Short(deck.len());
        }

        let duplicate = {
            let mut seen = FxHashSet::default();
            deck.iter()
                .find(|&&card| !seen.insert(card.name.as_str()))
                .map(|c| c.name.clone())
        };
        if let Some(name) = duplicate {
            return Attempt::Duplicate(name);
        }

        Attempt::Complete(deck)
    }
}

/// Shuffle `candidates`, take the first, and with `second_chance` the second.
fn pick_one_or_two<'a>(
    candidates: &mut [&'a Card],
    second_chance: f64,
    deck: &mut SmallVec<[&'a Card; DECK_SIZE]>,
    rng: &mut DeckRng,
) {
    if candidates.is_empty() {
        return;
    }
    rng.shuffle(candidates);
    deck.push(candidates[0]);
    if rng.gen_bool(second_chance) && candidates.len() > 1 {
        deck.push(candidates[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with(win_conditions: usize, spells: usize, others: usize) -> Catalog {
        let mut cards = Vec::new();
        for i in 0..win_conditions {
            cards.push(Card::new(format!("Win {i}"), "Troop", 5, "WinCondition", "Rare"));
        }
        for i in 0..spells {
            cards.push(Card::new(format!("Spell {i}"), "Spell", 3, "Spell", "Common"));
        }
        for i in 0..others {
            cards.push(Card::new(format!("Troop {i}"), "Troop", 3, "Support", "Common"));
        }
        Catalog::from_cards(cards).unwrap()
    }

    #[test]
    fn test_generates_full_distinct_deck() {
        let catalog = catalog_with(2, 3, 15);
        let config = DeckConfig::default();
        let deck = DeckGenerator::new(&catalog, &config)
            .generate(&mut DeckRng::new(1))
            .unwrap();

        assert_eq!(deck.len(), DECK_SIZE);
        let names: FxHashSet<_> = deck.names().collect();
        assert_eq!(names.len(), DECK_SIZE);
    }

    #[test]
    fn test_win_condition_then_spell_first() {
        let catalog = catalog_with(2, 3, 15);
        let config = DeckConfig::default();
        let deck = DeckGenerator::new(&catalog, &config)
            .generate(&mut DeckRng::new(5))
            .unwrap();

        assert!(deck.cards()[0].is_win_condition());
        let win_count = deck.cards().iter().filter(|c| c.is_win_condition()).count();
        assert!(deck.cards()[win_count].is_spell());
    }

    #[test]
    fn test_second_picks_follow_chances() {
        let catalog = catalog_with(3, 3, 15);

        let always = DeckConfig::default()
            .with_second_win_condition_chance(1.0)
            .with_second_spell_chance(1.0);
        let deck = DeckGenerator::new(&catalog, &always)
            .generate(&mut DeckRng::new(3))
            .unwrap();
        assert_eq!(deck.cards().iter().filter(|c| c.is_win_condition()).count(), 2);
        // The third spell can still land in the fill
        assert!(deck.cards().iter().filter(|c| c.is_spell()).count() >= 2);

        let never = DeckConfig::default()
            .with_second_win_condition_chance(0.0)
            .with_second_spell_chance(0.0);
        let deck = DeckGenerator::new(&catalog, &never)
            .generate(&mut DeckRng::new(3))
            .unwrap();
        assert_eq!(deck.cards().iter().filter(|c| c.is_win_condition()).count(), 1);
    }

    #[test]
    fn test_no_win_conditions_in_catalog() {
        let catalog = catalog_with(0, 2, 10);
        let config = DeckConfig::default();
        let deck = DeckGenerator::new(&catalog, &config)
            .generate(&mut DeckRng::new(9))
            .unwrap();

        assert_eq!(deck.len(), DECK_SIZE);
        assert!(deck.cards().iter().all(|c| !c.is_win_condition()));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let catalog = catalog_with(2, 3, 15);
        let config = DeckConfig::default().with_second_spell_chance(f64::NAN);
        let err = DeckGenerator::new(&catalog, &config)
            .generate(&mut DeckRng::new(0))
            .unwrap_err();
        assert!(matches!(err, DeckError::Config(_)));

        let config = DeckConfig::default().with_max_attempts(0);
        let err = DeckGenerator::new(&catalog, &config)
            .generate(&mut DeckRng::new(0))
            .unwrap_err();
        assert!(matches!(err, DeckError::Config(_)));
    }

    #[test]
    fn test_small_catalog_fails() {
        let catalog = catalog_with(1, 1, 4);
        let config = DeckConfig::default().with_max_attempts(25);
        let err = DeckGenerator::new(&catalog, &config)
            .generate(&mut DeckRng::new(0))
            .unwrap_err();

        assert!(matches!(err, DeckError::Generation { attempts: 25 }));
    }

    #[test]
    fn test_win_conditions_cannot_fill() {
        // 8 cards but 6 are win conditions: at most 2 can ever be picked
        let catalog = catalog_with(6, 1, 1);
        let config = DeckConfig::default().with_max_attempts(10);
        assert!(DeckGenerator::new(&catalog, &config)
            .generate(&mut DeckRng::new(0))
            .is_err());
    }

    #[test]
    fn test_same_seed_same_deck() {
        let catalog = catalog_with(2, 3, 15);
        let config = DeckConfig::default();
        let generator = DeckGenerator::new(&catalog, &config);

        let a = generator.generate(&mut DeckRng::new(77)).unwrap();
        let b = generator.generate(&mut DeckRng::new(77)).unwrap();
        assert_eq!(a.names().collect::<Vec<_>>(), b.names().collect::<Vec<_>>());
    }
}
