//! Deck assembly configuration.
//!
//! The deck size is fixed by the game, everything else is tunable per
//! deployment:
//! - `max_attempts`: rejection-sampling budget for the generator
//! - `second_*_chance`: odds of a second win condition / spell
//! - `seed`: pin the RNG for reproducible decks
//! - `rules`: validator thresholds

use serde::{Deserialize, Serialize};

use crate::deck::ValidationRules;
use crate::error::{DeckError, Result};

/// Number of cards in a finished deck.
pub const DECK_SIZE: usize = 8;

/// Deck generation and validation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Attempts the generator makes before giving up.
    pub max_attempts: u32,

    /// Probability of adding a second win condition when one is available.
    pub second_win_condition_chance: f64,

    /// Probability of adding a second spell when one is available.
    pub second_spell_chance: f64,

    /// Fixed RNG seed. `None` seeds every request from entropy.
    pub seed: Option<u64>,

    /// Thresholds used when validating a finished deck.
    pub rules: ValidationRules,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1000,
            second_win_condition_chance: 0.25,
            second_spell_chance: 0.7,
            seed: None,
            rules: ValidationRules::default(),
        }
    }
}

impl DeckConfig {
    /// Set the generator attempt budget.
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Pin the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the probability of a second win condition.
    #[must_use]
    pub fn with_second_win_condition_chance(mut self, chance: f64) -> Self {
        self.second_win_condition_chance = chance;
        self
    }

    /// Set the probability of a second spell.
    #[must_use]
    pub fn with_second_spell_chance(mut self, chance: f64) -> Self {
        self.second_spell_chance = chance;
        self
    }

    /// Replace the validation thresholds.
    #[must_use]
    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    /// Reject configurations the generator cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(DeckError::Config("max_attempts must be at least 1".into()));
        }
        for (name, chance) in [
            ("second_win_condition_chance", self.second_win_condition_chance),
            ("second_spell_chance", self.second_spell_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(DeckError::Config(format!(
                    "{name} must be within [0, 1], got {chance}"
                )));
            }
        }
        Ok(())
    }
}
