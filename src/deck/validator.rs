//! Heuristic deck validation.
//!
//! Every check runs; the result lists one warning per failed check, in check
//! order. An empty list means the deck looks sane.

use serde::{Deserialize, Serialize};

use super::average_elixir;
use crate::cards::{Card, CYCLE_MAX_COST};

/// Thresholds for the deck checks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// More win conditions than this triggers a warning (zero always does).
    pub max_win_conditions: usize,

    /// More spells than this triggers a warning (zero always does).
    pub max_spells: usize,

    pub max_buildings: usize,

    /// Average elixir above this is "too expensive".
    pub max_average_elixir: f64,

    /// Average elixir below this is "too cheap".
    pub min_average_elixir: f64,

    /// More cycle cards than this triggers a warning.
    pub max_cycle_cards: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            max_win_conditions: 2,
            max_spells: 3,
            max_buildings: 2,
            max_average_elixir: 4.5,
            min_average_elixir: 3.0,
            max_cycle_cards: 4,
        }
    }
}

impl ValidationRules {
    /// Run all checks against `cards`.
    #[must_use]
    pub fn validate(&self, cards: &[Card]) -> Vec<String> {
        let mut warnings = Vec::new();

        let win_conditions = cards.iter().filter(|c| c.is_win_condition()).count();
        if win_conditions == 0 {
            warnings.push("Deck has no win condition".to_string());
        } else if win_conditions > self.max_win_conditions {
            warnings.push(format!(
                "Too many win conditions (max {} recommended)",
                self.max_win_conditions
            ));
        }

        let spells = cards.iter().filter(|c| c.is_spell()).count();
        if spells == 0 {
            warnings.push("Deck has no spells".to_string());
        } else if spells > self.max_spells {
            warnings.push(format!("Too many spells (max {} recommended)", self.max_spells));
        }

        let buildings = cards.iter().filter(|c| c.is_building()).count();
        if buildings > self.max_buildings {
            warnings.push(format!(
                "Too many buildings (max {} recommended)",
                self.max_buildings
            ));
        }

        let average = average_elixir(cards);
        if average > self.max_average_elixir {
            warnings.push(format!(
                "Deck is too expensive (average elixir > {:.1})",
                self.max_average_elixir
            ));
        } else if average < self.min_average_elixir {
            warnings.push(format!(
                "Deck might be too cheap (average elixir < {:.1})",
                self.min_average_elixir
            ));
        }

        let cycle_cards = cards.iter().filter(|c| c.is_cycle()).count();
        if cycle_cards > self.max_cycle_cards {
            warnings.push(format!(
                "Too many cheap cards (max {} cards costing {} or less recommended)",
                self.max_cycle_cards, CYCLE_MAX_COST
            ));
        }

        warnings
    }
}

/// Validate with the default thresholds.
#[must_use]
pub fn validate(cards: &[Card]) -> Vec<String> {
    ValidationRules::default().validate(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn troop(name: &str, cost: u8) -> Card {
        Card::new(name, "Troop", cost, "Support", "Common")
    }

    fn balanced_deck() -> Vec<Card> {
        vec![
            Card::new("Hog Rider", "Troop", 4, "WinCondition", "Rare"),
            Card::new("Fireball", "Spell", 4, "Spell", "Rare"),
            Card::new("The Log", "Spell", 2, "SmallSpell", "Legendary"),
            Card::new("Cannon", "Building", 3, "Defense", "Common"),
            troop("Musketeer", 4),
            troop("Valkyrie", 4),
            troop("Ice Spirit", 1),
            troop("Mini P.E.K.K.A", 4),
        ]
    }

    #[test]
    fn test_balanced_deck_has_no_warnings() {
        assert!(validate(&balanced_deck()).is_empty());
    }

    #[test]
    fn test_no_win_condition() {
        let mut deck = balanced_deck();
        deck[0] = troop("Knight", 3);

        let warnings = validate(&deck);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("no win condition"));
    }

    #[test]
    fn test_too_many_win_conditions() {
        let mut deck = balanced_deck();
        deck[4] = Card::new("Giant", "Troop", 5, "WinCondition", "Rare");
        deck[5] = Card::new("Miner", "Troop", 3, "WinCondition", "Legendary");

        let warnings = validate(&deck);
        assert!(warnings.iter().any(|w| w.contains("Too many win conditions (max 2 recommended)")));
    }

    #[test]
    fn test_spell_checks() {
        let no_spells: Vec<_> = balanced_deck().into_iter().filter(|c| !c.is_spell()).collect();
        assert!(validate(&no_spells).iter().any(|w| w.contains("no spells")));

        let mut many = balanced_deck();
        many[4] = Card::new("Arrows", "Spell", 3, "Spell", "Common");
        many[5] = Card::new("Poison", "Spell", 4, "BigSpell", "Epic");
        assert!(validate(&many)
            .iter()
            .any(|w| w == "Too many spells (max 3 recommended)"));
    }

    #[test]
    fn test_too_many_buildings() {
        let mut deck = balanced_deck();
        deck[4] = Card::new("Tesla", "Building", 4, "Defense", "Common");
        deck[5] = Card::new("Inferno Tower", "Building", 5, "Defense", "Rare");

        assert!(validate(&deck)
            .iter()
            .any(|w| w == "Too many buildings (max 2 recommended)"));
    }

    #[test]
    fn test_expensive_deck_is_not_cheap() {
        let deck: Vec<_> = (0..8).map(|i| troop(&format!("Heavy {i}"), 5)).collect();
        let warnings = validate(&deck);

        assert!(warnings.iter().any(|w| w.contains("too expensive")));
        assert!(!warnings.iter().any(|w| w.contains("too cheap")));
    }

    #[test]
    fn test_cheap_deck() {
        let deck: Vec<_> = (0..8).map(|i| troop(&format!("Light {i}"), 2)).collect();
        let warnings = validate(&deck);

        assert!(warnings
            .iter()
            .any(|w| w == "Deck might be too cheap (average elixir < 3.0)"));
        assert!(warnings
            .iter()
            .any(|w| w == "Too many cheap cards (max 4 cards costing 2 or less recommended)"));
    }

    #[test]
    fn test_warnings_follow_check_order() {
        let deck: Vec<_> = (0..8).map(|i| troop(&format!("Light {i}"), 1)).collect();
        let warnings = validate(&deck);

        assert_eq!(
            warnings,
            vec![
                "Deck has no win condition",
                "Deck has no spells",
                "Deck might be too cheap (average elixir < 3.0)",
                "Too many cheap cards (max 4 cards costing 2 or less recommended)",
            ]
        );
    }

    #[test]
    fn test_custom_rules() {
        let rules = ValidationRules {
            max_buildings: 0,
            ..ValidationRules::default()
        };
        let warnings = rules.validate(&balanced_deck());
        assert_eq!(warnings, vec!["Too many buildings (max 0 recommended)"]);
    }
}
