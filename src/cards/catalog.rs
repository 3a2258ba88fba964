//! Card catalog store.
//!
//! The `Catalog` holds every known card, loaded once at startup from a JSON
//! array. It keeps load order for iteration and a name index for request
//! resolution. There is no mutation API: share it behind an `Arc`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rustc_hash::FxHashMap;

use super::card::{Card, MAX_ELIXIR_COST, MIN_ELIXIR_COST};
use crate::error::{DeckError, Result};

/// Read-only collection of catalog cards.
///
/// ## Example
///
/// ```
/// use deck_forge::cards::Catalog;
///
/// let catalog = Catalog::from_json(r#"[
///     {"name": "Hog Rider", "type": "Troop", "elixirCost": 4,
///      "role": "WinCondition", "rarity": "Rare", "imageUrl": null}
/// ]"#).unwrap();
///
/// assert_eq!(catalog.len(), 1);
/// assert_eq!(catalog.get("Hog Rider").unwrap().elixir_cost, 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    cards: Vec<Card>,
    by_name: FxHashMap<String, usize>,
}

impl Catalog {
    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            DeckError::Config(format!("cannot open card catalog {}: {}", path.display(), e))
        })?;

        let catalog = Self::from_reader(BufReader::new(file)).map_err(|e| match e {
            DeckError::Config(msg) => DeckError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;

        log::info!(
            "Loaded {} cards from {} ({} win conditions, {} spells)",
            catalog.len(),
            path.display(),
            catalog.cards.iter().filter(|c| c.is_win_condition()).count(),
            catalog.cards.iter().filter(|c| c.is_spell()).count(),
        );
        Ok(catalog)
    }

    /// Parse a catalog from any JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let cards: Vec<Card> = serde_json::from_reader(reader)
            .map_err(|e| DeckError::Config(format!("malformed card catalog: {e}")))?;
        Self::from_cards(cards)
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_reader(json.as_bytes())
    }

    /// Build a catalog from already-parsed cards.
    ///
    /// Rejects an empty list, blank or duplicate names, and costs outside
    /// 1 to 10.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self> {
        if cards.is_empty() {
            return Err(DeckError::Config("card catalog is empty".into()));
        }

        let mut by_name = FxHashMap::default();
        for (index, card) in cards.iter().enumerate() {
            if card.name.trim().is_empty() {
                return Err(DeckError::Config(format!("card #{index} has an empty name")));
            }
            if !(MIN_ELIXIR_COST..=MAX_ELIXIR_COST).contains(&card.elixir_cost) {
                return Err(DeckError::Config(format!(
                    "card {} has elixir cost {} (expected {}-{})",
                    card.name, card.elixir_cost, MIN_ELIXIR_COST, MAX_ELIXIR_COST
                )));
            }
            if by_name.insert(card.name.clone(), index).is_some() {
                return Err(DeckError::Config(format!("duplicate card name {}", card.name)));
            }
        }

        Ok(Self { cards, by_name })
    }

    /// All cards in load order.
    #[must_use]
    pub fn all(&self) -> &[Card] {
        &self.cards
    }

    /// Look a card up by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Card> {
        self.by_name.get(name).map(|&index| &self.cards[index])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_cards() -> Vec<Card> {
        vec![
            Card::new("Hog Rider", "Troop", 4, "WinCondition", "Rare"),
            Card::new("Zap", "Spell", 2, "SmallSpell", "Common"),
            Card::new("Cannon", "Building", 3, "Defense", "Common"),
        ]
    }

    #[test]
    fn test_from_cards_and_lookup() {
        let catalog = Catalog::from_cards(sample_cards()).unwrap();

        assert_eq!(catalog.len(), 3);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.get("Zap").unwrap().role, "SmallSpell");
        assert!(catalog.get("zap").is_none());
        assert!(catalog.contains("Cannon"));
    }

    #[test]
    fn test_all_keeps_load_order() {
        let catalog = Catalog::from_cards(sample_cards()).unwrap();
        let names: Vec<_> = catalog.all().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Hog Rider", "Zap", "Cannon"]);

        // Same collection every call
        assert!(std::ptr::eq(catalog.all(), catalog.all()));
    }

    #[test]
    fn test_rejects_duplicates() {
        let mut cards = sample_cards();
        cards.push(Card::new("Zap", "Spell", 2, "SmallSpell", "Common"));

        let err = Catalog::from_cards(cards).unwrap_err();
        assert!(matches!(err, DeckError::Config(ref msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_rejects_out_of_range_cost() {
        for cost in [0u8, 11] {
            let cards = vec![Card::new("Broken", "Troop", cost, "Support", "Common")];
            assert!(matches!(Catalog::from_cards(cards), Err(DeckError::Config(_))));
        }
    }

    #[test]
    fn test_rejects_empty_and_blank() {
        assert!(matches!(Catalog::from_cards(vec![]), Err(DeckError::Config(_))));

        let cards = vec![Card::new("  ", "Troop", 3, "Support", "Common")];
        assert!(matches!(Catalog::from_cards(cards), Err(DeckError::Config(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Catalog::from_json("not json"), Err(DeckError::Config(_))));
        assert!(matches!(
            Catalog::from_json(r#"[{"name": "Zap"}]"#),
            Err(DeckError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&sample_cards()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load("/definitely/not/here/cards.json").unwrap_err();
        assert!(matches!(err, DeckError::Config(ref msg) if msg.contains("cannot open")));
    }
}
