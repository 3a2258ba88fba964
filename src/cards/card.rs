//! Card values.
//!
//! A `Card` holds the immutable properties of one catalog entry. Identity is
//! the card name: two cards with the same name are the same card, whatever
//! the other fields say.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Role tag marking cards that win matches.
pub const WIN_CONDITION_ROLE: &str = "WinCondition";

/// Any role containing this marker counts as a spell.
pub const SPELL_ROLE_MARKER: &str = "Spell";

/// Card type counted by the building check.
pub const BUILDING_TYPE: &str = "Building";

/// Cards costing this much or less are cycle cards.
pub const CYCLE_MAX_COST: u8 = 2;

/// Valid elixir cost range.
pub const MIN_ELIXIR_COST: u8 = 1;
pub const MAX_ELIXIR_COST: u8 = 10;

/// A catalog card.
///
/// Field names follow the catalog JSON (`elixirCost`, `imageUrl`, `type`).
///
/// ## Example
///
/// ```
/// use deck_forge::cards::Card;
///
/// let hog = Card::new("Hog Rider", "Troop", 4, "WinCondition", "Rare");
/// assert!(hog.is_win_condition());
/// assert!(!hog.is_spell());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique card name.
    pub name: String,

    /// Troop, Spell, Building...
    #[serde(rename = "type")]
    pub card_type: String,

    /// Elixir cost, 1 to 10.
    pub elixir_cost: u8,

    /// Free-form role tag.
    pub role: String,

    pub rarity: String,

    /// Opaque image reference for the frontend.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Card {
    /// Create a card without an image reference.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        card_type: impl Into<String>,
        elixir_cost: u8,
        role: impl Into<String>,
        rarity: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            card_type: card_type.into(),
            elixir_cost,
            role: role.into(),
            rarity: rarity.into(),
            image_url: None,
        }
    }

    /// Attach an image reference (builder pattern).
    #[must_use]
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    #[must_use]
    pub fn is_win_condition(&self) -> bool {
        self.role == WIN_CONDITION_ROLE
    }

    #[must_use]
    pub fn is_spell(&self) -> bool {
        self.role.contains(SPELL_ROLE_MARKER)
    }

    #[must_use]
    pub fn is_building(&self) -> bool {
        self.card_type == BUILDING_TYPE
    }

    #[must_use]
    pub fn is_cycle(&self) -> bool {
        self.elixir_cost <= CYCLE_MAX_COST
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} elixir)", self.name, self.elixir_cost)
    }
}

/// A card reference in a request body, resolved by name against the catalog.
///
/// Clients usually echo whole card records back; everything but the name is
/// ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRef {
    pub name: String,
}

impl CardRef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&Card> for CardRef {
    fn from(card: &Card) -> Self {
        Self::new(card.name.clone())
    }
}
