//! Card system: card values and the catalog store.
//!
//! ## Key Types
//!
//! - `Card`: Immutable catalog entry, identified by name
//! - `CardRef`: Name-only reference used in request bodies
//! - `Catalog`: Read-only card store loaded once at startup

pub mod card;
pub mod catalog;

pub use card::{
    Card, CardRef, BUILDING_TYPE, CYCLE_MAX_COST, MAX_ELIXIR_COST, MIN_ELIXIR_COST,
    SPELL_ROLE_MARKER, WIN_CONDITION_ROLE,
};
pub use catalog::Catalog;
