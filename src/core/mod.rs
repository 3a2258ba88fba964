//! Core building blocks: RNG and deck configuration.
//!
//! Nothing here knows about HTTP or the card catalog format.

pub mod config;
pub mod rng;

pub use config::{DeckConfig, DECK_SIZE};
pub use rng::DeckRng;
