//! # deck-forge
//!
//! Deck-building service for a collectible card game.
//!
//! ## What it does
//!
//! 1. **Random decks**: Rejection-sampled 8-card decks with one or two win
//!    conditions, one or two spells and a filled-out support cast.
//!
//! 2. **Custom decks**: Complete a partial selection while steering the
//!    elixir curve, then flag anything that looks off.
//!
//! 3. **Analysis**: Hand the deck, a question and current meta context to a
//!    language model and return its feedback.
//!
//! ## Architecture
//!
//! - **Read-only catalog**: Loaded once, shared behind `Arc`, never mutated.
//!
//! - **Injected randomness**: All sampling goes through `DeckRng`, so a
//!   fixed seed reproduces a deck exactly.
//!
//! - **Fallible core, infallible collaborators**: Generation and request
//!   errors reach the caller; network failures in the meta and analysis
//!   providers become fallback text.
//!
//! ## Modules
//!
//! - `core`: RNG and deck configuration
//! - `cards`: Card values and the catalog store
//! - `deck`: Generator, completer and validator
//! - `providers`: Meta-data and analysis collaborators
//! - `service`: Request boundary
//! - `server`: HTTP routes

pub mod cards;
pub mod core;
pub mod deck;
pub mod error;
pub mod logging;
pub mod providers;
pub mod server;
pub mod service;

// Re-export commonly used types
pub use crate::core::{DeckConfig, DeckRng, DECK_SIZE};

pub use crate::cards::{Card, CardRef, Catalog};

pub use crate::deck::{
    average_elixir, is_elixir_suitable, validate, CompletedDeck, Deck, DeckCompleter,
    DeckGenerator, ValidationRules,
};

pub use crate::error::{DeckError, Result};

pub use crate::providers::{
    AnalysisProvider, AnalysisProviderConfig, CannedAnalysisProvider, ClashRoyaleMetaProvider,
    MetaDataProvider, MetaProviderConfig, OpenAiAnalysisProvider, StaticMetaProvider,
};

pub use crate::service::{AnalysisRequest, AnalysisResponse, AnalysisStatus, DeckService};

pub use crate::server::{router, serve, ServerConfig};
