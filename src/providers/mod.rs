//! External collaborators: meta-game data and language-model analysis.
//!
//! Each capability is a trait with one HTTP-backed implementation and one
//! static double. Implementations absorb their own failures and return
//! fallback text, so callers never handle network errors.

pub mod analysis;
pub mod meta;

pub use analysis::{
    build_user_prompt, AnalysisProvider, AnalysisProviderConfig, CannedAnalysisProvider,
    OpenAiAnalysisProvider, ANALYSIS_APOLOGY, SYSTEM_PROMPT,
};
pub use meta::{
    ClashRoyaleMetaProvider, MetaDataProvider, MetaProviderConfig, StaticMetaProvider,
    FALLBACK_META_SUMMARY,
};
