//! Alternate external representations of survey data.
//!
//! The crate keeps one canonical schema (see [`crate::model`]); the older
//! payload shapes live here and convert at the boundary, so no duplicate
//! type definitions propagate inward.

pub mod bundled;
pub mod lettered;

pub use bundled::{resolve_responses, BundledOption, BundledQuestion, BundledRule, BundledSubscale};
pub use lettered::{
    LetterScores, LetteredAnswer, LetteredEntry, LetteredProfile, LetteredQuestion,
    LetteredSubscale, LetteredSurvey,
};
