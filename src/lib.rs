//! normscore
//!
//! Survey normalization scoring. Aggregates a subscale's answered questions
//! into a raw score, then maps it to a population-normed value using
//! demographic lookup rules keyed by age, sex and raw score range.
//!
//! [`SurveySession`] is the main entry point: feed it a survey definition,
//! subscale configuration, user profile, answers and a rule table, then call
//! [`SurveySession::calculate`]. Built-in presets live in [`catalog`], and
//! [`compat`] parses the two external document layouts.

pub mod catalog;
pub mod compat;
pub mod error;
pub mod interpret;
pub mod model;
pub mod rules;
pub mod scoring;

pub use catalog::{anxiety_assessment, SubscaleCatalog, SubscalePreset};
pub use error::ScoreError;
pub use interpret::ScoreBand;
pub use model::{
    AggregationMethod, AnswerOption, AnswerSet, Question, Sex, SubscaleConfig, SurveyDefinition,
    UserAnswer, UserProfile, AGE_MAX, AGE_MIN,
};
pub use rules::{ExactRule, MatchPolicy, NormalizationRule, RangeRule, RuleTable};
pub use scoring::{
    calculate_raw_score, validate_definitions, AnswerContribution, CalculationResult,
    Precondition, RawScore, SessionStatus, SurveySession,
};
