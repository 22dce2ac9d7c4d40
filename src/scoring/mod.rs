pub mod aggregate;
pub mod engine;
pub mod validation;

pub use aggregate::{calculate_raw_score, AnswerContribution, RawScore};
pub use engine::{CalculationResult, Precondition, SessionStatus, SurveySession};
pub use validation::validate_definitions;
