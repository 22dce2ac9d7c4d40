use thiserror::Error;

use crate::scoring::Precondition;

/// Conditions that stop a score from being computed.
///
/// These are reported as values, never panics. A rule table lookup that
/// finds no match is not in this list: that is a normal outcome carried on
/// the calculation result itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// One or more subscale questions have no recorded answer.
    #[error("Please answer all questions in the subscale. Missing: {} question(s)", .question_ids.len())]
    MissingAnswer { question_ids: Vec<String> },

    /// An answer or configuration points at a question or option that does
    /// not exist in the survey definition.
    #[error("Invalid reference: {}", reference_target(.question_id, .option.as_deref()))]
    InvalidReference {
        question_id: String,
        option: Option<String>,
    },

    /// Computation was not attempted because required sections are absent.
    #[error("Missing required data for calculation: {}", unmet_sections(.unmet))]
    PreconditionUnmet { unmet: Vec<Precondition> },
}

fn reference_target(question_id: &str, option: Option<&str>) -> String {
    match option {
        Some(option) => format!("question '{}' has no option '{}'", question_id, option),
        None => format!("no question '{}' in the survey definition", question_id),
    }
}

fn unmet_sections(unmet: &[Precondition]) -> String {
    unmet
        .iter()
        .map(|p| p.section())
        .collect::<Vec<_>>()
        .join(", ")
}
