use serde::Serialize;
use tracing::debug;

use super::engine::Precondition;
use crate::error::ScoreError;
use crate::model::{AggregationMethod, AnswerSet, SubscaleConfig, SurveyDefinition};

/// One resolved answer and the score it contributed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerContribution {
    pub question_id: String,
    pub question_text: String,
    pub selected: String,
    pub score: f64,
}

/// A raw score together with the per-question contributions behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawScore {
    pub value: f64,
    pub contributions: Vec<AnswerContribution>,
}

/// Aggregate the recorded answers for a subscale into a raw score.
///
/// Every question in the subscale must have an answer; if any are missing
/// the whole set is reported at once and no partial score is produced.
/// `sum` adds the selected option scores exactly. `average` divides the sum
/// by the question count and rounds to 2 decimal places, so the result can
/// be compared against exact-shape normalization rules.
pub fn calculate_raw_score(
    definition: &SurveyDefinition,
    subscale: &SubscaleConfig,
    answers: &AnswerSet,
) -> Result<RawScore, ScoreError> {
    if subscale.question_ids.is_empty() {
        return Err(ScoreError::PreconditionUnmet {
            unmet: vec![Precondition::Subscale],
        });
    }

    let mut missing = Vec::new();
    let mut contributions = Vec::with_capacity(subscale.question_ids.len());

    for question_id in &subscale.question_ids {
        let answer = match answers.get(question_id) {
            Some(answer) => answer,
            None => {
                missing.push(question_id.clone());
                continue;
            }
        };
        let question = match definition.question(question_id) {
            Some(question) => question,
            None => {
                return Err(ScoreError::InvalidReference {
                    question_id: question_id.clone(),
                    option: None,
                })
            }
        };
        let option = match question.option(&answer.selected) {
            Some(option) => option,
            None => {
                return Err(ScoreError::InvalidReference {
                    question_id: question_id.clone(),
                    option: Some(answer.selected.clone()),
                })
            }
        };
        contributions.push(AnswerContribution {
            question_id: question_id.clone(),
            question_text: question.text.clone(),
            selected: option.label.clone(),
            score: option.score,
        });
    }

    if !missing.is_empty() {
        return Err(ScoreError::MissingAnswer {
            question_ids: missing,
        });
    }

    let sum: f64 = contributions.iter().map(|c| c.score).sum();
    let value = match subscale.method {
        AggregationMethod::Sum => sum,
        AggregationMethod::Average => round2(sum / contributions.len() as f64),
    };

    debug!(
        subscale = %subscale.name,
        method = ?subscale.method,
        questions = contributions.len(),
        raw_score = value,
        "Aggregated raw score"
    );

    Ok(RawScore {
        value,
        contributions,
    })
}

/// Round to 2 decimal places, half away from zero at the 2nd decimal.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
