//! The bundled subscale payload: a subscale document carrying its own
//! questions and range-shape normalization rules, with camelCase fields and
//! free-text option labels. Responses in this family record the selected
//! option's raw score keyed by question id. Converts into catalog presets
//! at the boundary.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::SubscalePreset;
use crate::model::{AggregationMethod, AnswerOption, AnswerSet, Question, Sex};
use crate::rules::{NormalizationRule, RangeRule, RuleTable};

/// An option as the bundled shape spells it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BundledOption {
    pub text: String,
    pub raw_score: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BundledQuestion {
    pub id: String,
    pub text: String,
    pub options: Vec<BundledOption>,
}

impl BundledQuestion {
    pub fn to_question(&self) -> Question {
        Question {
            id: self.id.clone(),
            text: self.text.clone(),
            options: self
                .options
                .iter()
                .map(|o| AnswerOption {
                    label: o.text.clone(),
                    score: o.raw_score,
                })
                .collect(),
        }
    }
}

/// A range-shape rule with the bundled field spelling.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BundledRule {
    pub age_min: u32,
    pub age_max: u32,
    pub sex: String,
    pub raw_score_min: f64,
    pub raw_score_max: f64,
    pub normalized_score: f64,
}

impl BundledRule {
    pub fn to_rule(&self) -> Result<NormalizationRule> {
        Ok(NormalizationRule::Range(RangeRule {
            age_min: self.age_min,
            age_max: self.age_max,
            sex: Sex::parse(&self.sex)?,
            raw_score_min: self.raw_score_min,
            raw_score_max: self.raw_score_max,
            normalized_score: self.normalized_score,
        }))
    }
}

/// A subscale document bundling its questions and rule table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BundledSubscale {
    pub id: String,
    pub name: String,
    pub description: String,
    pub questions: Vec<BundledQuestion>,
    pub normalization_rules: Vec<BundledRule>,
}

impl BundledSubscale {
    /// Convert into a catalog preset. Bundled subscales always sum their
    /// responses.
    pub fn into_preset(self) -> Result<SubscalePreset> {
        let rules: RuleTable = self
            .normalization_rules
            .iter()
            .enumerate()
            .map(|(i, rule)| {
                rule.to_rule()
                    .with_context(|| format!("normalizationRules[{}]", i))
            })
            .collect::<Result<_>>()?;
        Ok(SubscalePreset {
            id: self.id,
            name: self.name,
            description: self.description,
            questions: self.questions.iter().map(|q| q.to_question()).collect(),
            method: AggregationMethod::Sum,
            rules,
        })
    }
}

/// Resolve score-keyed responses back to option selections.
///
/// The bundled shape records the selected option's raw score rather than
/// its label. Scores are compared exactly; when two options on a question
/// share a score, the first one wins.
pub fn resolve_responses(
    questions: &[Question],
    responses: &HashMap<String, f64>,
) -> Result<AnswerSet> {
    let mut answers = AnswerSet::new();
    for (question_id, score) in responses {
        let question = questions
            .iter()
            .find(|q| q.id == *question_id)
            .with_context(|| format!("response references unknown question '{}'", question_id))?;
        let option = question
            .options
            .iter()
            .find(|o| o.score == *score)
            .with_context(|| {
                format!("question '{}' has no option scoring {}", question_id, score)
            })?;
        answers.record(question.id.clone(), option.label.clone());
    }
    Ok(answers)
}
