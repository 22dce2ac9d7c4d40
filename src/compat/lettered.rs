//! The flat wizard payload: questions scored per fixed letter option,
//! spelled-out sex values, and exact-shape normalization entries. All field
//! names are camelCase. Converts into the canonical model at the boundary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{
    AggregationMethod, AnswerOption, AnswerSet, Question, Sex, SubscaleConfig, SurveyDefinition,
    UserProfile,
};
use crate::rules::{ExactRule, NormalizationRule, RuleTable};
use crate::scoring::SurveySession;

/// A question whose options are the fixed letters A through D.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LetteredQuestion {
    pub id: String,
    pub text: String,
    pub scores: LetterScores,
}

/// Per-letter scores for the four fixed options.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LetterScores {
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "C")]
    pub c: f64,
    #[serde(rename = "D")]
    pub d: f64,
}

impl LetteredQuestion {
    pub fn to_question(&self) -> Question {
        let scores = [
            ("A", self.scores.a),
            ("B", self.scores.b),
            ("C", self.scores.c),
            ("D", self.scores.d),
        ];
        Question {
            id: self.id.clone(),
            text: self.text.clone(),
            options: scores
                .iter()
                .map(|(label, score)| AnswerOption {
                    label: (*label).to_string(),
                    score: *score,
                })
                .collect(),
        }
    }
}

/// Profile as the wizard records it: both fields absent until filled in.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LetteredProfile {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub sex: Option<String>,
}

impl LetteredProfile {
    pub fn to_profile(&self) -> Result<UserProfile> {
        let age = self
            .age
            .context("user profile is incomplete: age is required")?;
        let sex = self
            .sex
            .as_deref()
            .context("user profile is incomplete: sex is required")?;
        UserProfile::new(age, Sex::parse(sex)?)
    }
}

/// One recorded selection.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LetteredAnswer {
    pub question_id: String,
    pub selected_option: String,
}

/// Subscale selection with the wizard's field spelling.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LetteredSubscale {
    pub name: String,
    pub question_ids: Vec<String>,
    pub calculation_method: AggregationMethod,
}

impl LetteredSubscale {
    pub fn to_subscale(&self) -> SubscaleConfig {
        SubscaleConfig::new(
            self.name.clone(),
            self.question_ids.clone(),
            self.calculation_method,
        )
    }
}

/// An exact-shape normalization entry with spelled-out sex.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LetteredEntry {
    pub age: u32,
    pub sex: String,
    pub raw_score: f64,
    pub normalized_score: f64,
}

impl LetteredEntry {
    pub fn to_rule(&self) -> Result<NormalizationRule> {
        Ok(NormalizationRule::Exact(ExactRule {
            age: self.age,
            sex: Sex::parse(&self.sex)?,
            raw_score: self.raw_score,
            normalized_score: self.normalized_score,
        }))
    }
}

/// The complete wizard payload, one document per respondent.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LetteredSurvey {
    pub questions: Vec<LetteredQuestion>,
    pub user_profile: LetteredProfile,
    #[serde(default)]
    pub user_answers: Vec<LetteredAnswer>,
    pub subscale_config: LetteredSubscale,
    #[serde(default)]
    pub normalization_table: Vec<LetteredEntry>,
}

impl LetteredSurvey {
    /// Convert into a ready-to-score session. The profile must be complete;
    /// answers and rules convert as given and the engine re-validates them.
    pub fn into_session(self) -> Result<SurveySession> {
        let definition =
            SurveyDefinition::new(self.questions.iter().map(|q| q.to_question()).collect());
        let profile = self.user_profile.to_profile()?;
        let mut answers = AnswerSet::new();
        for answer in self.user_answers {
            answers.record(answer.question_id, answer.selected_option);
        }
        let rules: RuleTable = self
            .normalization_table
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                entry
                    .to_rule()
                    .with_context(|| format!("normalizationTable[{}]", i))
            })
            .collect::<Result<_>>()?;

        let mut session = SurveySession::new(definition, self.subscale_config.to_subscale(), rules);
        session.profile = Some(profile);
        session.answers = answers;
        Ok(session)
    }
}
