use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::model::{
    AggregationMethod, AnswerOption, Question, Sex, SubscaleConfig, SurveyDefinition,
};
use crate::rules::{NormalizationRule, RangeRule, RuleTable};
use crate::scoring::SurveySession;

/// A reusable subscale definition: questions, aggregation method and
/// normalization table bundled under one id.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SubscalePreset {
    pub id: String,
    pub name: String,
    pub description: String,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub method: AggregationMethod,
    pub rules: RuleTable,
}

impl SubscalePreset {
    /// Split into the pieces a scoring session takes. The subscale covers
    /// every bundled question, in order.
    pub fn into_parts(self) -> (SurveyDefinition, SubscaleConfig, RuleTable) {
        let question_ids = self.questions.iter().map(|q| q.id.clone()).collect();
        let subscale = SubscaleConfig::new(self.name, question_ids, self.method);
        (SurveyDefinition::new(self.questions), subscale, self.rules)
    }

    /// Start a fresh session from this preset, with no profile or answers
    /// recorded yet.
    pub fn session(&self) -> SurveySession {
        let (definition, subscale, rules) = self.clone().into_parts();
        SurveySession::new(definition, subscale, rules)
    }
}

/// In-memory store of subscale presets.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SubscaleCatalog {
    presets: Vec<SubscalePreset>,
}

impl SubscaleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with the built-in presets.
    pub fn with_builtins() -> Self {
        Self {
            presets: vec![anxiety_assessment()],
        }
    }

    /// Add a preset. Ids must be unique within the catalog.
    pub fn add(&mut self, preset: SubscalePreset) -> Result<()> {
        if self.get(&preset.id).is_some() {
            bail!("A subscale with id '{}' already exists", preset.id);
        }
        self.presets.push(preset);
        Ok(())
    }

    /// Replace the preset sharing the given preset's id.
    /// Returns false when no preset with that id exists.
    pub fn update(&mut self, preset: SubscalePreset) -> bool {
        match self.presets.iter_mut().find(|p| p.id == preset.id) {
            Some(existing) => {
                *existing = preset;
                true
            }
            None => false,
        }
    }

    /// Remove a preset by id. Returns true if it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.presets.len();
        self.presets.retain(|p| p.id != id);
        self.presets.len() < before
    }

    pub fn get(&self, id: &str) -> Option<&SubscalePreset> {
        self.presets.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubscalePreset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// The built-in anxiety screening preset: two frequency questions and a
/// rule table banded by age group and sex.
pub fn anxiety_assessment() -> SubscalePreset {
    fn frequency_options() -> Vec<AnswerOption> {
        ["Never", "Rarely", "Sometimes", "Often"]
            .iter()
            .enumerate()
            .map(|(i, label)| AnswerOption {
                label: (*label).to_string(),
                score: (i + 1) as f64,
            })
            .collect()
    }

    fn band(
        age_min: u32,
        age_max: u32,
        sex: Sex,
        raw_min: f64,
        raw_max: f64,
        normalized: f64,
    ) -> NormalizationRule {
        NormalizationRule::Range(RangeRule {
            age_min,
            age_max,
            sex,
            raw_score_min: raw_min,
            raw_score_max: raw_max,
            normalized_score: normalized,
        })
    }

    SubscalePreset {
        id: "anxiety".to_string(),
        name: "Anxiety Assessment".to_string(),
        description: "Measures anxiety levels across different situations".to_string(),
        questions: vec![
            Question {
                id: "q1".to_string(),
                text: "How often do you feel nervous in social situations?".to_string(),
                options: frequency_options(),
            },
            Question {
                id: "q2".to_string(),
                text: "How often do you experience physical symptoms of anxiety?".to_string(),
                options: frequency_options(),
            },
        ],
        method: AggregationMethod::Sum,
        rules: RuleTable::new(vec![
            band(13, 17, Sex::Female, 2.0, 4.0, 60.0),
            band(13, 17, Sex::Female, 5.0, 6.0, 75.0),
            band(13, 17, Sex::Female, 7.0, 8.0, 90.0),
            band(13, 17, Sex::Male, 2.0, 4.0, 50.0),
            band(13, 17, Sex::Male, 5.0, 6.0, 65.0),
            band(13, 17, Sex::Male, 7.0, 8.0, 80.0),
            band(18, 99, Sex::Female, 2.0, 4.0, 45.0),
            band(18, 99, Sex::Female, 5.0, 6.0, 60.0),
            band(18, 99, Sex::Female, 7.0, 8.0, 75.0),
            band(18, 99, Sex::Male, 2.0, 4.0, 40.0),
            band(18, 99, Sex::Male, 5.0, 6.0, 55.0),
            band(18, 99, Sex::Male, 7.0, 8.0, 70.0),
        ]),
    }
}
