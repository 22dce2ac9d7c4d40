use std::collections::HashSet;

use crate::model::{SubscaleConfig, SurveyDefinition, AGE_MAX, AGE_MIN};
use crate::rules::{NormalizationRule, RuleTable};

/// Validate authored survey definitions before they are used for scoring.
/// Returns all validation errors at once (not just the first).
pub fn validate_definitions(
    definition: &SurveyDefinition,
    subscale: &SubscaleConfig,
    rules: &RuleTable,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let mut seen_ids = HashSet::new();
    for (i, question) in definition.questions.iter().enumerate() {
        if question.id.trim().is_empty() {
            errors.push(format!("questions[{}].id: must not be empty", i));
        }
        if question.text.trim().is_empty() {
            errors.push(format!("questions[{}].text: must not be empty", i));
        }
        if question.options.is_empty() {
            errors.push(format!(
                "questions[{}].options: at least one option is required",
                i
            ));
        }
        if !seen_ids.insert(question.id.as_str()) {
            errors.push(format!("questions[{}]: duplicate id '{}'", i, question.id));
        }
        let mut seen_labels = HashSet::new();
        for (j, option) in question.options.iter().enumerate() {
            if !seen_labels.insert(option.label.as_str()) {
                errors.push(format!(
                    "questions[{}].options[{}]: duplicate label '{}'",
                    i, j, option.label
                ));
            }
        }
    }

    if subscale.name.trim().is_empty() {
        errors.push("subscale.name: must not be empty".to_string());
    }
    if subscale.question_ids.is_empty() {
        errors.push("subscale.question_ids: at least one question is required".to_string());
    }
    for (i, question_id) in subscale.question_ids.iter().enumerate() {
        if definition.question(question_id).is_none() {
            errors.push(format!(
                "subscale.question_ids[{}]: unknown question '{}'",
                i, question_id
            ));
        }
    }

    for (i, rule) in rules.iter().enumerate() {
        match rule {
            NormalizationRule::Range(range) => {
                if range.age_min > range.age_max {
                    errors.push(format!(
                        "rules[{}]: age_min {} exceeds age_max {}",
                        i, range.age_min, range.age_max
                    ));
                }
                if range.raw_score_min > range.raw_score_max {
                    errors.push(format!(
                        "rules[{}]: raw_score_min {} exceeds raw_score_max {}",
                        i, range.raw_score_min, range.raw_score_max
                    ));
                }
                if range.age_min < AGE_MIN {
                    errors.push(format!(
                        "rules[{}].age_min: must be between {} and {}",
                        i, AGE_MIN, AGE_MAX
                    ));
                }
                if range.age_max > AGE_MAX {
                    errors.push(format!(
                        "rules[{}].age_max: must be between {} and {}",
                        i, AGE_MIN, AGE_MAX
                    ));
                }
            }
            NormalizationRule::Exact(exact) => {
                if !(AGE_MIN..=AGE_MAX).contains(&exact.age) {
                    errors.push(format!(
                        "rules[{}].age: must be between {} and {}",
                        i, AGE_MIN, AGE_MAX
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
