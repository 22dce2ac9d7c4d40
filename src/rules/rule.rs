use serde::{Deserialize, Serialize};

use crate::model::Sex;

/// A rule keyed on an age band and a raw score band.
///
/// All bounds are inclusive on both ends: a rule with `age_min: 13,
/// age_max: 17` matches ages 13 and 17.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RangeRule {
    pub age_min: u32,
    pub age_max: u32,
    pub sex: Sex,
    pub raw_score_min: f64,
    pub raw_score_max: f64,
    pub normalized_score: f64,
}

impl RangeRule {
    pub fn matches(&self, age: u32, sex: Sex, raw_score: f64) -> bool {
        age >= self.age_min
            && age <= self.age_max
            && sex == self.sex
            && raw_score >= self.raw_score_min
            && raw_score <= self.raw_score_max
    }
}

/// A rule keyed on one exact age and raw score.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExactRule {
    pub age: u32,
    pub sex: Sex,
    pub raw_score: f64,
    pub normalized_score: f64,
}

impl ExactRule {
    pub fn matches(&self, age: u32, sex: Sex, raw_score: f64, policy: MatchPolicy) -> bool {
        age == self.age && sex == self.sex && policy.scores_equal(raw_score, self.raw_score)
    }
}

/// A normalization rule in either of the two supported shapes.
///
/// Untagged: the shape is inferred from the fields present. Example JSON,
/// one rule of each shape:
///
/// ```json
/// [
///   { "age_min": 13, "age_max": 17, "sex": "F",
///     "raw_score_min": 2, "raw_score_max": 4, "normalized_score": 60 },
///   { "age": 25, "sex": "M", "raw_score": 4, "normalized_score": 50 }
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NormalizationRule {
    Range(RangeRule),
    Exact(ExactRule),
}

impl NormalizationRule {
    pub fn normalized_score(&self) -> f64 {
        match self {
            NormalizationRule::Range(rule) => rule.normalized_score,
            NormalizationRule::Exact(rule) => rule.normalized_score,
        }
    }

    pub fn matches(&self, age: u32, sex: Sex, raw_score: f64, policy: MatchPolicy) -> bool {
        match self {
            NormalizationRule::Range(rule) => rule.matches(age, sex, raw_score),
            NormalizationRule::Exact(rule) => rule.matches(age, sex, raw_score, policy),
        }
    }
}

/// How exact-shape rules compare raw scores.
///
/// `Strict` is bit-exact `==`. Average raw scores are rounded to 2 decimals
/// before lookup, so strict comparison holds whenever the rule's raw score
/// was written with at most 2 decimals. `Tolerance` treats scores within
/// the given epsilon as equal, for tables produced by tooling that rounds
/// differently. Range-shape bounds are not affected by the policy.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum MatchPolicy {
    #[default]
    Strict,
    Tolerance(f64),
}

impl MatchPolicy {
    fn scores_equal(self, a: f64, b: f64) -> bool {
        match self {
            MatchPolicy::Strict => a == b,
            MatchPolicy::Tolerance(epsilon) => (a - b).abs() <= epsilon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_rule() -> RangeRule {
        RangeRule {
            age_min: 13,
            age_max: 17,
            sex: Sex::Female,
            raw_score_min: 2.0,
            raw_score_max: 4.0,
            normalized_score: 60.0,
        }
    }

    #[test]
    fn test_range_matches_inside() {
        assert!(range_rule().matches(15, Sex::Female, 3.0));
    }

    #[test]
    fn test_range_age_bounds_inclusive() {
        let rule = range_rule();
        assert!(rule.matches(13, Sex::Female, 3.0));
        assert!(rule.matches(17, Sex::Female, 3.0));
        assert!(!rule.matches(12, Sex::Female, 3.0));
        assert!(!rule.matches(18, Sex::Female, 3.0));
    }

    #[test]
    fn test_range_raw_score_bounds_inclusive() {
        let rule = range_rule();
        assert!(rule.matches(15, Sex::Female, 2.0));
        assert!(rule.matches(15, Sex::Female, 4.0));
        assert!(!rule.matches(15, Sex::Female, 1.99));
        assert!(!rule.matches(15, Sex::Female, 4.01));
    }

    #[test]
    fn test_range_sex_must_match() {
        assert!(!range_rule().matches(15, Sex::Male, 3.0));
    }

    #[test]
    fn test_exact_strict_equality() {
        let rule = ExactRule {
            age: 25,
            sex: Sex::Male,
            raw_score: 1.5,
            normalized_score: 50.0,
        };
        assert!(rule.matches(25, Sex::Male, 1.5, MatchPolicy::Strict));
        assert!(!rule.matches(25, Sex::Male, 1.51, MatchPolicy::Strict));
        assert!(!rule.matches(26, Sex::Male, 1.5, MatchPolicy::Strict));
    }

    #[test]
    fn test_exact_tolerance_accepts_nearby_scores() {
        let rule = ExactRule {
            age: 25,
            sex: Sex::Male,
            raw_score: 1.66,
            normalized_score: 50.0,
        };
        assert!(!rule.matches(25, Sex::Male, 1.67, MatchPolicy::Strict));
        assert!(rule.matches(25, Sex::Male, 1.67, MatchPolicy::Tolerance(0.02)));
        assert!(!rule.matches(25, Sex::Male, 1.7, MatchPolicy::Tolerance(0.02)));
    }

    #[test]
    fn test_untagged_parse_range_shape() {
        let json = r#"{
            "age_min": 18, "age_max": 99, "sex": "M",
            "raw_score_min": 2, "raw_score_max": 4, "normalized_score": 40
        }"#;
        let rule: NormalizationRule = serde_json::from_str(json).unwrap();
        assert!(matches!(rule, NormalizationRule::Range(_)));
        assert_eq!(rule.normalized_score(), 40.0);
    }

    #[test]
    fn test_untagged_parse_exact_shape() {
        let json = r#"{ "age": 25, "sex": "M", "raw_score": 4, "normalized_score": 50 }"#;
        let rule: NormalizationRule = serde_json::from_str(json).unwrap();
        assert!(matches!(rule, NormalizationRule::Exact(_)));
        assert_eq!(rule.normalized_score(), 50.0);
    }

    #[test]
    fn test_untagged_rejects_mixed_shape() {
        let json = r#"{ "age": 25, "age_min": 13, "sex": "M", "raw_score": 4, "normalized_score": 50 }"#;
        assert!(serde_json::from_str::<NormalizationRule>(json).is_err());
    }
}
