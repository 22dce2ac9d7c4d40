use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::aggregate::{calculate_raw_score, round2, AnswerContribution};
use crate::error::ScoreError;
use crate::model::{AnswerSet, Sex, SubscaleConfig, SurveyDefinition, UserProfile};
use crate::rules::{MatchPolicy, RuleTable};

/// A section of input the engine requires before it can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Precondition {
    Questions,
    Profile,
    Answers,
    Subscale,
    Rules,
}

impl Precondition {
    /// The prompt shown to the user for this unmet section.
    pub fn message(&self) -> &'static str {
        match self {
            Precondition::Questions => "Please define at least one survey question",
            Precondition::Profile => "Please complete the user profile section",
            Precondition::Answers => "Please answer the survey questions",
            Precondition::Subscale => "Please configure at least one question in the subscale",
            Precondition::Rules => "Please add normalization entries",
        }
    }

    /// Short section name used when listing unmet preconditions.
    pub fn section(&self) -> &'static str {
        match self {
            Precondition::Questions => "survey questions",
            Precondition::Profile => "user profile",
            Precondition::Answers => "survey answers",
            Precondition::Subscale => "subscale configuration",
            Precondition::Rules => "normalization table",
        }
    }
}

/// Where a session stands: ready to compute, or waiting on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SessionStatus {
    Incomplete { unmet: Vec<Precondition> },
    Ready,
}

/// Outcome of a calculation.
///
/// Always produced, never a panic or an `Err`: when the normalized score
/// could not be determined, `normalized_score` is `None` and `error` holds
/// the human-readable reason. A raw score with no matching rule is a normal
/// outcome, not a failure of the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub raw_score: f64,
    pub normalized_score: Option<f64>,
    pub error: Option<String>,
    /// Per-question breakdown behind the raw score, in subscale order.
    /// Empty when aggregation did not complete.
    pub contributions: Vec<AnswerContribution>,
}

/// One respondent's scoring session.
///
/// Owns everything a calculation needs; there is no shared or ambient
/// state, so independent sessions never interact. Calculations are pure:
/// calling [`calculate`](Self::calculate) twice on the same session yields
/// an identical result.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SurveySession {
    pub definition: SurveyDefinition,
    pub subscale: SubscaleConfig,
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub answers: AnswerSet,
    pub rules: RuleTable,
}

impl SurveySession {
    /// Start a session with no profile or answers recorded yet.
    pub fn new(definition: SurveyDefinition, subscale: SubscaleConfig, rules: RuleTable) -> Self {
        Self {
            definition,
            subscale,
            profile: None,
            answers: AnswerSet::new(),
            rules,
        }
    }

    /// Report which required sections are still unmet, in the order the
    /// sections are presented to the user.
    pub fn status(&self) -> SessionStatus {
        let mut unmet = Vec::new();
        if self.definition.is_empty() {
            unmet.push(Precondition::Questions);
        }
        match self.profile {
            None => unmet.push(Precondition::Profile),
            Some(profile) if !profile.age_in_bounds() => unmet.push(Precondition::Profile),
            Some(_) => {}
        }
        if self.answers.is_empty() {
            unmet.push(Precondition::Answers);
        }
        if self.subscale.name.trim().is_empty() || self.subscale.question_ids.is_empty() {
            unmet.push(Precondition::Subscale);
        }
        if self.rules.is_empty() {
            unmet.push(Precondition::Rules);
        }
        if unmet.is_empty() {
            SessionStatus::Ready
        } else {
            SessionStatus::Incomplete { unmet }
        }
    }

    /// Aggregate the answers and look the raw score up in the rule table,
    /// with strict raw score comparison for exact-shape rules.
    pub fn calculate(&self) -> CalculationResult {
        self.calculate_with(MatchPolicy::Strict)
    }

    /// Like [`calculate`](Self::calculate) with an explicit match policy.
    pub fn calculate_with(&self, policy: MatchPolicy) -> CalculationResult {
        if let SessionStatus::Incomplete { unmet } = self.status() {
            return Self::refused(ScoreError::PreconditionUnmet { unmet });
        }
        let profile = match self.profile {
            Some(profile) => profile,
            // status() already requires a profile; kept for totality
            None => {
                return Self::refused(ScoreError::PreconditionUnmet {
                    unmet: vec![Precondition::Profile],
                })
            }
        };

        let raw = match calculate_raw_score(&self.definition, &self.subscale, &self.answers) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(%error, "Raw score aggregation failed");
                return CalculationResult {
                    raw_score: 0.0,
                    normalized_score: None,
                    error: Some(error.to_string()),
                    contributions: Vec::new(),
                };
            }
        };

        match self
            .rules
            .lookup_with(profile.age, profile.sex, raw.value, policy)
        {
            Some(rule) => {
                debug!(
                    raw_score = raw.value,
                    normalized_score = rule.normalized_score(),
                    "Calculation complete"
                );
                CalculationResult {
                    raw_score: raw.value,
                    normalized_score: Some(rule.normalized_score()),
                    error: None,
                    contributions: raw.contributions,
                }
            }
            None => {
                let message = no_match_message(profile.age, profile.sex, raw.value);
                debug!(raw_score = raw.value, "No matching normalization rule");
                CalculationResult {
                    raw_score: raw.value,
                    normalized_score: None,
                    error: Some(message),
                    contributions: raw.contributions,
                }
            }
        }
    }

    fn refused(error: ScoreError) -> CalculationResult {
        warn!(%error, "Calculation refused");
        CalculationResult {
            raw_score: 0.0,
            normalized_score: None,
            error: Some(error.to_string()),
            contributions: Vec::new(),
        }
    }
}

fn no_match_message(age: u32, sex: Sex, raw_score: f64) -> String {
    // round2 keeps the message at 2 decimals for sum-of-fractional scores;
    // f64 Display drops trailing zeros, so integral values print bare
    format!(
        "No matching normalized score found for age {}, sex {}, raw score {}",
        age,
        sex,
        round2(raw_score)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AggregationMethod, AnswerOption, Question};
    use crate::rules::{ExactRule, NormalizationRule, RangeRule};

    fn lettered_question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {}", id),
            options: ["A", "B", "C", "D"]
                .iter()
                .enumerate()
                .map(|(i, label)| AnswerOption {
                    label: label.to_string(),
                    score: (i + 1) as f64,
                })
                .collect(),
        }
    }

    fn range(
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

    fn adult_rules() -> RuleTable {
        RuleTable::new(vec![
            range(18, 99, Sex::Male, 2.0, 4.0, 40.0),
            range(18, 99, Sex::Male, 5.0, 6.0, 55.0),
            range(18, 99, Sex::Female, 2.0, 4.0, 45.0),
            range(18, 99, Sex::Female, 5.0, 6.0, 60.0),
        ])
    }

    fn ready_session() -> SurveySession {
        let definition =
            SurveyDefinition::new(vec![lettered_question("q1"), lettered_question("q2")]);
        let subscale = SubscaleConfig::new(
            "Anxiety",
            vec!["q1".to_string(), "q2".to_string()],
            AggregationMethod::Sum,
        );
        let mut session = SurveySession::new(definition, subscale, adult_rules());
        session.profile = Some(UserProfile {
            age: 25,
            sex: Sex::Male,
        });
        session.answers.record("q1".to_string(), "B".to_string());
        session.answers.record("q2".to_string(), "C".to_string());
        session
    }

    #[test]
    fn test_empty_session_reports_every_section() {
        let session = SurveySession::new(
            SurveyDefinition::default(),
            SubscaleConfig::new("", vec![], AggregationMethod::Sum),
            RuleTable::default(),
        );
        assert_eq!(
            session.status(),
            SessionStatus::Incomplete {
                unmet: vec![
                    Precondition::Questions,
                    Precondition::Profile,
                    Precondition::Answers,
                    Precondition::Subscale,
                    Precondition::Rules,
                ],
            }
        );
    }

    #[test]
    fn test_ready_session_status() {
        assert_eq!(ready_session().status(), SessionStatus::Ready);
    }

    #[test]
    fn test_out_of_bounds_age_is_an_unmet_profile() {
        let mut session = ready_session();
        session.profile = Some(UserProfile {
            age: 150,
            sex: Sex::Male,
        });
        assert_eq!(
            session.status(),
            SessionStatus::Incomplete {
                unmet: vec![Precondition::Profile],
            }
        );
    }

    #[test]
    fn test_blank_subscale_name_is_incomplete() {
        let mut session = ready_session();
        session.subscale.name = "  ".to_string();
        assert_eq!(
            session.status(),
            SessionStatus::Incomplete {
                unmet: vec![Precondition::Subscale],
            }
        );
    }

    #[test]
    fn test_calculate_refuses_when_profile_missing() {
        let mut session = ready_session();
        session.profile = None;
        let result = session.calculate();
        assert_eq!(result.raw_score, 0.0);
        assert_eq!(result.normalized_score, None);
        assert_eq!(
            result.error.as_deref(),
            Some("Missing required data for calculation: user profile")
        );
        assert!(result.contributions.is_empty());
    }

    #[test]
    fn test_calculate_sum_with_matching_rule() {
        let result = ready_session().calculate();
        assert_eq!(result.raw_score, 5.0); // B=2 + C=3
        assert_eq!(result.normalized_score, Some(55.0));
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_calculate_average_matches_exact_rule() {
        let mut session = ready_session();
        session.subscale.method = AggregationMethod::Average;
        session.rules = RuleTable::new(vec![NormalizationRule::Exact(ExactRule {
            age: 25,
            sex: Sex::Male,
            raw_score: 2.5,
            normalized_score: 47.0,
        })]);
        let result = session.calculate();
        assert_eq!(result.raw_score, 2.5); // (2 + 3) / 2
        assert_eq!(result.normalized_score, Some(47.0));
    }

    #[test]
    fn test_no_match_carries_raw_score_and_message() {
        let mut session = ready_session();
        session.profile = Some(UserProfile {
            age: 30,
            sex: Sex::Male,
        });
        session.answers.record("q2".to_string(), "A".to_string()); // raw = 2 + 1 = 3
        session.rules = RuleTable::new(vec![range(18, 99, Sex::Female, 2.0, 4.0, 45.0)]);
        let result = session.calculate();
        assert_eq!(result.raw_score, 3.0);
        assert_eq!(result.normalized_score, None);
        assert_eq!(
            result.error.as_deref(),
            Some("No matching normalized score found for age 30, sex M, raw score 3")
        );
        // Aggregation succeeded, so the breakdown is still reported
        assert_eq!(result.contributions.len(), 2);
    }

    #[test]
    fn test_no_match_message_keeps_fractional_raw_score() {
        let mut session = ready_session();
        session.subscale.method = AggregationMethod::Average;
        session.rules = RuleTable::new(vec![range(18, 99, Sex::Female, 0.0, 10.0, 45.0)]);
        let result = session.calculate();
        assert_eq!(
            result.error.as_deref(),
            Some("No matching normalized score found for age 25, sex M, raw score 2.5")
        );
    }

    #[test]
    fn test_missing_answer_surfaces_its_own_message() {
        let mut session = ready_session();
        session.answers = AnswerSet::new();
        session.answers.record("q1".to_string(), "B".to_string());
        let result = session.calculate();
        assert_eq!(result.raw_score, 0.0);
        assert_eq!(result.normalized_score, None);
        assert_eq!(
            result.error.as_deref(),
            Some("Please answer all questions in the subscale. Missing: 1 question(s)")
        );
        assert!(result.contributions.is_empty());
    }

    #[test]
    fn test_invalid_option_surfaces_reference_error() {
        let mut session = ready_session();
        session.answers.record("q1".to_string(), "E".to_string());
        let result = session.calculate();
        assert_eq!(
            result.error.as_deref(),
            Some("Invalid reference: question 'q1' has no option 'E'")
        );
        assert_eq!(result.normalized_score, None);
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let session = ready_session();
        assert_eq!(session.calculate(), session.calculate());
    }

    #[test]
    fn test_contributions_breakdown_on_success() {
        let result = ready_session().calculate();
        assert_eq!(result.contributions.len(), 2);
        assert_eq!(result.contributions[0].question_id, "q1");
        assert_eq!(result.contributions[0].selected, "B");
        assert_eq!(result.contributions[0].score, 2.0);
        assert_eq!(result.contributions[1].question_id, "q2");
        assert_eq!(result.contributions[1].score, 3.0);
    }

    #[test]
    fn test_first_match_wins_end_to_end() {
        let mut session = ready_session();
        session.rules = RuleTable::new(vec![
            range(1, 99, Sex::Male, 0.0, 10.0, 50.0),
            range(18, 30, Sex::Male, 5.0, 5.0, 99.0), // Also matches raw 5
        ]);
        assert_eq!(session.calculate().normalized_score, Some(50.0));
    }

    #[test]
    fn test_tolerance_policy_end_to_end() {
        let mut session = ready_session();
        session.subscale.method = AggregationMethod::Average; // raw = 2.5
        session.rules = RuleTable::new(vec![NormalizationRule::Exact(ExactRule {
            age: 25,
            sex: Sex::Male,
            raw_score: 2.49,
            normalized_score: 47.0,
        })]);
        assert_eq!(session.calculate().normalized_score, None);
        let result = session.calculate_with(MatchPolicy::Tolerance(0.05));
        assert_eq!(result.normalized_score, Some(47.0));
    }

    #[test]
    fn test_extra_answers_do_not_change_the_score() {
        let mut session = ready_session();
        let baseline = session.calculate();
        session.definition.questions.push(lettered_question("q3"));
        session.answers.record("q3".to_string(), "D".to_string());
        let with_extra = session.calculate();
        assert_eq!(baseline.raw_score, with_extra.raw_score);
        assert_eq!(baseline.normalized_score, with_extra.normalized_score);
    }
}
