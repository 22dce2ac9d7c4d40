use serde::{Deserialize, Serialize};

use super::rule::{MatchPolicy, NormalizationRule};
use crate::model::Sex;

/// An ordered collection of normalization rules.
///
/// Lookup is first-match-wins: rules are tried in table order and the first
/// one that matches is selected, even when later rules also match.
/// Overlapping bands are legal and table order is the tie-break, so a more
/// specific rule must be placed before the broader one it overlaps.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RuleTable {
    rules: Vec<NormalizationRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<NormalizationRule>) -> Self {
        Self { rules }
    }

    pub fn push(&mut self, rule: NormalizationRule) {
        self.rules.push(rule);
    }

    pub fn iter(&self) -> impl Iterator<Item = &NormalizationRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule matching the demographic key and raw score, with strict
    /// comparison for exact-shape rules.
    pub fn lookup(&self, age: u32, sex: Sex, raw_score: f64) -> Option<&NormalizationRule> {
        self.lookup_with(age, sex, raw_score, MatchPolicy::Strict)
    }

    /// First rule matching under the given policy.
    pub fn lookup_with(
        &self,
        age: u32,
        sex: Sex,
        raw_score: f64,
        policy: MatchPolicy,
    ) -> Option<&NormalizationRule> {
        self.rules
            .iter()
            .find(|rule| rule.matches(age, sex, raw_score, policy))
    }
}

impl FromIterator<NormalizationRule> for RuleTable {
    fn from_iter<I: IntoIterator<Item = NormalizationRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
