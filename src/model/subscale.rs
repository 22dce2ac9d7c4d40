use serde::{Deserialize, Serialize};

/// How a subscale combines its question scores into a raw score.
///
/// `Sum` adds the selected option scores exactly. `Average` divides the sum
/// by the question count and rounds to 2 decimal places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMethod {
    #[default]
    Sum,
    Average,
}

/// The questions scored together and the method used to combine them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SubscaleConfig {
    /// Display name for the subscale (must be non-empty)
    pub name: String,

    /// Ids of the questions this subscale scores, in scoring order
    pub question_ids: Vec<String>,

    /// Aggregation method (default: sum)
    #[serde(default)]
    pub method: AggregationMethod,
}

impl SubscaleConfig {
    pub fn new(name: impl Into<String>, question_ids: Vec<String>, method: AggregationMethod) -> Self {
        Self {
            name: name.into(),
            question_ids,
            method,
        }
    }
}
