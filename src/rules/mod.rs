pub mod rule;
pub mod table;

pub use rule::{ExactRule, MatchPolicy, NormalizationRule, RangeRule};
pub use table::RuleTable;
