pub mod answer;
pub mod profile;
pub mod question;
pub mod subscale;

pub use answer::{AnswerSet, UserAnswer};
pub use profile::{Sex, UserProfile, AGE_MAX, AGE_MIN};
pub use question::{AnswerOption, Question, SurveyDefinition};
pub use subscale::{AggregationMethod, SubscaleConfig};
