use serde::{Deserialize, Serialize};

/// One selectable answer on a question.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerOption {
    pub label: String, // What the respondent picks, e.g. "A" or "Never"
    pub score: f64,    // Contribution to the raw score when selected
}

/// A survey question with its scored answer options.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Find the option with the given label
    pub fn option(&self, label: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.label == label)
    }
}

/// The full set of questions a survey defines.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SurveyDefinition {
    pub questions: Vec<Question>,
}

impl SurveyDefinition {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Find a question by id
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
