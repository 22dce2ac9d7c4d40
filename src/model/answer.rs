use serde::{Deserialize, Serialize};

/// One recorded answer: which option a respondent selected on a question.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UserAnswer {
    pub question_id: String,
    pub selected: String,
}

/// All answers recorded for one respondent.
///
/// Recording an answer for a question that already has one replaces it,
/// matching how a survey form behaves when the respondent changes their
/// selection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: Vec<UserAnswer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the selected option for a question, replacing any previous
    /// selection.
    pub fn record(&mut self, question_id: String, selected: String) {
        if let Some(existing) = self.answers.iter_mut().find(|a| a.question_id == question_id) {
            existing.selected = selected;
        } else {
            self.answers.push(UserAnswer {
                question_id,
                selected,
            });
        }
    }

    /// The recorded answer for a question, if any.
    pub fn get(&self, question_id: &str) -> Option<&UserAnswer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserAnswer> {
        self.answers.iter()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl FromIterator<UserAnswer> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = UserAnswer>>(iter: I) -> Self {
        let mut set = Self::new();
        for answer in iter {
            set.record(answer.question_id, answer.selected);
        }
        set
    }
}
