use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Number of questions a quiz must contain.
pub const QUESTIONS_PER_QUIZ: usize = 10;

/// Number of answer options each question must carry.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Request body for `POST /generate-quiz`.
///
/// `text` is optional so a missing field and a blank one can be reported
/// with distinct messages.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateQuizRequest {
    pub text: Option<String>,
}

/// One multiple-choice quiz item, in the shape returned to API clients and
/// expected back from the AI model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// Invariant violation on a single question.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidQuestion {
    #[error("question text is empty")]
    EmptyQuestion,

    #[error("expected {OPTIONS_PER_QUESTION} options, got {0}")]
    WrongOptionCount(usize),

    #[error("options contain duplicates")]
    DuplicateOptions,

    #[error("correct answer is not one of the options")]
    CorrectAnswerNotInOptions,
}

impl QuizQuestion {
    /// Check the question invariants: non-empty text, exactly four distinct
    /// options, and a correct answer drawn from those options.
    pub fn validate(&self) -> Result<(), InvalidQuestion> {
        if self.question.trim().is_empty() {
            return Err(InvalidQuestion::EmptyQuestion);
        }

        if self.options.len() != OPTIONS_PER_QUESTION {
            return Err(InvalidQuestion::WrongOptionCount(self.options.len()));
        }

        let distinct: HashSet<&str> = self.options.iter().map(String::as_str).collect();
        if distinct.len() != self.options.len() {
            return Err(InvalidQuestion::DuplicateOptions);
        }

        if !self.options.contains(&self.correct_answer) {
            return Err(InvalidQuestion::CorrectAnswerNotInOptions);
        }

        Ok(())
    }
}
