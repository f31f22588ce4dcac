//! Domain models for the quiz service.

pub mod quiz;

pub use quiz::{GenerateQuizRequest, InvalidQuestion, QuizQuestion};
pub use quiz::{OPTIONS_PER_QUESTION, QUESTIONS_PER_QUIZ};
