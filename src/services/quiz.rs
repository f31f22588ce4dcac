//! Quiz generation: prompt construction, provider invocation, and
//! defensive parsing of the model's reply into validated questions.

use crate::models::{QuizQuestion, OPTIONS_PER_QUESTION, QUESTIONS_PER_QUIZ};
use crate::services::providers::{GenerationParams, ProviderError, TextProvider};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("empty response from AI model")]
    EmptyResponse,

    #[error("{0}")]
    MalformedResponse(String),
}

/// Generates quizzes from source text via a text provider.
#[derive(Clone)]
pub struct QuizGenerator {
    provider: Arc<dyn TextProvider>,
}

impl QuizGenerator {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    /// Generate a full quiz for the given source text.
    ///
    /// One non-streaming provider call; the reply is parsed and validated
    /// as a whole. An invalid element fails the entire operation so callers
    /// never see a partial quiz. Not idempotent: the model is stochastic.
    pub async fn generate(&self, text: &str) -> Result<Vec<QuizQuestion>, QuizError> {
        let prompt = build_prompt(text);

        tracing::debug!(
            text_len = text.len(),
            prompt_len = prompt.len(),
            "Requesting quiz generation"
        );

        let response = self
            .provider
            .generate(&prompt, &GenerationParams::default())
            .await?;

        let raw = match response.text {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(QuizError::EmptyResponse),
        };

        let quiz = parse_quiz(&raw)?;

        tracing::debug!(
            questions = quiz.len(),
            output_tokens = response.output_tokens,
            "Quiz generated"
        );

        Ok(quiz)
    }
}

/// Build the deterministic instruction prompt for the model.
///
/// The prompt is the sole mechanism enforcing the reply shape; there is no
/// schema negotiation with the provider.
fn build_prompt(text: &str) -> String {
    format!(
        r#"Create a quiz with {count} multiple-choice questions based on this text: {text}

Return ONLY a JSON array with exactly this format:
[
    {{
        "question": "What is...",
        "options": ["A", "B", "C", "D"],
        "correctAnswer": "A"
    }}
]

Rules:
1. Create exactly {count} questions
2. Each question must have exactly {options} distinct options
3. The correctAnswer must be one of the options
4. Questions should test different aspects of the text
5. Return ONLY the JSON array, no other text"#,
        count = QUESTIONS_PER_QUIZ,
        options = OPTIONS_PER_QUESTION,
        text = text,
    )
}

/// Parse the model's raw reply into a validated quiz.
///
/// The reply is expected to be a JSON array but may arrive wrapped in code
/// fences or prose; everything outside the first `[` and last `]` is
/// stripped before parsing.
fn parse_quiz(raw: &str) -> Result<Vec<QuizQuestion>, QuizError> {
    let candidate = extract_json_array(raw)?;

    let quiz: Vec<QuizQuestion> = serde_json::from_str(candidate).map_err(|e| {
        QuizError::MalformedResponse(format!("failed to parse AI response as JSON: {}", e))
    })?;

    if quiz.len() != QUESTIONS_PER_QUIZ {
        return Err(QuizError::MalformedResponse(format!(
            "expected {} questions, got {}",
            QUESTIONS_PER_QUIZ,
            quiz.len()
        )));
    }

    for (i, question) in quiz.iter().enumerate() {
        question
            .validate()
            .map_err(|e| QuizError::MalformedResponse(format!("question {}: {}", i + 1, e)))?;
    }

    Ok(quiz)
}

/// Isolate the candidate JSON array substring from the raw reply.
fn extract_json_array(raw: &str) -> Result<&str, QuizError> {
    match (raw.find('['), raw.rfind(']')) {
        (Some(start), Some(end)) if start < end => Ok(&raw[start..=end]),
        _ => Err(QuizError::MalformedResponse(
            "could not find a JSON array in the AI response".to_string(),
        )),
    }
}
