use crate::error::AppError;
use crate::models::{GenerateQuizRequest, QuizQuestion};
use crate::startup::AppState;
use axum::{extract::State, Json};

/// `POST /generate-quiz`: turn source text into a ten-question quiz.
///
/// Input is validated before the generator runs, so a missing or blank
/// `text` field never triggers a provider call. The success body is the
/// bare question array, not an envelope object.
pub async fn generate_quiz(
    State(state): State<AppState>,
    Json(request): Json<GenerateQuizRequest>,
) -> Result<Json<Vec<QuizQuestion>>, AppError> {
    let text = match request.text {
        None => {
            return Err(AppError::BadRequest(anyhow::anyhow!("Missing 'text' field")));
        }
        Some(text) => text,
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Text input cannot be empty"
        )));
    }

    let quiz = state.generator.generate(text).await.map_err(|e| {
        tracing::error!(error = %e, "Quiz generation failed");
        AppError::from(e)
    })?;

    Ok(Json(quiz))
}
