//! Integration tests for the quiz generation endpoint.
//!
//! All tests run against a spawned app with a mock text provider; the real
//! Gemini API is never contacted.
//!
//! Run with: cargo test --test generate_quiz

use quizcraft_service::config::{GoogleConfig, ModelConfig, QuizConfig, ServerConfig};
use quizcraft_service::models::QuizQuestion;
use quizcraft_service::services::providers::mock::MockTextProvider;
use quizcraft_service::services::providers::TextProvider;
use quizcraft_service::startup::Application;
use reqwest::{Client, StatusCode};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

fn test_config() -> QuizConfig {
    QuizConfig {
        server: ServerConfig { port: 0 },
        google: GoogleConfig {
            api_key: "test-api-key".to_string(),
        },
        models: ModelConfig {
            text_model: "gemini-2.0-flash".to_string(),
        },
    }
}

/// Spawn the application on a random port and return the port number.
async fn spawn_app(provider: Arc<dyn TextProvider>) -> u16 {
    let app = Application::build_with_provider(test_config(), provider)
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

/// A well-formed ten-question reply in the shape the prompt demands.
fn sample_quiz_json() -> String {
    let questions: Vec<_> = (0..10)
        .map(|i| {
            json!({
                "question": format!("What does section {} of the text describe?", i + 1),
                "options": [
                    format!("Answer {}-a", i + 1),
                    format!("Answer {}-b", i + 1),
                    format!("Answer {}-c", i + 1),
                    format!("Answer {}-d", i + 1),
                ],
                "correctAnswer": format!("Answer {}-b", i + 1)
            })
        })
        .collect();
    serde_json::to_string(&questions).expect("fixture should serialize")
}

async fn post_generate(port: u16, body: serde_json::Value) -> reqwest::Response {
    Client::new()
        .post(format!("http://localhost:{}/generate-quiz", port))
        .json(&body)
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
async fn valid_text_returns_ten_validated_questions() {
    let port = spawn_app(Arc::new(MockTextProvider::with_reply(sample_quiz_json()))).await;

    let response = post_generate(
        port,
        json!({"text": "Photosynthesis converts light into chemical energy."}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    // The body is a bare array, not an envelope object.
    let quiz: Vec<QuizQuestion> = response.json().await.expect("Failed to parse quiz");
    assert_eq!(quiz.len(), 10);
    for question in &quiz {
        assert!(question.validate().is_ok());
    }
}

#[tokio::test]
async fn reply_wrapped_in_code_fences_parses_the_same() {
    let fenced = format!("Sure! ```json\n{}\n```", sample_quiz_json());
    let port = spawn_app(Arc::new(MockTextProvider::with_reply(fenced))).await;

    let response = post_generate(port, json!({"text": "Some source text."})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let quiz: Vec<QuizQuestion> = response.json().await.expect("Failed to parse quiz");
    assert_eq!(quiz.len(), 10);

    let bare: Vec<QuizQuestion> =
        serde_json::from_str(&sample_quiz_json()).expect("fixture should parse");
    assert_eq!(quiz, bare);
}

#[tokio::test]
async fn missing_text_returns_400_without_calling_provider() {
    let provider = MockTextProvider::with_reply(sample_quiz_json());
    let calls = provider.call_counter();
    let port = spawn_app(Arc::new(provider)).await;

    let response = post_generate(port, json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Missing 'text' field");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn blank_text_returns_400_without_calling_provider() {
    let provider = MockTextProvider::with_reply(sample_quiz_json());
    let calls = provider.call_counter();
    let port = spawn_app(Arc::new(provider)).await;

    let response = post_generate(port, json!({"text": "   "})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Text input cannot be empty");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn provider_failure_returns_500_with_error_body() {
    let port = spawn_app(Arc::new(MockTextProvider::failing("auth failure"))).await;

    let response = post_generate(port, json!({"text": "Some source text."})).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "AI provider error");
    assert!(body["details"].as_str().unwrap().contains("auth failure"));
}

#[tokio::test]
async fn non_json_reply_returns_500() {
    let port = spawn_app(Arc::new(MockTextProvider::with_reply(
        "I'm sorry, I cannot help with that.",
    )))
    .await;

    let response = post_generate(port, json!({"text": "Some source text."})).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Malformed AI response");
}

#[tokio::test]
async fn wrong_question_count_returns_500() {
    let nine: Vec<serde_json::Value> = serde_json::from_str::<Vec<serde_json::Value>>(
        &sample_quiz_json(),
    )
    .expect("fixture should parse")
    .into_iter()
    .take(9)
    .collect();
    let reply = serde_json::to_string(&nine).expect("fixture should serialize");
    let port = spawn_app(Arc::new(MockTextProvider::with_reply(reply))).await;

    let response = post_generate(port, json!({"text": "Some source text."})).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Malformed AI response");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("expected 10 questions, got 9"));
}

#[tokio::test]
async fn correct_answer_outside_options_returns_500() {
    let mut questions: Vec<serde_json::Value> =
        serde_json::from_str(&sample_quiz_json()).expect("fixture should parse");
    questions[2]["correctAnswer"] = json!("Not an option");
    let reply = serde_json::to_string(&questions).expect("fixture should serialize");
    let port = spawn_app(Arc::new(MockTextProvider::with_reply(reply))).await;

    let response = post_generate(port, json!({"text": "Some source text."})).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("question 3: correct answer is not one of the options"));
}
