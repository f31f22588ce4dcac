use quizcraft_service::config::QuizConfig;
use quizcraft_service::observability::init_tracing;
use quizcraft_service::startup::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    let config = QuizConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    tracing::info!("Starting quizcraft-service on port {}", app.port());
    app.run_until_stopped().await?;

    Ok(())
}
