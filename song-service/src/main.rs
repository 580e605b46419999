use service_core::observability::init_tracing;
use song_service::config::SongConfig;
use song_service::services::init_metrics;
use song_service::startup::Application;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("song-service terminated: {}", e);
            eprintln!("song-service terminated: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics()?;

    let config = SongConfig::load()?;

    init_tracing(
        "song-service",
        &config.common.log_level,
        config.otlp_endpoint.as_deref(),
    )?;

    let app = Application::build(config).await?;
    app.run_until_stopped().await?;

    Ok(())
}
