//! # Babel API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

/// Bind and run until shutdown.
async fn serve(config: &AppConfig, state: AppState) -> std::io::Result<()> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port));

    match server {
        Ok(server) => server.run().await,
        Err(e) => {
            tracing::error!(error = %e, "Failed to bind {}:{}", config.host, config.port);
            Err(e)
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // One subscriber and exporter pipeline for the whole process
    let telemetry = init_telemetry(&TelemetryConfig::from_env())?;

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Babel API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await;

    let result = serve(&config, state).await;

    tracing::info!("Server stopped, flushing telemetry");
    telemetry.shutdown();

    Ok(result?)
}
