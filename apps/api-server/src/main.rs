//! # Postboard API Server
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
use postboard_infra::DatabaseConnections;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    // Open the database before serving; a configured but unreachable
    // database aborts startup.
    let db = match &config.database {
        Some(db_config) => Some(DatabaseConnections::init(db_config).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to database");
            std::io::Error::other(e)
        })?),
        None => None,
    };

    let state = AppState::new(db.as_ref());

    tracing::info!(
        "Starting Postboard API Server on {}:{}",
        config.host,
        config.port
    );

    // Stops on SIGINT/SIGTERM after in-flight requests finish
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    tracing::info!("Server stopped");

    if let Some(db) = db {
        db.close().await;
    }

    Ok(())
}
