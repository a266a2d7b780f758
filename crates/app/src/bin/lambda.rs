//! Campus API - AWS Lambda Runtime

use lambda_http::{run, Error};
use tower_http::trace::TraceLayer;
use tracing::info;

use campus_app::{body_limit_layer, build_cors_layer, connect_pool, create_app, run_migrations};
use campus_common::config::Config;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .without_time()
        .init();

    info!("Initializing Campus API Lambda");

    let config =
        Config::from_env().map_err(|e| Error::from(format!("Configuration error: {}", e)))?;

    let pool = connect_pool(&config.database_url)
        .await
        .map_err(|e| Error::from(format!("Database error: {}", e)))?;

    run_migrations(&pool)
        .await
        .map_err(|e| Error::from(format!("Migration error: {}", e)))?;

    info!("Database connection established");

    let cors_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .map_err(|_| Error::from("CORS_ALLOWED_ORIGINS environment variable is required"))?;

    let app = create_app(&config, pool)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&cors_origins))
        .layer(body_limit_layer());

    info!("Campus API Lambda ready to serve requests");

    run(app).await
}
