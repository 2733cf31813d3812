use gym_catalog::api::routes::create_routes;
use gym_catalog::config::{run_migrations, AppConfig, DatabaseConfig};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let app_config = AppConfig::from_env()?;
    let database_config = DatabaseConfig::from_env()?;

    let pool = database_config.create_pool().await?;
    run_migrations(&pool).await?;

    // Create the application routes
    let app = create_routes(pool.clone());

    // Start the server
    let address = app_config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Gym catalog server starting on http://{}", address);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Database pool closed, goodbye");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", error);
    }
}
