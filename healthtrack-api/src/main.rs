use std::net::SocketAddr;

use axum::serve;
use tokio::net::TcpListener;

use healthtrack_api::api::routes::{create_app, create_in_memory_service, create_sqlite_service};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with environment settings
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    // SQLite when a database path is configured, in-memory otherwise
    let service = match std::env::var("HEALTHTRACK_DB") {
        Ok(path) => {
            tracing::info!("Using SQLite database at {}", path);
            create_sqlite_service(&path)?
        }
        Err(_) => {
            tracing::info!("No HEALTHTRACK_DB set, using in-memory stores");
            create_in_memory_service()
        }
    };

    let app = create_app(service);

    // Get port from environment or use default
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or(3000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    serve(listener, app).await?;

    Ok(())
}
