use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mock_commerce::{api::create_router, ApplicationBuilder, Config};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting mock_commerce service");

    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;
    info!(backend = %config.storage_backend, "Configuration loaded and validated");

    let listen_addr = config.listen_addr.clone();

    let state = ApplicationBuilder::new(config)
        .with_database()
        .await?
        .with_repositories()?
        .build()?;

    let app = create_router(state);

    info!("Listening on {}", listen_addr);
    let listener = TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
