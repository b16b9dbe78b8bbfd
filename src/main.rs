use std::env;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intake::config::Config;
use intake::services::PdfResumeExtractor;
use intake::state::AppState;
use intake::store::Store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "intake=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting resume intake service");
    tracing::info!("Max file size: {}MB", config.max_file_size_mb);
    tracing::info!("Max pages: {}", config.max_pages);

    std::fs::create_dir_all(&config.upload_dir)?;
    let store = Store::open(&config.database_path).await?;
    let state = AppState::new(
        store,
        Arc::new(PdfResumeExtractor::new()),
        config.intake_policy(),
    );
    let app = intake::router(state);

    // PORT overrides SERVER_PORT for platform deployments.
    let port = env::var("PORT")
        .unwrap_or_else(|_| config.server_port.to_string())
        .parse::<u16>()
        .unwrap_or(config.server_port);

    let addr = format!("{}:{}", config.server_host, port);
    tracing::info!("Server listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
