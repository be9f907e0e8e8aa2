use ordable_connector::api;
use ordable_connector::config::Config;
use ordable_connector::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ordable_connector=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();
    let addr = format!("0.0.0.0:{}", config.http_port);

    let state = AppState::new(config);
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("ordable-connector listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
