use hangout::{config::DEFAULT_LOG_FILTER, AppState, RelayConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RelayConfig::from_env()?;

    info!(
        listen_addr = %config.listen_addr,
        mailbox_capacity = config.mailbox_capacity,
        heartbeat_interval_secs = config.heartbeat_interval.as_secs(),
        "Starting hangout chat relay"
    );

    // Room registry lives for the whole process; rooms are never evicted
    let app_state = AppState::from_config(&config);
    let app = hangout::app(app_state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("Server running on http://{}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
