use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use skyfare_api::worker::start_session_sweeper;
use skyfare_api::{app, AppState};
use skyfare_offer::{SessionSettings, TypeaheadConfig};
use skyfare_store::app_config::Config;
use skyfare_store::DuffelClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyfare_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting Skyfare API on port {}", config.server.port);
    tracing::debug!("Loaded configuration: {:?}", config);

    let source = DuffelClient::new(&config.duffel, config.currency.clone())?;

    let settings = SessionSettings {
        default_base_price: config.search.default_base_price,
        fallback_max_duration: config.search.fallback_max_duration,
    };
    let typeahead = TypeaheadConfig {
        debounce: Duration::from_millis(config.search.typeahead_debounce_ms),
        min_chars: config.search.typeahead_min_chars,
    };

    let state = AppState::new(
        Arc::new(source),
        settings,
        typeahead,
        Duration::from_secs(config.search.session_ttl_seconds),
    );
    let _sweeper = start_session_sweeper(
        state.sessions.clone(),
        Duration::from_secs(config.search.session_sweep_seconds.max(1)),
    );
    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
