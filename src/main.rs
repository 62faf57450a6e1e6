use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use github_webex_relay::bot::Session;
use github_webex_relay::config::Config;
use github_webex_relay::relay::WebexClient;
use github_webex_relay::server::{build_router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "github_webex_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "configuration error");
            std::process::exit(1);
        }
    };

    let relay = match WebexClient::new(config.webex_token.clone()) {
        Ok(relay) => relay,
        Err(error) => {
            tracing::error!(%error, "failed to construct Webex client");
            std::process::exit(1);
        }
    };

    let session = Session::new(relay.clone(), config.bot_name.clone(), config.bot_email.clone());
    session.start();

    let state = AppState::new(
        config.github_secret.clone(),
        config.room_id.clone(),
        relay,
        session.clone(),
        config.relay_timeout,
        config.strict_events,
    );
    let app = build_router(state.clone(), config.max_body_bytes);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, room = %config.room_id, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    let shutdown = session.cancel_token();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {},
                _ = shutdown.cancelled() => {},
            }
        })
        .await
        .unwrap();

    session.shutdown();

    let counters = state.metrics().snapshot();
    tracing::info!(
        received = counters.received_total,
        relayed = counters.relayed_total,
        relay_failed = counters.relay_failed_total,
        "final delivery counters"
    );
}
