//! Sportsbook Router - headless entry point.
//!
//! Wires the router with logging adapters and in-process condition feeds,
//! then dispatches the links given on the command line:
//!
//! ```text
//! sportsbook-router sportsbook://event/123 'https://example.com/s?bet=tok' '{"route":"deposit"}'
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sportsbook_domain::{ConnectionState, LocationStatus, MaintenanceMode, Route};
use sportsbook_router::infrastructure::env_config::{
    load_dotenv_from_repo_root, load_router_config,
};
use sportsbook_router::infrastructure::tracing_adapters::{
    TracingModalPresenter, TracingRootCapability,
};
use sportsbook_router::infrastructure::{
    parse_deep_link, parse_notification_payload, redirect_params, ConditionFeeds,
};
use sportsbook_router::{Router, RouterContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sportsbook_router=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Sportsbook Router");

    let config = load_router_config()?;
    tracing::info!(
        app_version = %config.app_version,
        policy = ?config.overlay_policy,
        "Configuration loaded"
    );

    let feeds = ConditionFeeds::new();
    feeds.set_maintenance(MaintenanceMode::Disabled);
    feeds.set_location(LocationStatus::NotRequired);

    let context = RouterContext::new(
        feeds.streams(),
        Arc::new(TracingRootCapability),
        Arc::new(TracingModalPresenter),
        config,
    );
    let router = Router::new(context);
    router.start();
    setup_shutdown_signal(router.cancellation_token());

    let mut pending = Vec::new();
    for arg in std::env::args().skip(1) {
        match classify(&arg) {
            Some(Inbound::Route(route)) => {
                pending.push(router.dispatcher().spawn_push_notification_route(route));
            }
            Some(Inbound::Redirect(params)) => feeds.push_redirect(params),
            None => tracing::warn!(arg = %arg, "Ignoring unrecognised link"),
        }
    }

    // Simulated socket handshake
    feeds.set_session_loading(true);
    feeds.set_connection_state(ConnectionState::Connecting);
    feeds.set_connection_state(ConnectionState::Connected);
    feeds.set_session_loading(false);

    for handle in pending {
        match handle.await {
            Ok(outcome) => tracing::info!(?outcome, "Push route finished"),
            Err(e) => tracing::warn!(error = %e, "Push route task failed"),
        }
    }

    // Let the redirect listener drain
    tokio::time::sleep(Duration::from_millis(50)).await;

    router.shutdown().await;
    Ok(())
}

enum Inbound {
    Route(Route),
    Redirect(std::collections::HashMap<String, String>),
}

fn classify(arg: &str) -> Option<Inbound> {
    if let Some(route) = parse_deep_link(arg) {
        return Some(Inbound::Route(route));
    }
    if let Ok(payload) = serde_json::from_str::<serde_json::Value>(arg) {
        return parse_notification_payload(&payload).map(Inbound::Route);
    }
    redirect_params(arg).map(Inbound::Redirect)
}

fn setup_shutdown_signal(cancel_token: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
                    return;
                }
                tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
            }
            _ = cancel_token.cancelled() => return,
        }
        cancel_token.cancel();
    });
}
