//! Shared-link redirects
//!
//! The host publishes the query parameters of every deep-link redirect. Each
//! redirect is turned into routes and dispatched once the socket is
//! connected.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use sportsbook_domain::{AppLifecycleState, Route};

use super::route_dispatcher::RouteDispatcher;
use crate::application::context::ConditionStreams;

/// Query key carrying a match id
pub const GAME_DETAIL_KEY: &str = "gamedetail";
/// Query key carrying a shared ticket token
pub const SHARED_BET_KEY: &str = "bet";

/// Routes requested by one redirect, match detail first.
pub fn routes_from_redirect(params: &HashMap<String, String>) -> Vec<Route> {
    let mut routes = Vec::new();
    if let Some(match_id) = params.get(GAME_DETAIL_KEY).filter(|id| !id.is_empty()) {
        routes.push(Route::Event {
            match_id: match_id.clone(),
        });
    }
    if let Some(token) = params.get(SHARED_BET_KEY).filter(|token| !token.is_empty()) {
        routes.push(Route::Ticket {
            share_token: token.clone(),
        });
    }
    routes
}

pub struct RedirectListener {
    dispatcher: Arc<RouteDispatcher>,
}

impl RedirectListener {
    pub fn new(dispatcher: Arc<RouteDispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn spawn(
        &self,
        streams: &ConditionStreams,
        cancel_token: &CancellationToken,
    ) -> JoinHandle<()> {
        let dispatcher = Arc::clone(&self.dispatcher);
        let mut redirects = streams.redirects.clone();
        let mut connection = streams.connection.clone();
        let cancel_token = cancel_token.clone();

        tokio::spawn(async move {
            let mut pending = routes_from_redirect(&redirects.borrow_and_update());

            loop {
                let connected = connection.borrow_and_update().is_connected();
                if connected && !pending.is_empty() {
                    for route in std::mem::take(&mut pending) {
                        tracing::info!(route = route.name(), "Opening redirect route");
                        dispatcher
                            .open_route_as(route, AppLifecycleState::InactiveApp)
                            .await;
                    }
                }

                tokio::select! {
                    biased;
                    _ = cancel_token.cancelled() => break,
                    changed = redirects.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let routes = routes_from_redirect(&redirects.borrow_and_update());
                        if !routes.is_empty() {
                            pending = routes;
                        }
                    }
                    changed = connection.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }

            tracing::debug!("Redirect listener stopped");
        })
    }
}
