//! Router - composition of the routing services
//!
//! Built once from a `RouterContext`, after the root capability exists.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::context::{ConditionStreams, RouterContext};
use super::services::{
    BlockerOverlayArbiter, ConnectionReadinessGate, ModalSlotManager, RedirectListener,
    RouteDispatcher,
};

pub struct Router {
    streams: ConditionStreams,
    cancel_token: CancellationToken,
    slot: Arc<ModalSlotManager>,
    dispatcher: Arc<RouteDispatcher>,
    arbiter: Arc<BlockerOverlayArbiter>,
    redirects: RedirectListener,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl Router {
    pub fn new(context: RouterContext) -> Self {
        let RouterContext {
            streams,
            capability,
            presenter,
            config,
            cancel_token,
        } = context;

        let slot = Arc::new(ModalSlotManager::new(presenter, config.overlay_policy));
        let gate = ConnectionReadinessGate::new(
            streams.connection.clone(),
            streams.session_loading.clone(),
            cancel_token.clone(),
        );
        let dispatcher = Arc::new(RouteDispatcher::new(
            capability,
            Arc::clone(&slot),
            gate,
            config.wait_policy(),
        ));
        let arbiter = Arc::new(BlockerOverlayArbiter::new(
            Arc::clone(&slot),
            config.app_version.clone(),
            config.blocker_grace_period,
        ));
        let redirects = RedirectListener::new(Arc::clone(&dispatcher));

        tracing::debug!(
            policy = ?config.overlay_policy,
            timeout = ?config.connection_timeout,
            "Router created"
        );

        Self {
            streams,
            cancel_token,
            slot,
            dispatcher,
            arbiter,
            redirects,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Subscribe to the blocker and redirect streams, and schedule delivery of
    /// the starting route once connected.
    pub fn start(&self) {
        let mut handles = self.arbiter.spawn(&self.streams, &self.cancel_token);
        handles.push(self.redirects.spawn(&self.streams, &self.cancel_token));

        let dispatcher = Arc::clone(&self.dispatcher);
        handles.push(tokio::spawn(async move {
            let outcome = dispatcher.deliver_starting_route_when_connected().await;
            tracing::debug!(?outcome, "Starting route delivery finished");
        }));

        tracing::info!(tasks = handles.len(), "Router started");
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(handles);
    }

    pub fn dispatcher(&self) -> &Arc<RouteDispatcher> {
        &self.dispatcher
    }

    pub fn modal_slot(&self) -> &Arc<ModalSlotManager> {
        &self.slot
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Cancel every task and pending wait, then wait for the tasks to end.
    pub async fn shutdown(&self) {
        self.cancel_token.cancel();

        let handles =
            std::mem::take(&mut *self.tasks.lock().unwrap_or_else(PoisonError::into_inner));
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Router task failed");
            }
        }
        tracing::info!("Router stopped");
    }
}
