//! Route dispatcher
//!
//! Entry point for every route request. A route is matched exhaustively and
//! handed to exactly one handler:
//!
//! - content routes (event, competition, betswipe, favorites, shared ticket)
//!   wait for the live connection when the user is already inside the app
//! - account and info routes call the root capability straight away
//! - bet routes open the ticket list modal
//! - chat routes open or reuse the chat modal

use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;

use sportsbook_domain::{
    AppLifecycleState, ChatScreen, Overlay, OverlayKind, Route, RouteRequestId, TicketListKind,
};

use super::modal_slot::{ModalSlotManager, PresentOutcome};
use super::readiness_gate::{ConnectionReadinessGate, WaitPolicy};
use super::starting_route::StartingRouteHolder;
use crate::application::error::GateError;
use crate::ports::outbound::RootCapabilityPort;

/// What happened to a dispatched route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered,
    Ignored(IgnoreReason),
    /// A blocker overlay holds the modal slot
    Suppressed(OverlayKind),
    /// The connection gate gave up; the route is dropped
    Abandoned(GateError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyRoute,
    MalformedChatId(String),
}

pub struct RouteDispatcher {
    capability: Arc<dyn RootCapabilityPort>,
    slot: Arc<ModalSlotManager>,
    gate: ConnectionReadinessGate,
    starting_route: StartingRouteHolder,
    lifecycle: Mutex<AppLifecycleState>,
    wait_policy: WaitPolicy,
}

impl RouteDispatcher {
    pub fn new(
        capability: Arc<dyn RootCapabilityPort>,
        slot: Arc<ModalSlotManager>,
        gate: ConnectionReadinessGate,
        wait_policy: WaitPolicy,
    ) -> Self {
        Self {
            capability,
            slot,
            gate,
            starting_route: StartingRouteHolder::new(),
            lifecycle: Mutex::new(AppLifecycleState::default()),
            wait_policy,
        }
    }

    pub fn lifecycle(&self) -> AppLifecycleState {
        *self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_lifecycle(&self, state: AppLifecycleState) {
        *self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    pub fn configure_starting_route(&self, route: Route) {
        tracing::debug!(route = route.name(), "Configuring starting route");
        self.starting_route.configure(route);
    }

    /// Read and clear the starting route. Returns `Route::None` once consumed.
    pub fn request_starting_route(&self) -> Route {
        self.starting_route.take()
    }

    /// Dispatch a route tapped in a push notification.
    ///
    /// Nothing happens until the socket is connected and no session is
    /// loading; the route is then opened as an app launch.
    pub async fn open_push_notification_route(&self, route: Route) -> DispatchOutcome {
        if route.is_none() {
            return DispatchOutcome::Ignored(IgnoreReason::EmptyRoute);
        }

        tracing::debug!(route = route.name(), "Push route waiting for connection");
        if let Err(e) = self.gate.await_ready(self.wait_policy).await {
            tracing::warn!(route = route.name(), error = %e, "Abandoning push route");
            return DispatchOutcome::Abandoned(e);
        }

        self.set_lifecycle(AppLifecycleState::InactiveApp);
        self.open_route_as(route, AppLifecycleState::InactiveApp)
            .await
    }

    /// Run `open_push_notification_route` on its own task.
    pub fn spawn_push_notification_route(
        self: &Arc<Self>,
        route: Route,
    ) -> JoinHandle<DispatchOutcome> {
        let dispatcher = Arc::clone(self);
        tokio::spawn(async move { dispatcher.open_push_notification_route(route).await })
    }

    /// Dispatch a notification opened while the user is inside the app.
    pub async fn opened_notification_route_while_active(&self, route: Route) -> DispatchOutcome {
        self.set_lifecycle(AppLifecycleState::ActiveApp);
        self.open_route_as(route, AppLifecycleState::ActiveApp)
            .await
    }

    /// Wait for the connection, then open whatever starting route is stored.
    pub async fn deliver_starting_route_when_connected(&self) -> DispatchOutcome {
        if let Err(e) = self.gate.await_connected(self.wait_policy).await {
            tracing::warn!(error = %e, "Starting route not delivered");
            return DispatchOutcome::Abandoned(e);
        }

        let route = self.starting_route.take();
        if route.is_none() {
            return DispatchOutcome::Ignored(IgnoreReason::EmptyRoute);
        }

        self.set_lifecycle(AppLifecycleState::InactiveApp);
        self.open_route_as(route, AppLifecycleState::InactiveApp)
            .await
    }

    /// Open `route` under the lifecycle last recorded by a notification.
    pub async fn open_route(&self, route: Route) -> DispatchOutcome {
        self.open_route_as(route, self.lifecycle()).await
    }

    /// Open `route` under an explicit lifecycle, leaving the stored one as is.
    ///
    /// Callers that know how the route arrived use this, so a concurrent
    /// notification changing the stored lifecycle cannot affect them.
    pub async fn open_route_as(
        &self,
        route: Route,
        lifecycle: AppLifecycleState,
    ) -> DispatchOutcome {
        let request_id = RouteRequestId::new();
        tracing::info!(%request_id, route = ?route, ?lifecycle, "Opening route");

        let outcome = match route {
            Route::OpenBet { ticket_id } => {
                self.open_ticket_list(TicketListKind::Opened, ticket_id)
            }
            Route::ResolvedBet { ticket_id } => {
                self.open_ticket_list(TicketListKind::Resolved, ticket_id)
            }
            Route::Event { match_id } => {
                self.open_gated(lifecycle, |c| c.open_match_detail(&match_id))
                    .await
            }
            Route::Ticket { share_token } => {
                self.open_gated(lifecycle, |c| c.open_betslip_with_share_data(&share_token))
                    .await
            }
            Route::ChatMessage { chat_id } => self.open_chat_message(&chat_id),
            Route::ChatNotifications => self.open_chat(ChatScreen::Notifications),
            Route::ContactSettings => self.open_direct(|c| c.open_contact_settings()),
            Route::BetSwipe => self.open_gated(lifecycle, |c| c.open_betswipe()).await,
            Route::Competition { competition_id } => {
                self.open_gated(lifecycle, |c| c.open_competition_detail(&competition_id))
                    .await
            }
            Route::Deposit => self.open_direct(|c| c.open_deposit()),
            Route::Bonus => self.open_direct(|c| c.open_bonus()),
            Route::Documents => self.open_direct(|c| c.open_documents()),
            Route::CustomerSupport => self.open_direct(|c| c.open_customer_support()),
            Route::Favorites => self.open_gated(lifecycle, |c| c.open_favorites()).await,
            Route::Promotions => self.open_direct(|c| c.open_promotions()),
            Route::Referral { code } => self.open_direct(|c| c.open_register_with_code(&code)),
            Route::ResponsibleForm => self.open_direct(|c| c.open_responsible_form()),
            Route::None => DispatchOutcome::Ignored(IgnoreReason::EmptyRoute),
        };

        match &outcome {
            DispatchOutcome::Delivered => {
                tracing::debug!(%request_id, "Route delivered");
            }
            DispatchOutcome::Ignored(reason) => {
                tracing::debug!(%request_id, ?reason, "Route ignored");
            }
            DispatchOutcome::Suppressed(kind) => {
                tracing::info!(
                    %request_id,
                    blocker = %kind,
                    "Route suppressed by blocker overlay"
                );
            }
            DispatchOutcome::Abandoned(e) => {
                tracing::warn!(%request_id, error = %e, "Route abandoned");
            }
        }
        outcome
    }

    fn open_direct<F>(&self, open: F) -> DispatchOutcome
    where
        F: FnOnce(&dyn RootCapabilityPort),
    {
        self.slot.dismiss_navigation();
        open(self.capability.as_ref());
        DispatchOutcome::Delivered
    }

    /// In-app requests wait for the live connection before navigating.
    async fn open_gated<F>(&self, lifecycle: AppLifecycleState, open: F) -> DispatchOutcome
    where
        F: FnOnce(&dyn RootCapabilityPort),
    {
        self.slot.dismiss_navigation();

        if lifecycle == AppLifecycleState::ActiveApp {
            if let Err(e) = self.gate.await_connected(self.wait_policy).await {
                return DispatchOutcome::Abandoned(e);
            }
        }

        open(self.capability.as_ref());
        DispatchOutcome::Delivered
    }

    fn open_ticket_list(&self, list: TicketListKind, ticket_id: String) -> DispatchOutcome {
        modal_outcome(self.slot.replace(Overlay::TicketList { list, ticket_id }))
    }

    fn open_chat_message(&self, chat_id: &str) -> DispatchOutcome {
        match chat_id.parse::<i64>() {
            Ok(chat_id) => self.open_chat(ChatScreen::Conversation { chat_id }),
            Err(_) => {
                tracing::warn!(chat_id, "Ignoring chat route with non-numeric id");
                DispatchOutcome::Ignored(IgnoreReason::MalformedChatId(chat_id.to_string()))
            }
        }
    }

    fn open_chat(&self, screen: ChatScreen) -> DispatchOutcome {
        modal_outcome(self.slot.show_chat(screen))
    }
}

fn modal_outcome(outcome: PresentOutcome) -> DispatchOutcome {
    match outcome {
        PresentOutcome::Presented | PresentOutcome::AlreadyPresented => DispatchOutcome::Delivered,
        PresentOutcome::Suppressed { current } => DispatchOutcome::Suppressed(current),
    }
}
