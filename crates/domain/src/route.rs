//! Routes - abstract destination requests
//!
//! A `Route` says *where* the user should end up, never *how* the screen is
//! built. Routes are produced per signal (push tap, deep link, in-app action)
//! and consumed once by the dispatcher.

use serde::{Deserialize, Serialize};

/// Closed set of navigable destinations.
///
/// Identifiers are carried as the backend hands them over. The chat id is the
/// only one the coordinator interprets (it must be numeric).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    OpenBet {
        ticket_id: String,
    },
    ResolvedBet {
        ticket_id: String,
    },
    Event {
        match_id: String,
    },
    /// Shared betslip ticket
    Ticket {
        share_token: String,
    },
    ChatMessage {
        chat_id: String,
    },
    ChatNotifications,
    ContactSettings,
    BetSwipe,
    Competition {
        competition_id: String,
    },
    Deposit,
    Bonus,
    Documents,
    CustomerSupport,
    Favorites,
    Promotions,
    Referral {
        code: String,
    },
    ResponsibleForm,
    #[default]
    None,
}

impl Route {
    pub fn is_none(&self) -> bool {
        matches!(self, Route::None)
    }

    /// Stable snake_case name of the variant, used in logs and payloads.
    pub fn name(&self) -> &'static str {
        match self {
            Route::OpenBet { .. } => "open_bet",
            Route::ResolvedBet { .. } => "resolved_bet",
            Route::Event { .. } => "event",
            Route::Ticket { .. } => "ticket",
            Route::ChatMessage { .. } => "chat_message",
            Route::ChatNotifications => "chat_notifications",
            Route::ContactSettings => "contact_settings",
            Route::BetSwipe => "bet_swipe",
            Route::Competition { .. } => "competition",
            Route::Deposit => "deposit",
            Route::Bonus => "bonus",
            Route::Documents => "documents",
            Route::CustomerSupport => "customer_support",
            Route::Favorites => "favorites",
            Route::Promotions => "promotions",
            Route::Referral { .. } => "referral",
            Route::ResponsibleForm => "responsible_form",
            Route::None => "none",
        }
    }
}

/// How the route reached the app.
///
/// Recorded by the dispatcher once per delivery attempt; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppLifecycleState {
    /// The app is launching or being brought forward by the route
    #[default]
    InactiveApp,
    /// The user is already inside the app and triggered the route from there
    ActiveApp,
}
