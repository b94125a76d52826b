//! Inbound route payloads
//!
//! Turns `sportsbook://` links and push notification payloads into `Route`s:
//! - sportsbook://event/{match_id}
//! - sportsbook://competition/{competition_id}
//! - sportsbook://ticket/{share_token}
//! - sportsbook://bets/open/{ticket_id}, sportsbook://bets/resolved/{ticket_id}
//! - sportsbook://chat, sportsbook://chat/{chat_id}
//! - sportsbook://referral/{code}
//! - sportsbook://{deposit|bonus|documents|support|favorites|promotions|betswipe}
//! - sportsbook://settings/contact, sportsbook://responsible-gaming
//!
//! Shared links carry their target in the query instead
//! (`?gamedetail={match_id}`, `?bet={share_token}`); see `redirect_params`.

use std::collections::HashMap;

use serde_json::Value;
use url::Url;

use sportsbook_domain::Route;

pub const SCHEME: &str = "sportsbook";

/// Parse a `sportsbook://` link into a route.
///
/// Returns `None` for other schemes, unknown paths, and links whose target
/// is only in the query.
pub fn parse_deep_link(link: &str) -> Option<Route> {
    let url = Url::parse(link).ok()?;
    if url.scheme() != SCHEME {
        return None;
    }

    // With a custom scheme the first segment is parsed as the host
    let segments: Vec<&str> = url
        .host_str()
        .into_iter()
        .chain(url.path_segments().into_iter().flatten())
        .filter(|s| !s.is_empty())
        .collect();

    let route = match segments.as_slice() {
        ["event", match_id] => Route::Event {
            match_id: match_id.to_string(),
        },
        ["competition", competition_id] => Route::Competition {
            competition_id: competition_id.to_string(),
        },
        ["ticket", share_token] => Route::Ticket {
            share_token: share_token.to_string(),
        },
        ["bets", "open", ticket_id] => Route::OpenBet {
            ticket_id: ticket_id.to_string(),
        },
        ["bets", "resolved", ticket_id] => Route::ResolvedBet {
            ticket_id: ticket_id.to_string(),
        },
        ["chat"] => Route::ChatNotifications,
        ["chat", chat_id] => Route::ChatMessage {
            chat_id: chat_id.to_string(),
        },
        ["referral", code] => Route::Referral {
            code: code.to_string(),
        },
        ["settings", "contact"] => Route::ContactSettings,
        ["betswipe"] => Route::BetSwipe,
        ["deposit"] => Route::Deposit,
        ["bonus"] => Route::Bonus,
        ["documents"] => Route::Documents,
        ["support"] => Route::CustomerSupport,
        ["favorites"] => Route::Favorites,
        ["promotions"] => Route::Promotions,
        ["responsible-gaming"] => Route::ResponsibleForm,
        _ => return None,
    };
    Some(route)
}

/// Query parameters of a link, for the redirect stream.
///
/// Any scheme is accepted since shared links usually arrive over https.
pub fn redirect_params(link: &str) -> Option<HashMap<String, String>> {
    let url = Url::parse(link).ok()?;
    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
    (!params.is_empty()).then_some(params)
}

/// Build a route from its snake_case name and optional identifier.
///
/// Routes that carry an identifier require a non-empty `id`.
pub fn route_from_parts(name: &str, id: Option<&str>) -> Option<Route> {
    let id = id.map(str::trim).filter(|id| !id.is_empty());
    let with_id = |build: fn(String) -> Route| id.map(|id| build(id.to_string()));

    match name {
        "open_bet" => with_id(|ticket_id| Route::OpenBet { ticket_id }),
        "resolved_bet" => with_id(|ticket_id| Route::ResolvedBet { ticket_id }),
        "event" => with_id(|match_id| Route::Event { match_id }),
        "ticket" => with_id(|share_token| Route::Ticket { share_token }),
        "chat_message" => with_id(|chat_id| Route::ChatMessage { chat_id }),
        "competition" => with_id(|competition_id| Route::Competition { competition_id }),
        "referral" => with_id(|code| Route::Referral { code }),
        "chat_notifications" => Some(Route::ChatNotifications),
        "contact_settings" => Some(Route::ContactSettings),
        "bet_swipe" => Some(Route::BetSwipe),
        "deposit" => Some(Route::Deposit),
        "bonus" => Some(Route::Bonus),
        "documents" => Some(Route::Documents),
        "customer_support" => Some(Route::CustomerSupport),
        "favorites" => Some(Route::Favorites),
        "promotions" => Some(Route::Promotions),
        "responsible_form" => Some(Route::ResponsibleForm),
        _ => None,
    }
}

/// Parse a push payload of the form `{"route": "event", "id": "123"}`.
///
/// Numeric ids are accepted as well as strings.
pub fn parse_notification_payload(payload: &Value) -> Option<Route> {
    let name = payload.get("route")?.as_str()?;
    let id = match payload.get("id") {
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    };

    let route = route_from_parts(name, id.as_deref());
    if route.is_none() {
        tracing::debug!(route = name, ?id, "Unrecognised notification payload");
    }
    route
}
