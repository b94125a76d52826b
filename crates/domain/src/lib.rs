//! Sportsbook domain vocabulary.
//!
//! Pure data for the route coordinator: the closed set of navigable routes,
//! the external condition values the coordinator reacts to, and the overlays
//! it can place in the single modal slot. Nothing here performs I/O.

extern crate self as sportsbook_domain;

pub mod conditions;
pub mod error;
pub mod ids;
pub mod overlay;
pub mod route;
pub mod version;

pub use conditions::{ConnectionState, LocationStatus, MaintenanceMode, ServerVersions};
pub use error::DomainError;
pub use ids::RouteRequestId;
pub use overlay::{ChatScreen, Overlay, OverlayKind, ScreenBlocker, TicketListKind};
pub use route::{AppLifecycleState, Route};
pub use version::AppVersion;
