//! Application services
//!
//! The coordinator's use cases. Services depend on port traits and watch
//! receivers, never on concrete screens.

pub mod blocker_arbiter;
pub mod modal_slot;
pub mod readiness_gate;
pub mod redirect_listener;
pub mod route_dispatcher;
pub mod starting_route;

pub use blocker_arbiter::{check_versions, BlockerOverlayArbiter, VersionCheck};
pub use modal_slot::{ModalSlotManager, PresentOutcome};
pub use readiness_gate::{ConnectionReadinessGate, WaitPolicy};
pub use redirect_listener::{routes_from_redirect, RedirectListener};
pub use route_dispatcher::{DispatchOutcome, IgnoreReason, RouteDispatcher};
pub use starting_route::StartingRouteHolder;
