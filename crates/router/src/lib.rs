//! Sportsbook router.
//!
//! Turns route requests (push notification taps, boot-time deep links, in-app
//! actions, shared-ticket links) into navigation on the root screen, while
//! respecting the app lifecycle, the live connection gate and the single
//! app-level modal slot. Blocking overlays (maintenance, updates, terms,
//! location) are arbitrated through the same slot.

pub mod application;
pub mod infrastructure;
pub mod ports;

pub use application::{Router, RouterConfig, RouterContext};
