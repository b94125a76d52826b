//! Starting route holder
//!
//! Keeps the route received before the app could navigate (typically the push
//! notification that launched it) until the router is ready to deliver it.

use std::sync::{Mutex, PoisonError};

use sportsbook_domain::Route;

/// Single slot holding at most one pending route.
///
/// `take` returns the stored route and resets the slot in the same critical
/// section, so a route is delivered at most once.
#[derive(Debug, Default)]
pub struct StartingRouteHolder {
    slot: Mutex<Route>,
}

impl StartingRouteHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `route`, replacing anything not yet consumed.
    pub fn configure(&self, route: Route) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if !slot.is_none() {
            tracing::debug!(replaced = ?*slot, "Replacing unconsumed starting route");
        }
        *slot = route;
    }

    /// Return the stored route and clear the slot.
    pub fn take(&self) -> Route {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *slot)
    }

    pub fn is_pending(&self) -> bool {
        !self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}
