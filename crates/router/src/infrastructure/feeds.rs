//! Condition feeds - host side of the condition streams.
//!
//! The host (socket client, session store, remote config, location service)
//! publishes into a `ConditionFeeds`; the router observes the matching
//! `ConditionStreams`. Publishing never fails, even with no observers.

use std::collections::HashMap;

use tokio::sync::watch;

use sportsbook_domain::{ConnectionState, LocationStatus, MaintenanceMode, ServerVersions};

use crate::application::context::ConditionStreams;

pub struct ConditionFeeds {
    connection: watch::Sender<ConnectionState>,
    session_loading: watch::Sender<bool>,
    maintenance: watch::Sender<MaintenanceMode>,
    versions: watch::Sender<ServerVersions>,
    terms_update: watch::Sender<Option<bool>>,
    location: watch::Sender<LocationStatus>,
    redirects: watch::Sender<HashMap<String, String>>,
}

impl Default for ConditionFeeds {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionFeeds {
    /// Feeds starting from the "nothing known yet" values.
    pub fn new() -> Self {
        Self {
            connection: watch::Sender::new(ConnectionState::default()),
            session_loading: watch::Sender::new(false),
            maintenance: watch::Sender::new(MaintenanceMode::default()),
            versions: watch::Sender::new(ServerVersions::default()),
            terms_update: watch::Sender::new(None),
            location: watch::Sender::new(LocationStatus::default()),
            redirects: watch::Sender::new(HashMap::new()),
        }
    }

    /// New receivers positioned at the current values.
    pub fn streams(&self) -> ConditionStreams {
        ConditionStreams {
            connection: self.connection.subscribe(),
            session_loading: self.session_loading.subscribe(),
            maintenance: self.maintenance.subscribe(),
            versions: self.versions.subscribe(),
            terms_update: self.terms_update.subscribe(),
            location: self.location.subscribe(),
            redirects: self.redirects.subscribe(),
        }
    }

    pub fn connection_state(&self) -> ConnectionState {
        *self.connection.borrow()
    }

    pub fn set_connection_state(&self, state: ConnectionState) {
        let previous = self.connection.send_replace(state);
        if previous != state {
            tracing::debug!(from = ?previous, to = ?state, "Connection state changed");
        }
    }

    pub fn set_session_loading(&self, loading: bool) {
        self.session_loading.send_replace(loading);
    }

    pub fn set_maintenance(&self, mode: MaintenanceMode) {
        self.maintenance.send_replace(mode);
    }

    pub fn set_versions(&self, versions: ServerVersions) {
        self.versions.send_replace(versions);
    }

    pub fn set_terms_update(&self, should_accept: Option<bool>) {
        self.terms_update.send_replace(should_accept);
    }

    pub fn set_location(&self, status: LocationStatus) {
        self.location.send_replace(status);
    }

    /// Publish the query parameters of a redirect link.
    pub fn push_redirect(&self, params: HashMap<String, String>) {
        self.redirects.send_replace(params);
    }
}
