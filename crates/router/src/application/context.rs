//! Explicit dependencies of the router.
//!
//! Everything the coordinator observes or drives is handed over here at
//! construction time. There is no global environment to reach into.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use sportsbook_domain::{ConnectionState, LocationStatus, MaintenanceMode, ServerVersions};

use super::config::RouterConfig;
use crate::ports::outbound::{ModalPresenterPort, RootCapabilityPort};

/// Receivers for every condition stream the router reacts to.
#[derive(Clone, Debug)]
pub struct ConditionStreams {
    pub connection: watch::Receiver<ConnectionState>,
    pub session_loading: watch::Receiver<bool>,
    pub maintenance: watch::Receiver<MaintenanceMode>,
    pub versions: watch::Receiver<ServerVersions>,
    /// `Some(true)` when the user must accept updated terms
    pub terms_update: watch::Receiver<Option<bool>>,
    pub location: watch::Receiver<LocationStatus>,
    /// Query parameters of the last deep-link redirect
    pub redirects: watch::Receiver<HashMap<String, String>>,
}

#[derive(Clone)]
pub struct RouterContext {
    pub streams: ConditionStreams,
    pub capability: Arc<dyn RootCapabilityPort>,
    pub presenter: Arc<dyn ModalPresenterPort>,
    pub config: RouterConfig,
    /// Cancelling this stops every router task and pending wait
    pub cancel_token: CancellationToken,
}

impl RouterContext {
    pub fn new(
        streams: ConditionStreams,
        capability: Arc<dyn RootCapabilityPort>,
        presenter: Arc<dyn ModalPresenterPort>,
        config: RouterConfig,
    ) -> Self {
        Self {
            streams,
            capability,
            presenter,
            config,
            cancel_token: CancellationToken::new(),
        }
    }
}
