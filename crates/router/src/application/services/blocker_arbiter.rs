//! Blocker overlay arbiter
//!
//! Maps four independent condition streams onto full-screen blocking
//! overlays:
//!
//! - maintenance mode → maintenance screen
//! - server versions → required / available update screens
//! - terms acceptance → updated terms screen
//! - location status → invalid / request access / refused access screens
//!
//! Each stream only ever shows or hides its own overlays. Conflicts between
//! streams are settled by the modal slot's overlay policy.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use sportsbook_domain::{
    AppVersion, DomainError, LocationStatus, MaintenanceMode, Overlay, OverlayKind, ServerVersions,
};

use super::modal_slot::ModalSlotManager;
use crate::application::context::ConditionStreams;

const VERSION_KINDS: [OverlayKind; 2] =
    [OverlayKind::RequiredUpdate, OverlayKind::AvailableUpdate];

/// Outcome of comparing the running app against the server versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCheck {
    UpdateRequired,
    UpdateAvailable,
    UpToDate,
}

/// Compare `app` with the advertised versions.
///
/// Returns `Ok(None)` while either server value is still unknown.
pub fn check_versions(
    app: &AppVersion,
    versions: &ServerVersions,
) -> Result<Option<VersionCheck>, DomainError> {
    let (Some(required), Some(current)) = (&versions.required, &versions.current) else {
        return Ok(None);
    };
    let required: AppVersion = required.parse()?;
    let current: AppVersion = current.parse()?;

    let check = if *app < required {
        VersionCheck::UpdateRequired
    } else if *app < current {
        VersionCheck::UpdateAvailable
    } else {
        VersionCheck::UpToDate
    };
    Ok(Some(check))
}

pub struct BlockerOverlayArbiter {
    slot: Arc<ModalSlotManager>,
    app_version: AppVersion,
    grace_period: Duration,
}

impl BlockerOverlayArbiter {
    pub fn new(
        slot: Arc<ModalSlotManager>,
        app_version: AppVersion,
        grace_period: Duration,
    ) -> Self {
        Self {
            slot,
            app_version,
            grace_period,
        }
    }

    pub fn apply_maintenance(&self, mode: &MaintenanceMode) {
        match mode {
            MaintenanceMode::Enabled { reason } => {
                tracing::info!(%reason, "Maintenance mode enabled");
                self.slot.present(Overlay::Maintenance {
                    reason: reason.clone(),
                });
            }
            MaintenanceMode::Disabled => {
                self.slot.dismiss_if_matches(OverlayKind::Maintenance);
            }
            MaintenanceMode::Unknown => {}
        }
    }

    pub fn apply_versions(&self, versions: &ServerVersions) {
        match check_versions(&self.app_version, versions) {
            Ok(Some(VersionCheck::UpdateRequired)) => {
                tracing::info!(app = %self.app_version, ?versions, "App update required");
                self.slot
                    .present_replacing(Overlay::RequiredUpdate, &VERSION_KINDS);
            }
            Ok(Some(VersionCheck::UpdateAvailable)) => {
                tracing::info!(app = %self.app_version, ?versions, "App update available");
                self.slot
                    .present_replacing(Overlay::AvailableUpdate, &VERSION_KINDS);
            }
            Ok(Some(VersionCheck::UpToDate)) => {
                self.slot.dismiss_if_any(&VERSION_KINDS);
            }
            Ok(None) => {
                tracing::debug!(?versions, "Server versions incomplete, skipping check");
            }
            Err(e) => {
                tracing::warn!(error = %e, ?versions, "Ignoring unparseable server versions");
            }
        }
    }

    pub fn apply_terms(&self, should_accept_update: Option<bool>) {
        match should_accept_update {
            Some(true) => {
                self.slot.present(Overlay::Terms);
            }
            Some(false) | None => {
                self.slot.dismiss_if_matches(OverlayKind::Terms);
            }
        }
    }

    pub fn apply_location(&self, status: LocationStatus) {
        tracing::debug!(?status, "Location status received");
        let overlay = match status {
            LocationStatus::Valid => {
                self.slot.dismiss_if_any(&OverlayKind::LOCATION);
                return;
            }
            LocationStatus::Invalid => Overlay::InvalidLocation,
            LocationStatus::NotRequested => Overlay::RequestLocationAccess,
            LocationStatus::NotAuthorized => Overlay::RefusedLocationAccess,
            LocationStatus::NotDetermined | LocationStatus::NotRequired => return,
        };
        self.slot.present_replacing(overlay, &OverlayKind::LOCATION);
    }

    /// Subscribe to the four blocker streams.
    ///
    /// Each stream gets its own task; all of them stop when `cancel_token`
    /// is cancelled or their sender goes away.
    pub fn spawn(
        self: &Arc<Self>,
        streams: &ConditionStreams,
        cancel_token: &CancellationToken,
    ) -> Vec<JoinHandle<()>> {
        let grace = Some(self.grace_period);

        let arbiter = Arc::clone(self);
        let maintenance = tokio::spawn(observe(
            "maintenance",
            streams.maintenance.clone(),
            cancel_token.clone(),
            None,
            false,
            move |mode: &MaintenanceMode| arbiter.apply_maintenance(mode),
        ));

        let arbiter = Arc::clone(self);
        let versions = tokio::spawn(observe(
            "versions",
            streams.versions.clone(),
            cancel_token.clone(),
            grace,
            false,
            move |versions: &ServerVersions| arbiter.apply_versions(versions),
        ));

        let arbiter = Arc::clone(self);
        let terms = tokio::spawn(observe(
            "terms",
            streams.terms_update.clone(),
            cancel_token.clone(),
            grace,
            true,
            move |value: &Option<bool>| arbiter.apply_terms(*value),
        ));

        let arbiter = Arc::clone(self);
        let location = tokio::spawn(observe(
            "location",
            streams.location.clone(),
            cancel_token.clone(),
            None,
            false,
            move |status: &LocationStatus| arbiter.apply_location(*status),
        ));

        vec![maintenance, versions, terms, location]
    }
}

/// Feed every value of `rx` (current one first) to `apply`, in order.
///
/// With `delay`, each value is applied that long after it was received,
/// independently of the values before it. With `dedupe`, a value equal to
/// the last received one is skipped.
async fn observe<T, F>(
    stream: &'static str,
    mut rx: watch::Receiver<T>,
    cancel_token: CancellationToken,
    delay: Option<Duration>,
    dedupe: bool,
    mut apply: F,
) where
    T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
    F: FnMut(&T) + Send + 'static,
{
    let mut last_seen: Option<T> = None;
    let mut scheduled: VecDeque<(Instant, T)> = VecDeque::new();
    let mut receive = true;
    let mut closed = false;

    loop {
        if receive {
            receive = false;
            let value = T::clone(&rx.borrow_and_update());
            if !(dedupe && last_seen.as_ref() == Some(&value)) {
                last_seen = Some(value.clone());
                match delay {
                    Some(delay) => scheduled.push_back((Instant::now() + delay, value)),
                    None => apply(&value),
                }
            }
        }

        if closed && scheduled.is_empty() {
            tracing::debug!(stream, "Condition stream closed");
            return;
        }

        let next_due = scheduled.front().map(|(due, _)| *due);
        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => break,
            _ = sleep_until(next_due.unwrap_or_else(Instant::now)), if next_due.is_some() => {
                if let Some((_, value)) = scheduled.pop_front() {
                    apply(&value);
                }
            }
            changed = rx.changed(), if !closed => {
                match changed {
                    Ok(()) => receive = true,
                    Err(_) => closed = true,
                }
            }
        }
    }

    tracing::debug!(stream, "Blocker subscription cancelled");
}
