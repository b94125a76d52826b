//! Modal slot manager
//!
//! The root screen can present one full-screen unit at a time. Every
//! presentation and dismissal in the app goes through this manager so that
//! two modals are never stacked.
//!
//! Under `OverlayPolicy::Prioritized` an overlay may only replace one of equal
//! or lower priority. Blockers that lose the slot (refused, or evicted by a
//! higher one) are parked and the best parked blocker is presented again as
//! soon as the slot frees up. Navigation modals are never parked.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sportsbook_domain::{ChatScreen, Overlay, OverlayKind, ScreenBlocker};

use crate::application::config::OverlayPolicy;
use crate::ports::outbound::ModalPresenterPort;

/// Result of a presentation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentOutcome {
    Presented,
    /// An overlay of the same kind is already shown
    AlreadyPresented,
    /// A higher priority overlay holds the slot
    Suppressed { current: OverlayKind },
}

#[derive(Debug, Default)]
struct SlotState {
    current: Option<Overlay>,
    parked: Vec<Overlay>,
}

impl SlotState {
    fn current_kind(&self) -> Option<OverlayKind> {
        self.current.as_ref().map(Overlay::kind)
    }

    fn park(&mut self, overlay: Overlay) {
        self.unpark(&[overlay.kind()]);
        self.parked.push(overlay);
    }

    fn unpark(&mut self, kinds: &[OverlayKind]) {
        self.parked.retain(|parked| !kinds.contains(&parked.kind()));
    }

    fn take_best_parked(&mut self) -> Option<Overlay> {
        let index = self
            .parked
            .iter()
            .enumerate()
            .max_by_key(|(_, overlay)| overlay.priority())
            .map(|(index, _)| index)?;
        Some(self.parked.remove(index))
    }
}

pub struct ModalSlotManager {
    presenter: Arc<dyn ModalPresenterPort>,
    policy: OverlayPolicy,
    state: Mutex<SlotState>,
}

impl ModalSlotManager {
    pub fn new(presenter: Arc<dyn ModalPresenterPort>, policy: OverlayPolicy) -> Self {
        Self {
            presenter,
            policy,
            state: Mutex::new(SlotState::default()),
        }
    }

    pub fn policy(&self) -> OverlayPolicy {
        self.policy
    }

    /// Present `overlay` unless an overlay of the same kind is already shown.
    pub fn present(&self, overlay: Overlay) -> PresentOutcome {
        let mut state = self.lock();
        self.present_locked(&mut state, overlay, &[], false)
    }

    /// Present `overlay`, first retiring any overlay of the `replacing` kinds.
    ///
    /// Retired overlays are neither parked nor subject to priority checks;
    /// this is how one condition stream switches between its own overlays.
    pub fn present_replacing(&self, overlay: Overlay, replacing: &[OverlayKind]) -> PresentOutcome {
        let mut state = self.lock();
        self.present_locked(&mut state, overlay, replacing, false)
    }

    /// Present `overlay`, dismissing the current unit even if it has the same
    /// kind.
    pub fn replace(&self, overlay: Overlay) -> PresentOutcome {
        let mut state = self.lock();
        self.present_locked(&mut state, overlay, &[], true)
    }

    /// Show `screen` in the chat modal, reusing it when it is already up.
    pub fn show_chat(&self, screen: ChatScreen) -> PresentOutcome {
        let mut state = self.lock();
        if state.current_kind() == Some(OverlayKind::Chat) {
            tracing::debug!(?screen, "Pushing into presented chat modal");
            self.presenter.push_into_chat(&screen);
            state.current = Some(Overlay::Chat { screen });
            return PresentOutcome::Presented;
        }
        self.present_locked(&mut state, Overlay::Chat { screen }, &[], true)
    }

    /// Dismiss the current unit only if it is of `kind`.
    ///
    /// A parked overlay of `kind` is forgotten either way.
    pub fn dismiss_if_matches(&self, kind: OverlayKind) -> bool {
        self.dismiss_if_any(&[kind])
    }

    /// Dismiss the current unit if it is of any of `kinds`.
    pub fn dismiss_if_any(&self, kinds: &[OverlayKind]) -> bool {
        let mut state = self.lock();
        state.unpark(kinds);

        let Some(current) = state.current_kind() else {
            return false;
        };
        if !kinds.contains(&current) {
            return false;
        }

        tracing::debug!(kind = %current, "Dismissing overlay");
        self.presenter.dismiss(current, true);
        state.current = None;
        self.promote_locked(&mut state);
        true
    }

    /// Dismiss a presented navigation modal before in-place navigation.
    ///
    /// Blockers stay up under `Prioritized`; `LastWriterWins` clears anything.
    pub fn dismiss_navigation(&self) -> bool {
        let mut state = self.lock();
        let Some(current) = state.current_kind() else {
            return false;
        };
        if current.is_blocker() && self.policy == OverlayPolicy::Prioritized {
            return false;
        }

        tracing::debug!(kind = %current, "Dismissing modal for navigation");
        self.presenter.dismiss(current, true);
        state.current = None;
        self.promote_locked(&mut state);
        true
    }

    pub fn current(&self) -> Option<Overlay> {
        self.lock().current.clone()
    }

    pub fn current_kind(&self) -> Option<OverlayKind> {
        self.lock().current_kind()
    }

    /// Blockers waiting for the slot, highest priority first.
    pub fn parked_kinds(&self) -> Vec<OverlayKind> {
        let mut kinds: Vec<OverlayKind> = self.lock().parked.iter().map(Overlay::kind).collect();
        kinds.sort_by_key(|kind| std::cmp::Reverse(kind.priority()));
        kinds
    }

    pub fn screen_blocker(&self) -> ScreenBlocker {
        self.current_kind()
            .map(OverlayKind::screen_blocker)
            .unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn present_locked(
        &self,
        state: &mut SlotState,
        overlay: Overlay,
        replacing: &[OverlayKind],
        force: bool,
    ) -> PresentOutcome {
        let kind = overlay.kind();
        state.unpark(replacing);

        if let Some(current) = state.current.take() {
            let current_kind = current.kind();
            let retiring = replacing.contains(&current_kind);

            if current_kind == kind && !force {
                state.current = Some(current);
                return PresentOutcome::AlreadyPresented;
            }

            let outranked = self.policy == OverlayPolicy::Prioritized
                && !retiring
                && current.priority() > overlay.priority();
            if outranked {
                tracing::info!(
                    requested = %kind,
                    current = %current_kind,
                    "Overlay suppressed by higher priority overlay"
                );
                state.current = Some(current);
                if overlay.is_blocker() {
                    state.park(overlay);
                }
                return PresentOutcome::Suppressed {
                    current: current_kind,
                };
            }

            self.presenter.dismiss(current_kind, true);
            if current.is_blocker() && !retiring && current_kind != kind {
                match self.policy {
                    OverlayPolicy::Prioritized => {
                        tracing::debug!(
                            evicted = %current_kind,
                            by = %kind,
                            "Parking evicted blocker"
                        );
                        state.park(current);
                    }
                    OverlayPolicy::LastWriterWins => {
                        tracing::warn!(
                            evicted = %current_kind,
                            by = %kind,
                            "Blocker overlay evicted"
                        );
                    }
                }
            }
        }

        state.unpark(&[kind]);
        tracing::debug!(%kind, "Presenting overlay");
        self.presenter.present(&overlay, true);
        state.current = Some(overlay);
        PresentOutcome::Presented
    }

    fn promote_locked(&self, state: &mut SlotState) {
        if state.current.is_some() || self.policy != OverlayPolicy::Prioritized {
            return;
        }
        if let Some(overlay) = state.take_best_parked() {
            tracing::debug!(kind = %overlay.kind(), "Presenting parked blocker");
            self.presenter.present(&overlay, true);
            state.current = Some(overlay);
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::{predicate::eq, Sequence};

    use super::*;
    use crate::infrastructure::testing::{PresenterCall, RecordingPresenter};
    use crate::ports::outbound::MockModalPresenterPort;

    fn maintenance() -> Overlay {
        Overlay::Maintenance {
            reason: "down for upgrade".to_string(),
        }
    }

    fn tickets(id: &str) -> Overlay {
        Overlay::TicketList {
            list: sportsbook_domain::TicketListKind::Opened,
            ticket_id: id.to_string(),
        }
    }

    fn recording(policy: OverlayPolicy) -> (Arc<RecordingPresenter>, ModalSlotManager) {
        let presenter = Arc::new(RecordingPresenter::default());
        let slot = ModalSlotManager::new(presenter.clone(), policy);
        (presenter, slot)
    }

    #[test]
    fn test_present_different_kind_dismisses_first() {
        let mut presenter = MockModalPresenterPort::new();
        let mut seq = Sequence::new();

        presenter
            .expect_present()
            .withf(|overlay, _| overlay.kind() == OverlayKind::Terms)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        presenter
            .expect_dismiss()
            .with(eq(OverlayKind::Terms), eq(true))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        presenter
            .expect_present()
            .withf(|overlay, animated| overlay.kind() == OverlayKind::AvailableUpdate && *animated)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let slot = ModalSlotManager::new(Arc::new(presenter), OverlayPolicy::Prioritized);
        assert_eq!(slot.present(Overlay::Terms), PresentOutcome::Presented);
        assert_eq!(slot.present(Overlay::AvailableUpdate), PresentOutcome::Presented);
        assert_eq!(slot.current_kind(), Some(OverlayKind::AvailableUpdate));
    }

    #[test]
    fn test_present_same_kind_is_idempotent() {
        let mut presenter = MockModalPresenterPort::new();
        presenter.expect_present().times(1).return_const(());
        presenter.expect_dismiss().never();

        let slot = ModalSlotManager::new(Arc::new(presenter), OverlayPolicy::Prioritized);
        assert_eq!(slot.present(maintenance()), PresentOutcome::Presented);
        assert_eq!(
            slot.present(Overlay::Maintenance {
                reason: "another reason".to_string()
            }),
            PresentOutcome::AlreadyPresented
        );
    }

    #[test]
    fn test_dismiss_if_matches_only_dismisses_matching_kind() {
        let (presenter, slot) = recording(OverlayPolicy::Prioritized);
        slot.present(Overlay::Terms);

        assert!(!slot.dismiss_if_matches(OverlayKind::Maintenance));
        assert_eq!(slot.current_kind(), Some(OverlayKind::Terms));

        assert!(slot.dismiss_if_matches(OverlayKind::Terms));
        assert_eq!(slot.current_kind(), None);
        assert_eq!(
            presenter.calls(),
            vec![
                PresenterCall::Present(OverlayKind::Terms),
                PresenterCall::Dismiss(OverlayKind::Terms),
            ]
        );
    }

    #[test]
    fn test_dismiss_on_empty_slot_is_noop() {
        let (presenter, slot) = recording(OverlayPolicy::Prioritized);
        assert!(!slot.dismiss_if_matches(OverlayKind::Terms));
        assert!(!slot.dismiss_navigation());
        assert!(presenter.calls().is_empty());
    }

    #[test]
    fn test_lower_priority_cannot_evict_and_is_parked() {
        let (presenter, slot) = recording(OverlayPolicy::Prioritized);
        slot.present(maintenance());

        assert_eq!(
            slot.present(Overlay::RequiredUpdate),
            PresentOutcome::Suppressed {
                current: OverlayKind::Maintenance
            }
        );
        assert_eq!(slot.current_kind(), Some(OverlayKind::Maintenance));
        assert_eq!(slot.parked_kinds(), vec![OverlayKind::RequiredUpdate]);

        slot.dismiss_if_matches(OverlayKind::Maintenance);
        assert_eq!(slot.current_kind(), Some(OverlayKind::RequiredUpdate));
        assert!(slot.parked_kinds().is_empty());
        assert_eq!(
            presenter.calls(),
            vec![
                PresenterCall::Present(OverlayKind::Maintenance),
                PresenterCall::Dismiss(OverlayKind::Maintenance),
                PresenterCall::Present(OverlayKind::RequiredUpdate),
            ]
        );
    }

    #[test]
    fn test_higher_priority_evicts_and_parks_previous_blocker() {
        let (_presenter, slot) = recording(OverlayPolicy::Prioritized);
        slot.present(Overlay::Terms);
        slot.present(maintenance());

        assert_eq!(slot.current_kind(), Some(OverlayKind::Maintenance));
        assert_eq!(slot.parked_kinds(), vec![OverlayKind::Terms]);

        slot.dismiss_if_matches(OverlayKind::Maintenance);
        assert_eq!(slot.current_kind(), Some(OverlayKind::Terms));
    }

    #[test]
    fn test_dismissing_parked_kind_forgets_it() {
        let (_presenter, slot) = recording(OverlayPolicy::Prioritized);
        slot.present(maintenance());
        slot.present(Overlay::Terms);
        assert_eq!(slot.parked_kinds(), vec![OverlayKind::Terms]);

        assert!(!slot.dismiss_if_matches(OverlayKind::Terms));
        assert!(slot.parked_kinds().is_empty());

        slot.dismiss_if_matches(OverlayKind::Maintenance);
        assert_eq!(slot.current_kind(), None);
    }

    #[test]
    fn test_promotes_highest_parked_first() {
        let (_presenter, slot) = recording(OverlayPolicy::Prioritized);
        slot.present(maintenance());
        slot.present(Overlay::Terms);
        slot.present(Overlay::InvalidLocation);
        slot.present(Overlay::AvailableUpdate);

        assert_eq!(
            slot.parked_kinds(),
            vec![
                OverlayKind::InvalidLocation,
                OverlayKind::AvailableUpdate,
                OverlayKind::Terms
            ]
        );

        slot.dismiss_if_matches(OverlayKind::Maintenance);
        assert_eq!(slot.current_kind(), Some(OverlayKind::InvalidLocation));
        slot.dismiss_if_any(&OverlayKind::LOCATION);
        assert_eq!(slot.current_kind(), Some(OverlayKind::AvailableUpdate));
    }

    #[test]
    fn test_present_replacing_retires_own_kinds_without_parking() {
        let (presenter, slot) = recording(OverlayPolicy::Prioritized);
        slot.present(Overlay::RequiredUpdate);

        let outcome = slot.present_replacing(
            Overlay::AvailableUpdate,
            &[OverlayKind::RequiredUpdate, OverlayKind::AvailableUpdate],
        );
        assert_eq!(outcome, PresentOutcome::Presented);
        assert_eq!(slot.current_kind(), Some(OverlayKind::AvailableUpdate));
        assert!(slot.parked_kinds().is_empty());
        assert_eq!(
            presenter.calls(),
            vec![
                PresenterCall::Present(OverlayKind::RequiredUpdate),
                PresenterCall::Dismiss(OverlayKind::RequiredUpdate),
                PresenterCall::Present(OverlayKind::AvailableUpdate),
            ]
        );
    }

    #[test]
    fn test_navigation_modal_cannot_cover_blocker() {
        let (presenter, slot) = recording(OverlayPolicy::Prioritized);
        slot.present(Overlay::Terms);

        assert_eq!(
            slot.replace(tickets("t-1")),
            PresentOutcome::Suppressed {
                current: OverlayKind::Terms
            }
        );
        assert!(!slot.dismiss_navigation());
        assert!(slot.parked_kinds().is_empty());
        assert_eq!(presenter.calls(), vec![PresenterCall::Present(OverlayKind::Terms)]);
    }

    #[test]
    fn test_replace_same_kind_dismisses_first() {
        let (presenter, slot) = recording(OverlayPolicy::Prioritized);
        slot.replace(tickets("t-1"));
        slot.replace(tickets("t-2"));

        assert_eq!(slot.current(), Some(tickets("t-2")));
        assert_eq!(
            presenter.calls(),
            vec![
                PresenterCall::Present(OverlayKind::TicketList),
                PresenterCall::Dismiss(OverlayKind::TicketList),
                PresenterCall::Present(OverlayKind::TicketList),
            ]
        );
    }

    #[test]
    fn test_blocker_evicts_navigation_modal_without_parking_it() {
        let (_presenter, slot) = recording(OverlayPolicy::Prioritized);
        slot.replace(tickets("t-1"));
        slot.present(Overlay::Terms);

        assert_eq!(slot.current_kind(), Some(OverlayKind::Terms));
        assert!(slot.parked_kinds().is_empty());
        slot.dismiss_if_matches(OverlayKind::Terms);
        assert_eq!(slot.current_kind(), None);
    }

    #[test]
    fn test_show_chat_pushes_into_existing_chat_modal() {
        let (presenter, slot) = recording(OverlayPolicy::Prioritized);
        slot.show_chat(ChatScreen::Notifications);
        slot.show_chat(ChatScreen::Conversation { chat_id: 7 });

        assert_eq!(
            presenter.calls(),
            vec![
                PresenterCall::Present(OverlayKind::Chat),
                PresenterCall::PushIntoChat(ChatScreen::Conversation { chat_id: 7 }),
            ]
        );
    }

    #[test]
    fn test_last_writer_wins_evicts_regardless_of_priority() {
        let (presenter, slot) = recording(OverlayPolicy::LastWriterWins);
        slot.present(maintenance());
        assert_eq!(slot.present(Overlay::AvailableUpdate), PresentOutcome::Presented);

        assert_eq!(slot.current_kind(), Some(OverlayKind::AvailableUpdate));
        assert!(slot.parked_kinds().is_empty());

        // Nothing comes back after the evicting overlay goes away
        slot.dismiss_if_matches(OverlayKind::AvailableUpdate);
        assert_eq!(slot.current_kind(), None);
        assert_eq!(
            presenter.calls(),
            vec![
                PresenterCall::Present(OverlayKind::Maintenance),
                PresenterCall::Dismiss(OverlayKind::Maintenance),
                PresenterCall::Present(OverlayKind::AvailableUpdate),
                PresenterCall::Dismiss(OverlayKind::AvailableUpdate),
            ]
        );
    }

    #[test]
    fn test_screen_blocker_reflects_current_overlay() {
        let (_presenter, slot) = recording(OverlayPolicy::Prioritized);
        assert_eq!(slot.screen_blocker(), ScreenBlocker::None);
        slot.present(Overlay::RefusedLocationAccess);
        assert_eq!(slot.screen_blocker(), ScreenBlocker::InvalidLocation);
    }
}
