//! Recording port implementations for tests.
//!
//! Mocks are enough for single interactions; scenarios spanning several
//! streams are easier to assert on as an ordered call log.

use std::sync::{Mutex, PoisonError};

use sportsbook_domain::{ChatScreen, Overlay, OverlayKind};

use crate::ports::outbound::{ModalPresenterPort, RootCapabilityPort};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterCall {
    Present(OverlayKind),
    Dismiss(OverlayKind),
    PushIntoChat(ChatScreen),
}

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    calls: Mutex<Vec<PresenterCall>>,
    presented: Mutex<Vec<Overlay>>,
}

impl RecordingPresenter {
    pub fn calls(&self) -> Vec<PresenterCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Full overlays passed to `present`, in order
    pub fn presented(&self) -> Vec<Overlay> {
        self.presented
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: PresenterCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl ModalPresenterPort for RecordingPresenter {
    fn present(&self, overlay: &Overlay, _animated: bool) {
        self.record(PresenterCall::Present(overlay.kind()));
        self.presented
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(overlay.clone());
    }

    fn dismiss(&self, kind: OverlayKind, _animated: bool) {
        self.record(PresenterCall::Dismiss(kind));
    }

    fn push_into_chat(&self, screen: &ChatScreen) {
        self.record(PresenterCall::PushIntoChat(screen.clone()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityCall {
    MatchDetail(String),
    BetslipWithShareData(String),
    CompetitionDetail(String),
    ContactSettings,
    Betswipe,
    Deposit,
    Bonus,
    Documents,
    CustomerSupport,
    Favorites,
    Promotions,
    RegisterWithCode(String),
    ResponsibleForm,
}

#[derive(Debug, Default)]
pub struct RecordingCapability {
    calls: Mutex<Vec<CapabilityCall>>,
}

impl RecordingCapability {
    pub fn calls(&self) -> Vec<CapabilityCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: CapabilityCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl RootCapabilityPort for RecordingCapability {
    fn open_match_detail(&self, match_id: &str) {
        self.record(CapabilityCall::MatchDetail(match_id.to_string()));
    }

    fn open_betslip_with_share_data(&self, ticket_token: &str) {
        self.record(CapabilityCall::BetslipWithShareData(ticket_token.to_string()));
    }

    fn open_competition_detail(&self, competition_id: &str) {
        self.record(CapabilityCall::CompetitionDetail(competition_id.to_string()));
    }

    fn open_contact_settings(&self) {
        self.record(CapabilityCall::ContactSettings);
    }

    fn open_betswipe(&self) {
        self.record(CapabilityCall::Betswipe);
    }

    fn open_deposit(&self) {
        self.record(CapabilityCall::Deposit);
    }

    fn open_bonus(&self) {
        self.record(CapabilityCall::Bonus);
    }

    fn open_documents(&self) {
        self.record(CapabilityCall::Documents);
    }

    fn open_customer_support(&self) {
        self.record(CapabilityCall::CustomerSupport);
    }

    fn open_favorites(&self) {
        self.record(CapabilityCall::Favorites);
    }

    fn open_promotions(&self) {
        self.record(CapabilityCall::Promotions);
    }

    fn open_register_with_code(&self, code: &str) {
        self.record(CapabilityCall::RegisterWithCode(code.to_string()));
    }

    fn open_responsible_form(&self) {
        self.record(CapabilityCall::ResponsibleForm);
    }
}
