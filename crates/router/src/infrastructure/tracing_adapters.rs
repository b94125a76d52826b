//! Port adapters that only log.
//!
//! Used by the headless binary, where there is no screen to drive.

use sportsbook_domain::{ChatScreen, Overlay, OverlayKind};

use crate::ports::outbound::{ModalPresenterPort, RootCapabilityPort};

#[derive(Debug, Default)]
pub struct TracingModalPresenter;

impl ModalPresenterPort for TracingModalPresenter {
    fn present(&self, overlay: &Overlay, animated: bool) {
        tracing::info!(kind = %overlay.kind(), ?overlay, animated, "present");
    }

    fn dismiss(&self, kind: OverlayKind, animated: bool) {
        tracing::info!(%kind, animated, "dismiss");
    }

    fn push_into_chat(&self, screen: &ChatScreen) {
        tracing::info!(?screen, "push into chat");
    }
}

#[derive(Debug, Default)]
pub struct TracingRootCapability;

impl TracingRootCapability {
    fn open(&self, destination: &'static str, id: Option<&str>) {
        tracing::info!(destination, id, "navigate");
    }
}

impl RootCapabilityPort for TracingRootCapability {
    fn open_match_detail(&self, match_id: &str) {
        self.open("match_detail", Some(match_id));
    }

    fn open_betslip_with_share_data(&self, ticket_token: &str) {
        self.open("betslip", Some(ticket_token));
    }

    fn open_competition_detail(&self, competition_id: &str) {
        self.open("competition_detail", Some(competition_id));
    }

    fn open_contact_settings(&self) {
        self.open("contact_settings", None);
    }

    fn open_betswipe(&self) {
        self.open("betswipe", None);
    }

    fn open_deposit(&self) {
        self.open("deposit", None);
    }

    fn open_bonus(&self) {
        self.open("bonus", None);
    }

    fn open_documents(&self) {
        self.open("documents", None);
    }

    fn open_customer_support(&self) {
        self.open("customer_support", None);
    }

    fn open_favorites(&self) {
        self.open("favorites", None);
    }

    fn open_promotions(&self) {
        self.open("promotions", None);
    }

    fn open_register_with_code(&self, code: &str) {
        self.open("register", Some(code));
    }

    fn open_responsible_form(&self) {
        self.open("responsible_form", None);
    }
}
