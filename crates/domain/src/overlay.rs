//! Overlays that can occupy the app-level modal slot.
//!
//! An `Overlay` is what gets presented; its `OverlayKind` is its identity.
//! Two overlays of the same kind are interchangeable as far as the slot is
//! concerned, whatever their payload.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which ticket list the betslip opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketListKind {
    Opened,
    Resolved,
}

/// Screen shown inside the chat modal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ChatScreen {
    Notifications,
    Conversation { chat_id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "overlay", rename_all = "snake_case")]
pub enum Overlay {
    Maintenance { reason: String },
    RequiredUpdate,
    AvailableUpdate,
    Terms,
    InvalidLocation,
    RequestLocationAccess,
    RefusedLocationAccess,
    TicketList {
        list: TicketListKind,
        ticket_id: String,
    },
    Chat { screen: ChatScreen },
}

impl Overlay {
    pub fn kind(&self) -> OverlayKind {
        match self {
            Overlay::Maintenance { .. } => OverlayKind::Maintenance,
            Overlay::RequiredUpdate => OverlayKind::RequiredUpdate,
            Overlay::AvailableUpdate => OverlayKind::AvailableUpdate,
            Overlay::Terms => OverlayKind::Terms,
            Overlay::InvalidLocation => OverlayKind::InvalidLocation,
            Overlay::RequestLocationAccess => OverlayKind::RequestLocationAccess,
            Overlay::RefusedLocationAccess => OverlayKind::RefusedLocationAccess,
            Overlay::TicketList { .. } => OverlayKind::TicketList,
            Overlay::Chat { .. } => OverlayKind::Chat,
        }
    }

    pub fn priority(&self) -> u8 {
        self.kind().priority()
    }

    pub fn is_blocker(&self) -> bool {
        self.kind().is_blocker()
    }
}

/// Identity of an overlay, compared structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    Maintenance,
    RequiredUpdate,
    AvailableUpdate,
    Terms,
    InvalidLocation,
    RequestLocationAccess,
    RefusedLocationAccess,
    TicketList,
    Chat,
}

impl OverlayKind {
    /// All location overlays. Only one of them is ever shown.
    pub const LOCATION: [OverlayKind; 3] = [
        OverlayKind::InvalidLocation,
        OverlayKind::RequestLocationAccess,
        OverlayKind::RefusedLocationAccess,
    ];

    /// Precedence in the modal slot. Higher wins; zero is a navigation modal.
    pub fn priority(self) -> u8 {
        match self {
            OverlayKind::Maintenance => 50,
            OverlayKind::RequiredUpdate => 40,
            OverlayKind::InvalidLocation
            | OverlayKind::RequestLocationAccess
            | OverlayKind::RefusedLocationAccess => 30,
            OverlayKind::AvailableUpdate => 20,
            OverlayKind::Terms => 10,
            OverlayKind::TicketList | OverlayKind::Chat => 0,
        }
    }

    pub fn is_blocker(self) -> bool {
        self.priority() > 0
    }

    pub fn is_location(self) -> bool {
        Self::LOCATION.contains(&self)
    }

    /// The screen blocker this overlay stands for, if any.
    pub fn screen_blocker(self) -> ScreenBlocker {
        match self {
            OverlayKind::Maintenance => ScreenBlocker::Maintenance,
            OverlayKind::RequiredUpdate => ScreenBlocker::UpdateRequired,
            OverlayKind::AvailableUpdate => ScreenBlocker::UpdateAvailable,
            OverlayKind::InvalidLocation
            | OverlayKind::RequestLocationAccess
            | OverlayKind::RefusedLocationAccess => ScreenBlocker::InvalidLocation,
            OverlayKind::Terms | OverlayKind::TicketList | OverlayKind::Chat => {
                ScreenBlocker::None
            }
        }
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OverlayKind::Maintenance => "maintenance",
            OverlayKind::RequiredUpdate => "required_update",
            OverlayKind::AvailableUpdate => "available_update",
            OverlayKind::Terms => "terms",
            OverlayKind::InvalidLocation => "invalid_location",
            OverlayKind::RequestLocationAccess => "request_location_access",
            OverlayKind::RefusedLocationAccess => "refused_location_access",
            OverlayKind::TicketList => "ticket_list",
            OverlayKind::Chat => "chat",
        };
        write!(f, "{name}")
    }
}

/// Coarse blocking state of the app.
///
/// `Offline` is part of the vocabulary but no overlay maps to it; the
/// connection gate covers that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenBlocker {
    Maintenance,
    UpdateRequired,
    UpdateAvailable,
    Offline,
    InvalidLocation,
    #[default]
    None,
}
