//! Modal Presenter Port - The app-level modal slot of the root screen
//!
//! Only `ModalSlotManager` may call this port. Anything presenting through it
//! directly breaks the one-modal-at-a-time guarantee.

use sportsbook_domain::{ChatScreen, Overlay, OverlayKind};

/// Port for presenting and dismissing full-screen units.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ModalPresenterPort: Send + Sync {
    /// Build and present the screen for `overlay`
    fn present(&self, overlay: &Overlay, animated: bool);

    /// Dismiss the presented unit, which is known to be of `kind`
    fn dismiss(&self, kind: OverlayKind, animated: bool);

    /// Pop the presented chat modal to its root and push `screen` on top
    fn push_into_chat(&self, screen: &ChatScreen);
}
