//! Outbound ports - Interfaces for the screens the router drives
//!
//! These ports define the contracts that the UI layer must implement,
//! allowing the router to navigate without depending on concrete screens.

pub mod capability_port;
pub mod modal_presenter_port;

pub use capability_port::RootCapabilityPort;
pub use modal_presenter_port::ModalPresenterPort;

#[cfg(any(test, feature = "testing"))]
pub use capability_port::MockRootCapabilityPort;
#[cfg(any(test, feature = "testing"))]
pub use modal_presenter_port::MockModalPresenterPort;
