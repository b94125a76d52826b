//! Application layer - Routing use cases and orchestration

pub mod config;
pub mod context;
pub mod error;
pub mod router;
pub mod services;

// Re-export common types
pub use config::{OverlayPolicy, RouterConfig};
pub use context::{ConditionStreams, RouterContext};
pub use error::{GateError, RouterError};
pub use router::Router;
