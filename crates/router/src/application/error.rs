//! Error types for the router application layer.

use std::time::Duration;

use sportsbook_domain::DomainError;

/// Why a wait on the connection gate ended without the condition holding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("Connection not ready after {0:?}")]
    TimedOut(Duration),
    #[error("Wait cancelled")]
    Cancelled,
    #[error("Condition source closed")]
    SourceClosed,
}

/// Errors raised while configuring or starting the router.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl RouterError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
