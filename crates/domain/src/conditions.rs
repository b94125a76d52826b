//! External condition values observed by the coordinator.
//!
//! None of these are owned here: the backend socket, the session store and
//! the location service publish them, the router only reads them.

use serde::{Deserialize, Serialize};

/// Connection state of the live events socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// Not connected to the server
    #[default]
    Disconnected,
    /// Attempting to establish connection
    Connecting,
    /// Successfully connected
    Connected,
}

impl ConnectionState {
    pub fn is_connected(self) -> bool {
        self == ConnectionState::Connected
    }
}

/// Maintenance flag published by the business settings socket.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MaintenanceMode {
    Enabled {
        reason: String,
    },
    Disabled,
    /// Nothing received yet
    #[default]
    Unknown,
}

/// Versions advertised by the backend.
///
/// Both fields are optional on the wire; the version check is skipped until
/// both are known.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServerVersions {
    #[serde(default)]
    pub required: Option<String>,
    #[serde(default)]
    pub current: Option<String>,
}

impl ServerVersions {
    pub fn new(required: impl Into<String>, current: impl Into<String>) -> Self {
        Self {
            required: Some(required.into()),
            current: Some(current.into()),
        }
    }
}

/// Result of the geolocation compliance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationStatus {
    Valid,
    Invalid,
    NotRequested,
    NotAuthorized,
    #[default]
    NotDetermined,
    NotRequired,
}
