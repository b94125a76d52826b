//! Router configuration.
//!
//! Plain values only; `infrastructure::env_config` fills them from the
//! environment.

use std::str::FromStr;
use std::time::Duration;

use sportsbook_domain::AppVersion;

use super::services::readiness_gate::WaitPolicy;

pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_BLOCKER_GRACE_PERIOD: Duration = Duration::from_secs(3);

/// How the modal slot settles conflicts between overlays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OverlayPolicy {
    /// Higher priority overlays cannot be evicted by lower ones; refused or
    /// evicted blockers come back once the slot frees up.
    #[default]
    Prioritized,
    /// Every presentation evicts whatever is shown, regardless of kind.
    LastWriterWins,
}

impl FromStr for OverlayPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prioritized" => Ok(Self::Prioritized),
            "last-writer-wins" | "last_writer_wins" => Ok(Self::LastWriterWins),
            other => Err(format!("unknown overlay policy: {other}")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RouterConfig {
    /// Version of the running app, compared against the server versions
    pub app_version: AppVersion,
    /// Upper bound for every wait on the connection gate
    pub connection_timeout: Duration,
    /// Delay applied to version and terms emissions
    pub blocker_grace_period: Duration,
    pub overlay_policy: OverlayPolicy,
}

impl RouterConfig {
    pub fn new(app_version: AppVersion) -> Self {
        Self {
            app_version,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
            blocker_grace_period: DEFAULT_BLOCKER_GRACE_PERIOD,
            overlay_policy: OverlayPolicy::default(),
        }
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    pub fn with_blocker_grace_period(mut self, grace: Duration) -> Self {
        self.blocker_grace_period = grace;
        self
    }

    pub fn with_overlay_policy(mut self, policy: OverlayPolicy) -> Self {
        self.overlay_policy = policy;
        self
    }

    pub fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy::new(self.connection_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_policy_from_str() {
        assert_eq!(
            "Prioritized".parse::<OverlayPolicy>(),
            Ok(OverlayPolicy::Prioritized)
        );
        assert_eq!(
            " last-writer-wins ".parse::<OverlayPolicy>(),
            Ok(OverlayPolicy::LastWriterWins)
        );
        assert!("first-come".parse::<OverlayPolicy>().is_err());
    }

    #[test]
    fn test_new_uses_defaults() {
        let config = RouterConfig::new("1.0".parse().unwrap());
        assert_eq!(config.connection_timeout, DEFAULT_CONNECTION_TIMEOUT);
        assert_eq!(config.blocker_grace_period, DEFAULT_BLOCKER_GRACE_PERIOD);
        assert_eq!(config.overlay_policy, OverlayPolicy::Prioritized);
        assert_eq!(config.wait_policy().timeout, DEFAULT_CONNECTION_TIMEOUT);
    }
}
