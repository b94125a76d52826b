//! Environment configuration
//!
//! - `SPORTSBOOK_APP_VERSION` - running app version (default: crate version)
//! - `SPORTSBOOK_CONNECTION_TIMEOUT_SECS` - gate timeout, 1..=600 (default 30)
//! - `SPORTSBOOK_BLOCKER_GRACE_MS` - version/terms delay, 0..=60000 (default 3000)
//! - `SPORTSBOOK_OVERLAY_POLICY` - `prioritized` or `last-writer-wins`
//!
//! Invalid values are logged and ignored.

use std::time::Duration;

use sportsbook_domain::AppVersion;

use crate::application::config::{OverlayPolicy, RouterConfig};
use crate::application::error::RouterError;

pub const APP_VERSION_VAR: &str = "SPORTSBOOK_APP_VERSION";
pub const CONNECTION_TIMEOUT_VAR: &str = "SPORTSBOOK_CONNECTION_TIMEOUT_SECS";
pub const BLOCKER_GRACE_VAR: &str = "SPORTSBOOK_BLOCKER_GRACE_MS";
pub const OVERLAY_POLICY_VAR: &str = "SPORTSBOOK_OVERLAY_POLICY";

/// Load `.env.local` then `.env` from the repository root, if present.
pub fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

pub fn load_router_config() -> Result<RouterConfig, RouterError> {
    router_config_from(|name| std::env::var(name).ok())
}

/// Build the config from any variable lookup.
pub fn router_config_from<F>(lookup: F) -> Result<RouterConfig, RouterError>
where
    F: Fn(&str) -> Option<String>,
{
    let default_version: AppVersion = env!("CARGO_PKG_VERSION").parse()?;
    let app_version = match lookup(APP_VERSION_VAR) {
        Some(val) => match val.parse::<AppVersion>() {
            Ok(version) => version,
            Err(e) => {
                tracing::warn!(
                    val = %val,
                    error = %e,
                    "SPORTSBOOK_APP_VERSION is not a valid version, ignoring"
                );
                default_version
            }
        },
        None => default_version,
    };

    let mut config = RouterConfig::new(app_version);

    if let Some(val) = lookup(CONNECTION_TIMEOUT_VAR) {
        if let Ok(secs) = val.trim().parse::<u64>() {
            if (1..=600).contains(&secs) {
                config = config.with_connection_timeout(Duration::from_secs(secs));
                tracing::info!(
                    secs,
                    "Applied SPORTSBOOK_CONNECTION_TIMEOUT_SECS environment variable"
                );
            } else {
                tracing::warn!(
                    secs,
                    "SPORTSBOOK_CONNECTION_TIMEOUT_SECS out of range [1, 600], ignoring"
                );
            }
        } else {
            tracing::warn!(
                val = %val,
                "SPORTSBOOK_CONNECTION_TIMEOUT_SECS is not a valid u64, ignoring"
            );
        }
    }

    if let Some(val) = lookup(BLOCKER_GRACE_VAR) {
        if let Ok(ms) = val.trim().parse::<u64>() {
            if ms <= 60_000 {
                config = config.with_blocker_grace_period(Duration::from_millis(ms));
                tracing::info!(ms, "Applied SPORTSBOOK_BLOCKER_GRACE_MS environment variable");
            } else {
                tracing::warn!(ms, "SPORTSBOOK_BLOCKER_GRACE_MS out of range [0, 60000], ignoring");
            }
        } else {
            tracing::warn!(val = %val, "SPORTSBOOK_BLOCKER_GRACE_MS is not a valid u64, ignoring");
        }
    }

    if let Some(val) = lookup(OVERLAY_POLICY_VAR) {
        match val.parse::<OverlayPolicy>() {
            Ok(policy) => {
                if policy == OverlayPolicy::LastWriterWins {
                    tracing::warn!(
                        "Overlay policy set to last-writer-wins; blockers may be evicted"
                    );
                }
                config = config.with_overlay_policy(policy);
            }
            Err(e) => {
                tracing::warn!(error = %e, "SPORTSBOOK_OVERLAY_POLICY ignored");
            }
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::application::config::{DEFAULT_BLOCKER_GRACE_PERIOD, DEFAULT_CONNECTION_TIMEOUT};

    fn config_from(vars: &[(&str, &str)]) -> RouterConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        router_config_from(|name| vars.get(name).cloned()).unwrap()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = config_from(&[]);
        assert_eq!(config.app_version, env!("CARGO_PKG_VERSION").parse::<AppVersion>().unwrap());
        assert_eq!(config.connection_timeout, DEFAULT_CONNECTION_TIMEOUT);
        assert_eq!(config.blocker_grace_period, DEFAULT_BLOCKER_GRACE_PERIOD);
        assert_eq!(config.overlay_policy, OverlayPolicy::Prioritized);
    }

    #[test]
    fn test_applies_valid_variables() {
        let config = config_from(&[
            (APP_VERSION_VAR, "4.12.1"),
            (CONNECTION_TIMEOUT_VAR, "45"),
            (BLOCKER_GRACE_VAR, "500"),
            (OVERLAY_POLICY_VAR, "last-writer-wins"),
        ]);
        assert_eq!(config.app_version, "4.12.1".parse::<AppVersion>().unwrap());
        assert_eq!(config.connection_timeout, Duration::from_secs(45));
        assert_eq!(config.blocker_grace_period, Duration::from_millis(500));
        assert_eq!(config.overlay_policy, OverlayPolicy::LastWriterWins);
    }

    #[test]
    fn test_ignores_invalid_variables() {
        let config = config_from(&[
            (APP_VERSION_VAR, "latest"),
            (CONNECTION_TIMEOUT_VAR, "0"),
            (BLOCKER_GRACE_VAR, "soon"),
            (OVERLAY_POLICY_VAR, "random"),
        ]);
        assert_eq!(config.app_version, env!("CARGO_PKG_VERSION").parse::<AppVersion>().unwrap());
        assert_eq!(config.connection_timeout, DEFAULT_CONNECTION_TIMEOUT);
        assert_eq!(config.blocker_grace_period, DEFAULT_BLOCKER_GRACE_PERIOD);
        assert_eq!(config.overlay_policy, OverlayPolicy::Prioritized);
    }

    #[test]
    fn test_timeout_upper_bound() {
        let config = config_from(&[(CONNECTION_TIMEOUT_VAR, "601")]);
        assert_eq!(config.connection_timeout, DEFAULT_CONNECTION_TIMEOUT);
    }
}
