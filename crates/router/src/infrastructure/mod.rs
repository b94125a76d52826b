//! Infrastructure layer - Adapters between the host and the router

pub mod env_config;
pub mod feeds;
pub mod route_parser;
pub mod tracing_adapters;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use feeds::ConditionFeeds;
pub use route_parser::{parse_deep_link, parse_notification_payload, redirect_params};
