//! services/app/src/telemetry.rs
//!
//! Tracing setup for embedding applications. Installs a registry with an
//! env-filter and a fmt layer; calling it again once a subscriber is set is
//! a no-op.

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn init(level: Level) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok();
}
