//! services/app/src/error.rs
//!
//! Defines the primary error type for the application layer.

use crate::config::ConfigError;
use crate::ledger::appointments::BookingError;
use crate::ledger::prescriptions::RefillError;
use crate::ledger::session::AuthError;
use meditrack_core::ports::PortError;

/// The primary error type for the `app` crate.
///
/// None of these are fatal: every failure path leaves previously persisted
/// state unchanged and hands a message back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from the storage port.
    #[error("Storage error: {0}")]
    Port(#[from] PortError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Refill(#[from] RefillError),

    /// Represents a standard Input/Output error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}
