//! crates/meditrack_core/src/ports.rs
//!
//! Defines the storage contract (trait) for the application's core logic.
//! The trait forms the boundary of the hexagonal architecture, allowing the
//! core to be independent of where the records actually live.

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific failures of a concrete backing store.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Failed to serialize records: {0}")]
    Serialization(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Storage Port (Trait)
//=========================================================================================

/// A flat key-value store holding JSON text, one value per named key.
///
/// This is the browser-profile storage contract: a handful of well-known keys
/// (`users`, `user`, `appointments`, `prescriptions`), each read and written
/// whole in a single synchronous call. Writes are last-write-wins; two
/// processes sharing the same store are not coordinated.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> PortResult<Option<String>>;

    /// Overwrites the whole value for `key` in one synchronous write.
    fn set(&self, key: &str, value: &str) -> PortResult<()>;

    fn remove(&self, key: &str) -> PortResult<()>;

    /// Whether the key has ever been written. Distinguishes an absent
    /// collection (which triggers demo seeding) from an empty one.
    fn contains(&self, key: &str) -> PortResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
