//! crates/meditrack_core/src/store.rs
//!
//! The record store: generic load/save of named collections as JSON arrays
//! over any [`KeyValueStore`] backing. The store performs no schema
//! validation; each ledger is responsible for the well-formedness of what it
//! writes.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::ports::{KeyValueStore, PortError, PortResult};

/// Well-known keys in the backing store.
pub mod collections {
    /// Array of registered users.
    pub const USERS: &str = "users";
    /// The single logged-in user record, absent when nobody is signed in.
    pub const SESSION: &str = "user";
    /// Array of appointments across all users.
    pub const APPOINTMENTS: &str = "appointments";
    /// Array of prescriptions across all users.
    pub const PRESCRIPTIONS: &str = "prescriptions";
}

/// Serializes typed record collections in and out of a key-value backing.
#[derive(Clone)]
pub struct RecordStore {
    backing: Arc<dyn KeyValueStore>,
}

impl RecordStore {
    pub fn new(backing: Arc<dyn KeyValueStore>) -> Self {
        Self { backing }
    }

    /// Loads a named collection.
    ///
    /// Returns an empty vector when nothing has been persisted under the key
    /// or when the stored text does not parse as the expected records; the
    /// caller always gets a usable collection.
    pub fn load<T: DeserializeOwned>(&self, collection: &str) -> PortResult<Vec<T>> {
        match self.backing.get(collection)? {
            Some(raw) => Ok(serde_json::from_str(&raw).unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    /// Overwrites a named collection in one write.
    ///
    /// The collection is serialized in full before anything touches the
    /// backing store, so a serialization failure aborts the save instead of
    /// leaving truncated data behind.
    pub fn save<T: Serialize>(&self, collection: &str, records: &[T]) -> PortResult<()> {
        let raw = serde_json::to_string(records)
            .map_err(|e| PortError::Serialization(e.to_string()))?;
        self.backing.set(collection, &raw)
    }

    /// Whether the key has ever been written, regardless of content.
    pub fn contains(&self, collection: &str) -> PortResult<bool> {
        self.backing.contains(collection)
    }

    /// Loads a single-object slot such as the session record.
    pub fn load_one<T: DeserializeOwned>(&self, key: &str) -> PortResult<Option<T>> {
        match self.backing.get(key)? {
            Some(raw) => Ok(serde_json::from_str(&raw).ok()),
            None => Ok(None),
        }
    }

    /// Overwrites a single-object slot.
    pub fn save_one<T: Serialize>(&self, key: &str, record: &T) -> PortResult<()> {
        let raw = serde_json::to_string(record)
            .map_err(|e| PortError::Serialization(e.to_string()))?;
        self.backing.set(key, &raw)
    }

    /// Removes a key outright.
    pub fn clear(&self, key: &str) -> PortResult<()> {
        self.backing.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Medicine, Prescription, PrescriptionStatus};
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Minimal in-process backing used to exercise the store in isolation.
    #[derive(Default)]
    struct MapStore {
        values: Mutex<HashMap<String, String>>,
    }

    impl KeyValueStore for MapStore {
        fn get(&self, key: &str) -> PortResult<Option<String>> {
            let values = self
                .values
                .lock()
                .map_err(|_| PortError::Unexpected("store lock poisoned".to_string()))?;
            Ok(values.get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> PortResult<()> {
            let mut values = self
                .values
                .lock()
                .map_err(|_| PortError::Unexpected("store lock poisoned".to_string()))?;
            values.insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> PortResult<()> {
            let mut values = self
                .values
                .lock()
                .map_err(|_| PortError::Unexpected("store lock poisoned".to_string()))?;
            values.remove(key);
            Ok(())
        }
    }

    fn record_store() -> RecordStore {
        RecordStore::new(Arc::new(MapStore::default()))
    }

    fn sample_prescription(id: i64) -> Prescription {
        Prescription {
            id,
            user_id: 7,
            doctor_id: 1,
            prescription_number: format!("RX-2025-{id:03}"),
            issue_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(),
            status: PrescriptionStatus::Active,
            medicines: vec![Medicine {
                name: "Lisinopril".to_string(),
                dosage: "10mg".to_string(),
                frequency: "Once daily".to_string(),
                instructions: "Take in the morning with food".to_string(),
            }],
            refills_remaining: 2,
            notes: "Monitor blood pressure weekly.".to_string(),
        }
    }

    #[test]
    fn load_of_an_absent_collection_is_empty() {
        let store = record_store();
        let loaded: Vec<Prescription> = store.load(collections::PRESCRIPTIONS).unwrap();
        assert!(loaded.is_empty());
        assert!(!store.contains(collections::PRESCRIPTIONS).unwrap());
    }

    #[test]
    fn save_then_load_round_trips_exactly() {
        let store = record_store();
        let records = vec![sample_prescription(1), sample_prescription(2)];

        store.save(collections::PRESCRIPTIONS, &records).unwrap();
        let loaded: Vec<Prescription> = store.load(collections::PRESCRIPTIONS).unwrap();

        assert_eq!(loaded, records);
    }

    #[test]
    fn corrupt_collection_text_reads_as_empty() {
        let store = record_store();
        store
            .backing
            .set(collections::PRESCRIPTIONS, "not json at all")
            .unwrap();

        let loaded: Vec<Prescription> = store.load(collections::PRESCRIPTIONS).unwrap();
        assert!(loaded.is_empty());
        // The key itself is still present, so seeding must not re-trigger.
        assert!(store.contains(collections::PRESCRIPTIONS).unwrap());
    }

    #[test]
    fn single_object_slot_round_trips_and_clears() {
        let store = record_store();
        let record = sample_prescription(9);

        store.save_one(collections::SESSION, &record).unwrap();
        let loaded: Option<Prescription> = store.load_one(collections::SESSION).unwrap();
        assert_eq!(loaded, Some(record));

        store.clear(collections::SESSION).unwrap();
        let cleared: Option<Prescription> = store.load_one(collections::SESSION).unwrap();
        assert!(cleared.is_none());
    }
}
