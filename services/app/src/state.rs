//! services/app/src/state.rs
//!
//! The application's composition root: one session manager and the two
//! ledgers, all reading and writing through the same record store.

use crate::adapters::FileStore;
use crate::config::Config;
use crate::ledger::{AppointmentLedger, PrescriptionLedger, SessionManager};
use crate::reference::DoctorDirectory;
use meditrack_core::ports::KeyValueStore;
use meditrack_core::store::RecordStore;
use std::sync::Arc;

pub struct App {
    pub sessions: SessionManager,
    pub appointments: AppointmentLedger,
    pub prescriptions: PrescriptionLedger,
}

impl App {
    /// Wires the application over the file-backed store named in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::with_store(Arc::new(FileStore::open(&config.data_path)))
    }

    /// Wires the application over any backing store.
    pub fn with_store(backing: Arc<dyn KeyValueStore>) -> Self {
        let store = RecordStore::new(backing);
        let directory = DoctorDirectory::standard();
        Self {
            sessions: SessionManager::new(store.clone()),
            appointments: AppointmentLedger::new(store.clone(), directory.clone()),
            prescriptions: PrescriptionLedger::new(store, directory),
        }
    }
}
