//! services/app/src/ledger/prescriptions.rs
//!
//! The prescription ledger: filtered browsing, detail lookup, and refill
//! requests. Prescriptions are issued by an external prescribing workflow;
//! this module never creates one except for the demo records seeded into a
//! brand-new profile.

use meditrack_core::domain::{Medicine, Prescription, PrescriptionStatus};
use meditrack_core::ports::{PortError, PortResult};
use meditrack_core::store::{collections, RecordStore};
use tracing::info;

use crate::reference::DoctorDirectory;

//=========================================================================================
// Errors and filter type
//=========================================================================================

#[derive(Debug, thiserror::Error)]
pub enum RefillError {
    /// The prescription is already marked for refill; the request is
    /// informational, nothing changed.
    #[error("Refill request already submitted. We will notify you when it's ready.")]
    AlreadyRequested,

    #[error("No refills remaining. Please contact your doctor for a new prescription.")]
    NoRefillsRemaining,

    #[error("No prescription with id {0}")]
    NotFound(i64),

    #[error(transparent)]
    Port(#[from] PortError),
}

/// The browse screen's search and status controls.
#[derive(Debug, Clone, Default)]
pub struct PrescriptionFilter {
    /// Case-insensitive substring matched against medicine names, the
    /// prescription number, and the prescribing doctor's name; any one match
    /// keeps the record.
    pub search: Option<String>,
    /// Exact status match when set.
    pub status: Option<PrescriptionStatus>,
}

impl PrescriptionFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn status(status: PrescriptionStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

//=========================================================================================
// PrescriptionLedger
//=========================================================================================

pub struct PrescriptionLedger {
    store: RecordStore,
    directory: DoctorDirectory,
}

impl PrescriptionLedger {
    pub fn new(store: RecordStore, directory: DoctorDirectory) -> Self {
        Self { store, directory }
    }

    /// Lists a patient's prescriptions in stored order, filtered.
    ///
    /// The very first read of a profile that has never held a prescriptions
    /// collection seeds the demo records, owned by the requesting patient. A
    /// collection that exists but is empty stays empty.
    pub fn list_for_user(
        &self,
        user_id: i64,
        filter: &PrescriptionFilter,
    ) -> PortResult<Vec<Prescription>> {
        let prescriptions = self.load_or_seed(user_id)?;
        let mut result: Vec<Prescription> = prescriptions
            .into_iter()
            .filter(|prescription| prescription.user_id == user_id)
            .collect();

        if let Some(term) = filter.search.as_deref().filter(|term| !term.is_empty()) {
            let term = term.to_lowercase();
            result.retain(|prescription| self.matches_search(prescription, &term));
        }

        if let Some(status) = filter.status {
            result.retain(|prescription| prescription.status == status);
        }

        Ok(result)
    }

    pub fn get_details(&self, prescription_id: i64) -> Result<Prescription, RefillError> {
        let prescriptions: Vec<Prescription> = self.store.load(collections::PRESCRIPTIONS)?;
        prescriptions
            .into_iter()
            .find(|prescription| prescription.id == prescription_id)
            .ok_or(RefillError::NotFound(prescription_id))
    }

    /// Handles a patient's refill request.
    ///
    /// A prescription already marked `refill` reports [`RefillError::AlreadyRequested`]
    /// and stays untouched. Otherwise a remaining refill is consumed and
    /// persisted; with none left the request is [`RefillError::NoRefillsRemaining`].
    pub fn request_refill(&self, prescription_id: i64) -> Result<Prescription, RefillError> {
        let mut prescriptions: Vec<Prescription> = self.store.load(collections::PRESCRIPTIONS)?;
        let prescription = prescriptions
            .iter_mut()
            .find(|prescription| prescription.id == prescription_id)
            .ok_or(RefillError::NotFound(prescription_id))?;

        if prescription.status == PrescriptionStatus::Refill {
            return Err(RefillError::AlreadyRequested);
        }
        if prescription.refills_remaining == 0 {
            return Err(RefillError::NoRefillsRemaining);
        }

        // The count goes down but status stays put: status belongs to the
        // prescribing workflow, so refills_remaining and a `refill` status
        // can drift apart. Known gap, documented in DESIGN.md.
        prescription.refills_remaining -= 1;
        let updated = prescription.clone();
        self.store.save(collections::PRESCRIPTIONS, &prescriptions)?;

        info!(
            prescription_id,
            refills_remaining = updated.refills_remaining,
            "refill requested"
        );
        Ok(updated)
    }

    fn load_or_seed(&self, user_id: i64) -> PortResult<Vec<Prescription>> {
        if !self.store.contains(collections::PRESCRIPTIONS)? {
            let seeded = demo_prescriptions(user_id);
            self.store.save(collections::PRESCRIPTIONS, &seeded)?;
            info!(user_id, "seeded demo prescriptions for a new profile");
            return Ok(seeded);
        }
        self.store.load(collections::PRESCRIPTIONS)
    }

    fn matches_search(&self, prescription: &Prescription, term: &str) -> bool {
        let medicine_match = prescription
            .medicines
            .iter()
            .any(|medicine| medicine.name.to_lowercase().contains(term));
        let number_match = prescription
            .prescription_number
            .to_lowercase()
            .contains(term);
        let doctor_match = self
            .directory
            .find(prescription.doctor_id)
            .is_some_and(|doctor| doctor.name.to_lowercase().contains(term));
        medicine_match || number_match || doctor_match
    }
}

//=========================================================================================
// Demo data
//=========================================================================================

/// The three sample prescriptions a brand-new profile starts with.
pub fn demo_prescriptions(user_id: i64) -> Vec<Prescription> {
    let date = |y: i32, m: u32, d: u32| {
        chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    };
    let medicine = |name: &str, dosage: &str, frequency: &str, instructions: &str| Medicine {
        name: name.to_string(),
        dosage: dosage.to_string(),
        frequency: frequency.to_string(),
        instructions: instructions.to_string(),
    };

    vec![
        Prescription {
            id: 1,
            user_id,
            doctor_id: 1,
            prescription_number: "RX-2025-001".to_string(),
            issue_date: date(2025, 1, 15),
            expiry_date: date(2025, 7, 15),
            status: PrescriptionStatus::Active,
            medicines: vec![
                medicine(
                    "Lisinopril",
                    "10mg",
                    "Once daily",
                    "Take in the morning with food",
                ),
                medicine("Atorvastatin", "20mg", "Once daily", "Take at bedtime"),
            ],
            refills_remaining: 2,
            notes: "Monitor blood pressure weekly. Report any dizziness.".to_string(),
        },
        Prescription {
            id: 2,
            user_id,
            doctor_id: 3,
            prescription_number: "RX-2025-042".to_string(),
            issue_date: date(2025, 2, 10),
            expiry_date: date(2025, 3, 10),
            status: PrescriptionStatus::Expired,
            medicines: vec![medicine(
                "Amoxicillin",
                "500mg",
                "Three times daily",
                "Take with meals. Complete full course.",
            )],
            refills_remaining: 0,
            notes: "For bacterial infection. Contact if symptoms persist after 7 days."
                .to_string(),
        },
        Prescription {
            id: 3,
            user_id,
            doctor_id: 2,
            prescription_number: "RX-2025-105".to_string(),
            issue_date: date(2025, 3, 5),
            expiry_date: date(2025, 9, 5),
            status: PrescriptionStatus::Refill,
            medicines: vec![
                medicine(
                    "Tretinoin Cream",
                    "0.025%",
                    "Once daily",
                    "Apply a pea-sized amount to affected areas at bedtime",
                ),
                medicine(
                    "Clindamycin Phosphate",
                    "1%",
                    "Twice daily",
                    "Apply to affected areas in the morning and evening",
                ),
            ],
            refills_remaining: 0,
            notes: "May cause skin dryness. Use sunscreen during the day.".to_string(),
        },
    ]
}
