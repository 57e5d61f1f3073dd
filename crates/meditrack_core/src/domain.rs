//! crates/meditrack_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any backing store; the serde derives only
//! pin the camelCase key layout the persisted JSON uses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Generates a fresh record id for a collection.
///
/// Ids are Unix-epoch milliseconds at creation time. When a record was already
/// created within the same millisecond, the new id is bumped one past the
/// collection's current maximum so ids stay unique and monotonic.
pub fn next_record_id<I>(existing: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    let now = Utc::now().timestamp_millis();
    match existing.into_iter().max() {
        Some(max) if max >= now => max + 1,
        _ => now,
    }
}

/// Represents a registered patient account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Salted Argon2 hash in PHC string format. Only the session manager
    /// reads or writes this field.
    pub password_hash: String,
    pub age: u32,
    pub gender: Gender,
    pub phone: String,
    pub registered_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

// Only used on the way into registration - carries the raw password and is
// never persisted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: u32,
    pub gender: Gender,
    pub phone: String,
}

/// A booked visit with one of the reference-table doctors.
///
/// Cancelled appointments are kept for history; the record only ever mutates
/// by flipping `status` to `Cancelled`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub user_id: i64,
    pub doctor_id: i64,
    pub date: NaiveDate,
    /// One of the enumerated booking slots, e.g. `"10:00 AM"`.
    pub time: String,
    pub reason: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// An appointment counts as upcoming on `today` when its date has not
    /// passed and it has not been cancelled. Time of day is ignored.
    pub fn is_upcoming_on(&self, today: NaiveDate) -> bool {
        self.date >= today && self.status != AppointmentStatus::Cancelled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Confirmed => write!(f, "Confirmed"),
            AppointmentStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A prescription issued by one of the reference-table doctors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: i64,
    pub user_id: i64,
    pub doctor_id: i64,
    pub prescription_number: String,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: PrescriptionStatus,
    pub medicines: Vec<Medicine>,
    pub refills_remaining: u32,
    pub notes: String,
}

/// Status is assigned by the external prescribing workflow. Refill requests
/// decrement `refills_remaining` without moving it; there is no enforced
/// transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrescriptionStatus {
    Active,
    Expired,
    Refill,
}

impl fmt::Display for PrescriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrescriptionStatus::Active => write!(f, "Active"),
            PrescriptionStatus::Expired => write!(f, "Expired"),
            PrescriptionStatus::Refill => write!(f, "Needs Refill"),
        }
    }
}

/// One line item on a prescription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub instructions: String,
}

/// An entry in the read-only doctor reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialization: String,
    pub image_url: String,
}

impl fmt::Display for Doctor {
    /// The selector label used wherever a doctor is shown to the patient.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.specialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_appointment(date: NaiveDate, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: 1,
            user_id: 7,
            doctor_id: 2,
            date,
            time: "10:00 AM".to_string(),
            reason: "Checkup".to_string(),
            status,
            created_at: Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn ids_are_monotonic_within_a_collection() {
        let first = next_record_id(std::iter::empty());
        let second = next_record_id([first]);
        let third = next_record_id([first, second]);
        assert!(second > first);
        assert!(third > second);
    }

    #[test]
    fn id_generation_ignores_stale_maxima() {
        // A collection whose newest record is years old still gets a
        // timestamp-derived id, not old-max-plus-one.
        let id = next_record_id([1_600_000_000_000]);
        assert!(id > 1_600_000_000_000 + 1);
    }

    #[test]
    fn upcoming_requires_future_date_and_live_status() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        let tomorrow = today.succ_opt().unwrap();
        let yesterday = today.pred_opt().unwrap();

        assert!(sample_appointment(today, AppointmentStatus::Confirmed).is_upcoming_on(today));
        assert!(sample_appointment(tomorrow, AppointmentStatus::Confirmed).is_upcoming_on(today));
        assert!(!sample_appointment(yesterday, AppointmentStatus::Confirmed).is_upcoming_on(today));
        assert!(!sample_appointment(tomorrow, AppointmentStatus::Cancelled).is_upcoming_on(today));
    }

    #[test]
    fn persisted_appointment_uses_camel_case_keys() {
        let appointment = sample_appointment(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            AppointmentStatus::Confirmed,
        );
        let json = serde_json::to_value(&appointment).unwrap();

        assert_eq!(json["userId"], 7);
        assert_eq!(json["doctorId"], 2);
        assert_eq!(json["status"], "confirmed");
        assert_eq!(json["date"], "2025-06-01");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn status_labels_match_the_patient_facing_wording() {
        assert_eq!(PrescriptionStatus::Refill.to_string(), "Needs Refill");
        assert_eq!(PrescriptionStatus::Active.to_string(), "Active");
        assert_eq!(AppointmentStatus::Cancelled.to_string(), "Cancelled");
    }
}
