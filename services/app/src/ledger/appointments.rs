//! services/app/src/ledger/appointments.rs
//!
//! The appointment ledger: booking, partitioned listing, cancellation, and
//! rescheduling, scoped to one patient. Cancelled records are never deleted;
//! they stay in the collection as history.

use chrono::{Local, NaiveDate, Utc};
use meditrack_core::domain::{next_record_id, Appointment, AppointmentStatus, User};
use meditrack_core::ports::{PortError, PortResult};
use meditrack_core::store::{collections, RecordStore};
use tracing::info;

use crate::reference::{is_bookable_slot, DoctorDirectory};

//=========================================================================================
// Errors and request/response types
//=========================================================================================

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// The patient id does not refer to a registered account.
    #[error("No registered patient with id {0}")]
    UnknownUser(i64),

    /// The doctor id is not in the reference table.
    #[error("Unknown doctor id {0}")]
    UnknownDoctor(i64),

    /// The requested time is not one of the bookable slots.
    #[error("'{0}' is not a bookable time slot")]
    UnknownTimeSlot(String),

    #[error("No appointment with id {0}")]
    NotFound(i64),

    #[error(transparent)]
    Port(#[from] PortError),
}

/// A booking as it arrives from the appointment form.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub time: String,
    pub reason: String,
}

/// A replacement booking. Omitted fields are carried over from the
/// appointment being rescheduled.
#[derive(Debug, Clone)]
pub struct RescheduleRequest {
    pub doctor_id: Option<i64>,
    pub date: NaiveDate,
    pub time: String,
    pub reason: Option<String>,
}

/// A patient's appointments, split the way the appointments screen shows
/// them. Insertion order is preserved within each half.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentSchedule {
    pub upcoming: Vec<Appointment>,
    pub past: Vec<Appointment>,
}

/// The soonest date the booking form accepts: tomorrow.
pub fn earliest_bookable_date(today: NaiveDate) -> NaiveDate {
    today.succ_opt().unwrap_or(today)
}

//=========================================================================================
// AppointmentLedger
//=========================================================================================

pub struct AppointmentLedger {
    store: RecordStore,
    directory: DoctorDirectory,
}

impl AppointmentLedger {
    pub fn new(store: RecordStore, directory: DoctorDirectory) -> Self {
        Self { store, directory }
    }

    /// Partitions the patient's appointments around the local calendar date.
    pub fn list_for_user(&self, user_id: i64) -> PortResult<AppointmentSchedule> {
        self.list_for_user_as_of(user_id, Local::now().date_naive())
    }

    /// Same as [`list_for_user`](Self::list_for_user) with the reference date
    /// supplied by the caller, for deterministic evaluation.
    pub fn list_for_user_as_of(
        &self,
        user_id: i64,
        today: NaiveDate,
    ) -> PortResult<AppointmentSchedule> {
        let appointments: Vec<Appointment> = self.store.load(collections::APPOINTMENTS)?;
        let mut schedule = AppointmentSchedule::default();
        for appointment in appointments
            .into_iter()
            .filter(|appointment| appointment.user_id == user_id)
        {
            if appointment.is_upcoming_on(today) {
                schedule.upcoming.push(appointment);
            } else {
                schedule.past.push(appointment);
            }
        }
        Ok(schedule)
    }

    /// Books a confirmed appointment for the patient.
    ///
    /// Several patients may hold the same doctor, date, and time; slot
    /// capacity is not enforced here.
    pub fn book(&self, user_id: i64, request: BookingRequest) -> Result<Appointment, BookingError> {
        // 1. Resolve every reference before anything is written.
        self.ensure_valid(user_id, request.doctor_id, &request.time)?;

        // 2. Append the confirmed record and persist.
        let mut appointments: Vec<Appointment> = self.store.load(collections::APPOINTMENTS)?;
        let appointment = Appointment {
            id: next_record_id(appointments.iter().map(|a| a.id)),
            user_id,
            doctor_id: request.doctor_id,
            date: request.date,
            time: request.time,
            reason: request.reason,
            status: AppointmentStatus::Confirmed,
            created_at: Utc::now(),
        };
        appointments.push(appointment.clone());
        self.store.save(collections::APPOINTMENTS, &appointments)?;

        info!(
            appointment_id = appointment.id,
            user_id,
            doctor_id = appointment.doctor_id,
            "booked appointment"
        );
        Ok(appointment)
    }

    /// Cancels an appointment in place.
    ///
    /// Cancelling an appointment that is already cancelled succeeds without
    /// touching the collection, so repeated cancel clicks are harmless.
    pub fn cancel(&self, appointment_id: i64) -> Result<Appointment, BookingError> {
        let mut appointments: Vec<Appointment> = self.store.load(collections::APPOINTMENTS)?;
        let appointment = appointments
            .iter_mut()
            .find(|appointment| appointment.id == appointment_id)
            .ok_or(BookingError::NotFound(appointment_id))?;

        if appointment.status == AppointmentStatus::Cancelled {
            return Ok(appointment.clone());
        }

        appointment.status = AppointmentStatus::Cancelled;
        let cancelled = appointment.clone();
        self.store.save(collections::APPOINTMENTS, &appointments)?;

        info!(appointment_id, "cancelled appointment");
        Ok(cancelled)
    }

    /// Replaces an appointment with a new booking in one step.
    ///
    /// The replacement is fully validated before anything is written, and the
    /// cancellation of the old record is committed together with the append
    /// of the new one. A rejected reschedule leaves the original booking
    /// exactly as it was.
    pub fn reschedule(
        &self,
        appointment_id: i64,
        request: RescheduleRequest,
    ) -> Result<Appointment, BookingError> {
        let mut appointments: Vec<Appointment> = self.store.load(collections::APPOINTMENTS)?;
        let position = appointments
            .iter()
            .position(|appointment| appointment.id == appointment_id)
            .ok_or(BookingError::NotFound(appointment_id))?;
        let original = appointments[position].clone();

        let doctor_id = request.doctor_id.unwrap_or(original.doctor_id);
        let reason = request.reason.unwrap_or_else(|| original.reason.clone());
        self.ensure_valid(original.user_id, doctor_id, &request.time)?;

        let replacement = Appointment {
            id: next_record_id(appointments.iter().map(|a| a.id)),
            user_id: original.user_id,
            doctor_id,
            date: request.date,
            time: request.time,
            reason,
            status: AppointmentStatus::Confirmed,
            created_at: Utc::now(),
        };
        appointments[position].status = AppointmentStatus::Cancelled;
        appointments.push(replacement.clone());
        self.store.save(collections::APPOINTMENTS, &appointments)?;

        info!(
            cancelled_id = appointment_id,
            replacement_id = replacement.id,
            "rescheduled appointment"
        );
        Ok(replacement)
    }

    fn ensure_valid(&self, user_id: i64, doctor_id: i64, time: &str) -> Result<(), BookingError> {
        let users: Vec<User> = self.store.load(collections::USERS)?;
        if !users.iter().any(|user| user.id == user_id) {
            return Err(BookingError::UnknownUser(user_id));
        }
        if self.directory.find(doctor_id).is_none() {
            return Err(BookingError::UnknownDoctor(doctor_id));
        }
        if !is_bookable_slot(time) {
            return Err(BookingError::UnknownTimeSlot(time.to_string()));
        }
        Ok(())
    }
}
