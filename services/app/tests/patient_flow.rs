//! End-to-end walk through the patient journey: register, sign in, book and
//! manage appointments, browse prescriptions, request a refill, sign out.
//! Everything runs against an in-memory profile.

use app_lib::adapters::MemoryStore;
use app_lib::ledger::{BookingRequest, PrescriptionFilter, RescheduleRequest};
use app_lib::{App, AppError};
use chrono::{Days, Local};
use meditrack_core::domain::{AppointmentStatus, Gender, NewUser, PrescriptionStatus};
use std::sync::Arc;

fn fresh_app() -> App {
    App::with_store(Arc::new(MemoryStore::new()))
}

fn jane() -> NewUser {
    NewUser {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        password: "Sunny4ever".to_string(),
        age: 34,
        gender: Gender::Female,
        phone: "5551234567".to_string(),
    }
}

#[test]
fn full_patient_journey() -> Result<(), AppError> {
    let app = fresh_app();

    // Registration and sign-in.
    let registered = app.sessions.register(jane())?;
    assert!(!app.sessions.is_logged_in());
    let user = app.sessions.login("jane@example.com", "Sunny4ever")?;
    assert_eq!(user.id, registered.id);

    // Book a visit next week and find it under "upcoming".
    let next_week = Local::now()
        .date_naive()
        .checked_add_days(Days::new(7))
        .expect("date in range");
    let booked = app.appointments.book(
        user.id,
        BookingRequest {
            doctor_id: 2,
            date: next_week,
            time: "10:00 AM".to_string(),
            reason: "Skin rash".to_string(),
        },
    )?;
    let schedule = app.appointments.list_for_user(user.id)?;
    assert_eq!(schedule.upcoming.len(), 1);
    assert!(schedule.past.is_empty());

    // Move it, then cancel the replacement twice; the second cancel is a
    // quiet success.
    let moved = app.appointments.reschedule(
        booked.id,
        RescheduleRequest {
            doctor_id: None,
            date: next_week,
            time: "02:30 PM".to_string(),
            reason: None,
        },
    )?;
    assert_eq!(moved.doctor_id, 2);
    app.appointments.cancel(moved.id)?;
    let again = app.appointments.cancel(moved.id)?;
    assert_eq!(again.status, AppointmentStatus::Cancelled);

    let schedule = app.appointments.list_for_user(user.id)?;
    assert!(schedule.upcoming.is_empty());
    assert_eq!(schedule.past.len(), 2);

    // A brand-new profile gets the demo prescriptions on first browse.
    let prescriptions = app
        .prescriptions
        .list_for_user(user.id, &PrescriptionFilter::default())?;
    assert_eq!(prescriptions.len(), 3);

    // One refill consumed; the active prescription keeps its status.
    let refilled = app.prescriptions.request_refill(1)?;
    assert_eq!(refilled.refills_remaining, 1);
    assert_eq!(refilled.status, PrescriptionStatus::Active);

    // Filtered browse still sees the dermatology prescription.
    let from_wilson = app
        .prescriptions
        .list_for_user(user.id, &PrescriptionFilter::search("wilson"))?;
    assert_eq!(from_wilson.len(), 1);
    assert_eq!(from_wilson[0].prescription_number, "RX-2025-105");

    // Sign out.
    app.sessions.logout()?;
    assert!(app.sessions.current_user().is_none());
    Ok(())
}

#[test]
fn second_registration_with_a_used_email_is_rejected() {
    let app = fresh_app();
    app.sessions.register(jane()).expect("first registration");

    let mut same_email = jane();
    same_email.name = "Janet Doe".to_string();
    let result = app.sessions.register(same_email);

    assert!(result.is_err());
}
