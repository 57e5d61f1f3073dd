pub mod appointments;
pub mod prescriptions;
pub mod session;

pub use appointments::{
    earliest_bookable_date, AppointmentLedger, AppointmentSchedule, BookingError, BookingRequest,
    RescheduleRequest,
};
pub use prescriptions::{PrescriptionFilter, PrescriptionLedger, RefillError};
pub use session::{AuthError, SessionManager};
