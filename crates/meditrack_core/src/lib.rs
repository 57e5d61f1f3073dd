pub mod domain;
pub mod ports;
pub mod store;
pub mod validation;

pub use domain::{
    next_record_id, Appointment, AppointmentStatus, Doctor, Gender, Medicine, NewUser,
    Prescription, PrescriptionStatus, User,
};
pub use ports::{KeyValueStore, PortError, PortResult};
pub use store::{collections, RecordStore};
pub use validation::{PasswordStrength, ValidationError};
