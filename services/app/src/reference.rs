//! services/app/src/reference.rs
//!
//! Read-only reference tables: the doctors a patient can book and the
//! enumerated booking slots. Both are fixed; records refer to doctors by id.

use meditrack_core::domain::Doctor;

/// The bookable half-hour slots, morning and afternoon, in display order.
pub const TIME_SLOTS: [&str; 14] = [
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM",
    "11:00 AM", "11:30 AM", "01:00 PM", "01:30 PM",
    "02:00 PM", "02:30 PM", "03:00 PM", "03:30 PM",
    "04:00 PM", "04:30 PM",
];

pub fn is_bookable_slot(time: &str) -> bool {
    TIME_SLOTS.contains(&time)
}

/// The read-only doctor table, looked up by id from appointment and
/// prescription records.
#[derive(Debug, Clone)]
pub struct DoctorDirectory {
    doctors: Vec<Doctor>,
}

impl DoctorDirectory {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self { doctors }
    }

    /// The clinic's five practicing doctors.
    pub fn standard() -> Self {
        let entry = |id: i64, name: &str, specialization: &str, image_url: &str| Doctor {
            id,
            name: name.to_string(),
            specialization: specialization.to_string(),
            image_url: image_url.to_string(),
        };
        Self::new(vec![
            entry(
                1,
                "Dr. Sarah Johnson",
                "Cardiologist",
                "https://images.pexels.com/photos/5452201/pexels-photo-5452201.jpeg",
            ),
            entry(
                2,
                "Dr. James Wilson",
                "Dermatologist",
                "https://images.pexels.com/photos/5215024/pexels-photo-5215024.jpeg",
            ),
            entry(
                3,
                "Dr. Emily Chen",
                "Pediatrician",
                "https://images.pexels.com/photos/5327585/pexels-photo-5327585.jpeg",
            ),
            entry(
                4,
                "Dr. Michael Brown",
                "Neurologist",
                "https://images.pexels.com/photos/4173239/pexels-photo-4173239.jpeg",
            ),
            entry(
                5,
                "Dr. Patricia Lee",
                "Orthopedic Surgeon",
                "https://images.pexels.com/photos/5407206/pexels-photo-5407206.jpeg",
            ),
        ])
    }

    pub fn find(&self, id: i64) -> Option<&Doctor> {
        self.doctors.iter().find(|doctor| doctor.id == id)
    }

    pub fn all(&self) -> &[Doctor] {
        &self.doctors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_holds_the_five_doctors_in_order() {
        let directory = DoctorDirectory::standard();
        assert_eq!(directory.all().len(), 5);
        assert_eq!(directory.all()[0].specialization, "Cardiologist");
        assert_eq!(
            directory.find(3).map(|d| d.name.as_str()),
            Some("Dr. Emily Chen")
        );
        assert!(directory.find(6).is_none());
    }

    #[test]
    fn doctor_labels_read_name_dash_specialization() {
        let directory = DoctorDirectory::standard();
        let doctor = directory.find(5).unwrap();
        assert_eq!(doctor.to_string(), "Dr. Patricia Lee - Orthopedic Surgeon");
    }

    #[test]
    fn slot_lookup_is_exact() {
        assert!(is_bookable_slot("09:00 AM"));
        assert!(is_bookable_slot("04:30 PM"));
        assert!(!is_bookable_slot("12:00 PM")); // lunch break, never bookable
        assert!(!is_bookable_slot("9:00 AM"));
        assert_eq!(TIME_SLOTS.len(), 14);
    }
}
