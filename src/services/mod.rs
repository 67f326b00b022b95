//! Access API: one service per entity, all backed by the same store.

pub mod appointments;
pub mod departments;
pub mod doctors;
pub mod patients;

pub use appointments::AppointmentService;
pub use departments::DepartmentService;
pub use doctors::DoctorService;
pub use patients::PatientService;
