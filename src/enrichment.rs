//! Read-time joins between collections.
//!
//! Nothing computed here is ever written back; a dangling reference
//! resolves to [`UNKNOWN`] rather than an error.

use crate::models::{
    Appointment, AppointmentView, Department, DepartmentView, Doctor, Patient,
};

/// Label used when a referenced doctor or patient no longer exists.
pub const UNKNOWN: &str = "Unknown";

/// Whole-percent occupancy, rounded half up. An empty ward reports 0.
pub fn occupancy_rate(occupied_beds: u32, total_beds: u32) -> u32 {
    if total_beds == 0 {
        return 0;
    }
    (f64::from(occupied_beds) / f64::from(total_beds) * 100.0).round() as u32
}

pub fn doctor_name(doctors: &[Doctor], doctor_id: u32) -> String {
    doctors
        .iter()
        .find(|d| d.id == doctor_id)
        .map(|d| d.name.clone())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn patient_name(patients: &[Patient], patient_id: u32) -> String {
    patients
        .iter()
        .find(|p| p.id == patient_id)
        .map(Patient::full_name)
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Attach the doctor name, and the patient name when `patients` is given.
pub fn appointment_view(
    appointment: &Appointment,
    doctors: &[Doctor],
    patients: Option<&[Patient]>,
) -> AppointmentView {
    AppointmentView {
        appointment: appointment.clone(),
        doctor_name: doctor_name(doctors, appointment.doctor_id),
        patient_name: patients.map(|p| patient_name(p, appointment.patient_id)),
    }
}

pub fn department_view(department: &Department, doctors: &[Doctor]) -> DepartmentView {
    DepartmentView {
        department: department.clone(),
        head_doctor_name: doctor_name(doctors, department.head_doctor_id),
        occupancy_rate: occupancy_rate(department.occupied_beds, department.total_beds),
    }
}
