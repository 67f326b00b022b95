use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;
use super::{merge_fields, Identified};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "Id")]
    pub id: u32,
    pub patient_id: u32,
    pub doctor_id: u32,
    pub department: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub reason: String,
    #[serde(default)]
    pub notes: String,
    pub status: AppointmentStatus,
}

impl Appointment {
    pub(crate) fn from_new(id: u32, new: NewAppointment) -> Self {
        Self {
            id,
            patient_id: new.patient_id,
            doctor_id: new.doctor_id,
            department: new.department,
            date: new.date,
            time_slot: new.time_slot,
            reason: new.reason,
            notes: new.notes,
            status: AppointmentStatus::Scheduled,
        }
    }

    pub fn apply(&mut self, patch: AppointmentPatch) {
        merge_fields!(self, patch, {
            patient_id,
            doctor_id,
            department,
            date,
            time_slot,
            reason,
            notes,
            status,
        });
    }
}

impl Identified for Appointment {
    fn id(&self) -> u32 {
        self.id
    }
}

/// Booking input. The store assigns the identifier and always starts at Scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub patient_id: u32,
    pub doctor_id: u32,
    pub department: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub reason: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppointmentPatch {
    pub patient_id: Option<u32>,
    pub doctor_id: Option<u32>,
    pub department: Option<String>,
    pub date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentPatch {
    /// Patch that only moves the status.
    pub fn status(status: AppointmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Appointment joined with display names at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub doctor_name: String,
    /// Absent for per-patient listings, where the patient is already known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn new_appointment(patient_id: u32, doctor_id: u32, date: NaiveDate) -> NewAppointment {
        NewAppointment {
            patient_id,
            doctor_id,
            department: "Cardiology".into(),
            date,
            time_slot: "10:00 AM".into(),
            reason: "Follow-up".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn from_new_starts_scheduled() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let apt = Appointment::from_new(3, new_appointment(1, 2, date));
        assert_eq!(apt.id, 3);
        assert_eq!(apt.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn status_patch_leaves_schedule_alone() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let mut apt = Appointment::from_new(1, new_appointment(1, 2, date));
        apt.apply(AppointmentPatch::status(AppointmentStatus::Completed));
        assert_eq!(apt.status, AppointmentStatus::Completed);
        assert_eq!(apt.date, date);
        assert_eq!(apt.time_slot, "10:00 AM");
    }

    #[test]
    fn view_serializes_flat_and_omits_missing_patient_name() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let view = AppointmentView {
            appointment: Appointment::from_new(1, new_appointment(4, 2, date)),
            doctor_name: "Dr. Rao".into(),
            patient_name: None,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["Id"], 1);
        assert_eq!(json["patientId"], 4);
        assert_eq!(json["date"], "2024-05-02");
        assert_eq!(json["doctorName"], "Dr. Rao");
        assert!(json.get("patientName").is_none());
    }
}
