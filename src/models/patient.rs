use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{BloodGroup, Gender, PatientStatus};
use super::{merge_fields, Identified};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    #[serde(default)]
    pub relationship: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(rename = "Id")]
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub address: String,
    pub blood_group: BloodGroup,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub emergency_contact: EmergencyContact,
    #[serde(default)]
    pub medical_history: String,
    pub current_department: String,
    pub admission_date: NaiveDate,
    pub status: PatientStatus,
}

impl Patient {
    /// "First Last", as shown next to appointments.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub(crate) fn from_new(id: u32, new: NewPatient) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            date_of_birth: new.date_of_birth,
            gender: new.gender,
            phone: new.phone,
            email: new.email,
            address: new.address,
            blood_group: new.blood_group,
            allergies: new.allergies,
            emergency_contact: new.emergency_contact,
            medical_history: new.medical_history,
            current_department: new.current_department,
            admission_date: new.admission_date,
            status: PatientStatus::Active,
        }
    }

    /// Shallow merge: fields present in the patch overwrite, the rest stay.
    pub fn apply(&mut self, patch: PatientPatch) {
        merge_fields!(self, patch, {
            first_name,
            last_name,
            date_of_birth,
            gender,
            phone,
            email,
            address,
            blood_group,
            allergies,
            emergency_contact,
            medical_history,
            current_department,
            admission_date,
            status,
        });
    }

    /// Case-insensitive match on names and email, literal match on phone.
    ///
    /// `lowered` must be `query.to_lowercase()`; callers compute it once per search.
    pub(crate) fn matches_query(&self, query: &str, lowered: &str) -> bool {
        self.first_name.to_lowercase().contains(lowered)
            || self.last_name.to_lowercase().contains(lowered)
            || self.email.to_lowercase().contains(lowered)
            || self.phone.contains(query)
    }
}

impl Identified for Patient {
    fn id(&self) -> u32 {
        self.id
    }
}

/// Registration input. Any `Id` or `status` in JSON input is ignored;
/// the store assigns the identifier and starts every patient as Active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub address: String,
    pub blood_group: BloodGroup,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub emergency_contact: EmergencyContact,
    #[serde(default)]
    pub medical_history: String,
    pub current_department: String,
    pub admission_date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub allergies: Option<Vec<String>>,
    pub emergency_contact: Option<EmergencyContact>,
    pub medical_history: Option<String>,
    pub current_department: Option<String>,
    pub admission_date: Option<NaiveDate>,
    pub status: Option<PatientStatus>,
}
