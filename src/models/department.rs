use serde::{Deserialize, Serialize};

use super::{merge_fields, Identified};

/// Departments are a fixed fixture set: they can be updated, never created or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(rename = "Id")]
    pub id: u32,
    pub name: String,
    pub floor: i16,
    pub total_beds: u32,
    pub occupied_beds: u32,
    pub head_doctor_id: u32,
}

impl Department {
    pub fn available_beds(&self) -> u32 {
        self.total_beds.saturating_sub(self.occupied_beds)
    }

    pub fn apply(&mut self, patch: DepartmentPatch) {
        merge_fields!(self, patch, {
            name,
            floor,
            total_beds,
            occupied_beds,
            head_doctor_id,
        });
    }
}

impl Identified for Department {
    fn id(&self) -> u32 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DepartmentPatch {
    pub name: Option<String>,
    pub floor: Option<i16>,
    pub total_beds: Option<u32>,
    pub occupied_beds: Option<u32>,
    pub head_doctor_id: Option<u32>,
}

/// Department joined with its head doctor's name and the derived occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentView {
    #[serde(flatten)]
    pub department: Department,
    pub head_doctor_name: String,
    /// Whole percent, derived on every read.
    pub occupancy_rate: u32,
}
