use serde::{Deserialize, Serialize};

use super::Identified;

/// Doctors are read-only fixture data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(rename = "Id")]
    pub id: u32,
    pub name: String,
    pub specialization: String,
    pub department: String,
    /// Bookable time labels such as "09:00 AM".
    #[serde(default)]
    pub available_slots: Vec<String>,
}

impl Identified for Doctor {
    fn id(&self) -> u32 {
        self.id
    }
}
