//! Patient access API.

use crate::error::StoreError;
use crate::latency::Operation;
use crate::models::{NewPatient, Patient, PatientPatch};
use crate::store::{Command, StoreHandle};

#[derive(Debug, Clone)]
pub struct PatientService {
    store: StoreHandle,
}

impl PatientService {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Every patient in registration order.
    pub async fn get_all(&self) -> Result<Vec<Patient>, StoreError> {
        self.store
            .request(Operation::PatientGetAll, Command::PatientGetAll)
            .await
    }

    pub async fn get_by_id(&self, id: u32) -> Result<Patient, StoreError> {
        self.store
            .request(Operation::PatientGetById, |reply| {
                Command::PatientGetById(id, reply)
            })
            .await
    }

    /// Register a patient. The identifier is minted by the store and the
    /// status starts at Active.
    pub async fn create(&self, patient: NewPatient) -> Result<Patient, StoreError> {
        self.store
            .request(Operation::PatientCreate, |reply| {
                Command::PatientCreate(patient, reply)
            })
            .await
    }

    pub async fn update(&self, id: u32, patch: PatientPatch) -> Result<Patient, StoreError> {
        self.store
            .request(Operation::PatientUpdate, |reply| {
                Command::PatientUpdate(id, patch, reply)
            })
            .await
    }

    /// Remove a patient. Their appointments stay and show "Unknown".
    pub async fn delete(&self, id: u32) -> Result<(), StoreError> {
        self.store
            .request(Operation::PatientDelete, |reply| {
                Command::PatientDelete(id, reply)
            })
            .await
    }

    /// Case-insensitive substring over first name, last name and email;
    /// literal substring over phone.
    pub async fn search(&self, query: &str) -> Result<Vec<Patient>, StoreError> {
        let query = query.to_string();
        self.store
            .request(Operation::PatientSearch, |reply| {
                Command::PatientSearch(query, reply)
            })
            .await
    }
}
