//! Doctor access API (read-only).

use crate::error::StoreError;
use crate::latency::Operation;
use crate::models::Doctor;
use crate::store::{Command, StoreHandle};

#[derive(Debug, Clone)]
pub struct DoctorService {
    store: StoreHandle,
}

impl DoctorService {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<Vec<Doctor>, StoreError> {
        self.store
            .request(Operation::DoctorGetAll, Command::DoctorGetAll)
            .await
    }

    pub async fn get_by_id(&self, id: u32) -> Result<Doctor, StoreError> {
        self.store
            .request(Operation::DoctorGetById, |reply| {
                Command::DoctorGetById(id, reply)
            })
            .await
    }

    /// Exact, case-sensitive match on the department name.
    pub async fn get_by_department(&self, department: &str) -> Result<Vec<Doctor>, StoreError> {
        let department = department.to_string();
        self.store
            .request(Operation::DoctorGetByDepartment, |reply| {
                Command::DoctorGetByDepartment(department, reply)
            })
            .await
    }
}
