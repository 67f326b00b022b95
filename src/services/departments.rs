//! Department access API. Departments are fixture-only: no create or delete.

use crate::error::StoreError;
use crate::latency::Operation;
use crate::models::{Department, DepartmentPatch, DepartmentView};
use crate::store::{Command, StoreHandle};

#[derive(Debug, Clone)]
pub struct DepartmentService {
    store: StoreHandle,
}

impl DepartmentService {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Every department with head doctor name and current occupancy rate.
    pub async fn get_all(&self) -> Result<Vec<DepartmentView>, StoreError> {
        self.store
            .request(Operation::DepartmentGetAll, Command::DepartmentGetAll)
            .await
    }

    pub async fn get_by_id(&self, id: u32) -> Result<Department, StoreError> {
        self.store
            .request(Operation::DepartmentGetById, |reply| {
                Command::DepartmentGetById(id, reply)
            })
            .await
    }

    pub async fn update(&self, id: u32, patch: DepartmentPatch) -> Result<Department, StoreError> {
        self.store
            .request(Operation::DepartmentUpdate, |reply| {
                Command::DepartmentUpdate(id, patch, reply)
            })
            .await
    }
}
