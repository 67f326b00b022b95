//! Appointment access API.
//!
//! Listing calls return [`AppointmentView`]s joined with doctor (and
//! usually patient) names; single-record calls return the raw record.

use crate::error::StoreError;
use crate::latency::Operation;
use crate::models::{
    Appointment, AppointmentPatch, AppointmentStatus, AppointmentView, NewAppointment,
};
use crate::store::{Command, StoreHandle};

#[derive(Debug, Clone)]
pub struct AppointmentService {
    store: StoreHandle,
}

impl AppointmentService {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Every appointment with doctor and patient names.
    pub async fn get_all(&self) -> Result<Vec<AppointmentView>, StoreError> {
        self.store
            .request(Operation::AppointmentGetAll, Command::AppointmentGetAll)
            .await
    }

    pub async fn get_by_id(&self, id: u32) -> Result<Appointment, StoreError> {
        self.store
            .request(Operation::AppointmentGetById, |reply| {
                Command::AppointmentGetById(id, reply)
            })
            .await
    }

    /// A patient's appointments with doctor names. Unknown patients yield an empty list.
    pub async fn get_by_patient_id(
        &self,
        patient_id: u32,
    ) -> Result<Vec<AppointmentView>, StoreError> {
        self.store
            .request(Operation::AppointmentGetByPatient, |reply| {
                Command::AppointmentGetByPatient(patient_id, reply)
            })
            .await
    }

    /// Appointments dated today according to the store's clock.
    pub async fn get_today_appointments(&self) -> Result<Vec<AppointmentView>, StoreError> {
        self.store
            .request(Operation::AppointmentGetToday, Command::AppointmentGetToday)
            .await
    }

    /// Book an appointment. Always starts Scheduled.
    pub async fn create(&self, appointment: NewAppointment) -> Result<Appointment, StoreError> {
        self.store
            .request(Operation::AppointmentCreate, |reply| {
                Command::AppointmentCreate(appointment, reply)
            })
            .await
    }

    /// Shallow merge. The store accepts any status change; use
    /// [`AppointmentStatus::can_transition_to`] before moving status.
    pub async fn update(
        &self,
        id: u32,
        patch: AppointmentPatch,
    ) -> Result<Appointment, StoreError> {
        self.store
            .request(Operation::AppointmentUpdate, |reply| {
                Command::AppointmentUpdate(id, patch, reply)
            })
            .await
    }

    pub async fn complete(&self, id: u32) -> Result<Appointment, StoreError> {
        self.update(id, AppointmentPatch::status(AppointmentStatus::Completed))
            .await
    }

    pub async fn cancel(&self, id: u32) -> Result<Appointment, StoreError> {
        self.update(id, AppointmentPatch::status(AppointmentStatus::Cancelled))
            .await
    }

    pub async fn delete(&self, id: u32) -> Result<(), StoreError> {
        self.store
            .request(Operation::AppointmentDelete, |reply| {
                Command::AppointmentDelete(id, reply)
            })
            .await
    }
}
