//! In-memory entity store with a single writer.
//!
//! One tokio task owns every collection and applies commands in the order
//! they arrive on its channel. Callers talk to it through a cloneable
//! [`StoreHandle`]; each request hands its latency and its command to a
//! detached task and awaits the reply. Independent callers' delays overlap
//! while their effects stay strictly sequential.
//!
//! Lifecycle: `spawn` seeds from fixtures → `reset` reseeds → `shutdown`
//! (or dropping every handle) stops the task. Requests made after that
//! fail with [`StoreError::StoreClosed`].

mod collections;
mod command;

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

pub use collections::Collections;
pub(crate) use command::{Command, Reply};

use crate::clock::Clock;
use crate::error::StoreError;
use crate::fixtures::Fixtures;
use crate::latency::{LatencyPolicy, Operation};

/// Default bound on queued commands.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

// ═══════════════════════════════════════════════════════════
// StoreHandle: the only way in
// ═══════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct StoreHandle {
    tx: mpsc::Sender<Command>,
    latency: Arc<dyn LatencyPolicy>,
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreHandle")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

impl StoreHandle {
    /// Send one access-API call and await its reply.
    ///
    /// The delay and the enqueue run on a detached task, so a call cannot be
    /// cancelled once started: dropping this future, even mid-delay, still
    /// lets the command reach the store and take effect.
    pub(crate) async fn request<T: Send + 'static>(
        &self,
        op: Operation,
        make: impl FnOnce(Reply<T>) -> Command,
    ) -> Result<T, StoreError> {
        let delay = self.latency.delay_for(op);
        let (reply, rx) = oneshot::channel();
        let command = make(reply);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            // A closed store drops the command, and the reply sender with it.
            if tx.send(command).await.is_err() {
                tracing::debug!(%op, "Store closed before command was delivered");
            }
        });
        rx.await.map_err(|_| StoreError::StoreClosed)?
    }

    async fn send<T>(&self, make: impl FnOnce(Reply<T>) -> Command) -> Result<T, StoreError> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(make(tx))
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        rx.await.map_err(|_| StoreError::StoreClosed)?
    }

    /// Replace all four collections with `fixtures`. Not subject to latency.
    pub async fn reset(&self, fixtures: Fixtures) -> Result<(), StoreError> {
        self.send(|reply| Command::Reset(Box::new(fixtures), reply)).await
    }

    /// Stop the store task after every command queued ahead of this one.
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.send(Command::Shutdown).await
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

// ═══════════════════════════════════════════════════════════
// Store task
// ═══════════════════════════════════════════════════════════

/// Start the store task on the current tokio runtime.
pub fn spawn(
    fixtures: Fixtures,
    latency: Arc<dyn LatencyPolicy>,
    clock: Arc<dyn Clock>,
    capacity: usize,
) -> StoreHandle {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let state = Collections::from_fixtures(fixtures);
    tokio::spawn(run(state, clock, rx));
    StoreHandle { tx, latency }
}

async fn run(mut state: Collections, clock: Arc<dyn Clock>, mut rx: mpsc::Receiver<Command>) {
    tracing::info!("Entity store started");
    while let Some(command) = rx.recv().await {
        tracing::trace!(command = command.label(), "Applying store command");
        if !dispatch(&mut state, clock.as_ref(), command) {
            break;
        }
    }
    tracing::info!("Entity store stopped");
}

/// Apply one command. Returns `false` when the task should stop.
///
/// A send error means the caller stopped waiting; the effect stands regardless.
fn dispatch(state: &mut Collections, clock: &dyn Clock, command: Command) -> bool {
    match command {
        Command::PatientGetAll(reply) => {
            let _ = reply.send(Ok(state.patients()));
        }
        Command::PatientGetById(id, reply) => {
            let _ = reply.send(state.patient(id));
        }
        Command::PatientCreate(new, reply) => {
            let _ = reply.send(state.create_patient(new));
        }
        Command::PatientUpdate(id, patch, reply) => {
            let _ = reply.send(state.update_patient(id, patch));
        }
        Command::PatientDelete(id, reply) => {
            let _ = reply.send(state.delete_patient(id));
        }
        Command::PatientSearch(query, reply) => {
            let _ = reply.send(Ok(state.search_patients(&query)));
        }

        Command::AppointmentGetAll(reply) => {
            let _ = reply.send(Ok(state.appointments()));
        }
        Command::AppointmentGetById(id, reply) => {
            let _ = reply.send(state.appointment(id));
        }
        Command::AppointmentGetByPatient(patient_id, reply) => {
            let _ = reply.send(Ok(state.appointments_for_patient(patient_id)));
        }
        Command::AppointmentGetToday(reply) => {
            let _ = reply.send(Ok(state.appointments_on(clock.today())));
        }
        Command::AppointmentCreate(new, reply) => {
            let _ = reply.send(state.create_appointment(new));
        }
        Command::AppointmentUpdate(id, patch, reply) => {
            let _ = reply.send(state.update_appointment(id, patch));
        }
        Command::AppointmentDelete(id, reply) => {
            let _ = reply.send(state.delete_appointment(id));
        }

        Command::DepartmentGetAll(reply) => {
            let _ = reply.send(Ok(state.departments()));
        }
        Command::DepartmentGetById(id, reply) => {
            let _ = reply.send(state.department(id));
        }
        Command::DepartmentUpdate(id, patch, reply) => {
            let _ = reply.send(state.update_department(id, patch));
        }

        Command::DoctorGetAll(reply) => {
            let _ = reply.send(Ok(state.doctors()));
        }
        Command::DoctorGetById(id, reply) => {
            let _ = reply.send(state.doctor(id));
        }
        Command::DoctorGetByDepartment(department, reply) => {
            let _ = reply.send(Ok(state.doctors_in(&department)));
        }

        Command::Reset(fixtures, reply) => {
            state.reseed(*fixtures);
            tracing::info!("Entity store reseeded");
            let _ = reply.send(Ok(()));
        }
        Command::Shutdown(reply) => {
            let _ = reply.send(Ok(()));
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::clock::FixedClock;
    use crate::latency::{NoLatency, SimulatedLatency};
    use crate::models::patient::tests::new_patient;
    use crate::models::{AppointmentPatch, AppointmentStatus};
    use chrono::NaiveDate;

    fn start(fixtures: Fixtures) -> StoreHandle {
        spawn(
            fixtures,
            Arc::new(NoLatency),
            Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 1, 18).unwrap())),
            DEFAULT_CHANNEL_CAPACITY,
        )
    }

    #[tokio::test]
    async fn request_round_trips_through_the_task() {
        let store = start(Fixtures::embedded().unwrap());
        let doctors = store
            .request(Operation::DoctorGetAll, Command::DoctorGetAll)
            .await
            .unwrap();
        assert!(!doctors.is_empty());
    }

    #[tokio::test]
    async fn shutdown_closes_the_store() {
        let store = start(Fixtures::empty());
        store.shutdown().await.unwrap();
        let err = store
            .request(Operation::PatientGetAll, Command::PatientGetAll)
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::StoreClosed);
    }

    #[tokio::test]
    async fn reset_reseeds_collections() {
        let store = start(Fixtures::embedded().unwrap());
        store.reset(Fixtures::empty()).await.unwrap();
        let patients = store
            .request(Operation::PatientGetAll, Command::PatientGetAll)
            .await
            .unwrap();
        assert!(patients.is_empty());
    }

    #[tokio::test]
    async fn today_uses_store_clock() {
        let store = start(Fixtures::embedded().unwrap());
        let today = store
            .request(Operation::AppointmentGetToday, Command::AppointmentGetToday)
            .await
            .unwrap();
        assert!(!today.is_empty());
        let expected = NaiveDate::from_ymd_opt(2024, 1, 18).unwrap();
        assert!(today.iter().all(|v| v.appointment.date == expected));
    }

    #[tokio::test]
    async fn dispatched_command_applies_after_caller_gives_up() {
        let store = start(Fixtures::empty());
        let (tx, rx) = oneshot::channel();
        drop(rx);
        store
            .tx
            .send(Command::PatientCreate(
                new_patient("Ann", "Lee"),
                tx,
            ))
            .await
            .unwrap();
        let patients = store
            .request(Operation::PatientGetAll, Command::PatientGetAll)
            .await
            .unwrap();
        assert_eq!(patients.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn create_abandoned_during_delay_still_lands() {
        let store = spawn(
            Fixtures::empty(),
            Arc::new(SimulatedLatency),
            Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 1, 18).unwrap())),
            DEFAULT_CHANNEL_CAPACITY,
        );
        let create = store.request(Operation::PatientCreate, |reply| {
            Command::PatientCreate(new_patient("Bo", "Ng"), reply)
        });
        let gave_up = tokio::time::timeout(Duration::from_millis(100), create).await;
        assert!(gave_up.is_err());

        tokio::time::sleep(Duration::from_secs(5)).await;
        let patients = store
            .request(Operation::PatientGetAll, Command::PatientGetAll)
            .await
            .unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].first_name, "Bo");
    }

    #[tokio::test(start_paused = true)]
    async fn update_abandoned_during_delay_still_lands() {
        let store = spawn(
            Fixtures::embedded().unwrap(),
            Arc::new(SimulatedLatency),
            Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 1, 18).unwrap())),
            DEFAULT_CHANNEL_CAPACITY,
        );
        let cancel = store.request(Operation::AppointmentUpdate, |reply| {
            Command::AppointmentUpdate(1, AppointmentPatch::status(AppointmentStatus::Cancelled), reply)
        });
        drop(tokio::time::timeout(Duration::from_millis(50), cancel).await);

        tokio::time::sleep(Duration::from_secs(1)).await;
        let apt = store
            .request(Operation::AppointmentGetById, |reply| {
                Command::AppointmentGetById(1, reply)
            })
            .await
            .unwrap();
        assert_eq!(apt.status, AppointmentStatus::Cancelled);
    }

    #[tokio::test]
    async fn exhausted_ids_leave_the_store_running() {
        let mut fixtures = Fixtures::empty();
        fixtures
            .patients
            .push(crate::models::Patient::from_new(u32::MAX, new_patient("Ann", "Lee")));
        let store = start(fixtures);

        let err = store
            .request(Operation::PatientCreate, |reply| {
                Command::PatientCreate(new_patient("Bo", "Ng"), reply)
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::IdsExhausted {
                entity: crate::error::EntityKind::Patient
            }
        );

        let patients = store
            .request(Operation::PatientGetAll, Command::PatientGetAll)
            .await
            .unwrap();
        assert_eq!(patients.len(), 1);
        assert!(!store.is_closed());
    }
}
