//! The assembled data layer: one store, four access services.
//!
//! `Hospital` is what a UI layer holds onto. Cloning it is cheap and every
//! clone talks to the same store task.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::error::{StartupError, StoreError};
use crate::fixtures::Fixtures;
use crate::latency::LatencyPolicy;
use crate::reports::{self, DashboardSummary, HospitalStats};
use crate::services::{AppointmentService, DepartmentService, DoctorService, PatientService};
use crate::store::{self, StoreHandle};

#[derive(Debug, Clone)]
pub struct Hospital {
    store: StoreHandle,
    patients: PatientService,
    appointments: AppointmentService,
    departments: DepartmentService,
    doctors: DoctorService,
}

impl Hospital {
    /// Start from configuration: embedded or on-disk fixtures, the configured
    /// latency mode and the local-date clock. Must run inside a tokio runtime.
    pub fn start(config: &StoreConfig) -> Result<Self, StartupError> {
        let fixtures = match &config.fixtures_dir {
            Some(dir) => Fixtures::from_dir(dir)?,
            None => Fixtures::embedded()?,
        };
        tracing::info!(
            latency = ?config.latency,
            capacity = config.channel_capacity,
            "Starting hospital data layer"
        );
        Ok(Self::with_parts(
            fixtures,
            config.latency.policy(),
            Arc::new(SystemClock),
            config.channel_capacity,
        ))
    }

    /// Start with explicit fixtures, latency policy and clock.
    pub fn with_parts(
        fixtures: Fixtures,
        latency: Arc<dyn LatencyPolicy>,
        clock: Arc<dyn Clock>,
        channel_capacity: usize,
    ) -> Self {
        let store = store::spawn(fixtures, latency, clock, channel_capacity);
        Self {
            patients: PatientService::new(store.clone()),
            appointments: AppointmentService::new(store.clone()),
            departments: DepartmentService::new(store.clone()),
            doctors: DoctorService::new(store.clone()),
            store,
        }
    }

    pub fn patients(&self) -> &PatientService {
        &self.patients
    }

    pub fn appointments(&self) -> &AppointmentService {
        &self.appointments
    }

    pub fn departments(&self) -> &DepartmentService {
        &self.departments
    }

    pub fn doctors(&self) -> &DoctorService {
        &self.doctors
    }

    /// Figures for the reports page.
    pub async fn stats(&self) -> Result<HospitalStats, StoreError> {
        reports::hospital_stats(self).await
    }

    /// Figures for the landing dashboard.
    pub async fn dashboard(&self) -> Result<DashboardSummary, StoreError> {
        reports::dashboard_summary(self).await
    }

    /// Drop all changes and reseed from `fixtures`.
    pub async fn reset(&self, fixtures: Fixtures) -> Result<(), StoreError> {
        self.store.reset(fixtures).await
    }

    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.store.shutdown().await
    }

    pub fn is_running(&self) -> bool {
        !self.store.is_closed()
    }
}
