//! Aggregate figures for the dashboard and reports pages.
//!
//! Both are computed from access-API snapshots fetched concurrently, the
//! same way the pages load them. The `from_*` constructors are pure so the
//! arithmetic can be checked without a store.

use serde::Serialize;

use crate::enrichment::occupancy_rate;
use crate::error::StoreError;
use crate::hospital::Hospital;
use crate::models::{AppointmentStatus, AppointmentView, DepartmentView, Patient, PatientStatus};

// ═══════════════════════════════════════════════════════════
// Bed totals
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedTotals {
    pub total_beds: u32,
    pub occupied_beds: u32,
    pub available_beds: u32,
    pub occupancy_rate: u32,
}

impl BedTotals {
    pub fn from_departments(departments: &[DepartmentView]) -> Self {
        let total_beds: u32 = departments.iter().map(|d| d.department.total_beds).sum();
        let occupied_beds: u32 = departments.iter().map(|d| d.department.occupied_beds).sum();
        Self {
            total_beds,
            occupied_beds,
            available_beds: total_beds.saturating_sub(occupied_beds),
            occupancy_rate: occupancy_rate(occupied_beds, total_beds),
        }
    }
}

fn count_status(appointments: &[AppointmentView], status: AppointmentStatus) -> usize {
    appointments
        .iter()
        .filter(|a| a.appointment.status == status)
        .count()
}

// ═══════════════════════════════════════════════════════════
// Reports page
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalStats {
    pub total_patients: usize,
    pub active_patients: usize,
    pub total_appointments: usize,
    pub scheduled_appointments: usize,
    pub completed_appointments: usize,
    pub cancelled_appointments: usize,
    #[serde(flatten)]
    pub beds: BedTotals,
    pub total_departments: usize,
}

impl HospitalStats {
    pub fn from_snapshots(
        patients: &[Patient],
        appointments: &[AppointmentView],
        departments: &[DepartmentView],
    ) -> Self {
        Self {
            total_patients: patients.len(),
            active_patients: patients
                .iter()
                .filter(|p| p.status == PatientStatus::Active)
                .count(),
            total_appointments: appointments.len(),
            scheduled_appointments: count_status(appointments, AppointmentStatus::Scheduled),
            completed_appointments: count_status(appointments, AppointmentStatus::Completed),
            cancelled_appointments: count_status(appointments, AppointmentStatus::Cancelled),
            beds: BedTotals::from_departments(departments),
            total_departments: departments.len(),
        }
    }
}

pub async fn hospital_stats(hospital: &Hospital) -> Result<HospitalStats, StoreError> {
    let (patients, appointments, departments) = tokio::try_join!(
        hospital.patients().get_all(),
        hospital.appointments().get_all(),
        hospital.departments().get_all(),
    )?;
    Ok(HospitalStats::from_snapshots(&patients, &appointments, &departments))
}

// ═══════════════════════════════════════════════════════════
// Dashboard
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_patients: usize,
    /// Today's appointments still in the Scheduled state.
    pub today_scheduled: usize,
    pub available_beds: u32,
    pub total_departments: usize,
    pub today_appointments: Vec<AppointmentView>,
    pub departments: Vec<DepartmentView>,
}

impl DashboardSummary {
    pub fn from_snapshots(
        patients: &[Patient],
        today: Vec<AppointmentView>,
        departments: Vec<DepartmentView>,
    ) -> Self {
        let beds = BedTotals::from_departments(&departments);
        Self {
            total_patients: patients.len(),
            today_scheduled: count_status(&today, AppointmentStatus::Scheduled),
            available_beds: beds.available_beds,
            total_departments: departments.len(),
            today_appointments: today,
            departments,
        }
    }
}

pub async fn dashboard_summary(hospital: &Hospital) -> Result<DashboardSummary, StoreError> {
    let (patients, today, departments) = tokio::try_join!(
        hospital.patients().get_all(),
        hospital.appointments().get_today_appointments(),
        hospital.departments().get_all(),
    )?;
    Ok(DashboardSummary::from_snapshots(&patients, today, departments))
}
