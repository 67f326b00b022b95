//! Artificial latency applied before each access-API call.
//!
//! The dashboard was built against a mock backend that answered after a
//! fixed per-call delay. [`SimulatedLatency`] keeps those delays;
//! [`NoLatency`] lets tests run instantly; [`JitteredLatency`] spreads
//! calls over a random window.

use std::time::Duration;

use rand::Rng;

// ═══════════════════════════════════════════════════════════
// Operation catalogue
// ═══════════════════════════════════════════════════════════

/// Every call the access API can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    PatientGetAll,
    PatientGetById,
    PatientCreate,
    PatientUpdate,
    PatientDelete,
    PatientSearch,
    AppointmentGetAll,
    AppointmentGetById,
    AppointmentGetByPatient,
    AppointmentGetToday,
    AppointmentCreate,
    AppointmentUpdate,
    AppointmentDelete,
    DepartmentGetAll,
    DepartmentGetById,
    DepartmentUpdate,
    DoctorGetAll,
    DoctorGetById,
    DoctorGetByDepartment,
}

impl Operation {
    /// Delay the mock backend used for this call.
    pub fn simulated_delay(&self) -> Duration {
        let ms = match self {
            Self::PatientGetAll | Self::AppointmentGetAll | Self::DepartmentGetAll => 300,
            Self::DoctorGetAll => 250,
            Self::PatientGetById
            | Self::AppointmentGetById
            | Self::DepartmentGetById
            | Self::DoctorGetById => 200,
            Self::PatientSearch
            | Self::AppointmentGetByPatient
            | Self::AppointmentGetToday
            | Self::DoctorGetByDepartment => 250,
            Self::PatientCreate | Self::AppointmentCreate => 400,
            Self::PatientUpdate | Self::AppointmentUpdate | Self::DepartmentUpdate => 350,
            Self::PatientDelete | Self::AppointmentDelete => 300,
        };
        Duration::from_millis(ms)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::PatientGetAll => "patients.get_all",
            Self::PatientGetById => "patients.get_by_id",
            Self::PatientCreate => "patients.create",
            Self::PatientUpdate => "patients.update",
            Self::PatientDelete => "patients.delete",
            Self::PatientSearch => "patients.search",
            Self::AppointmentGetAll => "appointments.get_all",
            Self::AppointmentGetById => "appointments.get_by_id",
            Self::AppointmentGetByPatient => "appointments.get_by_patient_id",
            Self::AppointmentGetToday => "appointments.get_today",
            Self::AppointmentCreate => "appointments.create",
            Self::AppointmentUpdate => "appointments.update",
            Self::AppointmentDelete => "appointments.delete",
            Self::DepartmentGetAll => "departments.get_all",
            Self::DepartmentGetById => "departments.get_by_id",
            Self::DepartmentUpdate => "departments.update",
            Self::DoctorGetAll => "doctors.get_all",
            Self::DoctorGetById => "doctors.get_by_id",
            Self::DoctorGetByDepartment => "doctors.get_by_department",
        };
        f.write_str(label)
    }
}

// ═══════════════════════════════════════════════════════════
// Policies
// ═══════════════════════════════════════════════════════════

/// Decides how long a call waits before its command reaches the store.
pub trait LatencyPolicy: Send + Sync {
    fn delay_for(&self, op: Operation) -> Duration;
}

/// Fixed per-operation delays of the mock backend, 200 to 400 ms.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedLatency;

impl LatencyPolicy for SimulatedLatency {
    fn delay_for(&self, op: Operation) -> Duration {
        op.simulated_delay()
    }
}

/// Resolve immediately. Used in tests and headless tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

impl LatencyPolicy for NoLatency {
    fn delay_for(&self, _op: Operation) -> Duration {
        Duration::ZERO
    }
}

/// Uniformly random delay in `[min, max]`, independent of the operation.
#[derive(Debug, Clone, Copy)]
pub struct JitteredLatency {
    min: Duration,
    max: Duration,
}

impl JitteredLatency {
    /// Bounds are swapped if given in the wrong order.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }
}

impl Default for JitteredLatency {
    fn default() -> Self {
        Self::new(Duration::from_millis(200), Duration::from_millis(400))
    }
}

impl LatencyPolicy for JitteredLatency {
    fn delay_for(&self, _op: Operation) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}
