//! Messages accepted by the store task.

use tokio::sync::oneshot;

use crate::error::StoreError;
use crate::fixtures::Fixtures;
use crate::models::*;

/// One-shot reply channel carried by every command.
pub(crate) type Reply<T> = oneshot::Sender<Result<T, StoreError>>;

pub(crate) enum Command {
    PatientGetAll(Reply<Vec<Patient>>),
    PatientGetById(u32, Reply<Patient>),
    PatientCreate(NewPatient, Reply<Patient>),
    PatientUpdate(u32, PatientPatch, Reply<Patient>),
    PatientDelete(u32, Reply<()>),
    PatientSearch(String, Reply<Vec<Patient>>),

    AppointmentGetAll(Reply<Vec<AppointmentView>>),
    AppointmentGetById(u32, Reply<Appointment>),
    AppointmentGetByPatient(u32, Reply<Vec<AppointmentView>>),
    /// "Today" is resolved by the store's clock when the command is applied.
    AppointmentGetToday(Reply<Vec<AppointmentView>>),
    AppointmentCreate(NewAppointment, Reply<Appointment>),
    AppointmentUpdate(u32, AppointmentPatch, Reply<Appointment>),
    AppointmentDelete(u32, Reply<()>),

    DepartmentGetAll(Reply<Vec<DepartmentView>>),
    DepartmentGetById(u32, Reply<Department>),
    DepartmentUpdate(u32, DepartmentPatch, Reply<Department>),

    DoctorGetAll(Reply<Vec<Doctor>>),
    DoctorGetById(u32, Reply<Doctor>),
    DoctorGetByDepartment(String, Reply<Vec<Doctor>>),

    Reset(Box<Fixtures>, Reply<()>),
    Shutdown(Reply<()>),
}

impl Command {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::PatientGetAll(_) => "patient_get_all",
            Self::PatientGetById(..) => "patient_get_by_id",
            Self::PatientCreate(..) => "patient_create",
            Self::PatientUpdate(..) => "patient_update",
            Self::PatientDelete(..) => "patient_delete",
            Self::PatientSearch(..) => "patient_search",
            Self::AppointmentGetAll(_) => "appointment_get_all",
            Self::AppointmentGetById(..) => "appointment_get_by_id",
            Self::AppointmentGetByPatient(..) => "appointment_get_by_patient",
            Self::AppointmentGetToday(_) => "appointment_get_today",
            Self::AppointmentCreate(..) => "appointment_create",
            Self::AppointmentUpdate(..) => "appointment_update",
            Self::AppointmentDelete(..) => "appointment_delete",
            Self::DepartmentGetAll(_) => "department_get_all",
            Self::DepartmentGetById(..) => "department_get_by_id",
            Self::DepartmentUpdate(..) => "department_update",
            Self::DoctorGetAll(_) => "doctor_get_all",
            Self::DoctorGetById(..) => "doctor_get_by_id",
            Self::DoctorGetByDepartment(..) => "doctor_get_by_department",
            Self::Reset(..) => "reset",
            Self::Shutdown(_) => "shutdown",
        }
    }
}
