//! The four entity collections and every read/write over them.
//!
//! Owned exclusively by the store task; nothing here is shared or locked.
//! Every method returns owned copies so callers never alias store state.

use chrono::NaiveDate;

use crate::enrichment;
use crate::error::{EntityKind, StoreError};
use crate::fixtures::Fixtures;
use crate::models::*;

/// `max(existing ids) + 1`, or 1 for an empty collection.
pub(crate) fn next_id<T: Identified>(records: &[T], entity: EntityKind) -> Result<u32, StoreError> {
    match records.iter().map(Identified::id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted { entity }),
    }
}

fn position<T: Identified>(records: &[T], id: u32, entity: EntityKind) -> Result<usize, StoreError> {
    records
        .iter()
        .position(|r| r.id() == id)
        .ok_or(StoreError::not_found(entity, id))
}

#[derive(Debug, Default)]
pub struct Collections {
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
    departments: Vec<Department>,
}

impl Collections {
    pub fn from_fixtures(fixtures: Fixtures) -> Self {
        Self {
            patients: fixtures.patients,
            doctors: fixtures.doctors,
            appointments: fixtures.appointments,
            departments: fixtures.departments,
        }
    }

    /// Replace all four collections at once.
    pub fn reseed(&mut self, fixtures: Fixtures) {
        *self = Self::from_fixtures(fixtures);
    }

    // ── Patients ────────────────────────────────────────────

    pub fn patients(&self) -> Vec<Patient> {
        self.patients.clone()
    }

    pub fn patient(&self, id: u32) -> Result<Patient, StoreError> {
        let idx = position(&self.patients, id, EntityKind::Patient)?;
        Ok(self.patients[idx].clone())
    }

    pub fn create_patient(&mut self, new: NewPatient) -> Result<Patient, StoreError> {
        let patient = Patient::from_new(next_id(&self.patients, EntityKind::Patient)?, new);
        self.patients.push(patient.clone());
        tracing::debug!(id = patient.id, "Patient registered");
        Ok(patient)
    }

    pub fn update_patient(&mut self, id: u32, patch: PatientPatch) -> Result<Patient, StoreError> {
        let idx = position(&self.patients, id, EntityKind::Patient)?;
        self.patients[idx].apply(patch);
        tracing::debug!(id, "Patient updated");
        Ok(self.patients[idx].clone())
    }

    /// Appointments that reference the patient are left in place.
    pub fn delete_patient(&mut self, id: u32) -> Result<(), StoreError> {
        let idx = position(&self.patients, id, EntityKind::Patient)?;
        self.patients.remove(idx);
        tracing::debug!(id, "Patient deleted");
        Ok(())
    }

    pub fn search_patients(&self, query: &str) -> Vec<Patient> {
        let lowered = query.to_lowercase();
        self.patients
            .iter()
            .filter(|p| p.matches_query(query, &lowered))
            .cloned()
            .collect()
    }

    // ── Doctors ─────────────────────────────────────────────

    pub fn doctors(&self) -> Vec<Doctor> {
        self.doctors.clone()
    }

    pub fn doctor(&self, id: u32) -> Result<Doctor, StoreError> {
        let idx = position(&self.doctors, id, EntityKind::Doctor)?;
        Ok(self.doctors[idx].clone())
    }

    pub fn doctors_in(&self, department: &str) -> Vec<Doctor> {
        self.doctors
            .iter()
            .filter(|d| d.department == department)
            .cloned()
            .collect()
    }

    // ── Appointments ────────────────────────────────────────

    /// Every appointment with doctor and patient names.
    pub fn appointments(&self) -> Vec<AppointmentView> {
        self.appointments
            .iter()
            .map(|a| enrichment::appointment_view(a, &self.doctors, Some(&self.patients)))
            .collect()
    }

    pub fn appointment(&self, id: u32) -> Result<Appointment, StoreError> {
        let idx = position(&self.appointments, id, EntityKind::Appointment)?;
        Ok(self.appointments[idx].clone())
    }

    /// A patient's appointments, with doctor names only.
    pub fn appointments_for_patient(&self, patient_id: u32) -> Vec<AppointmentView> {
        self.appointments
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .map(|a| enrichment::appointment_view(a, &self.doctors, None))
            .collect()
    }

    /// Appointments on `date`, with doctor and patient names.
    pub fn appointments_on(&self, date: NaiveDate) -> Vec<AppointmentView> {
        self.appointments
            .iter()
            .filter(|a| a.date == date)
            .map(|a| enrichment::appointment_view(a, &self.doctors, Some(&self.patients)))
            .collect()
    }

    pub fn create_appointment(&mut self, new: NewAppointment) -> Result<Appointment, StoreError> {
        let id = next_id(&self.appointments, EntityKind::Appointment)?;
        let appointment = Appointment::from_new(id, new);
        self.appointments.push(appointment.clone());
        tracing::debug!(
            id = appointment.id,
            patient_id = appointment.patient_id,
            doctor_id = appointment.doctor_id,
            "Appointment scheduled"
        );
        Ok(appointment)
    }

    pub fn update_appointment(
        &mut self,
        id: u32,
        patch: AppointmentPatch,
    ) -> Result<Appointment, StoreError> {
        let idx = position(&self.appointments, id, EntityKind::Appointment)?;
        self.appointments[idx].apply(patch);
        tracing::debug!(id, status = %self.appointments[idx].status, "Appointment updated");
        Ok(self.appointments[idx].clone())
    }

    pub fn delete_appointment(&mut self, id: u32) -> Result<(), StoreError> {
        let idx = position(&self.appointments, id, EntityKind::Appointment)?;
        self.appointments.remove(idx);
        tracing::debug!(id, "Appointment deleted");
        Ok(())
    }

    // ── Departments ─────────────────────────────────────────

    /// Every department with head doctor name and occupancy rate.
    pub fn departments(&self) -> Vec<DepartmentView> {
        self.departments
            .iter()
            .map(|d| enrichment::department_view(d, &self.doctors))
            .collect()
    }

    pub fn department(&self, id: u32) -> Result<Department, StoreError> {
        let idx = position(&self.departments, id, EntityKind::Department)?;
        Ok(self.departments[idx].clone())
    }

    pub fn update_department(
        &mut self,
        id: u32,
        patch: DepartmentPatch,
    ) -> Result<Department, StoreError> {
        let idx = position(&self.departments, id, EntityKind::Department)?;
        self.departments[idx].apply(patch);
        tracing::debug!(id, "Department updated");
        Ok(self.departments[idx].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::UNKNOWN;
    use crate::models::appointment::tests::new_appointment;
    use crate::models::patient::tests::new_patient;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn seeded() -> Collections {
        let mut c = Collections::default();
        c.create_patient(new_patient("Ann", "Lee")).unwrap();
        c.doctors.push(Doctor {
            id: 1,
            name: "Dr. Rao".into(),
            specialization: "Cardiologist".into(),
            department: "Cardiology".into(),
            available_slots: vec!["09:00 AM".into()],
        });
        c
    }

    #[test]
    fn next_id_starts_at_one_and_follows_max() {
        assert_eq!(next_id::<Patient>(&[], EntityKind::Patient).unwrap(), 1);
        let mut c = seeded();
        c.patients[0].id = 41;
        assert_eq!(next_id(&c.patients, EntityKind::Patient).unwrap(), 42);
    }

    #[test]
    fn create_past_max_id_fails_without_inserting() {
        let mut c = seeded();
        c.patients[0].id = u32::MAX;
        assert_eq!(
            c.create_patient(new_patient("Bo", "Ng")).unwrap_err(),
            StoreError::IdsExhausted {
                entity: EntityKind::Patient
            }
        );
        assert_eq!(c.patients().len(), 1);
    }

    #[test]
    fn ann_and_bo_scenario() {
        let mut c = seeded();
        let bo = c.create_patient(new_patient("Bo", "Ng")).unwrap();
        assert_eq!(bo.id, 2);

        let hits = c.search_patients("bo");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);

        c.delete_patient(1).unwrap();
        assert_eq!(
            c.patient(1).unwrap_err(),
            StoreError::not_found(EntityKind::Patient, 1)
        );
    }

    #[test]
    fn deleting_highest_id_frees_it_for_reuse() {
        let mut c = seeded();
        c.create_patient(new_patient("Bo", "Ng")).unwrap();
        c.delete_patient(2).unwrap();
        assert_eq!(c.create_patient(new_patient("Cy", "Po")).unwrap().id, 2);
    }

    #[test]
    fn delete_missing_leaves_collection_untouched() {
        let mut c = seeded();
        let before = c.patients();
        assert!(c.delete_patient(9).unwrap_err().is_not_found());
        assert_eq!(c.patients(), before);
    }

    #[test]
    fn delete_preserves_order_of_the_rest() {
        let mut c = seeded();
        c.create_patient(new_patient("Bo", "Ng")).unwrap();
        c.create_patient(new_patient("Cy", "Po")).unwrap();
        c.delete_patient(2).unwrap();
        let ids: Vec<u32> = c.patients().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn returned_records_are_copies() {
        let c = seeded();
        let mut copy = c.patient(1).unwrap();
        copy.first_name = "Mutated".into();
        assert_eq!(c.patient(1).unwrap().first_name, "Ann");
    }

    #[test]
    fn empty_search_matches_everyone_in_order() {
        let mut c = seeded();
        c.create_patient(new_patient("Bo", "Ng")).unwrap();
        let ids: Vec<u32> = c.search_patients("").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn appointment_views_survive_deleted_referents() {
        let mut c = seeded();
        c.create_appointment(new_appointment(1, 1, date(18))).unwrap();
        c.delete_patient(1).unwrap();
        c.doctors.clear();

        let views = c.appointments();
        assert_eq!(views[0].doctor_name, UNKNOWN);
        assert_eq!(views[0].patient_name.as_deref(), Some(UNKNOWN));
    }

    #[test]
    fn per_patient_views_omit_patient_name() {
        let mut c = seeded();
        c.create_appointment(new_appointment(1, 1, date(18))).unwrap();
        c.create_appointment(new_appointment(2, 1, date(18))).unwrap();
        let views = c.appointments_for_patient(1);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].doctor_name, "Dr. Rao");
        assert!(views[0].patient_name.is_none());
    }

    #[test]
    fn appointments_on_filters_by_exact_date() {
        let mut c = seeded();
        c.create_appointment(new_appointment(1, 1, date(18))).unwrap();
        c.create_appointment(new_appointment(1, 1, date(19))).unwrap();
        let views = c.appointments_on(date(18));
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].patient_name.as_deref(), Some("Ann Lee"));
    }

    #[test]
    fn department_update_then_view_recomputes_rate() {
        let mut c = seeded();
        c.departments.push(Department {
            id: 1,
            name: "Cardiology".into(),
            floor: 3,
            total_beds: 10,
            occupied_beds: 7,
            head_doctor_id: 1,
        });
        assert_eq!(c.departments()[0].occupancy_rate, 70);
        c.update_department(
            1,
            DepartmentPatch {
                occupied_beds: Some(9),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(c.departments()[0].occupancy_rate, 90);
    }

    #[test]
    fn doctors_in_is_exact_match() {
        let c = seeded();
        assert_eq!(c.doctors_in("Cardiology").len(), 1);
        assert!(c.doctors_in("cardiology").is_empty());
    }

    #[test]
    fn reseed_replaces_everything() {
        let mut c = seeded();
        c.reseed(Fixtures::empty());
        assert!(c.patients().is_empty());
        assert!(c.doctors().is_empty());
    }
}
