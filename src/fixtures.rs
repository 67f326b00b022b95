//! Seed data for the entity store.
//!
//! One JSON array per collection. A default set is compiled into the
//! crate; a directory holding the same four files can replace it.

use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{EntityKind, FixtureError};
use crate::models::{Appointment, Department, Doctor, Identified, Patient};

pub const PATIENTS_FILE: &str = "patients.json";
pub const DOCTORS_FILE: &str = "doctors.json";
pub const APPOINTMENTS_FILE: &str = "appointments.json";
pub const DEPARTMENTS_FILE: &str = "departments.json";

const EMBEDDED_PATIENTS: &str = include_str!("../fixtures/patients.json");
const EMBEDDED_DOCTORS: &str = include_str!("../fixtures/doctors.json");
const EMBEDDED_APPOINTMENTS: &str = include_str!("../fixtures/appointments.json");
const EMBEDDED_DEPARTMENTS: &str = include_str!("../fixtures/departments.json");

/// The four seed collections, in fixture order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fixtures {
    pub patients: Vec<Patient>,
    pub doctors: Vec<Doctor>,
    pub appointments: Vec<Appointment>,
    pub departments: Vec<Department>,
}

impl Fixtures {
    /// Empty collections. Handy as a starting point in tests.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The fixture set bundled with the crate.
    pub fn embedded() -> Result<Self, FixtureError> {
        let fixtures = Self {
            patients: parse(PATIENTS_FILE, EMBEDDED_PATIENTS)?,
            doctors: parse(DOCTORS_FILE, EMBEDDED_DOCTORS)?,
            appointments: parse(APPOINTMENTS_FILE, EMBEDDED_APPOINTMENTS)?,
            departments: parse(DEPARTMENTS_FILE, EMBEDDED_DEPARTMENTS)?,
        };
        fixtures.validate()?;
        Ok(fixtures)
    }

    /// Load `patients.json`, `doctors.json`, `appointments.json` and
    /// `departments.json` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, FixtureError> {
        let fixtures = Self {
            patients: read(dir, PATIENTS_FILE)?,
            doctors: read(dir, DOCTORS_FILE)?,
            appointments: read(dir, APPOINTMENTS_FILE)?,
            departments: read(dir, DEPARTMENTS_FILE)?,
        };
        fixtures.validate()?;
        tracing::info!(
            dir = %dir.display(),
            patients = fixtures.patients.len(),
            doctors = fixtures.doctors.len(),
            appointments = fixtures.appointments.len(),
            departments = fixtures.departments.len(),
            "Fixtures loaded from directory"
        );
        Ok(fixtures)
    }

    /// Every identifier must be non-zero and unique within its collection.
    /// Cross-collection references are not checked; dangling ones are legal.
    pub fn validate(&self) -> Result<(), FixtureError> {
        check_ids(EntityKind::Patient, &self.patients)?;
        check_ids(EntityKind::Doctor, &self.doctors)?;
        check_ids(EntityKind::Appointment, &self.appointments)?;
        check_ids(EntityKind::Department, &self.departments)?;
        Ok(())
    }
}

fn parse<T: DeserializeOwned>(file: &str, raw: &str) -> Result<Vec<T>, FixtureError> {
    serde_json::from_str(raw).map_err(|source| FixtureError::Json {
        file: file.to_string(),
        source,
    })
}

fn read<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<T>, FixtureError> {
    let path = dir.join(file);
    let raw = std::fs::read_to_string(&path).map_err(|source| FixtureError::Io {
        path: path.clone(),
        source,
    })?;
    parse(file, &raw)
}

fn check_ids<T: Identified>(entity: EntityKind, records: &[T]) -> Result<(), FixtureError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        let id = record.id();
        if id == 0 || id == u32::MAX {
            tracing::warn!(%entity, id, "Fixture rejected: id out of range");
            return Err(FixtureError::InvalidId { entity, id });
        }
        if !seen.insert(id) {
            tracing::warn!(%entity, id, "Fixture rejected: duplicate id");
            return Err(FixtureError::DuplicateId { entity, id });
        }
    }
    Ok(())
}
