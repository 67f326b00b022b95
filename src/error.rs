use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Which collection an identifier was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Patient,
    Doctor,
    Appointment,
    Department,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Patient => write!(f, "Patient"),
            Self::Doctor => write!(f, "Doctor"),
            Self::Appointment => write!(f, "Appointment"),
            Self::Department => write!(f, "Department"),
        }
    }
}

/// Errors surfaced by the access API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: u32 },

    #[error("Entity store is not running")]
    StoreClosed,

    #[error("No {entity} ids left to assign")]
    IdsExhausted { entity: EntityKind },
}

impl StoreError {
    pub fn not_found(entity: EntityKind, id: u32) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors raised while loading or checking fixture documents.
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed fixture {file}: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate {entity} id {id} in fixtures")]
    DuplicateId { entity: EntityKind, id: u32 },

    #[error("Invalid {entity} id {id} in fixtures (ids run from 1 to u32::MAX - 1)")]
    InvalidId { entity: EntityKind, id: u32 },
}

/// Errors from reading configuration out of the environment.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Startup failures: either the configuration or the fixtures were bad.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fixture error: {0}")]
    Fixture(#[from] FixtureError),
}
