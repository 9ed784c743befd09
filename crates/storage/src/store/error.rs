#![forbid(unsafe_code)]

use ln_core::TreeError;
use ln_core::guide::GuideError;
use ln_core::ids::{FamilyId, PersonId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("invalid import: {0}")]
    InvalidImport(String),
    #[error("unknown family {0}")]
    UnknownFamily(FamilyId),
    #[error("unknown person {0}")]
    UnknownPerson(PersonId),
    #[error("unknown parent {0}")]
    UnknownParent(PersonId),
    #[error("moving person {person} under {parent} would create a cycle")]
    WouldCreateCycle { person: PersonId, parent: PersonId },
    #[error("person id {0} appears more than once in a family")]
    DuplicatePersonId(PersonId),
    #[error("storage quota exceeded (required={required}, quota={quota})")]
    QuotaExceeded { required: u64, quota: u64 },
    #[error("unknown backup {0}")]
    UnknownBackup(i64),
    #[error("backup {0} is missing or does not match its checksum")]
    BackupCorrupted(i64),
    #[error("unknown guide step {0}")]
    UnknownGuideStep(String),
    #[error("unknown guide section {0}")]
    UnknownGuideSection(String),
}

impl From<TreeError> for StoreError {
    fn from(value: TreeError) -> Self {
        match value {
            TreeError::UnknownPerson(id) => Self::UnknownPerson(id),
            TreeError::UnknownParent(id) => Self::UnknownParent(id),
            TreeError::WouldCreateCycle { person, parent } => {
                Self::WouldCreateCycle { person, parent }
            }
            TreeError::DuplicatePersonId(id) => Self::DuplicatePersonId(id),
        }
    }
}

impl From<GuideError> for StoreError {
    fn from(value: GuideError) -> Self {
        match value {
            GuideError::UnknownStep(id) => Self::UnknownGuideStep(id),
            GuideError::UnknownSection(id) => Self::UnknownGuideSection(id),
        }
    }
}
