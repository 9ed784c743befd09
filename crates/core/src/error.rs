#![forbid(unsafe_code)]

use crate::ids::PersonId;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("unknown person {0}")]
    UnknownPerson(PersonId),
    #[error("unknown parent {0}")]
    UnknownParent(PersonId),
    #[error("moving person {person} under {parent} would create a cycle")]
    WouldCreateCycle { person: PersonId, parent: PersonId },
    #[error("person id {0} appears more than once")]
    DuplicatePersonId(PersonId),
}
