#![forbid(unsafe_code)]

pub mod dates;
pub mod error;
pub mod guide;
pub mod ids;
pub mod model;
pub mod patch;
pub mod stats;
pub mod tree;

pub use error::TreeError;
pub use ids::{FamilyId, IdAllocator, PersonId};
pub use model::{Family, FamilyPatch, Gender, NewPerson, Person};
pub use patch::PersonPatch;
