#![forbid(unsafe_code)]

use super::numbers::require_i64;
use ln_core::{FamilyId, PersonId};
use serde_json::Value;

pub(crate) fn require_family_id(args: &serde_json::Map<String, Value>) -> Result<FamilyId, Value> {
    require_i64(args, "familyId").map(FamilyId::new)
}

pub(crate) fn require_person_id(args: &serde_json::Map<String, Value>) -> Result<PersonId, Value> {
    require_i64(args, "personId").map(PersonId::new)
}
