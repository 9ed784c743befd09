#![forbid(unsafe_code)]

use super::*;
use ln_core::model::Person;
use serde_json::Value;
use std::collections::HashSet;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    families: &'a [Family],
    export_date: String,
    version: &'static str,
    total_families: usize,
    total_persons: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub families: usize,
    pub persons: usize,
}

impl FamilyStore {
    pub fn export_json(&self) -> Result<String, StoreError> {
        let doc = ExportDocument {
            families: &self.families,
            export_date: dates::to_rfc3339(self.now()),
            version: DATA_VERSION,
            total_families: self.families.len(),
            total_persons: self.total_persons(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// A single family wrapped in an array, so it imports back as-is.
    pub fn export_family_json(&self, family_id: FamilyId) -> Result<String, StoreError> {
        let family = self.family_ref(family_id)?;
        Ok(serde_json::to_string_pretty(std::slice::from_ref(family))?)
    }

    pub fn export_person_json(&self, family_id: FamilyId, person_id: PersonId) -> Result<String, StoreError> {
        let family = self.family_ref(family_id)?;
        let person = tree::find(&family.members, person_id).ok_or(StoreError::UnknownPerson(person_id))?;
        Ok(serde_json::to_string_pretty(person)?)
    }

    /// Replaces every family with the imported ones.
    pub fn import_json(&mut self, text: &str) -> Result<ImportSummary, StoreError> {
        let families = parse_import(text, self.now())?;
        for family in &families {
            observe_family(&mut self.ids, family);
        }
        let summary = ImportSummary {
            families: families.len(),
            persons: count_persons(&families),
        };
        self.families = families;
        self.persist()?;
        info!(families = summary.families, persons = summary.persons, "families imported");
        Ok(summary)
    }
}

fn parse_import(text: &str, now: OffsetDateTime) -> Result<Vec<Family>, StoreError> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| StoreError::InvalidImport(err.to_string()))?;
    let list = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => match map.remove("families") {
            Some(list @ Value::Array(_)) => list,
            Some(_) => {
                return Err(StoreError::InvalidImport(
                    "\"families\" must be an array".to_string(),
                ));
            }
            None => {
                return Err(StoreError::InvalidImport(
                    "missing \"families\" array".to_string(),
                ));
            }
        },
        _ => {
            return Err(StoreError::InvalidImport(
                "expected an object or an array of families".to_string(),
            ));
        }
    };
    let mut families: Vec<Family> =
        serde_json::from_value(list).map_err(|err| StoreError::InvalidImport(err.to_string()))?;

    let mut family_ids = HashSet::new();
    for family in families.iter_mut() {
        if !family_ids.insert(family.id) {
            return Err(StoreError::InvalidImport(format!(
                "family id {} appears more than once",
                family.id
            )));
        }
        if let Some(id) = tree::first_duplicate_id(&family.members) {
            return Err(StoreError::DuplicatePersonId(id));
        }
        tree::relink_parents(&mut family.members);
        fill_timestamps(&mut family.members, now);
    }
    Ok(families)
}

fn fill_timestamps(members: &mut [Person], now: OffsetDateTime) {
    for person in members.iter_mut() {
        person.created_at.get_or_insert(now);
        person.updated_at.get_or_insert(now);
        fill_timestamps(&mut person.children, now);
    }
}
