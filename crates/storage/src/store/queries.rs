#![forbid(unsafe_code)]

use super::*;
use ln_core::model::Person;
use ln_core::stats::{self, FamilyStats, FlatPerson, PersonDetails};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub family_id: FamilyId,
    pub family_name: String,
    pub generation: usize,
    pub person: Person,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatistics {
    pub total_families: usize,
    pub total_persons: usize,
    pub storage_used_bytes: u64,
    pub storage_used: String,
    pub last_backup: Option<String>,
}

impl FamilyStore {
    /// Name search across every family, in tree order.
    pub fn search_persons(&self, term: &str) -> Vec<SearchHit> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let mut hits = Vec::new();
        for family in &self.families {
            for visit in tree::walk(&family.members) {
                if visit.person.name_matches(&needle) {
                    hits.push(SearchHit {
                        family_id: family.id,
                        family_name: family.name.clone(),
                        generation: visit.depth,
                        person: visit.person.clone(),
                    });
                }
            }
        }
        hits
    }

    pub fn family_stats(&self, family_id: FamilyId) -> Result<FamilyStats, StoreError> {
        Ok(FamilyStats::compute(self.family_ref(family_id)?))
    }

    pub fn generation_of(&self, family_id: FamilyId, person_id: PersonId) -> Option<usize> {
        self.family(family_id)
            .and_then(|family| tree::depth_of(&family.members, person_id))
    }

    pub fn parent_name(&self, family_id: FamilyId, person_id: PersonId) -> Option<String> {
        self.family(family_id)
            .and_then(|family| tree::parent_of(&family.members, person_id))
            .map(Person::full_name)
    }

    pub fn members_at_level(&self, family_id: FamilyId, level: usize) -> Result<Vec<&Person>, StoreError> {
        let family = self.family_ref(family_id)?;
        Ok(tree::at_level(&family.members, level))
    }

    pub fn flatten(&self, family_id: FamilyId) -> Result<Vec<FlatPerson>, StoreError> {
        Ok(stats::flatten(&self.family_ref(family_id)?.members))
    }

    pub fn person_details(&self, family_id: FamilyId, person_id: PersonId) -> Result<PersonDetails, StoreError> {
        let family = self.family_ref(family_id)?;
        let person = tree::find(&family.members, person_id).ok_or(StoreError::UnknownPerson(person_id))?;
        Ok(PersonDetails::compute(person, self.now().date()))
    }

    pub fn total_persons(&self) -> usize {
        count_persons(&self.families)
    }

    pub fn total_generations(&self) -> usize {
        self.families
            .iter()
            .map(|family| FamilyStats::compute(family).generations)
            .sum()
    }

    pub fn statistics(&self) -> Result<StoreStatistics, StoreError> {
        // Only the family database counts; backups and guide progress do not.
        let database_bytes = self.local.value_bytes(DB_KEY)?;
        let storage_used_bytes = database_bytes.unwrap_or(0);
        let storage_used = match database_bytes {
            Some(bytes) if bytes > 0 => stats::format_bytes(bytes),
            _ => "0 KB".to_string(),
        };
        let last_backup = self
            .backups()?
            .first()
            .map(|entry| entry.timestamp.clone());
        Ok(StoreStatistics {
            total_families: self.families.len(),
            total_persons: self.total_persons(),
            storage_used_bytes,
            storage_used,
            last_backup,
        })
    }
}
