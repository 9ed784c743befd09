#![forbid(unsafe_code)]

use super::*;
use ln_core::model::{FamilyPatch, Gender, NewPerson, Person};

const SAMPLE_FAMILY_NAME: &str = "Sample Family";

impl FamilyStore {
    pub fn families(&self) -> &[Family] {
        &self.families
    }

    pub fn family(&self, id: FamilyId) -> Option<&Family> {
        self.families.iter().find(|family| family.id == id)
    }

    pub fn add_family(&mut self, name: &str) -> Result<Family, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidInput("family name must not be empty"));
        }
        let id = self.next_family_id();
        let family = Family::new(id, name, self.now());
        self.families.push(family.clone());
        self.persist()?;
        info!(family = %id, "family created");
        Ok(family)
    }

    pub fn update_family(&mut self, id: FamilyId, patch: FamilyPatch) -> Result<Family, StoreError> {
        let index = self.family_index(id)?;
        let name = match patch.name.as_deref().map(str::trim) {
            Some("") => return Err(StoreError::InvalidInput("family name must not be empty")),
            other => other.map(str::to_string),
        };
        let now = self.now();
        let family = &mut self.families[index];
        if let Some(name) = name {
            family.name = name;
        }
        if let Some(cover_photo) = patch.cover_photo {
            family.cover_photo = cover_photo;
        }
        touch(family, now);
        let updated = family.clone();
        self.persist()?;
        Ok(updated)
    }

    pub fn rename_family(&mut self, id: FamilyId, name: &str) -> Result<Family, StoreError> {
        self.update_family(
            id,
            FamilyPatch {
                name: Some(name.to_string()),
                cover_photo: None,
            },
        )
    }

    pub fn delete_family(&mut self, id: FamilyId) -> Result<Family, StoreError> {
        let index = self.family_index(id)?;
        let removed = self.families.remove(index);
        self.persist()?;
        info!(family = %id, "family deleted");
        Ok(removed)
    }

    /// Deep copy with fresh family and person ids.
    pub fn duplicate_family(&mut self, id: FamilyId) -> Result<Family, StoreError> {
        let source = self.family_ref(id)?.clone();
        let new_id = self.next_family_id();
        let now = self.now();
        let mut copy = Family {
            id: new_id,
            name: format!("{} (copy)", source.name),
            members: source.members,
            created_at: now,
            updated_at: now,
            cover_photo: source.cover_photo,
        };
        let ids = &mut self.ids;
        let now_ms = dates::now_ms(now);
        tree::reassign_ids(&mut copy.members, &mut || ids.next_person(now_ms));
        self.families.push(copy.clone());
        self.persist()?;
        info!(source = %id, family = %new_id, "family duplicated");
        Ok(copy)
    }

    pub fn create_sample_family(&mut self) -> Result<Family, StoreError> {
        let family_id = self.next_family_id();
        let now = self.now();
        let mut family = Family::new(family_id, SAMPLE_FAMILY_NAME, now);

        let mut founder = self.sample_person("Jean", "Fondateur", Gender::Male, now);
        for (first, last, gender) in [
            ("Alice", "Dupont", Gender::Female),
            ("Paul", "Dupont", Gender::Male),
        ] {
            let mut child = self.sample_person(first, last, gender, now);
            child.parent_id = Some(founder.id);
            founder.children.push(child);
        }
        let cofounder = self.sample_person("Marie", "Fondatrice", Gender::Female, now);
        family.members = vec![founder, cofounder];

        self.families.push(family.clone());
        self.persist()?;
        info!(family = %family_id, "sample family created");
        Ok(family)
    }

    /// Forgets every family. Backups and guide progress are left alone.
    pub fn clear_all_data(&mut self) -> Result<(), StoreError> {
        self.families.clear();
        self.local.remove_item(DB_KEY)?;
        info!("family data cleared");
        Ok(())
    }

    fn sample_person(&mut self, first: &str, last: &str, gender: Gender, now: OffsetDateTime) -> Person {
        let id = self.next_person_id();
        Person::from_new(id, NewPerson::named(first, last, gender), now)
    }
}
