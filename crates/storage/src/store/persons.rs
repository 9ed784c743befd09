#![forbid(unsafe_code)]

use super::*;
use ln_core::model::{NewPerson, Person};
use ln_core::patch::PersonPatch;

impl FamilyStore {
    pub fn person(&self, family_id: FamilyId, person_id: PersonId) -> Option<&Person> {
        self.family(family_id)
            .and_then(|family| tree::find(&family.members, person_id))
    }

    pub fn add_person(&mut self, family_id: FamilyId, data: NewPerson) -> Result<Person, StoreError> {
        let index = self.family_index(family_id)?;
        if let Some(parent_id) = data.parent_id
            && !tree::contains(&self.families[index].members, parent_id)
        {
            return Err(StoreError::UnknownParent(parent_id));
        }
        let id = self.next_person_id();
        let now = self.now();
        let parent = data.parent_id;
        let person = Person::from_new(id, data, now);
        let family = &mut self.families[index];
        tree::attach(&mut family.members, person.clone(), parent)?;
        touch(family, now);
        self.persist()?;
        debug!(family = %family_id, person = %id, "person added");
        Ok(person)
    }

    /// Merge-patches a person; a `parent_id` change moves the whole subtree.
    pub fn update_person(
        &mut self,
        family_id: FamilyId,
        person_id: PersonId,
        patch: PersonPatch,
    ) -> Result<Person, StoreError> {
        let index = self.family_index(family_id)?;
        let now = self.now();
        let family = &mut self.families[index];
        if !tree::contains(&family.members, person_id) {
            return Err(StoreError::UnknownPerson(person_id));
        }
        if let Some(new_parent) = patch.parent_id {
            tree::move_to(&mut family.members, person_id, new_parent)?;
        }
        let Some(person) = tree::find_mut(&mut family.members, person_id) else {
            return Err(StoreError::UnknownPerson(person_id));
        };
        patch.apply(person, now);
        let updated = person.clone();
        touch(family, now);
        self.persist()?;
        debug!(family = %family_id, person = %person_id, "person updated");
        Ok(updated)
    }

    /// Removes a person together with all descendants.
    pub fn delete_person(&mut self, family_id: FamilyId, person_id: PersonId) -> Result<Person, StoreError> {
        let index = self.family_index(family_id)?;
        let now = self.now();
        let family = &mut self.families[index];
        let Some(removed) = tree::detach(&mut family.members, person_id) else {
            return Err(StoreError::UnknownPerson(person_id));
        };
        touch(family, now);
        self.persist()?;
        debug!(
            family = %family_id,
            person = %person_id,
            removed = tree::count(std::slice::from_ref(&removed)),
            "person deleted"
        );
        Ok(removed)
    }
}
