#![forbid(unsafe_code)]

use crate::ids::PersonId;
use crate::model::{Gender, Person};
use time::{Date, OffsetDateTime};

/// Merge patch for a person.
///
/// Outer `None` leaves a field untouched; `Some(None)` clears an optional field.
/// `parent_id` is not applied here: re-parenting moves the subtree and is done by the store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PersonPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub phone: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub photo: Option<Option<String>>,
    pub birth_date: Option<Option<Date>>,
    pub death_date: Option<Option<Date>>,
    pub profession: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub parent_id: Option<Option<PersonId>>,
}

impl PersonPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, person: &mut Person, now: OffsetDateTime) {
        if let Some(v) = &self.first_name {
            person.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            person.last_name = v.clone();
        }
        if let Some(v) = self.gender {
            person.gender = v;
        }
        merge(&mut person.phone, &self.phone);
        merge(&mut person.address, &self.address);
        merge(&mut person.email, &self.email);
        merge(&mut person.photo, &self.photo);
        merge(&mut person.profession, &self.profession);
        merge(&mut person.notes, &self.notes);
        if let Some(v) = self.birth_date {
            person.birth_date = v;
        }
        if let Some(v) = self.death_date {
            person.death_date = v;
        }
        person.updated_at = Some(now);
    }
}

fn merge(slot: &mut Option<String>, patch: &Option<Option<String>>) {
    if let Some(value) = patch {
        *slot = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewPerson;
    use time::macros::{date, datetime};

    #[test]
    fn patch_merges_and_clears_fields() {
        let now = datetime!(2024-01-01 0:00 UTC);
        let mut data = NewPerson::named("Ada", "Lovelace", Gender::Female);
        data.email = Some("ada@example.org".to_string());
        data.phone = Some("123".to_string());
        let mut person = Person::from_new(PersonId::new(1), data, now);

        let later = datetime!(2024-02-01 0:00 UTC);
        let patch = PersonPatch {
            last_name: Some("King".to_string()),
            phone: Some(None),
            birth_date: Some(Some(date!(1815 - 12 - 10))),
            ..PersonPatch::default()
        };
        patch.apply(&mut person, later);

        assert_eq!(person.first_name, "Ada");
        assert_eq!(person.last_name, "King");
        assert_eq!(person.phone, None);
        assert_eq!(person.email.as_deref(), Some("ada@example.org"));
        assert_eq!(person.birth_date, Some(date!(1815 - 12 - 10)));
        assert_eq!(person.updated_at, Some(later));
        assert_eq!(person.created_at, Some(now));
    }
}
