#![forbid(unsafe_code)]

use crate::dates;
use crate::ids::{FamilyId, PersonId};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    #[serde(rename = "male", alias = "homme", alias = "HOMME", alias = "MALE")]
    Male,
    #[serde(rename = "female", alias = "femme", alias = "FEMME", alias = "FEMALE")]
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "homme" | "m" => Some(Gender::Male),
            "female" | "femme" | "f" => Some(Gender::Female),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    #[serde(default, alias = "prenom")]
    pub first_name: String,
    #[serde(default, alias = "nom")]
    pub last_name: String,
    #[serde(default, alias = "genre")]
    pub gender: Gender,
    #[serde(default, alias = "telephone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, alias = "adresse", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(
        default,
        alias = "dateNaissance",
        with = "dates::lenient_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_date: Option<Date>,
    #[serde(
        default,
        alias = "dateDeces",
        with = "dates::lenient_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub death_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub parent_id: Option<PersonId>,
    #[serde(default)]
    pub children: Vec<Person>,
}

impl Person {
    pub fn from_new(id: PersonId, data: NewPerson, now: OffsetDateTime) -> Self {
        Self {
            id,
            first_name: data.first_name,
            last_name: data.last_name,
            gender: data.gender,
            phone: data.phone,
            address: data.address,
            email: data.email,
            photo: data.photo,
            birth_date: data.birth_date,
            death_date: data.death_date,
            profession: data.profession,
            notes: data.notes,
            created_at: Some(now),
            updated_at: Some(now),
            parent_id: data.parent_id,
            children: Vec::new(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Case-insensitive substring match over first and last name.
    /// `needle` must already be lower-cased.
    pub fn name_matches(&self, needle: &str) -> bool {
        self.first_name.to_lowercase().contains(needle)
            || self.last_name.to_lowercase().contains(needle)
    }
}

/// Person data supplied by a caller; the store assigns the id and owns the children.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub photo: Option<String>,
    pub birth_date: Option<Date>,
    pub death_date: Option<Date>,
    pub profession: Option<String>,
    pub notes: Option<String>,
    pub parent_id: Option<PersonId>,
}

impl NewPerson {
    pub fn named(first_name: &str, last_name: &str, gender: Gender) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            gender,
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent_id: PersonId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: FamilyId,
    pub name: String,
    #[serde(default)]
    pub members: Vec<Person>,
    #[serde(default = "dates::now_utc", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default = "dates::now_utc", with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<String>,
}

impl Family {
    pub fn new(id: FamilyId, name: impl Into<String>, now: OffsetDateTime) -> Self {
        Self {
            id,
            name: name.into(),
            members: Vec::new(),
            created_at: now,
            updated_at: now,
            cover_photo: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FamilyPatch {
    pub name: Option<String>,
    pub cover_photo: Option<Option<String>>,
}

impl FamilyPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.cover_photo.is_none()
    }
}
