#![forbid(unsafe_code)]

use crate::dates;
use crate::ids::PersonId;
use crate::model::{Family, Gender, Person};
use crate::tree;
use serde::Serialize;
use time::Date;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyStats {
    pub total_members: usize,
    pub males: usize,
    pub females: usize,
    pub max_depth: usize,
    pub generations: usize,
    pub members_by_level: Vec<usize>,
    pub growth_trend: u8,
}

impl FamilyStats {
    pub fn compute(family: &Family) -> Self {
        let members = &family.members;
        let total_members = tree::count(members);
        let mut males = 0;
        let mut females = 0;
        for visit in tree::walk(members) {
            match visit.person.gender {
                Gender::Male => males += 1,
                Gender::Female => females += 1,
            }
        }
        let max_depth = tree::max_depth(members);
        let generations = if members.is_empty() { 0 } else { max_depth + 1 };
        let members_by_level = (0..generations)
            .map(|level| tree::count_at_level(members, level))
            .collect();
        Self {
            total_members,
            males,
            females,
            max_depth,
            generations,
            members_by_level,
            growth_trend: growth_trend(total_members),
        }
    }
}

/// 2 for large families, 1 for medium ones, 0 otherwise.
pub fn growth_trend(member_count: usize) -> u8 {
    if member_count > 20 {
        2
    } else if member_count > 10 {
        1
    } else {
        0
    }
}

pub fn generation_title(level: usize) -> String {
    const TITLES: [&str; 4] = ["Founders", "Parents", "Grandparents", "Great-grandparents"];
    match TITLES.get(level) {
        Some(title) => (*title).to_string(),
        None => format!("Generation {}", level + 1),
    }
}

/// One row of a flattened family, ready for tabular export.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatPerson {
    pub id: PersonId,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub generation: usize,
    pub parent_id: Option<PersonId>,
    pub parent_name: Option<String>,
    pub children_count: usize,
}

pub fn flatten(members: &[Person]) -> Vec<FlatPerson> {
    tree::walk(members)
        .map(|visit| {
            let person = visit.person;
            FlatPerson {
                id: person.id,
                full_name: person.full_name(),
                first_name: person.first_name.clone(),
                last_name: person.last_name.clone(),
                gender: person.gender,
                phone: person.phone.clone(),
                email: person.email.clone(),
                address: person.address.clone(),
                generation: visit.depth,
                parent_id: visit.parent.map(|p| p.id),
                parent_name: visit.parent.map(Person::full_name),
                children_count: person.children.len(),
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetails {
    pub initials: String,
    pub has_phone: bool,
    pub has_email: bool,
    pub has_address: bool,
    pub children_count: usize,
    pub age: Option<i32>,
}

impl PersonDetails {
    pub fn compute(person: &Person, today: Date) -> Self {
        let initials = person
            .first_name
            .chars()
            .take(1)
            .chain(person.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect();
        Self {
            initials,
            has_phone: has_text(&person.phone),
            has_email: has_text(&person.email),
            has_address: has_text(&person.address),
            children_count: person.children.len(),
            age: person
                .birth_date
                .map(|birth| dates::calculate_age(birth, today)),
        }
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Human-readable byte size with at most two decimals, e.g. `1.5 KB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}
