#![forbid(unsafe_code)]

use super::super::ai::ai_error;
use super::numbers::{optional_i64, optional_nullable_i64};
use super::strings::{optional_nullable_string, optional_string, require_string};
use ln_core::dates::parse_date;
use ln_core::{Gender, NewPerson, PersonId, PersonPatch};
use serde_json::Value;
use time::Date;

type Args = serde_json::Map<String, Value>;

fn require_name(args: &Args, key: &str) -> Result<String, Value> {
    let value = require_string(args, key)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ai_error("INVALID_INPUT", &format!("{key} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn parse_gender(raw: &str) -> Result<Gender, Value> {
    Gender::parse(raw)
        .ok_or_else(|| ai_error("INVALID_INPUT", "gender must be \"male\" or \"female\""))
}

fn parse_day(key: &str, raw: &str) -> Result<Option<Date>, Value> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date(raw)
        .map(Some)
        .ok_or_else(|| ai_error("INVALID_INPUT", &format!("{key} must be YYYY-MM-DD")))
}

fn optional_day(args: &Args, key: &str) -> Result<Option<Date>, Value> {
    match optional_string(args, key)? {
        Some(raw) => parse_day(key, &raw),
        None => Ok(None),
    }
}

fn nullable_day(args: &Args, key: &str) -> Result<Option<Option<Date>>, Value> {
    match optional_nullable_string(args, key)? {
        Some(Some(raw)) => parse_day(key, &raw).map(Some),
        Some(None) => Ok(Some(None)),
        None => Ok(None),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub(crate) fn parse_new_person(args: &Args) -> Result<NewPerson, Value> {
    let gender = match optional_string(args, "gender")? {
        Some(raw) => parse_gender(&raw)?,
        None => Gender::default(),
    };
    Ok(NewPerson {
        first_name: require_name(args, "firstName")?,
        last_name: require_name(args, "lastName")?,
        gender,
        phone: non_blank(optional_string(args, "phone")?),
        address: non_blank(optional_string(args, "address")?),
        email: non_blank(optional_string(args, "email")?),
        photo: non_blank(optional_string(args, "photo")?),
        birth_date: optional_day(args, "birthDate")?,
        death_date: optional_day(args, "deathDate")?,
        profession: non_blank(optional_string(args, "profession")?),
        notes: non_blank(optional_string(args, "notes")?),
        parent_id: optional_i64(args, "parentId")?.map(PersonId::new),
    })
}

pub(crate) fn parse_person_patch(args: &Args) -> Result<PersonPatch, Value> {
    let first_name = if args.contains_key("firstName") {
        Some(require_name(args, "firstName")?)
    } else {
        None
    };
    let last_name = if args.contains_key("lastName") {
        Some(require_name(args, "lastName")?)
    } else {
        None
    };
    let gender = match optional_string(args, "gender")? {
        Some(raw) => Some(parse_gender(&raw)?),
        None => None,
    };
    Ok(PersonPatch {
        first_name,
        last_name,
        gender,
        phone: optional_nullable_string(args, "phone")?,
        address: optional_nullable_string(args, "address")?,
        email: optional_nullable_string(args, "email")?,
        photo: optional_nullable_string(args, "photo")?,
        birth_date: nullable_day(args, "birthDate")?,
        death_date: nullable_day(args, "deathDate")?,
        profession: optional_nullable_string(args, "profession")?,
        notes: optional_nullable_string(args, "notes")?,
        parent_id: optional_nullable_i64(args, "parentId")?.map(|id| id.map(PersonId::new)),
    })
}
