#![forbid(unsafe_code)]

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

pub fn now_ms(now: OffsetDateTime) -> i64 {
    let ms = now.unix_timestamp_nanos() / 1_000_000i128;
    if ms <= 0 {
        0
    } else if ms >= i64::MAX as i128 {
        i64::MAX
    } else {
        ms as i64
    }
}

pub fn to_rfc3339(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

/// Whole years between `birth` and `today`.
pub fn calculate_age(birth: Date, today: Date) -> i32 {
    let mut age = today.year() - birth.year();
    let (bm, bd) = (birth.month() as u8, birth.day());
    let (tm, td) = (today.month() as u8, today.day());
    if tm < bm || (tm == bm && td < bd) {
        age -= 1;
    }
    age
}

pub fn format_date(date: Date) -> String {
    date.format(format_description!("[day]/[month]/[year]"))
        .unwrap_or_default()
}

pub fn parse_date(value: &str) -> Option<Date> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = Date::parse(value, format_description!("[year]-[month]-[day]")) {
        return Some(date);
    }
    OffsetDateTime::parse(value, &Rfc3339)
        .ok()
        .map(|ts| ts.date())
}

/// Calendar dates as `YYYY-MM-DD`, reading full RFC 3339 timestamps as well.
pub mod lenient_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;
    use time::macros::format_description;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = date
            .format(format_description!("[year]-[month]-[day]"))
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};
        use time::Date;

        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        // Empty strings come out of cleared form fields and mean "no date".
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            match raw {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => crate::dates::parse_date(&raw)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}"))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn age_counts_only_passed_birthdays() {
        assert_eq!(calculate_age(date!(1990 - 06 - 15), date!(2020 - 06 - 14)), 29);
        assert_eq!(calculate_age(date!(1990 - 06 - 15), date!(2020 - 06 - 15)), 30);
        assert_eq!(calculate_age(date!(1990 - 06 - 15), date!(2020 - 12 - 01)), 30);
    }

    #[test]
    fn format_is_day_month_year() {
        assert_eq!(format_date(date!(2001 - 02 - 03)), "03/02/2001");
    }

    #[test]
    fn parse_accepts_plain_dates_and_timestamps() {
        assert_eq!(parse_date("1980-01-31"), Some(date!(1980 - 01 - 31)));
        assert_eq!(
            parse_date("1980-01-31T10:00:00.000Z"),
            Some(date!(1980 - 01 - 31))
        );
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("31/01/1980"), None);
    }
}
