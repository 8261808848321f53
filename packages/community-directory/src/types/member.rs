//! Member records as the backend sends them, and members as the app shows them.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::age::age_in_years;

/// A directory entry exactly as the backend returns it.
///
/// Any `age` the backend includes is dropped on deserialization; age is
/// always derived from `date_of_birth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(deserialize_with = "deserialize_date_of_birth")]
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub occupation: String,
}

/// A directory entry with its age derived for a given day.
///
/// Only constructible through [`Member::from_record`], so the age can never
/// come from anywhere but the birth date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub location: String,
    pub occupation: String,
    age: i32,
}

impl Member {
    /// Build a member, deriving `age` as of `today`.
    pub fn from_record(record: MemberRecord, today: NaiveDate) -> Self {
        let age = age_in_years(record.date_of_birth, today);
        Self {
            id: record.id,
            full_name: record.full_name,
            email: record.email,
            date_of_birth: record.date_of_birth,
            gender: record.gender,
            location: record.location,
            occupation: record.occupation,
            age,
        }
    }

    /// Age in whole years as of the day this member was built.
    pub fn age(&self) -> i32 {
        self.age
    }

    /// Age in whole years as of an arbitrary day.
    pub fn age_on(&self, date: NaiveDate) -> i32 {
        age_in_years(self.date_of_birth, date)
    }

    /// A birth date after "today" produces a negative age, which should be
    /// reported as bad data rather than displayed.
    pub fn has_valid_age(&self) -> bool {
        self.age >= 0
    }

    /// Re-derive the age for a new day (e.g. a long-lived listing crossing midnight).
    pub fn refresh_age(&mut self, today: NaiveDate) {
        self.age = age_in_years(self.date_of_birth, today);
    }

    /// Birth date as shown on the profile page, e.g. `May 15, 1990`.
    pub fn formatted_date_of_birth(&self) -> String {
        self.date_of_birth.format("%B %-d, %Y").to_string()
    }
}

/// Parse a birth date from either `YYYY-MM-DD` or a full timestamp.
///
/// Timestamps keep the calendar date as written, ignoring the time of day.
pub fn parse_date_of_birth(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|stamp| stamp.date())
}

fn deserialize_date_of_birth<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date_of_birth(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid dateOfBirth: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_backend_age_is_ignored() {
        let record: MemberRecord = serde_json::from_value(json!({
            "id": "1",
            "fullName": "Amina Hassan",
            "email": "amina@example.com",
            "dateOfBirth": "1990-05-15",
            "gender": "female",
            "location": "Mombasa, Kenya",
            "occupation": "Marine Biologist",
            "age": 99
        }))
        .unwrap();

        let member = Member::from_record(record, date(2024, 5, 14));
        assert_eq!(member.age(), 33);
    }

    #[test]
    fn test_timestamp_birth_date_keeps_calendar_day() {
        assert_eq!(
            parse_date_of_birth("1985-12-03T00:00:00.000Z"),
            Some(date(1985, 12, 3))
        );
        assert_eq!(
            parse_date_of_birth("1985-12-03T23:30:00+03:00"),
            Some(date(1985, 12, 3))
        );
        assert_eq!(parse_date_of_birth("1985-12-03T08:00:00"), Some(date(1985, 12, 3)));
        assert_eq!(parse_date_of_birth("03/12/1985"), None);
    }

    #[test]
    fn test_invalid_birth_date_rejected() {
        let result: std::result::Result<MemberRecord, _> = serde_json::from_value(json!({
            "id": "1",
            "fullName": "Omar Ali",
            "dateOfBirth": "not a date"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_member_serializes_derived_age() {
        let record = MemberRecord {
            id: "2".into(),
            full_name: "Omar Ali".into(),
            email: "omar@example.com".into(),
            date_of_birth: date(1985, 12, 3),
            gender: "male".into(),
            location: "Mogadishu, Somalia".into(),
            occupation: "Software Engineer".into(),
        };
        let member = Member::from_record(record, date(2024, 12, 3));
        let value = serde_json::to_value(&member).unwrap();

        assert_eq!(value["age"], 39);
        assert_eq!(value["fullName"], "Omar Ali");
        assert_eq!(value["dateOfBirth"], "1985-12-03");
    }

    #[test]
    fn test_future_birth_date_flagged() {
        let record = MemberRecord {
            id: "3".into(),
            full_name: "Not Born Yet".into(),
            email: String::new(),
            date_of_birth: date(2030, 1, 1),
            gender: String::new(),
            location: String::new(),
            occupation: String::new(),
        };
        let mut member = Member::from_record(record, date(2024, 1, 1));
        assert!(!member.has_valid_age());

        member.refresh_age(date(2031, 1, 1));
        assert_eq!(member.age(), 1);
        assert!(member.has_valid_age());
    }

    #[test]
    fn test_formatted_date_of_birth() {
        let record = MemberRecord {
            id: "1".into(),
            full_name: "Amina Hassan".into(),
            email: String::new(),
            date_of_birth: date(1990, 5, 5),
            gender: String::new(),
            location: String::new(),
            occupation: String::new(),
        };
        let member = Member::from_record(record, date(2024, 1, 1));
        assert_eq!(member.formatted_date_of_birth(), "May 5, 1990");
    }
}
