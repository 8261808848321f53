//! Illustrative members shown when the live list is unavailable and the
//! fallback policy allows it.

use chrono::NaiveDate;

use crate::types::MemberRecord;

const SAMPLE_MEMBERS: &[(&str, &str, &str, (i32, u32, u32), &str, &str, &str)] = &[
    ("1", "Amina Hassan", "amina@example.com", (1990, 5, 15), "female", "Mombasa, Kenya", "Marine Biologist"),
    ("2", "Omar Ali", "omar@example.com", (1985, 12, 3), "male", "Mogadishu, Somalia", "Software Engineer"),
    ("3", "Fatima Mohammed", "fatima@example.com", (1992, 8, 22), "female", "Lamu, Kenya", "Cultural Historian"),
    ("4", "Ahmed Rashid", "ahmed@example.com", (1988, 3, 10), "male", "Kismayo, Somalia", "Fisherman"),
    ("5", "Zainab Omar", "zainab@example.com", (1995, 7, 18), "female", "Kilifi, Kenya", "Teacher"),
    ("6", "Yusuf Abdi", "yusuf@example.com", (1983, 11, 25), "male", "Barawa, Somalia", "Business Owner"),
];

/// The six sample members, in display order.
pub fn sample_records() -> Vec<MemberRecord> {
    SAMPLE_MEMBERS
        .iter()
        .filter_map(|&(id, name, email, (y, m, d), gender, location, occupation)| {
            Some(MemberRecord {
                id: id.to_string(),
                full_name: name.to_string(),
                email: email.to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(y, m, d)?,
                gender: gender.to_string(),
                location: location.to_string(),
                occupation: occupation.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sample_members_present() {
        let records = sample_records();
        assert_eq!(records.len(), SAMPLE_MEMBERS.len());
        assert_eq!(records[0].full_name, "Amina Hassan");
        assert_eq!(records[5].location, "Barawa, Somalia");
    }
}
