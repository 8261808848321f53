use chrono::NaiveDate;
use community_directory::{MemberRecord, RegisterRequest};
use serde_json::{json, Value};
use std::path::PathBuf;
use uuid::Uuid;

pub const AMINA_EMAIL: &str = "amina@example.com";
pub const AMINA_PASSWORD: &str = "correct-horse";
pub const AMINA_TOKEN: &str = "tok-amina";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn amina() -> MemberRecord {
    MemberRecord {
        id: "1".into(),
        full_name: "Amina Hassan".into(),
        email: AMINA_EMAIL.into(),
        date_of_birth: date(1990, 5, 15),
        gender: "female".into(),
        location: "Mombasa, Kenya".into(),
        occupation: "Marine Biologist".into(),
    }
}

/// Amina as the backend serialises her, including a stale `age`.
pub fn amina_json() -> Value {
    json!({
        "id": "1",
        "fullName": "Amina Hassan",
        "email": AMINA_EMAIL,
        "dateOfBirth": "1990-05-15",
        "gender": "female",
        "location": "Mombasa, Kenya",
        "occupation": "Marine Biologist",
        "age": 18
    })
}

pub fn members_json() -> Value {
    json!([
        amina_json(),
        {
            "id": "2",
            "fullName": "Omar Ali",
            "email": "omar@example.com",
            "dateOfBirth": "1985-12-03T00:00:00.000Z",
            "gender": "male",
            "location": "Mogadishu, Somalia",
            "occupation": "Software Engineer"
        }
    ])
}

pub fn registration(email: &str) -> RegisterRequest {
    RegisterRequest {
        full_name: "Zainab Omar".into(),
        date_of_birth: "1995-07-18".into(),
        gender: "female".into(),
        location: "Kilifi, Kenya".into(),
        occupation: "Teacher".into(),
        email: email.into(),
        password: "hunter22".into(),
    }
}

/// A token file path in a fresh directory that does not exist yet.
pub fn temp_token_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("community-directory-{}", Uuid::new_v4()))
        .join("token")
}
