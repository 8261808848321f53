//! Request and response bodies for the authentication endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DirectoryError, Result};
use crate::token::AuthToken;
use crate::types::member::MemberRecord;

/// Body of `POST /api/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Body of `POST /api/register`. Every field is required.
#[derive(Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    /// ISO 8601 date, `YYYY-MM-DD`
    pub date_of_birth: String,
    pub gender: String,
    pub location: String,
    pub occupation: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Reject obviously incomplete input before it reaches the backend.
    ///
    /// Only blank fields are caught here. Formats (email, birth date) and
    /// duplicates are left to the backend.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("fullName", &self.full_name),
            ("dateOfBirth", &self.date_of_birth),
            ("gender", &self.gender),
            ("location", &self.location),
            ("occupation", &self.occupation),
            ("email", &self.email),
            ("password", &self.password),
        ];

        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(DirectoryError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("full_name", &self.full_name)
            .field("date_of_birth", &self.date_of_birth)
            .field("gender", &self.gender)
            .field("location", &self.location)
            .field("occupation", &self.occupation)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Response of both `POST /api/login` and `POST /api/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: AuthToken,
    pub user: MemberRecord,
}
