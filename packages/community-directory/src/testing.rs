//! Testing utilities including mock implementations.
//!
//! Useful for exercising the session and directory loader without a running
//! backend or a real clock.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::clock::Clock;
use crate::error::{DirectoryError, Result};
use crate::token::AuthToken;
use crate::traits::api::DirectoryApi;
use crate::types::{
    parse_date_of_birth, AuthResponse, LoginRequest, Member, MemberRecord, RegisterRequest,
};

/// A clock stuck on one day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        Self(NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date"))
    }

    pub fn shared(self) -> Arc<dyn Clock> {
        Arc::new(self)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// A clock the test moves by hand, e.g. across a birthday.
#[derive(Debug)]
pub struct ManualClock(RwLock<NaiveDate>);

impl ManualClock {
    pub fn ymd(year: i32, month: u32, day: u32) -> Arc<Self> {
        Arc::new(Self(RwLock::new(
            NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date"),
        )))
    }

    pub fn set(&self, today: NaiveDate) {
        *self.0.write().unwrap() = today;
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        *self.0.read().unwrap()
    }
}

/// Day all fixture members are built against.
pub fn fixture_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid fixture date")
}

/// A member record born 1990-05-15 with the given searchable fields.
pub fn record(id: &str, full_name: &str, location: &str, occupation: &str) -> MemberRecord {
    MemberRecord {
        id: id.to_string(),
        full_name: full_name.to_string(),
        email: format!("member{id}@example.com"),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 15).expect("valid fixture date"),
        gender: "female".to_string(),
        location: location.to_string(),
        occupation: occupation.to_string(),
    }
}

/// [`record`] turned into a [`Member`] as of [`fixture_today`].
pub fn member(id: &str, full_name: &str, location: &str, occupation: &str) -> Member {
    Member::from_record(record(id, full_name, location, occupation), fixture_today())
}

/// Record of a call made to the mock backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockApiCall {
    Login { email: String },
    Register { email: String },
    FetchProfile { token: String },
    ListMembers,
}

struct MockAccount {
    password: String,
    token: AuthToken,
    record: MemberRecord,
}

/// An in-memory stand-in for the directory backend.
///
/// Accounts log in with exact email/password matches; each account's token
/// fetches its profile. Unknown tokens get `Authentication` errors, the way
/// an expired token would.
#[derive(Default)]
pub struct MockDirectoryApi {
    accounts: RwLock<HashMap<String, MockAccount>>,
    members: RwLock<Vec<MemberRecord>>,
    members_unreachable: RwLock<bool>,
    offline: RwLock<bool>,
    calls: RwLock<Vec<MockApiCall>>,
}

impl MockDirectoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account that can log in and fetch its profile with `token`.
    pub fn with_account(
        self,
        email: impl Into<String>,
        password: impl Into<String>,
        token: impl Into<AuthToken>,
        record: MemberRecord,
    ) -> Self {
        self.accounts.write().unwrap().insert(
            email.into(),
            MockAccount {
                password: password.into(),
                token: token.into(),
                record,
            },
        );
        self
    }

    /// Members returned by `list_members`.
    pub fn with_members(self, members: Vec<MemberRecord>) -> Self {
        *self.members.write().unwrap() = members;
        self
    }

    /// Make `list_members` fail with a network error.
    pub fn with_unreachable_members(self) -> Self {
        *self.members_unreachable.write().unwrap() = true;
        self
    }

    /// Toggle whether every call fails with a network error.
    pub fn set_offline(&self, offline: bool) {
        *self.offline.write().unwrap() = offline;
    }

    /// Invalidate every token issued for `email`, as a server-side expiry would.
    pub fn revoke(&self, email: &str) {
        if let Some(account) = self.accounts.write().unwrap().get_mut(email) {
            account.token = AuthToken::new(format!("revoked-{email}"));
        }
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<MockApiCall> {
        self.calls.read().unwrap().clone()
    }

    fn record_call(&self, call: MockApiCall) -> Result<()> {
        self.calls.write().unwrap().push(call);
        if *self.offline.read().unwrap() {
            return Err(DirectoryError::Network("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DirectoryApi for MockDirectoryApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        self.record_call(MockApiCall::Login {
            email: request.email.clone(),
        })?;

        let accounts = self.accounts.read().unwrap();
        match accounts.get(&request.email) {
            Some(account) if account.password == request.password => Ok(AuthResponse {
                token: account.token.clone(),
                user: account.record.clone(),
            }),
            _ => Err(DirectoryError::Authentication("Invalid credentials".into())),
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.record_call(MockApiCall::Register {
            email: request.email.clone(),
        })?;

        let mut accounts = self.accounts.write().unwrap();
        if accounts.contains_key(&request.email) {
            return Err(DirectoryError::Validation("Email already registered".into()));
        }

        let date_of_birth = parse_date_of_birth(&request.date_of_birth)
            .ok_or_else(|| DirectoryError::Validation("Invalid date of birth".into()))?;

        let record = MemberRecord {
            id: format!("m{}", accounts.len() + 1),
            full_name: request.full_name.clone(),
            email: request.email.clone(),
            date_of_birth,
            gender: request.gender.clone(),
            location: request.location.clone(),
            occupation: request.occupation.clone(),
        };
        let token = AuthToken::new(format!("token-{}", request.email));

        accounts.insert(
            request.email.clone(),
            MockAccount {
                password: request.password.clone(),
                token: token.clone(),
                record: record.clone(),
            },
        );

        Ok(AuthResponse {
            token,
            user: record,
        })
    }

    async fn fetch_profile(&self, token: &AuthToken) -> Result<MemberRecord> {
        self.record_call(MockApiCall::FetchProfile {
            token: token.expose().to_string(),
        })?;

        self.accounts
            .read()
            .unwrap()
            .values()
            .find(|account| &account.token == token)
            .map(|account| account.record.clone())
            .ok_or_else(|| DirectoryError::Authentication("Invalid or expired token".into()))
    }

    async fn list_members(&self) -> Result<Vec<MemberRecord>> {
        self.record_call(MockApiCall::ListMembers)?;

        if *self.members_unreachable.read().unwrap() {
            return Err(DirectoryError::Network("members endpoint unreachable".into()));
        }
        Ok(self.members.read().unwrap().clone())
    }
}
