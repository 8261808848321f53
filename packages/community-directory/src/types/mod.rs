//! Data types exchanged with the directory backend.

pub mod auth;
pub mod member;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use member::{parse_date_of_birth, Member, MemberRecord};
