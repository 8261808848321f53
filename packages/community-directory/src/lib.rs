//! Community Directory Client
//!
//! The reusable logic behind the community directory app: who is signed in,
//! which members to show, and how old they are.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use community_directory::{
//!     DirectoryConfig, FallbackPolicy, HttpDirectoryApi, MemberDirectory, MemberQuery, SortMode,
//!     SystemClock,
//! };
//!
//! let config = DirectoryConfig::from_env()?;
//! let api = HttpDirectoryApi::from_config(&config)?;
//!
//! let directory = MemberDirectory::new(api, Arc::new(SystemClock))
//!     .with_fallback(FallbackPolicy::from(&config));
//! let listing = directory.load().await?;
//!
//! let query = MemberQuery::new("mombasa", SortMode::ByOccupation)
//!     .with_locale(config.collation_locale.clone());
//! let shown = listing.query(&query);
//! println!("{}", MemberQuery::summary(shown.len(), listing.total()));
//! ```
//!
//! # Modules
//!
//! - [`age`] - Calendar age from a birth date
//! - [`query`] - Search, filter and locale-aware ordering of members
//! - [`session`] - Signed-in identity, observable via `tokio::sync::watch`
//! - [`directory`] - Member list loading with an explicit sample-data fallback
//! - [`client`] - reqwest implementation of the backend API
//! - [`stores`] - Token persistence (file, memory)
//! - [`traits`] - Backend and token store abstractions
//! - [`testing`] - Mock backend and fixed clock

pub mod age;
pub mod client;
pub mod clock;
pub mod config;
pub mod directory;
pub mod error;
pub mod query;
pub mod sample;
pub mod session;
pub mod stores;
pub mod testing;
pub mod token;
pub mod traits;
pub mod types;

pub use age::age_in_years;
pub use client::HttpDirectoryApi;
pub use clock::{Clock, SystemClock};
pub use config::DirectoryConfig;
pub use directory::{FallbackPolicy, MemberDirectory, MemberListing, MemberSource};
pub use error::{DirectoryError, Result};
pub use query::{query, query_with, Collation, MemberQuery, SortMode};
pub use session::{Authenticated, Session, SessionState};
pub use stores::{FileTokenStore, MemoryTokenStore};
pub use token::AuthToken;
pub use traits::{api::DirectoryApi, token_store::TokenStore};
pub use types::{AuthResponse, LoginRequest, Member, MemberRecord, RegisterRequest};
