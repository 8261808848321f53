//! Seams to the outside world.
//!
//! The session and the directory loader only talk to the backend and to
//! durable storage through these traits, so both can be swapped in tests.

pub mod api;
pub mod token_store;
