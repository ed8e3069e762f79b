//! Clementine Core - Shared types library.
//!
//! Domain vocabulary shared by the `api` service and the `cli` tools:
//! newtype IDs, validated emails, account roles, and order statuses.
//!
//! Nothing in here does I/O. Database and HTTP concerns live in the crates
//! that depend on this one, which keeps `core` cheap to pull in from
//! anywhere (the optional `sqlite` feature only adds sqlx trait impls for
//! the ID types).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
