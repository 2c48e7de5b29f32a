//! Domain types and rules shared by the account backend crates.
//!
//! Nothing in here touches the database or the logging pipeline; the
//! `account-db` and `account-telemetry` crates build on these definitions.

pub mod error;
pub mod project;
pub mod types;
