//! Expose lectern's internal API for use in unit and integration testing. The
//! reusable slide logic lives in `lectern-deck`; prefer that crate in
//! production code.
pub mod cli;
pub mod config;
pub mod error;
pub mod utils;
