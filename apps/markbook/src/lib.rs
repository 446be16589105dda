//! # markbook (binary crate library)
//!
//! Library surface of the Markbook binary, exposed so integration tests can
//! drive the HTTP API and roster loading without spawning a process.

pub mod api;
pub mod cli;
pub mod config;
pub mod roster;
