// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Command-line front end for outbreak snapshots.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
