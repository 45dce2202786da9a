//! Command-line front end for ketama rings.
//!
//! Provides commands for:
//! - Routing keys to servers
//! - Inspecting ring state (point counts, ownership)
//! - Dumping the continuum

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
