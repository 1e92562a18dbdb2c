//! CLI command handlers
//!
//! This module contains the command handlers for the holiday-export binary.

pub mod countries;
pub mod export;

pub use countries::handle_countries_command;
pub use export::{handle_export_command, ExportArgs, YearSpec};
