//! Configuration module for holiday-export
//!
//! Export settings files (JSON or YAML) and their layering with
//! command-line flags.

pub mod settings;

pub use settings::ExportSettings;
