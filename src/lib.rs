//! Wizard Env Library
//!
//! Typed configuration loading and dual-mode resource indexing, exported
//! for the CLI, the application shell, and integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod paths;
pub mod resources;
