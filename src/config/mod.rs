//! Typed configuration system.
//!
//! Turns flat `KEY=VALUE` pairs into a typed [`ConfigMap`]:
//! 1. **Source** - the requested `.env` file, or the same relative path
//!    inside the packaged bundle; missing files only produce a warning
//! 2. **Environment** - process variables win over file entries
//! 3. **Cascade** - each `[A-Z0-9_]+` key is cast by the first validator
//!    that accepts it; keys that fail keep their raw string
//!
//! ## Recognized keys
//! - `LOG_LEVEL` - DEBUG, INFO, WARNING, ERROR or CRITICAL
//! - `THEME_MODE` - LIGHT, DARK or AUTO
//! - `*PATH*`, `*DIR*`, `*FILE*` - normalized to absolute paths; extensionless
//!   values are created as directories
//! - `RESOURCES_*` - resource category declarations (see [`crate::resources`])

mod loader;
mod store;
mod types;
pub mod validator;

pub use loader::{ConfigLoader, DEFAULT_ENV_FILE, EnvSource, LoadReport, is_eligible_key};
pub use store::{ConfigStore, global, init_global};
pub use types::*;
