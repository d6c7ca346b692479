//! Resource indexing.
//!
//! Categories are declared with `RESOURCES_<NAME>=<path>` configuration
//! keys. `RESOURCES_BASE` overrides the resource root name (default
//! `resources`), which is resolved against the working directory in a
//! source checkout and against the bundle directory when packaged.
//!
//! Each category exposes the same two operations through
//! [`ResourceResolver`]: `list_all` and `resolve`.

mod files;
mod index;

pub use files::{ResourceCategory, ResourceResolver, list_files};
pub use index::{BASE_CATEGORY, DEFAULT_PREFIX, DEFAULT_ROOT_NAME, ResourceIndex};
