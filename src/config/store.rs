//! Load-once configuration cache.

use super::loader::{ConfigLoader, LoadReport};
use super::types::ConfigMap;
use std::fmt;
use std::sync::OnceLock;

type LoadFn = Box<dyn Fn() -> LoadReport + Send + Sync>;

/// Caches the result of the first load for the lifetime of the store.
///
/// Concurrent first calls are serialized by the `OnceLock`, so the loader
/// runs exactly once. There is no way to invalidate the cache.
pub struct ConfigStore {
    loader: LoadFn,
    report: OnceLock<LoadReport>,
}

impl ConfigStore {
    pub fn new(loader: ConfigLoader) -> Self {
        Self::with_loader(move || loader.load_report())
    }

    /// Build a store around an arbitrary load function.
    pub fn with_loader(load: impl Fn() -> LoadReport + Send + Sync + 'static) -> Self {
        Self {
            loader: Box::new(load),
            report: OnceLock::new(),
        }
    }

    /// The cached configuration, loading it on first access.
    pub fn get(&self) -> &ConfigMap {
        &self.report().config
    }

    /// The cached load report, loading it on first access.
    pub fn report(&self) -> &LoadReport {
        self.report.get_or_init(|| (self.loader)())
    }

    pub fn is_loaded(&self) -> bool {
        self.report.get().is_some()
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

static GLOBAL: OnceLock<ConfigStore> = OnceLock::new();

/// Install the process-wide store. Returns `false` if one already exists.
pub fn init_global(loader: ConfigLoader) -> bool {
    GLOBAL.set(ConfigStore::new(loader)).is_ok()
}

/// The process-wide store, created with a default loader if not installed.
pub fn global() -> &'static ConfigStore {
    GLOBAL.get_or_init(|| ConfigStore::new(ConfigLoader::default()))
}
