//! Registry of resource categories declared in configuration.

use super::files::{ResourceCategory, ResourceResolver};
use crate::config::ConfigMap;
use crate::error::{ResourceError, ResourceResult};
use crate::paths::{Distribution, absolutize, current_dir, normalize_path_components};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Key prefix marking a resource category declaration.
pub const DEFAULT_PREFIX: &str = "RESOURCES_";

/// Resource root directory name when no `base` is declared.
pub const DEFAULT_ROOT_NAME: &str = "resources";

/// Reserved category name that overrides the resource root.
pub const BASE_CATEGORY: &str = "base";

/// Resolves named asset directories in both source and packaged mode.
#[derive(Debug, Clone)]
pub struct ResourceIndex {
    distribution: Distribution,
    prefix: String,
    /// Declarations from the last successful `initialize` (category -> value).
    declarations: BTreeMap<String, String>,
    root: Option<PathBuf>,
    categories: BTreeMap<String, ResourceCategory>,
}

impl ResourceIndex {
    pub fn new(distribution: Distribution) -> Self {
        Self {
            distribution,
            prefix: DEFAULT_PREFIX.to_string(),
            declarations: BTreeMap::new(),
            root: None,
            categories: BTreeMap::new(),
        }
    }

    /// Use a different declaration prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Index every category declared in a loaded configuration.
    pub fn initialize_from(&mut self, config: &ConfigMap) -> ResourceResult<usize> {
        let subset = config.with_prefix(&self.prefix);
        self.initialize(Some(&subset))
    }

    /// Register and index the categories declared in `config`.
    ///
    /// Keys under the prefix become lower-cased category names. Passing
    /// `None`, or a map without declarations, re-indexes the declarations
    /// from the previous call. With nothing to index at all the condition is
    /// logged as an error, the registry is left untouched and `Ok(0)` is
    /// returned.
    ///
    /// Otherwise every previous category is replaced. Returns the number
    /// of categories indexed.
    pub fn initialize(&mut self, config: Option<&HashMap<String, String>>) -> ResourceResult<usize> {
        let declarations = config
            .map(|cfg| self.extract_declarations(cfg))
            .unwrap_or_default();

        let declarations = if !declarations.is_empty() {
            declarations
        } else if !self.declarations.is_empty() {
            self.declarations.clone()
        } else {
            let err = ResourceError::Uninitialized;
            error!(code = %err.code(), "{}", err);
            return Ok(0);
        };

        let root_name = declarations
            .get(BASE_CATEGORY)
            .map(String::as_str)
            .unwrap_or(DEFAULT_ROOT_NAME);
        let anchor = absolutize(self.distribution.root(), &current_dir());
        let root = absolutize(Path::new(root_name), &anchor);
        let fallback_root = self.distribution.is_packaged().then(|| root.clone());

        let mut categories = BTreeMap::new();
        for (name, value) in &declarations {
            if name == BASE_CATEGORY {
                continue;
            }

            let dir = self.category_dir(&root, name, value);
            let category = ResourceCategory::index(name.clone(), dir, fallback_root.clone());
            debug!(
                category = %name,
                files = category.list_all().len(),
                dir = %category.dir().display(),
                "Indexed resource category"
            );
            categories.insert(name.clone(), category);
        }

        let count = categories.len();
        self.declarations = declarations;
        self.root = Some(root);
        self.categories = categories;
        Ok(count)
    }

    fn extract_declarations(&self, config: &HashMap<String, String>) -> BTreeMap<String, String> {
        config
            .iter()
            .filter_map(|(key, value)| {
                let name = key.strip_prefix(&self.prefix)?;
                (!name.is_empty()).then(|| (name.to_lowercase(), value.clone()))
            })
            .collect()
    }

    /// Directory for one category; created on demand in source mode.
    fn category_dir(&self, root: &Path, name: &str, value: &str) -> PathBuf {
        if self.distribution.is_packaged() {
            return root.join(name);
        }

        let configured = Path::new(value);
        let dir = if configured.is_absolute() {
            normalize_path_components(configured)
        } else {
            // Only the final segment of a relative declaration is kept
            match configured.file_name() {
                Some(last) => root.join(last),
                None => root.join(name),
            }
        };

        if !dir.exists()
            && let Err(e) = std::fs::create_dir_all(&dir)
        {
            warn!(category = %name, dir = %dir.display(), error = %e, "Failed to create resource directory");
        }
        std::fs::canonicalize(&dir).unwrap_or(dir)
    }

    pub fn is_initialized(&self) -> bool {
        self.root.is_some()
    }

    /// The resource root (`base`), once initialized.
    pub fn base(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Registered category names, sorted.
    pub fn categories(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    pub fn category(&self, name: &str) -> Option<&ResourceCategory> {
        self.categories.get(name)
    }

    fn require(&self, name: &str) -> ResourceResult<&ResourceCategory> {
        self.category(name)
            .ok_or_else(|| ResourceError::UnknownCategory(name.to_string()))
    }

    /// Files captured for `category` at the last `initialize`.
    pub fn list_all(&self, category: &str) -> ResourceResult<&[PathBuf]> {
        Ok(self.require(category)?.list_all())
    }

    /// Resolve a name or path within `category`.
    ///
    /// With `suppress_errors`, a miss yields `Ok(None)` instead of
    /// `ResourceError::NotFound`. Unknown categories are always an error.
    pub fn resolve(
        &self,
        category: &str,
        name_or_path: &str,
        suppress_errors: bool,
    ) -> ResourceResult<Option<PathBuf>> {
        let category = self.require(category)?;
        if suppress_errors {
            Ok(category.find(name_or_path))
        } else {
            category.resolve(name_or_path).map(Some)
        }
    }

    /// Every category's snapshot.
    pub fn all(&self) -> BTreeMap<&str, &[PathBuf]> {
        self.categories
            .iter()
            .map(|(name, category)| (name.as_str(), category.list_all()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn decls(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_uninitialized_without_config() {
        let temp = TempDir::new().unwrap();
        let mut index = ResourceIndex::new(Distribution::source(temp.path()));

        assert_eq!(index.initialize(None).unwrap(), 0);
        assert_eq!(index.initialize(Some(&decls(&[("APP_NAME", "x")]))).unwrap(), 0);
        assert!(!index.is_initialized());
        assert!(index.categories().is_empty());
    }

    #[test]
    fn test_source_mode_creates_dirs_under_root() {
        let temp = TempDir::new().unwrap();
        let mut index = ResourceIndex::new(Distribution::source(temp.path()));

        let count = index
            .initialize(Some(&decls(&[
                ("RESOURCES_ICONS", "assets/icons"),
                ("RESOURCES_TEMPLATES", "templates"),
            ])))
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(index.categories(), vec!["icons", "templates"]);
        // final segment of the declaration under the default root
        assert!(temp.path().join("resources").join("icons").is_dir());
        assert!(temp.path().join("resources").join("templates").is_dir());
        assert_eq!(index.base(), Some(temp.path().join("resources").as_path()));
    }

    #[test]
    fn test_base_overrides_root_name() {
        let temp = TempDir::new().unwrap();
        let mut index = ResourceIndex::new(Distribution::source(temp.path()));
        index
            .initialize(Some(&decls(&[
                ("RESOURCES_BASE", "assets"),
                ("RESOURCES_ICONS", "assets/icons"),
            ])))
            .unwrap();

        assert_eq!(index.categories(), vec!["icons"]);
        assert_eq!(index.base(), Some(temp.path().join("assets").as_path()));
        assert!(temp.path().join("assets").join("icons").is_dir());
    }

    #[test]
    fn test_packaged_mode_ignores_declared_paths() {
        let temp = TempDir::new().unwrap();
        let fonts = temp.path().join("resources").join("fonts");
        fs::create_dir_all(&fonts).unwrap();
        fs::write(fonts.join("mono.ttf"), "").unwrap();

        let mut index = ResourceIndex::new(Distribution::packaged(temp.path()));
        index
            .initialize(Some(&decls(&[("RESOURCES_FONTS", "/somewhere/else/fonts")])))
            .unwrap();

        let files = index.list_all("fonts").unwrap();
        assert_eq!(files, &[fonts.join("mono.ttf")]);
    }

    #[test]
    fn test_unknown_category() {
        let temp = TempDir::new().unwrap();
        let mut index = ResourceIndex::new(Distribution::source(temp.path()));
        index
            .initialize(Some(&decls(&[("RESOURCES_ICONS", "icons")])))
            .unwrap();

        assert!(matches!(
            index.list_all("fonts"),
            Err(ResourceError::UnknownCategory(_))
        ));
        assert!(matches!(
            index.resolve("fonts", "x.ttf", true),
            Err(ResourceError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_reinitialize_replaces_categories() {
        let temp = TempDir::new().unwrap();
        let mut index = ResourceIndex::new(Distribution::source(temp.path()));
        index
            .initialize(Some(&decls(&[("RESOURCES_ICONS", "icons")])))
            .unwrap();
        index
            .initialize(Some(&decls(&[("RESOURCES_DATA", "data")])))
            .unwrap();

        assert_eq!(index.categories(), vec!["data"]);
        assert!(index.category("icons").is_none());
    }

    #[test]
    fn test_none_reindexes_cached_declarations() {
        let temp = TempDir::new().unwrap();
        let mut index = ResourceIndex::new(Distribution::source(temp.path()));
        index
            .initialize(Some(&decls(&[("RESOURCES_ICONS", "icons")])))
            .unwrap();
        assert!(index.list_all("icons").unwrap().is_empty());

        fs::write(temp.path().join("resources/icons/new.png"), "").unwrap();
        // snapshot is not live
        assert!(index.list_all("icons").unwrap().is_empty());

        assert_eq!(index.initialize(None).unwrap(), 1);
        assert_eq!(index.list_all("icons").unwrap().len(), 1);
    }

    #[test]
    fn test_custom_prefix() {
        let temp = TempDir::new().unwrap();
        let mut index =
            ResourceIndex::new(Distribution::source(temp.path())).with_prefix("ASSETS_");
        index
            .initialize(Some(&decls(&[
                ("ASSETS_SOUNDS", "sounds"),
                ("RESOURCES_ICONS", "icons"),
            ])))
            .unwrap();
        assert_eq!(index.categories(), vec!["sounds"]);
    }
}
