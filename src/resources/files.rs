//! Resource categories: one directory, one file snapshot.

use crate::error::{ResourceError, ResourceResult};
use crate::paths::{absolutize, current_dir};
use std::path::{Path, PathBuf};
use tracing::error;

/// Lookup interface shared by every resource category.
pub trait ResourceResolver {
    /// Category name.
    fn name(&self) -> &str;

    /// All files indexed when the category was registered.
    fn list_all(&self) -> &[PathBuf];

    /// Locate `name_or_path`, or `None` if no search step finds it.
    fn find(&self, name_or_path: &str) -> Option<PathBuf>;

    /// Locate `name_or_path`, failing with `ResourceError::NotFound` on a miss.
    fn resolve(&self, name_or_path: &str) -> ResourceResult<PathBuf> {
        self.find(name_or_path).ok_or_else(|| {
            error!(category = %self.name(), name = %name_or_path, "Resource not found");
            ResourceError::not_found(self.name(), name_or_path)
        })
    }
}

/// A named asset directory and the files it held at index time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCategory {
    name: String,
    dir: PathBuf,
    files: Vec<PathBuf>,
    /// Extra search root, set only for packaged distributions.
    fallback_root: Option<PathBuf>,
}

impl ResourceCategory {
    /// Register a category and snapshot the files under `dir`.
    pub fn index(name: impl Into<String>, dir: PathBuf, fallback_root: Option<PathBuf>) -> Self {
        let files = list_files(&dir);
        Self {
            name: name.into(),
            dir,
            files,
            fallback_root,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ResourceResolver for ResourceCategory {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_all(&self) -> &[PathBuf] {
        &self.files
    }

    fn find(&self, name_or_path: &str) -> Option<PathBuf> {
        let path = Path::new(name_or_path);

        // Absolute, or relative to the working directory
        if path.exists() {
            return Some(resolved(path));
        }

        let candidate = self.dir.join(path);
        if candidate.exists() {
            return Some(resolved(&candidate));
        }

        if let Some(root) = &self.fallback_root {
            let candidate = root.join(path);
            if candidate.exists() {
                return Some(resolved(&candidate));
            }
        }

        None
    }
}

/// Absolute form of an existing path.
fn resolved(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| absolutize(path, &current_dir()))
}

/// Recursively list regular files under `dir`.
///
/// Returns an empty list if `dir` does not exist. Order follows the
/// directory traversal and is not stable.
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let Ok(entries) = std::fs::read_dir(&current) else {
            continue;
        };
        for entry in entries.flatten() {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            let path = entry.path();
            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
                files.push(path);
            }
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
        paths.sort();
        paths
    }

    #[test]
    fn test_list_files_recursive() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("nested").join("deeper");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("a.png"), "").unwrap();
        fs::write(nested.join("b.svg"), "").unwrap();

        let files = sorted(list_files(temp.path()));
        assert_eq!(
            files,
            sorted(vec![temp.path().join("a.png"), nested.join("b.svg")])
        );
    }

    #[test]
    fn test_list_files_missing_dir() {
        let temp = TempDir::new().unwrap();
        assert!(list_files(&temp.path().join("absent")).is_empty());
    }

    #[test]
    fn test_find_in_category_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("logo.png"), "").unwrap();

        let category = ResourceCategory::index("icons", temp.path().to_path_buf(), None);
        let found = category.find("logo.png").unwrap();
        assert_eq!(found, fs::canonicalize(temp.path().join("logo.png")).unwrap());
        assert!(category.find("missing-icon-for-test.png").is_none());
    }

    #[test]
    fn test_find_falls_back_to_bundle_root() {
        let temp = TempDir::new().unwrap();
        let icons = temp.path().join("icons");
        fs::create_dir_all(&icons).unwrap();
        fs::write(temp.path().join("shared-banner.png"), "").unwrap();

        let without = ResourceCategory::index("icons", icons.clone(), None);
        assert!(without.find("shared-banner.png").is_none());

        let with = ResourceCategory::index("icons", icons, Some(temp.path().to_path_buf()));
        assert_eq!(
            with.find("shared-banner.png").unwrap(),
            fs::canonicalize(temp.path().join("shared-banner.png")).unwrap()
        );
    }

    #[test]
    fn test_resolve_not_found_error() {
        let temp = TempDir::new().unwrap();
        let category = ResourceCategory::index("icons", temp.path().to_path_buf(), None);
        let err = category.resolve("missing-icon-for-test.png").unwrap_err();
        assert!(matches!(err, ResourceError::NotFound { .. }));
    }
}
