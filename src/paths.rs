//! Path normalization and distribution-mode detection.
//!
//! The application runs either from a source checkout (assets live under the
//! working directory) or from a packaged bundle (assets live alongside the
//! executable). Which one is decided once, at build time, by the packager:
//!
//! - `WIZARD_ENV_PACKAGED=1` - compile as a packaged distribution
//! - `WIZARD_ENV_BUNDLE_DIR` - fixed bundle directory (default: executable's directory)
//!
//! Everything else in this module is pure path manipulation.

use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

/// Where the application is running from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Distribution {
    /// Running from a source checkout; relative resources hang off `working_dir`.
    Source { working_dir: PathBuf },
    /// Running from an installed bundle rooted at `bundle_dir`.
    Packaged { bundle_dir: PathBuf },
}

impl Distribution {
    /// Source-tree mode rooted at an explicit directory.
    pub fn source(working_dir: impl Into<PathBuf>) -> Self {
        Distribution::Source {
            working_dir: working_dir.into(),
        }
    }

    /// Packaged mode rooted at an explicit bundle directory.
    pub fn packaged(bundle_dir: impl Into<PathBuf>) -> Self {
        Distribution::Packaged {
            bundle_dir: bundle_dir.into(),
        }
    }

    /// Detect the distribution mode from the build-time marker.
    pub fn detect() -> Self {
        if is_packaged_build() {
            let bundle_dir = option_env!("WIZARD_ENV_BUNDLE_DIR")
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::current_exe()
                        .ok()
                        .and_then(|exe| exe.parent().map(Path::to_path_buf))
                })
                .unwrap_or_else(current_dir);
            Self::packaged(bundle_dir)
        } else {
            Self::source(current_dir())
        }
    }

    /// The process-wide distribution, detected on first access.
    pub fn current() -> &'static Distribution {
        static CURRENT: OnceLock<Distribution> = OnceLock::new();
        CURRENT.get_or_init(Self::detect)
    }

    pub fn is_packaged(&self) -> bool {
        matches!(self, Distribution::Packaged { .. })
    }

    /// Directory that relative resource names are rooted at.
    pub fn root(&self) -> &Path {
        match self {
            Distribution::Source { working_dir } => working_dir,
            Distribution::Packaged { bundle_dir } => bundle_dir,
        }
    }

    /// The bundle directory, only when packaged.
    pub fn bundle_dir(&self) -> Option<&Path> {
        match self {
            Distribution::Packaged { bundle_dir } => Some(bundle_dir),
            Distribution::Source { .. } => None,
        }
    }
}

fn is_packaged_build() -> bool {
    matches!(option_env!("WIZARD_ENV_PACKAGED"), Some("1") | Some("true"))
}

pub(crate) fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\"))
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}

/// Make `path` absolute against `base` and resolve `.` and `..` lexically.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    normalize_path_components(&absolute)
}

/// Whether a raw value is a list of paths (e.g. `PATH`) rather than one path.
pub fn is_path_list(raw: &str) -> bool {
    std::env::split_paths(raw).filter(|p| !p.as_os_str().is_empty()).count() > 1
}

/// Normalize path components, resolving `.` and `..` without touching the filesystem.
pub fn normalize_path_components(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(p) => components.push(Component::Prefix(p)),
            Component::RootDir => components.push(Component::RootDir),
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(Component::Normal(_)) = components.last() {
                    components.pop();
                } else if !matches!(components.last(), Some(Component::RootDir)) {
                    // `..` above a relative start is kept; above root it is dropped
                    components.push(Component::ParentDir);
                }
            }
            Component::Normal(name) => components.push(Component::Normal(name)),
        }
    }

    components.iter().collect()
}
