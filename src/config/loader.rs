//! Configuration loader with per-key type inference.
//!
//! Reads an optional `KEY=VALUE` file, merges it under the ambient
//! environment (the environment wins on conflict), and casts every
//! upper-case key through an ordered cascade of validators.

use super::types::{ConfigMap, ConfigValue};
use super::validator::{
    parse_boolean, parse_log_level, parse_positive_integer, parse_string, parse_theme_mode,
    validate_directory_path, validate_file_path,
};
use crate::error::{ValidationError, ValidationResult};
use crate::paths::{Distribution, absolutize, current_dir, expand_home, is_path_list};
use regex_lite::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Default configuration file name.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Key fragments that mark a value as a filesystem path.
const PATH_MARKERS: [&str; 3] = ["PATH", "DIR", "FILE"];

/// Where the ambient key/value pairs come from.
#[derive(Debug, Clone, Default)]
pub enum EnvSource {
    /// The real process environment (default).
    #[default]
    Process,
    /// A fixed list of pairs, used instead of the process environment.
    Fixed(Vec<(String, String)>),
}

impl EnvSource {
    fn vars(&self) -> Vec<(String, String)> {
        match self {
            // Non-UTF-8 entries can never match the key pattern
            EnvSource::Process => std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
            EnvSource::Fixed(vars) => vars.clone(),
        }
    }
}

/// Outcome of a load, including non-fatal diagnostics.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// The typed configuration.
    pub config: ConfigMap,
    /// The configuration file that was read, if any was found.
    pub source: Option<PathBuf>,
    /// Keys that failed every cascade step and kept their raw string.
    pub invalid: Vec<ValidationError>,
}

impl LoadReport {
    pub fn missing_source(&self) -> bool {
        self.source.is_none()
    }
}

/// Builds a [`ConfigMap`] from a config file and the environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env_path: PathBuf,
    distribution: Distribution,
    working_dir: PathBuf,
    env: EnvSource,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_FILE)
    }
}

impl ConfigLoader {
    /// Create a loader for the given config file path.
    pub fn new(env_path: impl Into<PathBuf>) -> Self {
        Self {
            env_path: env_path.into(),
            distribution: Distribution::current().clone(),
            working_dir: current_dir(),
            env: EnvSource::Process,
        }
    }

    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Directory that relative path values are resolved against.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// Replace the process environment with a fixed set of pairs.
    pub fn with_environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = EnvSource::Fixed(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Candidate config file locations, in search order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut candidates = vec![self.env_path.clone()];
        if let Some(bundle_dir) = self.distribution.bundle_dir()
            && self.env_path.is_relative()
        {
            candidates.push(bundle_dir.join(&self.env_path));
        }
        candidates
    }

    /// The first candidate that exists.
    pub fn discover(&self) -> Option<PathBuf> {
        self.candidates().into_iter().find(|p| p.is_file())
    }

    /// Load the typed configuration map.
    pub fn load(&self) -> ConfigMap {
        self.load_report().config
    }

    /// Load the configuration and keep the diagnostics.
    pub fn load_report(&self) -> LoadReport {
        let source = self.discover();

        let mut vars: BTreeMap<String, String> = self.env.vars().into_iter().collect();

        match &source {
            Some(path) => {
                let entries = read_env_file(path);
                debug!(path = %path.display(), entries = entries.len(), "Read configuration file");
                for (key, value) in entries {
                    vars.entry(key).or_insert(value);
                }
            }
            None => {
                warn!(
                    candidates = ?self.candidates(),
                    "Configuration file not found; using environment only"
                );
            }
        }

        let mut config = ConfigMap::new();
        let mut invalid = Vec::new();

        for (key, raw) in vars {
            if !is_eligible_key(&key) {
                continue;
            }
            match self.auto_cast(&key, &raw) {
                Ok(value) => config.insert(key, value),
                Err(err) => {
                    warn!(key = %key, error = %err, "Keeping raw configuration value");
                    invalid.push(err);
                    config.insert(key, ConfigValue::String(raw));
                }
            }
        }

        LoadReport {
            config,
            source,
            invalid,
        }
    }

    /// Infer the value's type; the first step that succeeds wins.
    fn auto_cast(&self, key: &str, raw: &str) -> ValidationResult<ConfigValue> {
        if key == "LOG_LEVEL" {
            return parse_log_level(key, raw).map(ConfigValue::LogLevel);
        }
        if key == "THEME_MODE" {
            return parse_theme_mode(key, raw).map(ConfigValue::ThemeMode);
        }

        if let Ok(b) = parse_boolean(key, raw) {
            return Ok(ConfigValue::Boolean(b));
        }

        if let Ok(n) = parse_positive_integer(key, raw) {
            return Ok(ConfigValue::PositiveInteger(n));
        }

        if PATH_MARKERS.iter().any(|marker| key.contains(marker)) && !is_path_list(raw) {
            let path = absolutize(&expand_home(raw), &self.working_dir);
            let normalized = path.to_string_lossy();
            return if path.extension().is_some() {
                validate_file_path(key, &normalized, false).map(ConfigValue::FilePath)
            } else {
                validate_directory_path(key, &normalized, true).map(ConfigValue::DirectoryPath)
            };
        }

        Ok(ConfigValue::String(parse_string(Some(raw), "")))
    }
}

/// Read `KEY=VALUE` pairs from a dotenv file, skipping malformed lines.
fn read_env_file(path: &Path) -> Vec<(String, String)> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read configuration file");
            return Vec::new();
        }
    };

    iter.filter_map(|item| match item {
        Ok(pair) => Some(pair),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Skipping malformed configuration line");
            None
        }
    })
    .collect()
}

/// Only keys made of `A-Z`, `0-9` and `_` are cast.
pub fn is_eligible_key(key: &str) -> bool {
    static ELIGIBLE: OnceLock<Option<Regex>> = OnceLock::new();
    ELIGIBLE
        .get_or_init(|| Regex::new(r"^[A-Z0-9_]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(key))
}
