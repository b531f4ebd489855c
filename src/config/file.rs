use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use super::constants::SYSTEM_CONFIG_PATHS;
use super::environment::env_string;
use super::error::ConfigError;

/// Flat view of the configuration file: dotted string keys
/// (e.g. `galaxy.console.log`) mapped to scalar values.
///
/// An empty mapping stands in when no file was found anywhere on the
/// search path.
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    values: BTreeMap<String, Value>,
}

impl FileConfig {
    /// Parse YAML file contents into a flat key/value mapping.
    ///
    /// The top-level document must be a mapping (or empty). Non-string
    /// keys are ignored rather than rejected.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let document: Value = serde_yaml::from_str(contents).map_err(|source| {
            ConfigError::MalformedFile {
                path: path.to_path_buf(),
                source,
            }
        })?;

        match document {
            Value::Null => Ok(Self::default()),
            Value::Mapping(mapping) => {
                let mut values = BTreeMap::new();
                for (key, value) in mapping {
                    if let Value::String(key) = key {
                        values.insert(key, value);
                    }
                }
                Ok(Self { values })
            }
            _ => Err(ConfigError::NotAMapping(path.to_path_buf())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Scalar value rendered as a string; empty strings count as absent.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key)?.as_bool()
    }
}

/// Locate and parse the configuration file.
///
/// An explicit path (from the command line, else `GALAXY_CONFIG`) must
/// exist; a missing explicit path aborts startup before anything resolves.
pub fn load(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let explicit = explicit
        .map(Path::to_path_buf)
        .or_else(|| env_string("GALAXY_CONFIG").map(PathBuf::from));
    load_from(explicit.as_deref(), SYSTEM_CONFIG_PATHS)
}

/// Walk the candidate list and parse the first file that exists.
///
/// Absence is decided by an explicit existence check per candidate; any
/// failure while reading or parsing an existing candidate is fatal rather
/// than a reason to try the next one.
pub(super) fn load_from(
    explicit: Option<&Path>,
    system_paths: &[&str],
) -> Result<FileConfig, ConfigError> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigError::ConfigFileNotFound(path.to_path_buf()));
        }
    }

    let candidates = explicit
        .map(Path::to_path_buf)
        .into_iter()
        .chain(system_paths.iter().map(PathBuf::from));

    for candidate in candidates {
        if !candidate.exists() {
            continue;
        }
        let contents = fs::read_to_string(&candidate).map_err(|source| {
            ConfigError::FileUnreadable {
                path: candidate.clone(),
                source,
            }
        })?;
        return FileConfig::parse(&contents, &candidate);
    }

    // No candidate anywhere: resolution proceeds on defaults alone.
    Ok(FileConfig::default())
}
