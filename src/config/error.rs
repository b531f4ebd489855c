use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions encountered while resolving startup configuration.
///
/// All of these abort startup; none are retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly supplied configuration file path does not exist.
    #[error("Cannot find configuration file: {}", .0.display())]
    ConfigFileNotFound(PathBuf),

    /// An existing candidate file could not be read.
    #[error("Failed reading configuration file {}: {}", .path.display(), .source)]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An existing candidate file is not valid YAML.
    #[error("Malformed configuration file {}: {}", .path.display(), .source)]
    MalformedFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The file parsed, but its top level is not a mapping.
    #[error("Configuration file {} is not a YAML mapping", .0.display())]
    NotAMapping(PathBuf),

    /// The candidate log destination failed the writability probe.
    #[error("Log destination '{destination}' is not writable: {source}")]
    LogDestinationUnwritable {
        destination: String,
        #[source]
        source: io::Error,
    },

    /// A numeric setting carried a value that cannot be read as an integer.
    #[error("Setting '{setting}' expects an integer, got '{value}'")]
    InvalidInteger {
        setting: &'static str,
        value: String,
    },
}
