use std::fmt;
use std::path::PathBuf;

/// Values handed to us by the command-line layer, before any resolution.
///
/// Every field except `verbose` is optional: an absent or empty value means
/// "not supplied on the command line" and the cascade falls through to the
/// configuration file and then the defaults.
#[derive(Debug, Clone, Default)]
pub struct RawInput {
    pub config_file: Option<PathBuf>,
    pub verbose: bool,
    pub log: Option<String>,
    pub log_level: Option<String>,
    pub pid_file: Option<String>,
    pub user: Option<String>,
    pub host: Option<String>,
    pub announcement_url: Option<String>,
    pub ping_interval: Option<u64>,
    pub console_proxied_url: Option<String>,
    pub environment: Option<String>,
}

/// The final settings set the console starts with.
///
/// Built exactly once by [`ConsoleConfigurator::configure`] and never
/// mutated afterwards.
///
/// [`ConsoleConfigurator::configure`]: super::ConsoleConfigurator::configure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub environment: Option<String>,
    pub verbose: bool,
    pub log: String,
    pub log_level: LogLevel,
    pub pid_file: String,
    pub user: Option<String>,
    pub host: String,
    pub announcement_url: String,
    pub ping_interval: u64,
    pub console_proxied_url: Option<String>,
}

/// Log severity threshold, ordered from most to least chatty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Exact lookup against the four recognized upper-case names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "DEBUG" => Some(LogLevel::Debug),
            "INFO" => Some(LogLevel::Info),
            "WARN" => Some(LogLevel::Warn),
            "ERROR" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
