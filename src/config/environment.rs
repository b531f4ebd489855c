use std::env;

use super::constants::{DEFAULT_CONSOLE_PID_FILE, DEFAULT_LOG, DEFAULT_LOG_LEVEL};

/// Read an environment variable, treating unset and empty the same way.
pub(super) fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn env_default(key: &str, fallback: &str) -> String {
    env_string(key).unwrap_or_else(|| fallback.to_string())
}

pub(super) fn default_log() -> String {
    env_default("GALAXY_LOG", DEFAULT_LOG)
}

pub(super) fn default_log_level() -> String {
    env_default("GALAXY_LOG_LEVEL", DEFAULT_LOG_LEVEL)
}

pub(super) fn default_pid_file() -> String {
    env_default("GALAXY_CONSOLE_PID_FILE", DEFAULT_CONSOLE_PID_FILE)
}
