use std::process::Command;

use serde_yaml::Value;

use super::constants::FALLBACK_HOSTNAME;
use super::error::ConfigError;

/// Fill a write-once cell on first use and hand back the cached value on
/// every later call. Once filled, the compute closure is never consulted
/// again, so later changes to its inputs cannot alter the result.
pub(super) fn memoize<T, F>(cell: &mut Option<T>, compute: F) -> Result<T, ConfigError>
where
    T: Clone,
    F: FnOnce() -> Result<T, ConfigError>,
{
    if let Some(value) = cell {
        return Ok(value.clone());
    }
    let value = compute()?;
    *cell = Some(value.clone());
    Ok(value)
}

/// A command-line value only participates in the cascade when it is
/// present and non-empty.
pub(super) fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|text| !text.is_empty()).map(str::to_string)
}

/// Coerce a file-supplied scalar to an integer, whether it arrived as
/// YAML `60` or as the string `"60"`.
pub(super) fn coerce_u64(setting: &'static str, value: &Value) -> Result<u64, ConfigError> {
    let invalid = || ConfigError::InvalidInteger {
        setting,
        value: match value {
            Value::String(text) => text.clone(),
            other => serde_yaml::to_string(other)
                .map(|rendered| rendered.trim_end().to_string())
                .unwrap_or_default(),
        },
    };

    match value {
        Value::Number(number) => number.as_u64().ok_or_else(invalid),
        Value::String(text) => text.trim().parse().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// Best guess at this machine's name: system lookup first, then the
/// `hostname` binary, then a fixed literal.
pub(super) fn local_hostname() -> String {
    if let Some(name) = hostname::get().ok().and_then(|name| name.into_string().ok()) {
        if !name.is_empty() {
            return name;
        }
    }

    if let Ok(output) = Command::new("hostname").output() {
        if output.status.success() {
            let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !name.is_empty() {
                return name;
            }
        }
    }

    FALLBACK_HOSTNAME.to_string()
}
