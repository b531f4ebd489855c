use std::fs::OpenOptions;
use std::io;

use syslog::{Facility, Formatter3164};

use super::error::ConfigError;

/// Destinations with no underlying resource to acquire or release.
pub(super) const SENTINEL_DESTINATIONS: &[&str] = &["STDOUT", "STDERR", "SYSLOG"];

/// Confirm that a candidate log destination can actually be written.
///
/// Sentinel destinations are accepted as-is. Anything else is treated as a
/// file path and opened for append, creating it if needed; the handle is
/// released as soon as the probe returns. A failed probe is recorded to the
/// local syslog before being surfaced to the caller.
pub(super) fn probe_destination(destination: &str) -> Result<(), ConfigError> {
    if SENTINEL_DESTINATIONS.contains(&destination) {
        return Ok(());
    }

    match OpenOptions::new().create(true).append(true).open(destination) {
        Ok(_probe) => Ok(()),
        Err(source) => {
            record_failure(destination, &source);
            Err(ConfigError::LogDestinationUnwritable {
                destination: destination.to_string(),
                source,
            })
        }
    }
}

/// Note the failure in the system log. Best effort: a machine without a
/// syslog socket must not turn the recording itself into a second failure.
fn record_failure(destination: &str, source: &io::Error) {
    let formatter = Formatter3164 {
        facility: Facility::LOG_USER,
        hostname: None,
        process: "galaxy-console".to_string(),
        pid: std::process::id(),
    };
    if let Ok(mut writer) = syslog::unix(formatter) {
        let _ = writer.warning(format!(
            "log destination '{destination}' is not writable: {source}"
        ));
    }
}
