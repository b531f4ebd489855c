//! Startup configuration resolution for the galaxy console.
//!
//! Each setting is resolved through a fixed precedence cascade:
//! - a non-empty command-line value,
//! - the discovered YAML configuration file, via the setting's dotted key,
//! - a hard-coded default (several of which honor `GALAXY_*` environment
//!   variables),
//! - and for `host` and `announcement_url`, a computed hostname fallback.
//!
//! Resolution happens once, synchronously, before the console starts
//! serving. Every setting is memoized in a write-once cell, so repeated
//! access is idempotent even if the underlying inputs change afterwards.

mod configurator;
mod constants;
mod environment;
mod error;
mod file;
mod log_probe;
mod resolver;
mod types;

pub use configurator::ConsoleConfigurator;
pub use error::ConfigError;
pub use types::{LogLevel, RawInput, ResolvedConfig};

#[cfg(test)]
mod tests;
