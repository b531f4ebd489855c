//! Startup configuration for the galaxy deployment console.
//!
//! The [`config`] module carries the decision logic: a per-setting
//! precedence cascade over command-line values, a discovered YAML
//! configuration file and hard-coded defaults, memoized into a
//! write-once result set. The [`cli`] module is thin plumbing that
//! turns command-line flags into the cascade's input.

pub mod cli;
pub mod config;
