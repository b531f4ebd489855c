use std::path::PathBuf;

use clap::Parser;

use crate::config::RawInput;

/// Entry point for the `galaxy-console` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "galaxy-console",
    about = "Galaxy deployment console",
    version,
    long_about = None
)]
pub struct Cli {
    /// Path to the configuration file (falls back to GALAXY_CONFIG)
    #[arg(short = 'c', long = "config")]
    pub config_file: Option<PathBuf>,

    /// Echo each resolved setting during startup
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Log destination: a file path, STDOUT, STDERR or SYSLOG
    #[arg(long = "log")]
    pub log: Option<String>,

    /// Log level: DEBUG, INFO, WARN or ERROR
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Where to write the console pid file
    #[arg(long = "pid-file")]
    pub pid_file: Option<String>,

    /// User to run as
    #[arg(short = 'u', long = "user")]
    pub user: Option<String>,

    /// Hostname the console identifies itself by
    #[arg(long = "host")]
    pub host: Option<String>,

    /// URL agents announce themselves to
    #[arg(long = "announcement-url")]
    pub announcement_url: Option<String>,

    /// Seconds between agent pings
    #[arg(long = "ping-interval")]
    pub ping_interval: Option<u64>,

    /// Externally visible URL when the console sits behind a proxy
    #[arg(long = "console-proxied-url")]
    pub console_proxied_url: Option<String>,

    /// Deployment environment name
    #[arg(short = 'e', long = "environment")]
    pub environment: Option<String>,
}

impl Cli {
    pub fn into_raw_input(self) -> RawInput {
        RawInput {
            config_file: self.config_file,
            verbose: self.verbose,
            log: self.log,
            log_level: self.log_level,
            pid_file: self.pid_file,
            user: self.user,
            host: self.host,
            announcement_url: self.announcement_url,
            ping_interval: self.ping_interval,
            console_proxied_url: self.console_proxied_url,
            environment: self.environment,
        }
    }
}
