use super::constants::DEFAULT_PING_INTERVAL;
use super::environment::{default_log, default_log_level, default_pid_file, env_string};
use super::error::ConfigError;
use super::file::{self, FileConfig};
use super::log_probe::probe_destination;
use super::resolver::{coerce_u64, local_hostname, memoize, non_empty};
use super::types::{LogLevel, RawInput, ResolvedConfig};

/// One write-once cell per setting. A cell transitions from `None` to
/// `Some` exactly once and is never cleared.
#[derive(Debug, Default)]
struct SettingCache {
    environment: Option<Option<String>>,
    verbose: Option<bool>,
    log: Option<String>,
    log_level: Option<LogLevel>,
    pid_file: Option<String>,
    user: Option<Option<String>>,
    host: Option<String>,
    announcement_url: Option<String>,
    ping_interval: Option<u64>,
}

/// Fixed enumeration order for resolution, with each setting's external
/// flag spelling for the verbose echo.
pub(super) struct SettingSpec {
    pub(super) flag: &'static str,
    pub(super) resolve: fn(&mut ConsoleConfigurator) -> Result<String, ConfigError>,
}

pub(super) const SETTINGS: &[SettingSpec] = &[
    SettingSpec {
        flag: "environment",
        resolve: |c| Ok(display_opt(c.environment()?)),
    },
    SettingSpec {
        flag: "verbose",
        resolve: |c| Ok(c.verbose()?.to_string()),
    },
    SettingSpec {
        flag: "log",
        resolve: |c| c.log(),
    },
    SettingSpec {
        flag: "log-level",
        resolve: |c| Ok(c.log_level()?.to_string()),
    },
    SettingSpec {
        flag: "pid_file",
        resolve: |c| c.pid_file(),
    },
    SettingSpec {
        flag: "user",
        resolve: |c| Ok(display_opt(c.user()?)),
    },
    SettingSpec {
        flag: "host",
        resolve: |c| c.host(),
    },
    SettingSpec {
        flag: "announcement-url",
        resolve: |c| c.announcement_url(),
    },
    SettingSpec {
        flag: "ping-interval",
        resolve: |c| Ok(c.ping_interval()?.to_string()),
    },
    SettingSpec {
        flag: "console-proxied-url",
        resolve: |c| Ok(display_opt(c.console_proxied_url())),
    },
];

fn display_opt(value: Option<String>) -> String {
    value.unwrap_or_default()
}

/// Resolves every console setting through the precedence cascade:
/// command-line value, configuration file, hard-coded default, and for
/// `host` and `announcement_url` a computed hostname fallback.
#[derive(Debug)]
pub struct ConsoleConfigurator {
    input: RawInput,
    file: FileConfig,
    cache: SettingCache,
}

impl ConsoleConfigurator {
    /// Discover and parse the configuration file, then wrap the inputs.
    /// Fails before any setting resolves if an explicitly named file is
    /// missing or an existing candidate cannot be parsed.
    pub fn new(input: RawInput) -> Result<Self, ConfigError> {
        let file = file::load(input.config_file.as_deref())?;
        Ok(Self::with_file(input, file))
    }

    /// Build a configurator over an already-loaded file mapping.
    pub fn with_file(input: RawInput, file: FileConfig) -> Self {
        Self {
            input,
            file,
            cache: SettingCache::default(),
        }
    }

    /// Resolve every setting once, in fixed order, echoing each resolved
    /// value as `--<flag> <value>` when verbose mode is active.
    pub fn configure(&mut self) -> Result<ResolvedConfig, ConfigError> {
        let verbose = self.verbose()?;
        if verbose {
            println!("startup configuration");
        }

        for spec in SETTINGS {
            let value = (spec.resolve)(self)?;
            if verbose {
                println!("    --{} {}", spec.flag, value);
            }
        }

        // Every cell is filled by the pass above; these reads hit the cache.
        Ok(ResolvedConfig {
            environment: self.environment()?,
            verbose,
            log: self.log()?,
            log_level: self.log_level()?,
            pid_file: self.pid_file()?,
            user: self.user()?,
            host: self.host()?,
            announcement_url: self.announcement_url()?,
            ping_interval: self.ping_interval()?,
            console_proxied_url: self.console_proxied_url(),
        })
    }

    pub fn environment(&mut self) -> Result<Option<String>, ConfigError> {
        let Self { input, file, cache } = self;
        memoize(&mut cache.environment, || {
            Ok(non_empty(input.environment.as_deref())
                .or_else(|| file.get_string("galaxy.console.environment")))
        })
    }

    pub fn verbose(&mut self) -> Result<bool, ConfigError> {
        let Self { input, file, cache } = self;
        memoize(&mut cache.verbose, || {
            Ok(input.verbose || file.get_bool("galaxy.agent.verbose").unwrap_or(false))
        })
    }

    /// The log destination is only accepted once a probe confirms it is
    /// writable; a failed probe aborts configuration.
    pub fn log(&mut self) -> Result<String, ConfigError> {
        let Self { input, file, cache } = self;
        memoize(&mut cache.log, || {
            let destination = non_empty(input.log.as_deref())
                .or_else(|| file.get_string("galaxy.console.log"))
                .unwrap_or_else(default_log);
            probe_destination(&destination)?;
            Ok(destination)
        })
    }

    pub fn log_level(&mut self) -> Result<LogLevel, ConfigError> {
        let Self { input, file, cache } = self;
        memoize(&mut cache.log_level, || {
            let name = non_empty(input.log_level.as_deref())
                .or_else(|| file.get_string("galaxy.console.log-level"))
                .unwrap_or_else(default_log_level);
            Ok(LogLevel::from_name(&name).unwrap_or_else(|| {
                eprintln!("unrecognized log level '{name}', using INFO");
                LogLevel::Info
            }))
        })
    }

    pub fn pid_file(&mut self) -> Result<String, ConfigError> {
        let Self { input, file, cache } = self;
        memoize(&mut cache.pid_file, || {
            Ok(non_empty(input.pid_file.as_deref())
                .or_else(|| file.get_string("galaxy.console.pid-file"))
                .unwrap_or_else(default_pid_file))
        })
    }

    pub fn user(&mut self) -> Result<Option<String>, ConfigError> {
        let Self { input, file, cache } = self;
        memoize(&mut cache.user, || {
            Ok(non_empty(input.user.as_deref())
                .or_else(|| file.get_string("galaxy.console.user")))
        })
    }

    pub fn host(&mut self) -> Result<String, ConfigError> {
        let Self { input, file, cache } = self;
        memoize(&mut cache.host, || {
            Ok(non_empty(input.host.as_deref())
                .or_else(|| file.get_string("galaxy.console.host"))
                .or_else(|| env_string("GALAXY_HOST"))
                .unwrap_or_else(local_hostname))
        })
    }

    pub fn announcement_url(&mut self) -> Result<String, ConfigError> {
        let Self { input, file, cache } = self;
        memoize(&mut cache.announcement_url, || {
            Ok(non_empty(input.announcement_url.as_deref())
                .or_else(|| file.get_string("galaxy.console.announcement-url"))
                .unwrap_or_else(|| format!("http://{}", local_hostname())))
        })
    }

    pub fn ping_interval(&mut self) -> Result<u64, ConfigError> {
        let Self { input, file, cache } = self;
        memoize(&mut cache.ping_interval, || {
            if let Some(interval) = input.ping_interval {
                return Ok(interval);
            }
            if let Some(value) = file.get("galaxy.console.ping-interval") {
                return coerce_u64("ping_interval", value);
            }
            Ok(DEFAULT_PING_INTERVAL)
        })
    }

    /// Pass-through from the command line; there is nothing to cascade.
    pub fn console_proxied_url(&self) -> Option<String> {
        self.input.console_proxied_url.clone()
    }
}
