use std::path::Path;
use std::sync::{Mutex, MutexGuard, OnceLock};

use tempfile::TempDir;

use crate::config::configurator::SETTINGS;
use crate::config::error::ConfigError;
use crate::config::file::{self, FileConfig};
use crate::config::types::{LogLevel, RawInput};
use crate::config::ConsoleConfigurator;

fn env_lock<'a>() -> MutexGuard<'a, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn new(vars: &[(&str, Option<&str>)]) -> Self {
        let saved = vars
            .iter()
            .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
            .collect::<Vec<_>>();
        for (key, value) in vars {
            match value {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

fn galaxy_defaults_unset() -> Vec<(&'static str, Option<&'static str>)> {
    vec![
        ("GALAXY_HOST", None),
        ("GALAXY_LOG", None),
        ("GALAXY_LOG_LEVEL", None),
        ("GALAXY_CONSOLE_PID_FILE", None),
        ("GALAXY_CONFIG", None),
    ]
}

fn file_config(contents: &str) -> FileConfig {
    FileConfig::parse(contents, Path::new("galaxy.conf")).unwrap()
}

#[test]
fn cli_value_takes_precedence_over_file_and_default() {
    let file = file_config(
        "galaxy.console.log: STDERR\n\
         galaxy.console.ping-interval: 30\n\
         galaxy.console.user: filed\n",
    );
    let input = RawInput {
        log: Some("STDOUT".to_string()),
        ping_interval: Some(15),
        user: Some("cli".to_string()),
        ..RawInput::default()
    };

    let mut configurator = ConsoleConfigurator::with_file(input, file);
    assert_eq!(configurator.log().unwrap(), "STDOUT");
    assert_eq!(configurator.ping_interval().unwrap(), 15);
    assert_eq!(configurator.user().unwrap(), Some("cli".to_string()));
}

#[test]
fn file_value_takes_precedence_over_default() {
    let _lock = env_lock();
    let _env = EnvGuard::new(&galaxy_defaults_unset());

    let file = file_config(
        "galaxy.console.log: STDERR\n\
         galaxy.console.log-level: ERROR\n\
         galaxy.console.ping-interval: 30\n\
         galaxy.console.pid-file: /var/run/galaxy-console.pid\n",
    );
    let mut configurator = ConsoleConfigurator::with_file(RawInput::default(), file);

    assert_eq!(configurator.log().unwrap(), "STDERR");
    assert_eq!(configurator.log_level().unwrap(), LogLevel::Error);
    assert_eq!(configurator.ping_interval().unwrap(), 30);
    assert_eq!(
        configurator.pid_file().unwrap(),
        "/var/run/galaxy-console.pid"
    );
}

#[test]
fn defaults_apply_when_nothing_is_supplied() {
    let _lock = env_lock();
    let _env = EnvGuard::new(&galaxy_defaults_unset());

    let mut configurator =
        ConsoleConfigurator::with_file(RawInput::default(), FileConfig::default());

    assert_eq!(configurator.log().unwrap(), "SYSLOG");
    assert_eq!(configurator.log_level().unwrap(), LogLevel::Info);
    assert_eq!(configurator.pid_file().unwrap(), "/tmp/galaxy-console.pid");
    assert_eq!(configurator.ping_interval().unwrap(), 60);
    assert_eq!(configurator.environment().unwrap(), None);
    assert_eq!(configurator.user().unwrap(), None);
}

#[test]
fn resolution_is_memoized_against_later_input_changes() {
    let _lock = env_lock();
    let _env = EnvGuard::new(&galaxy_defaults_unset());

    let mut configurator =
        ConsoleConfigurator::with_file(RawInput::default(), FileConfig::default());
    assert_eq!(configurator.log().unwrap(), "SYSLOG");

    // Mutating an underlying source after first resolution has no effect.
    let _env = EnvGuard::new(&[("GALAXY_LOG", Some("STDOUT"))]);
    assert_eq!(configurator.log().unwrap(), "SYSLOG");
}

#[test]
fn ping_interval_coerces_textual_and_numeric_values() {
    let numeric = file_config("galaxy.console.ping-interval: 60\n");
    let textual = file_config("galaxy.console.ping-interval: \"60\"\n");

    let mut from_numeric = ConsoleConfigurator::with_file(RawInput::default(), numeric);
    let mut from_textual = ConsoleConfigurator::with_file(RawInput::default(), textual);

    assert_eq!(from_numeric.ping_interval().unwrap(), 60);
    assert_eq!(from_textual.ping_interval().unwrap(), 60);
}

#[test]
fn ping_interval_rejects_non_numeric_values() {
    let file = file_config("galaxy.console.ping-interval: sixty\n");
    let mut configurator = ConsoleConfigurator::with_file(RawInput::default(), file);

    let err = configurator.ping_interval().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidInteger {
            setting: "ping_interval",
            ..
        }
    ));
}

#[test]
fn explicit_missing_config_file_is_fatal() {
    let missing = Path::new("/nonexistent/galaxy.conf");
    let err = file::load_from(Some(missing), &[]).unwrap_err();

    assert!(matches!(err, ConfigError::ConfigFileNotFound(_)));
    assert!(err.to_string().contains("/nonexistent/galaxy.conf"));
}

#[test]
fn missing_candidates_fall_through_to_empty_mapping() {
    let tmp = TempDir::new().unwrap();
    let absent = tmp.path().join("galaxy.conf");
    let absent = absent.to_str().unwrap();

    let file = file::load_from(None, &[absent]).unwrap();
    let mut configurator = ConsoleConfigurator::with_file(
        RawInput {
            log: Some("STDOUT".to_string()),
            ..RawInput::default()
        },
        file,
    );
    assert_eq!(configurator.log().unwrap(), "STDOUT");
    assert_eq!(configurator.ping_interval().unwrap(), 60);
}

#[test]
fn malformed_existing_candidate_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("galaxy.conf");
    std::fs::write(&path, "galaxy.console.log: [unclosed\n").unwrap();

    let err = file::load_from(None, &[path.to_str().unwrap()]).unwrap_err();
    assert!(matches!(err, ConfigError::MalformedFile { .. }));
}

#[test]
fn non_mapping_candidate_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("galaxy.conf");
    std::fs::write(&path, "- just\n- a\n- list\n").unwrap();

    let err = file::load_from(None, &[path.to_str().unwrap()]).unwrap_err();
    assert!(matches!(err, ConfigError::NotAMapping(_)));
}

#[test]
fn galaxy_config_env_names_the_explicit_path() {
    let _lock = env_lock();
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("galaxy.conf");
    std::fs::write(&path, "galaxy.console.log: STDERR\n").unwrap();

    let _env = EnvGuard::new(&[("GALAXY_CONFIG", Some(path.to_str().unwrap()))]);
    let file = file::load(None).unwrap();
    assert_eq!(
        file.get_string("galaxy.console.log"),
        Some("STDERR".to_string())
    );
}

#[test]
fn galaxy_config_env_pointing_nowhere_is_fatal() {
    let _lock = env_lock();
    let _env = EnvGuard::new(&[("GALAXY_CONFIG", Some("/nonexistent/galaxy.conf"))]);

    let err = file::load(None).unwrap_err();
    assert!(matches!(err, ConfigError::ConfigFileNotFound(_)));
}

#[test]
fn log_level_ordinals_are_strictly_increasing() {
    assert!(LogLevel::Debug < LogLevel::Info);
    assert!(LogLevel::Info < LogLevel::Warn);
    assert!(LogLevel::Warn < LogLevel::Error);
}

#[test]
fn unrecognized_log_level_falls_back_to_info() {
    let file = file_config("galaxy.console.log-level: CHATTY\n");
    let mut configurator = ConsoleConfigurator::with_file(RawInput::default(), file);

    assert_eq!(configurator.log_level().unwrap(), LogLevel::Info);
}

#[test]
fn empty_cli_value_is_treated_as_absent() {
    let file = file_config("galaxy.console.log: STDERR\n");
    let input = RawInput {
        log: Some(String::new()),
        ..RawInput::default()
    };

    let mut configurator = ConsoleConfigurator::with_file(input, file);
    assert_eq!(configurator.log().unwrap(), "STDERR");
}

#[test]
fn log_probe_accepts_writable_file_destination() {
    let tmp = TempDir::new().unwrap();
    let destination = tmp.path().join("console.log");
    let input = RawInput {
        log: Some(destination.to_str().unwrap().to_string()),
        ..RawInput::default()
    };

    let mut configurator = ConsoleConfigurator::with_file(input, FileConfig::default());
    assert_eq!(
        configurator.log().unwrap(),
        destination.to_str().unwrap().to_string()
    );
}

#[test]
fn log_probe_rejects_unwritable_destination() {
    let tmp = TempDir::new().unwrap();
    let destination = tmp.path().join("no-such-dir").join("console.log");
    let input = RawInput {
        log: Some(destination.to_str().unwrap().to_string()),
        ..RawInput::default()
    };

    let mut configurator = ConsoleConfigurator::with_file(input, FileConfig::default());
    let err = configurator.log().unwrap_err();
    assert!(matches!(err, ConfigError::LogDestinationUnwritable { .. }));
}

#[test]
fn host_honors_galaxy_host_default() {
    let _lock = env_lock();
    let _env = EnvGuard::new(&[("GALAXY_HOST", Some("deploy-1"))]);

    let mut configurator =
        ConsoleConfigurator::with_file(RawInput::default(), FileConfig::default());
    assert_eq!(configurator.host().unwrap(), "deploy-1");
}

#[test]
fn host_and_announcement_url_fall_back_to_local_hostname() {
    let _lock = env_lock();
    let _env = EnvGuard::new(&galaxy_defaults_unset());

    let mut configurator =
        ConsoleConfigurator::with_file(RawInput::default(), FileConfig::default());

    let host = configurator.host().unwrap();
    assert!(!host.is_empty());

    let url = configurator.announcement_url().unwrap();
    assert!(url.starts_with("http://"));
}

#[test]
fn configure_resolves_the_default_scenario() {
    let _lock = env_lock();
    let _env = EnvGuard::new(&galaxy_defaults_unset());

    let input = RawInput {
        verbose: true,
        ..RawInput::default()
    };
    let mut configurator = ConsoleConfigurator::with_file(input, FileConfig::default());
    let config = configurator.configure().unwrap();

    assert!(config.verbose);
    assert_eq!(config.log, "SYSLOG");
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.ping_interval, 60);
    assert_eq!(config.console_proxied_url, None);
}

#[test]
fn setting_table_uses_external_flag_spellings_in_order() {
    let flags = SETTINGS.iter().map(|spec| spec.flag).collect::<Vec<_>>();
    assert_eq!(
        flags,
        vec![
            "environment",
            "verbose",
            "log",
            "log-level",
            "pid_file",
            "user",
            "host",
            "announcement-url",
            "ping-interval",
            "console-proxied-url",
        ]
    );
}
