pub const DEFAULT_LOG: &str = "SYSLOG";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";
pub const DEFAULT_CONSOLE_PID_FILE: &str = "/tmp/galaxy-console.pid";
pub const DEFAULT_PING_INTERVAL: u64 = 60;

/// Last resort when neither the system lookup nor the `hostname` binary
/// can name this machine.
pub const FALLBACK_HOSTNAME: &str = "localhost";

/// Fixed locations consulted after any explicitly supplied path.
pub const SYSTEM_CONFIG_PATHS: &[&str] = &["/etc/galaxy.conf", "/usr/local/etc/galaxy.conf"];
