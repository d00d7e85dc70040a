//! crates/scrollbreak-logging/src/config.rs
//! Configuration for the dispatcher, the log file, and the notifier.

use std::path::{Path, PathBuf};
use std::time::Duration;

use scrollbreak_interrupt::InterrupterConfig;

/// Default timeout applied to every notifier socket operation.
pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// Top-level configuration for a logging setup.
///
/// The default configuration suppresses debug records, writes no log file,
/// and sends no notifications. Builder methods opt individual pieces in.
///
/// # Examples
///
/// ```
/// use scrollbreak_logging::{FileConfig, LoggingConfig};
///
/// let config = LoggingConfig::new()
///     .with_debug_mode(true)
///     .with_file(FileConfig::new("app.log"));
/// assert!(config.debug_mode());
/// assert!(config.file().is_some());
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoggingConfig {
    debug_mode: bool,
    interrupter: InterrupterConfig,
    file: Option<FileConfig>,
    growl: Option<GrowlConfig>,
}

impl LoggingConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the debug rail.
    ///
    /// Debug records are discarded before reaching any destination unless
    /// this is set.
    #[must_use]
    pub const fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    /// Replaces the interrupter tunables.
    #[must_use]
    pub const fn with_interrupter(mut self, interrupter: InterrupterConfig) -> Self {
        self.interrupter = interrupter;
        self
    }

    /// Enables the log file.
    #[must_use]
    pub fn with_file(mut self, file: FileConfig) -> Self {
        self.file = Some(file);
        self
    }

    /// Enables the notifier.
    #[must_use]
    pub fn with_growl(mut self, growl: GrowlConfig) -> Self {
        self.growl = Some(growl);
        self
    }

    /// Whether debug records are emitted.
    #[must_use]
    pub const fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// The interrupter tunables.
    #[must_use]
    pub const fn interrupter(&self) -> InterrupterConfig {
        self.interrupter
    }

    /// The log file configuration, if a file is enabled.
    #[must_use]
    pub const fn file(&self) -> Option<&FileConfig> {
        self.file.as_ref()
    }

    /// The notifier configuration, if notifications are enabled.
    #[must_use]
    pub const fn growl(&self) -> Option<&GrowlConfig> {
        self.growl.as_ref()
    }
}

/// Location and rotation policy of the log file.
///
/// Rotation is off by default: the file grows without bound, matching the
/// behavior of a plain append-only log. [`FileConfig::with_rotation`] turns
/// on size-based rollover.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileConfig {
    path: PathBuf,
    max_bytes: Option<u64>,
    backups: u32,
}

impl FileConfig {
    /// Creates a configuration that appends to `path` without rotation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_bytes: None,
            backups: 0,
        }
    }

    /// Enables size-based rotation.
    ///
    /// When an append would push the file past `max_bytes` the file is
    /// renamed to `<path>.1` (older backups shifting up to `<path>.N`, the
    /// oldest dropped) and a fresh file is opened. With `backups = 0` the
    /// file is truncated in place instead.
    #[must_use]
    pub const fn with_rotation(mut self, max_bytes: u64, backups: u32) -> Self {
        self.max_bytes = Some(max_bytes);
        self.backups = backups;
        self
    }

    /// The log file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The rotation threshold, if rotation is enabled.
    #[must_use]
    pub const fn max_bytes(&self) -> Option<u64> {
        self.max_bytes
    }

    /// How many rotated backups are kept.
    #[must_use]
    pub const fn backups(&self) -> u32 {
        self.backups
    }
}

/// Endpoint of a growl-style notification daemon.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use scrollbreak_logging::GrowlConfig;
///
/// let config = GrowlConfig::new("127.0.0.1:9889").with_timeout(Duration::from_secs(1));
/// assert_eq!(config.endpoint(), "127.0.0.1:9889");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrowlConfig {
    endpoint: String,
    timeout: Duration,
}

impl GrowlConfig {
    /// Creates a configuration for the daemon listening at `endpoint`
    /// (a `host:port` pair).
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_NOTIFY_TIMEOUT,
        }
    }

    /// Sets the timeout applied to connects, writes, and reads.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured `host:port` pair.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The socket operation timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_quiet() {
        let config = LoggingConfig::new();
        assert!(!config.debug_mode());
        assert_eq!(config.interrupter(), InterrupterConfig::default());
        assert!(config.file().is_none());
        assert!(config.growl().is_none());
    }

    #[test]
    fn file_rotation_is_opt_in() {
        let file = FileConfig::new("app.log");
        assert_eq!(file.path(), Path::new("app.log"));
        assert_eq!(file.max_bytes(), None);

        let file = file.with_rotation(4096, 3);
        assert_eq!(file.max_bytes(), Some(4096));
        assert_eq!(file.backups(), 3);
    }

    #[test]
    fn growl_timeout_defaults() {
        let growl = GrowlConfig::new("localhost:9889");
        assert_eq!(growl.timeout(), DEFAULT_NOTIFY_TIMEOUT);
        let growl = growl.with_timeout(Duration::from_millis(250));
        assert_eq!(growl.timeout(), Duration::from_millis(250));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_serde_round_trip() {
        let config = LoggingConfig::new()
            .with_debug_mode(true)
            .with_file(FileConfig::new("app.log").with_rotation(1024, 2))
            .with_growl(GrowlConfig::new("localhost:9889"));
        let json = serde_json::to_string(&config).expect("serialize config");
        let back: LoggingConfig = serde_json::from_str(&json).expect("deserialize config");
        assert_eq!(back, config);
    }
}
