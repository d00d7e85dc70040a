//! crates/scrollbreak-interrupt/src/config.rs
//! Tunables for the interrupter worker and the scroll gate.

use std::time::Duration;

/// Default quiet interval the worker waits before releasing the scroll lock.
pub const DEFAULT_GRACE: Duration = Duration::from_secs(5);

/// Default pause after each accepted scroll line.
///
/// A scroll producer in a tight loop would otherwise re-acquire the lock
/// before the worker's blocking acquire gets scheduled, starving
/// interruptions indefinitely. A few tens of microseconds of slack is enough
/// for the wakeup to land.
pub const DEFAULT_YIELD_SLACK: Duration = Duration::from_micros(20);

/// Configuration for an [`Interrupter`](crate::Interrupter).
///
/// `grace` is the debounce window: after draining a burst the worker keeps
/// the scroll paused for this long, extending the pause whenever another
/// priority record arrives. A zero grace releases the scroll immediately
/// after each batch, effectively disabling debouncing. `yield_slack` is the
/// post-write pause described at [`DEFAULT_YIELD_SLACK`]; tests set it to
/// zero to keep tight emission loops fast.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use scrollbreak_interrupt::InterrupterConfig;
///
/// let config = InterrupterConfig::new().with_grace(Duration::from_secs(2));
/// assert_eq!(config.grace(), Duration::from_secs(2));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterrupterConfig {
    grace: Duration,
    yield_slack: Duration,
}

impl InterrupterConfig {
    /// Creates a configuration with the default grace and yield slack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            grace: DEFAULT_GRACE,
            yield_slack: DEFAULT_YIELD_SLACK,
        }
    }

    /// Sets the debounce window.
    #[must_use]
    pub const fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    /// Sets the pause after each accepted scroll line.
    #[must_use]
    pub const fn with_yield_slack(mut self, yield_slack: Duration) -> Self {
        self.yield_slack = yield_slack;
        self
    }

    /// Returns the debounce window.
    #[must_use]
    pub const fn grace(&self) -> Duration {
        self.grace
    }

    /// Returns the pause after each accepted scroll line.
    #[must_use]
    pub const fn yield_slack(&self) -> Duration {
        self.yield_slack
    }
}

impl Default for InterrupterConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = InterrupterConfig::default();
        assert_eq!(config.grace(), DEFAULT_GRACE);
        assert_eq!(config.yield_slack(), DEFAULT_YIELD_SLACK);
    }

    #[test]
    fn builders_override_fields_independently() {
        let config = InterrupterConfig::new()
            .with_grace(Duration::from_millis(250))
            .with_yield_slack(Duration::ZERO);
        assert_eq!(config.grace(), Duration::from_millis(250));
        assert_eq!(config.yield_slack(), Duration::ZERO);

        let config = InterrupterConfig::new().with_yield_slack(Duration::from_micros(5));
        assert_eq!(config.grace(), DEFAULT_GRACE);
        assert_eq!(config.yield_slack(), Duration::from_micros(5));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_serde_round_trip() {
        let config = InterrupterConfig::new().with_grace(Duration::from_millis(100));
        let json = serde_json::to_string(&config).expect("serialize config");
        let back: InterrupterConfig = serde_json::from_str(&json).expect("deserialize config");
        assert_eq!(back, config);
    }
}
