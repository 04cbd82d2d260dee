//! Session configuration

use std::time::Duration;

/// Tunables for the playback session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Position threshold for the previous button: at or past this many
    /// seconds "previous" restarts the current track instead of going back
    pub previous_restart_threshold: f64,

    /// How long the host should wait before delivering the deferred skip
    /// after a transport error
    pub error_skip_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            previous_restart_threshold: 3.0,
            error_skip_delay: Duration::from_millis(1500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.previous_restart_threshold, 3.0);
        assert_eq!(config.error_skip_delay, Duration::from_millis(1500));
    }
}
