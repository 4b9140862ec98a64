//! Controller configuration.

use std::time::Duration;

use wavplay_core::Platform;

use crate::command::PlayerCommand;

/// How long a non-sync playback waits for an early failure before resolving.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_millis(500);

/// Settings for a [`PlaybackController`](crate::PlaybackController).
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    grace_period: Duration,
    platform: Option<Platform>,
    player: Option<PlayerCommand>,
}

impl PlayerConfig {
    pub const fn new() -> Self {
        Self {
            grace_period: DEFAULT_GRACE_PERIOD,
            platform: None,
            player: None,
        }
    }

    /// Set the non-sync grace period.
    #[must_use]
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Pin the platform instead of detecting it on each `play`.
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Use a custom player. The file path is appended as its last argument.
    #[must_use]
    pub fn with_player(mut self, player: PlayerCommand) -> Self {
        self.player = Some(player);
        self
    }

    pub const fn grace_period(&self) -> Duration {
        self.grace_period
    }

    /// Configured platform, or the host's.
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::current)
    }

    pub const fn player(&self) -> Option<&PlayerCommand> {
        self.player.as_ref()
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlayerConfig::default();
        assert_eq!(config.grace_period(), Duration::from_millis(500));
        assert_eq!(config.platform(), Platform::current());
        assert!(config.player().is_none());
    }

    #[test]
    fn test_builders() {
        let config = PlayerConfig::new()
            .with_grace_period(Duration::from_millis(50))
            .with_platform(Platform::Other)
            .with_player(PlayerCommand::new("true"));
        assert_eq!(config.grace_period(), Duration::from_millis(50));
        assert_eq!(config.platform(), Platform::Other);
        assert_eq!(config.player(), Some(&PlayerCommand::new("true")));
    }
}
