use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Seconds to sleep between poll passes.
    pub poll_interval_secs: u64,
    /// Named log channels to monitor.
    pub channels: Vec<String>,
    /// Directory holding the per-channel record spool files.
    pub spool_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Every value has a default; `POLL_INTERVAL_SECS` must parse as an
    /// integer and `MONITORED_CHANNELS` must name at least one channel.
    pub fn from_env() -> Result<Self, ConfigError> {
        let poll_interval_secs = env::var("POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPollInterval)?;

        let channels: Vec<String> = env::var("MONITORED_CHANNELS")
            .unwrap_or_else(|_| "Security,Application".to_string())
            .split(',')
            .map(|channel| channel.trim().to_string())
            .filter(|channel| !channel.is_empty())
            .collect();

        if channels.is_empty() {
            return Err(ConfigError::NoChannels);
        }

        let spool_dir =
            PathBuf::from(env::var("EVENT_SPOOL_DIR").unwrap_or_else(|_| "spool".to_string()));

        Ok(Self {
            poll_interval_secs,
            channels,
            spool_dir,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid poll interval")]
    InvalidPollInterval,
    #[error("MONITORED_CHANNELS must name at least one channel")]
    NoChannels,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so concurrent cases never race on the same env vars.
    #[test]
    fn should_load_config_from_env() {
        // Arrange - defaults
        env::remove_var("POLL_INTERVAL_SECS");
        env::remove_var("MONITORED_CHANNELS");
        env::remove_var("EVENT_SPOOL_DIR");

        // Act
        let config = AppConfig::from_env().expect("Failed to load defaults");

        // Assert
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.channels, vec!["Security", "Application"]);
        assert_eq!(config.spool_dir, PathBuf::from("spool"));

        // Arrange - explicit overrides
        env::set_var("POLL_INTERVAL_SECS", "30");
        env::set_var("MONITORED_CHANNELS", "Security, System ,");
        env::set_var("EVENT_SPOOL_DIR", "/var/spool/eventwatch");

        // Act
        let config = AppConfig::from_env().expect("Failed to load overrides");

        // Assert - blank entries are dropped, names are trimmed
        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.channels, vec!["Security", "System"]);
        assert_eq!(config.spool_dir, PathBuf::from("/var/spool/eventwatch"));

        // Arrange - invalid interval
        env::set_var("POLL_INTERVAL_SECS", "soon");

        // Act & Assert
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::InvalidPollInterval)
        ));

        // Arrange - no usable channels
        env::set_var("POLL_INTERVAL_SECS", "5");
        env::set_var("MONITORED_CHANNELS", " , ,");

        // Act & Assert
        assert!(matches!(AppConfig::from_env(), Err(ConfigError::NoChannels)));

        // Cleanup
        env::remove_var("POLL_INTERVAL_SECS");
        env::remove_var("MONITORED_CHANNELS");
        env::remove_var("EVENT_SPOOL_DIR");
    }
}
