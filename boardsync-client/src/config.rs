/// Client configuration
///
/// Loaded from environment variables, with a `.env` file honored in
/// development.
///
/// # Environment Variables
///
/// - `BOARDSYNC_API_URL`: Backend origin (default: http://localhost:8000)
/// - `BOARDSYNC_POLL_INTERVAL_SECS`: Message poll interval (default: 5)
///
/// # Example
///
/// ```no_run
/// use boardsync_client::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("talking to {}", config.api.base_url);
/// # Ok(())
/// # }
/// ```

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default message poll interval in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend API configuration
    pub api: ApiConfig,

    /// Message poller configuration
    pub poller: PollerConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend origin, without a trailing slash
    pub base_url: String,
}

/// Message poller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerConfig {
    /// Seconds between message re-fetches on an open detail view
    pub interval_secs: u64,
}

impl PollerConfig {
    /// Poll interval as a `Duration`
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig {
                base_url: "http://localhost:8000".to_string(),
            },
            poller: PollerConfig {
                interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            },
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `BOARDSYNC_POLL_INTERVAL_SECS` is set but does
    /// not parse, or parses to zero.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let base_url = env::var("BOARDSYNC_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string())
            .trim_end_matches('/')
            .to_string();

        let interval_secs = env::var("BOARDSYNC_POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_POLL_INTERVAL_SECS.to_string())
            .parse::<u64>()?;

        if interval_secs == 0 {
            anyhow::bail!("BOARDSYNC_POLL_INTERVAL_SECS must be greater than zero");
        }

        Ok(Config {
            api: ApiConfig { base_url },
            poller: PollerConfig { interval_secs },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.poller.interval(), Duration::from_secs(5));
    }
}
