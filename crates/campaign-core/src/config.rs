//! Campaign tuning knobs

use std::time::Duration;

use thiserror::Error;

/// Pause after each successful send
pub const DEFAULT_SEND_DELAY_MS: u64 = 500;

/// Probability that a simulated delivery succeeds
pub const DEFAULT_SUCCESS_RATE: f64 = 0.9;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Success rate must be between 0 and 1, got {0}")]
    InvalidSuccessRate(f64),
}

/// Settings for a [`CampaignRunner`](crate::CampaignRunner)
#[derive(Debug, Clone)]
pub struct CampaignConfig {
    /// Wait applied after every lead that was sent; failures do not wait
    pub send_delay: Duration,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            send_delay: Duration::from_millis(DEFAULT_SEND_DELAY_MS),
        }
    }
}

impl CampaignConfig {
    pub fn with_delay_ms(ms: u64) -> Self {
        Self {
            send_delay: Duration::from_millis(ms),
        }
    }
}

/// Check that `rate` is a usable probability
pub fn check_success_rate(rate: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidSuccessRate(rate))
    }
}
