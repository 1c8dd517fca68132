use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::view_mode::DEFAULT_BREAKPOINT_PX;

pub const DEFAULT_MONTH_ENDPOINT: &str = "/ajax-calendar/";
pub const DEFAULT_WEEK_ENDPOINT: &str = "/ajax-week-calendar/";

/// What to do with a response whose request has been superseded on its axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleResponsePolicy {
    /// Only the most recently issued request may commit or notify
    #[default]
    Discard,
    /// Whichever response lands last wins
    LastWins,
}

/// Widget configuration, usually embedded in the page as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub breakpoint_px: u32,
    pub month_endpoint: String,
    pub week_endpoint: String,
    pub stale_responses: StaleResponsePolicy,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: DEFAULT_BREAKPOINT_PX,
            month_endpoint: DEFAULT_MONTH_ENDPOINT.to_string(),
            week_endpoint: DEFAULT_WEEK_ENDPOINT.to_string(),
            stale_responses: StaleResponsePolicy::Discard,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid calendar config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("breakpoint_px must be greater than zero")]
    ZeroBreakpoint,
    #[error("{0} must not be empty")]
    EmptyEndpoint(&'static str),
}

impl CalendarConfig {
    /// Parse and validate a JSON config block; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CalendarConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.breakpoint_px == 0 {
            return Err(ConfigError::ZeroBreakpoint);
        }
        if self.month_endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint("month_endpoint"));
        }
        if self.week_endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint("week_endpoint"));
        }
        Ok(())
    }
}
