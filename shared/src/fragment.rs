//! Server-rendered fragment requests.
//!
//! The calendar never renders cells itself; each navigation asks an endpoint
//! for a ready-to-insert markup fragment.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::period::{MonthPeriod, WeekAnchor};

/// Query parameter carrying the forgery-protection token
pub const CSRF_PARAM: &str = "csrfmiddlewaretoken";

/// Navigation axis; each axis writes to its own region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Month,
    Week,
}

/// Parameters sent to a fragment endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FragmentParams {
    pub month: u32,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}

impl From<MonthPeriod> for FragmentParams {
    fn from(period: MonthPeriod) -> Self {
        Self {
            month: period.month(),
            year: period.year(),
            day: None,
        }
    }
}

impl From<WeekAnchor> for FragmentParams {
    fn from(anchor: WeekAnchor) -> Self {
        Self {
            month: anchor.month(),
            year: anchor.year(),
            day: Some(anchor.day()),
        }
    }
}

/// A single read request for one axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentRequest {
    pub axis: Axis,
    pub endpoint: String,
    pub params: FragmentParams,
}

impl FragmentRequest {
    /// Query pairs for the request, token first
    pub fn query_pairs(&self, csrf_token: &str) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            (CSRF_PARAM, csrf_token.to_string()),
            ("month", self.params.month.to_string()),
            ("year", self.params.year.to_string()),
        ];
        if let Some(day) = self.params.day {
            pairs.push(("day", day.to_string()));
        }
        pairs
    }
}

/// The only failure a navigation can hit.
///
/// Covers transport failures, non-success statuses and unreadable bodies.
/// Displays as the bare transport message so it can be shown to the user
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FragmentError {
    #[error("{message}")]
    FetchFailed { message: String },
}

impl FragmentError {
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        FragmentError::FetchFailed {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            FragmentError::FetchFailed { message } => message,
        }
    }
}

/// Single-attempt fragment fetch: no retry, no timeout, no cancellation
#[async_trait(?Send)]
pub trait FragmentFetcher {
    async fn fetch(&self, request: &FragmentRequest) -> Result<String, FragmentError>;
}
