//! Provider seam for daily activity summaries
//!
//! The health gateway is an injected capability behind [`SummaryProvider`],
//! so the export pipeline can run against the real HTTP gateway or a
//! scripted double in tests.

pub mod gateway;

pub use gateway::HealthGateway;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RingsError};
use crate::models::RawDailySummary;

/// Inclusive calendar date range for one export operation.
/// Invariant: start <= end, enforced at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting start > end
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(RingsError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Parse a user-supplied YYYY-MM-DD date
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| RingsError::InvalidDateFormat(input.to_string()))
}

/// Provider-reported availability of the activity summary category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    /// Whether activity summary data can be served at all
    pub available: bool,

    /// Earliest date the provider will answer queries for (YYYY-MM-DD)
    #[serde(default)]
    pub earliest_permitted_date: Option<String>,
}

impl Availability {
    /// Earliest permitted date as a calendar date, if present and well-formed
    pub fn earliest_permitted(&self) -> Option<NaiveDate> {
        self.earliest_permitted_date
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }
}

/// Injected capability over the health data provider.
///
/// Two sequential asynchronous operations: request read access, then run
/// exactly one range query. Every failure is terminal for the current export
/// attempt; there is no retry anywhere in the pipeline.
pub trait SummaryProvider {
    /// Probe whether the provider can serve activity summaries
    fn availability(&self) -> impl std::future::Future<Output = Result<Availability>> + Send;

    /// Request read-only access to the activity summary category
    fn authorize(&self) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Fetch all daily summaries whose date falls within the inclusive range,
    /// in provider order
    fn fetch_summaries(
        &self,
        range: &DateRange,
    ) -> impl std::future::Future<Output = Result<Vec<RawDailySummary>>> + Send;
}
