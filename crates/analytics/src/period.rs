//! Calendar periods used to bucket revenue.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

/// Granularity of revenue buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Calendar day, keyed `YYYY-MM-DD`.
    Day,
    /// ISO week, keyed by its Monday as `YYYY-MM-DD`.
    Week,
    /// Calendar month, keyed `YYYY-MM`.
    Month,
}

impl Period {
    /// Returns the bucket key for an instant, evaluated in UTC.
    pub fn key(&self, at: DateTime<Utc>) -> Option<String> {
        let date = at.date_naive();
        match self {
            Period::Day => Some(date.format("%Y-%m-%d").to_string()),
            Period::Week => {
                let offset = u64::from(date.weekday().num_days_from_monday());
                date.checked_sub_days(Days::new(offset))
                    .map(|monday| monday.format("%Y-%m-%d").to_string())
            }
            Period::Month => Some(format!("{:04}-{:02}", date.year(), date.month())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        }
    }
}

impl FromStr for Period {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            other => Err(AnalyticsError::InvalidInput(format!(
                "Unknown period: {other} (expected day, week or month)"
            ))),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
