use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Sort order for entry/routine lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// Case-insensitive ascending by name.
    Name,
    /// Ascending by creation time.
    #[default]
    CreatedAt,
}

impl SortBy {
    /// Stable string form, used in cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::CreatedAt => "createdAt",
        }
    }
}

/// A normalized list query: 1-based page, bounded limit, optional
/// case-insensitive name filter, and a sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: usize,
    pub limit: usize,
    pub name: Option<String>,
    pub sort_by: SortBy,
}

impl ListQuery {
    pub const DEFAULT_LIMIT: usize = 50;
    pub const MAX_LIMIT: usize = 200;

    /// Builds a normalized query from raw request parameters.
    ///
    /// Zero or missing `page` becomes 1; `limit` is clamped to
    /// `1..=MAX_LIMIT`; an empty name filter is dropped.
    pub fn from_params(
        page: Option<usize>,
        limit: Option<usize>,
        name: Option<String>,
        sort_by: Option<SortBy>,
    ) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
            name: name.filter(|n| !n.trim().is_empty()),
            sort_by: sort_by.unwrap_or_default(),
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.limit
    }

    /// Whether `name` passes the query's name filter.
    pub fn matches_name(&self, name: &str) -> bool {
        match &self.name {
            Some(filter) => name.to_lowercase().contains(&filter.to_lowercase()),
            None => true,
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::from_params(None, None, None, None)
    }
}

/// Reporting window for entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRange {
    Week,
    Month,
    Year,
}

/// Error returned for an unrecognized record range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid date range")]
pub struct InvalidRecordRange;

impl RecordRange {
    /// The inclusive lower bound of the window, measured back from `now`.
    pub fn start_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let days = match self {
            RecordRange::Week => 7,
            RecordRange::Month => 30,
            RecordRange::Year => 365,
        };
        now - Duration::days(days)
    }
}

impl FromStr for RecordRange {
    type Err = InvalidRecordRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(RecordRange::Week),
            "month" => Ok(RecordRange::Month),
            "year" => Ok(RecordRange::Year),
            _ => Err(InvalidRecordRange),
        }
    }
}
