//! Symbolic time-range resolution.
//!
//! Requests carry a symbolic token (`today`, `week`, ...) plus optional
//! vehicle and hour-module filters. Resolution happens against a fixed
//! **reference date** — the last ingested day of the historical corpus —
//! never against wall-clock time. Every consumer of the same request must
//! resolve with the same reference date, otherwise module boundaries
//! computed by the index and by the heatmap pager silently diverge.

use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::CoreError;

/// Symbolic range token accepted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeToken {
    Today,
    Week,
    Month,
    Year,
}

impl RangeToken {
    /// Parse a wire token. Unknown tokens fall back to [`RangeToken::Today`]
    /// (the last 24 hours of the corpus).
    pub fn parse(raw: &str) -> Self {
        match raw {
            "week" => Self::Week,
            "month" => Self::Month,
            "year" => Self::Year,
            _ => Self::Today,
        }
    }

    /// Number of whole days covered by the token, ending at the reference day.
    fn span_days(self) -> u64 {
        match self {
            Self::Today => 1,
            Self::Week => 7,
            Self::Month => 30,
            Self::Year => 365,
        }
    }
}

/// Key of an hour-granularity time module, e.g. `2013-09-12_8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleKey {
    pub date: NaiveDate,
    pub hour: u32,
}

impl ModuleKey {
    /// Parse a `date_hour` wire key (`%Y-%m-%d` date, hour 0-23).
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let (date_part, hour_part) = raw
            .split_once('_')
            .ok_or_else(|| CoreError::InvalidParameter(format!("malformed module key: {raw}")))?;
        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map_err(|_| CoreError::InvalidParameter(format!("malformed module date: {raw}")))?;
        let hour: u32 = hour_part
            .parse()
            .map_err(|_| CoreError::InvalidParameter(format!("malformed module hour: {raw}")))?;
        if hour > 23 {
            return Err(CoreError::InvalidParameter(format!(
                "module hour out of range: {raw}"
            )));
        }
        Ok(Self { date, hour })
    }

    /// Build a key from an hour-truncated timestamp.
    pub fn from_timestamp(ts: NaiveDateTime) -> Self {
        Self {
            date: ts.date(),
            hour: ts.hour(),
        }
    }

    /// Wire form, `YYYY-MM-DD_H` (hour unpadded, matching the dashboard).
    pub fn key(&self) -> String {
        format!("{}_{}", self.date.format("%Y-%m-%d"), self.hour)
    }

    /// Display label, `YYYY-MM-DD HH:00`.
    pub fn label(&self) -> String {
        format!("{} {:02}:00", self.date.format("%Y-%m-%d"), self.hour)
    }

    /// The half-open `[start, end)` interval covering exactly this hour.
    pub fn interval(&self) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.date.and_time(NaiveTime::MIN) + Duration::hours(i64::from(self.hour));
        (start, start + Duration::hours(1))
    }
}

/// A resolved, concrete filter: half-open time interval plus equality
/// predicates. Derived per request, never persisted.
#[derive(Debug, Clone)]
pub struct TimeRangeFilter {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub vehicle_id: Option<String>,
    pub module: Option<ModuleKey>,
}

impl TimeRangeFilter {
    /// Resolve a symbolic token against the corpus reference date.
    ///
    /// All tokens produce `[reference - (span-1) days 00:00,
    /// reference + 1 day 00:00)` so the reference day itself is always
    /// fully covered.
    pub fn resolve(
        token: RangeToken,
        reference: NaiveDate,
        vehicle_id: Option<String>,
        module: Option<ModuleKey>,
    ) -> Self {
        let end = reference
            .checked_add_days(Days::new(1))
            .unwrap_or(reference)
            .and_time(NaiveTime::MIN);
        let start = reference
            .checked_sub_days(Days::new(token.span_days() - 1))
            .unwrap_or(reference)
            .and_time(NaiveTime::MIN);
        Self {
            start,
            end,
            vehicle_id,
            module,
        }
    }

    /// The interval for point-level queries. A module key, if present,
    /// takes precedence and narrows to exactly that hour.
    pub fn point_interval(&self) -> (NaiveDateTime, NaiveDateTime) {
        match &self.module {
            Some(module) => module.interval(),
            None => (self.start, self.end),
        }
    }

    /// A copy with the module narrowing removed. The module indexer lists
    /// buckets for the whole range even when one module is selected.
    pub fn without_module(&self) -> Self {
        Self {
            module: None,
            ..self.clone()
        }
    }
}
