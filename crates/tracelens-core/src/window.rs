//! Time window arithmetic over epoch-millisecond timestamps.
//!
//! All timestamps are absolute epoch milliseconds. Day boundaries are
//! computed in UTC so that a shared location encoding means the same
//! window to every viewer.

/// One minute in milliseconds.
pub const MINUTE_MS: i64 = 60 * 1000;

/// One hour in milliseconds.
pub const HOUR_MS: i64 = 60 * MINUTE_MS;

/// One day in milliseconds.
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// The default window starts at most this long before "now"...
const DEFAULT_LOOKBACK_MS: i64 = 105 * MINUTE_MS;

/// ...and spans this long, clamped to the filter day on both sides.
const DEFAULT_SPAN_MS: i64 = 120 * MINUTE_MS;

/// Returns the UTC midnight at or before `ts`.
pub fn day_start(ts: i64) -> i64 {
    ts - ts.rem_euclid(DAY_MS)
}

/// The backend's fixed aggregation bucket size.
///
/// Aggregate points are reported at the *end* of each bucket: a point with
/// timestamp `t` covers `[t - interval, t]`. Explicit query bounds coming
/// from a shared location are therefore shifted forward by one bucket
/// before display so the visible range lines up with point timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateInterval {
    millis: i64,
}

impl AggregateInterval {
    /// Build an interval from the configured bucket size in seconds.
    pub fn from_secs(secs: u32) -> Self {
        Self {
            millis: i64::from(secs) * 1000,
        }
    }

    /// The bucket size in milliseconds.
    pub fn millis(&self) -> i64 {
        self.millis
    }

    /// Rounds `ts` down to the start of the aggregation bucket it falls in.
    ///
    /// Seconds are always truncated; when the bucket is longer than a
    /// minute, the minute-of-hour is additionally rounded down to a
    /// multiple of the bucket length in minutes.
    pub fn round_down(&self, ts: i64) -> i64 {
        let minute = ts - ts.rem_euclid(MINUTE_MS);
        let interval_minutes = self.millis / MINUTE_MS;
        if interval_minutes > 1 {
            let hour = minute - minute.rem_euclid(HOUR_MS);
            let minute_of_hour = (minute - hour) / MINUTE_MS;
            hour + (minute_of_hour / interval_minutes) * interval_minutes * MINUTE_MS
        } else {
            minute
        }
    }
}

/// An inclusive time window over the chart's x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: i64,
    pub to: i64,
}

impl TimeWindow {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    /// Window length in milliseconds.
    pub fn span(&self) -> i64 {
        self.to - self.from
    }

    /// Derive the default view for `now`: roughly the last two hours,
    /// rounded to the aggregation grid, never straddling a calendar day.
    ///
    /// Returns the window together with the filter day it is anchored to.
    pub fn default_for(now: i64, interval: AggregateInterval) -> (Self, i64) {
        let day = day_start(now);
        let rounded = interval.round_down(now);
        let from = (rounded - DEFAULT_LOOKBACK_MS).max(day);
        let to = (from + DEFAULT_SPAN_MS).min(day + DAY_MS);
        (Self { from, to }, day)
    }

    /// Re-anchor the window to the same time-of-day on a new day.
    ///
    /// Both bounds keep their offsets relative to the day the window
    /// currently starts in, so a window that crosses midnight stays the
    /// same shape.
    pub fn rebase_to_day(&self, day: i64) -> Self {
        let current_day = day_start(self.from);
        Self {
            from: day + (self.from - current_day),
            to: day + (self.to - current_day),
        }
    }

    /// The zoomable/pannable range for a filter day: the full calendar day.
    pub fn pannable_range(day: i64) -> (i64, i64) {
        (day, day + DAY_MS)
    }
}
