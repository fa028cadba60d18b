//! Stacked chart series payloads.

use serde::{Deserialize, Serialize};

/// A single aggregate point.
///
/// Wire format is a `[timestamp, value, sample_count]` triple: the bucket
/// end timestamp in epoch milliseconds, the average duration in seconds,
/// and the number of samples aggregated into the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint(i64, f64, u64);

impl SeriesPoint {
    pub fn new(timestamp: i64, value: f64, sample_count: u64) -> Self {
        Self(timestamp, value, sample_count)
    }

    /// Bucket end timestamp in epoch milliseconds.
    pub fn timestamp(&self) -> i64 {
        self.0
    }

    /// Average duration in seconds over the bucket.
    pub fn value(&self) -> f64 {
        self.1
    }

    /// Number of samples aggregated into the bucket.
    pub fn sample_count(&self) -> u64 {
        self.2
    }
}

/// One named series of aggregate points.
///
/// A missing name denotes the bucket that absorbs everything outside the
/// top-ranked transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSeries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub data: Vec<SeriesPoint>,
}

impl DataSeries {
    /// Display label for the series.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("Other")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_wire_format_is_a_triple() {
        let json = "[[1000, 0.25, 12], [2000, 0.5, 3]]";
        let points: Vec<SeriesPoint> = serde_json::from_str(json).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].timestamp(), 1000);
        assert_eq!(points[0].value(), 0.25);
        assert_eq!(points[1].sample_count(), 3);
    }

    #[test]
    fn test_unnamed_series_labelled_other() {
        let json = r#"[{"name": "/home", "data": []}, {"data": [[1000, 0.1, 1]]}]"#;
        let series: Vec<DataSeries> = serde_json::from_str(json).unwrap();
        assert_eq!(series[0].label(), "/home");
        assert_eq!(series[1].label(), "Other");
        assert_eq!(series[1].data.len(), 1);
    }
}
