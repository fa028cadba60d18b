//! Ranked per-transaction aggregates for the table view.

use serde::{Deserialize, Serialize};

/// Aggregate across every transaction in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallSummary {
    pub total_micros: u64,
    pub count: u64,
}

impl OverallSummary {
    /// Average seconds per transaction, `None` when nothing was recorded.
    pub fn average_secs(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.total_micros as f64 / self.count as f64 / 1_000_000.0)
        }
    }
}

/// Aggregate for a single transaction name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub name: String,
    pub total_micros: u64,
    pub count: u64,
}

/// One page of ranked summaries plus the overall aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPage {
    pub overall: OverallSummary,
    pub more_available: bool,
    pub transactions: Vec<TransactionSummary>,
}

impl SummaryPage {
    /// Largest total across the visible rows. Scales the proportional
    /// bars rendered under each transaction name.
    pub fn max_total_micros(&self) -> u64 {
        self.transactions
            .iter()
            .map(|t| t.total_micros)
            .max()
            .unwrap_or(0)
    }

    /// Bar width for a row, as a percentage of the widest row.
    pub fn bar_width_percent(&self, total_micros: u64) -> f64 {
        let max = self.max_total_micros();
        if max == 0 {
            0.0
        } else {
            total_micros as f64 / max as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> SummaryPage {
        SummaryPage {
            overall: OverallSummary {
                total_micros: 3_000_000,
                count: 2,
            },
            more_available: true,
            transactions: vec![
                TransactionSummary {
                    name: "/checkout".to_string(),
                    total_micros: 2_000_000,
                    count: 1,
                },
                TransactionSummary {
                    name: "/home".to_string(),
                    total_micros: 500_000,
                    count: 1,
                },
            ],
        }
    }

    #[test]
    fn test_overall_average() {
        assert_eq!(page().overall.average_secs(), Some(1.5));
        let empty = OverallSummary::default();
        assert_eq!(empty.average_secs(), None);
    }

    #[test]
    fn test_bar_width_proportional_to_max() {
        let page = page();
        assert_eq!(page.max_total_micros(), 2_000_000);
        assert_eq!(page.bar_width_percent(2_000_000), 100.0);
        assert_eq!(page.bar_width_percent(500_000), 25.0);
    }

    #[test]
    fn test_bar_width_with_no_rows() {
        let page = SummaryPage::default();
        assert_eq!(page.bar_width_percent(1), 0.0);
    }

    #[test]
    fn test_wire_format_uses_camel_case() {
        let json = r#"{
            "overall": {"totalMicros": 10, "count": 1},
            "moreAvailable": false,
            "transactions": [{"name": "/a", "totalMicros": 10, "count": 1}]
        }"#;
        let page: SummaryPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.overall.total_micros, 10);
        assert!(!page.more_available);
        assert_eq!(page.transactions[0].name, "/a");
    }
}
