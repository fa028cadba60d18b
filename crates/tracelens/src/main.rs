//! tracelens - refresh coordination for the transaction dashboard.
//!
//! Headless driver: loads configuration, derives the default view, runs
//! one coordinated refresh against the configured backend, and logs what
//! a rendering shell would display.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use tracelens::{
    ChartSink, DialogHost, LocationStore, MemoryLocation, RefreshCoordinator, RefreshSettings,
    RefreshTrigger, TableSink,
};
use tracelens_config::Config;
use tracelens_core::{AggregateInterval, DataSeries, SummaryPage};
use tracelens_data::HttpQueryClient;

/// Chart sink that logs what a rendering engine would draw.
struct LogChart;

impl ChartSink for LogChart {
    fn loading_started(&self) {
        log::debug!("chart spinner on");
    }

    fn loading_finished(&self) {
        log::debug!("chart spinner off");
    }

    fn set_time_bounds(&self, from: i64, to: i64) {
        log::info!("chart bounds [{from}, {to}]");
    }

    fn set_zoom_range(&self, from: i64, to: i64) {
        log::info!("chart pannable range [{from}, {to}]");
    }

    fn set_series(&self, series: Vec<DataSeries>) {
        for s in &series {
            log::info!("series '{}': {} points", s.label(), s.data.len());
        }
    }

    fn show_error(&self, message: &str) {
        log::error!("chart error: {message}");
    }

    fn clear_error(&self) {}
}

/// Table sink that logs the ranked rows.
struct LogTable;

impl TableSink for LogTable {
    fn overlay_started(&self) {
        log::debug!("table overlay on");
    }

    fn overlay_finished(&self) {
        log::debug!("table overlay off");
    }

    fn spinner_started(&self) {
        log::debug!("table spinner on");
    }

    fn spinner_finished(&self) {
        log::debug!("table spinner off");
    }

    fn set_summaries(&self, page: SummaryPage) {
        match page.overall.average_secs() {
            Some(avg) => log::info!("overall average {avg:.2}s over {} calls", page.overall.count),
            None => log::info!("no transactions in window"),
        }
        for row in &page.transactions {
            log::info!(
                "  {:>5.1}% {} ({} calls)",
                page.bar_width_percent(row.total_micros),
                row.name,
                row.count
            );
        }
        if page.more_available {
            log::info!("  ... more available");
        }
    }

    fn show_error(&self, message: &str) {
        log::error!("table error: {message}");
    }
}

struct LogDialogs;

impl DialogHost for LogDialogs {
    fn open_detail(&self, params: Vec<(String, String)>) {
        log::info!("detail dialog requested: {params:?}");
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as i64
}

async fn run() -> Result<()> {
    env_logger::init();

    let config = Config::load_default();
    let interval = AggregateInterval::from_secs(config.aggregate.interval_secs);
    let default_type = config.general.default_transaction_type.clone();

    let location = Arc::new(MemoryLocation::new());
    let state = tracelens::location::decode(&location.current(), interval, &default_type, now_ms());

    let coordinator = RefreshCoordinator::new(
        Arc::new(HttpQueryClient::new(&config.backend.base_url)),
        Arc::new(LogChart),
        Arc::new(LogTable),
        Arc::new(LogDialogs),
        location,
        state,
        interval,
        default_type,
        RefreshSettings::from(&config.refresh),
    );

    coordinator.refresh(RefreshTrigger::manual()).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
    }
}
