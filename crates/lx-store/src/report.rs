//! Statistics report writing.

use chrono::{DateTime, Utc};
use lx_core::Result;
use lx_engine::CompressionStats;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize)]
struct StatsReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    stats: &'a CompressionStats,
}

/// Write a compression run's statistics as pretty-printed JSON.
pub fn write_stats_report(path: &Path, stats: &CompressionStats) -> Result<()> {
    let report = StatsReport {
        generated_at: Utc::now(),
        stats,
    };
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(path, json)?;
    Ok(())
}
