use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{deserialize_ids, parse_iso_date};
use crate::error::VizResult;

/// One day of the illness aggregate as served by the read API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapDayRecord {
    pub date: String,
    #[serde(default)]
    pub count: f64,
    #[serde(default, deserialize_with = "deserialize_ids")]
    pub children: Vec<String>,
}

/// One calendar day's aggregate: children sick, or single-child severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapDay {
    pub date: NaiveDate,
    pub count: f64,
    pub contributors: Vec<String>,
}

impl HeatmapDay {
    /// Builds a day, forcing `count >= 0` and an empty contributor list
    /// whenever the count is zero.
    pub fn new(date: NaiveDate, count: f64, contributors: Vec<String>) -> Self {
        let count = if count.is_finite() && count > 0.0 { count } else { 0.0 };
        let contributors = if count == 0.0 { Vec::new() } else { contributors };
        Self {
            date,
            count,
            contributors,
        }
    }

    /// A day with no record behind it.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            count: 0.0,
            contributors: Vec::new(),
        }
    }
}

impl TryFrom<&HeatmapDayRecord> for HeatmapDay {
    type Error = crate::error::VizError;

    fn try_from(record: &HeatmapDayRecord) -> Result<Self, Self::Error> {
        let date = parse_iso_date(&record.date)?;
        Ok(HeatmapDay::new(date, record.count, record.children.clone()))
    }
}

/// Converts wire records into typed days.
///
/// Records with malformed dates are skipped; on duplicate dates the first
/// record wins.
pub fn normalize_days(records: &[HeatmapDayRecord]) -> Vec<HeatmapDay> {
    let mut seen: HashSet<NaiveDate> = HashSet::with_capacity(records.len());
    let mut days = Vec::with_capacity(records.len());

    for record in records {
        match HeatmapDay::try_from(record) {
            Ok(day) => {
                if seen.insert(day.date) {
                    days.push(day);
                } else {
                    tracing::debug!(date = %day.date, "Duplicate heatmap day ignored");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping heatmap record");
            }
        }
    }

    days
}

/// Decodes a JSON array of heatmap records and normalizes it.
pub fn parse_heatmap_payload(json: &str) -> VizResult<Vec<HeatmapDay>> {
    let records: Vec<HeatmapDayRecord> = serde_json::from_str(json)?;
    Ok(normalize_days(&records))
}
