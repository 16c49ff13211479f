use std::collections::{BTreeMap, BTreeSet};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::models::enums::{Metric, SeriesMode};
use crate::models::growth::GrowthPoint;

/// What to chart: visible metrics, value or percentile, and which children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRequest {
    pub metrics: Vec<Metric>,
    pub mode: SeriesMode,
    /// Set for the single-child chart.
    #[serde(default)]
    pub child_filter: Option<String>,
    /// Children toggled visible on the family chart; `None` shows everyone.
    #[serde(default)]
    pub visible_children: Option<BTreeSet<String>>,
}

impl SeriesRequest {
    pub fn new(metric: Metric, mode: SeriesMode) -> Self {
        Self {
            metrics: vec![metric],
            mode,
            child_filter: None,
            visible_children: None,
        }
    }

    pub fn with_metrics(mut self, metrics: &[Metric]) -> Self {
        self.metrics = metrics.to_vec();
        self
    }

    pub fn for_child(mut self, child_id: impl Into<String>) -> Self {
        self.child_filter = Some(child_id.into());
        self
    }

    pub fn with_visible_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visible_children = Some(children.into_iter().map(Into::into).collect());
        self
    }

    /// Visible metrics, duplicates dropped, first occurrence kept.
    pub fn visible_metrics(&self) -> Vec<Metric> {
        let mut seen = Vec::with_capacity(self.metrics.len());
        for m in &self.metrics {
            if !seen.contains(m) {
                seen.push(*m);
            }
        }
        seen
    }
}

// ═══════════════════════════════════════════
// Single-child shape
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPoint {
    pub age_months: u32,
    pub visit_id: String,
    pub y: Option<f64>,
}

/// One metric's line for one child. Nulls are gaps, never bridged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesLine {
    pub metric: Metric,
    pub connect_nulls: bool,
    pub points: Vec<PlotPoint>,
}

impl SeriesLine {
    /// Runs of consecutive non-null points; each run is drawn as its own
    /// segment.
    pub fn segments(&self) -> Vec<Vec<(u32, f64)>> {
        let mut segments = Vec::new();
        let mut current: Vec<(u32, f64)> = Vec::new();
        for p in &self.points {
            match p.y {
                Some(y) => current.push((p.age_months, y)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

// ═══════════════════════════════════════════
// Multi-child shape
// ═══════════════════════════════════════════

/// Identifies one chart column: a metric for a child.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ColumnKey {
    pub metric: Metric,
    pub child_id: String,
}

impl ColumnKey {
    pub fn new(metric: Metric, child_id: impl Into<String>) -> Self {
        Self {
            metric,
            child_id: child_id.into(),
        }
    }

    /// Flat key used by the charting layer, e.g. `weight_42`.
    pub fn column_name(&self) -> String {
        format!("{}_{}", self.metric.as_str(), self.child_id)
    }
}

/// One age on the family chart, holding every column (null when missing).
#[derive(Debug, Clone, PartialEq)]
pub struct AgeRow {
    pub age_months: u32,
    pub cells: BTreeMap<ColumnKey, Option<f64>>,
}

impl AgeRow {
    pub fn get(&self, key: &ColumnKey) -> Option<f64> {
        self.cells.get(key).copied().flatten()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(Option::is_none)
    }
}

impl Serialize for AgeRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len() + 1))?;
        map.serialize_entry("age_months", &self.age_months)?;
        for (key, value) in &self.cells {
            map.serialize_entry(&key.column_name(), value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildSeries {
    pub id: String,
    pub name: String,
}

/// Age-indexed wide table; lines connect across null cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiChildTable {
    pub children: Vec<ChildSeries>,
    pub columns: Vec<ColumnKey>,
    pub rows: Vec<AgeRow>,
    pub connect_nulls: bool,
}

impl MultiChildTable {
    /// The drawn polyline of one column: every non-null cell in age order.
    pub fn line(&self, key: &ColumnKey) -> Vec<(u32, f64)> {
        self.rows
            .iter()
            .filter_map(|row| row.get(key).map(|v| (row.age_months, v)))
            .collect()
    }
}

// ═══════════════════════════════════════════
// Axes & output
// ═══════════════════════════════════════════

/// `[min, max]` of one vertical axis, serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
}

impl From<(f64, f64)> for AxisDomain {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<AxisDomain> for (f64, f64) {
    fn from(d: AxisDomain) -> Self {
        (d.min, d.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDomains {
    pub left: AxisDomain,
    pub right: AxisDomain,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum SeriesLayout {
    Single { lines: Vec<SeriesLine> },
    Multi(MultiChildTable),
}

/// Everything the chart needs for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesOutput {
    /// Filtered, visit-deduplicated, age-sorted points behind the chart.
    pub points: Vec<GrowthPoint>,
    pub layout: SeriesLayout,
    pub domains: AxisDomains,
}

impl SeriesOutput {
    /// The points behind this output, ready to be fed back in.
    pub fn flatten(&self) -> Vec<GrowthPoint> {
        self.points.clone()
    }
}
