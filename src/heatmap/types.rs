use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::color::{LegendSwatch, Rgb};
use crate::config::DisplayPrefs;
use crate::models::heatmap::HeatmapDay;

/// One `(week, day-of-week)` slot of the grid.
///
/// Padding cells have no date, a zero count and no colour; they are not
/// clickable and never feed the legend or the colour maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub date: Option<NaiveDate>,
    pub count: f64,
    pub contributors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl GridCell {
    pub fn padding() -> Self {
        Self {
            date: None,
            count: 0.0,
            contributors: Vec::new(),
            color: None,
            label: None,
        }
    }

    pub fn from_day(day: &HeatmapDay) -> Self {
        Self {
            date: Some(day.date),
            count: day.count,
            contributors: day.contributors.clone(),
            color: None,
            label: None,
        }
    }

    pub fn is_padding(&self) -> bool {
        self.date.is_none()
    }
}

/// Seven cells, index 0 is always Sunday.
pub type Week = [GridCell; 7];

/// Whose illnesses the heatmap shows; decides the colour maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum HeatmapScope {
    /// Counts are 0–10 severities for one child.
    Child { child_id: String },
    /// Counts are "children sick that day".
    AllChildren { family_size: Option<u32> },
}

/// The `[Jan 1, min(Dec 31, today)]` span of a year that holds real data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderWindow {
    pub year: i32,
    pub start: NaiveDate,
    /// `None` when the year lies entirely in the future.
    pub end: Option<NaiveDate>,
    /// Last day the grid shape has to cover.
    pub span_end: NaiveDate,
}

impl RenderWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.end
            .is_some_and(|end| self.start <= date && date <= end)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapRequest {
    pub year: i32,
    pub today: NaiveDate,
    pub scope: HeatmapScope,
    #[serde(default)]
    pub prefs: DisplayPrefs,
}

/// Column where a month's label goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthLabel {
    pub month: u32,
    pub week_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakDay {
    pub date: NaiveDate,
    pub count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapSummary {
    pub days_in_window: u32,
    pub active_days: u32,
    pub total: f64,
    pub peak: Option<PeakDay>,
}

/// Everything the renderer needs for one year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapData {
    pub window: RenderWindow,
    pub weeks: Vec<Week>,
    pub max_for_color: f64,
    pub legend: Vec<LegendSwatch>,
    pub month_labels: Vec<MonthLabel>,
    pub summary: HeatmapSummary,
}
