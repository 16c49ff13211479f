use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::enums::{Metric, SeriesMode};
use super::{deserialize_id, parse_iso_date};
use crate::error::{VizError, VizResult};

/// One visit's growth measurements as served by the read API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrowthDataPoint {
    #[serde(deserialize_with = "deserialize_id")]
    pub visit_id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub child_id: String,
    #[serde(default)]
    pub child_name: String,
    #[serde(default)]
    pub age_months: Option<u32>,
    #[serde(default)]
    pub birth_date: Option<String>,
    pub visit_date: String,
    #[serde(default)]
    pub weight_value: Option<f64>,
    #[serde(default)]
    pub weight_percentile: Option<f64>,
    #[serde(default)]
    pub height_value: Option<f64>,
    #[serde(default)]
    pub height_percentile: Option<f64>,
    #[serde(default)]
    pub head_circumference_value: Option<f64>,
    #[serde(default)]
    pub head_circumference_percentile: Option<f64>,
    #[serde(default)]
    pub bmi_value: Option<f64>,
    #[serde(default)]
    pub bmi_percentile: Option<f64>,
}

/// A `(value, percentile)` pair for one metric at one visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricReading {
    pub value: Option<f64>,
    pub percentile: Option<f64>,
}

impl MetricReading {
    /// Drops non-finite or negative values and percentiles outside 0..=100.
    pub fn new(value: Option<f64>, percentile: Option<f64>) -> Self {
        Self {
            value: value.filter(|v| v.is_finite() && *v >= 0.0),
            percentile: percentile.filter(|p| p.is_finite() && (0.0..=100.0).contains(p)),
        }
    }

    pub fn get(&self, mode: SeriesMode) -> Option<f64> {
        match mode {
            SeriesMode::Value => self.value,
            SeriesMode::Percentile => self.percentile,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.percentile.is_none()
    }
}

/// One visit's metric snapshot for one child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub visit_id: String,
    pub child_id: String,
    pub child_name: String,
    pub age_months: u32,
    pub visit_date: NaiveDate,
    pub weight: MetricReading,
    pub height: MetricReading,
    pub head_circumference: MetricReading,
    pub bmi: MetricReading,
}

impl GrowthPoint {
    pub fn reading(&self, metric: Metric) -> MetricReading {
        match metric {
            Metric::Weight => self.weight,
            Metric::Height => self.height,
            Metric::HeadCircumference => self.head_circumference,
            Metric::Bmi => self.bmi,
        }
    }

    pub fn value(&self, metric: Metric, mode: SeriesMode) -> Option<f64> {
        self.reading(metric).get(mode)
    }

    /// False when all four metric pairs are null.
    pub fn has_any_reading(&self) -> bool {
        Metric::ALL.iter().any(|m| !self.reading(*m).is_empty())
    }
}

impl TryFrom<&GrowthDataPoint> for GrowthPoint {
    type Error = VizError;

    fn try_from(record: &GrowthDataPoint) -> Result<Self, Self::Error> {
        let visit_date = parse_iso_date(&record.visit_date)?;
        let age_months = match record.age_months {
            Some(age) => age,
            None => {
                let birth = record
                    .birth_date
                    .as_deref()
                    .map(parse_iso_date)
                    .transpose()?
                    .ok_or_else(|| VizError::MissingAge {
                        visit_id: record.visit_id.clone(),
                    })?;
                age_in_months(birth, visit_date)
            }
        };

        Ok(GrowthPoint {
            visit_id: record.visit_id.clone(),
            child_id: record.child_id.clone(),
            child_name: record.child_name.clone(),
            age_months,
            visit_date,
            weight: MetricReading::new(record.weight_value, record.weight_percentile),
            height: MetricReading::new(record.height_value, record.height_percentile),
            head_circumference: MetricReading::new(
                record.head_circumference_value,
                record.head_circumference_percentile,
            ),
            bmi: MetricReading::new(record.bmi_value, record.bmi_percentile),
        })
    }
}

/// Whole calendar months between `birth` and `at`, saturating at zero.
///
/// A month only counts once the day-of-month has been reached.
pub fn age_in_months(birth: NaiveDate, at: NaiveDate) -> u32 {
    if at <= birth {
        return 0;
    }
    let mut months = (at.year() - birth.year()) * 12 + at.month() as i32 - birth.month() as i32;
    if at.day() < birth.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// Converts wire records into typed points, skipping the ones that cannot
/// be placed on an age axis.
pub fn normalize_points(records: &[GrowthDataPoint]) -> Vec<GrowthPoint> {
    records
        .iter()
        .filter_map(|record| match GrowthPoint::try_from(record) {
            Ok(point) => Some(point),
            Err(e) => {
                tracing::warn!(visit_id = %record.visit_id, error = %e, "Skipping growth record");
                None
            }
        })
        .collect()
}

/// Decodes a JSON array of growth records and normalizes it.
pub fn parse_growth_payload(json: &str) -> VizResult<Vec<GrowthPoint>> {
    let records: Vec<GrowthDataPoint> = serde_json::from_str(json)?;
    Ok(normalize_points(&records))
}
