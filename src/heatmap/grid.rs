use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate};

use super::types::*;
use crate::color::color_for;
use crate::error::{VizError, VizResult};
use crate::format::format_date;
use crate::models::enums::{DateFormat, Theme};
use crate::models::heatmap::HeatmapDay;

/// Resolves the rendering window of `year` as seen on `today`.
///
/// Past years span Jan 1–Dec 31, the current year stops at `today`, and a
/// future year has an empty window but still the full-year grid shape.
pub fn render_window(year: i32, today: NaiveDate) -> VizResult<RenderWindow> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(VizError::InvalidYear(year))?;
    let year_end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(VizError::InvalidYear(year))?;

    let end = if today < start {
        None
    } else {
        Some(today.min(year_end))
    };

    Ok(RenderWindow {
        year,
        start,
        end,
        span_end: end.unwrap_or(year_end),
    })
}

fn days_from_sunday(date: NaiveDate) -> u64 {
    date.weekday().num_days_from_sunday() as u64
}

/// Lays `days` out on a 7-row week grid for `year`.
///
/// The grid runs from the Sunday on/before Jan 1 to the Saturday on/after
/// the window end. Every date gets its slot from its position alone; only
/// the cell content depends on the window: days inside are populated (a
/// missing record means zero), days outside are padding.
pub fn build_grid(year: i32, days: &[HeatmapDay], today: NaiveDate) -> Vec<Week> {
    match render_window(year, today).and_then(|window| layout(&window, days)) {
        Ok(weeks) => weeks,
        Err(e) => {
            tracing::warn!(year, error = %e, "Cannot build heatmap grid");
            Vec::new()
        }
    }
}

pub(super) fn layout(window: &RenderWindow, days: &[HeatmapDay]) -> VizResult<Vec<Week>> {
    let invalid = || VizError::InvalidYear(window.year);
    let first_sunday = window
        .start
        .checked_sub_days(Days::new(days_from_sunday(window.start)))
        .ok_or_else(invalid)?;
    let last_saturday = window
        .span_end
        .checked_add_days(Days::new(6 - days_from_sunday(window.span_end)))
        .ok_or_else(invalid)?;

    let mut by_date: HashMap<NaiveDate, &HeatmapDay> = HashMap::with_capacity(days.len());
    for day in days {
        by_date.entry(day.date).or_insert(day);
    }

    let mut weeks: Vec<Week> = Vec::with_capacity(54);
    for date in first_sunday.iter_days().take_while(|d| *d <= last_saturday) {
        let offset = (date - first_sunday).num_days() as usize;
        let week_index = offset / 7;
        let day_of_week = days_from_sunday(date) as usize;

        if week_index == weeks.len() {
            weeks.push(std::array::from_fn(|_| GridCell::padding()));
        }

        weeks[week_index][day_of_week] = if window.contains(date) {
            match by_date.get(&date) {
                Some(day) => GridCell::from_day(day),
                None => GridCell::from_day(&HeatmapDay::empty(date)),
            }
        } else {
            GridCell::padding()
        };
    }

    tracing::debug!(
        year = window.year,
        weeks = weeks.len(),
        records = days.len(),
        "Heatmap grid laid out"
    );

    Ok(weeks)
}

/// Colours every populated cell against `max`; padding stays colourless.
pub fn apply_colors(weeks: &mut [Week], max: f64, theme: Theme) {
    for cell in weeks.iter_mut().flatten() {
        if !cell.is_padding() {
            cell.color = Some(color_for(cell.count, max, theme));
        }
    }
}

/// Tooltip text for every populated cell.
pub fn apply_labels(weeks: &mut [Week], scope: &HeatmapScope, date_format: DateFormat) {
    for cell in weeks.iter_mut().flatten() {
        let count = cell.count;
        cell.label = cell.date.map(|date| {
            let when = format_date(date, date_format);
            format!("{when}: {}", describe_count(count, scope))
        });
    }
}

fn describe_count(count: f64, scope: &HeatmapScope) -> String {
    if count <= 0.0 {
        return "no illness".to_string();
    }
    match scope {
        HeatmapScope::Child { .. } => format!("severity {count}"),
        HeatmapScope::AllChildren { .. } if count == 1.0 => "1 child sick".to_string(),
        HeatmapScope::AllChildren { .. } => format!("{count} children sick"),
    }
}
