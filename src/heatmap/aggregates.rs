use chrono::Datelike;

use super::grid::{apply_colors, apply_labels, layout, render_window};
use super::types::*;
use crate::color::legend;
use crate::config::SEVERITY_MAX;
use crate::error::VizResult;
use crate::models::heatmap::HeatmapDay;

fn populated(weeks: &[Week]) -> impl Iterator<Item = &GridCell> {
    weeks.iter().flatten().filter(|c| !c.is_padding())
}

/// Top of the colour scale for `scope`.
///
/// A single child is always scored against the fixed severity scale. For
/// the whole family the known family size is used, falling back to the
/// largest in-window count when the caller does not know it.
pub fn max_for_color(scope: &HeatmapScope, weeks: &[Week]) -> f64 {
    match scope {
        HeatmapScope::Child { .. } => SEVERITY_MAX,
        HeatmapScope::AllChildren {
            family_size: Some(n),
        } if *n > 0 => *n as f64,
        HeatmapScope::AllChildren { .. } => {
            populated(weeks).map(|c| c.count).fold(0.0, f64::max)
        }
    }
}

/// First week column of each month present in the window.
pub fn month_labels(weeks: &[Week]) -> Vec<MonthLabel> {
    let mut labels: Vec<MonthLabel> = Vec::with_capacity(12);
    for (week_index, week) in weeks.iter().enumerate() {
        for date in week.iter().filter_map(|c| c.date) {
            if labels.iter().all(|l| l.month != date.month()) {
                labels.push(MonthLabel {
                    month: date.month(),
                    week_index,
                });
            }
        }
    }
    labels
}

/// Counts over the in-window cells; the earliest day wins a tied peak.
pub fn summarize(weeks: &[Week]) -> HeatmapSummary {
    let mut summary = HeatmapSummary {
        days_in_window: 0,
        active_days: 0,
        total: 0.0,
        peak: None,
    };

    for cell in populated(weeks) {
        summary.days_in_window += 1;
        if cell.count <= 0.0 {
            continue;
        }
        summary.active_days += 1;
        summary.total += cell.count;

        let beats_peak = summary.peak.map_or(true, |p| cell.count > p.count);
        if let (true, Some(date)) = (beats_peak, cell.date) {
            summary.peak = Some(PeakDay {
                date,
                count: cell.count,
            });
        }
    }

    summary
}

/// Top-level assembly: grid, colours, labels, legend and summary in a
/// single call.
pub fn build_heatmap(request: &HeatmapRequest, days: &[HeatmapDay]) -> VizResult<HeatmapData> {
    let window = render_window(request.year, request.today)?;
    let mut weeks = layout(&window, days)?;

    let max = max_for_color(&request.scope, &weeks);
    apply_colors(&mut weeks, max, request.prefs.theme);
    apply_labels(&mut weeks, &request.scope, request.prefs.date_format);

    let data = HeatmapData {
        window,
        month_labels: month_labels(&weeks),
        summary: summarize(&weeks),
        legend: legend(max, request.prefs.theme),
        max_for_color: max,
        weeks,
    };

    tracing::debug!(
        year = request.year,
        max_for_color = data.max_for_color,
        active_days = data.summary.active_days,
        "Heatmap assembled"
    );

    Ok(data)
}
