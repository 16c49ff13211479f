//! Calendar heatmap: illness density per day, laid out as a year of weeks.
//!
//! Sparse `HeatmapDay` aggregates are projected onto a fixed 7×N grid where
//! row 0 is always Sunday. Grid position comes from the calendar alone, so
//! a ragged year start or end never shifts rows; days outside the
//! rendering window are explicit padding cells.

mod aggregates;
mod grid;
mod types;

pub use aggregates::*;
pub use grid::{apply_colors, apply_labels, build_grid, render_window};
pub use types::*;

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{color_for, Palette};
    use crate::config::DisplayPrefs;
    use crate::error::VizError;
    use crate::models::enums::{DateFormat, Theme};
    use crate::models::heatmap::HeatmapDay;
    use chrono::{Datelike, NaiveDate, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day(y: i32, m: u32, d: u32, count: f64, kids: &[&str]) -> HeatmapDay {
        HeatmapDay::new(
            date(y, m, d),
            count,
            kids.iter().map(|k| k.to_string()).collect(),
        )
    }

    fn cells(weeks: &[Week]) -> impl Iterator<Item = &GridCell> {
        weeks.iter().flatten()
    }

    fn find(weeks: &[Week], d: NaiveDate) -> &GridCell {
        cells(weeks).find(|c| c.date == Some(d)).unwrap()
    }

    fn family_request(year: i32, today: NaiveDate, family_size: Option<u32>) -> HeatmapRequest {
        HeatmapRequest {
            year,
            today,
            scope: HeatmapScope::AllChildren { family_size },
            prefs: DisplayPrefs::default(),
        }
    }

    // ── Window ─────────────────────────────────────────────────────────

    #[test]
    fn test_window_past_year_is_full() {
        let w = render_window(2023, date(2024, 6, 1)).unwrap();
        assert_eq!(w.start, date(2023, 1, 1));
        assert_eq!(w.end, Some(date(2023, 12, 31)));
    }

    #[test]
    fn test_window_current_year_stops_today() {
        let w = render_window(2024, date(2024, 3, 15)).unwrap();
        assert_eq!(w.end, Some(date(2024, 3, 15)));
        assert!(w.contains(date(2024, 3, 15)));
        assert!(!w.contains(date(2024, 3, 16)));
    }

    #[test]
    fn test_window_future_year_is_empty() {
        let w = render_window(2027, date(2026, 10, 19)).unwrap();
        assert_eq!(w.end, None);
        assert_eq!(w.span_end, date(2027, 12, 31));
        assert!(!w.contains(date(2027, 1, 1)));
    }

    #[test]
    fn test_window_rejects_unrepresentable_year() {
        assert!(matches!(
            render_window(300_000, date(2024, 1, 1)),
            Err(VizError::InvalidYear(300_000))
        ));
    }

    // ── Layout ─────────────────────────────────────────────────────────

    #[test]
    fn test_empty_past_year_covers_every_day() {
        let weeks = build_grid(2023, &[], date(2024, 1, 1));
        // 2023-01-01 is a Sunday, 2023-12-31 a Sunday: 365 + 6 trailing days.
        assert_eq!(weeks.len(), 53);

        let populated: Vec<&GridCell> = cells(&weeks).filter(|c| !c.is_padding()).collect();
        assert_eq!(populated.len(), 365);
        assert!(populated.iter().all(|c| c.count == 0.0 && c.contributors.is_empty()));
        assert!(populated.iter().all(|c| c.date.unwrap().year() == 2023));
        assert_eq!(weeks[0][0].date, Some(date(2023, 1, 1)));
    }

    #[test]
    fn test_leading_days_of_previous_year_are_padding() {
        let weeks = build_grid(2024, &[day(2023, 12, 31, 4.0, &["c1"])], date(2025, 1, 1));
        // 2024-01-01 is a Monday; Sunday slot of week 0 belongs to 2023.
        assert!(weeks[0][0].is_padding());
        assert_eq!(weeks[0][1].date, Some(date(2024, 1, 1)));
        assert!(cells(&weeks).all(|c| c.date != Some(date(2023, 12, 31))));
    }

    #[test]
    fn test_current_year_has_trailing_padding() {
        let weeks = build_grid(2024, &[], date(2024, 3, 15));
        assert_eq!(weeks.len(), 11);
        let last = weeks.last().unwrap();
        assert_eq!(last[5].date, Some(date(2024, 3, 15)));
        assert!(last[6].is_padding());
    }

    #[test]
    fn test_rows_are_fixed_weekdays() {
        let weeks = build_grid(2024, &[], date(2025, 1, 1));
        for week in &weeks {
            for (i, cell) in week.iter().enumerate() {
                if let Some(d) = cell.date {
                    assert_eq!(d.weekday().num_days_from_sunday() as usize, i);
                }
            }
            if let Some(d) = week[0].date {
                assert_eq!(d.weekday(), Weekday::Sun);
            }
            if let Some(d) = week[6].date {
                assert_eq!(d.weekday(), Weekday::Sat);
            }
        }
    }

    #[test]
    fn test_future_year_is_all_padding() {
        let weeks = build_grid(2027, &[day(2027, 2, 1, 3.0, &["c1"])], date(2026, 10, 19));
        assert_eq!(weeks.len(), 53);
        assert!(cells(&weeks).all(GridCell::is_padding));
    }

    #[test]
    fn test_records_land_on_their_date() {
        let weeks = build_grid(
            2024,
            &[day(2024, 3, 1, 2.0, &["c1", "c2"])],
            date(2024, 12, 31),
        );
        let cell = find(&weeks, date(2024, 3, 1));
        assert_eq!(cell.count, 2.0);
        assert_eq!(cell.contributors, vec!["c1", "c2"]);
        assert_eq!(find(&weeks, date(2024, 3, 2)).count, 0.0);
    }

    #[test]
    fn test_records_after_today_are_padding() {
        let weeks = build_grid(2024, &[day(2024, 3, 16, 2.0, &["c1"])], date(2024, 3, 15));
        assert!(cells(&weeks).all(|c| c.count == 0.0));
    }

    #[test]
    fn test_invalid_year_yields_empty_grid() {
        assert!(build_grid(300_000, &[], date(2024, 1, 1)).is_empty());
    }

    // ── Colours ────────────────────────────────────────────────────────

    #[test]
    fn test_max_for_child_is_severity_scale() {
        let weeks = build_grid(2024, &[day(2024, 1, 2, 3.0, &["c1"])], date(2025, 1, 1));
        let scope = HeatmapScope::Child {
            child_id: "c1".into(),
        };
        assert_eq!(max_for_color(&scope, &weeks), 10.0);
    }

    #[test]
    fn test_max_for_family_prefers_family_size() {
        let weeks = build_grid(2024, &[day(2024, 1, 2, 2.0, &["a", "b"])], date(2025, 1, 1));
        let known = HeatmapScope::AllChildren {
            family_size: Some(4),
        };
        let unknown = HeatmapScope::AllChildren { family_size: None };
        let zero = HeatmapScope::AllChildren {
            family_size: Some(0),
        };
        assert_eq!(max_for_color(&known, &weeks), 4.0);
        assert_eq!(max_for_color(&unknown, &weeks), 2.0);
        assert_eq!(max_for_color(&zero, &weeks), 2.0);
    }

    #[test]
    fn test_apply_colors_skips_padding() {
        let mut weeks = build_grid(2024, &[day(2024, 1, 2, 3.0, &["c1"])], date(2025, 1, 1));
        apply_colors(&mut weeks, 3.0, Theme::Dark);
        assert_eq!(weeks[0][0].color, None);
        assert_eq!(find(&weeks, date(2024, 1, 2)).color, Some(Palette::DARK.bright));
        assert_eq!(find(&weeks, date(2024, 1, 3)).color, Some(Palette::DARK.empty));
    }

    // ── Labels & summary ───────────────────────────────────────────────

    #[test]
    fn test_month_labels_mark_first_week() {
        let weeks = build_grid(2024, &[], date(2025, 1, 1));
        let labels = month_labels(&weeks);
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], MonthLabel { month: 1, week_index: 0 });
        // 2024-02-01 is 32 days after Sunday 2023-12-31.
        assert_eq!(labels[1], MonthLabel { month: 2, week_index: 4 });
    }

    #[test]
    fn test_month_labels_stop_at_window_end() {
        let weeks = build_grid(2024, &[], date(2024, 3, 15));
        assert_eq!(month_labels(&weeks).len(), 3);
    }

    #[test]
    fn test_summary_peak_prefers_earliest() {
        let weeks = build_grid(
            2024,
            &[
                day(2024, 3, 1, 2.0, &["a", "b"]),
                day(2024, 3, 5, 3.0, &["a", "b", "c"]),
                day(2024, 3, 2, 3.0, &["a", "b", "c"]),
            ],
            date(2024, 12, 31),
        );
        let summary = summarize(&weeks);
        assert_eq!(summary.days_in_window, 366);
        assert_eq!(summary.active_days, 3);
        assert_eq!(summary.total, 8.0);
        assert_eq!(summary.peak.unwrap().date, date(2024, 3, 2));
    }

    #[test]
    fn test_summary_of_empty_grid_has_no_peak() {
        let summary = summarize(&build_grid(2023, &[], date(2024, 1, 1)));
        assert_eq!(summary.active_days, 0);
        assert!(summary.peak.is_none());
    }

    #[test]
    fn test_labels_follow_scope_and_format() {
        let mut weeks = build_grid(
            2024,
            &[day(2024, 3, 1, 1.0, &["a"]), day(2024, 3, 4, 3.0, &["a", "b", "c"])],
            date(2024, 12, 31),
        );
        let family = HeatmapScope::AllChildren { family_size: None };
        apply_labels(&mut weeks, &family, DateFormat::Us);
        assert_eq!(
            find(&weeks, date(2024, 3, 1)).label.as_deref(),
            Some("03/01/2024: 1 child sick")
        );
        assert_eq!(
            find(&weeks, date(2024, 3, 4)).label.as_deref(),
            Some("03/04/2024: 3 children sick")
        );
        assert_eq!(
            find(&weeks, date(2024, 3, 2)).label.as_deref(),
            Some("03/02/2024: no illness")
        );
        assert_eq!(weeks[0][0].label, None);

        let child = HeatmapScope::Child {
            child_id: "a".into(),
        };
        apply_labels(&mut weeks, &child, DateFormat::Iso);
        assert_eq!(
            find(&weeks, date(2024, 3, 4)).label.as_deref(),
            Some("2024-03-04: severity 3")
        );
    }

    // ── Assembly ───────────────────────────────────────────────────────

    #[test]
    fn test_build_heatmap_family_view() {
        let request = family_request(2024, date(2024, 6, 30), Some(3));
        let data = build_heatmap(&request, &[day(2024, 5, 1, 3.0, &["a", "b", "c"])]).unwrap();

        assert_eq!(data.max_for_color, 3.0);
        assert_eq!(data.legend.len(), 5);
        assert_eq!(data.legend[4].color, Palette::LIGHT.bright);
        assert_eq!(data.month_labels.len(), 6);
        assert_eq!(data.summary.active_days, 1);
        let cell = find(&data.weeks, date(2024, 5, 1));
        assert_eq!(cell.color, Some(color_for(3.0, 3.0, Theme::Light)));
        assert!(cell.label.is_some());
    }

    #[test]
    fn test_build_heatmap_rejects_bad_year() {
        let request = family_request(300_000, date(2024, 1, 1), None);
        assert!(build_heatmap(&request, &[]).is_err());
    }

    #[test]
    fn test_heatmap_data_serializes_padding_as_null_date() {
        let request = family_request(2024, date(2024, 1, 10), None);
        let data = build_heatmap(&request, &[]).unwrap();
        let json = serde_json::to_value(&data).unwrap();
        assert!(json["weeks"][0][0]["date"].is_null());
        assert_eq!(json["weeks"][0][1]["date"], "2024-01-01");
        assert_eq!(json["weeks"][0].as_array().unwrap().len(), 7);
    }
}
