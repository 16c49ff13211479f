use super::types::*;
use crate::config::{AXIS_PADDING_RATIO, EMPTY_DOMAIN, PERCENTILE_DOMAIN};
use crate::models::enums::{Axis, SeriesMode};

/// Min/max of `values` widened by 10% on each side.
///
/// A flat series pads by 10% of its value instead of its (zero) range, so
/// an all-zero series ends up with the zero-width domain `[0, 0]`. With no
/// values at all the empty-axis default is used. `floor_at_zero` clamps
/// the lower bound for quantities that cannot go negative on screen.
pub fn padded_domain(values: impl IntoIterator<Item = f64>, floor_at_zero: bool) -> AxisDomain {
    let mut bounds: Option<(f64, f64)> = None;
    for v in values.into_iter().filter(|v| v.is_finite()) {
        bounds = Some(match bounds {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        });
    }

    let Some((min, max)) = bounds else {
        return AxisDomain::from(EMPTY_DOMAIN);
    };

    let pad = if max > min {
        (max - min) * AXIS_PADDING_RATIO
    } else {
        max * AXIS_PADDING_RATIO
    };
    let lower = min - pad;

    AxisDomain {
        min: if floor_at_zero { lower.max(0.0) } else { lower },
        max: max + pad,
    }
}

fn plotted_values(layout: &SeriesLayout, axis: Axis) -> Vec<f64> {
    match layout {
        SeriesLayout::Single { lines } => lines
            .iter()
            .filter(|line| line.metric.axis() == axis)
            .flat_map(|line| line.points.iter().filter_map(|p| p.y))
            .collect(),
        SeriesLayout::Multi(table) => table
            .rows
            .iter()
            .flat_map(|row| {
                row.cells
                    .iter()
                    .filter(|(key, _)| key.metric.axis() == axis)
                    .filter_map(|(_, v)| *v)
            })
            .collect(),
    }
}

/// Domains for the left (weight, height) and right (head circumference,
/// BMI) axes, scanned independently from whatever is plotted.
///
/// Percentile mode is fixed at `[0, 100]` on both sides.
pub fn compute_axis_domains(layout: &SeriesLayout, mode: SeriesMode) -> AxisDomains {
    match mode {
        SeriesMode::Percentile => AxisDomains {
            left: AxisDomain::from(PERCENTILE_DOMAIN),
            right: AxisDomain::from(PERCENTILE_DOMAIN),
        },
        SeriesMode::Value => AxisDomains {
            left: padded_domain(plotted_values(layout, Axis::Left), true),
            right: padded_domain(plotted_values(layout, Axis::Right), false),
        },
    }
}
