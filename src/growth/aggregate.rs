use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::axis::compute_axis_domains;
use super::types::*;
use crate::models::enums::{Metric, SeriesMode};
use crate::models::growth::GrowthPoint;

/// Filters to one child (when asked), drops repeated visits and sorts by age.
///
/// The first point seen for a `visit_id` wins. Ties on age are broken by
/// visit date and then visit id, so the result does not depend on input
/// order once visit ids are unique.
pub fn prepare_points(points: &[GrowthPoint], child_filter: Option<&str>) -> Vec<GrowthPoint> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(points.len());
    let mut kept: Vec<GrowthPoint> = Vec::with_capacity(points.len());
    for p in points {
        if child_filter.is_some_and(|id| p.child_id != id) {
            continue;
        }
        if seen.insert(p.visit_id.as_str()) {
            kept.push(p.clone());
        } else {
            tracing::debug!(visit_id = %p.visit_id, "Duplicate visit dropped");
        }
    }

    kept.sort_by(|a, b| {
        (a.age_months, a.visit_date, &a.visit_id).cmp(&(b.age_months, b.visit_date, &b.visit_id))
    });
    kept
}

/// One line per visible metric, x = age, y = value or percentile.
///
/// Points carrying no measurement at all are dropped; points missing only
/// the plotted metric stay in as gaps.
pub fn build_single_series(
    points: &[GrowthPoint],
    metrics: &[Metric],
    mode: SeriesMode,
) -> Vec<SeriesLine> {
    let plotted: Vec<&GrowthPoint> = points.iter().filter(|p| p.has_any_reading()).collect();

    metrics
        .iter()
        .map(|&metric| SeriesLine {
            metric,
            connect_nulls: false,
            points: plotted
                .iter()
                .map(|p| PlotPoint {
                    age_months: p.age_months,
                    visit_id: p.visit_id.clone(),
                    y: p.value(metric, mode),
                })
                .collect(),
        })
        .collect()
}

/// Keeps one point per `(child, age)`: the latest visit, larger visit id on
/// an equal date.
pub fn resolve_age_collisions(points: &[GrowthPoint]) -> Vec<GrowthPoint> {
    let mut latest: BTreeMap<(&str, u32), &GrowthPoint> = BTreeMap::new();
    for p in points {
        latest
            .entry((p.child_id.as_str(), p.age_months))
            .and_modify(|current| {
                if (p.visit_date, &p.visit_id) > (current.visit_date, &current.visit_id) {
                    *current = p;
                }
            })
            .or_insert(p);
    }

    let mut resolved: Vec<GrowthPoint> = latest.into_values().cloned().collect();
    resolved.sort_by(|a, b| {
        (a.age_months, a.visit_date, &a.visit_id).cmp(&(b.age_months, b.visit_date, &b.visit_id))
    });
    resolved
}

fn collect_children(points: &[GrowthPoint]) -> Vec<ChildSeries> {
    let mut by_id: BTreeMap<&str, &str> = BTreeMap::new();
    for p in points {
        let name = by_id.entry(p.child_id.as_str()).or_insert("");
        if name.is_empty() {
            *name = p.child_name.as_str();
        }
    }

    let mut children: Vec<ChildSeries> = by_id
        .into_iter()
        .map(|(id, name)| ChildSeries {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect();
    children.sort_by(|a, b| (&a.name, &a.id).cmp(&(&b.name, &b.id)));
    children
}

/// Age-indexed wide table, one column per visible metric per child.
///
/// Rows are ascending by age; a cell with no measurement is null, and rows
/// where every cell is null are left out.
pub fn build_multi_child_table(
    points: &[GrowthPoint],
    metrics: &[Metric],
    mode: SeriesMode,
    visible_children: Option<&BTreeSet<String>>,
) -> MultiChildTable {
    let candidates: Vec<GrowthPoint> = points
        .iter()
        .filter(|p| visible_children.map_or(true, |set| set.contains(&p.child_id)))
        .filter(|p| p.has_any_reading())
        .cloned()
        .collect();
    let resolved = resolve_age_collisions(&candidates);

    let children = collect_children(&resolved);
    let columns: Vec<ColumnKey> = metrics
        .iter()
        .flat_map(|&metric| {
            children
                .iter()
                .map(move |child| ColumnKey::new(metric, child.id.clone()))
        })
        .collect();

    let mut rows: BTreeMap<u32, AgeRow> = BTreeMap::new();
    for p in &resolved {
        let row = rows.entry(p.age_months).or_insert_with(|| AgeRow {
            age_months: p.age_months,
            cells: columns.iter().map(|k| (k.clone(), None)).collect(),
        });
        for &metric in metrics {
            if let Some(v) = p.value(metric, mode) {
                row.cells.insert(ColumnKey::new(metric, p.child_id.clone()), Some(v));
            }
        }
    }

    MultiChildTable {
        children,
        columns,
        rows: rows.into_values().filter(|r| !r.is_blank()).collect(),
        connect_nulls: true,
    }
}

/// Top-level assembly: prepared points, the chart shape for the request and
/// both axis domains.
///
/// A request with a child filter gets the single-child lines; without one
/// it gets the family table.
pub fn build_series(points: &[GrowthPoint], request: &SeriesRequest) -> SeriesOutput {
    let metrics = request.visible_metrics();
    let prepared = prepare_points(points, request.child_filter.as_deref());

    let layout = match request.child_filter {
        Some(_) => SeriesLayout::Single {
            lines: build_single_series(&prepared, &metrics, request.mode),
        },
        None => SeriesLayout::Multi(build_multi_child_table(
            &prepared,
            &metrics,
            request.mode,
            request.visible_children.as_ref(),
        )),
    };
    let domains = compute_axis_domains(&layout, request.mode);

    tracing::debug!(
        input = points.len(),
        prepared = prepared.len(),
        mode = %request.mode,
        "Growth series built"
    );

    SeriesOutput {
        points: prepared,
        layout,
        domains,
    }
}
