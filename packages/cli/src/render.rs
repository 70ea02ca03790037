//! Plain-text rendering of dashboard data for the terminal.

use std::fmt::Write as _;

use ecuador_geo_geography::{catalog, index::ProvinceCantonIndex, overlays, projection};
use ecuador_geo_geography_models::{
    FlatRow, HierarchyNode, PointOfInterest, Region, RiskIndex, ViewOutcome,
};
use ecuador_geo_source_models::SourceStatus;

/// Width of a full bar in [`risk_bars`].
const BAR_WIDTH: usize = 10;

/// Number of provinces in the risk ranking chart.
pub const TOP_RISK: usize = 10;

fn format_area(area: Option<f64>) -> String {
    area.map_or_else(|| "-".to_string(), |a| format!("{a:.2}"))
}

/// Headline figures: level, region, and how many parishes are visible.
#[must_use]
pub fn kpis(outcome: &ViewOutcome) -> String {
    let (selection, visible) = match outcome {
        ViewOutcome::Ready(view) => (&view.selection, view.visible_count),
        ViewOutcome::Empty { selection } => (selection, 0),
    };

    let mut out = String::new();
    let _ = writeln!(out, "Level:    {}", selection.level.label());
    let _ = writeln!(out, "Region:   {}", selection.region);
    if let Some(province) = selection.province() {
        let _ = writeln!(out, "Province: {province}");
        if let Some(risk) = overlays::risk_for(province) {
            let _ = writeln!(out, "Risk:     {}/10", risk.risk_index);
        }
    }
    if let Some(canton) = selection.effective_canton() {
        let _ = writeln!(out, "Canton:   {canton}");
    }
    let _ = writeln!(out, "Visible:  {visible}");

    if let ViewOutcome::Ready(view) = outcome {
        let _ = writeln!(
            out,
            "Area:     {:.2} km²",
            projection::total_area(&view.projection.rows)
        );
    }

    out
}

/// The flat attribute table.
#[must_use]
pub fn rows_table(rows: &[FlatRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<32} {:<32} {:<36} {:>12}",
        "Province", "Canton", "Parish", "Area (km²)"
    );
    let _ = writeln!(out, "{}", "-".repeat(115));

    for row in rows {
        let _ = writeln!(
            out,
            "{:<32} {:<32} {:<36} {:>12}",
            row.province,
            row.canton,
            row.parish,
            format_area(row.area_km2)
        );
    }

    out
}

/// The drill-down tree, indented by level, with each node's share of its
/// parent's area.
#[must_use]
pub fn hierarchy_tree(nodes: &[HierarchyNode]) -> String {
    fn walk(out: &mut String, nodes: &[HierarchyNode], parent_weight: f64, depth: usize) {
        for node in nodes {
            let share = if parent_weight > 0.0 {
                node.weight / parent_weight * 100.0
            } else {
                0.0
            };
            let _ = writeln!(
                out,
                "{}{} ({:.2} km², {:.1}%, {} parishes)",
                "  ".repeat(depth),
                node.name,
                node.weight,
                share,
                node.feature_count
            );
            walk(out, &node.children, node.weight, depth + 1);
        }
    }

    let total = projection::leaf_weight(nodes);
    let mut out = String::new();
    walk(&mut out, nodes, total, 0);
    out
}

/// Regions and their provinces in name order.
#[must_use]
pub fn regions(regions: &[Region]) -> String {
    let mut out = String::new();
    for region in regions {
        let _ = writeln!(out, "{}", region.name);
        for province in catalog::sorted_provinces(region) {
            let _ = writeln!(out, "  {province}");
        }
    }
    out
}

/// Provinces with their cantons. With a region, lists that region's
/// provinces only, noting those the layer has no cantons for.
#[must_use]
pub fn province_index(index: &ProvinceCantonIndex, region: Option<&Region>) -> String {
    let provinces: Vec<&str> = match region {
        Some(region) => catalog::sorted_provinces(region),
        None => index.keys().map(String::as_str).collect(),
    };

    let mut out = String::new();
    for province in provinces {
        let cantons = ecuador_geo_geography::index::cantons_of(index, province);
        if cantons.is_empty() {
            let _ = writeln!(out, "{province} (no cantons)");
        } else {
            let _ = writeln!(out, "{province} ({})", cantons.len());
            for canton in cantons {
                let _ = writeln!(out, "  {canton}");
            }
        }
    }
    out
}

/// The points-of-interest overlay.
#[must_use]
pub fn points(points: &[PointOfInterest]) -> String {
    let mut out = String::new();
    for point in points {
        let _ = writeln!(
            out,
            "{} [{}] ({:.4}, {:.4}) importance: {}",
            point.name, point.kind, point.lat, point.lon, point.importance
        );
        let _ = writeln!(out, "  {}", point.description);
    }
    out
}

/// The risk table with factors joined by `"; "`.
#[must_use]
pub fn risk_table(entries: &[&RiskIndex]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<32} {:>5}  Factors", "Province", "Risk");
    let _ = writeln!(out, "{}", "-".repeat(80));
    for entry in entries {
        let _ = writeln!(
            out,
            "{:<32} {:>5}  {}",
            entry.province,
            entry.risk_index,
            overlays::factors_label(entry)
        );
    }
    out
}

/// A horizontal bar chart of risk indices.
#[must_use]
pub fn risk_bars(entries: &[&RiskIndex]) -> String {
    let mut out = String::new();
    for entry in entries {
        let filled = usize::from(entry.risk_index).min(BAR_WIDTH);
        let _ = writeln!(
            out,
            "{:<32} {}{} {}",
            entry.province,
            "#".repeat(filled),
            " ".repeat(BAR_WIDTH - filled),
            entry.risk_index
        );
    }
    out
}

/// The full risk table followed by the top-ranked provinces as bars.
#[must_use]
pub fn risk_overview() -> String {
    let all: Vec<&RiskIndex> = overlays::risk_indices().iter().collect();

    let mut out = risk_table(&all);
    let _ = writeln!(out);
    let _ = writeln!(out, "Top {TOP_RISK} by risk index");
    out.push_str(&risk_bars(&overlays::risk_ranking(TOP_RISK)));
    out
}

/// Layer name, attribution, and cache state.
#[must_use]
pub fn source_status(status: &SourceStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Layer:    {} ({})", status.layer_name, status.layer_id);
    if !status.attribution.is_empty() {
        let _ = writeln!(out, "Source:   {}", status.attribution);
    }
    if let (Some(at), Some(count)) = (status.fetched_at, status.feature_count) {
        let _ = writeln!(out, "Fetched:  {count} features at {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    out
}
