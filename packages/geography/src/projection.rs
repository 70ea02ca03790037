//! Flat and hierarchical projections of a filtered parish set.
//!
//! Both projections are recomputed from scratch for every selection; they
//! never feed back into the filter.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use ecuador_geo_geography_models::{AdministrativeFeature, FlatRow, HierarchyNode, Level, Projection};

/// Projects `filtered` into a sorted attribute table and an area-weighted
/// tree `level.depth()` levels deep.
#[must_use]
pub fn project(filtered: &[&AdministrativeFeature], level: Level) -> Projection {
    Projection {
        rows: flat_rows(filtered),
        hierarchy: group(filtered, 0, level.depth()),
    }
}

/// One row per feature, sorted by (province, canton, parish).
#[must_use]
pub fn flat_rows(filtered: &[&AdministrativeFeature]) -> Vec<FlatRow> {
    let mut rows: Vec<FlatRow> = filtered.iter().map(|f| FlatRow::from(*f)).collect();
    rows.sort_by(compare_rows);
    rows
}

/// Lexicographic (province, canton, parish) ordering.
#[must_use]
pub fn compare_rows(a: &FlatRow, b: &FlatRow) -> Ordering {
    (a.province.as_str(), a.canton.as_str(), a.parish.as_str()).cmp(&(
        b.province.as_str(),
        b.canton.as_str(),
        b.parish.as_str(),
    ))
}

/// Sum of known areas over `rows`. Absent areas count as zero.
#[must_use]
pub fn total_area(rows: &[FlatRow]) -> f64 {
    rows.iter().map(|r| r.area_km2.unwrap_or(0.0)).sum()
}

/// Sum of the weights of every leaf under `nodes`.
#[must_use]
pub fn leaf_weight(nodes: &[HierarchyNode]) -> f64 {
    nodes
        .iter()
        .map(|n| {
            if n.is_leaf() {
                n.weight
            } else {
                leaf_weight(&n.children)
            }
        })
        .sum()
}

fn group<'a>(
    features: &[&'a AdministrativeFeature],
    depth: usize,
    max_depth: usize,
) -> Vec<HierarchyNode> {
    let Some(level) = Level::from_depth(depth) else {
        return Vec::new();
    };

    let mut buckets: BTreeMap<&'a str, Vec<&'a AdministrativeFeature>> = BTreeMap::new();
    for &feature in features {
        buckets
            .entry(feature.name_at(level))
            .or_default()
            .push(feature);
    }

    buckets
        .into_iter()
        .map(|(name, members)| {
            let children = if depth + 1 < max_depth {
                group(&members, depth + 1, max_depth)
            } else {
                Vec::new()
            };

            HierarchyNode {
                name: name.to_string(),
                level,
                weight: members.iter().map(|f| f.area_km2.unwrap_or(0.0)).sum(),
                feature_count: members.len(),
                children,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(
        index: usize,
        province: &str,
        canton: &str,
        parish: &str,
        area: Option<f64>,
    ) -> AdministrativeFeature {
        AdministrativeFeature {
            index,
            province: province.to_string(),
            canton: canton.to_string(),
            parish: parish.to_string(),
            area_km2: area,
        }
    }

    fn sample() -> Vec<AdministrativeFeature> {
        vec![
            feature(0, "Loja", "Loja", "Vilcabamba", Some(157.5)),
            feature(1, "Azuay", "Gualaceo", "Gualaceo", Some(45.0)),
            feature(2, "Azuay", "Cuenca", "Ricaurte", None),
            feature(3, "Azuay", "Cuenca", "Baños", Some(327.25)),
            feature(4, "Loja", "Calvas", "Cariamanga", Some(80.0)),
        ]
    }

    fn depth_of(nodes: &[HierarchyNode]) -> usize {
        nodes.iter().map(|n| 1 + depth_of(&n.children)).max().unwrap_or(0)
    }

    #[test]
    fn rows_sorted_by_province_canton_parish() {
        let features = sample();
        let refs: Vec<&AdministrativeFeature> = features.iter().collect();
        let projection = project(&refs, Level::Parish);
        let keys: Vec<(&str, &str, &str)> = projection
            .rows
            .iter()
            .map(|r| (r.province.as_str(), r.canton.as_str(), r.parish.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Azuay", "Cuenca", "Baños"),
                ("Azuay", "Cuenca", "Ricaurte"),
                ("Azuay", "Gualaceo", "Gualaceo"),
                ("Loja", "Calvas", "Cariamanga"),
                ("Loja", "Loja", "Vilcabamba"),
            ]
        );
        assert!(
            projection
                .rows
                .windows(2)
                .all(|w| compare_rows(&w[0], &w[1]) != Ordering::Greater)
        );
    }

    #[test]
    fn tree_depth_follows_level() {
        let features = sample();
        let refs: Vec<&AdministrativeFeature> = features.iter().collect();
        for level in Level::ALL {
            let projection = project(&refs, *level);
            assert_eq!(depth_of(&projection.hierarchy), level.depth());
        }
    }

    #[test]
    fn leaf_weights_match_flat_area_at_every_level() {
        let features = sample();
        let refs: Vec<&AdministrativeFeature> = features.iter().collect();
        for level in Level::ALL {
            let projection = project(&refs, *level);
            let leaves = leaf_weight(&projection.hierarchy);
            let flat = total_area(&projection.rows);
            assert!((leaves - flat).abs() < 1e-9, "{level}: {leaves} != {flat}");
        }
    }

    #[test]
    fn absent_area_counted_but_weightless() {
        let features = sample();
        let refs: Vec<&AdministrativeFeature> = features.iter().collect();
        let projection = project(&refs, Level::Parish);
        let azuay = &projection.hierarchy[0];
        assert_eq!(azuay.name, "Azuay");
        assert_eq!(azuay.feature_count, 3);
        let cuenca = &azuay.children[0];
        assert_eq!(cuenca.name, "Cuenca");
        assert_eq!(cuenca.feature_count, 2);
        assert!((cuenca.weight - 327.25).abs() < f64::EPSILON);
        let ricaurte = cuenca.children.iter().find(|n| n.name == "Ricaurte").unwrap();
        assert_eq!(ricaurte.feature_count, 1);
        assert!(ricaurte.weight.abs() < f64::EPSILON);
        assert_eq!(ricaurte.level, Level::Parish);
    }

    #[test]
    fn province_level_has_single_layer() {
        let features = sample();
        let refs: Vec<&AdministrativeFeature> = features.iter().collect();
        let projection = project(&refs, Level::Province);
        let names: Vec<&str> = projection.hierarchy.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Azuay", "Loja"]);
        assert!(projection.hierarchy.iter().all(HierarchyNode::is_leaf));
        assert!((projection.hierarchy[1].weight - 237.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_projects_to_empty() {
        let projection = project(&[], Level::Parish);
        assert!(projection.rows.is_empty());
        assert!(projection.hierarchy.is_empty());
    }
}
