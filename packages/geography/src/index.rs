//! Province → canton lookup for dependent selectors.

use std::collections::{BTreeMap, BTreeSet};

use ecuador_geo_geography_models::AdministrativeFeature;

/// Province name → sorted, de-duplicated canton names.
pub type ProvinceCantonIndex = BTreeMap<String, Vec<String>>;

/// Builds the province → cantons index from the parish table.
///
/// Features with an empty province or canton are skipped rather than
/// failing the build.
#[must_use]
pub fn build_index(features: &[AdministrativeFeature]) -> ProvinceCantonIndex {
    let mut mapping: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    let mut skipped = 0usize;

    for feature in features {
        if feature.province.is_empty() || feature.canton.is_empty() {
            skipped += 1;
            continue;
        }
        mapping
            .entry(&feature.province)
            .or_default()
            .insert(&feature.canton);
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} features without province or canton while indexing");
    }

    mapping
        .into_iter()
        .map(|(province, cantons)| {
            (
                province.to_string(),
                cantons.into_iter().map(str::to_string).collect(),
            )
        })
        .collect()
}

/// Cantons of `province`, or an empty slice if it has none.
#[must_use]
pub fn cantons_of<'a>(index: &'a ProvinceCantonIndex, province: &str) -> &'a [String] {
    index
        .get(province)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(province: &str, canton: &str) -> AdministrativeFeature {
        AdministrativeFeature {
            index: 0,
            province: province.to_string(),
            canton: canton.to_string(),
            parish: "X".to_string(),
            area_km2: None,
        }
    }

    #[test]
    fn groups_and_sorts_cantons() {
        let features = vec![
            feature("Azuay", "Gualaceo"),
            feature("Azuay", "Cuenca"),
            feature("Azuay", "Cuenca"),
            feature("Loja", "Loja"),
        ];
        let index = build_index(&features);
        assert_eq!(index.len(), 2);
        assert_eq!(index["Azuay"], vec!["Cuenca", "Gualaceo"]);
        assert_eq!(index["Loja"], vec!["Loja"]);
    }

    #[test]
    fn skips_incomplete_features() {
        let features = vec![
            feature("", "Cuenca"),
            feature("Azuay", ""),
            feature("Azuay", "Paute"),
        ];
        let index = build_index(&features);
        assert_eq!(index.len(), 1);
        assert_eq!(index["Azuay"], vec!["Paute"]);
    }

    #[test]
    fn independent_of_input_order() {
        let a = vec![feature("Azuay", "Paute"), feature("Azuay", "Cuenca")];
        let b = vec![feature("Azuay", "Cuenca"), feature("Azuay", "Paute")];
        assert_eq!(build_index(&a), build_index(&b));
    }

    #[test]
    fn cantons_of_missing_province_is_empty() {
        let index = build_index(&[feature("Azuay", "Cuenca")]);
        assert!(cantons_of(&index, "Loja").is_empty());
        assert_eq!(cantons_of(&index, "Azuay"), ["Cuenca".to_string()]);
    }
}
