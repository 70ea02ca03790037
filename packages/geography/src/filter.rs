//! Region/province/canton filter over the parish table.

use ecuador_geo_geography_models::{AdministrativeFeature, FilterSelection};

use crate::{GeoError, catalog};

/// Returns `true` if `feature` satisfies every active constraint of
/// `selection`.
///
/// The region gate always applies, so provinces missing from the catalog
/// never appear in any region view. Parish names are never filtered; the
/// level only controls whether a canton constraint is honoured.
#[must_use]
pub fn matches(feature: &AdministrativeFeature, selection: &FilterSelection) -> bool {
    let Some(region) = catalog::region(&selection.region) else {
        return false;
    };

    if !region.contains(&feature.province) {
        return false;
    }

    if let Some(province) = selection.province()
        && feature.province != province
    {
        return false;
    }

    if let Some(canton) = selection.effective_canton()
        && feature.canton != canton
    {
        return false;
    }

    true
}

/// Selects the features matching `selection`, preserving source order.
///
/// An empty result is a valid outcome.
#[must_use]
pub fn select<'a>(
    features: &'a [AdministrativeFeature],
    selection: &FilterSelection,
) -> Vec<&'a AdministrativeFeature> {
    let selected: Vec<&AdministrativeFeature> = features
        .iter()
        .filter(|f| matches(f, selection))
        .collect();

    log::debug!(
        "select: level={} region={} province={:?} canton={:?} -> {}/{}",
        selection.level,
        selection.region,
        selection.province(),
        selection.effective_canton(),
        selected.len(),
        features.len(),
    );

    selected
}

/// Checks that `selection` names a catalogued region and, if a province is
/// selected, that it belongs to that region.
///
/// # Errors
///
/// Returns [`GeoError::UnknownRegion`] or [`GeoError::UnknownProvince`].
pub fn validate(selection: &FilterSelection) -> Result<(), GeoError> {
    let region = catalog::region(&selection.region).ok_or_else(|| GeoError::UnknownRegion {
        region: selection.region.clone(),
    })?;

    if let Some(province) = selection.province()
        && !region.contains(province)
    {
        return Err(GeoError::UnknownProvince {
            province: province.to_string(),
            region: selection.region.clone(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use ecuador_geo_geography_models::Level;

    use super::*;

    fn feature(index: usize, province: &str, canton: &str, parish: &str) -> AdministrativeFeature {
        AdministrativeFeature {
            index,
            province: province.to_string(),
            canton: canton.to_string(),
            parish: parish.to_string(),
            area_km2: Some(10.0),
        }
    }

    fn sample() -> Vec<AdministrativeFeature> {
        vec![
            feature(0, "Guayas", "Guayaquil", "Tarqui"),
            feature(1, "Pichincha", "Quito", "Cumbayá"),
            feature(2, "Azuay", "Cuenca", "Baños"),
            feature(3, "Manabí", "Manta", "Manta"),
            feature(4, "Azuay", "Gualaceo", "Gualaceo"),
            feature(5, "Azuay", "Cuenca", "Ricaurte"),
            feature(6, "Zona No Delimitada", "El Piedrero", "El Piedrero"),
            feature(7, "El Oro", "Machala", "Machala"),
        ]
    }

    fn indices(selected: &[&AdministrativeFeature]) -> Vec<usize> {
        selected.iter().map(|f| f.index).collect()
    }

    #[test]
    fn costa_region_excludes_sierra_provinces() {
        let features = sample();
        let selection = FilterSelection::new(Level::Province, "Costa");
        let selected = select(&features, &selection);
        assert_eq!(indices(&selected), vec![0, 3, 7]);
        assert!(selected.iter().all(|f| f.province != "Pichincha"));
    }

    #[test]
    fn province_and_canton_at_canton_level() {
        let features = sample();
        let selection = FilterSelection::new(Level::Canton, "Sierra")
            .with_province(Some("Azuay"))
            .with_canton(Some("Cuenca"));
        let selected = select(&features, &selection);
        assert_eq!(indices(&selected), vec![2, 5]);
        assert!(
            selected
                .iter()
                .all(|f| f.province == "Azuay" && f.canton == "Cuenca")
        );
    }

    #[test]
    fn parish_level_does_not_filter_parish_names() {
        let features = sample();
        let selection = FilterSelection::new(Level::Parish, "Sierra")
            .with_province(Some("Azuay"))
            .with_canton(Some("Cuenca"));
        assert_eq!(indices(&select(&features, &selection)), vec![2, 5]);
    }

    #[test]
    fn canton_ignored_at_province_level() {
        let features = sample();
        let selection = FilterSelection::new(Level::Province, "Sierra")
            .with_province(Some("Azuay"))
            .with_canton(Some("Cuenca"));
        assert_eq!(indices(&select(&features, &selection)), vec![2, 4, 5]);
    }

    #[test]
    fn all_provinces_ignores_stored_canton() {
        let features = sample();
        let with_canton =
            FilterSelection::new(Level::Parish, "Sierra").with_canton(Some("Gualaceo"));
        let without = FilterSelection::new(Level::Parish, "Sierra");
        assert_eq!(
            select(&features, &with_canton),
            select(&features, &without)
        );
        assert_eq!(indices(&select(&features, &without)), vec![1, 2, 4, 5]);
    }

    #[test]
    fn province_outside_dataset_yields_empty() {
        let features = sample();
        let selection = FilterSelection::new(Level::Province, "Amazonía")
            .with_province(Some("Pastaza"));
        assert!(select(&features, &selection).is_empty());
    }

    #[test]
    fn uncatalogued_province_never_selected() {
        let features = sample();
        for region in crate::catalog::regions() {
            let selection = FilterSelection::new(Level::Parish, region.name);
            assert!(
                select(&features, &selection)
                    .iter()
                    .all(|f| f.province != "Zona No Delimitada")
            );
        }
    }

    #[test]
    fn unknown_region_selects_nothing() {
        let features = sample();
        let selection = FilterSelection::new(Level::Province, "Andes");
        assert!(select(&features, &selection).is_empty());
    }

    #[test]
    fn output_is_ordered_subsequence() {
        let features = sample();
        for region in crate::catalog::regions() {
            for level in Level::ALL {
                let selection = FilterSelection::new(*level, region.name);
                let selected = indices(&select(&features, &selection));
                assert!(selected.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn selection_is_idempotent() {
        let features = sample();
        let selection = FilterSelection::new(Level::Canton, "Sierra").with_province(Some("Azuay"));
        assert_eq!(select(&features, &selection), select(&features, &selection));
    }

    #[test]
    fn validate_rejects_unknown_region() {
        let selection = FilterSelection::new(Level::Province, "Andes");
        assert!(matches!(
            validate(&selection),
            Err(GeoError::UnknownRegion { .. })
        ));
    }

    #[test]
    fn validate_rejects_province_outside_region() {
        let selection =
            FilterSelection::new(Level::Province, "Costa").with_province(Some("Azuay"));
        assert!(matches!(
            validate(&selection),
            Err(GeoError::UnknownProvince { .. })
        ));
    }

    #[test]
    fn validate_accepts_catalogued_selection() {
        let selection = FilterSelection::new(Level::Canton, "Sierra")
            .with_province(Some("Azuay"))
            .with_canton(Some("Cuenca"));
        assert!(validate(&selection).is_ok());
    }
}
