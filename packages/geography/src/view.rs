//! One filter → project pass for a render cycle.

use ecuador_geo_geography_models::{
    AdministrativeFeature, DashboardView, FilterSelection, ViewOutcome,
};

use crate::{filter, projection};

/// Filters `features` by `selection` and projects the result.
///
/// Returns [`ViewOutcome::Empty`] when nothing matches.
#[must_use]
pub fn build_view(features: &[AdministrativeFeature], selection: &FilterSelection) -> ViewOutcome {
    let selected = filter::select(features, selection);

    if selected.is_empty() {
        log::info!(
            "No features for region={} province={:?} canton={:?}",
            selection.region,
            selection.province(),
            selection.effective_canton(),
        );
        return ViewOutcome::Empty {
            selection: selection.clone(),
        };
    }

    ViewOutcome::Ready(DashboardView {
        selection: selection.clone(),
        visible_count: selected.len(),
        feature_indices: selected.iter().map(|f| f.index).collect(),
        projection: projection::project(&selected, selection.level),
    })
}

#[cfg(test)]
mod tests {
    use ecuador_geo_geography_models::Level;

    use super::*;

    fn feature(index: usize, province: &str, canton: &str, area: f64) -> AdministrativeFeature {
        AdministrativeFeature {
            index,
            province: province.to_string(),
            canton: canton.to_string(),
            parish: format!("Parish {index}"),
            area_km2: Some(area),
        }
    }

    #[test]
    fn ready_view_carries_indices_and_counts() {
        let features = vec![
            feature(0, "Azuay", "Cuenca", 1.0),
            feature(1, "Guayas", "Guayaquil", 2.0),
            feature(2, "Azuay", "Paute", 3.0),
        ];
        let selection = FilterSelection::new(Level::Canton, "Sierra");
        let outcome = build_view(&features, &selection);
        let view = outcome.view().unwrap();
        assert_eq!(view.visible_count, 2);
        assert_eq!(view.feature_indices, vec![0, 2]);
        assert_eq!(view.projection.rows.len(), 2);
        assert_eq!(view.projection.hierarchy.len(), 1);
        assert_eq!(view.projection.hierarchy[0].children.len(), 2);
    }

    #[test]
    fn empty_selection_is_not_an_error() {
        let features = vec![feature(0, "Azuay", "Cuenca", 1.0)];
        let selection =
            FilterSelection::new(Level::Province, "Amazonía").with_province(Some("Napo"));
        let outcome = build_view(&features, &selection);
        assert!(outcome.is_empty());
        assert_eq!(outcome, ViewOutcome::Empty { selection });
    }
}
