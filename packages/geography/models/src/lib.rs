#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Administrative geography types for Ecuador.
//!
//! These types describe the province → canton → parish hierarchy as it
//! flows through the dashboard: the normalized parish records produced at
//! ingestion, the user's current filter selection, the static overlay
//! catalogs, and the read-only projections (flat rows and area-weighted
//! trees) computed from a filtered set.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Textual marker for "no constraint" in province and canton selectors.
pub const ALL: &str = "(all)";

/// Granularity of the hierarchy currently displayed.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Level {
    /// Provincias
    #[default]
    Province,
    /// Cantones
    Canton,
    /// Parroquias
    Parish,
}

impl Level {
    /// Every level, coarsest first.
    pub const ALL: &[Self] = &[Self::Province, Self::Canton, Self::Parish];

    /// Number of hierarchy levels shown at this granularity (1, 2 or 3).
    #[must_use]
    pub const fn depth(self) -> usize {
        match self {
            Self::Province => 1,
            Self::Canton => 2,
            Self::Parish => 3,
        }
    }

    /// Level for a zero-based tree depth, if any.
    #[must_use]
    pub const fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            0 => Some(Self::Province),
            1 => Some(Self::Canton),
            2 => Some(Self::Parish),
            _ => None,
        }
    }

    /// Whether a canton selection applies at this level.
    #[must_use]
    pub const fn scopes_canton(self) -> bool {
        !matches!(self, Self::Province)
    }

    /// Human-readable plural label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Province => "Provinces",
            Self::Canton => "Cantons",
            Self::Parish => "Parishes",
        }
    }
}

/// One parish-level record from the feature service.
///
/// Attribute strings are already title-cased; `index` is the feature's
/// position in the source collection, through which its geometry is reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdministrativeFeature {
    /// Position in the source feature collection.
    pub index: usize,
    /// Province name (e.g. "Azuay").
    pub province: String,
    /// Canton name (e.g. "Cuenca").
    pub canton: String,
    /// Parish name (e.g. "Baños").
    pub parish: String,
    /// Surface area in square kilometres, when the source provides one.
    pub area_km2: Option<f64>,
}

impl AdministrativeFeature {
    /// Returns the attribute naming this feature at `level`.
    #[must_use]
    pub fn name_at(&self, level: Level) -> &str {
        match level {
            Level::Province => &self.province,
            Level::Canton => &self.canton,
            Level::Parish => &self.parish,
        }
    }
}

/// The current view state chosen through the dashboard controls.
///
/// `None` for `province` or `canton` stands for [`ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    /// Granularity of labels and drill-down.
    pub level: Level,
    /// Region name, keyed into the region catalog.
    pub region: String,
    /// Selected province.
    pub province: Option<String>,
    /// Selected canton.
    pub canton: Option<String>,
}

impl FilterSelection {
    /// Creates a selection covering a whole region.
    #[must_use]
    pub fn new(level: Level, region: impl Into<String>) -> Self {
        Self {
            level,
            region: region.into(),
            province: None,
            canton: None,
        }
    }

    /// Narrows the selection to a province. `(all)` or blank clears it.
    #[must_use]
    pub fn with_province(mut self, province: Option<&str>) -> Self {
        self.province = parse_scope(province);
        self
    }

    /// Narrows the selection to a canton. `(all)` or blank clears it.
    #[must_use]
    pub fn with_canton(mut self, canton: Option<&str>) -> Self {
        self.canton = parse_scope(canton);
        self
    }

    /// Selected province, if any.
    #[must_use]
    pub fn province(&self) -> Option<&str> {
        self.province.as_deref()
    }

    /// The canton constraint that actually applies.
    ///
    /// A stored canton is ignored at province level and whenever no
    /// province is selected.
    #[must_use]
    pub fn effective_canton(&self) -> Option<&str> {
        if !self.level.scopes_canton() || self.province.is_none() {
            return None;
        }
        self.canton.as_deref()
    }
}

/// Parses a textual selector value, mapping [`ALL`] and blanks to `None`.
#[must_use]
pub fn parse_scope(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
        None
    } else {
        Some(value.to_string())
    }
}

/// A static grouping of provinces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Region name (e.g. "Costa").
    pub name: &'static str,
    /// Member provinces, in catalog order.
    pub provinces: &'static [&'static str],
}

impl Region {
    /// Whether `province` belongs to this region.
    #[must_use]
    pub fn contains(&self, province: &str) -> bool {
        self.provinces.contains(&province)
    }
}

/// A fixed geopolitical point of interest drawn on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    /// Category (tipo), e.g. "Puerto Comercial".
    pub kind: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lon: f64,
    /// Free-text description.
    pub description: &'static str,
    /// Importance label, e.g. "Alta".
    pub importance: &'static str,
}

/// A per-province security risk entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskIndex {
    /// Province name. Not required to match any fetched feature.
    pub province: &'static str,
    /// Risk index, 0 (lowest) to 10 (highest).
    pub risk_index: u8,
    /// Contributing factors, most significant first.
    pub factors: &'static [&'static str],
}

/// One row of the flat attribute table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatRow {
    /// Province name.
    pub province: String,
    /// Canton name.
    pub canton: String,
    /// Parish name.
    pub parish: String,
    /// Area in km², when known.
    pub area_km2: Option<f64>,
}

impl From<&AdministrativeFeature> for FlatRow {
    fn from(feature: &AdministrativeFeature) -> Self {
        Self {
            province: feature.province.clone(),
            canton: feature.canton.clone(),
            parish: feature.parish.clone(),
            area_km2: feature.area_km2,
        }
    }
}

/// A node of the area-weighted drill-down tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    /// Province, canton or parish name.
    pub name: String,
    /// Level this node sits at.
    pub level: Level,
    /// Sum of known areas below this node.
    pub weight: f64,
    /// Number of features below this node, including those without area.
    pub feature_count: usize,
    /// Child nodes ordered by name. Empty at the deepest displayed level.
    pub children: Vec<Self>,
}

impl HierarchyNode {
    /// Returns `true` if this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Read-only views derived from a filtered feature set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    /// Rows sorted by province, canton, parish.
    pub rows: Vec<FlatRow>,
    /// Top-level (province) nodes of the drill-down tree.
    pub hierarchy: Vec<HierarchyNode>,
}

/// Everything a render pass needs for a non-empty selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// The selection this view was computed for.
    pub selection: FilterSelection,
    /// Number of visible parish features.
    pub visible_count: usize,
    /// Source indices of the visible features, in source order.
    pub feature_indices: Vec<usize>,
    /// Table and tree projections.
    pub projection: Projection,
}

/// Outcome of one filter-and-project pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutcome {
    /// At least one feature matched.
    Ready(DashboardView),
    /// Nothing matched. Not an error; surfaces show an explanatory message.
    Empty {
        /// The selection that produced no rows.
        selection: FilterSelection,
    },
}

impl ViewOutcome {
    /// Message shown when a selection yields no rows.
    pub const EMPTY_MESSAGE: &'static str = "No results for the current filters";

    /// Returns the view if the outcome is non-empty.
    #[must_use]
    pub const fn view(&self) -> Option<&DashboardView> {
        match self {
            Self::Ready(view) => Some(view),
            Self::Empty { .. } => None,
        }
    }

    /// Returns `true` if no feature matched.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_marker_and_blank_parse_to_none() {
        assert_eq!(parse_scope(Some("(all)")), None);
        assert_eq!(parse_scope(Some("(ALL)")), None);
        assert_eq!(parse_scope(Some("  ")), None);
        assert_eq!(parse_scope(None), None);
        assert_eq!(parse_scope(Some(" Azuay ")), Some("Azuay".to_string()));
    }

    #[test]
    fn canton_ignored_without_province() {
        let selection = FilterSelection::new(Level::Canton, "Sierra").with_canton(Some("Cuenca"));
        assert_eq!(selection.effective_canton(), None);
    }

    #[test]
    fn canton_ignored_at_province_level() {
        let selection = FilterSelection::new(Level::Province, "Sierra")
            .with_province(Some("Azuay"))
            .with_canton(Some("Cuenca"));
        assert_eq!(selection.effective_canton(), None);
    }

    #[test]
    fn canton_applies_at_parish_level() {
        let selection = FilterSelection::new(Level::Parish, "Sierra")
            .with_province(Some("Azuay"))
            .with_canton(Some("Cuenca"));
        assert_eq!(selection.effective_canton(), Some("Cuenca"));
    }

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("parish".parse::<Level>().unwrap(), Level::Parish);
        assert_eq!("CANTON".parse::<Level>().unwrap(), Level::Canton);
        assert!("district".parse::<Level>().is_err());
    }

    #[test]
    fn level_depths() {
        let depths: Vec<usize> = Level::ALL.iter().map(|l| l.depth()).collect();
        assert_eq!(depths, vec![1, 2, 3]);
        assert_eq!(Level::from_depth(2), Some(Level::Parish));
        assert_eq!(Level::from_depth(3), None);
    }

    #[test]
    fn level_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&Level::Province).unwrap();
        assert_eq!(json, "\"PROVINCE\"");
    }
}
