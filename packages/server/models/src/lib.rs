#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the dashboard server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the geography types to allow independent evolution of the API
//! contract.

use ecuador_geo_geography_models::{
    FilterSelection, FlatRow, HierarchyNode, Level, RiskIndex, ViewOutcome,
};
use serde::{Deserialize, Serialize};

/// `GET /api/health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Always `true` when the server answers.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Error body for non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable description.
    pub error: String,
}

impl ApiError {
    /// Wraps any displayable error.
    #[must_use]
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

/// Selection query parameters shared by the view, features and export
/// endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionParams {
    /// `PROVINCE`, `CANTON` or `PARISH` (case-insensitive). Defaults to
    /// province.
    pub level: Option<String>,
    /// Region name. Defaults to the selected province's region, or the
    /// first catalogued region.
    pub region: Option<String>,
    /// Province name or `(all)`.
    pub province: Option<String>,
    /// Canton name or `(all)`.
    pub canton: Option<String>,
}

impl SelectionParams {
    /// Converts the parameters into a [`FilterSelection`].
    ///
    /// # Errors
    ///
    /// Returns a message if `level` is not a known level.
    pub fn to_selection(&self, default_region: &str) -> Result<FilterSelection, String> {
        let level = match self.level.as_deref().map(str::trim) {
            None | Some("") => Level::default(),
            Some(raw) => raw
                .parse::<Level>()
                .map_err(|_| format!("Unknown level: {raw}"))?,
        };

        let region = self
            .region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(default_region);

        Ok(FilterSelection::new(level, region)
            .with_province(self.province.as_deref())
            .with_canton(self.canton.as_deref()))
    }
}

/// A region and its provinces, sorted by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRegion {
    /// Region name.
    pub name: String,
    /// Member provinces sorted by name.
    pub provinces: Vec<String>,
}

/// Query parameters for the hierarchy endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyParams {
    /// Restrict to the provinces of this region.
    pub region: Option<String>,
}

/// A province and the cantons observed for it in the fetched layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProvince {
    /// Province name.
    pub name: String,
    /// Sorted canton names. Empty if the layer has none for this province.
    pub cantons: Vec<String>,
}

/// Response of `GET /api/view`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiView {
    /// Level used for labels and drill-down.
    pub level: Level,
    /// Region name.
    pub region: String,
    /// Selected province, or `None` for all.
    pub province: Option<String>,
    /// Canton constraint that was applied, or `None` for all.
    pub canton: Option<String>,
    /// Number of visible parishes.
    pub visible_count: usize,
    /// `true` when nothing matched.
    pub empty: bool,
    /// Explanation shown instead of an empty view.
    pub message: Option<String>,
    /// Flat table sorted by province, canton, parish.
    pub rows: Vec<FlatRow>,
    /// Area-weighted drill-down tree.
    pub hierarchy: Vec<HierarchyNode>,
}

fn selection_header(selection: &FilterSelection) -> (Level, String, Option<String>, Option<String>) {
    (
        selection.level,
        selection.region.clone(),
        selection.province.clone(),
        selection.effective_canton().map(str::to_string),
    )
}

impl From<ViewOutcome> for ApiView {
    fn from(outcome: ViewOutcome) -> Self {
        match outcome {
            ViewOutcome::Ready(view) => {
                let (level, region, province, canton) = selection_header(&view.selection);
                Self {
                    level,
                    region,
                    province,
                    canton,
                    visible_count: view.visible_count,
                    empty: false,
                    message: None,
                    rows: view.projection.rows,
                    hierarchy: view.projection.hierarchy,
                }
            }
            ViewOutcome::Empty { selection } => {
                let (level, region, province, canton) = selection_header(&selection);
                Self {
                    level,
                    region,
                    province,
                    canton,
                    visible_count: 0,
                    empty: true,
                    message: Some(ViewOutcome::EMPTY_MESSAGE.to_string()),
                    rows: Vec::new(),
                    hierarchy: Vec::new(),
                }
            }
        }
    }
}

/// Query parameters for the risk endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskParams {
    /// Return only the `top` highest-risk provinces.
    pub top: Option<usize>,
}

/// A risk table entry as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRiskIndex {
    /// Province name.
    pub province: String,
    /// Risk index, 0-10.
    pub risk_index: u8,
    /// Contributing factors.
    pub factors: Vec<String>,
}

impl From<&RiskIndex> for ApiRiskIndex {
    fn from(entry: &RiskIndex) -> Self {
        Self {
            province: entry.province.to_string(),
            risk_index: entry.risk_index,
            factors: entry.factors.iter().map(|f| (*f).to_string()).collect(),
        }
    }
}
