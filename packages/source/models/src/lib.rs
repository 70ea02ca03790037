#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Feature layer configuration and cache status types.
//!
//! A [`LayerDefinition`] describes one `ArcGIS` `FeatureServer` layer: where
//! to query it, which attribute fields hold the administrative names, and
//! how long to wait for it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attribute field names in the remote layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerFields {
    /// Province name field (e.g. `DPA_DESPRO`).
    pub province: String,
    /// Canton name field (e.g. `DPA_DESCAN`).
    pub canton: String,
    /// Parish name field (e.g. `DPA_DESPAR`).
    pub parish: String,
    /// Area in km² (e.g. `AREA_KM2`).
    pub area: String,
}

/// A remote feature layer and how to query it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerDefinition {
    /// Unique identifier (e.g. `"parroquias"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Short description of the layer contents.
    #[serde(default)]
    pub description: String,
    /// Data provenance shown alongside the map.
    #[serde(default)]
    pub attribution: String,
    /// `.../FeatureServer/<n>/query` endpoint.
    pub query_url: String,
    /// Output spatial reference (WKID).
    #[serde(default = "default_out_sr")]
    pub out_sr: u32,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Attribute field names.
    pub fields: LayerFields,
}

const fn default_out_sr() -> u32 {
    4326
}

const fn default_timeout_secs() -> u64 {
    60
}

impl LayerDefinition {
    /// Query string requesting every feature, every field, and geometry as
    /// `GeoJSON` in [`Self::out_sr`].
    #[must_use]
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("where", "1=1".to_string()),
            ("outFields", "*".to_string()),
            ("returnGeometry", "true".to_string()),
            ("f", "geojson".to_string()),
            ("outSR", self.out_sr.to_string()),
        ]
    }
}

/// Snapshot of the feature cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStatus {
    /// Layer identifier.
    pub layer_id: String,
    /// Layer name.
    pub layer_name: String,
    /// Data provenance.
    pub attribution: String,
    /// When the cached features were fetched, if any are cached.
    pub fetched_at: Option<DateTime<Utc>>,
    /// Number of cached features, if any are cached.
    pub feature_count: Option<usize>,
}
