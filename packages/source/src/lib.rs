#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Feature service adapter for Ecuador's parish layer.
//!
//! A [`FeatureSource`] downloads the remote feature collection and
//! normalizes its attributes into [`AdministrativeFeature`] rows exactly
//! once, at ingestion. [`cache::FeatureCache`] memoizes the last successful
//! fetch until it is explicitly refreshed.

pub mod arcgis;
pub mod cache;
pub mod normalize;
pub mod progress;
pub mod registry;

use async_trait::async_trait;
use ecuador_geo_geography_models::{AdministrativeFeature, Level};
use ecuador_geo_source_models::LayerDefinition;
use geojson::{Feature, FeatureCollection};

/// Errors that can occur while fetching or decoding a feature layer.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Transport failure, timeout, non-success status, or a service-level
    /// error document.
    #[error("Feature service unavailable: {message}")]
    SourceUnavailable {
        /// Description of what went wrong.
        message: String,
    },

    /// The response is not a `GeoJSON` feature collection.
    #[error("Malformed feature collection: {message}")]
    MalformedSource {
        /// Description of what went wrong.
        message: String,
    },

    /// The layer configuration is invalid.
    #[error("Invalid layer configuration: {message}")]
    Config {
        /// Description of what went wrong.
        message: String,
    },
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            format!("request timed out: {e}")
        } else {
            e.to_string()
        };
        Self::SourceUnavailable { message }
    }
}

/// A fetched layer: the raw collection plus its normalized attribute table.
///
/// `features[i]` describes `collection.features[i]`.
#[derive(Debug, Clone)]
pub struct FeatureSet {
    /// The feature collection as received. Geometry is never modified.
    pub collection: FeatureCollection,
    /// Normalized attributes, one per feature, in collection order.
    pub features: Vec<AdministrativeFeature>,
}

impl FeatureSet {
    /// Label property added to features returned by [`Self::subset`].
    pub const LABEL_PROPERTY: &'static str = "label";

    /// Returns the number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns `true` if the layer has no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Builds a collection holding the features at `indices`, in the given
    /// order, each tagged with its display name at `level`.
    ///
    /// Indices outside the collection are ignored.
    #[must_use]
    pub fn subset(&self, indices: &[usize], level: Level) -> FeatureCollection {
        let features: Vec<Feature> = indices
            .iter()
            .filter_map(|&i| {
                let mut feature = self.collection.features.get(i)?.clone();
                let label = self.features.get(i)?.name_at(level).to_string();
                feature.set_property(Self::LABEL_PROPERTY, label);
                Some(feature)
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

/// Trait that every feature layer provider implements.
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Returns the layer this source reads.
    fn definition(&self) -> &LayerDefinition;

    /// Downloads the layer and normalizes its attributes.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::SourceUnavailable`] on transport or status
    /// failures and [`SourceError::MalformedSource`] if the body is not a
    /// feature collection.
    async fn fetch(&self) -> Result<FeatureSet, SourceError>;
}

#[async_trait]
impl<T: FeatureSource + ?Sized> FeatureSource for Box<T> {
    fn definition(&self) -> &LayerDefinition {
        (**self).definition()
    }

    async fn fetch(&self) -> Result<FeatureSet, SourceError> {
        (**self).fetch().await
    }
}
