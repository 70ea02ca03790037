//! `ArcGIS` `FeatureServer` layer source.
//!
//! Issues a single `GeoJSON` query for every feature of the layer in
//! WGS84. There is no retry: a failed request is reported to the caller,
//! who may try again by refreshing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ecuador_geo_source_models::LayerDefinition;

use crate::progress::{ProgressCallback, null_progress};
use crate::{FeatureSet, FeatureSource, SourceError, normalize};

/// User-Agent sent to the feature service.
const USER_AGENT: &str = concat!("ecuador-geo/", env!("CARGO_PKG_VERSION"));

/// Reads one layer from an `ArcGIS` REST endpoint.
pub struct ArcGisLayerSource {
    layer: LayerDefinition,
    client: reqwest::Client,
    progress: Arc<dyn ProgressCallback>,
}

impl ArcGisLayerSource {
    /// Creates a source for `layer` with its configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Config`] if the HTTP client cannot be built.
    pub fn new(layer: LayerDefinition) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(layer.timeout_secs))
            .build()
            .map_err(|e| SourceError::Config {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            layer,
            client,
            progress: null_progress(),
        })
    }

    /// Reports download progress to `progress`.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressCallback>) -> Self {
        self.progress = progress;
        self
    }

    async fn download(&self) -> Result<String, SourceError> {
        let response = self
            .client
            .get(&self.layer.query_url)
            .query(&self.layer.query_params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::SourceUnavailable {
                message: format!("HTTP {status} from {}", self.layer.query_url),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl FeatureSource for ArcGisLayerSource {
    fn definition(&self) -> &LayerDefinition {
        &self.layer
    }

    async fn fetch(&self) -> Result<FeatureSet, SourceError> {
        log::info!(
            "{}: fetching all features from {}",
            self.layer.id,
            self.layer.query_url
        );
        self.progress
            .started(format!("Downloading {}...", self.layer.name));

        let result = match self.download().await {
            Ok(body) => {
                log::debug!("{}: received {} bytes", self.layer.id, body.len());
                self.progress
                    .set_message(format!("Decoding {}...", self.layer.name));
                normalize::parse_feature_collection(&body, &self.layer.fields)
            }
            Err(e) => Err(e),
        };

        match &result {
            Ok(set) => {
                log::info!("{}: loaded {} features", self.layer.id, set.len());
                self.progress
                    .finished(format!("{}: {} features", self.layer.name, set.len()));
            }
            Err(e) => {
                log::error!("{}: fetch failed: {e}", self.layer.id);
                self.progress.failed(format!("{}: {e}", self.layer.name));
            }
        }

        result
    }
}
