//! Memoization of the last successful layer fetch.
//!
//! The layer query never varies, so the cache holds at most one entry. It
//! is only replaced through [`FeatureCache::refresh`] or cleared through
//! [`FeatureCache::invalidate`]; a failed fetch leaves the cache empty so
//! stale features are never served in place of an error.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ecuador_geo_source_models::SourceStatus;

use crate::{FeatureSet, FeatureSource, SourceError};

struct CachedFeatures {
    set: Arc<FeatureSet>,
    fetched_at: DateTime<Utc>,
}

/// Single-entry cache in front of a [`FeatureSource`].
pub struct FeatureCache<S> {
    source: S,
    entry: Option<CachedFeatures>,
}

impl<S: FeatureSource> FeatureCache<S> {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            entry: None,
        }
    }

    /// Returns the wrapped source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Returns the cached features, fetching them first if the cache is
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns the source's [`SourceError`] if a fetch was needed and failed.
    pub async fn get(&mut self) -> Result<Arc<FeatureSet>, SourceError> {
        if let Some(entry) = &self.entry {
            log::debug!(
                "{}: serving {} cached features from {}",
                self.source.definition().id,
                entry.set.len(),
                entry.fetched_at
            );
            return Ok(Arc::clone(&entry.set));
        }

        let set = Arc::new(self.source.fetch().await?);
        self.entry = Some(CachedFeatures {
            set: Arc::clone(&set),
            fetched_at: Utc::now(),
        });
        Ok(set)
    }

    /// Drops the cached features, if any.
    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            log::info!("{}: cache invalidated", self.source.definition().id);
        }
    }

    /// Discards the cached features and fetches them again.
    ///
    /// # Errors
    ///
    /// Returns the source's [`SourceError`] if the fetch fails; the cache is
    /// left empty.
    pub async fn refresh(&mut self) -> Result<Arc<FeatureSet>, SourceError> {
        self.invalidate();
        self.get().await
    }

    /// When the cached features were fetched, if any are cached.
    #[must_use]
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.entry.as_ref().map(|e| e.fetched_at)
    }

    /// Describes the cache contents.
    #[must_use]
    pub fn status(&self) -> SourceStatus {
        let layer = self.source.definition();
        SourceStatus {
            layer_id: layer.id.clone(),
            layer_name: layer.name.clone(),
            attribution: layer.attribution.clone(),
            fetched_at: self.fetched_at(),
            feature_count: self.entry.as_ref().map(|e| e.set.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use ecuador_geo_source_models::LayerDefinition;

    use super::*;
    use crate::{normalize, registry};

    /// Serves canned response bodies in order, counting fetches.
    struct ScriptedSource {
        layer: LayerDefinition,
        bodies: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(bodies: &[String]) -> Self {
            Self {
                layer: registry::default_layer(),
                bodies: Mutex::new(bodies.iter().rev().cloned().collect()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl FeatureSource for ScriptedSource {
        fn definition(&self) -> &LayerDefinition {
            &self.layer
        }

        async fn fetch(&self) -> Result<FeatureSet, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let body = self.bodies.lock().unwrap().pop();
            match body {
                Some(body) => normalize::parse_feature_collection(&body, &self.layer.fields),
                None => Err(SourceError::SourceUnavailable {
                    message: "connection refused".to_string(),
                }),
            }
        }
    }

    fn collection(names: &[&str]) -> String {
        let features: Vec<serde_json::Value> = names
            .iter()
            .map(|n| {
                serde_json::json!({
                    "type": "Feature",
                    "geometry": null,
                    "properties": {"DPA_DESPRO": "AZUAY", "DPA_DESCAN": "CUENCA", "DPA_DESPAR": n}
                })
            })
            .collect();
        serde_json::json!({"type": "FeatureCollection", "features": features}).to_string()
    }

    #[tokio::test]
    async fn fetches_once_and_memoizes() {
        let mut cache = FeatureCache::new(ScriptedSource::new(&[collection(&["A", "B"])]));
        assert!(cache.fetched_at().is_none());

        let first = cache.get().await.unwrap();
        let second = cache.get().await.unwrap();

        assert_eq!(first.len(), 2);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.source().calls.load(Ordering::SeqCst), 1);
        assert!(cache.fetched_at().is_some());
    }

    #[tokio::test]
    async fn refresh_replaces_entry() {
        let mut cache = FeatureCache::new(ScriptedSource::new(&[
            collection(&["A"]),
            collection(&["A", "B", "C"]),
        ]));

        assert_eq!(cache.get().await.unwrap().len(), 1);
        assert_eq!(cache.refresh().await.unwrap().len(), 3);
        assert_eq!(cache.get().await.unwrap().len(), 3);
        assert_eq!(cache.source().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_refresh_leaves_cache_empty() {
        let mut cache = FeatureCache::new(ScriptedSource::new(&[collection(&["A"])]));
        cache.get().await.unwrap();

        let err = cache.refresh().await.unwrap_err();
        assert!(matches!(err, SourceError::SourceUnavailable { .. }));
        assert!(cache.fetched_at().is_none());
        assert_eq!(cache.status().feature_count, None);
    }

    #[tokio::test]
    async fn malformed_body_is_not_cached() {
        let mut cache = FeatureCache::new(ScriptedSource::new(&["not json".to_string()]));
        let err = cache.get().await.unwrap_err();
        assert!(matches!(err, SourceError::MalformedSource { .. }));
        assert!(cache.fetched_at().is_none());
    }

    #[tokio::test]
    async fn status_reports_layer_and_count() {
        let mut cache = FeatureCache::new(ScriptedSource::new(&[collection(&["A", "B"])]));
        let status = cache.status();
        assert_eq!(status.layer_id, "parroquias");
        assert_eq!(status.feature_count, None);

        cache.get().await.unwrap();
        assert_eq!(cache.status().feature_count, Some(2));
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let mut cache = FeatureCache::new(ScriptedSource::new(&[
            collection(&["A"]),
            collection(&["B"]),
        ]));
        cache.get().await.unwrap();
        cache.invalidate();
        let set = cache.get().await.unwrap();
        assert_eq!(set.features[0].parish, "B");
        assert_eq!(cache.source().calls.load(Ordering::SeqCst), 2);
    }
}
