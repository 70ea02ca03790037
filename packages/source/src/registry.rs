//! Layer registry: loads layer definitions from embedded TOML configs.
//!
//! Each `.toml` file in `packages/source/layers/` is baked into the binary
//! at compile time via [`include_str!`]. The endpoint and timeout of the
//! active layer can be overridden through the environment.

use std::time::Duration;

use ecuador_geo_source_models::LayerDefinition;

use crate::SourceError;

/// Overrides the active layer's query URL.
pub const LAYER_URL_ENV: &str = "ECUADOR_GEO_LAYER_URL";

/// Overrides the active layer's request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "ECUADOR_GEO_TIMEOUT_SECS";

/// Identifier of the layer used when none is named.
pub const DEFAULT_LAYER_ID: &str = "parroquias";

/// Upper bound on a configured timeout.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(600);

/// TOML configs embedded at compile time.
const LAYER_TOMLS: &[(&str, &str)] = &[("parroquias", include_str!("../layers/parroquias.toml"))];

/// Parses a layer definition from TOML.
///
/// # Errors
///
/// Returns a description of the problem if the TOML is malformed or a
/// required key is missing.
pub fn parse_layer_toml(toml_str: &str) -> Result<LayerDefinition, String> {
    toml::de::from_str(toml_str).map_err(|e| e.to_string())
}

/// Returns all configured layer definitions, parsed from embedded TOML.
///
/// # Panics
///
/// Panics if any embedded TOML config is malformed.
#[must_use]
pub fn all_layers() -> Vec<LayerDefinition> {
    LAYER_TOMLS
        .iter()
        .map(|(name, toml)| {
            parse_layer_toml(toml).unwrap_or_else(|e| panic!("Failed to parse {name}.toml: {e}"))
        })
        .collect()
}

/// Looks up a layer definition by id.
#[must_use]
pub fn layer(id: &str) -> Option<LayerDefinition> {
    all_layers().into_iter().find(|l| l.id == id)
}

/// Returns the parish layer definition.
///
/// # Panics
///
/// Panics if the embedded parish layer config is missing.
#[must_use]
pub fn default_layer() -> LayerDefinition {
    layer(DEFAULT_LAYER_ID)
        .unwrap_or_else(|| panic!("Missing embedded layer config {DEFAULT_LAYER_ID}.toml"))
}

/// Applies endpoint and timeout overrides to `layer`.
///
/// # Errors
///
/// Returns [`SourceError::Config`] if the URL is not http(s) or the timeout
/// is not a positive integer no larger than [`MAX_TIMEOUT`].
pub fn apply_overrides(
    mut layer: LayerDefinition,
    query_url: Option<&str>,
    timeout_secs: Option<&str>,
) -> Result<LayerDefinition, SourceError> {
    if let Some(url) = query_url.map(str::trim).filter(|u| !u.is_empty()) {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SourceError::Config {
                message: format!("{LAYER_URL_ENV} must be an http(s) URL, got {url}"),
            });
        }
        log::info!("Using layer URL override {url}");
        layer.query_url = url.to_string();
    }

    if let Some(raw) = timeout_secs.map(str::trim).filter(|t| !t.is_empty()) {
        let secs: u64 = raw.parse().map_err(|_| SourceError::Config {
            message: format!("{TIMEOUT_ENV} must be a whole number of seconds, got {raw}"),
        })?;
        if secs == 0 || secs > MAX_TIMEOUT.as_secs() {
            return Err(SourceError::Config {
                message: format!(
                    "{TIMEOUT_ENV} must be between 1 and {}, got {secs}",
                    MAX_TIMEOUT.as_secs()
                ),
            });
        }
        layer.timeout_secs = secs;
    }

    Ok(layer)
}

/// Returns the parish layer with environment overrides applied.
///
/// # Errors
///
/// Returns [`SourceError::Config`] if an override is invalid.
pub fn layer_from_env() -> Result<LayerDefinition, SourceError> {
    let url = std::env::var(LAYER_URL_ENV).ok();
    let timeout = std::env::var(TIMEOUT_ENV).ok();
    apply_overrides(default_layer(), url.as_deref(), timeout.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_parish_layer() {
        let layer = default_layer();
        assert_eq!(layer.id, "parroquias");
        assert_eq!(layer.out_sr, 4326);
        assert_eq!(layer.timeout_secs, 60);
        assert_eq!(layer.fields.province, "DPA_DESPRO");
        assert_eq!(layer.fields.canton, "DPA_DESCAN");
        assert_eq!(layer.fields.parish, "DPA_DESPAR");
        assert_eq!(layer.fields.area, "AREA_KM2");
        assert!(layer.query_url.ends_with("/FeatureServer/0/query"));
    }

    #[test]
    fn layer_ids_are_unique() {
        let layers = all_layers();
        let mut ids: Vec<&str> = layers.iter().map(|l| l.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), layers.len());
    }

    #[test]
    fn query_requests_geojson_in_wgs84() {
        let params = default_layer().query_params();
        assert!(params.contains(&("where", "1=1".to_string())));
        assert!(params.contains(&("outFields", "*".to_string())));
        assert!(params.contains(&("returnGeometry", "true".to_string())));
        assert!(params.contains(&("f", "geojson".to_string())));
        assert!(params.contains(&("outSR", "4326".to_string())));
    }

    #[test]
    fn defaults_apply_when_optional_keys_missing() {
        let layer = parse_layer_toml(
            r#"
            id = "x"
            name = "X"
            query_url = "https://example.com/query"

            [fields]
            province = "P"
            canton = "C"
            parish = "Q"
            area = "A"
            "#,
        )
        .unwrap();
        assert_eq!(layer.out_sr, 4326);
        assert_eq!(layer.timeout_secs, 60);
        assert!(layer.description.is_empty());
    }

    #[test]
    fn rejects_toml_without_fields() {
        assert!(parse_layer_toml("id = \"x\"\nname = \"X\"\nquery_url = \"u\"").is_err());
    }

    #[test]
    fn overrides_url_and_timeout() {
        let layer =
            apply_overrides(default_layer(), Some("http://localhost:9000/q"), Some("5")).unwrap();
        assert_eq!(layer.query_url, "http://localhost:9000/q");
        assert_eq!(layer.timeout_secs, 5);
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let layer = apply_overrides(default_layer(), Some(" "), Some("")).unwrap();
        assert_eq!(layer, default_layer());
    }

    #[test]
    fn rejects_bad_overrides() {
        assert!(apply_overrides(default_layer(), Some("ftp://x"), None).is_err());
        assert!(apply_overrides(default_layer(), None, Some("0")).is_err());
        assert!(apply_overrides(default_layer(), None, Some("soon")).is_err());
        assert!(apply_overrides(default_layer(), None, Some("100000")).is_err());
    }
}
