//! Attribute normalization for fetched feature layers.
//!
//! This is the only place attribute strings are case-normalized; every
//! downstream comparison relies on the form produced here.

use ecuador_geo_geography_models::AdministrativeFeature;
use ecuador_geo_source_models::LayerFields;
use geojson::{FeatureCollection, GeoJson, JsonObject, JsonValue};

use crate::SourceError;

/// Maximum length of the response body preview included in errors.
const BODY_PREVIEW_LEN: usize = 200;

/// Title-cases `s`: the first letter of every run of letters is upper-cased
/// and the rest lower-cased. Any non-letter starts a new word.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

/// Reads a text attribute and title-cases it. Missing and `null` values
/// become the empty string; numbers and booleans are rendered as text.
#[must_use]
pub fn text_property(properties: Option<&JsonObject>, field: &str) -> String {
    let raw = match properties.and_then(|p| p.get(field)) {
        None | Some(JsonValue::Null) => return String::new(),
        Some(JsonValue::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    };
    title_case(&raw)
}

/// Reads an area attribute. Absent, `null` and non-numeric values are
/// `None`; numeric strings are parsed.
#[must_use]
pub fn area_property(properties: Option<&JsonObject>, field: &str) -> Option<f64> {
    let value = match properties?.get(field)? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

/// Extracts one normalized record per feature, in collection order.
#[must_use]
pub fn extract_features(
    collection: &FeatureCollection,
    fields: &LayerFields,
) -> Vec<AdministrativeFeature> {
    collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            let properties = feature.properties.as_ref();
            AdministrativeFeature {
                index,
                province: text_property(properties, &fields.province),
                canton: text_property(properties, &fields.canton),
                parish: text_property(properties, &fields.parish),
                area_km2: area_property(properties, &fields.area),
            }
        })
        .collect()
}

/// Decodes a feature service response body into a [`crate::FeatureSet`].
///
/// # Errors
///
/// Returns [`SourceError::SourceUnavailable`] if the body is an `ArcGIS`
/// error document and [`SourceError::MalformedSource`] if it is not JSON or
/// not a feature collection.
pub fn parse_feature_collection(
    body: &str,
    fields: &LayerFields,
) -> Result<crate::FeatureSet, SourceError> {
    let value: JsonValue =
        serde_json::from_str(body).map_err(|e| SourceError::MalformedSource {
            message: format!("invalid JSON: {e} (body: {})", preview(body)),
        })?;

    if let Some(error) = value.get("error") {
        let message = error
            .get("message")
            .and_then(JsonValue::as_str)
            .unwrap_or("unknown error");
        let code = error.get("code").and_then(JsonValue::as_i64);
        return Err(SourceError::SourceUnavailable {
            message: format!("service error {code:?}: {message}"),
        });
    }

    let collection = match GeoJson::from_json_value(value) {
        Ok(GeoJson::FeatureCollection(collection)) => collection,
        Ok(GeoJson::Feature(_)) => {
            return Err(SourceError::MalformedSource {
                message: "expected a FeatureCollection, got a Feature".to_string(),
            });
        }
        Ok(GeoJson::Geometry(_)) => {
            return Err(SourceError::MalformedSource {
                message: "expected a FeatureCollection, got a Geometry".to_string(),
            });
        }
        Err(e) => {
            return Err(SourceError::MalformedSource {
                message: e.to_string(),
            });
        }
    };

    if exceeded_transfer_limit(&collection) {
        log::warn!(
            "Feature service truncated the response at {} features (exceededTransferLimit)",
            collection.features.len()
        );
    }

    let features = extract_features(&collection, fields);

    let incomplete = features
        .iter()
        .filter(|f| f.province.is_empty() || f.canton.is_empty() || f.parish.is_empty())
        .count();
    if incomplete > 0 {
        log::warn!("{incomplete} features are missing a province, canton or parish name");
    }

    Ok(crate::FeatureSet {
        collection,
        features,
    })
}

/// `ArcGIS` flags truncated `GeoJSON` responses in a top-level
/// `properties.exceededTransferLimit` member.
fn exceeded_transfer_limit(collection: &FeatureCollection) -> bool {
    collection
        .foreign_members
        .as_ref()
        .and_then(|m| m.get("properties"))
        .and_then(|p| p.get("exceededTransferLimit"))
        .and_then(JsonValue::as_bool)
        .unwrap_or(false)
}

fn preview(body: &str) -> String {
    if body.len() > BODY_PREVIEW_LEN {
        let end = (0..=BODY_PREVIEW_LEN)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
