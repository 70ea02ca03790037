//! HTTP handler functions for the dashboard API.

use std::sync::Arc;

use actix_web::{HttpResponse, http::header, web};
use ecuador_geo_geography::{catalog, export, filter, index, overlays, view};
use ecuador_geo_geography_models::FilterSelection;
use ecuador_geo_server_models::{
    ApiError, ApiHealth, ApiProvince, ApiRegion, ApiRiskIndex, ApiView, HierarchyParams,
    RiskParams, SelectionParams,
};
use ecuador_geo_source::FeatureSet;

use crate::AppState;

fn bad_request(error: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiError::new(error))
}

/// Parses and validates the selection parameters.
fn parse_selection(params: &SelectionParams) -> Result<FilterSelection, HttpResponse> {
    let default_region = catalog::default_region(params.province.as_deref().map(str::trim));
    let selection = params.to_selection(default_region).map_err(bad_request)?;
    filter::validate(&selection).map_err(bad_request)?;
    Ok(selection)
}

/// Returns the cached parish layer, fetching it on first use.
async fn load_features(state: &AppState) -> Result<Arc<FeatureSet>, HttpResponse> {
    let mut cache = state.cache.lock().await;
    cache.get().await.map_err(|e| {
        log::error!("Failed to load parish layer: {e}");
        HttpResponse::BadGateway().json(ApiError::new(e))
    })
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/regions`
///
/// Returns the region catalog with provinces sorted by name.
pub async fn regions() -> HttpResponse {
    let regions: Vec<ApiRegion> = catalog::regions()
        .iter()
        .map(|region| ApiRegion {
            name: region.name.to_string(),
            provinces: catalog::sorted_provinces(region)
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
        .collect();

    HttpResponse::Ok().json(regions)
}

/// `GET /api/hierarchy`
///
/// Returns the province → cantons index built from the fetched layer. With a
/// `region`, lists that region's provinces in name order, including those
/// the layer has no cantons for.
pub async fn hierarchy(
    state: web::Data<AppState>,
    params: web::Query<HierarchyParams>,
) -> HttpResponse {
    let region = match params.region.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(name) => match catalog::region(name) {
            Some(region) => Some(region),
            None => return bad_request(format!("Unknown region: {name}")),
        },
    };

    let set = match load_features(&state).await {
        Ok(set) => set,
        Err(response) => return response,
    };
    let index = index::build_index(&set.features);

    let provinces: Vec<ApiProvince> = match region {
        Some(region) => catalog::sorted_provinces(region)
            .into_iter()
            .map(|name| ApiProvince {
                name: name.to_string(),
                cantons: index::cantons_of(&index, name).to_vec(),
            })
            .collect(),
        None => index
            .into_iter()
            .map(|(name, cantons)| ApiProvince { name, cantons })
            .collect(),
    };

    HttpResponse::Ok().json(provinces)
}

/// `GET /api/view`
///
/// Returns the visible count, flat rows and hierarchy for a selection. An
/// empty result is a `200` with `empty: true`.
pub async fn view(
    state: web::Data<AppState>,
    params: web::Query<SelectionParams>,
) -> HttpResponse {
    let selection = match parse_selection(&params) {
        Ok(selection) => selection,
        Err(response) => return response,
    };
    let set = match load_features(&state).await {
        Ok(set) => set,
        Err(response) => return response,
    };

    let outcome = view::build_view(&set.features, &selection);
    HttpResponse::Ok().json(ApiView::from(outcome))
}

/// `GET /api/features`
///
/// Returns the matching parishes as a `GeoJSON` `FeatureCollection` with
/// their original geometry and a `label` property for the selected level.
pub async fn features(
    state: web::Data<AppState>,
    params: web::Query<SelectionParams>,
) -> HttpResponse {
    let selection = match parse_selection(&params) {
        Ok(selection) => selection,
        Err(response) => return response,
    };
    let set = match load_features(&state).await {
        Ok(set) => set,
        Err(response) => return response,
    };

    let outcome = view::build_view(&set.features, &selection);
    let indices = outcome
        .view()
        .map(|v| v.feature_indices.as_slice())
        .unwrap_or_default();

    HttpResponse::Ok()
        .content_type("application/geo+json")
        .json(set.subset(indices, selection.level))
}

/// `GET /api/points`
pub async fn points() -> HttpResponse {
    HttpResponse::Ok().json(overlays::points_of_interest())
}

/// `GET /api/risk`
///
/// Returns the whole risk table, or the `top` highest-risk provinces.
pub async fn risk(params: web::Query<RiskParams>) -> HttpResponse {
    let entries: Vec<ApiRiskIndex> = match params.top {
        Some(n) => overlays::risk_ranking(n)
            .into_iter()
            .map(ApiRiskIndex::from)
            .collect(),
        None => overlays::risk_indices()
            .iter()
            .map(ApiRiskIndex::from)
            .collect(),
    };

    HttpResponse::Ok().json(entries)
}

/// `GET /api/export.csv`
///
/// Streams the flat rows of a selection as a CSV attachment. An empty
/// selection yields the header line only.
pub async fn export_csv(
    state: web::Data<AppState>,
    params: web::Query<SelectionParams>,
) -> HttpResponse {
    let selection = match parse_selection(&params) {
        Ok(selection) => selection,
        Err(response) => return response,
    };
    let set = match load_features(&state).await {
        Ok(set) => set,
        Err(response) => return response,
    };

    let outcome = view::build_view(&set.features, &selection);
    let rows = outcome
        .view()
        .map(|v| v.projection.rows.as_slice())
        .unwrap_or_default();

    match export::to_csv_string(rows) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export::EXPORT_FILENAME),
            ))
            .body(body),
        Err(e) => {
            log::error!("CSV export failed: {e}");
            HttpResponse::InternalServerError().json(ApiError::new(e))
        }
    }
}

/// `GET /api/source`
pub async fn source_status(state: web::Data<AppState>) -> HttpResponse {
    let cache = state.cache.lock().await;
    HttpResponse::Ok().json(cache.status())
}

/// `POST /api/refresh`
///
/// Drops the cached layer and fetches it again.
pub async fn refresh(state: web::Data<AppState>) -> HttpResponse {
    let mut cache = state.cache.lock().await;
    match cache.refresh().await {
        Ok(_) => HttpResponse::Ok().json(cache.status()),
        Err(e) => {
            log::error!("Refresh failed: {e}");
            HttpResponse::BadGateway().json(ApiError::new(e))
        }
    }
}
