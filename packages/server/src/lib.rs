#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the Ecuador geography dashboard.
//!
//! Serves the plain structured data consumed by the map, table, sunburst
//! and bar-chart widgets: filtered parish GeoJSON, sorted attribute rows,
//! area-weighted hierarchy trees, the static overlays, and CSV exports.
//! The parish layer is fetched lazily on the first request and memoized
//! until `POST /api/refresh`.

mod handlers;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use ecuador_geo_source::arcgis::ArcGisLayerSource;
use ecuador_geo_source::cache::FeatureCache;
use ecuador_geo_source::{FeatureSource, registry};
use tokio::sync::Mutex;

/// Default bind address when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Default port when `PORT` is unset or invalid.
pub const DEFAULT_PORT: u16 = 8080;

/// Shared application state.
pub struct AppState {
    /// Memoized parish layer. Requests serialize on this lock, so concurrent
    /// requests against an empty cache trigger a single fetch.
    pub cache: Mutex<FeatureCache<Box<dyn FeatureSource>>>,
}

impl AppState {
    /// Creates state around an empty cache for `source`.
    #[must_use]
    pub fn new(source: Box<dyn FeatureSource>) -> Self {
        Self {
            cache: Mutex::new(FeatureCache::new(source)),
        }
    }
}

/// Where the server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address.
    pub bind_addr: String,
    /// TCP port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Reads `BIND_ADDR` and `PORT`, falling back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("BIND_ADDR").ok().as_deref(),
            std::env::var("PORT").ok().as_deref(),
        )
    }

    fn from_values(bind_addr: Option<&str>, port: Option<&str>) -> Self {
        Self {
            bind_addr: bind_addr
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .unwrap_or(DEFAULT_BIND_ADDR)
                .to_string(),
            port: port
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/regions", web::get().to(handlers::regions))
            .route("/hierarchy", web::get().to(handlers::hierarchy))
            .route("/view", web::get().to(handlers::view))
            .route("/features", web::get().to(handlers::features))
            .route("/points", web::get().to(handlers::points))
            .route("/risk", web::get().to(handlers::risk))
            .route("/export.csv", web::get().to(handlers::export_csv))
            .route("/source", web::get().to(handlers::source_status))
            .route("/refresh", web::post().to(handlers::refresh)),
    );
}

/// Starts the dashboard API server.
///
/// Reads the parish layer definition (with `ECUADOR_GEO_LAYER_URL` and
/// `ECUADOR_GEO_TIMEOUT_SECS` overrides) and serves until shut down. The
/// caller provides the async runtime and the logger.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the layer configuration is
/// invalid, the HTTP server fails to bind, or it encounters a runtime
/// error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let layer = registry::layer_from_env().map_err(std::io::Error::other)?;
    log::info!("Serving layer {} ({})", layer.name, layer.query_url);

    let source = ArcGisLayerSource::new(layer).map_err(std::io::Error::other)?;
    let state = web::Data::new(AppState::new(Box::new(source)));

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}
