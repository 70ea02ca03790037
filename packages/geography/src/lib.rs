#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region catalog, filter engine and projections for Ecuador's
//! administrative hierarchy.
//!
//! Everything here is a pure function of the normalized parish table
//! produced by `ecuador_geo_source`: the province → canton index that
//! populates the selectors, the region/province/canton filter, the flat and
//! area-weighted projections, and the static overlay catalogs.

pub mod catalog;
pub mod export;
pub mod filter;
pub mod index;
pub mod overlays;
pub mod projection;
pub mod view;

use thiserror::Error;

/// Errors that can occur while validating selections or exporting views.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The region is not in the catalog.
    #[error("Unknown region: {region}")]
    UnknownRegion {
        /// The rejected region name.
        region: String,
    },

    /// The province does not belong to the selected region.
    #[error("Province {province} is not part of region {region}")]
    UnknownProvince {
        /// The rejected province name.
        province: String,
        /// Region it was checked against.
        region: String,
    },

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error while writing an export.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
