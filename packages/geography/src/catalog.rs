//! Static region → province catalog.
//!
//! Province names use the same title-cased spelling that ingestion produces,
//! so catalog lookups compare directly against feature attributes.

use ecuador_geo_geography_models::Region;

static REGIONS: &[Region] = &[
    Region {
        name: "Costa",
        provinces: &[
            "Esmeraldas",
            "Manabí",
            "Santo Domingo De Los Tsáchilas",
            "Los Ríos",
            "Guayas",
            "Santa Elena",
            "El Oro",
        ],
    },
    Region {
        name: "Sierra",
        provinces: &[
            "Carchi",
            "Imbabura",
            "Pichincha",
            "Cotopaxi",
            "Tungurahua",
            "Bolívar",
            "Chimborazo",
            "Cañar",
            "Azuay",
            "Loja",
        ],
    },
    Region {
        name: "Amazonía",
        provinces: &[
            "Sucumbíos",
            "Napo",
            "Orellana",
            "Pastaza",
            "Morona Santiago",
            "Zamora Chinchipe",
        ],
    },
    Region {
        name: "Insular (Galápagos)",
        provinces: &["Galápagos"],
    },
];

/// Returns every region in catalog order.
#[must_use]
pub fn regions() -> &'static [Region] {
    REGIONS
}

/// Looks up a region by exact name.
#[must_use]
pub fn region(name: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.name == name)
}

/// Returns the region a province belongs to, if it is catalogued.
#[must_use]
pub fn region_of(province: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.contains(province))
}

/// Region to use when a selection names none: the selected province's
/// region if it is catalogued, otherwise the first region.
#[must_use]
pub fn default_region(province: Option<&str>) -> &'static str {
    province
        .and_then(region_of)
        .or_else(|| REGIONS.first())
        .map_or("", |r| r.name)
}

/// Provinces of `region` sorted by name, for populating the province
/// selector.
#[must_use]
pub fn sorted_provinces(region: &Region) -> Vec<&'static str> {
    let mut provinces = region.provinces.to_vec();
    provinces.sort_unstable();
    provinces
}
