//! Static overlay catalogs: geopolitical points of interest and the
//! per-province security risk table.
//!
//! Points are shown regardless of the administrative filter.

use ecuador_geo_geography_models::{PointOfInterest, RiskIndex};

static POINTS_OF_INTEREST: &[PointOfInterest] = &[
    PointOfInterest {
        kind: "Puerto Comercial",
        name: "Puerto de Guayaquil",
        lat: -2.2592,
        lon: -79.9145,
        description: "Principal puerto del país, clave para el comercio exterior.",
        importance: "Alta",
    },
    PointOfInterest {
        kind: "Puerto Comercial",
        name: "Puerto de Esmeraldas",
        lat: 0.9592,
        lon: -79.65397,
        description: "Puerto multipropósito estratégico, cercano al Canal de Panamá (cercano a ciudad de Esmeraldas).",
        importance: "Media",
    },
    PointOfInterest {
        kind: "Puerto Comercial",
        name: "Puerto Bolívar",
        lat: -3.3456,
        lon: -79.9983,
        description: "Segundo puerto bananero del país, clave para exportaciones agrícolas.",
        importance: "Media",
    },
    PointOfInterest {
        kind: "Refinería",
        name: "Refinería de Esmeraldas",
        lat: 0.9634,
        lon: -79.6644,
        description: "Principal refinería de petróleo de Ecuador.",
        importance: "Alta",
    },
    PointOfInterest {
        kind: "Extracción Petrolera",
        name: "Campos de Lago Agrio (Sucumbíos)",
        lat: 0.1,
        lon: -76.8,
        description: "Zona histórica y estratégica de extracción petrolera en la Amazonía.",
        importance: "Alta",
    },
    PointOfInterest {
        kind: "Extracción Petrolera",
        name: "Campo Sacha",
        lat: -0.3417,
        lon: -77.1833,
        description: "Uno de los mayores y más antiguos campos petroleros con récord de producción.",
        importance: "Alta",
    },
    PointOfInterest {
        kind: "Extracción Petrolera",
        name: "Campo Pungarayacu (Bloque 20)",
        lat: -0.7,
        lon: -77.8,
        description: "Campo de crudo pesado con reservas gigantes y producción significativa.",
        importance: "Alta",
    },
    PointOfInterest {
        kind: "Extracción Petrolera",
        name: "Bloque 43-ITT (Yasuní)",
        lat: -0.68,
        lon: -76.43,
        description: "Bloque en reserva natural; en cierre progresivo tras referendo.",
        importance: "Alta",
    },
    PointOfInterest {
        kind: "Centro de Poder Político",
        name: "Palacio de Carondelet",
        lat: -0.2201,
        lon: -78.5135,
        description: "Sede del Gobierno de la República del Ecuador.",
        importance: "Alta",
    },
    PointOfInterest {
        kind: "Extracción Minera",
        name: "Proyectos Mineros Mirador y Fruta del Norte",
        lat: -3.8823,
        lon: -78.4907,
        description: "Proyectos de cobre y oro importantes para diversificación económica.",
        importance: "Alta",
    },
    PointOfInterest {
        kind: "Extracción Minera",
        name: "Proyecto La Plata",
        lat: -0.1,
        lon: -78.8,
        description: "Depósito masivo de sulfuros ricos en oro, en fase de consulta ambiental.",
        importance: "Media",
    },
    PointOfInterest {
        kind: "Frontera Estratégica",
        name: "Puente Internacional de Rumichaca",
        lat: 0.8256,
        lon: -77.6593,
        description: "Principal punto de control fronterizo con Colombia, de alto flujo comercial y migratorio.",
        importance: "Alta",
    },
    PointOfInterest {
        kind: "Activo Estratégico",
        name: "Reserva Marina de Galápagos",
        lat: 0.0,
        lon: -90.0,
        description: "Reserva natural con valor ecológico global y gran zona económica exclusiva.",
        importance: "Extrema",
    },
    PointOfInterest {
        kind: "Infraestructura Aeroespacial / Militar",
        name: "Aeropuerto Internacional Eloy Alfaro (Base Aérea de Manta)",
        lat: -0.965,
        lon: -80.705,
        description: "Infraestructura estratégica aérea y naval; hasta 2009 funcionó una base militar extranjera.",
        importance: "Alta",
    },
    PointOfInterest {
        kind: "Estación Científica",
        name: "Base Pedro Vicente Maldonado (Antártida)",
        lat: -62.5,
        lon: -59.7,
        description: "Estación antártica ecuatoriana en isla Greenwich, presencia estratégica en la Antártida.",
        importance: "Media-Alta",
    },
    PointOfInterest {
        kind: "Infraestructura Energética",
        name: "Central Térmica Esmeraldas I",
        lat: 0.9167,
        lon: -79.6667,
        description: "Central térmica a vapor de 130 MW, operativa desde 1982.",
        importance: "Alta",
    },
    PointOfInterest {
        kind: "Infraestructura Energética",
        name: "Central Térmica Esmeraldas II",
        lat: 0.9167,
        lon: -79.6667,
        description: "Central térmica de 96 MW operativa desde 2014.",
        importance: "Alta",
    },
    PointOfInterest {
        kind: "Infraestructura Energética",
        name: "Central Hidroeléctrica Coca Codo Sinclair",
        lat: -0.1993,
        lon: -77.6839,
        description: "Planta hidroeléctrica más grande del país (1 500 MW), entre Napo y Sucumbíos.",
        importance: "Alta",
    },
];

static RISK_INDICES: &[RiskIndex] = &[
    RiskIndex {
        province: "Guayas",
        risk_index: 9,
        factors: &[
            "Delincuencia organizada",
            "Narcotráfico",
            "Conflicto de bandas",
            "Control de rutas portuarias",
        ],
    },
    RiskIndex {
        province: "Esmeraldas",
        risk_index: 10,
        factors: &[
            "Disputas territoriales",
            "Presencia de grupos armados irregulares",
            "Narcotráfico",
            "Control de la frontera",
        ],
    },
    RiskIndex {
        province: "Manabí",
        risk_index: 8,
        factors: &["Delincuencia organizada", "Puntos de desembarque de drogas"],
    },
    RiskIndex {
        province: "El Oro",
        risk_index: 8,
        factors: &[
            "Narcotráfico",
            "Contrabando",
            "Actividad criminal en el puerto",
        ],
    },
    RiskIndex {
        province: "Santo Domingo De Los Tsáchilas",
        risk_index: 8,
        factors: &[
            "Delincuencia común y organizada",
            "Corredor de transporte de sustancias ilícitas",
        ],
    },
    RiskIndex {
        province: "Sucumbíos",
        risk_index: 10,
        factors: &[
            "Narcotráfico",
            "Presencia de grupos armados en la frontera con Colombia",
        ],
    },
    RiskIndex {
        province: "Pichincha",
        risk_index: 7,
        factors: &["Delincuencia común y organizada", "Extorsión"],
    },
    RiskIndex {
        province: "Carchi",
        risk_index: 8,
        factors: &[
            "Narcotráfico",
            "Punto de migración irregular",
            "Control de fronteras",
        ],
    },
    RiskIndex {
        province: "Azuay",
        risk_index: 4,
        factors: &["Delincuencia común"],
    },
    RiskIndex {
        province: "Loja",
        risk_index: 3,
        factors: &["Bajo nivel de delincuencia"],
    },
    RiskIndex {
        province: "Galápagos",
        risk_index: 2,
        factors: &["Bajo nivel de delincuencia", "Control marítimo"],
    },
    RiskIndex {
        province: "Napo",
        risk_index: 6,
        factors: &["Tráfico de drogas"],
    },
    RiskIndex {
        province: "Pastaza",
        risk_index: 5,
        factors: &["Conflictos por territorio"],
    },
    RiskIndex {
        province: "Morona Santiago",
        risk_index: 4,
        factors: &["Disputas por minería ilegal"],
    },
    RiskIndex {
        province: "Orellana",
        risk_index: 7,
        factors: &["Delincuencia organizada en torno a actividad petrolera"],
    },
    RiskIndex {
        province: "Zamora Chinchipe",
        risk_index: 6,
        factors: &["Conflictos por minería ilegal"],
    },
    RiskIndex {
        province: "Los Ríos",
        risk_index: 7,
        factors: &["Delincuencia organizada", "Conflictos agrícolas"],
    },
    RiskIndex {
        province: "Cañar",
        risk_index: 4,
        factors: &["Delincuencia común"],
    },
    RiskIndex {
        province: "Chimborazo",
        risk_index: 5,
        factors: &["Delincuencia común"],
    },
    RiskIndex {
        province: "Cotopaxi",
        risk_index: 5,
        factors: &["Delincuencia común"],
    },
    RiskIndex {
        province: "Imbabura",
        risk_index: 4,
        factors: &["Delincuencia común"],
    },
    RiskIndex {
        province: "Tungurahua",
        risk_index: 3,
        factors: &["Delincuencia común"],
    },
    RiskIndex {
        province: "Bolívar",
        risk_index: 2,
        factors: &["Bajo nivel de delincuencia"],
    },
    RiskIndex {
        province: "Santa Elena",
        risk_index: 5,
        factors: &["Delincuencia común", "Control de rutas"],
    },
];

/// Every point of interest, unfiltered.
#[must_use]
pub fn points_of_interest() -> &'static [PointOfInterest] {
    POINTS_OF_INTEREST
}

/// The full risk table in catalog order.
#[must_use]
pub fn risk_indices() -> &'static [RiskIndex] {
    RISK_INDICES
}

/// Risk entry for `province`, if the table has one.
#[must_use]
pub fn risk_for(province: &str) -> Option<&'static RiskIndex> {
    RISK_INDICES.iter().find(|r| r.province == province)
}

/// The `n` highest-risk entries, highest first. Ties keep catalog order.
#[must_use]
pub fn risk_ranking(n: usize) -> Vec<&'static RiskIndex> {
    let mut ranked: Vec<&'static RiskIndex> = RISK_INDICES.iter().collect();
    ranked.sort_by(|a, b| b.risk_index.cmp(&a.risk_index));
    ranked.truncate(n);
    ranked
}

/// Joins factors for single-cell display.
#[must_use]
pub fn factors_label(entry: &RiskIndex) -> String {
    entry.factors.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_have_expected_sizes() {
        assert_eq!(points_of_interest().len(), 18);
        assert_eq!(risk_indices().len(), 24);
    }

    #[test]
    fn top_ten_descending_with_stable_ties() {
        let top: Vec<(&str, u8)> = risk_ranking(10)
            .iter()
            .map(|r| (r.province, r.risk_index))
            .collect();
        assert_eq!(
            top,
            vec![
                ("Esmeraldas", 10),
                ("Sucumbíos", 10),
                ("Guayas", 9),
                ("Manabí", 8),
                ("El Oro", 8),
                ("Santo Domingo De Los Tsáchilas", 8),
                ("Carchi", 8),
                ("Pichincha", 7),
                ("Orellana", 7),
                ("Los Ríos", 7),
            ]
        );
    }

    #[test]
    fn ranking_larger_than_table_returns_all() {
        let all = risk_ranking(100);
        assert_eq!(all.len(), 24);
        assert!(all.windows(2).all(|w| w[0].risk_index >= w[1].risk_index));
    }

    #[test]
    fn ranking_zero_is_empty() {
        assert!(risk_ranking(0).is_empty());
    }

    #[test]
    fn looks_up_risk_by_province() {
        assert_eq!(risk_for("Azuay").map(|r| r.risk_index), Some(4));
        assert!(risk_for("Atlantis").is_none());
    }

    #[test]
    fn joins_factors() {
        let entry = risk_for("Pichincha").unwrap();
        assert_eq!(factors_label(entry), "Delincuencia común y organizada; Extorsión");
    }

    #[test]
    fn points_have_valid_coordinates() {
        for point in points_of_interest() {
            assert!((-90.0..=90.0).contains(&point.lat), "{}", point.name);
            assert!((-180.0..=180.0).contains(&point.lon), "{}", point.name);
        }
    }
}
