//! CSV export of the flat attribute table.

use std::io::Write;

use ecuador_geo_geography_models::FlatRow;
use serde::Serialize;

/// Default download name for exported tables.
pub const EXPORT_FILENAME: &str = "ecuador_geopolitica_oficial.csv";

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Provincia")]
    province: &'a str,
    #[serde(rename = "Cantón")]
    canton: &'a str,
    #[serde(rename = "Parroquia")]
    parish: &'a str,
    #[serde(rename = "Área (km²)")]
    area_km2: Option<f64>,
}

impl<'a> From<&'a FlatRow> for CsvRow<'a> {
    fn from(row: &'a FlatRow) -> Self {
        Self {
            province: &row.province,
            canton: &row.canton,
            parish: &row.parish,
            area_km2: row.area_km2,
        }
    }
}

/// Writes `rows` as CSV with a header line. Absent areas become empty cells.
///
/// # Errors
///
/// Returns [`crate::GeoError`] if serialization or the writer fails.
pub fn write_csv<W: Write>(rows: &[FlatRow], writer: W) -> Result<(), crate::GeoError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(CsvRow::from(row))?;
    }
    if rows.is_empty() {
        csv_writer.write_record(["Provincia", "Cantón", "Parroquia", "Área (km²)"])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Renders `rows` as a CSV string.
///
/// # Errors
///
/// Returns [`crate::GeoError`] if serialization fails.
pub fn to_csv_string(rows: &[FlatRow]) -> Result<String, crate::GeoError> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| {
        crate::GeoError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
