//! Site table ingestion and validation using Polars
//!
//! The uploaded table is read once into a raw `DataFrame`, checked against
//! the required header set, and decoded into typed [`SiteRecord`]s at this
//! boundary. Everything downstream operates on the typed records only.

use polars::prelude::*;
use thiserror::Error;

/// Required column headers, text-exact. Extra columns are ignored and kept
/// in the raw table.
pub const COL_SITE_TYPE: &str = "Jenis";
pub const COL_DISTRICT: &str = "Kecamatan";
pub const COL_SUBDISTRICT: &str = "Kelurahan";
pub const COL_SITE_NAME: &str = "Lokasi";
pub const COL_AVG_PARKED: &str = "RATA-RATA YANG PARKIR";

pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_SITE_TYPE,
    COL_DISTRICT,
    COL_SUBDISTRICT,
    COL_SITE_NAME,
    COL_AVG_PARKED,
];

/// One validated parking site, immutable after ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteRecord {
    pub site_type: String,
    pub district: String,
    pub subdistrict: String,
    pub site_name: String,
    /// Average vehicles parked per day. Zero and negative values are kept;
    /// only rows whose raw value fails numeric coercion are dropped.
    pub avg_parked: f64,
}

/// The input table is missing one or more required columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required columns: {}", .missing.join(", "))]
pub struct SchemaError {
    pub missing: Vec<String>,
}

/// Read the site table and decode it into validated records.
///
/// The raw `DataFrame` is always returned so the caller can inspect what was
/// read even when validation fails. A [`SchemaError`] is non-fatal: macro
/// (city-wide) computation does not depend on the file.
///
/// Rows whose average-parked value does not coerce to a number are silently
/// excluded from the validated records.
pub fn load_parking_sites(
    path: &str,
) -> crate::Result<(DataFrame, Result<Vec<SiteRecord>, SchemaError>)> {
    let df = CsvReader::from_path(path)?.has_header(true).finish()?;

    match check_schema(&df) {
        Err(schema_error) => Ok((df, Err(schema_error))),
        Ok(()) => {
            let sites = decode_sites(&df)?;
            Ok((df, Ok(sites)))
        }
    }
}

/// Check that every required column is present, collecting all missing names.
pub fn check_schema(df: &DataFrame) -> Result<(), SchemaError> {
    let names = df.get_column_names();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !names.contains(c))
        .map(String::from)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError { missing })
    }
}

/// Decode typed records from a schema-checked table, preserving row order.
fn decode_sites(df: &DataFrame) -> crate::Result<Vec<SiteRecord>> {
    let site_types = text_column(df, COL_SITE_TYPE)?;
    let districts = text_column(df, COL_DISTRICT)?;
    let subdistricts = text_column(df, COL_SUBDISTRICT)?;
    let site_names = text_column(df, COL_SITE_NAME)?;

    // Non-strict cast: non-numeric cells become null and their rows are
    // dropped below.
    let avg_parked = df.column(COL_AVG_PARKED)?.cast(&DataType::Float64)?;
    let avg_parked = avg_parked.f64()?;

    let mut sites = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        if let Some(value) = avg_parked.get(row) {
            if value.is_nan() {
                continue;
            }
            sites.push(SiteRecord {
                site_type: site_types[row].clone(),
                district: districts[row].clone(),
                subdistrict: subdistricts[row].clone(),
                site_name: site_names[row].clone(),
                avg_parked: value,
            });
        }
    }

    Ok(sites)
}

fn text_column(df: &DataFrame, name: &str) -> crate::Result<Vec<String>> {
    let series = df.column(name)?.cast(&DataType::Utf8)?;
    let values = series.utf8()?;
    Ok(values
        .into_iter()
        .map(|v| v.unwrap_or("").trim().to_string())
        .collect())
}
