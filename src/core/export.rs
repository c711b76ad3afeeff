use crate::core::fare::FareCalculator;
use crate::domain::model::{Direction, VehicleKind};
use crate::domain::tariff::Tariff;
use crate::utils::error::{FareError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = FareError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            other => Err(FareError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Supported formats: csv, tsv, json".to_string(),
            }),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        })
    }
}

/// One line of the public pricing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FareRow {
    pub zone: String,
    pub vehicle: String,
    pub to_airport: u32,
    pub from_airport: u32,
}

pub fn fare_rows(tariff: &Tariff, vehicle: VehicleKind) -> Result<Vec<FareRow>> {
    let calculator = FareCalculator::new(tariff);
    let to_airport = calculator.quote_all(vehicle, Direction::ToAirport)?;
    let from_airport = calculator.quote_all(vehicle, Direction::FromAirport)?;

    Ok(to_airport
        .into_iter()
        .zip(from_airport)
        .map(|(to, from)| FareRow {
            zone: to.destination,
            vehicle: vehicle.to_string(),
            to_airport: to.total_price,
            from_airport: from.total_price,
        })
        .collect())
}

pub fn export_fares(tariff: &Tariff, vehicle: VehicleKind, format: ExportFormat) -> Result<String> {
    let rows = fare_rows(tariff, vehicle)?;
    tracing::debug!("exporting {} fare rows as {}", rows.len(), format);

    match format {
        ExportFormat::Csv => write_delimited(&rows, b','),
        ExportFormat::Tsv => write_delimited(&rows, b'\t'),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
    }
}

fn write_delimited(rows: &[FareRow], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| FareError::IoError(e.into_error()))?;
    String::from_utf8(data).map_err(|e| {
        FareError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_export_has_header_and_all_zones() {
        let tariff = Tariff::builtin();
        let csv = export_fares(&tariff, VehicleKind::Taxi, ExportFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("zone,vehicle,to_airport,from_airport"));
        assert_eq!(lines.next(), Some("Pudahuel,Taxi,20000,23000"));
        assert_eq!(csv.lines().count(), tariff.zones().len() + 1);
    }

    #[test]
    fn test_tsv_export_uses_tabs() {
        let tariff = Tariff::builtin();
        let tsv = export_fares(&tariff, VehicleKind::Suv, ExportFormat::Tsv).unwrap();
        assert!(tsv.starts_with("zone\tvehicle\tto_airport\tfrom_airport\n"));
        assert!(tsv.contains("Pudahuel\tSUV\t20000\t23000"));
    }

    #[test]
    fn test_json_export_parses_back() {
        let tariff = Tariff::builtin();
        let json = export_fares(&tariff, VehicleKind::Taxi, ExportFormat::Json).unwrap();
        let rows: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(rows.len(), tariff.zones().len());
        assert_eq!(rows[0]["zone"], "Pudahuel");
        assert_eq!(rows[0]["from_airport"], 23000);
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }
}
