use anyhow::Context;
use serde::Deserialize;

use crate::frame::{Column, Frame};

#[derive(Debug, Deserialize)]
struct EmissionsRow {
    #[serde(rename = "Entity")]
    entity: String,
    #[serde(rename = "Year")]
    year: i64,
    #[serde(rename = "Annual CO2 emissions")]
    emissions: Option<f64>,
}

/// Load the annual-emissions CSV into a frame with columns
/// `Country, Year, CO2_Emissions`. Extra columns in the file (e.g. the ISO
/// code) are ignored; empty emission cells become nulls.
pub fn load_emissions_csv(path: &str) -> anyhow::Result<Frame> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open emissions CSV: {}", path))?;

    let mut countries: Vec<Option<String>> = Vec::new();
    let mut years: Vec<Option<i64>> = Vec::new();
    let mut values: Vec<Option<f64>> = Vec::new();
    for result in rdr.deserialize::<EmissionsRow>() {
        let row = result?;
        countries.push(Some(row.entity));
        years.push(Some(row.year));
        values.push(row.emissions);
    }

    let mut frame = Frame::new();
    frame.push("Country", Column::Str(countries))?;
    frame.push("Year", Column::Int(years))?;
    frame.push("CO2_Emissions", Column::Float(values))?;
    Ok(frame)
}
