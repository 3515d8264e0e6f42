use std::collections::HashMap;

use crate::frame::join::inner_join;
use crate::frame::prep::{self, MinMaxScaler, OneHotEncoder};
use crate::frame::{Column, Frame};

/// Epsilon guard on the Emissions_Intensity denominator.
pub const INTENSITY_EPS: f64 = 1e-6;

const EMISSIONS_TONNES_PER_UNIT: f64 = 1_000_000.0;
const GDP_DISPLAY_DIVISOR: f64 = 1_000.0;

/// Inner-join the two long tables on (Country, Year), keeping only the
/// analysis columns. Rows without a match in both sources are dropped by
/// construction; output order follows the emissions table.
pub fn merge_frames(emissions: &Frame, gdp_long: &Frame) -> anyhow::Result<Frame> {
    let left = emissions.select(&["Country", "Year", "CO2_Emissions"])?;
    let right = gdp_long.select(&["Country", "Year", "GDP_Per_Capita"])?;
    inner_join(&left, &right, &["Country", "Year"])
}

/// First cleaning pass: drop every row with a null, derive the per-capita
/// emissions column, and rescale GDP for presentation. Runs before the
/// summary statistics and the first block of figures.
pub fn initial_clean(frame: &mut Frame) -> anyhow::Result<()> {
    *frame = prep::drop_nulls(frame)?;

    let per_capita: Vec<Option<f64>> = frame
        .numeric_values("CO2_Emissions")?
        .iter()
        .map(|v| Some(v / EMISSIONS_TONNES_PER_UNIT))
        .collect();
    frame.push("CO2_Emissions_Per_Capita", Column::Float(per_capita))?;

    let scaled: Vec<Option<f64>> = frame
        .numeric_values("GDP_Per_Capita")?
        .iter()
        .map(|v| Some(v / GDP_DISPLAY_DIVISOR))
        .collect();
    frame.replace("GDP_Per_Capita", Column::Float(scaled))?;
    Ok(())
}

/// Second preparation pass, order-sensitive: impute, min-max normalize,
/// one-hot encode, then derive the two engineered features. The features
/// intentionally read the already-normalized columns; reordering these steps
/// changes the numbers.
pub fn prepare_features(frame: &mut Frame) -> anyhow::Result<()> {
    prep::impute_numeric_median(frame)?;
    prep::impute_categorical_mode(frame)?;

    MinMaxScaler::fit_transform(frame)?;

    let encoder = OneHotEncoder::drop_first();
    encoder.encode(frame, &["Country"])?;

    derive_emissions_intensity(frame)?;
    derive_gdp_growth_rate(frame)?;
    Ok(())
}

/// Emissions_Intensity = CO2_Emissions / (GDP_Per_Capita + eps).
pub fn derive_emissions_intensity(frame: &mut Frame) -> anyhow::Result<()> {
    let co2 = frame.numeric_values("CO2_Emissions")?;
    let gdp = frame.numeric_values("GDP_Per_Capita")?;
    let intensity: Vec<Option<f64>> = co2
        .iter()
        .zip(gdp.iter())
        .map(|(c, g)| Some(c / (g + INTENSITY_EPS)))
        .collect();
    frame.push("Emissions_Intensity", Column::Float(intensity))?;
    Ok(())
}

/// GDP_Growth_Rate: percent change of GDP_Per_Capita within each country's
/// rows, taken in row order. The first row of each country has no prior
/// value and defaults to 0. Countries never leak into each other: the
/// previous value is tracked per country, not per adjacent row.
pub fn derive_gdp_growth_rate(frame: &mut Frame) -> anyhow::Result<()> {
    let countries = frame.str_values("Country")?;
    let gdp = frame.numeric_values("GDP_Per_Capita")?;

    let mut last: HashMap<String, f64> = HashMap::new();
    let mut rates: Vec<Option<f64>> = Vec::with_capacity(gdp.len());
    for (cell, &value) in countries.iter().zip(gdp.iter()) {
        let country = cell.clone().unwrap_or_default();
        let rate = match last.get(&country) {
            Some(prev) => (value - prev) / prev,
            None => 0.0,
        };
        rates.push(Some(rate));
        last.insert(country, value);
    }
    frame.push("GDP_Growth_Rate", Column::Float(rates))?;
    Ok(())
}

/// The first `limit` distinct countries in row-encounter order. The order is
/// deliberately not sorted: it follows the data as merged, so the selection
/// tracks the input ordering.
pub fn first_countries(frame: &Frame, limit: usize) -> anyhow::Result<Vec<String>> {
    let mut seen: Vec<String> = Vec::new();
    for cell in frame.str_values("Country")?.into_iter().flatten() {
        if !seen.contains(&cell) {
            seen.push(cell);
            if seen.len() == limit {
                break;
            }
        }
    }
    Ok(seen)
}
