use std::io::BufRead;

use anyhow::Context;

use crate::frame::melt::melt;
use crate::frame::{Column, Frame};

/// Leading metadata lines before the real header row in World-Bank-style
/// wide CSV exports.
pub const GDP_HEADER_SKIP: usize = 4;

/// The non-year columns of the wide table, after renaming
/// "Country Name" -> "Country".
pub const GDP_ID_COLUMNS: [&str; 4] = ["Country", "Country Code", "Indicator Name", "Indicator Code"];

/// The id columns as they appear in the file itself.
const WIDE_ID_COLUMNS: [&str; 4] = [
    "Country Name",
    "Country Code",
    "Indicator Name",
    "Indicator Code",
];

/// Load the wide GDP-per-capita CSV. The four id columns stay as strings;
/// every other column is parsed as float per cell (empty or unparsable cells
/// become nulls) and keeps its original header label, typically a year.
pub fn load_gdp_csv(path: &str) -> anyhow::Result<Frame> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open GDP CSV: {}", path))?;
    let mut reader = std::io::BufReader::new(file);

    let mut skipped = String::new();
    for _ in 0..GDP_HEADER_SKIP {
        skipped.clear();
        let n = reader
            .read_line(&mut skipped)
            .with_context(|| format!("Failed to skip header lines in {}", path))?;
        anyhow::ensure!(n > 0, "GDP CSV ended inside the {}-line header", GDP_HEADER_SKIP);
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read GDP CSV header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let is_id: Vec<bool> = headers
        .iter()
        .map(|h| WIDE_ID_COLUMNS.contains(&h.as_str()))
        .collect();

    let mut str_cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    let mut num_cells: Vec<Vec<Option<f64>>> = vec![Vec::new(); headers.len()];
    for result in rdr.records() {
        let record = result?;
        for (i, _) in headers.iter().enumerate() {
            let field = record.get(i).map(str::trim).unwrap_or("");
            if is_id[i] {
                let cell = if field.is_empty() {
                    None
                } else {
                    Some(field.to_string())
                };
                str_cells[i].push(cell);
            } else {
                num_cells[i].push(field.parse::<f64>().ok());
            }
        }
    }

    let mut frame = Frame::new();
    for (i, name) in headers.iter().enumerate() {
        let col = if is_id[i] {
            Column::Str(std::mem::take(&mut str_cells[i]))
        } else {
            Column::Float(std::mem::take(&mut num_cells[i]))
        };
        frame.push(name, col)?;
    }
    frame.rename("Country Name", "Country")?;
    Ok(frame)
}

/// Reshape the wide GDP frame to one row per (Country, Year): melt every
/// year column, keep only labels that are purely numeric, and cast the Year
/// column to integers. Non-numeric labels (trailing metadata columns and
/// the like) are silently excluded.
pub fn melt_gdp(gdp: &Frame) -> anyhow::Result<Frame> {
    let melted = melt(gdp, &GDP_ID_COLUMNS, "Year", "GDP_Per_Capita")?;

    let labels = melted.str_values("Year")?;
    let keep: Vec<bool> = labels
        .iter()
        .map(|cell| {
            cell.as_deref()
                .is_some_and(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
        })
        .collect();
    let mut long = melted.filter_rows(&keep)?;
    long.cast_str_to_int("Year")?;
    Ok(long)
}
