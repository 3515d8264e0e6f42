use std::path::Path;

use co2gdp::io::emissions::load_emissions_csv;
use co2gdp::io::gdp::{load_gdp_csv, melt_gdp};
use co2gdp::plot::figures;
use co2gdp::{pipeline, report};

const DEFAULT_EMISSIONS_CSV: &str = "annual-co2-emissions-per-country.csv";
const DEFAULT_GDP_CSV: &str = "API_NY.GDP.PCAP.CD_DS2_en_csv_v2_73467.csv";
const DEFAULT_PLOT_DIR: &str = "plots";

const SCATTER_MATRIX_COLUMNS: [&str; 3] =
    ["CO2_Emissions_Per_Capita", "GDP_Per_Capita", "CO2_Emissions"];

fn main() -> anyhow::Result<()> {
    let emissions_path =
        std::env::var("EMISSIONS_CSV").unwrap_or_else(|_| DEFAULT_EMISSIONS_CSV.to_string());
    let gdp_path = std::env::var("GDP_CSV").unwrap_or_else(|_| DEFAULT_GDP_CSV.to_string());
    let plot_dir = std::env::var("PLOT_OUT_DIR").unwrap_or_else(|_| DEFAULT_PLOT_DIR.to_string());
    let plot_dir = Path::new(&plot_dir);

    println!("[co2gdp] loading {}", emissions_path);
    let emissions = load_emissions_csv(&emissions_path)?;
    println!("{}", report::head_preview(&emissions, 5));

    println!("[co2gdp] loading {}", gdp_path);
    let gdp = load_gdp_csv(&gdp_path)?;
    println!("{}", report::head_preview(&gdp.select(&["Country", "Country Code"])?, 5));

    let gdp_long = melt_gdp(&gdp)?;

    println!("Merging datasets...");
    let mut merged = pipeline::merge_frames(&emissions, &gdp_long)?;

    println!("Cleaning and preparing data...");
    println!("\nChecking for missing values:");
    println!("{}", report::null_counts_table(&merged));
    pipeline::initial_clean(&mut merged)?;

    println!("\nDataset Summary:");
    println!("{}", report::describe_table(&merged)?);

    println!("\nCorrelation Matrix (numeric columns only):");
    println!("{}", report::correlation_table(&merged)?);

    std::fs::create_dir_all(plot_dir)?;

    println!("\nCreating scatter matrix plot...");
    figures::scatter_matrix(
        &merged,
        &SCATTER_MATRIX_COLUMNS,
        &plot_dir.join("scatter_matrix.svg"),
    )?;

    println!("\nCreating histograms...");
    figures::histograms(
        &merged,
        &SCATTER_MATRIX_COLUMNS,
        &plot_dir.join("histograms.svg"),
    )?;

    println!("\nCreating heatmap...");
    figures::correlation_heatmap(&merged, &plot_dir.join("correlation_heatmap.svg"))?;

    println!("\nCreating creative visualization: CO2 emissions over time...");
    let countries = pipeline::first_countries(&merged, 10)?;
    figures::emissions_over_time(&merged, &countries, &plot_dir.join("emissions_over_time.svg"))?;

    println!("\nPreparing the dataset...");
    pipeline::prepare_features(&mut merged)?;

    println!("\nPrepared Dataset:");
    println!("{}", report::head_preview(&merged, 5));

    println!("\nCreating clustered scatter plot...");
    figures::intensity_scatter(&merged, &plot_dir.join("intensity_scatter.svg"))?;

    println!("\nCreating 3D visualization...");
    figures::scatter_3d(&merged, &plot_dir.join("scatter_3d.svg"))?;

    Ok(())
}
