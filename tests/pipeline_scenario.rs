use std::io::Write;

use co2gdp::io::emissions::load_emissions_csv;
use co2gdp::io::gdp::{load_gdp_csv, melt_gdp};
use co2gdp::pipeline;

const EMISSIONS_CSV: &str = "\
Entity,Code,Year,Annual CO2 emissions
A,AAA,2000,100
A,AAA,2001,200
B,BBB,2000,50
";

// Four metadata lines precede the real header, as in the World Bank export.
const GDP_CSV: &str = "\
\"Data Source\",\"World Development Indicators\",
\"Last Updated Date\",\"2024-01-01\",

,
Country Name,Country Code,Indicator Name,Indicator Code,2000,2001,not_a_year
A,AAA,GDP per capita,NY.GDP.PCAP.CD,50,100,7
C,CCC,GDP per capita,NY.GDP.PCAP.CD,5,6,8
";

fn write_fixture(dir: &std::path::Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).expect("create fixture");
    f.write_all(content.as_bytes()).expect("write fixture");
    path.to_string_lossy().into_owned()
}

#[test]
fn merge_keeps_only_country_year_pairs_present_in_both_sources() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let emissions_path = write_fixture(tmp.path(), "emissions.csv", EMISSIONS_CSV);
    let gdp_path = write_fixture(tmp.path(), "gdp.csv", GDP_CSV);

    let emissions = load_emissions_csv(&emissions_path).expect("load emissions");
    let gdp = load_gdp_csv(&gdp_path).expect("load gdp");
    let gdp_long = melt_gdp(&gdp).expect("melt");

    // The non-numeric year label never reaches the long table.
    let years = gdp_long.numeric_values("Year").expect("years");
    assert!(years.iter().all(|y| *y == 2000.0 || *y == 2001.0));

    let merged = pipeline::merge_frames(&emissions, &gdp_long).expect("merge");
    // B is only in emissions, C only in GDP; both disappear.
    assert_eq!(merged.n_rows(), 2);
    let countries = merged.str_values("Country").expect("countries");
    assert!(countries.iter().all(|c| c.as_deref() == Some("A")));
    let merged_years = merged.numeric_values("Year").expect("merged years");
    assert_eq!(merged_years, vec![2000.0, 2001.0]);
}

#[test]
fn growth_rate_before_normalization_matches_reference_sequence() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let emissions_path = write_fixture(tmp.path(), "emissions.csv", EMISSIONS_CSV);
    let gdp_path = write_fixture(tmp.path(), "gdp.csv", GDP_CSV);

    let emissions = load_emissions_csv(&emissions_path).expect("load emissions");
    let gdp_long = melt_gdp(&load_gdp_csv(&gdp_path).expect("load gdp")).expect("melt");
    let mut merged = pipeline::merge_frames(&emissions, &gdp_long).expect("merge");
    pipeline::initial_clean(&mut merged).expect("clean");

    // GDP went 50 -> 100, so the per-country percent change is [0, 1.0].
    pipeline::derive_gdp_growth_rate(&mut merged).expect("growth");
    let rates = merged.numeric_values("GDP_Growth_Rate").expect("rates");
    assert_eq!(rates, vec![0.0, 1.0]);
}

#[test]
fn prepared_frame_is_null_free_and_normalized() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let emissions_path = write_fixture(tmp.path(), "emissions.csv", EMISSIONS_CSV);
    let gdp_path = write_fixture(tmp.path(), "gdp.csv", GDP_CSV);

    let emissions = load_emissions_csv(&emissions_path).expect("load emissions");
    let gdp_long = melt_gdp(&load_gdp_csv(&gdp_path).expect("load gdp")).expect("melt");
    let mut merged = pipeline::merge_frames(&emissions, &gdp_long).expect("merge");
    pipeline::initial_clean(&mut merged).expect("clean");

    // Per-capita derivation and presentation scaling happen in the first pass.
    let per_capita = merged
        .numeric_values("CO2_Emissions_Per_Capita")
        .expect("per capita");
    assert_eq!(per_capita, vec![100.0 / 1e6, 200.0 / 1e6]);
    let gdp_scaled = merged.numeric_values("GDP_Per_Capita").expect("gdp");
    assert_eq!(gdp_scaled, vec![0.05, 0.1]);

    pipeline::prepare_features(&mut merged).expect("prepare");

    for (_, col) in merged.columns() {
        assert_eq!(col.null_count(), 0);
    }
    // Columns scaled by the joint min-max fit span exactly [0, 1].
    for name in ["Year", "CO2_Emissions", "GDP_Per_Capita", "CO2_Emissions_Per_Capita"] {
        let values = merged.numeric_values(name).expect("values");
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!((min, max), (0.0, 1.0), "column {}", name);
    }

    // Intensity reads the normalized columns: 0/(0 + eps) then 1/(1 + eps).
    let intensity = merged.numeric_values("Emissions_Intensity").expect("intensity");
    assert_eq!(intensity[0], 0.0);
    assert!((intensity[1] - 1.0 / (1.0 + 1e-6)).abs() < 1e-12);

    // First row of the country group defaults to zero growth.
    let rates = merged.numeric_values("GDP_Growth_Rate").expect("rates");
    assert_eq!(rates[0], 0.0);
}
