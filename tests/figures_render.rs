use co2gdp::plot::figures;
use co2gdp::{Column, Frame};

/// A small post-preparation frame with every column the figures read.
fn prepared_frame() -> Frame {
    let countries = ["A", "A", "A", "B", "B", "B"];
    let mut frame = Frame::new();
    frame
        .push(
            "Country",
            Column::Str(countries.iter().map(|c| Some(c.to_string())).collect()),
        )
        .expect("push");
    frame
        .push(
            "Year",
            Column::Int(vec![Some(2000), Some(2001), Some(2002), Some(2000), Some(2001), Some(2002)]),
        )
        .expect("push");
    frame
        .push(
            "CO2_Emissions",
            Column::Float(vec![Some(100.0), Some(150.0), Some(180.0), Some(20.0), Some(30.0), Some(25.0)]),
        )
        .expect("push");
    frame
        .push(
            "GDP_Per_Capita",
            Column::Float(vec![Some(0.1), Some(0.4), Some(0.9), Some(0.0), Some(0.2), Some(1.0)]),
        )
        .expect("push");
    frame
        .push(
            "CO2_Emissions_Per_Capita",
            Column::Float(vec![Some(0.0), Some(0.3), Some(1.0), Some(0.1), Some(0.2), Some(0.15)]),
        )
        .expect("push");
    frame
        .push(
            "Emissions_Intensity",
            Column::Float(vec![Some(0.0), Some(0.75), Some(1.1), Some(0.5), Some(1.0), Some(0.15)]),
        )
        .expect("push");
    frame
        .push(
            "GDP_Growth_Rate",
            Column::Float(vec![Some(0.0), Some(3.0), Some(1.25), Some(0.0), Some(f64::INFINITY), Some(4.0)]),
        )
        .expect("push");
    frame
}

fn assert_non_empty(path: &std::path::Path) {
    let meta = std::fs::metadata(path).expect("figure file missing");
    assert!(meta.len() > 0, "empty figure file: {}", path.display());
}

#[test]
fn every_figure_renders_a_non_empty_svg() {
    let frame = prepared_frame();
    let tmp = tempfile::tempdir().expect("tempdir");
    let cols = ["CO2_Emissions_Per_Capita", "GDP_Per_Capita", "CO2_Emissions"];

    let path = tmp.path().join("scatter_matrix.svg");
    figures::scatter_matrix(&frame, &cols, &path).expect("scatter matrix");
    assert_non_empty(&path);

    let path = tmp.path().join("histograms.svg");
    figures::histograms(&frame, &cols, &path).expect("histograms");
    assert_non_empty(&path);

    let path = tmp.path().join("correlation_heatmap.svg");
    figures::correlation_heatmap(&frame, &path).expect("heatmap");
    assert_non_empty(&path);

    let path = tmp.path().join("emissions_over_time.svg");
    let countries = vec!["A".to_string(), "B".to_string()];
    figures::emissions_over_time(&frame, &countries, &path).expect("time series");
    assert_non_empty(&path);

    let path = tmp.path().join("intensity_scatter.svg");
    figures::intensity_scatter(&frame, &path).expect("intensity scatter");
    assert_non_empty(&path);

    // The non-finite growth cell is skipped, not fatal.
    let path = tmp.path().join("scatter_3d.svg");
    figures::scatter_3d(&frame, &path).expect("3d scatter");
    assert_non_empty(&path);
}
