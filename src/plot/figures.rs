use std::path::Path;

use anyhow::Context;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::frame::Frame;
use crate::math::{kde, stats};
use crate::plot::{colormap_at, diverging_colormap, draw_colorbar, padded_range, svg_root, viridis};

const TITLE_FONT: (&str, u32) = ("sans-serif", 22);
const LABEL_FONT: (&str, u32) = ("sans-serif", 11);

/// 3x3 scatter matrix: kernel-density curves on the diagonal, pairwise
/// scatters elsewhere. Row i is the y variable, column j the x variable.
pub fn scatter_matrix(frame: &Frame, cols: &[&str], out_path: &Path) -> anyhow::Result<()> {
    let mut data: Vec<Vec<f64>> = Vec::with_capacity(cols.len());
    for &name in cols {
        data.push(frame.numeric_values(name)?);
    }

    let root = svg_root(out_path, (1200, 1200)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Scatter Matrix: CO2 Emissions and GDP Per Capita", TITLE_FONT)?;
    let panels = root.split_evenly((cols.len(), cols.len()));

    for i in 0..cols.len() {
        for j in 0..cols.len() {
            let panel = &panels[i * cols.len() + j];
            let (x0, x1) = padded_range(data[j].iter().copied());
            if i == j {
                let curve = kde::gaussian_kde(&data[i], 200);
                let y_max = curve.iter().map(|(_, d)| *d).fold(0.0, f64::max).max(1e-12);
                let mut chart = ChartBuilder::on(panel)
                    .margin(8)
                    .x_label_area_size(28)
                    .y_label_area_size(45)
                    .build_cartesian_2d(x0..x1, 0.0..y_max * 1.1)?;
                chart
                    .configure_mesh()
                    .x_desc(cols[j])
                    .y_desc("density")
                    .x_labels(4)
                    .y_labels(4)
                    .label_style(LABEL_FONT)
                    .draw()?;
                chart.draw_series(LineSeries::new(curve, &BLUE))?;
            } else {
                let (y0, y1) = padded_range(data[i].iter().copied());
                let mut chart = ChartBuilder::on(panel)
                    .margin(8)
                    .x_label_area_size(28)
                    .y_label_area_size(45)
                    .build_cartesian_2d(x0..x1, y0..y1)?;
                chart
                    .configure_mesh()
                    .x_desc(cols[j])
                    .y_desc(cols[i])
                    .x_labels(4)
                    .y_labels(4)
                    .label_style(LABEL_FONT)
                    .draw()?;
                chart.draw_series(
                    data[j]
                        .iter()
                        .zip(data[i].iter())
                        .filter(|(x, y)| x.is_finite() && y.is_finite())
                        .map(|(&x, &y)| Circle::new((x, y), 2, BLUE.mix(0.7).filled())),
                )?;
            }
        }
    }
    root.present()
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(())
}

/// One 20-bin histogram per column, side by side, black bar edges.
pub fn histograms(frame: &Frame, cols: &[&str], out_path: &Path) -> anyhow::Result<()> {
    let root = svg_root(out_path, (1500, 520)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Histograms of CO2 Emissions and GDP Per Capita", TITLE_FONT)?;
    let panels = root.split_evenly((1, cols.len()));

    for (panel, &name) in panels.iter().zip(cols.iter()) {
        let values = frame.numeric_values(name)?;
        let bins = stats::histogram(&values, 20);
        let y_max = bins.iter().map(|&(_, _, c)| c).max().unwrap_or(0) as f64;
        let (x0, x1) = padded_range(values.iter().copied());

        let mut chart = ChartBuilder::on(panel)
            .margin(10)
            .x_label_area_size(32)
            .y_label_area_size(45)
            .build_cartesian_2d(x0..x1, 0.0..y_max.max(1.0) * 1.1)?;
        chart
            .configure_mesh()
            .x_desc(name)
            .y_desc("count")
            .x_labels(5)
            .label_style(LABEL_FONT)
            .draw()?;
        chart.draw_series(bins.iter().map(|&(lo, hi, count)| {
            Rectangle::new([(lo, 0.0), (hi, count as f64)], BLUE.mix(0.7).filled())
        }))?;
        chart.draw_series(bins.iter().map(|&(lo, hi, count)| {
            Rectangle::new([(lo, 0.0), (hi, count as f64)], BLACK.stroke_width(1))
        }))?;
    }
    root.present()
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(())
}

/// Correlation heatmap over the numeric columns, diverging colormap over
/// [-1, 1], each cell annotated to two decimals. The first column is the
/// top-left cell.
pub fn correlation_heatmap(frame: &Frame, out_path: &Path) -> anyhow::Result<()> {
    let names = frame.numeric_names();
    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(names.len());
    for name in &names {
        columns.push(frame.numeric_values(name)?);
    }
    let corr = stats::correlation_matrix(&columns);
    let n = names.len();
    anyhow::ensure!(n > 0, "no numeric columns to correlate");

    let root = svg_root(out_path, (950, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Correlation Heatmap: CO2 Emissions and GDP Per Capita", TITLE_FONT)?;
    let map = diverging_colormap();

    let x_names = names.clone();
    let y_names = names.clone();
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(90)
        .y_label_area_size(170)
        .build_cartesian_2d(0.0..n as f64, 0.0..n as f64)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&move |v| {
            let k = v.round() as usize;
            if (v - k as f64).abs() < 1e-9 && k < x_names.len() {
                x_names[k].clone()
            } else {
                String::new()
            }
        })
        .y_label_formatter(&move |v| {
            let k = v.round() as usize;
            if (v - k as f64).abs() < 1e-9 && k < y_names.len() {
                y_names[y_names.len() - 1 - k].clone()
            } else {
                String::new()
            }
        })
        .label_style(LABEL_FONT)
        .draw()?;

    let annotation = ("sans-serif", 14)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    for i in 0..n {
        let y = (n - 1 - i) as f64;
        for j in 0..n {
            let v = corr[i][j];
            chart.draw_series(std::iter::once(Rectangle::new(
                [(j as f64, y), (j as f64 + 1.0, y + 1.0)],
                colormap_at(&map, v, -1.0, 1.0).filled(),
            )))?;
            let text = if v.is_finite() {
                format!("{:.2}", v)
            } else {
                "NaN".to_string()
            };
            chart.draw_series(std::iter::once(Text::new(
                text,
                (j as f64 + 0.5, y + 0.5),
                annotation.clone(),
            )))?;
        }
    }
    root.present()
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(())
}

/// Raw emissions over time, one line per selected country, in the given
/// (encounter) order.
pub fn emissions_over_time(
    frame: &Frame,
    countries: &[String],
    out_path: &Path,
) -> anyhow::Result<()> {
    let years = frame.numeric_values("Year")?;
    let co2 = frame.numeric_values("CO2_Emissions")?;
    let labels = frame.str_values("Country")?;

    let mut series: Vec<(String, Vec<(f64, f64)>)> = Vec::with_capacity(countries.len());
    for country in countries {
        let points: Vec<(f64, f64)> = labels
            .iter()
            .zip(years.iter().zip(co2.iter()))
            .filter(|(cell, _)| cell.as_deref() == Some(country.as_str()))
            .map(|(_, (&x, &y))| (x, y))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();
        series.push((country.clone(), points));
    }

    let (x0, x1) = padded_range(series.iter().flat_map(|(_, p)| p.iter().map(|q| q.0)));
    let (_, y1) = padded_range(series.iter().flat_map(|(_, p)| p.iter().map(|q| q.1)));

    let root = svg_root(out_path, (1100, 650)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("CO2 Emissions Over Time for Selected Countries", TITLE_FONT)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x0..x1, 0.0..y1)?;
    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("CO2 Emissions (tonnes)")
        .label_style(LABEL_FONT)
        .draw()?;

    for (idx, (country, points)) in series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(LineSeries::new(points.iter().copied(), &color))?
            .label(country)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(())
}

/// Scatter of normalized GDP vs per-capita emissions, colored by emissions
/// intensity, with a gradient colorbar.
pub fn intensity_scatter(frame: &Frame, out_path: &Path) -> anyhow::Result<()> {
    let x = frame.numeric_values("GDP_Per_Capita")?;
    let y = frame.numeric_values("CO2_Emissions_Per_Capita")?;
    let c = frame.numeric_values("Emissions_Intensity")?;

    let root = svg_root(out_path, (950, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Clustered Scatter Plot: GDP vs. CO2 Emissions Per Capita", TITLE_FONT)?;
    let (main, bar) = root.split_horizontally(800);

    let (x0, x1) = padded_range(x.iter().copied());
    let (y0, y1) = padded_range(y.iter().copied());
    let (c0, c1) = padded_range(c.iter().copied());
    let map = viridis();

    let mut chart = ChartBuilder::on(&main)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y0..y1)?;
    chart
        .configure_mesh()
        .x_desc("GDP Per Capita (scaled)")
        .y_desc("CO2 Emissions Per Capita (scaled)")
        .label_style(LABEL_FONT)
        .draw()?;
    chart.draw_series(
        x.iter()
            .zip(y.iter())
            .zip(c.iter())
            .filter(|((px, py), pc)| px.is_finite() && py.is_finite() && pc.is_finite())
            .map(|((&px, &py), &pc)| {
                Circle::new((px, py), 3, colormap_at(&map, pc, c0, c1).mix(0.7).filled())
            }),
    )?;

    draw_colorbar(&bar, "Emissions Intensity", (c0, c1), &map)?;
    root.present()
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(())
}

/// 3D scatter of the normalized GDP / per-capita emissions / intensity
/// triple, colored by GDP growth rate on a diverging map.
pub fn scatter_3d(frame: &Frame, out_path: &Path) -> anyhow::Result<()> {
    let x = frame.numeric_values("GDP_Per_Capita")?;
    let y = frame.numeric_values("CO2_Emissions_Per_Capita")?;
    let z = frame.numeric_values("Emissions_Intensity")?;
    let c = frame.numeric_values("GDP_Growth_Rate")?;

    let root = svg_root(out_path, (1050, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("3D Scatter Plot: GDP, CO2 Emissions, and Emissions Intensity", TITLE_FONT)?;
    let (main, bar) = root.split_horizontally(880);

    let (x0, x1) = padded_range(x.iter().copied());
    let (y0, y1) = padded_range(y.iter().copied());
    let (z0, z1) = padded_range(z.iter().copied());
    let (c0, c1) = padded_range(c.iter().copied());
    let map = diverging_colormap();

    let mut chart = ChartBuilder::on(&main)
        .margin(25)
        .build_cartesian_3d(x0..x1, y0..y1, z0..z1)?;
    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .label_style(LABEL_FONT)
        .draw()?;

    chart.draw_series(
        x.iter()
            .zip(y.iter())
            .zip(z.iter().zip(c.iter()))
            .filter(|((px, py), (pz, pc))| {
                px.is_finite() && py.is_finite() && pz.is_finite() && pc.is_finite()
            })
            .map(|((&px, &py), (&pz, &pc))| {
                Circle::new((px, py, pz), 3, colormap_at(&map, pc, c0, c1).mix(0.7).filled())
            }),
    )?;

    draw_colorbar(&bar, "GDP Growth Rate", (c0, c1), &map)?;
    root.present()
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(())
}
