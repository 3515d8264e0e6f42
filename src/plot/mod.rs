pub mod figures;

use std::path::Path;

use plotters::prelude::*;
use plotters::style::colors::colormaps::{ColorMap, DerivedColorMap, ViridisRGB};

pub(crate) fn svg_root(path: &Path, size: (u32, u32)) -> SVGBackend<'_> {
    println!("[plot] writing {}", path.display());
    SVGBackend::new(path, size)
}

/// Finite min/max of the values, padded by 5% on each side. Degenerate input
/// (empty, all-NaN, or constant) falls back to a unit-wide window so charts
/// always have a drawable range.
pub(crate) fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if max <= min {
        return (min - 0.5, min + 0.5);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

/// Blue-white-red diverging map for correlation-style values.
pub(crate) fn diverging_colormap() -> DerivedColorMap<RGBColor> {
    DerivedColorMap::new(&[BLUE, WHITE, RED])
}

pub(crate) fn viridis() -> ViridisRGB {
    ViridisRGB {}
}

/// Sample a colormap at `v` within [min, max], clamped. A degenerate range
/// samples the midpoint.
pub(crate) fn colormap_at<M: ColorMap<RGBColor>>(map: &M, v: f64, min: f64, max: f64) -> RGBColor {
    let t = if max > min {
        ((v - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.5
    };
    map.get_color(t as f32)
}

/// Vertical gradient colorbar with value labels, drawn into its own area
/// beside a chart.
pub(crate) fn draw_colorbar<M: ColorMap<RGBColor>>(
    area: &DrawingArea<SVGBackend<'_>, plotters::coord::Shift>,
    label: &str,
    (min, max): (f64, f64),
    map: &M,
) -> anyhow::Result<()> {
    let (lo, hi) = if max > min { (min, max) } else { (min - 0.5, min + 0.5) };
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(0)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..1.0, lo..hi)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(6)
        .y_desc(label)
        .label_style(("sans-serif", 11))
        .draw()?;

    let steps = 64;
    let h = (hi - lo) / steps as f64;
    chart.draw_series((0..steps).map(|i| {
        let bottom = lo + i as f64 * h;
        Rectangle::new(
            [(0.0, bottom), (1.0, bottom + h)],
            colormap_at(map, bottom + 0.5 * h, lo, hi).filled(),
        )
    }))?;
    Ok(())
}
