use crate::frame::{prep, Frame};
use crate::math::stats;

const NUM_WIDTH: usize = 14;

/// First `n` rows of every column, fixed-width, nulls shown as NaN.
pub fn head_preview(frame: &Frame, n: usize) -> String {
    let rows = n.min(frame.n_rows());
    let mut widths: Vec<usize> = frame.names().iter().map(String::len).collect();
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(rows);
    for row in 0..rows {
        let rendered: Vec<String> = frame.columns().map(|(_, c)| c.format_cell(row)).collect();
        for (i, cell) in rendered.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
        cells.push(rendered);
    }

    let mut out = String::new();
    let header: Vec<String> = frame
        .names()
        .iter()
        .enumerate()
        .map(|(i, n)| format!("{:>w$}", n, w = widths[i]))
        .collect();
    out.push_str(&header.join("  "));
    for rendered in &cells {
        out.push('\n');
        let line: Vec<String> = rendered
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:>w$}", c, w = widths[i]))
            .collect();
        out.push_str(&line.join("  "));
    }
    out
}

/// Null count per column, one line each, pandas `isnull().sum()` style.
pub fn null_counts_table(frame: &Frame) -> String {
    let counts = prep::null_counts(frame);
    let width = counts.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
    counts
        .iter()
        .map(|(name, count)| format!("{:<w$}  {}", name, count, w = width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Summary statistics for every numeric column: count, mean, std, min,
/// quartiles, max. NaN cells are excluded per column before computing.
pub fn describe_table(frame: &Frame) -> anyhow::Result<String> {
    let names = frame.numeric_names();
    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(names.len());
    for name in &names {
        let values = frame.numeric_values(name)?;
        columns.push(values.into_iter().filter(|v| !v.is_nan()).collect());
    }

    let stat_rows: [(&str, fn(&[f64]) -> f64); 8] = [
        ("count", |xs| xs.len() as f64),
        ("mean", stats::mean),
        ("std", stats::std_dev),
        ("min", |xs| xs.iter().copied().fold(f64::INFINITY, f64::min)),
        ("25%", |xs| stats::quantile(xs, 0.25)),
        ("50%", |xs| stats::quantile(xs, 0.50)),
        ("75%", |xs| stats::quantile(xs, 0.75)),
        ("max", |xs| xs.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
    ];

    let label_width = 5;
    let mut out = String::new();
    out.push_str(&" ".repeat(label_width));
    for name in &names {
        out.push_str(&format!("  {:>w$}", name, w = NUM_WIDTH));
    }
    for (label, f) in stat_rows {
        out.push('\n');
        out.push_str(&format!("{:<w$}", label, w = label_width));
        for col in &columns {
            out.push_str(&format!("  {:>w$.6}", f(col), w = NUM_WIDTH));
        }
    }
    Ok(out)
}

/// Pearson correlation matrix over the numeric columns, four decimals.
pub fn correlation_table(frame: &Frame) -> anyhow::Result<String> {
    let names = frame.numeric_names();
    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(names.len());
    for name in &names {
        columns.push(frame.numeric_values(name)?);
    }
    let corr = stats::correlation_matrix(&columns);

    let label_width = names.iter().map(String::len).max().unwrap_or(0);
    let mut out = String::new();
    out.push_str(&" ".repeat(label_width));
    for name in &names {
        out.push_str(&format!("  {:>w$}", name, w = NUM_WIDTH));
    }
    for (i, name) in names.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("{:<w$}", name, w = label_width));
        for j in 0..names.len() {
            out.push_str(&format!("  {:>w$.4}", corr[i][j], w = NUM_WIDTH));
        }
    }
    Ok(out)
}
