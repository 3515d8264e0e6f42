use crate::frame::{Column, Frame};

/// Wide-to-long reshape. Every column not named in `id_vars` is treated as a
/// numeric value column; its label goes into `var_name` and its cells into
/// `value_name`. Output is column-major: all rows of the first value column,
/// then the next, so id columns are tiled once per value column.
pub fn melt(
    frame: &Frame,
    id_vars: &[&str],
    var_name: &str,
    value_name: &str,
) -> anyhow::Result<Frame> {
    let value_names: Vec<&str> = frame
        .names()
        .iter()
        .map(String::as_str)
        .filter(|n| !id_vars.contains(n))
        .collect();

    let n_rows = frame.n_rows();
    let n_out = n_rows * value_names.len();

    let mut out = Frame::new();
    for &id in id_vars {
        let col = frame.column(id)?;
        let mut tiled: Vec<usize> = Vec::with_capacity(n_out);
        for _ in 0..value_names.len() {
            tiled.extend(0..n_rows);
        }
        out.push(id, col.take(&tiled))?;
    }

    let mut labels: Vec<Option<String>> = Vec::with_capacity(n_out);
    let mut values: Vec<Option<f64>> = Vec::with_capacity(n_out);
    for &name in &value_names {
        let col = frame.column(name)?;
        anyhow::ensure!(
            col.is_numeric(),
            "melt value column '{}' must be numeric",
            name
        );
        labels.extend(std::iter::repeat(Some(name.to_string())).take(n_rows));
        match col {
            Column::Int(v) => values.extend(v.iter().map(|c| c.map(|x| x as f64))),
            Column::Float(v) => values.extend(v.iter().copied()),
            Column::Str(_) => unreachable!(),
        }
    }
    out.push(var_name, Column::Str(labels))?;
    out.push(value_name, Column::Float(values))?;
    Ok(out)
}
