use std::collections::HashMap;

use crate::frame::{Column, Frame};
use crate::math::stats;

/// Per-column null counts in column order.
pub fn null_counts(frame: &Frame) -> Vec<(String, usize)> {
    frame
        .columns()
        .map(|(n, c)| (n.to_string(), c.null_count()))
        .collect()
}

/// Drop every row containing at least one null, in any column.
pub fn drop_nulls(frame: &Frame) -> anyhow::Result<Frame> {
    let keep: Vec<bool> = (0..frame.n_rows())
        .map(|row| frame.columns().all(|(_, c)| !c.is_null(row)))
        .collect();
    frame.filter_rows(&keep)
}

/// Fill nulls in every numeric column with that column's median.
pub fn impute_numeric_median(frame: &mut Frame) -> anyhow::Result<()> {
    for name in frame.numeric_names() {
        if frame.column(&name)?.null_count() == 0 {
            continue;
        }
        let values = frame.numeric_values(&name)?;
        let present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if present.is_empty() {
            continue;
        }
        let median = stats::median(&present);
        let filled = Column::Float(
            values
                .iter()
                .map(|v| Some(if v.is_nan() { median } else { *v }))
                .collect(),
        );
        frame.replace(&name, filled)?;
    }
    Ok(())
}

/// Fill nulls in every string column with that column's most frequent value.
/// Ties resolve to the lexicographically smallest candidate.
pub fn impute_categorical_mode(frame: &mut Frame) -> anyhow::Result<()> {
    for name in frame.str_names() {
        if frame.column(&name)?.null_count() == 0 {
            continue;
        }
        let values = frame.str_values(&name)?;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for cell in values.iter().flatten() {
            *counts.entry(cell.as_str()).or_insert(0) += 1;
        }
        let Some(mode) = counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(s, _)| s.to_string())
        else {
            continue;
        };
        let filled = Column::Str(
            values
                .iter()
                .map(|cell| Some(cell.clone().unwrap_or_else(|| mode.clone())))
                .collect(),
        );
        frame.replace(&name, filled)?;
    }
    Ok(())
}

/// Min-max scaler fitted once over every numeric column of a frame, then
/// applied in a single transform. Each column maps linearly onto [0, 1]; a
/// constant column (max == min) maps to all zeros. Integer columns become
/// float on transform.
#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    params: Vec<(String, f64, f64)>,
}

impl MinMaxScaler {
    pub fn fit(frame: &Frame) -> anyhow::Result<Self> {
        let mut params = Vec::new();
        for name in frame.numeric_names() {
            let values = frame.numeric_values(&name)?;
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for &v in values.iter().filter(|v| !v.is_nan()) {
                min = min.min(v);
                max = max.max(v);
            }
            params.push((name, min, max));
        }
        Ok(Self { params })
    }

    pub fn transform(&self, frame: &mut Frame) -> anyhow::Result<()> {
        for (name, min, max) in &self.params {
            let range = max - min;
            let values = frame.numeric_values(name)?;
            let scaled = Column::Float(
                values
                    .iter()
                    .map(|&v| {
                        if v.is_nan() {
                            None
                        } else if range > 0.0 {
                            Some((v - min) / range)
                        } else {
                            Some(0.0)
                        }
                    })
                    .collect(),
            );
            frame.replace(name, scaled)?;
        }
        Ok(())
    }

    pub fn fit_transform(frame: &mut Frame) -> anyhow::Result<Self> {
        let scaler = Self::fit(frame)?;
        scaler.transform(frame)?;
        Ok(scaler)
    }
}

/// One-hot encoder over string columns. Categories are sorted, the first is
/// dropped as the reference category, and each remaining category becomes a
/// 0/1 float indicator named `{column}_{category}`. Encoded source columns
/// are removed from the frame.
#[derive(Debug, Clone, Default)]
pub struct OneHotEncoder {
    pub drop_first: bool,
}

impl OneHotEncoder {
    pub fn drop_first() -> Self {
        Self { drop_first: true }
    }

    /// Encode every string column except those in `exclude`. Returns the
    /// names of the indicator columns that were appended. Columns must be
    /// null-free; impute first.
    pub fn encode(&self, frame: &mut Frame, exclude: &[&str]) -> anyhow::Result<Vec<String>> {
        let targets: Vec<String> = frame
            .str_names()
            .into_iter()
            .filter(|n| !exclude.contains(&n.as_str()))
            .collect();

        let mut appended = Vec::new();
        for name in targets {
            let values = frame.str_values(&name)?;
            anyhow::ensure!(
                values.iter().all(Option::is_some),
                "cannot one-hot encode column '{}' with nulls",
                name
            );
            let mut categories: Vec<String> = values.iter().flatten().cloned().collect();
            categories.sort();
            categories.dedup();
            let skip = usize::from(self.drop_first);

            for category in categories.iter().skip(skip) {
                let indicator = Column::Float(
                    values
                        .iter()
                        .map(|cell| {
                            let hit = cell.as_deref() == Some(category.as_str());
                            Some(if hit { 1.0 } else { 0.0 })
                        })
                        .collect(),
                );
                let col_name = format!("{}_{}", name, category);
                frame.push(&col_name, indicator)?;
                appended.push(col_name);
            }
            frame.drop_column(&name)?;
        }
        Ok(appended)
    }
}
