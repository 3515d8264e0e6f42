pub mod join;
pub mod melt;
pub mod prep;

use anyhow::Context;

/// A single named column. Nulls are represented as `None` so a column can
/// carry missing cells without a sentinel value.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Str(Vec<Option<String>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Int(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn null_count(&self) -> usize {
        match self {
            Column::Int(v) => v.iter().filter(|c| c.is_none()).count(),
            Column::Float(v) => v.iter().filter(|c| c.is_none()).count(),
            Column::Str(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }

    pub fn is_null(&self, row: usize) -> bool {
        match self {
            Column::Int(v) => v[row].is_none(),
            Column::Float(v) => v[row].is_none(),
            Column::Str(v) => v[row].is_none(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Int(_) | Column::Float(_))
    }

    /// Reindex the column by row positions, cloning the selected cells.
    pub fn take(&self, rows: &[usize]) -> Column {
        match self {
            Column::Int(v) => Column::Int(rows.iter().map(|&r| v[r]).collect()),
            Column::Float(v) => Column::Float(rows.iter().map(|&r| v[r]).collect()),
            Column::Str(v) => Column::Str(rows.iter().map(|&r| v[r].clone()).collect()),
        }
    }

    /// Render one cell for console output. Nulls print as `NaN` to match the
    /// tabular preview convention.
    pub fn format_cell(&self, row: usize) -> String {
        match self {
            Column::Int(v) => v[row].map_or_else(|| "NaN".to_string(), |x| x.to_string()),
            Column::Float(v) => v[row].map_or_else(|| "NaN".to_string(), |x| format!("{:.6}", x)),
            Column::Str(v) => v[row].clone().unwrap_or_else(|| "NaN".to_string()),
        }
    }
}

/// Column-oriented table with named, equal-length columns. This is the one
/// evolving value the pipeline threads through every stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    names: Vec<String>,
    cols: Vec<Column>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn n_rows(&self) -> usize {
        self.cols.first().map_or(0, Column::len)
    }

    pub fn n_cols(&self) -> usize {
        self.cols.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(self.cols.iter())
    }

    /// Append a column. Lengths must agree with the existing columns and the
    /// name must be unused.
    pub fn push(&mut self, name: impl Into<String>, col: Column) -> anyhow::Result<()> {
        let name = name.into();
        anyhow::ensure!(
            !self.names.contains(&name),
            "duplicate column name '{}'",
            name
        );
        anyhow::ensure!(
            self.cols.is_empty() || col.len() == self.n_rows(),
            "column '{}' has {} rows, frame has {}",
            name,
            col.len(),
            self.n_rows()
        );
        self.names.push(name);
        self.cols.push(col);
        Ok(())
    }

    fn index_of(&self, name: &str) -> anyhow::Result<usize> {
        self.names
            .iter()
            .position(|n| n == name)
            .with_context(|| format!("no column named '{}'", name))
    }

    pub fn column(&self, name: &str) -> anyhow::Result<&Column> {
        Ok(&self.cols[self.index_of(name)?])
    }

    /// Replace an existing column in place, keeping its position.
    pub fn replace(&mut self, name: &str, col: Column) -> anyhow::Result<()> {
        anyhow::ensure!(
            col.len() == self.n_rows(),
            "replacement for '{}' has {} rows, frame has {}",
            name,
            col.len(),
            self.n_rows()
        );
        let idx = self.index_of(name)?;
        self.cols[idx] = col;
        Ok(())
    }

    pub fn drop_column(&mut self, name: &str) -> anyhow::Result<Column> {
        let idx = self.index_of(name)?;
        self.names.remove(idx);
        Ok(self.cols.remove(idx))
    }

    pub fn rename(&mut self, from: &str, to: &str) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.names.iter().any(|n| n == to),
            "cannot rename '{}' to existing column '{}'",
            from,
            to
        );
        let idx = self.index_of(from)?;
        self.names[idx] = to.to_string();
        Ok(())
    }

    /// Project onto a subset of columns, in the given order.
    pub fn select(&self, names: &[&str]) -> anyhow::Result<Frame> {
        let mut out = Frame::new();
        for &name in names {
            out.push(name, self.column(name)?.clone())?;
        }
        Ok(out)
    }

    /// Keep rows where `keep` is true. The mask must cover every row.
    pub fn filter_rows(&self, keep: &[bool]) -> anyhow::Result<Frame> {
        anyhow::ensure!(
            keep.len() == self.n_rows(),
            "filter mask covers {} rows, frame has {}",
            keep.len(),
            self.n_rows()
        );
        let rows: Vec<usize> = (0..self.n_rows()).filter(|&r| keep[r]).collect();
        Ok(self.take_rows(&rows))
    }

    /// Reindex every column by row positions.
    pub fn take_rows(&self, rows: &[usize]) -> Frame {
        Frame {
            names: self.names.clone(),
            cols: self.cols.iter().map(|c| c.take(rows)).collect(),
        }
    }

    /// Numeric view of a column, nulls mapped to NaN. Errors on string columns.
    pub fn numeric_values(&self, name: &str) -> anyhow::Result<Vec<f64>> {
        match self.column(name)? {
            Column::Int(v) => Ok(v.iter().map(|c| c.map_or(f64::NAN, |x| x as f64)).collect()),
            Column::Float(v) => Ok(v.iter().map(|c| c.unwrap_or(f64::NAN)).collect()),
            Column::Str(_) => anyhow::bail!("column '{}' is not numeric", name),
        }
    }

    /// Cloned string view of a column. Errors on numeric columns.
    pub fn str_values(&self, name: &str) -> anyhow::Result<Vec<Option<String>>> {
        match self.column(name)? {
            Column::Str(v) => Ok(v.clone()),
            _ => anyhow::bail!("column '{}' is not a string column", name),
        }
    }

    pub fn numeric_names(&self) -> Vec<String> {
        self.columns()
            .filter(|(_, c)| c.is_numeric())
            .map(|(n, _)| n.to_string())
            .collect()
    }

    pub fn str_names(&self) -> Vec<String> {
        self.columns()
            .filter(|(_, c)| matches!(c, Column::Str(_)))
            .map(|(n, _)| n.to_string())
            .collect()
    }

    /// Parse a string column into integers in place. Every non-null cell must
    /// parse; nulls stay null.
    pub fn cast_str_to_int(&mut self, name: &str) -> anyhow::Result<()> {
        let parsed = match self.column(name)? {
            Column::Str(v) => {
                let mut out: Vec<Option<i64>> = Vec::with_capacity(v.len());
                for cell in v {
                    match cell {
                        Some(s) => {
                            let x = s.trim().parse::<i64>().with_context(|| {
                                format!("cannot cast '{}' in column '{}' to integer", s, name)
                            })?;
                            out.push(Some(x));
                        }
                        None => out.push(None),
                    }
                }
                Column::Int(out)
            }
            _ => anyhow::bail!("column '{}' is not a string column", name),
        };
        self.replace(name, parsed)
    }
}
