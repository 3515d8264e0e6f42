use std::collections::HashMap;

use crate::frame::{Column, Frame};

/// One component of a join key. Float columns are rejected as keys since NaN
/// equality would be ambiguous.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum KeyPart {
    Int(i64),
    Str(String),
}

fn key_at(col: &Column, name: &str, row: usize) -> anyhow::Result<Option<KeyPart>> {
    match col {
        Column::Int(v) => Ok(v[row].map(KeyPart::Int)),
        Column::Str(v) => Ok(v[row].clone().map(KeyPart::Str)),
        Column::Float(_) => anyhow::bail!("float column '{}' cannot be a join key", name),
    }
}

fn key_tuple(frame: &Frame, keys: &[&str], row: usize) -> anyhow::Result<Option<Vec<KeyPart>>> {
    let mut tuple = Vec::with_capacity(keys.len());
    for &name in keys {
        match key_at(frame.column(name)?, name, row)? {
            Some(part) => tuple.push(part),
            // A null anywhere in the key tuple never matches.
            None => return Ok(None),
        }
    }
    Ok(Some(tuple))
}

/// Inner join on a key tuple. Output rows follow the left frame's order; for
/// each left row, matching right rows are emitted in their own row order.
/// Output columns are the left columns followed by the right non-key columns.
pub fn inner_join(left: &Frame, right: &Frame, keys: &[&str]) -> anyhow::Result<Frame> {
    let mut right_map: HashMap<Vec<KeyPart>, Vec<usize>> = HashMap::new();
    for row in 0..right.n_rows() {
        if let Some(tuple) = key_tuple(right, keys, row)? {
            right_map.entry(tuple).or_default().push(row);
        }
    }

    let mut left_rows: Vec<usize> = Vec::new();
    let mut right_rows: Vec<usize> = Vec::new();
    for row in 0..left.n_rows() {
        let Some(tuple) = key_tuple(left, keys, row)? else {
            continue;
        };
        if let Some(matches) = right_map.get(&tuple) {
            for &r in matches {
                left_rows.push(row);
                right_rows.push(r);
            }
        }
    }

    let mut out = left.take_rows(&left_rows);
    for (name, col) in right.columns() {
        if keys.contains(&name) {
            continue;
        }
        out.push(name, col.take(&right_rows))?;
    }
    Ok(out)
}
