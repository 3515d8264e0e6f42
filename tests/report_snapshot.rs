use co2gdp::{report, Column, Frame};

fn preview_frame() -> Frame {
    let mut frame = Frame::new();
    frame
        .push(
            "Country",
            Column::Str(vec![
                Some("A".to_string()),
                Some("B".to_string()),
                Some("A".to_string()),
                Some("B".to_string()),
            ]),
        )
        .expect("push");
    frame
        .push("Year", Column::Int(vec![Some(2000), Some(2000), Some(2001), Some(2001)]))
        .expect("push");
    frame
        .push(
            "Value",
            Column::Float(vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
        )
        .expect("push");
    frame
        .push(
            "Double",
            Column::Float(vec![Some(2.0), Some(4.0), Some(6.0), Some(8.0)]),
        )
        .expect("push");
    frame
}

#[test]
fn head_preview_renders_fixed_width_rows() {
    let preview = report::head_preview(&preview_frame(), 3);
    insta::assert_snapshot!("head_preview", preview);
}

#[test]
fn null_counts_table_lists_every_column() {
    let mut frame = Frame::new();
    frame
        .push(
            "Country",
            Column::Str(vec![Some("A".to_string()), None, Some("B".to_string())]),
        )
        .expect("push");
    frame
        .push("Value", Column::Float(vec![Some(1.0), Some(2.0), None]))
        .expect("push");

    let table = report::null_counts_table(&frame);
    insta::assert_snapshot!("null_counts", table);
}

#[test]
fn describe_table_reports_quartiles_per_numeric_column() {
    let table = report::describe_table(&preview_frame()).expect("describe");
    let lines: Vec<&str> = table.lines().collect();
    // Header plus eight statistic rows.
    assert_eq!(lines.len(), 9);
    assert!(lines[0].contains("Year"));
    assert!(lines[0].contains("Double"));
    assert!(!lines[0].contains("Country"));
    assert!(lines[1].starts_with("count"));
    assert!(lines[1].contains("4.000000"));
    assert!(lines[2].starts_with("mean"));
    assert!(lines[2].contains("2000.500000"));
    assert!(lines[2].contains("2.500000"));
    assert!(lines[5].starts_with("25%"));
    assert!(lines[5].contains("1.750000"));
    assert!(lines[7].starts_with("75%"));
    assert!(lines[7].contains("3.250000"));
}

#[test]
fn correlation_table_has_unit_diagonal_and_symmetric_cells() {
    let table = report::correlation_table(&preview_frame()).expect("corr");
    let lines: Vec<&str> = table.lines().collect();
    // Header plus one row per numeric column.
    assert_eq!(lines.len(), 4);
    // Value and Double are exactly linearly related.
    assert!(lines[2].contains("1.0000"));
    assert!(lines[3].contains("1.0000"));
    assert!(!table.contains("Country"));
}
