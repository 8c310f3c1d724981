use std::io::Write;

use iar_ingest::{IngestError, IngestOptions, RowSource, extract_row};

fn legacy_line(name: &str, dept: &str) -> String {
    let mut cells = vec![String::new(); 51];
    cells[0] = "ignored".to_string();
    cells[2] = dept.to_string();
    cells[9] = name.to_string();
    cells.join(",")
}

fn banner(rows: usize) -> String {
    (0..rows).map(|idx| format!("banner {idx}\n")).collect()
}

#[test]
fn skips_banner_rows() {
    let contents = format!(
        "{}{}\n{}\n",
        banner(6),
        legacy_line("Printer Inventory", "Foo"),
        legacy_line("Payroll", "Bar")
    );
    let rows: Vec<_> = RowSource::new(contents.as_bytes(), &IngestOptions::default())
        .collect::<Result<_, _>>()
        .expect("read rows");
    assert_eq!(rows.len(), 2);
    let fields = extract_row(&rows[0], 1, 0).expect("extract");
    assert_eq!(fields.name, "Printer Inventory");
    assert_eq!(fields.faculty_dept_inst, "Foo");
}

#[test]
fn banner_rows_may_have_any_width() {
    let contents = format!("a\nb,c,d\n{}\n", legacy_line("Solo", "Baz"));
    let options = IngestOptions {
        skip_rows: 2,
        ..IngestOptions::default()
    };
    let rows: Vec<_> = RowSource::new(contents.as_bytes(), &options)
        .collect::<Result<_, _>>()
        .expect("read rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 51);
}

#[test]
fn short_input_yields_no_rows() {
    let mut rows = RowSource::new("only\ntwo\n".as_bytes(), &IngestOptions::default());
    assert!(rows.next().is_none());
}

#[test]
fn quoted_cells_keep_delimiters() {
    let mut cells = vec![String::new(); 51];
    cells[9] = "\"Staff, students\"".to_string();
    let contents = cells.join(",");
    let options = IngestOptions {
        skip_rows: 0,
        ..IngestOptions::default()
    };
    let rows: Vec<_> = RowSource::new(contents.as_bytes(), &options)
        .collect::<Result<_, _>>()
        .expect("read rows");
    let fields = extract_row(&rows[0], 1, 0).expect("extract");
    assert_eq!(fields.name, "Staff, students");
}

#[test]
fn opens_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "{}{}", banner(6), legacy_line("Disk", "Qux")).expect("write");
    let rows: Vec<_> = RowSource::open(file.path(), &IngestOptions::default())
        .expect("open")
        .collect::<Result<_, _>>()
        .expect("read rows");
    assert_eq!(rows.len(), 1);
}

#[test]
fn missing_file_reports_path() {
    let err = RowSource::open(
        std::path::Path::new("/nonexistent/register.csv"),
        &IngestOptions::default(),
    )
    .err()
    .expect("open should fail");
    assert!(matches!(err, IngestError::Open { .. }));
    assert!(err.to_string().contains("/nonexistent/register.csv"));
}

fn unframed() -> IngestOptions {
    IngestOptions {
        skip_rows: 3,
        skip_cols: 0,
        ..IngestOptions::default()
    }
}

#[test]
fn blank_lines_count_as_rows() {
    let contents = "banner0\n\nbanner2\nrowA\n\nrowC\n";
    let rows: Vec<_> = RowSource::new(contents.as_bytes(), &unframed())
        .collect::<Result<_, _>>()
        .expect("read rows");
    assert_eq!(
        rows,
        vec![vec!["rowA".to_string()], vec![], vec!["rowC".to_string()]]
    );
}

#[test]
fn blank_lines_count_with_crlf_endings() {
    let contents = "banner0\r\n\r\nbanner2\r\nrowA\r\n\r\nrowC\r\n";
    let rows: Vec<_> = RowSource::new(contents.as_bytes(), &unframed())
        .collect::<Result<_, _>>()
        .expect("read rows");
    assert_eq!(
        rows,
        vec![vec!["rowA".to_string()], vec![], vec!["rowC".to_string()]]
    );
}

#[test]
fn blank_data_line_is_a_malformed_row() {
    let contents = format!(
        "{}{}\n\n{}\n",
        banner(6),
        legacy_line("First", "Foo"),
        legacy_line("Third", "Foo")
    );
    let rows: Vec<_> = RowSource::new(contents.as_bytes(), &IngestOptions::default())
        .collect::<Result<_, _>>()
        .expect("read rows");
    assert_eq!(rows.len(), 3);
    assert!(extract_row(&rows[0], 1, 0).is_ok());
    let err = extract_row(&rows[1], 1, 1).expect_err("blank row");
    assert!(matches!(err, IngestError::MalformedRow { row: 1, found: 0, .. }));
}

#[test]
fn quoted_newlines_stay_in_one_row() {
    let contents = "banner\n\"first\nsecond\",x\n\nlast\n";
    let options = IngestOptions {
        skip_rows: 1,
        skip_cols: 0,
        ..IngestOptions::default()
    };
    let rows: Vec<_> = RowSource::new(contents.as_bytes(), &options)
        .collect::<Result<_, _>>()
        .expect("read rows");
    assert_eq!(
        rows,
        vec![
            vec!["first\nsecond".to_string(), "x".to_string()],
            vec![],
            vec!["last".to_string()],
        ]
    );
}
