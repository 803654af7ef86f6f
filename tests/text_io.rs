//! Integration tests for loading and saving matrices as text.

use std::io::Cursor;

use redeem_matrix::{Mat, MatError, TextFormat};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn load_places_rows_column_major() -> anyhow::Result<()> {
    init_logger();
    let mut m = Mat::new();
    assert!(m.load_from(Cursor::new("1 2\n3 4\nInf nan\n"))?);
    assert_eq!(m.shape(), (3, 2));
    assert_eq!(m[(0, 1)], 2.0);
    assert_eq!(m[(2, 0)], f64::INFINITY);
    assert!(m[(2, 1)].is_nan());
    assert_eq!(&m.as_slice()[..4], &[1.0, 3.0, f64::INFINITY, 2.0]);
    Ok(())
}

#[test]
fn blank_lines_and_extra_whitespace_are_ignored() -> anyhow::Result<()> {
    let mut m = Mat::new();
    assert!(m.load_from(Cursor::new("\n  1\t-2.5e1  \n\n-inf   3\n\n"))?);
    assert_eq!(m, Mat::from_row_major(2, 2, vec![1.0, -25.0, f64::NEG_INFINITY, 3.0])?);
    Ok(())
}

#[test]
fn empty_input_resets_and_reports_false() -> anyhow::Result<()> {
    let mut m = Mat::ones(2, 2);
    assert!(!m.load_from(Cursor::new(""))?);
    assert!(m.is_empty());

    let mut m = Mat::ones(2, 2);
    assert!(!m.load_from(Cursor::new("\n \n\t\n"))?);
    assert!(m.is_empty());
    Ok(())
}

#[test]
fn ragged_rows_fail() {
    let mut m = Mat::ones(1, 1);
    let err = m.load_from(Cursor::new("1 2 3\n4 5\n")).unwrap_err();
    assert!(matches!(
        err,
        MatError::RaggedInput {
            line: 2,
            expected: 3,
            found: 2
        }
    ));
    assert!(m.is_empty());
}

#[test]
fn unknown_tokens_fail() {
    let mut m = Mat::new();
    let err = m.load_from(Cursor::new("1 2\n3 Infinity\n")).unwrap_err();
    match err {
        MatError::Parse { line, token } => {
            assert_eq!(line, 2);
            assert_eq!(token, "Infinity");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!m.quiet_load_from(Cursor::new("x")));
}

// ---------------------------------------------------------------------------
// Saving
// ---------------------------------------------------------------------------

#[test]
fn save_writes_one_row_per_line() -> anyhow::Result<()> {
    let m = Mat::from_row_major(2, 2, vec![1.0, -0.5, f64::NAN, 1e-7])?;
    let mut out = Vec::new();
    m.save_to(&mut out)?;
    let text = String::from_utf8(out)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].len(), 60);
    assert_eq!(lines[0].split_whitespace().collect::<Vec<_>>(), vec!["1.0000000000000000e+00", "-5.0000000000000000e-01"]);
    assert_eq!(lines[1].split_whitespace().collect::<Vec<_>>(), vec!["NaN", "1.0000000000000000e-07"]);
    Ok(())
}

#[test]
fn custom_text_format() -> anyhow::Result<()> {
    let m = Mat::row_vec(vec![3.25]);
    let mut out = Vec::new();
    m.save_to_with(&mut out, &TextFormat { width: 12, precision: 3 })?;
    assert_eq!(String::from_utf8(out)?, "   3.250e+00\n");
    Ok(())
}

#[test]
fn save_then_load_is_exact() -> anyhow::Result<()> {
    init_logger();
    let values = vec![
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NAN,
        0.1,
        -1.0 / 3.0,
        6.02214076e23,
        f64::MIN_POSITIVE,
        f64::MAX,
    ];
    let original = Mat::from_col_major(4, 2, values)?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("matrix.txt");
    original.save(&path)?;

    let mut loaded = Mat::new();
    assert!(loaded.load(&path)?);
    assert_eq!(loaded.shape(), original.shape());
    for (a, b) in original.as_slice().iter().zip(loaded.as_slice()) {
        assert!(a == b || (a.is_nan() && b.is_nan()), "{a} != {b}");
    }
    Ok(())
}

#[test]
fn file_errors_name_the_path() {
    let mut m = Mat::new();
    let err = m.load("/nonexistent/dir/matrix.txt").unwrap_err();
    assert!(matches!(err, MatError::File { .. }));
    assert!(err.to_string().contains("matrix.txt"));

    assert!(!m.quiet_load("/nonexistent/dir/matrix.txt"));
    assert!(!Mat::ones(1, 1).quiet_save("/nonexistent/dir/matrix.txt"));
}

#[test]
fn quiet_save_to_stream() {
    let mut out = Vec::new();
    assert!(Mat::ones(1, 2).quiet_save_to(&mut out));
    assert_eq!(out.iter().filter(|&&b| b == b'\n').count(), 1);
}

// ---------------------------------------------------------------------------
// Printing
// ---------------------------------------------------------------------------

#[test]
fn print_writes_header_before_matrix() -> anyhow::Result<()> {
    let m = Mat::row_vec(vec![0.5, f64::INFINITY]);
    let mut out = Vec::new();
    m.print_to(&mut out, "weights:")?;
    let text = String::from_utf8(out)?;
    assert!(text.starts_with("weights:\n(1, 2)-matrix: [\n"));
    assert_eq!(text, format!("weights:\n{}\n", m));

    let mut out = Vec::new();
    m.print_to(&mut out, "")?;
    assert!(String::from_utf8(out)?.starts_with("(1, 2)-matrix"));
    Ok(())
}

#[test]
fn raw_print_keeps_full_precision() -> anyhow::Result<()> {
    let m = Mat::from_row_major(2, 2, vec![0.1, -2.0, f64::NEG_INFINITY, 1.0 / 3.0])?;
    let mut out = Vec::new();
    m.raw_print_to(&mut out, "raw")?;
    assert_eq!(
        String::from_utf8(out)?,
        "raw\n(2, 2)-matrix: [\n 0.1 -2\n -Inf 0.3333333333333333\n]\n"
    );
    Ok(())
}
