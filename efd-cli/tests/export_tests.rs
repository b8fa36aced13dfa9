mod common;

use efd_cli::commands::export::{self, ExportRow};
use efd_cli::{DecodeOptions, ExportFormat};
use std::fs;
use tempfile::tempdir;

#[test]
fn export_json_one_object_per_frame() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("roll.efd");
    let out_path = td.path().join("roll.json");
    common::write_sample(&in_path);

    export::execute(
        in_path.to_str().unwrap(),
        out_path.to_str().unwrap(),
        ExportFormat::Json,
        &DecodeOptions::default(),
    )
    .unwrap();

    let rows: Vec<ExportRow> =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].film_id, "07-021");
    assert_eq!(rows[0].frame, 1);
    assert_eq!(rows[0].tv, "1/250");
    assert_eq!(rows[0].thumbnail, "C:\\EOS\\01.JPG");
    assert_eq!(rows[0].remarks, "first, \"best\"");
    assert!(rows[1].focus_points.starts_with("    - - -"));
}

#[test]
fn export_csv_quotes_fields() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("roll.efd");
    let out_path = td.path().join("roll.csv");
    common::write_sample(&in_path);

    export::execute(
        in_path.to_str().unwrap(),
        out_path.to_str().unwrap(),
        ExportFormat::Csv,
        &DecodeOptions::default(),
    )
    .unwrap();

    let text = fs::read_to_string(&out_path).unwrap();
    assert!(text.starts_with("film_id,roll_title,roll_loaded,frame,"));
    assert!(text.contains("\"Tri-X, Lisbon\""));
    assert!(text.contains("\"first, \"\"best\"\"\""));
}

#[test]
fn strict_export_fails_on_unknown_code() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("odd.efd");
    let out_path = td.path().join("odd.json");

    let mut data = common::efdf("odd");
    let mut frame = common::efrm(1, [0; 8], 0, "");
    // shutter code 17 is not in the table
    frame[16 + 12..16 + 16].copy_from_slice(&17u32.to_le_bytes());
    data.extend(frame);
    fs::write(&in_path, data).unwrap();

    let strict = DecodeOptions {
        strict: true,
        tables: None,
    };
    assert!(export::execute(
        in_path.to_str().unwrap(),
        out_path.to_str().unwrap(),
        ExportFormat::Json,
        &strict,
    )
    .is_err());

    export::execute(
        in_path.to_str().unwrap(),
        out_path.to_str().unwrap(),
        ExportFormat::Json,
        &DecodeOptions::default(),
    )
    .unwrap();
    let rows: Vec<ExportRow> =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(rows[0].tv, "17");
}
