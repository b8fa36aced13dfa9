mod common;

use efd_cli::commands::{focus, load_root};
use tempfile::tempdir;

#[test]
fn focus_grid_marks_centre_point() {
    let td = tempdir().unwrap();
    let path = td.path().join("roll.efd");
    common::write_sample(&path);

    let root = load_root(path.to_str().unwrap()).unwrap();
    let grid = focus::grid(&root, 1, false).unwrap();

    assert_eq!(grid.lines().nth(2).unwrap(), "o . . . . # . . . . o");
    assert_eq!(grid.matches('#').count(), 1);
}

#[test]
fn focus_grid_inactive_frame() {
    let td = tempdir().unwrap();
    let path = td.path().join("roll.efd");
    common::write_sample(&path);

    let root = load_root(path.to_str().unwrap()).unwrap();
    let grid = focus::grid(&root, 2, false).unwrap();

    assert!(grid.chars().all(|c| c == '-' || c == ' ' || c == '\n'));
    assert_eq!(grid.matches('-').count(), 45);
}

#[test]
fn focus_grid_unknown_frame() {
    let td = tempdir().unwrap();
    let path = td.path().join("roll.efd");
    common::write_sample(&path);

    let root = load_root(path.to_str().unwrap()).unwrap();
    let err = focus::grid(&root, 9, false).unwrap_err();
    assert!(err.to_string().contains("Frame 9 not found"));
}
