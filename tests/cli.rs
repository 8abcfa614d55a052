//! Exit status and output of the `photo-events` binary.

mod common;

use common::{dir_names, write_jpeg_with_exif};
use predicates::prelude::*;
use std::process::{Command, Output};
use tempfile::TempDir;

fn photo_events(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_photo-events"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

#[test]
fn missing_root_exits_with_failure() {
    let output = photo_events(&["rename", "/nonexistent/photos/12345"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(predicate::str::contains("Root directory not found").eval(&stderr));
}

#[test]
fn failed_rename_exits_with_failure() {
    let temp = TempDir::new().unwrap();
    write_jpeg_with_exif(&temp.path().join("a-first/a.jpg"), "2020:07:15 09:00:00");
    write_jpeg_with_exif(&temp.path().join("b-second/b.jpg"), "2020:07:15 17:00:00");
    let root = temp.path().to_string_lossy().to_string();

    let output = photo_events(&["rename", &root, "--output", "minimal"]);

    assert!(!output.status.success());
    assert_eq!(dir_names(temp.path()), vec!["2020-07-15", "b-second"]);
}

#[test]
fn clean_dry_run_succeeds_and_lists_renames() {
    let temp = TempDir::new().unwrap();
    write_jpeg_with_exif(&temp.path().join("trip/a.jpg"), "2019:03:02 10:00:00");
    write_jpeg_with_exif(&temp.path().join("trip/b.jpg"), "2019:03:04 18:30:00");
    let root = temp.path().to_string_lossy().to_string();

    let output = photo_events(&["rename", &root, "--dry-run", "--output", "minimal"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = format!(
        "{} -> {}",
        temp.path().join("trip").display(),
        temp.path().join("2019-03-02__to__03-04").display()
    );
    assert!(predicate::str::contains(expected).eval(&stdout));
    assert_eq!(dir_names(temp.path()), vec!["trip"]);
}

#[test]
fn stats_on_a_file_root_exits_with_failure() {
    let temp = TempDir::new().unwrap();
    let photo = temp.path().join("a.jpg");
    write_jpeg_with_exif(&photo, "2020:07:15 09:00:00");
    let chart = temp.path().join("chart.png");

    let output = photo_events(&[
        "stats",
        &photo.to_string_lossy(),
        "--chart",
        &chart.to_string_lossy(),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(predicate::str::contains("Not a directory").eval(&stderr));
}
