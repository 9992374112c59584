use e57::{Record, RecordDataType, RecordName, RecordValue};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::tempdir;

fn scan_split(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scan_split"))
        .args(args)
        .env("SCAN_SPLIT_CONFIG", "/nonexistent/scan_split_test_config")
        .output()
        .expect("failed to run scan_split")
}

#[test]
fn missing_argument_exits_with_one() {
    let out = scan_split(&[]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn extra_argument_exits_with_one() {
    let out = scan_split(&["a.e57", "b.e57"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn help_exits_with_zero() {
    let out = scan_split(&["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("--max-size"));
}

#[test]
fn missing_input_exits_with_one() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.e57");
    let out = scan_split(&[missing.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn unreadable_container_exits_with_one_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.e57");
    std::fs::write(&input, b"not a point cloud").unwrap();

    let out = scan_split(&[input.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn explicit_missing_settings_file_exits_with_one() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("site.e57");
    std::fs::write(&input, b"x").unwrap();
    let settings = dir.path().join("absent.toml");

    let out = scan_split(&["--config", settings.to_str().unwrap(), input.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
}

fn write_fixture(path: &Path, scans: &[(&str, usize)]) {
    let double = || RecordDataType::Double {
        min: None,
        max: None,
    };
    let prototype = vec![
        Record {
            name: RecordName::CartesianX,
            data_type: double(),
        },
        Record {
            name: RecordName::CartesianY,
            data_type: double(),
        },
        Record {
            name: RecordName::CartesianZ,
            data_type: double(),
        },
    ];

    let mut writer = e57::E57Writer::from_file(path, "{cli-fixture}").unwrap();
    for (i, (name, points)) in scans.iter().enumerate() {
        let mut scan = writer
            .add_pointcloud(&format!("{{cli-scan-{}}}", i), prototype.clone())
            .unwrap();
        scan.set_name(Some(name.to_string()));
        for p in 0..*points {
            scan.add_point(vec![
                RecordValue::Double(p as f64),
                RecordValue::Double(1.0),
                RecordValue::Double(2.0),
            ])
            .unwrap();
        }
        scan.finalize().unwrap();
    }
    writer.finalize().unwrap();
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn split_writes_outputs_and_exits_with_zero() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("site.e57");
    write_fixture(&input, &[("A", 10), ("B", 10), ("C", 10)]);
    let out_dir = dir.path().join("parts");
    std::fs::create_dir(&out_dir).unwrap();

    let out = scan_split(&[
        "--max-size",
        "25",
        "--bytes-per-point",
        "1",
        "--output-dir",
        out_dir.to_str().unwrap(),
        input.to_str().unwrap(),
    ]);

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(file_names(&out_dir), vec!["site_A-B.e57", "site_C.e57"]);
    assert_eq!(file_names(dir.path()), vec!["parts", "site.e57"]);
    assert!(String::from_utf8_lossy(&out.stdout).contains("Split Summary"));
}

#[test]
fn json_summary_lists_every_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("site.e57");
    write_fixture(&input, &[("A", 10), ("B", 10)]);

    let out = scan_split(&[
        "--json",
        "--max-size",
        "15",
        "--bytes-per-point",
        "1",
        input.to_str().unwrap(),
    ]);

    assert_eq!(out.status.code(), Some(0));
    let summary: Value = serde_json::from_slice(&out.stdout).unwrap();
    let outputs = summary["outputs"].as_array().unwrap();
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0]["written"], json!([0]));
    assert_eq!(outputs[1]["written"], json!([1]));
    assert!(dir.path().join("site_A.e57").exists());
    assert!(dir.path().join("site_B.e57").exists());
}

#[test]
fn dry_run_prints_the_plan_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("site.e57");
    write_fixture(&input, &[("A", 10), ("B", 10), ("C", 10)]);

    let out = scan_split(&[
        "--dry-run",
        "--json",
        "--max-size",
        "25",
        "--bytes-per-point",
        "1",
        input.to_str().unwrap(),
    ]);

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(file_names(dir.path()), vec!["site.e57"]);

    let report: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["plan"]["ceiling_bytes"], json!(25));
    assert_eq!(report["plan"]["batches"].as_array().unwrap().len(), 2);
    let paths: Vec<PathBuf> = serde_json::from_value(report["paths"].clone()).unwrap();
    assert_eq!(
        paths,
        vec![dir.path().join("site_A-B.e57"), dir.path().join("site_C.e57")]
    );
}
