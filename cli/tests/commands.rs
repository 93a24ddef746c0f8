//! End-to-end tests for the CLI commands against files on disk.

use fcfg_cli::commands::{self, CopyArgs, DiffArgs, ReconcileArgs};
use fcfg_cli::{AppError, Config};
use serde_json::json;
use std::path::PathBuf;

fn write_fixture(name: &str, value: serde_json::Value) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fcfg-cli-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, value.to_string()).unwrap();
    path
}

fn fixtures(prefix: &str) -> (PathBuf, PathBuf) {
    let a = write_fixture(
        &format!("{prefix}-a.json"),
        json!({
            "id": "p-1",
            "name": "Hutch A",
            "devices": [
                {"id": "1", "fc": "AT1L0", "fg": "SOLID", "state": "Planned", "ray_trace": 0, "stand": "S1"},
                {"id": "2", "fc": "IM1K0", "fg": "PPM", "nom_loc_z": "12.5"},
                {"id": "3", "fc": "MR1L0", "fg": "M1", "tc_part_no": "PN-1"}
            ]
        }),
    );
    let b = write_fixture(
        &format!("{prefix}-b.json"),
        json!([
            {"id": "9", "fc": "AT1L0", "fg": "SOLID", "state": "Installed", "ray_trace": 1, "stand": "S1"},
            {"id": "8", "fc": "MR1L0", "fg": "M1", "tc_part_no": "PN-1"},
            {"id": "7", "fc": "BT1L0", "fg": "", "nom_loc_x": ""}
        ]),
    );
    (a, b)
}

#[tokio::test]
async fn diff_reports_every_bucket() {
    let (a, b) = fixtures("diff");
    let report = commands::diff(
        DiffArgs {
            a,
            b,
            reconcile: ReconcileArgs::default(),
        },
        &Config::default(),
    )
    .await
    .unwrap();

    assert_eq!(report.project_a, "p-1");
    assert!(!report.same_project);
    assert_eq!(report.summary.new, 1);
    assert_eq!(report.summary.missing, 1);
    assert_eq!(report.summary.updated, 1);
    assert_eq!(report.summary.identical, 1);

    let fields: Vec<_> = report.diff.updated[0]
        .changes
        .iter()
        .map(|c| c.field.as_str())
        .collect();
    assert_eq!(fields, vec!["state", "ray_trace"]);
}

#[tokio::test]
async fn diff_json_shape() {
    let (a, b) = fixtures("shape");
    let value = commands::run(
        commands::Commands::Diff(DiffArgs {
            a,
            b,
            reconcile: ReconcileArgs::default(),
        }),
        &Config::default(),
    )
    .await
    .unwrap();

    assert_eq!(value["projectA"], "p-1");
    assert_eq!(value["summary"]["updated"], 1);
    assert_eq!(value["diff"]["new"][0]["fc"], "IM1K0");
    assert_eq!(value["diff"]["new"][0]["nom_loc_z"], 12.5);
    assert_eq!(value["diff"]["missing"][0]["fc"], "BT1L0");
}

#[tokio::test]
async fn copy_selected_fields() {
    let (a, b) = fixtures("copy");
    let report = commands::copy(
        CopyArgs {
            source: a,
            destination: b,
            fc: "AT1L0".into(),
            fg: "SOLID".into(),
            fields: vec!["ray_trace".into()],
            reconcile: ReconcileArgs::default(),
        },
        &Config::default(),
    )
    .await
    .unwrap();

    assert_eq!(report.request.fields, vec!["ray_trace"]);
    assert_eq!(report.device.id, "9");
    assert_eq!(report.device.ray_trace, Some(0));
    assert_eq!(report.device.state, "Installed");
}

#[tokio::test]
async fn copy_of_identical_device_is_not_found() {
    let (a, b) = fixtures("copy-identical");
    let err = commands::copy(
        CopyArgs {
            source: a,
            destination: b,
            fc: "MR1L0".into(),
            fg: "M1".into(),
            fields: vec!["tc_part_no".into()],
            reconcile: ReconcileArgs::default(),
        },
        &Config::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.exit_code(), 5);
}

#[tokio::test]
async fn duplicate_keys_fail_unless_last_wins() {
    let a = write_fixture(
        "dup-a.json",
        json!([
            {"id": "1", "fc": "A", "fg": "1", "stand": "S1"},
            {"id": "2", "fc": "A", "fg": "1", "stand": "S2"}
        ]),
    );
    let b = write_fixture("dup-b.json", json!([{"id": "3", "fc": "A", "fg": "1", "stand": "S2"}]));

    let err = commands::diff(
        DiffArgs {
            a: a.clone(),
            b: b.clone(),
            reconcile: ReconcileArgs::default(),
        },
        &Config::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.exit_code(), 2);

    let report = commands::diff(
        DiffArgs {
            a,
            b,
            reconcile: ReconcileArgs {
                duplicates: Some(commands::DuplicatesArg::LastWins),
                include_discussion: false,
            },
        },
        &Config::default(),
    )
    .await
    .unwrap();
    assert_eq!(report.summary.identical, 1);
}
