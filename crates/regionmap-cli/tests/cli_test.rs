use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;

const FLEET: &str = r#"{
  "marker_groups": [
    {"label": "prod", "nodes": ["sjc", "fra", "zzz"], "style": "operational"},
    {"label": "staging", "nodes": [{"label": "Lab", "coordinates": [52.1, 5.2]}], "style": "inactive"}
  ]
}"#;

fn cli() -> Command {
    Command::new(assert_cmd::cargo_bin!("regionmap-cli"))
}

#[test]
fn normalize_reports_groups_and_failures() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("fleet.json");
    fs::write(&input, FLEET).expect("write input");

    let out = cli()
        .args(["normalize", input.to_string_lossy().as_ref()])
        .output()
        .expect("run");
    assert!(out.status.success());

    let json: Value = serde_json::from_slice(&out.stdout).expect("json");
    let groups = json["groups"].as_array().expect("groups");
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["nodes"].as_array().map(Vec::len), Some(2));
    assert_eq!(groups[0]["style"]["colour"], "#10b981");
    assert_eq!(groups[1]["nodes"][0]["label"], "Lab");

    let failures = json["failures"].as_array().expect("failures");
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["error"]["kind"], "unknown_region");
    assert_eq!(failures[0]["group_index"], 0);
    assert_eq!(failures[0]["node_index"], 2);
}

#[test]
fn normalize_reads_stdin_and_applies_config() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("map.yaml");
    fs::write(
        &config,
        "custom_regions:\n  zzz:\n    name: Zed\n    coordinates: [10.0, 20.0]\n",
    )
    .expect("write config");

    let out = cli()
        .args(["normalize", "--config", config.to_string_lossy().as_ref()])
        .write_stdin(FLEET)
        .output()
        .expect("run");
    assert!(out.status.success());

    let json: Value = serde_json::from_slice(&out.stdout).expect("json");
    assert_eq!(json["groups"][0]["nodes"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["groups"][0]["nodes"][2]["label"], "Zed");
    assert_eq!(json["failures"].as_array().map(Vec::len), Some(0));
}

#[test]
fn render_writes_svg_to_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("map.svg");

    cli()
        .args([
            "render",
            "--theme",
            "dark",
            "--layout",
            "side-by-side",
            "--visible",
            "prod",
            "--id",
            "my fleet",
            "--out",
            out.to_string_lossy().as_ref(),
            "-",
        ])
        .write_stdin(FLEET)
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<svg id=\"my-fleet\""));
    assert!(svg.contains("data-layout=\"side_by_side\""));
    assert!(svg.contains("legend-item hidden"));
    assert!(svg.contains("fill=\"#0f172a\""));
}

#[test]
fn render_without_regions_or_land() {
    cli()
        .args(["render", "--no-regions", "--no-land"])
        .write_stdin(FLEET)
        .assert()
        .success()
        .stdout(predicate::str::contains("<svg"))
        .stdout(predicate::str::contains("region-dot").not())
        .stdout(predicate::str::contains("<path").not());
}

#[test]
fn regions_lists_the_merged_catalog() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("map.json");
    fs::write(
        &config,
        r#"{"custom_regions": {"lab": {"name": "Home lab", "coordinates": [52.0, 5.0]}}}"#,
    )
    .expect("write config");

    let out = cli()
        .args(["regions", "--config", config.to_string_lossy().as_ref()])
        .output()
        .expect("run");
    assert!(out.status.success());

    let json: Value = serde_json::from_slice(&out.stdout).expect("json");
    let regions = json.as_array().expect("array");
    assert_eq!(regions[0]["code"], "ams");
    let last = regions.last().expect("last");
    assert_eq!(last["code"], "lab");
    assert_eq!(last["name"], "Home lab");
}

#[test]
fn bad_input_and_usage_fail() {
    cli()
        .args(["normalize"])
        .write_stdin("\"sjc\"")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("marker group"));

    cli()
        .args(["render", "--layout", "diagonal"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("USAGE"));
}
