use assert_cmd::Command;
use election_map::ElectionCatalog;
use election_map::model::ElectionLevel;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("election-map").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

fn write_collection(path: &Path) {
    let collection = json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {
                    "uik_num": 5,
                    "2013_mer_Собянин": 51.4,
                    "2013_mer_Навальный": 27.2,
                    "2013_mer_явка": 32.0
                },
                "geometry": null
            },
            {
                "type": "Feature",
                "properties": {
                    "uik_num": 6,
                    "2013_mer_Собянин": 30.0,
                    "2013_mer_Навальный": 45.5
                },
                "geometry": null
            }
        ]
    });
    fs::write(path, collection.to_string()).unwrap();
}

fn mayor_2013() -> [&'static str; 4] {
    ["--level", "mayor", "--year", "2013"]
}

#[test]
fn catalog_prints_builtin_elections() {
    cli()
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("2012_president_"))
        .stdout(predicate::str::contains("moscow_2016_duma_results.geojson"));
}

#[test]
fn style_writes_report() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("uiks.geojson");
    let output = dir.path().join("out/styles.json");
    write_collection(&input);

    cli()
        .arg("style")
        .arg(&output)
        .arg("--input")
        .arg(&input)
        .args(&mayor_2013())
        .args(&["--zoom", "14"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Styled"));

    let report: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let features = report["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0]["style"]["color"], "#333");
    assert_eq!(features[0]["style"]["fillColor"], "rgba(0,114,188,0.85)");
    assert_eq!(features[1]["advantage"]["winner"], "Навальный");
    assert_eq!(report["layers"]["precinct_fill"], true);
}

#[test]
fn style_reads_dataset_from_data_dir() {
    let dir = tempdir().unwrap();
    write_collection(&dir.path().join("united_uiks_with_final_2013_mer.geojson"));
    let output = dir.path().join("styles.json");

    cli()
        .arg("style")
        .arg(&output)
        .args(&mayor_2013())
        .args(&["--zoom", "13", "--mode", "turnout", "--data-dir"])
        .arg(dir.path())
        .assert()
        .success();

    let report: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report["features"][0]["style"]["fillColor"], "#a6d9b7");
    assert_eq!(report["features"][0]["style"]["fillOpacity"], 0.8);
}

#[test]
fn info_prints_breakdown() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("uiks.geojson");
    write_collection(&input);

    cli()
        .arg("info")
        .arg("--input")
        .arg(&input)
        .args(&mayor_2013())
        .args(&["--uik", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("УИК №5"))
        .stdout(predicate::str::contains("51.4%"));
}

#[test]
fn info_requires_a_selector() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("uiks.geojson");
    write_collection(&input);

    cli()
        .arg("info")
        .arg("--input")
        .arg(&input)
        .args(&mayor_2013())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Pass --uik or --name"));
}

#[test]
fn legend_lists_candidates() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("uiks.geojson");
    let output = dir.path().join("legend.json");
    write_collection(&input);

    cli()
        .arg("legend")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(&mayor_2013())
        .assert()
        .success()
        .stdout(predicate::str::contains("Собянин"));

    let report: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report["levels"]["Собянин"], 4);
    assert_eq!(report["levels"]["Навальный"], 4);
    assert_eq!(report["winners"], json!(["Навальный", "Собянин"]));
}

#[test]
fn unknown_level_is_rejected() {
    cli()
        .args(&["legend", "--level", "governor", "--year", "2013"])
        .assert()
        .failure();
}

#[test]
fn missing_input_fails() {
    let dir = tempdir().unwrap();
    cli()
        .arg("legend")
        .arg("--input")
        .arg(dir.path().join("nope.geojson"))
        .args(&mayor_2013())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not open"));
}

#[test]
fn sync_fingerprints_datasets() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("data");
    fs::create_dir(&data_dir).unwrap();
    fs::write(data_dir.join("districts_with_2013_mer.geojson"), "abc").unwrap();
    let catalog_path = dir.path().join("catalog.json");

    cli()
        .arg("sync")
        .arg(&catalog_path)
        .arg(&data_dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("missing"));

    let catalog = ElectionCatalog::load(&catalog_path).unwrap();
    let mayor = catalog.find(ElectionLevel::Mayor, 2013).unwrap();
    let district = mayor.datasets.district.as_ref().unwrap();
    assert_eq!(
        district.sha1.as_deref(),
        Some("a9993e364706816aba3e25717850c26c9cd0d89d")
    );
    assert_eq!(mayor.datasets.precinct.as_ref().unwrap().sha1, None);
}
