use calc_tech::utils::validation::Validate;
use calc_tech::{BatchConfig, CalcEngine, LocalStorage};
use std::io::Read;
use tempfile::TempDir;

fn batch_toml(output: &str, extra: &str) -> String {
    format!(
        r#"
[batch]
name = "weekend-project"
description = "Patio slab and a few sanity checks"

[[requests]]
label = "patio"
calculator = "concrete"
shape = "slab"
length = 10
width = 10
thickness = 4

[[requests]]
label = "office lan"
calculator = "subnet"
ip = "10.1.2.3"
mask = "/22"

[[requests]]
label = "broken"
calculator = "triangle"
mode = "sss"
a = 1
b = 2
c = 10

[[requests]]
calculator = "convert"
value = 5
from = "km"
to = "mi"

[output]
path = "{output}"
{extra}
"#
    )
}

fn run_batch(toml: &str) -> (BatchConfig, calc_tech::Result<calc_tech::RunSummary>) {
    let config = BatchConfig::from_toml_str(toml).unwrap();
    config.validate().unwrap();
    let storage = LocalStorage::new(config.output_path().to_string());
    let engine = CalcEngine::new(storage, config.engine_options());
    let result = engine.run(&config.requests);
    (config, result)
}

#[test]
fn test_batch_writes_json_and_csv() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().to_string_lossy().into_owned();
    let toml = batch_toml(&output, r#"formats = ["json", "csv"]"#);

    let (_, result) = run_batch(&toml);
    let summary = result.unwrap();
    assert_eq!(summary.record_count, 3);
    assert_eq!(summary.failure_count, 1);

    let json = std::fs::read_to_string(temp_dir.path().join("results.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["records"][1]["label"], "office lan");
    assert_eq!(parsed["records"][1]["output"]["network"], "10.1.0.0");
    assert_eq!(parsed["records"][1]["output"]["usable_hosts"], 1022);
    assert_eq!(parsed["failures"][0]["label"], "broken");
    assert_eq!(parsed["failures"][0]["calculator"], "triangle");

    let csv = std::fs::read_to_string(temp_dir.path().join("results.csv")).unwrap();
    assert!(csv.starts_with("label,calculator,status,field,value\n"));
    assert!(csv.contains("office lan,subnet,ok,broadcast,10.1.3.255\n"));
    assert!(csv.contains("broken,triangle,error,error,"));
}

#[test]
fn test_batch_fail_mode_stops_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out").to_string_lossy().into_owned();
    let toml = batch_toml(&output, "") + "\n[error_handling]\non_calculation_error = \"fail\"\n";

    let (_, result) = run_batch(&toml);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("triangle"));
    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn test_batch_zip_bundle() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().to_string_lossy().into_owned();
    let toml = batch_toml(
        &output,
        "formats = [\"json\", \"csv\"]\ncompression = { enabled = true, filename = \"bundle.zip\" }",
    );

    let (_, result) = run_batch(&toml);
    assert_eq!(result.unwrap().files, vec!["bundle.zip"]);
    assert!(!temp_dir.path().join("results.json").exists());

    let zip_data = std::fs::read(temp_dir.path().join("bundle.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
    assert_eq!(archive.len(), 2);

    let mut csv = String::new();
    archive
        .by_name("results.csv")
        .unwrap()
        .read_to_string(&mut csv)
        .unwrap();
    assert!(csv.contains("patio,concrete,ok,"));
}

#[test]
fn test_batch_non_finite_numbers_are_failures() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().to_string_lossy().into_owned();
    let toml = format!(
        r#"
[batch]
name = "bad-numbers"

[[requests]]
label = "nan share"
calculator = "percentage"
mode = "of"
x = nan
y = 5

[[requests]]
label = "endless road"
calculator = "convert"
value = inf
from = "km"
to = "mi"

[output]
path = "{output}"
"#
    );

    let (_, result) = run_batch(&toml);
    let summary = result.unwrap();
    assert_eq!(summary.record_count, 0);
    assert_eq!(summary.failure_count, 2);

    let json = std::fs::read_to_string(temp_dir.path().join("results.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["failures"][0]["label"], "nan share");
    assert_eq!(parsed["failures"][1]["calculator"], "convert");
}
