use assert_cmd::Command;
use predicates::str::contains;
use std::path::PathBuf;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("flowctl").unwrap()
}

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/flow_snapshot.json")
}

#[test]
fn inspect_snapshot() {
    cmd()
        .arg("inspect")
        .arg(fixture())
        .assert()
        .success()
        .stdout(contains("nipyapi_test_flow"))
        .stdout(contains("Processors:     2"));
}

#[test]
fn convert_to_yaml_on_stdout() {
    cmd()
        .args(["convert", "--mode", "yaml"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(contains("snapshotMetadata:"));
}

#[test]
fn convert_to_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("flow.yaml");

    cmd()
        .args(["convert", "--mode", "yaml", "--output"])
        .arg(&output)
        .arg(fixture())
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("flowContents:"));
}

#[test]
fn convert_uses_config_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("flowkit.toml");
    let export_dir = temp_dir.path().join("exports");
    std::fs::create_dir(&export_dir).unwrap();
    std::fs::write(
        &config_path,
        format!(
            "[serde]\ndefault_mode = \"yaml\"\n\n[export]\ndirectory = \"{}\"\n",
            export_dir.display().to_string().replace('\\', "/")
        ),
    )
    .unwrap();

    cmd()
        .arg("--config")
        .arg(&config_path)
        .arg("convert")
        .arg(fixture())
        .assert()
        .success()
        .stdout(contains("Output saved to"));

    assert!(export_dir.join("flow_snapshot.yaml").exists());
}

#[test]
fn unsupported_mode_fails() {
    cmd()
        .args(["convert", "--mode", "xml"])
        .arg(fixture())
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unsupported serialization mode"));
}

#[test]
fn missing_input_fails() {
    cmd()
        .args(["inspect", "/definitely/not/here/flow.json"])
        .assert()
        .failure()
        .code(4);
}
