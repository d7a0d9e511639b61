//! Command-line behavior, driven through the built binary.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_colocated-images"))
}

fn fixtures() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/pattern")
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn gen_config_prints_stock_config() {
    let out = bin().arg("gen-config").output().unwrap();
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("pattern = \"**/*.md\""));
    assert!(text.contains("images_key = \"images\""));
}

#[test]
fn run_writes_manifest_file() {
    let tmp = TempDir::new().unwrap();
    let manifest = tmp.path().join("manifest.json");
    let out = bin()
        .args(["run", "--quiet", "--source"])
        .arg(fixtures())
        .arg("--output")
        .arg(&manifest)
        .output()
        .unwrap();
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let json = read_json(&manifest);
    assert_eq!(
        json["one/one.md"]["images"],
        serde_json::json!(["one/images/Toadle.gif", "one/images/Toadle.png"])
    );
    assert!(json["four/four.md"].get("images").is_none());
}

#[test]
fn run_applies_config_and_cli_overrides() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("images.toml");
    fs::write(&config, "images_key = \"gallery\"\n").unwrap();
    let manifest = tmp.path().join("manifest.json");

    let out = bin()
        .args(["run", "--quiet", "--ext", "gif", "--source"])
        .arg(fixtures())
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(&manifest)
        .output()
        .unwrap();
    assert!(out.status.success());

    let json = read_json(&manifest);
    assert_eq!(
        json["one/one.md"]["gallery"],
        serde_json::json!(["one/images/Toadle.gif"])
    );
    assert!(json["one/one.md"].get("images").is_none());
}

#[test]
fn run_reads_manifest_input_and_prints_to_stdout() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("in.json");
    fs::write(
        &input,
        r#"{ "post/a.md": { "title": "A" }, "post/images/x.png": {} }"#,
    )
    .unwrap();

    let out = bin()
        .args(["run", "--manifest"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["post/a.md"]["title"], "A");
    assert_eq!(json["post/a.md"]["images"], serde_json::json!(["post/images/x.png"]));
}

#[test]
fn missing_source_directory_fails() {
    let tmp = TempDir::new().unwrap();
    let out = bin()
        .args(["run", "--source"])
        .arg(tmp.path().join("nope"))
        .output()
        .unwrap();
    assert!(!out.status.success());
}
