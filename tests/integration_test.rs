use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

const SPEC: &str = r#"{
    "exePath": "vpxenc",
    "fullPath": "/in/clip.y4m",
    "NonVar": { "NoArg": { "good": null }, "Arg": {} },
    "Var": { "NoArg": { "preset": ["rt", "q"] }, "Arg": {}, "NoArgGrp": {}, "ArgGrp": {}, "MixGrp": {} }
}"#;

fn encsweep(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("encsweep").unwrap();
    // 사용자 설정 파일의 영향을 받지 않도록
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

fn write_spec(dir: &Path, content: &str) -> String {
    let path = dir.join("pa.json");
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

#[test]
fn test_cli_help() {
    let dir = tempfile::tempdir().unwrap();
    encsweep(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Expand an encoder parameter sweep"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    let dir = tempfile::tempdir().unwrap();
    encsweep(dir.path()).arg("--version").assert().success();
}

#[test]
fn test_missing_spec_file() {
    let dir = tempfile::tempdir().unwrap();
    encsweep(dir.path())
        .arg(dir.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.json"));
}

#[test]
fn test_dry_run_prints_commands() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), SPEC);

    encsweep(dir.path())
        .arg(&spec)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "vpxenc --good --rt /in/clip.y4m -o \"clip_rt.webm\" > \"clip_rt.txt\" 2>&1",
        ))
        .stdout(predicate::str::contains(
            "vpxenc --good --q /in/clip.y4m -o \"clip_q.webm\" > \"clip_q.txt\" 2>&1",
        ));
}

#[test]
fn test_list_mode() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), SPEC);

    encsweep(dir.path())
        .arg(&spec)
        .arg("--list")
        .assert()
        .success()
        .stdout("clip_rt\tvpxenc --good --rt /in/clip.y4m\nclip_q\tvpxenc --good --q /in/clip.y4m\n");
}

#[test]
fn test_json_mode() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), SPEC);

    let output = encsweep(dir.path())
        .arg(&spec)
        .arg("--json")
        .arg("--container")
        .arg("ivf")
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["tasks"].as_array().unwrap().len(), 2);
    assert_eq!(plan["tasks"][0]["output_path"], "clip_rt.ivf");
}

#[test]
fn test_malformed_group_fails() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(
        dir.path(),
        r#"{
            "exePath": "vpxenc",
            "fullPath": "/in/clip.y4m",
            "Var": { "NoArgGrp": { "a": ["x", "y"], "b": ["p", "q", "r"] } }
        }"#,
    );

    encsweep(dir.path())
        .arg(&spec)
        .arg("--dry-run")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Malformed specification"));
}

#[test]
fn test_runs_encodes_sequentially() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), SPEC);
    let out = dir.path().join("out");

    encsweep(dir.path())
        .arg(&spec)
        .arg("--exe")
        .arg("echo")
        .arg("--output-dir")
        .arg(&out)
        .arg("--yes")
        .assert()
        .success()
        .stderr(predicate::str::contains("Sweep complete!"))
        // stderr가 터미널이 아니어도 실행 중인 명령어는 보여야 함
        .stderr(predicate::str::contains("echo --good --rt /in/clip.y4m -o"));

    let log = fs::read_to_string(out.join("clip_rt.txt")).unwrap();
    assert!(log.contains("--good --rt /in/clip.y4m -o"));
    assert!(out.join("clip_q.txt").exists());
}

#[test]
fn test_failed_encodes_exit_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), SPEC);

    encsweep(dir.path())
        .arg(&spec)
        .arg("--exe")
        .arg("false")
        .arg("--output-dir")
        .arg(dir.path().join("out"))
        .arg("--yes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("0/2 succeeded"));
}

#[test]
fn test_large_sweep_without_terminal_asks_for_yes() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), SPEC);
    let config_dir = dir.path().join(".encsweep");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "confirm_threshold = 1\n").unwrap();

    encsweep(dir.path())
        .arg(&spec)
        .arg("--exe")
        .arg("echo")
        .arg("--output-dir")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no terminal is available"))
        .stderr(predicate::str::contains("--yes"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_init_config() {
    let dir = tempfile::tempdir().unwrap();

    encsweep(dir.path()).arg("--init-config").assert().success();

    let content = fs::read_to_string(dir.path().join(".encsweep").join("config.toml")).unwrap();
    assert!(content.contains("container_ext = \"webm\""));
}
