//! Integration tests for the tars-config CLI.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

const VALID: &str = "\
[CHAR]
character_card_path = character/TARS.json

[LLM]
llm_backend = ooba
base_url = http://127.0.0.1:5000
api_key = sk-never-print-me

[TTS]
ttsoption = xttsv2   # server voice

[DISCORD]
enabled = yes
token = discord-token-never-print-me
channel_id = 123456789012345678
";

/// Helper to run tars-config with arguments and return (stdout, stderr, exit_code).
fn run(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_tars-config"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run tars-config");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

/// Helper to write a config file into a fresh temp directory.
fn write_config(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.ini");
    fs::write(&path, content).expect("Failed to write config");
    (dir, path)
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp path is UTF-8")
}

#[test]
fn test_check_valid_config() {
    let (_dir, path) = write_config(VALID);
    let (_stdout, stderr, exit_code) = run(&["check", "-c", path_arg(&path)]);

    assert_eq!(exit_code, 0, "Valid config should pass: {}", stderr);
    assert!(stderr.contains("Configuration is valid."), "{}", stderr);
}

#[test]
fn test_check_quiet() {
    let (_dir, path) = write_config(VALID);
    let (_stdout, stderr, exit_code) = run(&["check", "-q", "-c", path_arg(&path)]);

    assert_eq!(exit_code, 0);
    assert!(stderr.is_empty(), "Quiet mode should print nothing: {}", stderr);
}

#[test]
fn test_check_reports_all_errors() {
    let (_dir, path) = write_config("[LLM]\nllm_backend = kobold\nbase_url = http://localhost:5000\n");
    let (_stdout, stderr, exit_code) = run(&["check", "-c", path_arg(&path)]);

    assert_eq!(exit_code, 1, "Invalid config should fail");
    assert!(stderr.contains("[CHAR] character_card_path: required field is missing"), "{}", stderr);
    assert!(stderr.contains("[LLM] llm_backend: 'kobold' is not one of [openai, ooba, tabby]"), "{}", stderr);
    assert!(stderr.contains("[TTS] ttsoption: required field is missing"), "{}", stderr);
    assert!(stderr.contains("3 error(s)"), "{}", stderr);
}

#[test]
fn test_check_type_errors() {
    let content = VALID.replace("enabled = yes", "enabled = maybe") + "[STT]\nuse_server = sometimes\n";
    let (_dir, path) = write_config(&content);
    let (_stdout, stderr, exit_code) = run(&["check", "-c", path_arg(&path)]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("[STT] use_server: expected boolean, got 'sometimes'"), "{}", stderr);
    assert!(stderr.contains("[DISCORD] enabled: expected boolean, got 'maybe'"), "{}", stderr);
    assert!(stderr.contains("2 error(s)"), "{}", stderr);
}

#[test]
fn test_check_unknown_key_is_warning() {
    let content = format!("{}\n[SERVO]\nlaser_eyes = on\n", VALID);
    let (_dir, path) = write_config(&content);
    let (_stdout, stderr, exit_code) = run(&["check", "-c", path_arg(&path)]);

    assert_eq!(exit_code, 0, "Unknown keys must not fail: {}", stderr);
    assert!(stderr.contains("[SERVO] laser_eyes"), "{}", stderr);
    assert!(stderr.contains("1 warning(s)"), "{}", stderr);
}

#[test]
fn test_check_syntax_errors() {
    let (_dir, path) = write_config("orphan = 1\n[STT\n");
    let (_stdout, stderr, exit_code) = run(&["check", "-c", path_arg(&path)]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("line 1:"), "{}", stderr);
    assert!(stderr.contains("line 2:"), "{}", stderr);
}

#[test]
fn test_check_syntax_error_hides_line_content() {
    let content = format!("{}token  MTIzNDU2-hunter2-secret\n", VALID);
    let (_dir, path) = write_config(&content);
    let (stdout, stderr, exit_code) = run(&["check", "--debug", "-c", path_arg(&path)]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("line 16: expected 'key = value'"), "{}", stderr);
    assert!(!stderr.contains("hunter2"), "Secret leaked: {}", stderr);
    assert!(!stdout.contains("hunter2"), "Secret leaked: {}", stdout);
}

#[test]
fn test_check_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.ini");
    let (_stdout, stderr, exit_code) = run(&["check", "-c", path_arg(&path)]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("failed to read config file"), "{}", stderr);
    assert!(!path.exists(), "check must not create the file");
}

#[test]
fn test_show_redacts_secrets() {
    let (_dir, path) = write_config(VALID);
    let (stdout, stderr, exit_code) = run(&["show", "-c", path_arg(&path)]);

    assert_eq!(exit_code, 0, "{}", stderr);
    assert!(stdout.contains("[TTS]\n"), "{}", stdout);
    assert!(stdout.contains("ttsoption = xttsv2\n"), "{}", stdout);
    assert!(stdout.contains("token = [REDACTED]"), "{}", stdout);
    assert!(stdout.contains("wake_word = hey tars  # default"), "{}", stdout);
    assert!(!stdout.contains("never-print-me"), "Secret leaked: {}", stdout);
    assert!(!stderr.contains("never-print-me"), "Secret leaked: {}", stderr);
}

#[test]
fn test_show_json() {
    let (_dir, path) = write_config(VALID);
    let (stdout, _stderr, exit_code) = run(&["show", "--json", "-c", path_arg(&path)]);

    assert_eq!(exit_code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("show --json prints JSON");
    assert_eq!(json["LLM"]["llm_backend"], "ooba");
    assert_eq!(json["LLM"]["api_key"], "[REDACTED]");
    assert_eq!(json["STT"]["use_server"], false);
    assert_eq!(json["DISCORD"]["channel_id"], 123456789012345678_i64);
    assert!(!stdout.contains("never-print-me"));
}

#[test]
fn test_secret_not_echoed_in_errors() {
    let content = VALID.replace("enabled = yes", "enabled = yes\nchannel_id = -1")
        .replace("channel_id = 123456789012345678\n", "");
    let (_dir, path) = write_config(&content);
    let (_stdout, stderr, exit_code) = run(&["check", "--debug", "-c", path_arg(&path)]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("[DISCORD] channel_id: '-1' is out of range"), "{}", stderr);
    assert!(!stderr.contains("never-print-me"), "Secret leaked: {}", stderr);
}

#[test]
fn test_init_creates_loadable_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tars").join("config.ini");

    let (_stdout, stderr, exit_code) = run(&["init", "-p", path_arg(&path)]);
    assert_eq!(exit_code, 0, "{}", stderr);
    assert!(stderr.contains("Configuration file created at:"));
    assert!(path.exists());

    let (_stdout, stderr, exit_code) = run(&["check", "-c", path_arg(&path)]);
    assert_eq!(exit_code, 0, "Generated template should be valid: {}", stderr);
}

#[test]
fn test_init_does_not_overwrite() {
    let (_dir, path) = write_config(VALID);

    let (_stdout, stderr, exit_code) = run(&["init", "-p", path_arg(&path)]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("already exists"), "{}", stderr);
    assert_eq!(fs::read_to_string(&path).unwrap(), VALID);

    let (_stdout, _stderr, exit_code) = run(&["init", "--force", "-p", path_arg(&path)]);
    assert_eq!(exit_code, 0);
    assert_ne!(fs::read_to_string(&path).unwrap(), VALID);
}

#[test]
fn test_schema_lists_fields() {
    let (stdout, _stderr, exit_code) = run(&["schema"]);

    assert_eq!(exit_code, 0);
    for section in ["[STT]", "[CHAR]", "[LLM]", "[VISION]", "[TTS]", "[SERVO]", "[DISCORD]"] {
        assert!(stdout.contains(section), "missing {}: {}", section, stdout);
    }
    assert!(stdout.contains("enum(azure|local|alltalk|piper|xttsv2)"));
}

#[test]
fn test_log_dir_receives_log_file() {
    let (_dir, path) = write_config(VALID);
    let logs = tempfile::tempdir().unwrap();
    let (_stdout, stderr, exit_code) = run(&[
        "check",
        "--debug",
        "--log-dir",
        path_arg(logs.path()),
        "-c",
        path_arg(&path),
    ]);

    assert_eq!(exit_code, 0, "{}", stderr);
    let entries: Vec<_> = fs::read_dir(logs.path()).unwrap().collect();
    assert!(!entries.is_empty(), "expected a log file");
}

#[test]
fn test_version() {
    let (stdout, _stderr, exit_code) = run(&["version"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with("tars-config "));
}
