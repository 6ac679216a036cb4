//! Run the `uniassist` binary against a throwaway config and history file.

use std::path::Path;
use std::process::{Command, Output};

fn write_config(dir: &Path) -> std::path::PathBuf {
    let config_path = dir.join("config.toml");
    let toml = format!(
        "[paths]\ndocument = {:?}\nhistory = {:?}\nreference_dataset = {:?}\n",
        dir.join("DIU.txt").display().to_string(),
        dir.join("conversation_history.json").display().to_string(),
        dir.join("data.json").display().to_string(),
    );
    std::fs::write(&config_path, toml).unwrap();
    config_path
}

fn uniassist(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_uniassist"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .unwrap()
}

#[test]
fn history_prints_you_and_assistant_lines() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    std::fs::write(
        dir.path().join("conversation_history.json"),
        r#"[{"role": "user", "message": "hi"}, {"role": "assistant", "message": "Hello!"}]"#,
    )
    .unwrap();

    let output = uniassist(&config, &["history"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "You: hi\nAssistant: Hello!\n");
}

#[test]
fn history_without_file_says_so() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let output = uniassist(&config, &["history"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "No conversation history.\n");
}

#[test]
fn clear_empties_the_history_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let history = dir.path().join("conversation_history.json");
    std::fs::write(&history, r#"[{"role": "user", "message": "hi"}]"#).unwrap();

    let output = uniassist(&config, &["clear"]);
    assert!(output.status.success());
    assert_eq!(std::fs::read_to_string(&history).unwrap(), "[]");
}

#[test]
fn onboard_writes_a_loadable_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("fresh").join("config.toml");

    let output = uniassist(&config, &["onboard"]);
    assert!(output.status.success());

    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains("default_provider = \"groq\""));
}
