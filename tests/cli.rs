use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command running in an empty directory with no credential or user config in reach
fn notes(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("notes").unwrap();
    cmd.current_dir(home.path())
        .env_remove("GOOGLE_API_KEY")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_video_id_from_short_link() {
    let home = TempDir::new().unwrap();
    notes(&home)
        .args(["video-id", "https://youtu.be/dQw4w9WgXcQ"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dQw4w9WgXcQ"))
        .stdout(predicate::str::contains(
            "http://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg",
        ));
}

#[test]
fn test_video_id_from_watch_url() {
    let home = TempDir::new().unwrap();
    notes(&home)
        .args(["video-id", "https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=xyz"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("dQw4w9WgXcQ\n"));
}

#[test]
fn test_video_id_rejects_non_url() {
    let home = TempDir::new().unwrap();
    notes(&home)
        .args(["video-id", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_video_id_ignores_broken_config() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.yaml"), "gemini: [this is not a mapping\n").unwrap();

    notes(&home)
        .args(["video-id", "https://youtu.be/dQw4w9WgXcQ"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("dQw4w9WgXcQ\n"));
}

#[test]
fn test_summarize_fails_fast_without_api_key() {
    let home = TempDir::new().unwrap();
    notes(&home)
        .args(["--quiet", "summarize", "https://youtu.be/dQw4w9WgXcQ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing API key"))
        .stderr(predicate::str::contains("GOOGLE_API_KEY"));
}

#[test]
fn test_ask_fails_fast_without_api_key() {
    let home = TempDir::new().unwrap();
    notes(&home)
        .args(["--quiet", "ask", "missing.pdf", "What is this?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing API key"));
}

#[test]
fn test_api_key_env_name_comes_from_config() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "gemini:\n  model: gemini-pro\n  base_url: https://example.com/v1beta\n  api_key_env: NOTES_TEST_KEY\n  timeout_secs: 5\n",
    )
    .unwrap();

    notes(&home)
        .env_remove("NOTES_TEST_KEY")
        .args(["--quiet", "summarize", "https://youtu.be/dQw4w9WgXcQ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NOTES_TEST_KEY"));
}

#[test]
fn test_extract_rejects_non_pdf() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("notes.pdf");
    std::fs::write(&path, "just some text").unwrap();

    notes(&home)
        .arg("extract")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a PDF"));
}

#[test]
fn test_extract_missing_file() {
    let home = TempDir::new().unwrap();
    notes(&home)
        .args(["extract", "nowhere.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist"));
}

#[test]
fn test_invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "gemini:\n  model: gemini-pro\n  base_url: ftp://example.com\n  api_key_env: GOOGLE_API_KEY\n  timeout_secs: 5\n",
    )
    .unwrap();

    notes(&home)
        .args(["config", "--show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_config_show_masks_api_key() {
    let home = TempDir::new().unwrap();
    notes(&home)
        .env("GOOGLE_API_KEY", "super-secret-value")
        .args(["config", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gemini Model: gemini-pro"))
        .stdout(predicate::str::contains("API Key: $GOOGLE_API_KEY (set)"))
        .stdout(predicate::str::contains("super-secret-value").not());
}

#[cfg(target_os = "linux")]
#[test]
fn test_config_init_writes_defaults() {
    let home = TempDir::new().unwrap();
    notes(&home)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default configuration written to"));

    let written = home.path().join(".config/gemini-notes/config.yaml");
    let content = std::fs::read_to_string(written).unwrap();
    assert!(content.contains("model: gemini-pro"));
    assert!(content.contains("preview_chars: 1500"));
}
