use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn smdatetime(dir: &TempDir) -> Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("smdatetime");
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_config_found_in_parent_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();
    fs::write(
        dir.path().join(".smdatetime.toml"),
        "[duration]\nformat = \"textual:short+zeros\"\n",
    )
    .unwrap();

    smdatetime(&dir)
        .current_dir(&nested)
        .args(["duration", "format", "3661"])
        .assert()
        .success()
        .stdout("0 days 1 hour 1 min 1 sec\n");
}

#[test]
fn test_explicit_config_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(&path, "[duration]\nformat = \"colon:minute-hour\"\n").unwrap();

    smdatetime(&dir)
        .args(["--config", path.to_str().unwrap(), "duration", "format", "2h 5m"])
        .assert()
        .success()
        .stdout("02:05\n");
}

#[test]
fn test_global_config_fallback() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join(".config").join("smdatetime");
    fs::create_dir_all(&global).unwrap();
    fs::write(
        global.join("config.toml"),
        "[duration]\nformat = \"total:second\"\n",
    )
    .unwrap();
    let work = dir.path().join("work");
    fs::create_dir_all(&work).unwrap();

    // Only meaningful where the platform config dir honors XDG_CONFIG_HOME.
    if cfg!(target_os = "linux") {
        smdatetime(&dir)
            .current_dir(&work)
            .args(["duration", "format", "1m"])
            .assert()
            .success()
            .stdout("60\n");
    }
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".smdatetime.toml"), "[duration\n").unwrap();

    smdatetime(&dir)
        .args(["duration", "format", "60"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn test_invalid_offset_in_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".smdatetime.toml"), "utc_offset = \"mars\"\n").unwrap();

    smdatetime(&dir)
        .args(["time", "now"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid UTC offset 'mars'"));
}

#[test]
fn test_invalid_pinned_now() {
    let dir = TempDir::new().unwrap();
    smdatetime(&dir)
        .args(["--now", "tomorrow", "time", "now"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid --now"));
}

#[test]
fn test_schema_command() {
    let dir = TempDir::new().unwrap();
    smdatetime(&dir)
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("smdatetime Configuration"))
        .stdout(predicate::str::contains("utc_offset"));
}
