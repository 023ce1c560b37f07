use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PAYLOAD: &str = r#"{
    "session_id": "f00dcafe-1234",
    "model": {"id": "opus-4", "display_name": "Opus"},
    "workspace": {"current_dir": "/tmp/gridline-it-proj"},
    "cost": {"total_cost_usd": 1.0, "total_duration_ms": 60000}
}"#;

fn gridline() -> Command {
    let mut cmd = Command::cargo_bin("gridline").unwrap();
    // Pin the probe: no color, no emoji, no nerd font.
    cmd.env("NO_COLOR", "1")
        .env("LC_ALL", "C")
        .env_remove("FORCE_COLOR")
        .env_remove("NERD_FONT")
        .env_remove("TERM_PROGRAM");
    cmd
}

#[test]
fn test_primary_line_from_stdin() {
    gridline()
        .args(["--config", "/nonexistent/gridline/config.toml", "--no-multiline"])
        .write_stdin(PAYLOAD)
        .assert()
        .success()
        .stdout(predicate::str::contains("Opus"))
        .stdout(predicate::str::contains("gridline-it-proj"))
        .stdout(predicate::str::contains("$1.00"));
}

#[test]
fn test_empty_stdin_still_succeeds() {
    gridline()
        .args(["--config", "/nonexistent/gridline/config.toml", "--no-multiline"])
        .write_stdin("")
        .assert()
        .success();
}

#[test]
fn test_multiline_grid_rendering() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
theme = "classic"

[multiline]
enabled = true
separator = " ~ "
"#,
    )
    .unwrap();

    let components = temp.path().join("components");
    std::fs::create_dir_all(&components).unwrap();
    std::fs::write(
        components.join("demo.toml"),
        r#"
[widgets.left]
type = "static"
row = 1
col = 0
content = "LEFTCELL"

[widgets.right]
type = "static"
row = 1
col = 1
content = "RIGHTCELL"

[widgets.below]
type = "static"
row = 2
col = 0
content = "SECONDROW"
"#,
    )
    .unwrap();

    gridline()
        .args(["--config", config_path.to_str().unwrap()])
        .write_stdin(PAYLOAD)
        .assert()
        .success()
        .stdout(predicate::str::contains("LEFTCELL ~ RIGHTCELL"))
        .stdout(predicate::str::contains("SECONDROW"));
}

#[test]
fn test_detection_gates_widget_on_environment() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.toml");
    std::fs::write(&config_path, "[multiline]\nenabled = true\n").unwrap();

    let components = temp.path().join("components");
    std::fs::create_dir_all(&components).unwrap();
    std::fs::write(
        components.join("gated.toml"),
        r#"
[widgets.flagged]
type = "static"
row = 1
col = 0
content = "FLAGGEDCELL"

[widgets.flagged.detection]
env = "GRIDLINE_IT_FLAG"
equals = "on"
"#,
    )
    .unwrap();

    gridline()
        .args(["--config", config_path.to_str().unwrap()])
        .env_remove("GRIDLINE_IT_FLAG")
        .write_stdin(PAYLOAD)
        .assert()
        .success()
        .stdout(predicate::str::contains("FLAGGEDCELL").not());

    gridline()
        .args(["--config", config_path.to_str().unwrap()])
        .env("GRIDLINE_IT_FLAG", "on")
        .write_stdin(PAYLOAD)
        .assert()
        .success()
        .stdout(predicate::str::contains("FLAGGEDCELL"));
}

#[test]
fn test_unknown_widget_type_warns_and_keeps_rest() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.toml");
    std::fs::write(&config_path, "[multiline]\nenabled = true\n").unwrap();

    let components = temp.path().join("components");
    std::fs::create_dir_all(&components).unwrap();
    std::fs::write(
        components.join("mixed.toml"),
        r#"
[widgets.odd]
type = "hologram"
row = 1
col = 0
content = "NOPE"

[widgets.ok]
type = "static"
row = 1
col = 1
content = "SURVIVOR"
"#,
    )
    .unwrap();

    gridline()
        .args(["--config", config_path.to_str().unwrap(), "--debug"])
        .write_stdin(PAYLOAD)
        .assert()
        .success()
        .stdout(predicate::str::contains("SURVIVOR"))
        .stdout(predicate::str::contains("NOPE").not())
        .stderr(predicate::str::contains("hologram"));
}

#[test]
fn test_escaped_dollar_reaches_output() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.toml");
    std::fs::write(&config_path, "[multiline]\nenabled = true\n").unwrap();

    let components = temp.path().join("components");
    std::fs::create_dir_all(&components).unwrap();
    // Literal TOML string: backslash-dollar survives parsing.
    std::fs::write(
        components.join("money.toml"),
        r#"
[widgets.flat]
type = "static"
row = 1
col = 0
content = '\$5 flat rate'
"#,
    )
    .unwrap();

    gridline()
        .args(["--config", config_path.to_str().unwrap()])
        .write_stdin(PAYLOAD)
        .assert()
        .success()
        .stdout(predicate::str::contains("$5 flat rate"));
}

#[test]
fn test_init_writes_starter_files() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.toml");

    gridline()
        .args(["--config", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    assert!(config_path.exists());
    assert!(temp.path().join("components/system.toml").exists());

    // Second init without --force refuses.
    gridline()
        .args(["--config", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure();
}

#[test]
fn test_template_widget_reads_session_payload() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.toml");
    std::fs::write(&config_path, "[multiline]\nenabled = true\n").unwrap();

    let components = temp.path().join("components");
    std::fs::create_dir_all(&components).unwrap();
    std::fs::write(
        components.join("session.toml"),
        r#"
[widgets.spend]
type = "static"
row = 1
col = 0
template = "spent {cost.total_cost_usd:.2f} on {model.display_name}"
"#,
    )
    .unwrap();

    gridline()
        .args(["--config", config_path.to_str().unwrap()])
        .write_stdin(PAYLOAD)
        .assert()
        .success()
        .stdout(predicate::str::contains("spent 1.00 on Opus"));
}
