//! Integration tests for the conkytext binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"
cpu:
  usage_percent: 45.5
memory:
  total: 17179869184
  used: 8589934592
network:
  interfaces:
    eth0:
      addresses: [10.0.0.5]
"#;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("metrics.yml"), SNAPSHOT).unwrap();
    fs::write(temp.path().join(".conkytext.yml"), config).unwrap();
    temp
}

fn conkytext(dir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("conkytext"));
    cmd.current_dir(dir.path()).env_remove("CONKYTEXT_CONFIG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("conkytext"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Conky-compatible"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("conkytext"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn no_args_renders_config_text() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("snapshot: metrics.yml\ntext: 'CPU ${cpu}%'\n");
    conkytext(&temp)
        .assert()
        .success()
        .stdout("CPU 46%\n");
    Ok(())
}

#[test]
fn render_inline_template() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("{}");
    conkytext(&temp)
        .args([
            "render",
            "--snapshot",
            "metrics.yml",
            "-t",
            "CPU: ${cpu}% | RAM: ${mem}/${memmax} (${memperc}%)",
        ])
        .assert()
        .success()
        .stdout("CPU: 46% | RAM: 8.0GiB/16.0GiB (50%)\n");
    Ok(())
}

#[test]
fn render_template_file_with_conditionals() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("snapshot: metrics.yml\n");
    fs::write(
        temp.path().join("net.txt"),
        "eth0 ${if_up eth0}UP${else}DOWN${endif}\nwlan0 ${if_up wlan0}UP${else}DOWN${endif}\n",
    )?;
    conkytext(&temp)
        .args(["render", "--file", "net.txt"])
        .assert()
        .success()
        .stdout("eth0 UP\nwlan0 DOWN\n");
    Ok(())
}

#[test]
fn render_uses_config_templates() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("snapshot: metrics.yml\ntemplates:\n  2: '<\\1:${cpu}>'\n");
    conkytext(&temp)
        .args(["render", "-t", "${template2 all}"])
        .assert()
        .success()
        .stdout("<all:46>\n");
    Ok(())
}

#[test]
fn render_repeat_prints_each_frame() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("update_interval: 10ms\n");
    conkytext(&temp)
        .args(["render", "-t", "tick", "--repeat", "3"])
        .assert()
        .success()
        .stdout("tick\ntick\ntick\n");
    Ok(())
}

#[test]
fn render_repeat_zero_is_a_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("{}");
    conkytext(&temp)
        .args(["render", "-t", "tick", "--repeat", "0"])
        .assert()
        .failure()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("--repeat"));
    Ok(())
}

#[test]
fn render_stats_go_to_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("{}");
    conkytext(&temp)
        .args(["render", "-t", "x", "--stats"])
        .assert()
        .success()
        .stdout("x\n")
        .stderr(predicate::str::contains("exec entries: 0"));
    Ok(())
}

#[test]
fn render_without_template_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("{}");
    conkytext(&temp)
        .arg("render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no template given"));
    Ok(())
}

#[test]
fn render_missing_snapshot_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("{}");
    conkytext(&temp)
        .args(["render", "-s", "absent.yml", "-t", "${cpu}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.yml"));
    Ok(())
}

#[test]
fn invalid_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("cache:\n  cleanup_interval: 0\n");
    conkytext(&temp)
        .args(["render", "-t", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cleanup_interval"));
    Ok(())
}

#[test]
fn explicit_config_flag() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("{}");
    fs::write(temp.path().join("alt.yml"), "text: from alt\n")?;
    conkytext(&temp)
        .args(["--config", "alt.yml"])
        .assert()
        .success()
        .stdout("from alt\n");
    Ok(())
}

#[test]
fn check_clean_template() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("{}");
    conkytext(&temp)
        .args(["check", "-t", "${if_up eth0}UP${endif}"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Template is valid"));
    Ok(())
}

#[test]
fn check_reports_errors_with_exit_code() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("{}");
    conkytext(&temp)
        .args(["check", "-t", "line one\n${if_up eth0}UP"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("2:1: error[unclosed-if]"));
    Ok(())
}

#[test]
fn check_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("{}");
    let output = conkytext(&temp)
        .args(["check", "--json", "-t", "${nope}"])
        .output()?;
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed[0]["code"], "unknown-directive");
    assert_eq!(parsed[0]["severity"], "warning");
    Ok(())
}

#[test]
fn directives_lists_names() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("{}");
    conkytext(&temp)
        .arg("directives")
        .assert()
        .success()
        .stdout(predicate::str::contains("memperc\n"))
        .stdout(predicate::str::contains("if_mounted\n"));
    Ok(())
}

#[test]
fn quiet_suppresses_status() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("{}");
    conkytext(&temp)
        .args(["-q", "check", "-t", "fine"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
    Ok(())
}

#[test]
fn completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("conkytext"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("conkytext"));
    Ok(())
}
