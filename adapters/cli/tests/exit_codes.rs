use std::{fs, path::PathBuf, process::Command};

fn robot_escape() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_robot-escape"));
    command.env("RUST_LOG", "off");
    command
}

fn write_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "robot-escape-{}-{name}.toml",
        std::process::id()
    ));
    fs::write(&path, contents).expect("temporary configuration");
    path
}

#[test]
fn missing_config_argument_exits_with_failure() {
    let output = robot_escape().output().expect("run robot-escape");

    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());
}

#[test]
fn unreadable_config_is_reported_on_stderr() {
    let output = robot_escape()
        .arg("/nonexistent/robot-escape.toml")
        .output()
        .expect("run robot-escape");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failed to read configuration"),
        "stderr was: {stderr}"
    );
}

#[test]
fn out_of_range_room_is_a_reported_error() {
    let path = write_config(
        "far-room",
        "[[field.room]]\nrectangle = [2147483640, 0, 10, 10]\n",
    );
    let output = robot_escape()
        .arg(&path)
        .args(["--seed", "1"])
        .output()
        .expect("run robot-escape");
    let _ = fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("room 1 must lie within"), "stderr was: {stderr}");
}
