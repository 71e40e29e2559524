//! End-to-end tests for the `robosprite` binary.
//!
//! External tools are replaced by small shell scripts that produce the files
//! the real tools would, so these tests only run on Unix.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn robosprite(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_robosprite"))
        .args(args)
        .env_remove("ROBOSPRITE_INKSCAPE")
        .env_remove("ROBOSPRITE_POVRAY")
        .env_remove("ROBOSPRITE_CONVERT")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run robosprite")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[cfg(unix)]
fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn plan_robot_lists_every_mode() {
    let output = robosprite(&["plan", "robot"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("walk_d (13 frames)"));
    assert!(text.contains("rotate_rd (11 frames)"));
    assert!(text.contains("16 modes, 216 frames"));
}

#[test]
fn plan_man_json_is_parseable() {
    let output = robosprite(&["plan", "man", "--json"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let modes = value.as_array().unwrap();
    assert_eq!(modes.len(), 2);
    assert_eq!(modes[0]["poses"].as_array().unwrap().len(), 20);
    assert_eq!(modes[1]["poses"].as_array().unwrap().len(), 11);
}

#[test]
fn robot_without_scene_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = robosprite(&["robot", "--dir", dir.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error"));
    assert!(stderr(&output).contains("robot.pov"));
    assert!(!dir.path().join("robot.ini").exists());
}

#[test]
fn bad_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("robosprite.json");
    fs::write(&config, r#"{ "robot": { "colour": "red" } }"#).unwrap();

    let output = robosprite(&["plan", "robot", "--config", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("robosprite.json"));
}

#[test]
fn inspect_reports_missing_frames() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("man.xml");
    fs::write(
        &manifest,
        "<!-- This file is generated automatically from robosprite man -->\n\
         <sprite>\n  <mode name=\"walk\">\n    <frame img=\"walk-0.png\"/>\n  </mode>\n</sprite>\n",
    )
    .unwrap();

    let output = robosprite(&["inspect", manifest.to_str().unwrap(), "--json"]);
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["format"], "xml");
    assert_eq!(value["modes"][0]["missing_files"][0], "walk-0.png");

    fs::write(dir.path().join("walk-0.png"), b"png").unwrap();
    let output = robosprite(&["inspect", manifest.to_str().unwrap()]);
    assert!(output.status.success());
}

#[cfg(unix)]
#[test]
fn man_renders_with_fake_inkscape() {
    let dir = tempfile::tempdir().unwrap();
    let bin = tempfile::tempdir().unwrap();
    // -z -e <png> <svg>
    let inkscape = script(bin.path(), "inkscape", "cp \"$4\" \"$3\"");

    let output = robosprite(&[
        "man",
        "--dir",
        dir.path().to_str().unwrap(),
        "--inkscape",
        inkscape.to_str().unwrap(),
        "--manifest-format",
        "ini",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    for i in 0..20 {
        let png = dir.path().join(format!("walk-{}.png", i));
        let text = fs::read_to_string(&png).unwrap();
        assert!(text.contains("<g id=\"layer1\">"));
        assert!(!dir.path().join(format!("walk-{}.svg", i)).exists());
    }
    assert!(dir.path().join("rotate-10.png").is_file());

    let output = robosprite(&["inspect", dir.path().join("man.ini").to_str().unwrap()]);
    assert!(output.status.success(), "stdout: {}", stdout(&output));
}

#[cfg(unix)]
#[test]
fn robot_renders_with_fake_povray_and_convert() {
    let dir = tempfile::tempdir().unwrap();
    let bin = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("robot.pov"), "#include \"robot_options.inc\"\n").unwrap();

    // -d +O<stem> +H<h> +W<w> +I<scene>; copies the include file into the frame
    let povray = script(
        bin.path(),
        "povray",
        "out=\"${2#+O}\"\ncp robot_options.inc \"$out.png\"",
    );
    // <in> -transparent <color> <out>
    let convert = script(bin.path(), "convert", "cp \"$1\" \"$4\"");

    let output = robosprite(&[
        "robot",
        "--dir",
        dir.path().to_str().unwrap(),
        "--format",
        "xml",
        "--povray",
        povray.to_str().unwrap(),
        "--convert",
        convert.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let first = fs::read_to_string(dir.path().join("robot/frame000.png")).unwrap();
    assert!(first.contains("#declare BODY_ANGLE      = 0.000000;"));
    let turned = fs::read_to_string(dir.path().join("robot/frame052.png")).unwrap();
    assert!(turned.contains("#declare BODY_ANGLE      = 0.000000;"));
    let last = fs::read_to_string(dir.path().join("robot/frame215.png")).unwrap();
    assert!(last.contains("#declare BODY_ANGLE      = 180.000000;"));

    assert!(!dir.path().join("robot_options.inc").exists());
    assert!(!dir.path().join("robot/frame000-tmp.png").exists());

    let manifest = fs::read_to_string(dir.path().join("robot.xml")).unwrap();
    assert!(manifest.starts_with("<!-- This file is generated automatically from robot.pov -->"));
    assert!(manifest.contains("<frame img=\"robot/frame215.png\"/>"));

    let output = robosprite(&[
        "inspect",
        dir.path().join("robot.xml").to_str().unwrap(),
        "--robot",
    ]);
    assert!(output.status.success(), "stdout: {}", stdout(&output));
}

#[cfg(unix)]
#[test]
fn failing_tool_leaves_no_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let bin = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("robot.pov"), "").unwrap();
    let povray = script(bin.path(), "povray", "echo 'Parse Error' >&2\nexit 3");
    let convert = script(bin.path(), "convert", "exit 0");

    let output = robosprite(&[
        "robot",
        "--dir",
        dir.path().to_str().unwrap(),
        "--povray",
        povray.to_str().unwrap(),
        "--convert",
        convert.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Parse Error"));
    assert!(!dir.path().join("robot.ini").exists());
    assert!(!dir.path().join("robot_options.inc").exists());
}

#[cfg(unix)]
#[test]
fn manifest_outside_output_dir_points_at_frames() {
    let root = tempfile::tempdir().unwrap();
    let bin = tempfile::tempdir().unwrap();
    let frames = root.path().join("frames");
    let manifest = root.path().join("sprites/man.xml");
    let inkscape = script(bin.path(), "inkscape", "cp \"$4\" \"$3\"");

    let output = robosprite(&[
        "man",
        "--dir",
        frames.to_str().unwrap(),
        "--manifest",
        manifest.to_str().unwrap(),
        "--inkscape",
        inkscape.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = fs::read_to_string(&manifest).unwrap();
    assert!(text.contains("<frame img=\"../frames/walk-0.png\"/>"));

    let output = robosprite(&["inspect", manifest.to_str().unwrap()]);
    assert!(output.status.success(), "stdout: {}", stdout(&output));
}
