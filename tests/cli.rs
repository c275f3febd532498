use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn tfi2opm(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tfi2opm"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .env_remove("CLICOLOR_FORCE")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn kick(dir: &Path) {
    let mut data = [0; 42];
    data[0] = 5;
    data[1] = 2;
    fs::write(dir.join("kick.tfi"), data).unwrap();
}

#[test]
fn no_arguments_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    let output = tfi2opm(dir.path(), &[]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("TFI2OPM by raphaelgoulart.\n"));
    assert!(out.contains("Usage: Drag and drop one or multiple .tfi files"));
    assert!(out.contains("You can drag up to 128 .tfi files"));
    assert!(!dir.path().join("output.opm").exists());
}

#[test]
fn single_input_writes_bank() {
    let dir = tempfile::tempdir().unwrap();
    kick(dir.path());

    let output = tfi2opm(dir.path(), &["kick.tfi"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Starting program...\n\
         Reading file: kick...\n\
         Finished reading file.\n\
         Writing output.opm file...\n\
         Finished writing file.\n\
         Finished!\n"
    );
    assert_eq!(stderr(&output), "");

    let text = fs::read_to_string(dir.path().join("output.opm")).unwrap();
    assert!(text.contains("@:0 kick\nLFO: 0 0 0 0 0\nCH: 64 2 5 0 0 120 0\n"));
}

#[test]
fn bad_input_is_reported_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    kick(dir.path());
    fs::write(dir.path().join("broken.tfi"), [0; 10]).unwrap();

    let output = tfi2opm(dir.path(), &["kick.tfi", "broken.tfi"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains(
        "Reading file: broken...\nReading file: kick...\nFinished reading file.\n"
    ));
    assert!(stderr(&output)
        .contains("Error reading file: Invalid .tfi file: expected 42 bytes, found 10"));

    let text = fs::read_to_string(dir.path().join("output.opm")).unwrap();
    assert!(text.contains("@:0 kick\n"));
    assert!(!text.contains("broken"));
}

#[test]
fn more_than_128_inputs_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let names: Vec<String> = (0..129).map(|i| format!("{}.tfi", i)).collect();
    let args: Vec<&str> = names.iter().map(String::as_str).collect();

    let output = tfi2opm(dir.path(), &args);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("error: Unable to convert"));
    assert!(err.contains("caused by: You cannot convert more than 128 patches"));
    assert!(!stdout(&output).contains("Starting program..."));
    assert!(!dir.path().join("output.opm").exists());
}

#[test]
fn failed_write_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    kick(dir.path());
    fs::create_dir(dir.path().join("output.opm")).unwrap();

    let output = tfi2opm(dir.path(), &["kick.tfi"]);

    assert!(!output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Writing output.opm file...\n"));
    assert!(!out.contains("Finished writing file."));
    assert!(out.ends_with("Finished!\n"));
    assert!(stderr(&output).contains("Error writing file: Unable to write output.opm"));
}
