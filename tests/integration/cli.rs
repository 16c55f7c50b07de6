//! Command-line driver

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn abc(
    args: &[&str],
    stdin: &[u8],
) -> Output {
    let dir = TempDir::new().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_abc"))
        .args(args)
        .current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn abc");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin)
        .unwrap();
    child.wait_with_output().expect("Failed to collect output")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_eval() {
    let output = abc(&["eval", "[copy] [drop] swap"], b"");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "[drop] [copy]");
}

#[test]
fn test_verbosity_flags() {
    let traced = abc(&["-vv", "eval", "1 app"], b"");
    assert!(traced.status.success());
    let stderr = String::from_utf8_lossy(&traced.stderr);
    assert!(stderr.contains("step"), "{}", stderr);
    assert!(stderr.contains("stuck"), "{}", stderr);

    let quiet = abc(&["--quiet", "-vv", "eval", "1 app"], b"");
    assert!(quiet.status.success());
    assert!(quiet.stderr.is_empty());
    assert_eq!(stdout(&quiet), "1 app");
}

#[test]
fn test_encode_then_reduce() {
    let encoded = abc(&["encode", "[copy] [drop] cat"], b"");
    assert!(encoded.status.success());
    assert_eq!(encoded.stdout, vec![0x00, 0x04, 0x0E, 0x00, 0x05, 0x0E, 0x03]);

    let reduced = abc(&["reduce", "--output", "text"], &encoded.stdout);
    assert!(reduced.status.success());
    assert_eq!(stdout(&reduced), "[copy drop]");
}

#[test]
fn test_encode_hex_and_decode() {
    let encoded = abc(&["encode", "--hex", "swap [app]"], b"");
    assert_eq!(stdout(&encoded), "0600010e");
    let decoded = abc(&["decode"], &[0x06, 0x00, 0x01, 0x0E]);
    assert_eq!(stdout(&decoded), "swap [app]");
}

#[test]
fn test_reduce_stats() {
    let program = [0x00, 0x04, 0x01, 0x0E, 0x04, 0x01];
    let output = abc(&["reduce", "--quota", "4", "--output", "hex", "--stats"], &program);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stats = stderr.lines().last().unwrap();
    assert!(stats.contains("\"fuel_used\":4"), "{}", stats);
    assert!(stats.contains("\"exhausted\":true"), "{}", stats);
    assert_eq!(stdout(&output), "04010004010e");
}

#[test]
fn test_hash() {
    let output = abc(&["hash", ""], b"");
    assert_eq!(
        stdout(&output),
        "#e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_bad_bytecode_fails() {
    let output = abc(&["reduce"], &[0x00]);
    assert!(!output.status.success());
}

#[test]
fn test_shell_writes_bytecode() {
    let output = abc(&["shell"], b"opcopy mkbox\nquit\n");
    assert!(output.status.success());
    assert!(output.stdout.ends_with(&[0x00, 0x04, 0x0E]));
}
