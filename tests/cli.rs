//! Tests that run the `sqlgate` binary itself.

use std::net::TcpListener;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sqlgate"))
        .args(args)
        .output()
        .expect("failed to run sqlgate")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn out_of_range_port_prints_usage_and_exits_cleanly() {
    let output = run(&["-p", "70000"]);

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(
        text.starts_with("Invalid arguments: Port must be between 0 and 65535, got 70000"),
        "{text}"
    );
    assert!(text.contains("Usage:"));
    assert!(!text.contains("Server is listening"));
}

#[test]
fn negative_threads_prints_usage_and_exits_cleanly() {
    let output = run(&["-t", "-1"]);

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(
        text.starts_with("Invalid arguments: Thread pool size must be non-negative, got -1"),
        "{text}"
    );
    assert!(text.contains("--threads"));
}

#[test]
fn help_exits_cleanly() {
    let output = run(&["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("--noget"));
}

#[test]
fn port_in_use_fails_startup() {
    let taken = TcpListener::bind("0.0.0.0:0").unwrap();
    let port = taken.local_addr().unwrap().port().to_string();

    let output = run(&["-p", &port]);

    assert_ne!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(&format!("Could not start server on port {port}")),
        "{stderr}"
    );
    assert!(!stdout(&output).contains("Server is listening"));
}
