//! End-to-end tests running the `wrun` binary.

use std::{
    path::{Path, PathBuf},
    process::{Command, Output},
};

use tempfile::TempDir;

const ARITHMETIC: &str = r#"
    (module
      (memory (export "memory") 1)
      (func (export "add1") (param i32) (result i32)
        local.get 0
        i32.const 1
        i32.add)
      (func (export "sum3") (param i32 i32 i32) (result i32)
        local.get 0
        local.get 1
        i32.add
        local.get 2
        i32.add)
      (func (export "boom")
        unreachable))
"#;

const TRACED: &str = r#"
    (module
      (import "env" "memory" (memory 1))
      (data (i32.const 16) "\01\00\00\00\02\00\00\00\03\00\00\00")
      (data (i32.const 64) "\0a\00\00\00\14\00\00\00")
      (func (export "buffer") (result i32)
        i32.const 64)
      (func (export "__expose_tracer") (result i32)
        i32.const 16)
      (func (export "__expose_tracer_len") (result i32)
        i32.const 3))
"#;

fn write_module(dir: &TempDir, name: &str, wat: &str) -> PathBuf {
    let path = dir.path().join(name);
    let wasm = wat::parse_str(wat).expect("Failed to parse WAT");
    std::fs::write(&path, wasm).expect("Failed to write module");
    path
}

fn wrun(module: &Path, rest: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wrun"))
        .arg(module)
        .args(rest)
        .env_remove("RUST_LOG")
        .env_remove("WRUN_LOG")
        .env_remove("WRUN_MEMORY_PAGES")
        .env_remove("WRUN_TABLE_SIZE")
        .output()
        .expect("Failed to run wrun")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_add1_prints_result() {
    let dir = TempDir::new().unwrap();
    let module = write_module(&dir, "arithmetic.wasm", ARITHMETIC);

    let output = wrun(&module, &["add1", "10"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Invoking exported function add1 with arguments [10] ...\nResult of function call: 11\n"
    );
}

#[test]
fn test_quoted_argument_string() {
    let dir = TempDir::new().unwrap();
    let module = write_module(&dir, "arithmetic.wasm", ARITHMETIC);

    let output = wrun(&module, &["sum3", "10  20 30"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("with arguments [10, 20, 30] ..."));
    assert!(stdout(&output).contains("Result of function call: 60"));
}

#[test]
fn test_trace_buffer_and_dump_are_printed() {
    let dir = TempDir::new().unwrap();
    let module = write_module(&dir, "traced.wasm", TRACED);

    let output = wrun(&module, &["--dump-result=2", "buffer"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Result of function call: 64"));
    assert!(out.contains("Calls: [1, 2, 3]"));
    assert!(out.contains("Buffer: [10, 20]"));

    let output = wrun(&module, &["--no-trace", "buffer"]);
    assert!(output.status.success());
    assert!(!stdout(&output).contains("Calls:"));
}

#[test]
fn test_unknown_export_fails_with_names() {
    let dir = TempDir::new().unwrap();
    let module = write_module(&dir, "arithmetic.wasm", ARITHMETIC);

    let output = wrun(&module, &["add2", "1"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Error:"));
    assert!(err.contains("add2 not found in wasm exports: memory, add1, sum3, boom"));
}

#[test]
fn test_trap_exits_with_failure() {
    let dir = TempDir::new().unwrap();
    let module = write_module(&dir, "arithmetic.wasm", ARITHMETIC);

    let output = wrun(&module, &["boom"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unreachable"));
}

#[test]
fn test_non_numeric_argument_is_rejected() {
    let dir = TempDir::new().unwrap();
    let module = write_module(&dir, "arithmetic.wasm", ARITHMETIC);

    let output = wrun(&module, &["add1", "ten"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("\"ten\""));
    // Nothing is invoked
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.wasm");

    let output = wrun(&missing, &["add1", "10"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("missing.wasm"));
}

#[test]
fn test_missing_function_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("never-read.wasm");

    let output = wrun(&missing, &[]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    let module = write_module(&dir, "arithmetic.wasm", ARITHMETIC);

    let output = wrun(&module, &["--log-level", "info", "add1", "1"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("Compiled"));
    assert!(!stdout(&output).contains("Compiled"));
}
