//! Positional CLI contract and exit status forwarding
//!
//! Goal: clang-shim <yes|no> COMPILER ARGS... runs COMPILER and exits with its code

mod common;

use common::{expected_output, fake_compiler, shim};
use predicates::prelude::*;
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use tempfile::TempDir;

#[test]
fn test_cli_requires_platform_and_compiler() {
    shim()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_cli_requires_compiler() {
    shim().arg("no").assert().failure().code(2);
}

#[test]
fn test_non_windows_filters_arguments() {
    let dir = TempDir::new().unwrap();
    let clang = fake_compiler(dir.path(), "bin/clang");

    shim()
        .arg("no")
        .arg(&clang)
        .args(["-g", "-O2"])
        .assert()
        .success()
        .stdout(expected_output("clang", &["-O2"]));
}

#[test]
fn test_non_windows_keeps_emit_llvm_and_path() {
    let dir = TempDir::new().unwrap();
    let clang = fake_compiler(dir.path(), "bin/clang");

    shim()
        .arg("no")
        .arg(&clang)
        .args(["-c", "-emit-llvm", "-fsanitize=address", "a.cpp"])
        .assert()
        .success()
        .stdout(expected_output("clang", &["-c", "-emit-llvm", "a.cpp"]))
        .stdout(predicate::str::contains("-fms-compatibility-version").not());
}

#[test]
fn test_empty_arguments_are_not_forwarded() {
    let dir = TempDir::new().unwrap();
    let clang = fake_compiler(dir.path(), "bin/clang");

    shim()
        .arg("no")
        .arg(&clang)
        .args(["", "-O2", "", "a.cpp"])
        .assert()
        .success()
        .stdout(expected_output("clang", &["-O2", "a.cpp"]));
}

#[test]
fn test_non_unicode_argument_reaches_compiler() {
    let dir = TempDir::new().unwrap();
    let clang = fake_compiler(dir.path(), "bin/clang");

    let mut expected = b"prog=clang\narg=-c\narg=caf\xe9.c\narg=-IC:/caf\xe9\n".to_vec();
    expected.extend_from_slice(b"arg=-O2\n");

    shim()
        .arg("no")
        .arg(&clang)
        .arg("-c")
        .arg(OsStr::from_bytes(b"caf\xe9.c"))
        .arg(OsStr::from_bytes(b"-IC:\\caf\xe9"))
        .arg(OsStr::from_bytes(b"-fsanitize=\xff"))
        .arg("-O2")
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_non_unicode_compiler_path_is_spawned() {
    let dir = TempDir::new().unwrap();
    // Latin-1 directory name
    let latin1_dir = dir.path().join(OsStr::from_bytes(b"t\xe9"));
    let clang = fake_compiler(&latin1_dir, "bin/clang");

    shim()
        .arg("no")
        .arg(&clang)
        .arg("-O2")
        .assert()
        .success()
        .stdout(expected_output("clang", &["-O2"]));
}

#[test]
fn test_help_and_version_tokens_are_forwarded() {
    let dir = TempDir::new().unwrap();
    let clang = fake_compiler(dir.path(), "bin/clang");

    shim()
        .arg("no")
        .arg(&clang)
        .args(["--help", "--version", "-V"])
        .assert()
        .success()
        .stdout(expected_output("clang", &["--help", "--version", "-V"]));
}

#[test]
fn test_no_forwarded_arguments() {
    let dir = TempDir::new().unwrap();
    let clang = fake_compiler(dir.path(), "bin/clang");

    shim()
        .arg("no")
        .arg(&clang)
        .assert()
        .success()
        .stdout(expected_output("clang", &[]));
}

#[test]
fn test_exit_code_zero() {
    shim()
        .args(["no", "sh", "-c", "exit 0"])
        .assert()
        .code(0);
}

#[test]
fn test_exit_code_one() {
    shim()
        .args(["no", "sh", "-c", "exit 1"])
        .assert()
        .code(1);
}

#[test]
fn test_exit_code_127() {
    shim()
        .args(["no", "sh", "-c", "exit 127"])
        .assert()
        .code(127);
}

#[test]
fn test_exit_code_from_fake_compiler() {
    let dir = TempDir::new().unwrap();
    let clang = fake_compiler(dir.path(), "bin/clang");

    shim()
        .env("FAKE_EXIT", "42")
        .arg("no")
        .arg(&clang)
        .arg("a.cpp")
        .assert()
        .code(42)
        .stdout(expected_output("clang", &["a.cpp"]));
}

#[test]
fn test_child_stderr_passes_through() {
    shim()
        .args(["no", "sh", "-c", "echo 'a.cpp:1:1: error: boom' >&2; exit 1"])
        .assert()
        .code(1)
        .stdout("")
        .stderr("a.cpp:1:1: error: boom\n");
}

#[test]
fn test_missing_compiler_fails() {
    shim()
        .args(["no", "/nonexistent/bin/clang", "-c", "a.cpp"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to spawn compiler"))
        .stderr(predicate::str::contains("/nonexistent/bin/clang"));
}

#[test]
fn test_silent_without_log_env() {
    shim()
        .args(["no", "sh", "-c", "exit 0"])
        .assert()
        .success()
        .stdout("")
        .stderr("");
}

#[test]
fn test_log_env_writes_diagnostics_to_stderr() {
    shim()
        .env("CLANG_SHIM_LOG", "clang_shim=debug")
        .args(["no", "sh", "-c", "exit 0"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("spawning compiler"));
}
