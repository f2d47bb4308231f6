//! Shared helpers for CLI integration tests
//!
//! Fake compilers are shell scripts that echo each argument on its own line,
//! so tests can assert on the exact argv the shim produced.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Prints `$0` basename, then every argument on its own line; exits with $FAKE_EXIT
const ECHO_COMPILER: &str = r#"#!/bin/sh
echo "prog=$(basename "$0")"
for a in "$@"; do
  printf 'arg=%s\n' "$a"
done
exit "${FAKE_EXIT:-0}"
"#;

/// Write an executable fake compiler at `dir/rel` and return its path
pub fn fake_compiler(dir: &Path, rel: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, ECHO_COMPILER).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Expected stdout of the fake compiler for `prog` called with `args`
pub fn expected_output(prog: &str, args: &[&str]) -> String {
    let mut out = format!("prog={}\n", prog);
    for a in args {
        out.push_str(&format!("arg={}\n", a));
    }
    out
}

pub fn shim() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("clang-shim");
    cmd.env_remove("CLANG_SHIM_CONFIG").env_remove("CLANG_SHIM_LOG");
    cmd
}
