//! Compiler executable selection for Windows targets
//!
//! Windows builds drive clang through its MSVC-compatible front-end, so
//! `.../bin/clang` (and versioned names like `.../bin/clang-15`) become
//! `.../bin/clang-cl`.

use std::ffi::{OsStr, OsString};

use tracing::debug;

use crate::platform::Target;

/// Substring located in the compiler path
pub const CLANG_MARKER: &str = "/bin/clang";

/// Replacement for the marker and everything after it
pub const CLANG_CL_SUFFIX: &str = "/bin/clang-cl";

/// Rewrite a clang path to its clang-cl sibling
///
/// Uses the rightmost `/bin/clang`; whatever followed it is discarded.
/// Returns `None` when the path has no `/bin/clang`.
pub fn clang_cl_path(path: &str) -> Option<String> {
    let idx = path.rfind(CLANG_MARKER)?;
    Some(format!("{}{}", &path[..idx], CLANG_CL_SUFFIX))
}

/// [`clang_cl_path`] for paths that may not be UTF-8
pub fn clang_cl_path_os(path: &OsStr) -> Option<OsString> {
    match path.to_str() {
        Some(s) => clang_cl_path(s).map(OsString::from),
        None => clang_cl_path_bytes(path),
    }
}

#[cfg(unix)]
fn clang_cl_path_bytes(path: &OsStr) -> Option<OsString> {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let bytes = path.as_bytes();
    let marker = CLANG_MARKER.as_bytes();
    let idx = bytes.windows(marker.len()).rposition(|w| w == marker)?;

    let mut rewritten = bytes[..idx].to_vec();
    rewritten.extend_from_slice(CLANG_CL_SUFFIX.as_bytes());
    Some(OsString::from_vec(rewritten))
}

#[cfg(not(unix))]
fn clang_cl_path_bytes(_path: &OsStr) -> Option<OsString> {
    None
}

/// Resolve the executable to launch for `target`
pub fn resolve_compiler_path(path: &OsStr, target: Target) -> OsString {
    if !target.is_windows() {
        return path.to_os_string();
    }

    match clang_cl_path_os(path) {
        Some(rewritten) => {
            debug!(from = ?path, to = ?rewritten, "rewrote compiler path");
            rewritten
        }
        None => {
            debug!(?path, "no {} in compiler path, leaving it as is", CLANG_MARKER);
            path.to_os_string()
        }
    }
}
