//! Target platform selection and Windows argument restructuring

use tracing::debug;

/// Literal value of the platform flag that selects Windows handling
pub const WINDOWS_FLAG: &str = "yes";

/// Bitcode emission flag that clang-cl only accepts behind `-Xclang`
pub const EMIT_LLVM: &str = "-emit-llvm";

/// Passthrough flag forwarding the next token to the clang driver
pub const XCLANG: &str = "-Xclang";

/// MSVC compatibility version pinned on Windows by default
pub const DEFAULT_MS_COMPATIBILITY_VERSION: &str = "19";

/// Platform the compiler invocation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Windows,
    Other,
}

impl Target {
    /// Interpret the positional platform flag (`yes` = Windows)
    pub fn from_flag(flag: &str) -> Self {
        if flag == WINDOWS_FLAG {
            Target::Windows
        } else {
            Target::Other
        }
    }

    pub fn is_windows(self) -> bool {
        matches!(self, Target::Windows)
    }
}

/// `-fms-compatibility-version=<version>`
pub fn ms_compatibility_flag(version: &str) -> String {
    format!("-fms-compatibility-version={}", version)
}

/// Adjust a filtered argument list for a clang-cl front-end
///
/// Splices `-Xclang` in front of the first `-emit-llvm` (no-op when absent)
/// and appends the MSVC compatibility version flag.
///
/// Works on `String` lists as well as raw `OsString` argv.
pub fn restructure_for_windows<T>(args: &mut Vec<T>, ms_compatibility_version: &str)
where
    T: PartialEq<str> + From<String>,
{
    if let Some(i) = args.iter().position(|a| a.eq(EMIT_LLVM)) {
        debug!(index = i, "routing {} through {}", EMIT_LLVM, XCLANG);
        args.insert(i, T::from(XCLANG.to_string()));
    }

    args.push(T::from(ms_compatibility_flag(ms_compatibility_version)));
}
