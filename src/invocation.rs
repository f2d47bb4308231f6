//! Invocation request -> resolved compiler command
//!
//! Order of operations:
//! 1. Filter every raw argument (drop/rewrite/normalize)
//! 2. Windows only: resolve clang-cl, splice `-Xclang`, append the MSVC version
//!
//! Arguments and the compiler path are kept as `OsString` so tokens that are
//! not UTF-8 (Latin-1 file names, say) still reach the compiler.

use std::ffi::{OsStr, OsString};
use std::fmt;

use tracing::debug;

use crate::compiler_path::resolve_compiler_path;
use crate::config::ShimConfig;
use crate::platform::{restructure_for_windows, Target};

/// One compiler call as received from the build system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    target: Target,
    compiler_path: OsString,
    raw_arguments: Vec<OsString>,
}

impl InvocationRequest {
    pub fn new<I, S>(target: Target, compiler_path: impl Into<OsString>, raw_arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            target,
            compiler_path: compiler_path.into(),
            raw_arguments: raw_arguments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn compiler_path(&self) -> &OsStr {
        &self.compiler_path
    }

    pub fn raw_arguments(&self) -> &[OsString] {
        &self.raw_arguments
    }

    /// Build the command to launch
    pub fn resolve(&self, config: &ShimConfig) -> ResolvedCommand {
        let filter = config.arg_filter();
        let mut args = filter.filter_all_os(&self.raw_arguments);
        debug!(
            kept = args.len(),
            dropped = self.raw_arguments.len() - args.len(),
            "filtered arguments"
        );

        let program = resolve_compiler_path(&self.compiler_path, self.target);
        if self.target.is_windows() {
            restructure_for_windows(&mut args, &config.windows.ms_compatibility_version);
        }

        ResolvedCommand { program, args }
    }
}

/// Final program + arguments handed to process creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ResolvedCommand {
    /// `[program, args...]`
    pub fn argv(&self) -> Vec<OsString> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl fmt::Display for ResolvedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
