//! CLI argument parsing for clang-shim
//!
//! The contract is purely positional: `clang-shim <yes|no> <COMPILER> [ARGS...]`.
//! Built-in `--help`/`--version` are disabled so every token after the
//! compiler path, including those, is forwarded to the compiler. Tokens are
//! taken as `OsString`, so file names that are not UTF-8 are accepted.

use std::ffi::OsString;

use clap::Parser;

use crate::invocation::InvocationRequest;
use crate::platform::Target;

#[derive(Parser, Debug)]
#[command(name = "clang-shim")]
#[command(about = "Rewrites clang arguments for bytecode and clang-cl invocations", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// "yes" selects Windows (clang-cl) handling; anything else does not
    #[arg(value_name = "IS_WINDOWS_TARGET", value_parser = clap::value_parser!(OsString))]
    pub windows_target: OsString,

    /// Path to the compiler executable
    #[arg(value_name = "COMPILER", value_parser = clap::value_parser!(OsString))]
    pub compiler: OsString,

    /// Arguments forwarded to the compiler
    #[arg(
        value_name = "ARGS",
        value_parser = clap::value_parser!(OsString),
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<OsString>,
}

impl Cli {
    pub fn target(&self) -> Target {
        // A flag that is not UTF-8 can never be "yes"
        self.windows_target
            .to_str()
            .map_or(Target::Other, Target::from_flag)
    }

    pub fn into_request(self) -> InvocationRequest {
        InvocationRequest::new(self.target(), self.compiler, self.args)
    }
}
