//! clang-shim - compiler invocation adapter
//!
//! Sits between a build system and a clang binary. Flags produced for the
//! build's current compiler are filtered so an older bytecode-generating
//! clang accepts them, and Windows targets are routed through clang-cl.

pub mod cli;
pub mod compiler_path;
pub mod config;
pub mod error;
pub mod filter;
pub mod invocation;
pub mod platform;
pub mod process;

pub use error::{Result, ShimError};
pub use invocation::{InvocationRequest, ResolvedCommand};
