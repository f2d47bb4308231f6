//! Error types for the compiler shim
//!
//! Lookup misses (no `/bin/clang` in the compiler path, no `-emit-llvm` in the
//! argument list) are not errors and never appear here.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can stop the shim before or while launching the compiler
#[derive(Error, Debug)]
pub enum ShimError {
    #[error("Failed to spawn compiler {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid rule in config: {0}")]
    InvalidRule(String),
}

/// Result type for shim operations
pub type Result<T> = std::result::Result<T, ShimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_error_names_program() {
        let err = ShimError::Spawn {
            program: "/opt/llvm/bin/clang".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to spawn compiler"));
        assert!(msg.contains("/opt/llvm/bin/clang"));
    }

    #[test]
    fn test_config_read_error_names_path() {
        let err = ShimError::ConfigRead {
            path: PathBuf::from("/etc/clang-shim.toml"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("/etc/clang-shim.toml"));
    }

    #[test]
    fn test_invalid_rule_message() {
        let err = ShimError::InvalidRule("empty drop_exact entry".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid rule in config: empty drop_exact entry"
        );
    }
}
