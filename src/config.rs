//! Optional TOML configuration for extra filter rules
//!
//! Without a config file the shim applies only its built-in rules.
//!
//! # Example clang-shim.toml
//!
//! ```toml
//! [filter]
//! drop_exact = ["-fno-newer-flag"]
//! drop_prefix = ["-fprofile-instr-"]
//!
//! [[filter.replace]]
//! from = "-std=c++17"
//! to = "-std=c++1z"
//!
//! [windows]
//! ms_compatibility_version = "19"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ShimError};
use crate::filter::{ArgFilter, Matcher, Rule};
use crate::platform::DEFAULT_MS_COMPATIBILITY_VERSION;

/// Environment variable holding the config file path
pub const CONFIG_ENV: &str = "CLANG_SHIM_CONFIG";

/// Root of clang-shim.toml
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ShimConfig {
    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub windows: WindowsConfig,
}

/// Extra argument rules, applied after the built-in ones
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    /// Tokens dropped on exact match
    #[serde(default)]
    pub drop_exact: Vec<String>,

    /// Tokens dropped when they start with one of these
    #[serde(default)]
    pub drop_prefix: Vec<String>,

    /// Exact-match substitutions
    #[serde(default)]
    pub replace: Vec<Replacement>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WindowsConfig {
    /// Value of `-fms-compatibility-version=` appended for Windows targets
    #[serde(default = "default_ms_compatibility_version")]
    pub ms_compatibility_version: String,
}

impl Default for WindowsConfig {
    fn default() -> Self {
        Self {
            ms_compatibility_version: default_ms_compatibility_version(),
        }
    }
}

fn default_ms_compatibility_version() -> String {
    DEFAULT_MS_COMPATIBILITY_VERSION.to_string()
}

impl ShimConfig {
    /// Load from the path in `CLANG_SHIM_CONFIG`, or defaults if unset
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::from_file(PathBuf::from(path)),
            _ => Ok(Self::default()),
        }
    }

    /// Load and validate a TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ShimError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&content).map_err(|source| ShimError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::debug!(
            path = %path.display(),
            rules = config.filter.rule_count(),
            "loaded config"
        );
        Ok(config)
    }

    /// Reject entries that would match every token or produce a bare flag
    pub fn validate(&self) -> Result<()> {
        if self.filter.drop_exact.iter().any(String::is_empty) {
            return Err(ShimError::InvalidRule("empty drop_exact entry".into()));
        }
        if self.filter.drop_prefix.iter().any(String::is_empty) {
            return Err(ShimError::InvalidRule(
                "empty drop_prefix entry would drop every argument".into(),
            ));
        }
        if self.filter.replace.iter().any(|r| r.from.is_empty()) {
            return Err(ShimError::InvalidRule("empty replace.from entry".into()));
        }
        if self.windows.ms_compatibility_version.trim().is_empty() {
            return Err(ShimError::InvalidRule(
                "windows.ms_compatibility_version must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Built-in filter extended with the configured rules
    pub fn arg_filter(&self) -> ArgFilter {
        ArgFilter::builtin().with_rules(self.filter.rules())
    }
}

impl FilterConfig {
    /// Configured rules in application order: exact drops, prefix drops, replacements
    pub fn rules(&self) -> Vec<Rule> {
        let exact = self
            .drop_exact
            .iter()
            .map(|s| Rule::drop(Matcher::exact(s.as_str())));
        let prefix = self
            .drop_prefix
            .iter()
            .map(|s| Rule::drop(Matcher::prefix(s.as_str())));
        let replace = self
            .replace
            .iter()
            .map(|r| Rule::replace(Matcher::exact(r.from.as_str()), r.to.as_str()));

        exact.chain(prefix).chain(replace).collect()
    }

    pub fn rule_count(&self) -> usize {
        self.drop_exact.len() + self.drop_prefix.len() + self.replace.len()
    }
}
