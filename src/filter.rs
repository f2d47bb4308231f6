//! Per-argument filtering for forwarded compiler flags
//!
//! Flags come from the build's current compiler, but the bytecode is produced
//! by an older clang. Each token is checked against an ordered rule table:
//! - Newer-compiler-only warnings: `-Wno-undefined-var-template`
//! - Debug info: `-g`, `/Z7`
//! - Sanitizer instrumentation: `-fsanitize*`, `-Dmemory_sanitizer_enabled`
//!
//! The first matching rule wins. Tokens that survive get their backslashes
//! turned into forward slashes (MSVC include paths arrive `\`-separated).
//! Empty tokens are never forwarded.
//!
//! Tokens that are not valid UTF-8 go through the same rules on unix, byte
//! for byte; elsewhere they are forwarded untouched.

use std::ffi::{OsStr, OsString};

use tracing::trace;

/// How a rule recognizes a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Token equals the string
    Exact(String),
    /// Token starts with the string
    Prefix(String),
}

impl Matcher {
    pub fn exact(s: impl Into<String>) -> Self {
        Matcher::Exact(s.into())
    }

    pub fn prefix(s: impl Into<String>) -> Self {
        Matcher::Prefix(s.into())
    }

    /// Check whether `token` is matched
    pub fn matches(&self, token: &str) -> bool {
        self.matches_bytes(token.as_bytes())
    }

    pub fn matches_bytes(&self, token: &[u8]) -> bool {
        match self {
            Matcher::Exact(s) => token == s.as_bytes(),
            Matcher::Prefix(s) => token.starts_with(s.as_bytes()),
        }
    }
}

/// What happens to a matched token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Remove the token from the command line
    Drop,
    /// Substitute another token
    Replace(String),
}

/// A single matcher -> action entry of the rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub matcher: Matcher,
    pub action: Action,
}

impl Rule {
    pub fn drop(matcher: Matcher) -> Self {
        Self {
            matcher,
            action: Action::Drop,
        }
    }

    pub fn replace(matcher: Matcher, with: impl Into<String>) -> Self {
        Self {
            matcher,
            action: Action::Replace(with.into()),
        }
    }
}

/// Ordered rule table applied to every forwarded argument
#[derive(Debug, Clone)]
pub struct ArgFilter {
    rules: Vec<Rule>,
}

impl Default for ArgFilter {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ArgFilter {
    /// The built-in rule set
    pub fn builtin() -> Self {
        let rules = vec![
            // Unknown to the older bytecode compiler
            Rule::drop(Matcher::exact("-Wno-undefined-var-template")),
            // No debug info in generated bytecode
            Rule::drop(Matcher::exact("-g")),
            Rule::drop(Matcher::exact("/Z7")),
            // No sanitizer instrumentation in generated bytecode
            Rule::drop(Matcher::prefix("-fsanitize")),
            Rule::drop(Matcher::exact("-Dmemory_sanitizer_enabled")),
            Rule::drop(Matcher::prefix("-fsanitize-blacklist")),
        ];
        Self { rules }
    }

    /// Append rules after the existing ones (earlier rules keep priority)
    pub fn with_rules(mut self, extra: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(extra);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    fn rule_for(&self, token: &[u8]) -> Option<&Rule> {
        self.rules.iter().find(|r| r.matcher.matches_bytes(token))
    }

    /// Map one token to its forwarded form, or `None` if it is dropped
    pub fn apply(&self, token: &str) -> Option<String> {
        let kept = match self.rule_for(token.as_bytes()).map(|r| &r.action) {
            Some(Action::Drop) => {
                trace!(token, "dropping argument");
                return None;
            }
            Some(Action::Replace(with)) => {
                trace!(token, replacement = %with, "replacing argument");
                with.as_str()
            }
            None => token,
        };

        if kept.is_empty() {
            trace!("dropping empty argument");
            return None;
        }
        Some(normalize_separators(kept))
    }

    /// [`ArgFilter::apply`] for tokens straight from argv, which may not be UTF-8
    pub fn apply_os(&self, token: &OsStr) -> Option<OsString> {
        match token.to_str() {
            Some(s) => self.apply(s).map(OsString::from),
            None => self.apply_raw(token),
        }
    }

    #[cfg(unix)]
    fn apply_raw(&self, token: &OsStr) -> Option<OsString> {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let bytes = token.as_bytes();
        let kept = match self.rule_for(bytes).map(|r| &r.action) {
            Some(Action::Drop) => {
                trace!(?token, "dropping argument");
                return None;
            }
            Some(Action::Replace(with)) => with.as_bytes(),
            None => bytes,
        };

        if kept.is_empty() {
            return None;
        }
        let normalized = kept
            .iter()
            .map(|&b| if b == b'\\' { b'/' } else { b })
            .collect();
        Some(OsString::from_vec(normalized))
    }

    #[cfg(not(unix))]
    fn apply_raw(&self, token: &OsStr) -> Option<OsString> {
        trace!(?token, "forwarding non-unicode argument unchanged");
        Some(token.to_os_string())
    }

    /// Filter a whole argument list, preserving the order of kept tokens
    pub fn filter_all<I, S>(&self, args: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        args.into_iter()
            .filter_map(|arg| self.apply(arg.as_ref()))
            .collect()
    }

    /// [`ArgFilter::filter_all`] over raw argv tokens
    pub fn filter_all_os<I, S>(&self, args: I) -> Vec<OsString>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        args.into_iter()
            .filter_map(|arg| self.apply_os(arg.as_ref()))
            .collect()
    }
}

/// Replace every `\` with `/`
pub fn normalize_separators(token: &str) -> String {
    token.replace('\\', "/")
}
