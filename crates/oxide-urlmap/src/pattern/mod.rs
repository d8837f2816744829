//! Route pattern compilation.
//!
//! Pattern syntax:
//! - `/user/login` - Literal path, matched by plain string comparison
//! - `<:name>` - Named parameter (letters, digits, `_`, `-`, `+`, `%`, whitespace)
//! - `<#name>` - Numeric parameter
//! - `<*name>` - Wildcard parameter (matches anything, including `/`)
//! - `<:name|regex>` - Named parameter constrained by an inline regex
//! - `(...)` - Optional group holding exactly one placeholder; groups nest
//! - `\c` - The character `c` taken literally
//!
//! # Example
//!
//! ```
//! use oxide_urlmap::pattern::compile;
//!
//! let compiled = compile("/<:module>/<#id>(.<:format>)").unwrap();
//! let captures = compiled.captures("event/164.json").unwrap();
//! assert_eq!(captures, vec![
//!     ("module".to_string(), "event".to_string()),
//!     ("id".to_string(), "164".to_string()),
//!     ("format".to_string(), "json".to_string()),
//! ]);
//! ```

mod compiler;
mod error;
mod lexer;

use regex::Regex;

pub use compiler::compile;
pub use error::PatternError;
pub use lexer::{Lexer, Token, has_placeholder, unescape};

/// Character class for `<:name>` placeholders.
pub const KEY_CLASS: &str = r"[a-zA-Z0-9_\-+%\s]+";

/// Character class for `<#name>` placeholders.
pub const NUMERIC_CLASS: &str = "[0-9]+";

/// Character class for `<*name>` placeholders.
pub const WILDCARD_CLASS: &str = ".*";

/// The value class of a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    /// `<#name>`: digits only.
    Numeric,
    /// `<*name>`: anything.
    Wildcard,
    /// `<:name>`: the default key class.
    Named,
    /// `<:name|regex>`: an inline regex body.
    Custom(String),
}

impl ParamKind {
    /// Returns the regex body used to capture this kind.
    #[must_use]
    pub fn regex_class(&self) -> &str {
        match self {
            Self::Numeric => NUMERIC_CLASS,
            Self::Wildcard => WILDCARD_CLASS,
            Self::Named => KEY_CLASS,
            Self::Custom(pattern) => pattern,
        }
    }

    /// Returns the sigil that introduces this kind.
    #[must_use]
    pub const fn sigil(&self) -> char {
        match self {
            Self::Numeric => '#',
            Self::Wildcard => '*',
            Self::Named | Self::Custom(_) => ':',
        }
    }

    /// Returns true if a captured value may contain `/`, so generated
    /// paths keep separators in it unescaped.
    #[must_use]
    pub const fn spans_separators(&self) -> bool {
        matches!(self, Self::Wildcard | Self::Custom(_))
    }
}

/// A named placeholder found in a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDescriptor {
    /// Parameter name.
    pub name: String,
    /// Value class.
    pub kind: ParamKind,
    /// Value used when nothing else supplies one. The compiler leaves this
    /// unset.
    pub default_value: Option<String>,
}

/// An optional `( ... )` group and the placeholder it wraps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalSegment {
    /// The wrapped placeholder as written, e.g. `<:format>`.
    pub placeholder_token: String,
    /// Literal text inside the group before the placeholder.
    pub prefix: String,
    /// Literal text inside the group after the placeholder, not counting
    /// nested groups.
    pub suffix: String,
    /// Name of the wrapped placeholder.
    pub param: String,
}

/// A node of the parsed pattern, used for URL generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    /// Index into the named parameters.
    Param(usize),
    Optional {
        /// Index into the optional segments.
        segment: usize,
        children: Vec<Segment>,
    },
}

/// How a compiled route recognizes a path.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Plain comparison against the trimmed literal.
    Exact(String),
    /// Anchored regular expression.
    Pattern(Regex),
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    pub(crate) matcher: Matcher,
    pub(crate) named_params: Vec<ParamDescriptor>,
    /// Innermost groups first.
    pub(crate) optional_params: Vec<OptionalSegment>,
    pub(crate) template: Vec<Segment>,
}

impl CompiledRoute {
    /// Returns true if the pattern has no placeholders.
    #[must_use]
    pub const fn is_static(&self) -> bool {
        matches!(self.matcher, Matcher::Exact(_))
    }

    /// Returns the matcher.
    #[must_use]
    pub const fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Returns the compiled regex source, or `None` for static routes.
    #[must_use]
    pub fn regex(&self) -> Option<&str> {
        match &self.matcher {
            Matcher::Exact(_) => None,
            Matcher::Pattern(regex) => Some(regex.as_str()),
        }
    }

    /// Every placeholder, in order of appearance.
    #[must_use]
    pub fn named_params(&self) -> &[ParamDescriptor] {
        &self.named_params
    }

    /// Every optional group, innermost first.
    #[must_use]
    pub fn optional_params(&self) -> &[OptionalSegment] {
        &self.optional_params
    }

    /// Looks up a placeholder by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParamDescriptor> {
        self.named_params.iter().find(|p| p.name == name)
    }

    /// Returns true if the placeholder sits inside an optional group.
    #[must_use]
    pub fn is_optional(&self, name: &str) -> bool {
        self.optional_params.iter().any(|o| o.param == name)
    }

    /// Matches a path and returns the raw captured values, in placeholder
    /// order. Placeholders in groups absent from the path are left out.
    ///
    /// Leading and trailing `/` are ignored on both sides.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<Vec<(String, String)>> {
        let path = path.trim_matches('/');
        match &self.matcher {
            Matcher::Exact(literal) => (literal == path).then(Vec::new),
            Matcher::Pattern(regex) => {
                let caps = regex.captures(path)?;
                Some(
                    self.named_params
                        .iter()
                        .filter_map(|p| {
                            caps.name(&p.name)
                                .map(|m| (p.name.clone(), m.as_str().to_string()))
                        })
                        .collect(),
                )
            }
        }
    }
}
