//! Pattern compilation errors.

use thiserror::Error;

/// Why a route pattern failed to compile.
///
/// Positions are byte offsets into the pattern as written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A `<` without a matching `>`.
    #[error("unterminated placeholder at position {position}")]
    UnterminatedPlaceholder { position: usize },

    /// A placeholder whose type is not `:`, `#` or `*`.
    #[error("unknown placeholder type `{sigil}` at position {position}")]
    UnknownSigil { sigil: char, position: usize },

    /// A placeholder name that cannot be used as a parameter key.
    #[error("invalid parameter name `{name}` at position {position}")]
    InvalidParamName { name: String, position: usize },

    /// A `|pattern` suffix on a `#` or `*` placeholder.
    #[error("placeholder `{name}` at position {position} has a custom pattern but is not a `:` placeholder")]
    CustomPatternNotAllowed { name: String, position: usize },

    /// A `<:name|>` placeholder with nothing after the bar.
    #[error("placeholder `{name}` at position {position} has an empty custom pattern")]
    EmptyCustomPattern { name: String, position: usize },

    /// A `)` with no open group.
    #[error("unbalanced `)` at position {position}")]
    UnbalancedGroup { position: usize },

    /// A `(` that is never closed.
    #[error("optional group opened at position {position} is never closed")]
    UnclosedGroup { position: usize },

    /// An optional group without exactly one placeholder of its own.
    #[error("optional group at position {position} must contain exactly one placeholder, found {found}")]
    GroupPlaceholderCount { position: usize, found: usize },

    /// The same parameter name used twice.
    #[error("duplicate parameter name `{0}`")]
    DuplicateParam(String),

    /// The generated matcher was rejected by the regex engine.
    #[error("invalid regular expression: {0}")]
    InvalidRegex(String),
}
