//! Form-style URL encoding of parameter values.
//!
//! Spaces travel as `+` in both directions, so a value matched from
//! `blog+post` decodes to `blog post` and encodes back to `blog+post`.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Bytes escaped when writing a value into a path. Space is handled
/// separately so it can become `+`.
const VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b' ');

/// [`VALUE`] with `/` left alone, for placeholders that span separators.
const PATH: &AsciiSet = &VALUE.remove(b'/');

/// Encodes a parameter value for use in a generated path.
#[must_use]
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, VALUE)
        .to_string()
        .replace(' ', "+")
}

/// Encodes a value that may span path separators, keeping `/` as is.
#[must_use]
pub fn encode_path(value: &str) -> String {
    utf8_percent_encode(value, PATH)
        .to_string()
        .replace(' ', "+")
}

/// Decodes a matched parameter value.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
#[must_use]
pub fn decode(value: &str) -> String {
    let spaced: Cow<'_, str> = if value.contains('+') {
        Cow::Owned(value.replace('+', " "))
    } else {
        Cow::Borrowed(value)
    };
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
