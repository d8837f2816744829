//! Compiles route patterns into matchers and generation templates.

use regex::Regex;

use super::error::PatternError;
use super::lexer::{Lexer, Token, has_placeholder, unescape};
use super::{CompiledRoute, Matcher, OptionalSegment, ParamDescriptor, ParamKind, Segment};

/// Compiles a route pattern.
///
/// Patterns without placeholders compile to an exact matcher and never
/// touch the regex engine.
///
/// # Errors
///
/// Returns a [`PatternError`] for unbalanced groups, duplicate parameter
/// names, unknown placeholder types or an invalid inline regex.
pub fn compile(pattern: &str) -> Result<CompiledRoute, PatternError> {
    if !has_placeholder(pattern) {
        let literal = unescape(pattern);
        return Ok(CompiledRoute {
            matcher: Matcher::Exact(literal.trim_matches('/').to_string()),
            named_params: Vec::new(),
            optional_params: Vec::new(),
            template: vec![Segment::Literal(literal)],
        });
    }

    let tokens = Lexer::new(pattern).tokenize()?;
    let Parsed {
        template,
        named_params,
        optional_params,
    } = parse(tokens)?;

    let mut source = String::from("^");
    write_segments(&mut source, &template, &named_params, Edge::Always, Edge::Always);
    source.push('$');

    let regex = Regex::new(&source).map_err(|e| PatternError::InvalidRegex(e.to_string()))?;

    Ok(CompiledRoute {
        matcher: Matcher::Pattern(regex),
        named_params,
        optional_params,
        template,
    })
}

/// Output of the group parser.
struct Parsed {
    template: Vec<Segment>,
    named_params: Vec<ParamDescriptor>,
    optional_params: Vec<OptionalSegment>,
}

/// An open optional group while parsing.
struct Group {
    open_at: usize,
    segments: Vec<Segment>,
    /// Placeholders directly inside this group, ignoring nested groups.
    placeholders: usize,
    placeholder_token: String,
    param: Option<String>,
    prefix: String,
    suffix: String,
}

impl Group {
    fn new(open_at: usize) -> Self {
        Self {
            open_at,
            segments: Vec::new(),
            placeholders: 0,
            placeholder_token: String::new(),
            param: None,
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

/// Folds the token stream into a segment tree.
///
/// Groups are kept on an explicit stack. A group is finished when its `)`
/// arrives, so nested groups always resolve before the group enclosing
/// them and `optional_params` comes out innermost first.
fn parse(tokens: Vec<Token>) -> Result<Parsed, PatternError> {
    let mut root: Vec<Segment> = Vec::new();
    let mut stack: Vec<Group> = Vec::new();
    let mut named_params: Vec<ParamDescriptor> = Vec::new();
    let mut optional_params: Vec<OptionalSegment> = Vec::new();

    for token in tokens {
        match token {
            Token::Literal(text) => {
                if let Some(group) = stack.last_mut() {
                    if group.param.is_none() {
                        group.prefix.push_str(&text);
                    } else {
                        group.suffix.push_str(&text);
                    }
                    group.segments.push(Segment::Literal(text));
                } else {
                    root.push(Segment::Literal(text));
                }
            }
            Token::Placeholder {
                sigil,
                body,
                raw,
                position,
            } => {
                let descriptor = descriptor(sigil, &body, position)?;
                if named_params.iter().any(|p| p.name == descriptor.name) {
                    return Err(PatternError::DuplicateParam(descriptor.name));
                }
                let segment = Segment::Param(named_params.len());
                if let Some(group) = stack.last_mut() {
                    group.placeholders += 1;
                    if group.param.is_none() {
                        group.param = Some(descriptor.name.clone());
                        group.placeholder_token = raw;
                    }
                    group.segments.push(segment);
                } else {
                    root.push(segment);
                }
                named_params.push(descriptor);
            }
            Token::GroupOpen(position) => stack.push(Group::new(position)),
            Token::GroupClose(position) => {
                let group = stack
                    .pop()
                    .ok_or(PatternError::UnbalancedGroup { position })?;
                let param = match (group.placeholders, group.param) {
                    (1, Some(param)) => param,
                    (found, _) => {
                        return Err(PatternError::GroupPlaceholderCount {
                            position: group.open_at,
                            found,
                        })
                    }
                };
                let segment = Segment::Optional {
                    segment: optional_params.len(),
                    children: group.segments,
                };
                optional_params.push(OptionalSegment {
                    placeholder_token: group.placeholder_token,
                    prefix: group.prefix,
                    suffix: group.suffix,
                    param,
                });
                match stack.last_mut() {
                    Some(parent) => parent.segments.push(segment),
                    None => root.push(segment),
                }
            }
        }
    }

    if let Some(group) = stack.first() {
        return Err(PatternError::UnclosedGroup {
            position: group.open_at,
        });
    }

    Ok(Parsed {
        template: root,
        named_params,
        optional_params,
    })
}

/// Builds the descriptor for one placeholder.
fn descriptor(sigil: char, body: &str, position: usize) -> Result<ParamDescriptor, PatternError> {
    let (name, custom) = match body.split_once('|') {
        Some((name, custom)) => (name, Some(custom)),
        None => (body, None),
    };

    if !is_valid_name(name) {
        return Err(PatternError::InvalidParamName {
            name: name.to_string(),
            position,
        });
    }

    let kind = match (sigil, custom) {
        ('#', None) => ParamKind::Numeric,
        ('*', None) => ParamKind::Wildcard,
        (':', None) => ParamKind::Named,
        (':', Some("")) => {
            return Err(PatternError::EmptyCustomPattern {
                name: name.to_string(),
                position,
            })
        }
        (':', Some(custom)) => ParamKind::Custom(unescape_angles(custom)),
        (_, Some(_)) => {
            return Err(PatternError::CustomPatternNotAllowed {
                name: name.to_string(),
                position,
            })
        }
        (other, None) => {
            return Err(PatternError::UnknownSigil {
                sigil: other,
                position,
            })
        }
    };

    Ok(ParamDescriptor {
        name: name.to_string(),
        kind,
        default_value: None,
    })
}

/// Turns `\<` and `\>` back into plain angle brackets.
///
/// They are escaped only to keep the placeholder open. The regex crate
/// reads `\<` and `\>` as word boundaries.
fn unescape_angles(custom: &str) -> String {
    let mut out = String::with_capacity(custom.len());
    let mut chars = custom.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next @ ('<' | '>')) => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Parameter names must be usable as regex group names.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether a position in the pattern sits on an edge of the trimmed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    /// Nothing can appear between this position and the edge.
    Always,
    /// Only optional groups lie between this position and the edge.
    Maybe,
    /// Required text lies between this position and the edge.
    Never,
}

impl Edge {
    /// The edge state on the far side of `segment`.
    fn past(self, segment: &Segment) -> Self {
        match segment {
            Segment::Literal(text) if is_separator_run(text) => self,
            Segment::Optional { .. } if self != Self::Never => Self::Maybe,
            _ => Self::Never,
        }
    }
}

fn is_separator_run(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b == b'/')
}

/// Writes a segment list whose start and end sit at the given edges.
///
/// Paths are trimmed of `/` before matching. A separator that always
/// touches an edge is dropped, and one that only touches an edge when the
/// optional groups beside it are absent becomes `(?:^|/)` or `(?:/|$)`.
fn write_segments(
    out: &mut String,
    segments: &[Segment],
    params: &[ParamDescriptor],
    start: Edge,
    end: Edge,
) {
    let mut ends = vec![end; segments.len()];
    let mut state = end;
    for (i, segment) in segments.iter().enumerate().rev() {
        ends[i] = state;
        state = state.past(segment);
    }

    let mut before = start;
    for (segment, after) in segments.iter().zip(ends) {
        write_segment(out, segment, params, before, after);
        before = before.past(segment);
    }
}

fn write_segment(
    out: &mut String,
    segment: &Segment,
    params: &[ParamDescriptor],
    before: Edge,
    after: Edge,
) {
    match segment {
        Segment::Literal(text) => write_literal(out, text, before, after),
        Segment::Param(index) => {
            let param = &params[*index];
            out.push_str("(?P<");
            out.push_str(&param.name);
            out.push('>');
            out.push_str(param.kind.regex_class());
            out.push(')');
        }
        Segment::Optional { children, .. } => {
            out.push_str("(?:");
            write_segments(out, children, params, before, after);
            out.push_str(")?");
        }
    }
}

fn write_literal(out: &mut String, text: &str, before: Edge, after: Edge) {
    if is_separator_run(text) {
        match (before, after) {
            (Edge::Always, _) | (_, Edge::Always) => {}
            (Edge::Maybe, Edge::Maybe) => out.push_str("(?:^|/|$)"),
            (Edge::Maybe, Edge::Never) => out.push_str("(?:^|/)"),
            (Edge::Never, Edge::Maybe) => out.push_str("(?:/|$)"),
            (Edge::Never, Edge::Never) => out.push_str(&regex::escape(text)),
        }
        return;
    }

    let head = if before == Edge::Never {
        text
    } else {
        text.trim_start_matches('/')
    };
    if before == Edge::Maybe && head.len() != text.len() {
        out.push_str("(?:^|/)");
    }
    let body = if after == Edge::Never {
        head
    } else {
        head.trim_end_matches('/')
    };
    out.push_str(&regex::escape(body));
    if after == Edge::Maybe && body.len() != head.len() {
        out.push_str("(?:/|$)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{KEY_CLASS, NUMERIC_CLASS};

    fn regex_of(pattern: &str) -> String {
        compile(pattern).unwrap().regex().unwrap().to_string()
    }

    fn names(compiled: &CompiledRoute) -> Vec<&str> {
        compiled
            .named_params()
            .iter()
            .map(|p| p.name.as_str())
            .collect()
    }

    #[test]
    fn test_static_pattern() {
        let compiled = compile("/user/login").unwrap();
        assert!(compiled.is_static());
        assert!(compiled.regex().is_none());
        assert!(compiled.named_params().is_empty());
        assert!(compiled.optional_params().is_empty());
        assert_eq!(compiled.captures("/user/login/"), Some(vec![]));
        assert_eq!(compiled.captures("/user/logout"), None);
    }

    #[test]
    fn test_static_pattern_keeps_parens_literal() {
        let compiled = compile("/about(us)").unwrap();
        assert!(compiled.is_static());
        assert!(compiled.captures("about(us)").is_some());
    }

    #[test]
    fn test_named_param_regex() {
        assert_eq!(
            regex_of("/alphanumeric/<:alphanum>"),
            format!("^alphanumeric/(?P<alphanum>{KEY_CLASS})$")
        );
    }

    #[test]
    fn test_numeric_param_regex() {
        assert_eq!(
            regex_of("/number/<#id>"),
            format!("^number/(?P<id>{NUMERIC_CLASS})$")
        );
    }

    #[test]
    fn test_wildcard_param_regex() {
        assert_eq!(regex_of("/wildcard/<*overflow>"), "^wildcard/(?P<overflow>.*)$");
    }

    #[test]
    fn test_custom_param_regex() {
        assert_eq!(
            regex_of(r"/custom/<:custom|\d{4}-\d{2}-\d{2}>"),
            r"^custom/(?P<custom>\d{4}-\d{2}-\d{2})$"
        );
    }

    #[test]
    fn test_literal_dot_is_escaped() {
        assert_eq!(
            regex_of("<:action>.<:format>"),
            format!("^(?P<action>{KEY_CLASS})\\.(?P<format>{KEY_CLASS})$")
        );
    }

    #[test]
    fn test_optional_group_regex() {
        assert_eq!(
            regex_of("/optional(/<:action>)"),
            format!("^optional(?:/(?P<action>{KEY_CLASS}))?$")
        );
    }

    #[test]
    fn test_nested_groups() {
        let compiled = compile("/(<:controller>(/<:action>(/<#id>)))").unwrap();
        assert_eq!(
            compiled.regex().unwrap(),
            format!(
                "^(?:(?P<controller>{KEY_CLASS})(?:/(?P<action>{KEY_CLASS})(?:/(?P<id>{NUMERIC_CLASS}))?)?)?$"
            )
        );
        assert_eq!(names(&compiled), vec!["controller", "action", "id"]);

        let optional: Vec<&str> = compiled
            .optional_params()
            .iter()
            .map(|o| o.param.as_str())
            .collect();
        assert_eq!(optional, vec!["id", "action", "controller"]);
    }

    #[test]
    fn test_optional_segment_descriptor() {
        let compiled = compile("<:controller>(.<:format>!)").unwrap();
        let segment = &compiled.optional_params()[0];
        assert_eq!(segment.placeholder_token, "<:format>");
        assert_eq!(segment.prefix, ".");
        assert_eq!(segment.suffix, "!");
        assert_eq!(segment.param, "format");
        assert!(compiled.is_optional("format"));
        assert!(!compiled.is_optional("controller"));
    }

    #[test]
    fn test_param_kinds() {
        let compiled = compile("<:a>/<#b>/<*c>/<:d|x+>").unwrap();
        let kinds: Vec<&ParamKind> = compiled.named_params().iter().map(|p| &p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                &ParamKind::Named,
                &ParamKind::Numeric,
                &ParamKind::Wildcard,
                &ParamKind::Custom("x+".into()),
            ]
        );
        assert!(compiled.named_params().iter().all(|p| p.default_value.is_none()));
    }

    #[test]
    fn test_custom_alternation_stays_inside_capture() {
        let compiled = compile("/api/<:controller|first|second|third|fourth>(/<#id>)").unwrap();
        assert!(compiled.captures("api/first").is_some());
        assert!(compiled.captures("api/fourth/2").is_some());
        assert!(compiled.captures("api/fifth").is_none());
    }

    #[test]
    fn test_captures_skip_absent_optionals() {
        let compiled = compile("/<:module>/<#id>(.<:format>)").unwrap();
        assert_eq!(
            compiled.captures("/user/235"),
            Some(vec![
                ("module".to_string(), "user".to_string()),
                ("id".to_string(), "235".to_string()),
            ])
        );
    }

    #[test]
    fn test_inner_group_needs_outer() {
        let compiled = compile("<:c>(/<:a>(/<#id>))").unwrap();
        assert!(compiled.captures("user/view/5").is_some());
        assert!(compiled.captures("user/5").is_some()); // `5` is a valid action
        assert!(compiled.captures("user//5").is_none());
    }

    #[test]
    fn test_leading_group_separator_follows_trimmed_path() {
        let compiled = compile("(/<:lang>)/about").unwrap();
        assert_eq!(
            compiled.regex().unwrap(),
            format!("^(?:(?P<lang>{KEY_CLASS}))?(?:^|/)about$")
        );
        assert_eq!(
            compiled.captures("en/about"),
            Some(vec![("lang".to_string(), "en".to_string())])
        );
        assert_eq!(compiled.captures("/about"), Some(vec![]));
        assert!(compiled.captures("enabout").is_none());
    }

    #[test]
    fn test_trailing_group_separator_follows_trimmed_path() {
        let compiled = compile("<:a>(/<:b>/)").unwrap();
        assert_eq!(
            compiled.regex().unwrap(),
            format!("^(?P<a>{KEY_CLASS})(?:/(?P<b>{KEY_CLASS}))?$")
        );
        assert!(compiled.captures("x/y/").is_some());
        assert!(compiled.captures("x").is_some());
    }

    #[test]
    fn test_separator_between_edge_groups() {
        let compiled = compile("(<:a>)/(<:b>)").unwrap();
        assert!(compiled.captures("x/y").is_some());
        assert!(compiled.captures("x").is_some());
        assert!(compiled.captures("/y").is_some());
        assert!(compiled.captures("").is_some());
    }

    #[test]
    fn test_escaped_angles_in_custom_pattern_are_literal() {
        let compiled = compile(r"/tag/<:tag|\<[a-z]+\>>").unwrap();
        assert_eq!(
            compiled.named_params()[0].kind,
            ParamKind::Custom("<[a-z]+>".into())
        );
        assert_eq!(
            compiled.captures("tag/<b>"),
            Some(vec![("tag".to_string(), "<b>".to_string())])
        );
        assert!(compiled.captures("tag/b").is_none());
    }

    #[test]
    fn test_other_escapes_in_custom_pattern_are_kept() {
        let compiled = compile(r"<:id|\d+\.\d+>").unwrap();
        assert_eq!(
            compiled.named_params()[0].kind,
            ParamKind::Custom(r"\d+\.\d+".into())
        );
    }

    #[test]
    fn test_duplicate_param() {
        assert_eq!(
            compile("/<:id>/<#id>").unwrap_err(),
            PatternError::DuplicateParam("id".into())
        );
    }

    #[test]
    fn test_unbalanced_close() {
        assert_eq!(
            compile("/<:a>)").unwrap_err(),
            PatternError::UnbalancedGroup { position: 5 }
        );
    }

    #[test]
    fn test_unclosed_group() {
        assert_eq!(
            compile("/<:a>(/<:b>").unwrap_err(),
            PatternError::UnclosedGroup { position: 5 }
        );
    }

    #[test]
    fn test_group_needs_one_placeholder() {
        assert_eq!(
            compile("<:a>(/x)").unwrap_err(),
            PatternError::GroupPlaceholderCount {
                position: 4,
                found: 0
            }
        );
        assert_eq!(
            compile("(<:a>/<:b>)").unwrap_err(),
            PatternError::GroupPlaceholderCount {
                position: 0,
                found: 2
            }
        );
    }

    #[test]
    fn test_custom_pattern_only_on_named() {
        assert!(matches!(
            compile("<#id|\\d+>").unwrap_err(),
            PatternError::CustomPatternNotAllowed { .. }
        ));
        assert!(matches!(
            compile("<:id|>").unwrap_err(),
            PatternError::EmptyCustomPattern { .. }
        ));
    }

    #[test]
    fn test_invalid_name() {
        assert!(matches!(
            compile("<:9lives>").unwrap_err(),
            PatternError::InvalidParamName { .. }
        ));
        assert!(matches!(
            compile("<:>").unwrap_err(),
            PatternError::InvalidParamName { .. }
        ));
    }

    #[test]
    fn test_invalid_custom_regex() {
        assert!(matches!(
            compile("<:id|[0-9>").unwrap_err(),
            PatternError::InvalidRegex(_)
        ));
    }
}
