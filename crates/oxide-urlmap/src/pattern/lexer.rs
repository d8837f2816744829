//! Route pattern tokenizer.

use super::error::PatternError;

/// A token of the route pattern grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text, with escapes already removed.
    Literal(String),
    /// A `<sigil name>` or `<:name|pattern>` placeholder.
    Placeholder {
        /// One of `:`, `#` or `*`.
        sigil: char,
        /// Everything between the sigil and the closing `>`.
        body: String,
        /// The placeholder exactly as written.
        raw: String,
        /// Byte offset of the opening `<`.
        position: usize,
    },
    /// `(` opening an optional group.
    GroupOpen(usize),
    /// `)` closing an optional group.
    GroupClose(usize),
}

/// A lexer that splits a route pattern into tokens.
pub struct Lexer<'a> {
    /// The input pattern.
    input: &'a str,
    /// The current byte position.
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given pattern.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Tokenizes the whole input.
    ///
    /// # Errors
    ///
    /// Returns an error for an unterminated placeholder or an unknown
    /// placeholder sigil.
    pub fn tokenize(mut self) -> Result<Vec<Token>, PatternError> {
        let mut tokens = Vec::new();
        let mut literal = String::new();

        while let Some(c) = self.peek() {
            match c {
                '\\' => {
                    self.advance();
                    // A trailing backslash stands for itself.
                    literal.push(self.advance().unwrap_or('\\'));
                }
                '<' | '(' | ')' => {
                    if !literal.is_empty() {
                        tokens.push(Token::Literal(std::mem::take(&mut literal)));
                    }
                    let start = self.pos;
                    match c {
                        '<' => tokens.push(self.scan_placeholder()?),
                        '(' => {
                            self.advance();
                            tokens.push(Token::GroupOpen(start));
                        }
                        _ => {
                            self.advance();
                            tokens.push(Token::GroupClose(start));
                        }
                    }
                }
                _ => {
                    literal.push(c);
                    self.advance();
                }
            }
        }

        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Ok(tokens)
    }

    /// Scans a placeholder starting at `<`.
    fn scan_placeholder(&mut self) -> Result<Token, PatternError> {
        let position = self.pos;
        self.advance(); // <

        let sigil = match self.advance() {
            Some(s @ (':' | '#' | '*')) => s,
            Some(other) => {
                return Err(PatternError::UnknownSigil {
                    sigil: other,
                    position,
                })
            }
            None => return Err(PatternError::UnterminatedPlaceholder { position }),
        };

        let body_start = self.pos;
        loop {
            match self.advance() {
                Some('>') => break,
                // Escapes inside a placeholder belong to the custom pattern;
                // keep them, but never let them close the placeholder.
                Some('\\') => {
                    if self.advance().is_none() {
                        return Err(PatternError::UnterminatedPlaceholder { position });
                    }
                }
                Some(_) => {}
                None => return Err(PatternError::UnterminatedPlaceholder { position }),
            }
        }

        Ok(Token::Placeholder {
            sigil,
            body: self.input[body_start..self.pos - 1].to_string(),
            raw: self.input[position..self.pos].to_string(),
            position,
        })
    }
}

/// Returns true if the pattern contains placeholder syntax.
#[must_use]
pub fn has_placeholder(pattern: &str) -> bool {
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '<' => return true,
            _ => {}
        }
    }
    false
}

/// Removes grammar escapes from literal text.
#[must_use]
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            out.push(chars.next().unwrap_or('\\'));
        } else {
            out.push(c);
        }
    }
    out
}
