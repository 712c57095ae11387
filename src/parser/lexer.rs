use std::{borrow::Cow, char, iter::Peekable, ops::Deref, str::CharIndices};

use derive_more::with_trait::{Display, Error};

use crate::parser::{SourcePosition, Spanning};

#[doc(hidden)]
#[derive(Debug)]
pub struct Lexer<'a> {
    iterator: Peekable<CharIndices<'a>>,
    source: &'a str,
    position: SourcePosition,
    after_carriage_return: bool,
    has_reached_eof: bool,
}

/// Representation of a raw unparsed scalar value literal.
///
/// This is only used for tagging how the lexer has interpreted a value literal
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ScalarToken<'a> {
    String(StringLiteral<'a>),
    Float(&'a str),
    Int(&'a str),
}

/// Representation of a raw unparsed [String Value] literal (quotes excluded).
///
/// The content is kept exactly as written in the source: escape sequences are
/// not decoded until [`StringLiteral::parse()`] is called.
///
/// [String Value]: https://spec.graphql.org/October2021#sec-String-Value
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum StringLiteral<'a> {
    /// [Quoted][0] literal (denoted by single quotes `"`).
    ///
    /// [0]: https://spec.graphql.org/October2021#StringCharacter
    Quoted(&'a str),

    /// [Block][0] literal (denoted by triple quotes `"""`).
    ///
    /// [0]: https://spec.graphql.org/October2021#BlockStringCharacter
    Block(&'a str),
}

impl Deref for StringLiteral<'_> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Quoted(s) => s,
            Self::Block(s) => s,
        }
    }
}

impl<'a> StringLiteral<'a> {
    /// Decodes this literal into the string value it denotes.
    ///
    /// Quoted literals get their escape sequences resolved. Block literals get
    /// `\"""` unescaped, their common indentation removed and their blank
    /// leading and trailing lines dropped.
    ///
    /// # Errors
    ///
    /// If a quoted literal contains an invalid escape sequence.
    pub fn parse(self) -> Result<Cow<'a, str>, LexerError> {
        match self {
            Self::Quoted(s) if !s.contains('\\') => Ok(Cow::Borrowed(s)),
            Self::Quoted(s) => unescape_quoted(s).map(Cow::Owned),
            Self::Block(s) => Ok(Cow::Owned(block_string_value(s))),
        }
    }
}

fn unescape_quoted(s: &str) -> Result<String, LexerError> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000c}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let escape = chars.by_ref().take(4).collect::<String>();
                let decoded = (escape.len() == 4)
                    .then(|| u32::from_str_radix(&escape, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or_else(|| LexerError::UnknownEscapeSequence(format!("\\u{escape}")))?;
                out.push(decoded);
            }
            Some(c) => return Err(LexerError::UnknownEscapeSequence(format!("\\{c}"))),
            None => return Err(LexerError::UnknownEscapeSequence("\\".into())),
        }
    }

    Ok(out)
}

fn block_string_value(raw: &str) -> String {
    let raw = raw.replace("\\\"\"\"", "\"\"\"");
    let lines = raw
        .split("\r\n")
        .flat_map(|l| l.split(['\n', '\r']))
        .collect::<Vec<_>>();

    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|l| !is_blank(l))
        .map(|l| leading_whitespace(l))
        .min()
        .unwrap_or(0);

    let dedented = lines
        .iter()
        .enumerate()
        .map(|(i, l)| if i == 0 { *l } else { &l[common_indent.min(l.len())..] })
        .collect::<Vec<_>>();

    let first = dedented.iter().position(|l| !is_blank(l));
    let last = dedented.iter().rposition(|l| !is_blank(l));
    match (first, last) {
        (Some(first), Some(last)) => dedented[first..=last].join("\n"),
        _ => String::new(),
    }
}

fn leading_whitespace(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

fn is_blank(line: &str) -> bool {
    leading_whitespace(line) == line.len()
}

/// A single token in the input source
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Token<'a> {
    Name(&'a str),
    Scalar(ScalarToken<'a>),
    #[display("!")]
    ExclamationMark,
    #[display("$")]
    Dollar,
    #[display("&")]
    Ampersand,
    #[display("(")]
    ParenOpen,
    #[display(")")]
    ParenClose,
    #[display("[")]
    BracketOpen,
    #[display("]")]
    BracketClose,
    #[display("{{")]
    CurlyOpen,
    #[display("}}")]
    CurlyClose,
    #[display("...")]
    Ellipsis,
    #[display(":")]
    Colon,
    #[display("=")]
    Equals,
    #[display("@")]
    At,
    #[display("|")]
    Pipe,
    /// Renders as an empty string, which is what syntax errors report as the
    /// token found at the end of the input.
    #[display("")]
    EndOfFile,
}

/// Error when tokenizing the input source
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum LexerError {
    /// An unknown character was found
    ///
    /// Unknown characters are characters that cannot start any GraphQL token,
    /// such as `?` or `%`.
    #[display("Unexpected \"{_0}\"")]
    UnknownCharacter(#[error(not(source))] char),

    /// An unexpected character was found
    ///
    /// Unexpected characters are characters that _do_ exist in the GraphQL
    /// language, but is not expected at the current position in the document.
    #[display("Unexpected character \"{_0}\"")]
    UnexpectedCharacter(#[error(not(source))] char),

    /// An unterminated string literal was found
    ///
    /// Apart from forgetting the ending `"`, terminating a string within a
    /// Unicode escape sequence or having a line break in the string also
    /// causes this error.
    #[display("Unterminated string")]
    UnterminatedString,

    /// An unterminated block string literal was found.
    #[display("Unterminated block string")]
    UnterminatedBlockString,

    /// An unknown character in a string literal was found
    ///
    /// This occurs when an invalid source character is found in a string
    /// literal, such as ASCII control characters.
    #[display("Unknown character \"{_0}\" in string literal")]
    UnknownCharacterInString(#[error(not(source))] char),

    /// An unknown escape sequence in a string literal was found
    ///
    /// Only a limited set of escape sequences are supported, this is emitted
    /// when e.g. `"\l"` is parsed.
    #[display("Unknown escape sequence \"{_0}\" in string")]
    UnknownEscapeSequence(#[error(not(source))] String),

    /// The input source was unexpectedly terminated
    ///
    /// Emitted when the current token requires a succeeding character, but
    /// the source has reached EOF. Emitted when scanning e.g. `"1."`.
    #[display("Unexpected end of input")]
    UnexpectedEndOfFile,
}

/// Result of scanning a single token.
pub type LexerResult<'a> = Result<Spanning<Token<'a>>, Spanning<LexerError>>;

impl<'a> Lexer<'a> {
    #[doc(hidden)]
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            iterator: source.char_indices().peekable(),
            source,
            position: SourcePosition::new_origin(),
            after_carriage_return: false,
            has_reached_eof: false,
        }
    }

    fn peek_char(&mut self) -> Option<(usize, char)> {
        self.iterator.peek().copied()
    }

    fn next_char(&mut self) -> Option<(usize, char)> {
        let next = self.iterator.next();

        if let Some((_, ch)) = next {
            match ch {
                '\n' if self.after_carriage_return => self.position.advance_index(1),
                '\n' | '\r' => self.position.advance_line(),
                _ => self.position.advance_col(ch.len_utf8()),
            }
            self.after_carriage_return = ch == '\r';
        }

        next
    }

    fn emit_single_char(&mut self, t: Token<'a>) -> Spanning<Token<'a>> {
        let start_pos = self.position;

        self.next_char();

        Spanning::single_width(&start_pos, t)
    }

    fn scan_over_whitespace(&mut self) {
        while let Some((_, ch)) = self.peek_char() {
            match ch {
                '\t' | ' ' | '\n' | '\r' | ',' | '\u{feff}' => {
                    self.next_char();
                }
                '#' => {
                    self.next_char();

                    while let Some((_, ch)) = self.peek_char() {
                        if ch == '\n' || ch == '\r' || !is_source_char(ch) {
                            break;
                        }
                        self.next_char();
                    }
                }
                _ => break,
            }
        }
    }

    fn scan_ellipsis(&mut self) -> LexerResult<'a> {
        let start_pos = self.position;

        for _ in 0..3 {
            match self.next_char() {
                Some((_, '.')) => {}
                _ => {
                    return Err(Spanning::zero_width(
                        &start_pos,
                        LexerError::UnexpectedCharacter('.'),
                    ));
                }
            }
        }

        Ok(Spanning::start_end(
            &start_pos,
            &self.position,
            Token::Ellipsis,
        ))
    }

    fn scan_name(&mut self) -> LexerResult<'a> {
        let start_pos = self.position;
        let start_idx = start_pos.index();

        while let Some((_, ch)) = self.peek_char() {
            if is_name_cont(ch) {
                self.next_char();
            } else {
                break;
            }
        }

        Ok(Spanning::start_end(
            &start_pos,
            &self.position,
            Token::Name(&self.source[start_idx..self.position.index()]),
        ))
    }

    fn scan_string(&mut self) -> LexerResult<'a> {
        let start_pos = self.position;
        // Opening quote.
        self.next_char();

        let mut escaped = false;
        let mut old_pos = self.position;
        while let Some((idx, ch)) = self.next_char() {
            match ch {
                'b' | 'f' | 'n' | 'r' | 't' | '\\' | '/' | '"' if escaped => {
                    escaped = false;
                }
                'u' if escaped => {
                    self.scan_escaped_unicode(&old_pos)?;
                    escaped = false;
                }
                c if escaped => {
                    return Err(Spanning::zero_width(
                        &old_pos,
                        LexerError::UnknownEscapeSequence(format!("\\{c}")),
                    ));
                }
                '\\' => escaped = true,
                '"' => {
                    return Ok(Spanning::start_end(
                        &start_pos,
                        &self.position,
                        Token::Scalar(ScalarToken::String(StringLiteral::Quoted(
                            &self.source[start_pos.index() + 1..idx],
                        ))),
                    ));
                }
                '\n' | '\r' => {
                    return Err(Spanning::zero_width(
                        &old_pos,
                        LexerError::UnterminatedString,
                    ));
                }
                c if !is_source_char(c) => {
                    return Err(Spanning::zero_width(
                        &old_pos,
                        LexerError::UnknownCharacterInString(c),
                    ));
                }
                _ => {}
            }
            old_pos = self.position;
        }

        Err(Spanning::zero_width(
            &self.position,
            LexerError::UnterminatedString,
        ))
    }

    fn scan_block_string(&mut self) -> LexerResult<'a> {
        let start_pos = self.position;
        for _ in 0..3 {
            self.next_char();
        }
        let content_start = self.position.index();

        let mut old_pos = self.position;
        while let Some((idx, ch)) = self.next_char() {
            let rest = &self.source[idx..];
            if ch == '\\' && rest.starts_with("\\\"\"\"") {
                for _ in 0..3 {
                    self.next_char();
                }
            } else if ch == '"' && rest.starts_with("\"\"\"") {
                self.next_char();
                self.next_char();
                return Ok(Spanning::start_end(
                    &start_pos,
                    &self.position,
                    Token::Scalar(ScalarToken::String(StringLiteral::Block(
                        &self.source[content_start..idx],
                    ))),
                ));
            } else if !is_source_char(ch) {
                return Err(Spanning::zero_width(
                    &old_pos,
                    LexerError::UnknownCharacterInString(ch),
                ));
            }
            old_pos = self.position;
        }

        Err(Spanning::zero_width(
            &self.position,
            LexerError::UnterminatedBlockString,
        ))
    }

    fn scan_escaped_unicode(
        &mut self,
        start_pos: &SourcePosition,
    ) -> Result<(), Spanning<LexerError>> {
        let (start_idx, _) = self
            .peek_char()
            .ok_or_else(|| Spanning::zero_width(&self.position, LexerError::UnterminatedString))?;
        let mut end_idx = start_idx;
        let mut len = 0;

        for _ in 0..4 {
            match self.peek_char() {
                Some((idx, ch)) if ch.is_ascii_hexdigit() => {
                    self.next_char();
                    end_idx = idx + 1;
                    len += 1;
                }
                Some(_) => break,
                None => {
                    return Err(Spanning::zero_width(
                        &self.position,
                        LexerError::UnterminatedString,
                    ));
                }
            }
        }

        let escape = &self.source[start_idx..end_idx];
        if len != 4 {
            return Err(Spanning::zero_width(
                start_pos,
                LexerError::UnknownEscapeSequence(format!("\\u{escape}")),
            ));
        }

        u32::from_str_radix(escape, 16)
            .ok()
            .and_then(char::from_u32)
            .map(|_| ())
            .ok_or_else(|| {
                Spanning::zero_width(
                    start_pos,
                    LexerError::UnknownEscapeSequence(format!("\\u{escape}")),
                )
            })
    }

    fn scan_number(&mut self) -> LexerResult<'a> {
        let start_pos = self.position;
        let mut is_float = false;

        if let Some((_, '-')) = self.peek_char() {
            self.next_char();
        }
        if let Some((_, '0')) = self.peek_char() {
            self.next_char();
            if let Some((_, ch)) = self.peek_char() {
                if ch.is_ascii_digit() {
                    return Err(Spanning::zero_width(
                        &self.position,
                        LexerError::UnexpectedCharacter(ch),
                    ));
                }
            }
        } else {
            self.scan_digits()?;
        }

        if let Some((_, '.')) = self.peek_char() {
            is_float = true;
            self.next_char();
            self.scan_digits()?;
        }
        if let Some((_, 'e' | 'E')) = self.peek_char() {
            is_float = true;
            self.next_char();
            if let Some((_, '+' | '-')) = self.peek_char() {
                self.next_char();
            }
            self.scan_digits()?;
        }

        let number = &self.source[start_pos.index()..self.position.index()];
        let token = if is_float {
            Token::Scalar(ScalarToken::Float(number))
        } else {
            Token::Scalar(ScalarToken::Int(number))
        };

        Ok(Spanning::start_end(&start_pos, &self.position, token))
    }

    /// Scans a non-empty run of ASCII digits.
    fn scan_digits(&mut self) -> Result<(), Spanning<LexerError>> {
        match self.peek_char() {
            Some((_, ch)) if ch.is_ascii_digit() => {}
            Some((_, ch)) => {
                return Err(Spanning::zero_width(
                    &self.position,
                    LexerError::UnexpectedCharacter(ch),
                ));
            }
            None => {
                return Err(Spanning::zero_width(
                    &self.position,
                    LexerError::UnexpectedEndOfFile,
                ));
            }
        }

        while let Some((_, ch)) = self.peek_char() {
            if !ch.is_ascii_digit() {
                break;
            }
            self.next_char();
        }

        Ok(())
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexerResult<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_reached_eof {
            return None;
        }

        self.scan_over_whitespace();

        Some(match self.peek_char() {
            Some((_, '!')) => Ok(self.emit_single_char(Token::ExclamationMark)),
            Some((_, '$')) => Ok(self.emit_single_char(Token::Dollar)),
            Some((_, '&')) => Ok(self.emit_single_char(Token::Ampersand)),
            Some((_, '(')) => Ok(self.emit_single_char(Token::ParenOpen)),
            Some((_, ')')) => Ok(self.emit_single_char(Token::ParenClose)),
            Some((_, '[')) => Ok(self.emit_single_char(Token::BracketOpen)),
            Some((_, ']')) => Ok(self.emit_single_char(Token::BracketClose)),
            Some((_, '{')) => Ok(self.emit_single_char(Token::CurlyOpen)),
            Some((_, '}')) => Ok(self.emit_single_char(Token::CurlyClose)),
            Some((_, ':')) => Ok(self.emit_single_char(Token::Colon)),
            Some((_, '=')) => Ok(self.emit_single_char(Token::Equals)),
            Some((_, '@')) => Ok(self.emit_single_char(Token::At)),
            Some((_, '|')) => Ok(self.emit_single_char(Token::Pipe)),
            Some((_, '.')) => self.scan_ellipsis(),
            Some((idx, '"')) if self.source[idx..].starts_with("\"\"\"") => {
                self.scan_block_string()
            }
            Some((_, '"')) => self.scan_string(),
            Some((_, ch)) if is_number_start(ch) => self.scan_number(),
            Some((_, ch)) if is_name_start(ch) => self.scan_name(),
            Some((_, ch)) => Err(Spanning::zero_width(
                &self.position,
                LexerError::UnknownCharacter(ch),
            )),
            None => {
                self.has_reached_eof = true;
                Ok(Spanning::zero_width(&self.position, Token::EndOfFile))
            }
        })
    }
}

fn is_source_char(c: char) -> bool {
    c == '\t' || c == '\n' || c == '\r' || c >= ' '
}

fn is_name_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_name_cont(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit()
}

fn is_number_start(c: char) -> bool {
    c == '-' || c.is_ascii_digit()
}
