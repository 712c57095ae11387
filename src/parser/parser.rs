use std::mem;

use derive_more::with_trait::{Display, Error};

use crate::parser::{Lexer, LexerError, Spanning, Token};

/// Error while parsing a GraphQL query
///
/// Rendered without the `Syntax Error: ` prefix and trailing period, which are
/// added once the error is turned into a [`GraphQLError`].
///
/// [`GraphQLError`]: crate::GraphQLError
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum ParseError {
    /// A name was required, but another token was found.
    #[display("Expected Ident, found \"{_0}\"")]
    ExpectedName(#[error(not(source))] String),

    /// A specific punctuator or keyword was required, but another token was
    /// found.
    #[display("Expected \"{expected}\", found \"{found}\"")]
    ExpectedToken {
        /// Raw form of the required token.
        expected: String,
        /// Raw form of the token actually found.
        found: String,
    },

    /// An unexpected token occurred in the source
    #[display("Unexpected \"{_0}\"")]
    UnexpectedToken(#[error(not(source))] String),

    /// A name occurred at a position where this particular name is forbidden,
    /// e.g. a fragment named `on`.
    #[display("Unexpected Name \"{_0}\"")]
    UnexpectedName(#[error(not(source))] String),

    /// Lists, objects, selection sets or type references are nested deeper
    /// than [`MAX_NESTING_DEPTH`].
    #[display("Maximum nesting depth exceeded")]
    NestingTooDeep,

    /// An error during tokenization occurred
    #[display("{_0}")]
    LexerError(LexerError),
}

impl ParseError {
    /// Creates a [`ParseError::UnexpectedToken`] out of the provided [`Token`].
    #[must_use]
    pub fn unexpected_token(token: Token<'_>) -> Self {
        Self::UnexpectedToken(token.to_string())
    }

    /// Creates a [`ParseError::ExpectedName`] out of the provided [`Token`].
    #[must_use]
    pub fn expected_name(found: Token<'_>) -> Self {
        Self::ExpectedName(found.to_string())
    }

    /// Creates a [`ParseError::ExpectedToken`] out of the `expected` and
    /// `found` [`Token`]s.
    #[must_use]
    pub fn expected_token(expected: &Token<'_>, found: Token<'_>) -> Self {
        Self::ExpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

impl From<LexerError> for ParseError {
    fn from(e: LexerError) -> Self {
        Self::LexerError(e)
    }
}

#[doc(hidden)]
pub type ParseResult<T> = Result<Spanning<T>, Spanning<ParseError>>;

#[doc(hidden)]
pub type UnlocatedParseResult<T> = Result<T, Spanning<ParseError>>;

#[doc(hidden)]
pub type OptionParseResult<T> = Result<Option<Spanning<T>>, Spanning<ParseError>>;

/// Deepest nesting of lists, objects, selection sets and type references the
/// parser descends into.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Recursive-descent cursor over a [`Lexer`].
///
/// Tokens are pulled from the lexer on demand, with exactly one token of
/// lookahead buffered at any time.
#[doc(hidden)]
#[derive(Debug)]
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Spanning<Token<'a>>,
    depth: usize,
}

impl<'a> Parser<'a> {
    #[doc(hidden)]
    pub fn new(source: &'a str) -> UnlocatedParseResult<Parser<'a>> {
        let mut lexer = Lexer::new(source);
        let current = Self::lex(&mut lexer, None)?;

        Ok(Parser {
            lexer,
            current,
            depth: 0,
        })
    }

    fn lex(
        lexer: &mut Lexer<'a>,
        last: Option<Spanning<Token<'a>>>,
    ) -> UnlocatedParseResult<Spanning<Token<'a>>> {
        match lexer.next() {
            Some(res) => res.map_err(|e| e.map(ParseError::LexerError)),
            // The lexer stops after yielding `EndOfFile`, so the last token
            // stays in place.
            None => Ok(last.unwrap_or_else(|| Spanning::unlocated(Token::EndOfFile))),
        }
    }

    #[doc(hidden)]
    pub fn peek(&self) -> &Spanning<Token<'a>> {
        &self.current
    }

    #[doc(hidden)]
    pub fn next_token(&mut self) -> ParseResult<Token<'a>> {
        let next = Self::lex(&mut self.lexer, Some(self.current))?;

        Ok(mem::replace(&mut self.current, next))
    }

    /// Builds a [`ParseError::UnexpectedToken`] located at the lookahead token,
    /// without consuming it.
    #[doc(hidden)]
    pub fn unexpected(&self) -> Spanning<ParseError> {
        self.current.map(ParseError::unexpected_token)
    }

    /// Runs `f` one nesting level deeper, failing at the lookahead token once
    /// [`MAX_NESTING_DEPTH`] is passed.
    #[doc(hidden)]
    pub fn nested<T, F>(&mut self, f: F) -> UnlocatedParseResult<T>
    where
        F: FnOnce(&mut Parser<'a>) -> UnlocatedParseResult<T>,
    {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.current.map(|_| ParseError::NestingTooDeep));
        }

        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }

    #[doc(hidden)]
    pub fn expect(&mut self, expected: &Token) -> ParseResult<Token<'a>> {
        if &self.peek().item != expected {
            Err(self
                .current
                .map(|found| ParseError::expected_token(expected, found)))
        } else {
            self.next_token()
        }
    }

    /// Consumes the provided keyword, which must appear as a name token.
    #[doc(hidden)]
    pub fn expect_keyword(&mut self, keyword: &str) -> ParseResult<Token<'a>> {
        match self.peek().item {
            Token::Name(name) if name == keyword => self.next_token(),
            _ => Err(self.current.map(|found| ParseError::ExpectedToken {
                expected: keyword.into(),
                found: found.to_string(),
            })),
        }
    }

    #[doc(hidden)]
    pub fn skip(&mut self, expected: &Token) -> OptionParseResult<Token<'a>> {
        if &self.peek().item == expected {
            Ok(Some(self.next_token()?))
        } else {
            Ok(None)
        }
    }

    /// Requires the whole input to be consumed.
    #[doc(hidden)]
    pub fn expect_end_of_file(&self) -> UnlocatedParseResult<()> {
        if self.peek().item == Token::EndOfFile {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Parses `opening item* closing`.
    #[doc(hidden)]
    pub fn delimited_list<T, F>(
        &mut self,
        opening: &Token,
        mut parser: F,
        closing: &Token,
    ) -> ParseResult<Vec<T>>
    where
        F: FnMut(&mut Parser<'a>) -> UnlocatedParseResult<T>,
    {
        let start_pos = self.expect(opening)?.span.start;
        let mut items = Vec::new();

        loop {
            if let Some(Spanning { span, .. }) = self.skip(closing)? {
                return Ok(Spanning::start_end(&start_pos, &span.end, items));
            }

            items.push(parser(self)?);
        }
    }

    /// Parses `opening item+ closing`.
    #[doc(hidden)]
    pub fn delimited_nonempty_list<T, F>(
        &mut self,
        opening: &Token,
        mut parser: F,
        closing: &Token,
    ) -> ParseResult<Vec<T>>
    where
        F: FnMut(&mut Parser<'a>) -> UnlocatedParseResult<T>,
    {
        let start_pos = self.expect(opening)?.span.start;
        let mut items = Vec::new();

        loop {
            items.push(parser(self)?);

            if let Some(end_spanning) = self.skip(closing)? {
                return Ok(Spanning::start_end(&start_pos, &end_spanning.end(), items));
            }
        }
    }

    #[doc(hidden)]
    pub fn expect_name(&mut self) -> ParseResult<&'a str> {
        match self.peek().item {
            Token::Name(name) => Ok(self.next_token()?.map(|_| name)),
            _ => Err(self.current.map(ParseError::expected_name)),
        }
    }
}
