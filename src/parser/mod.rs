//! Query parser and language utilities
#![expect(clippy::module_inception, reason = "`parser::parser` holds the cursor")]

mod document;
mod lexer;
mod parser;
mod utils;
mod value;

#[cfg(test)]
mod tests;

pub use self::{
    document::{parse_document_source, parse_type, parse_type_source},
    lexer::{Lexer, LexerError, LexerResult, ScalarToken, StringLiteral, Token},
    parser::{
        MAX_NESTING_DEPTH, OptionParseResult, ParseError, ParseResult, Parser,
        UnlocatedParseResult,
    },
    utils::{Location, SourcePosition, Span, Spanning},
    value::{parse_value_literal, parse_value_source},
};
