#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

use std::fmt;

#[doc(hidden)]
pub use static_assertions as sa;
#[cfg(feature = "tracing")]
#[doc(hidden)]
pub use tracing;

#[doc(hidden)]
#[macro_use]
pub mod macros;
pub mod ast;
pub mod executor;
pub mod integrations;
pub mod parser;
pub mod schema;
mod types;
pub mod value;

use crate::parser::{ParseError, parse_document_source, parse_type_source, parse_value_source};

pub use crate::{
    ast::{Definition, Document, Operation, OperationType, Selection},
    executor::{Arguments, FieldError, FieldResult, Handler, HandlersChain},
    parser::{Location, Span, Spanning},
    schema::{
        SchemaError,
        meta::{
            self, Argument, DeprecationStatus, Enum, EnumValue, Field, InputField, InputObject,
            Interface, NamedType, Object, Scalar, Type, Union, is_argument_type, is_scalar_type,
        },
        model::Schema,
    },
    types::scalars::{BOOLEAN, FLOAT, ID, INT, STRING, built_in_scalars},
    value::{Object as ObjectValue, Value, Variables},
};

/// A failure to turn source text into a syntax tree.
///
/// Syntax errors always carry exactly one [`Location`]; the missing source
/// error carries none.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GraphQLError {
    /// Human-readable description, e.g. `Syntax Error: Unexpected "$".`.
    pub message: String,

    /// Positions in the source the error refers to.
    pub locations: Vec<Location>,
}

impl GraphQLError {
    /// Creates a new [`GraphQLError`] out of the provided `message` and
    /// `locations`.
    #[must_use]
    pub fn new(message: impl Into<String>, locations: Vec<Location>) -> Self {
        Self {
            message: message.into(),
            locations,
        }
    }

    /// Error returned when parsing an empty source.
    #[must_use]
    pub fn missing_source() -> Self {
        Self::new("Must provide Source. Received: undefined.", vec![])
    }
}

impl From<Spanning<ParseError>> for GraphQLError {
    fn from(e: Spanning<ParseError>) -> Self {
        Self::new(format!("Syntax Error: {}.", e.item), vec![e.location()])
    }
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graphql: {}", self.message)
    }
}

impl std::error::Error for GraphQLError {}

/// Parses an executable document.
///
/// # Errors
///
/// If `source` is empty, or as soon as the first syntax error is met. No
/// partial [`Document`] is ever returned.
pub fn parse(source: &str) -> Result<Document<'_>, GraphQLError> {
    __frontend_span_trace!("parse");
    __frontend_trace!("parsing document of {} bytes", source.len());

    if source.is_empty() {
        return Err(GraphQLError::missing_source());
    }

    parse_document_source(source).map_err(syntax_error)
}

/// Parses a standalone type reference, e.g. `[String!]!`.
///
/// # Errors
///
/// If `source` is empty, is not a type reference, or has trailing tokens.
pub fn parse_type(source: &str) -> Result<Spanning<ast::Type<'_>>, GraphQLError> {
    if source.is_empty() {
        return Err(GraphQLError::missing_source());
    }

    parse_type_source(source).map_err(syntax_error)
}

/// Parses a standalone value literal, e.g. `{a: [1, $b]}`.
///
/// With `is_const` set, variables are rejected.
///
/// # Errors
///
/// If `source` is empty, is not a value literal, or has trailing tokens.
pub fn parse_value(source: &str, is_const: bool) -> Result<Spanning<ast::Value<'_>>, GraphQLError> {
    if source.is_empty() {
        return Err(GraphQLError::missing_source());
    }

    parse_value_source(source, is_const).map_err(syntax_error)
}

fn syntax_error(e: Spanning<ParseError>) -> GraphQLError {
    let err = GraphQLError::from(e);
    __frontend_trace_debug!("syntax error at {:?}: {}", err.locations, err.message);
    err
}
