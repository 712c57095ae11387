use crate::{
    ast::{ObjectField, Value},
    parser::{ParseResult, Parser, ScalarToken, Spanning, Token, UnlocatedParseResult},
};

/// Parses a standalone value literal, which must span the whole `s`.
#[doc(hidden)]
pub fn parse_value_source(s: &str, is_const: bool) -> ParseResult<Value<'_>> {
    let mut parser = Parser::new(s)?;
    let value = parse_value_literal(&mut parser, is_const)?;
    parser.expect_end_of_file()?;

    Ok(value)
}

/// Parses a value literal.
///
/// With `is_const` set, variables are rejected at any depth, as required in
/// default value positions.
pub fn parse_value_literal<'a>(
    parser: &mut Parser<'a>,
    is_const: bool,
) -> ParseResult<Value<'a>> {
    match parser.peek().item {
        Token::BracketOpen => parser.nested(|p| parse_list_literal(p, is_const)),
        Token::CurlyOpen => parser.nested(|p| parse_object_literal(p, is_const)),
        Token::Dollar if !is_const => parse_variable_literal(parser),
        Token::Scalar(token) => Ok(parser.next_token()?.map(|_| match token {
            ScalarToken::Int(i) => Value::Int(i),
            ScalarToken::Float(f) => Value::Float(f),
            ScalarToken::String(s) => Value::String(s),
        })),
        Token::Name("true") => Ok(parser.next_token()?.map(|_| Value::Boolean(true))),
        Token::Name("false") => Ok(parser.next_token()?.map(|_| Value::Boolean(false))),
        Token::Name("null") => Ok(parser.next_token()?.map(|_| Value::Null)),
        Token::Name(name) => Ok(parser.next_token()?.map(|_| Value::Enum(name))),
        _ => Err(parser.unexpected()),
    }
}

fn parse_list_literal<'a>(parser: &mut Parser<'a>, is_const: bool) -> ParseResult<Value<'a>> {
    Ok(parser
        .delimited_list(
            &Token::BracketOpen,
            |p| parse_value_literal(p, is_const),
            &Token::BracketClose,
        )?
        .map(Value::List))
}

fn parse_object_literal<'a>(parser: &mut Parser<'a>, is_const: bool) -> ParseResult<Value<'a>> {
    Ok(parser
        .delimited_list(
            &Token::CurlyOpen,
            |p| parse_object_field(p, is_const),
            &Token::CurlyClose,
        )?
        .map(Value::Object))
}

fn parse_object_field<'a>(
    parser: &mut Parser<'a>,
    is_const: bool,
) -> UnlocatedParseResult<Spanning<ObjectField<'a>>> {
    let name = parser.expect_name()?;

    parser.expect(&Token::Colon)?;

    let value = parse_value_literal(parser, is_const)?;

    Ok(Spanning::start_end(
        &name.start(),
        &value.end(),
        ObjectField { name, value },
    ))
}

fn parse_variable_literal<'a>(parser: &mut Parser<'a>) -> ParseResult<Value<'a>> {
    let start_pos = parser.expect(&Token::Dollar)?.span.start;
    let name = parser.expect_name()?;

    Ok(Spanning::start_end(
        &start_pos,
        &name.end(),
        Value::Variable(name.item),
    ))
}
