use crate::{
    ast::{
        Argument, Arguments, Definition, Directive, Document, Field, Fragment, FragmentSpread,
        InlineFragment, Operation, OperationType, Selection, SelectionSet, Type,
        VariableDefinition, VariableDefinitions,
    },
    parser::{
        Location, OptionParseResult, ParseError, ParseResult, Parser, Spanning, Token,
        UnlocatedParseResult, value::parse_value_literal,
    },
};

#[doc(hidden)]
pub fn parse_document_source(s: &str) -> UnlocatedParseResult<Document<'_>> {
    let mut parser = Parser::new(s)?;
    parse_document(&mut parser)
}

/// Parses a standalone type reference, such as `[String!]!`, which must span
/// the whole `s`.
#[doc(hidden)]
pub fn parse_type_source(s: &str) -> ParseResult<Type<'_>> {
    let mut parser = Parser::new(s)?;
    let parsed_type = parse_type(&mut parser)?;
    parser.expect_end_of_file()?;

    Ok(parsed_type)
}

fn parse_document<'a>(parser: &mut Parser<'a>) -> UnlocatedParseResult<Document<'a>> {
    let mut definitions = Vec::new();

    while parser.peek().item != Token::EndOfFile {
        definitions.push(parse_definition(parser)?);
    }

    Ok(Document {
        definitions,
        location: Location::default(),
    })
}

fn parse_definition<'a>(parser: &mut Parser<'a>) -> UnlocatedParseResult<Definition<'a>> {
    match parser.peek().item {
        Token::CurlyOpen
        | Token::Name("query")
        | Token::Name("mutation")
        | Token::Name("subscription") => {
            Ok(Definition::Operation(parse_operation_definition(parser)?))
        }
        Token::Name("fragment") => Ok(Definition::Fragment(parse_fragment_definition(parser)?)),
        Token::Name(name) => {
            parser.next_token()?;
            Err(parser.peek().map(|_| ParseError::UnexpectedToken(name.into())))
        }
        Token::Ellipsis => Err(parser.peek().map(|_| ParseError::ExpectedName(".".into()))),
        _ => Err(parser.peek().map(ParseError::expected_name)),
    }
}

fn parse_operation_definition<'a>(parser: &mut Parser<'a>) -> ParseResult<Operation<'a>> {
    if parser.peek().item == Token::CurlyOpen {
        let selection_set = parse_selection_set(parser)?;

        Ok(Spanning::new(
            selection_set.span,
            Operation {
                operation_type: OperationType::Query,
                name: None,
                variable_definitions: None,
                directives: Vec::new(),
                selection_set,
            },
        ))
    } else {
        let start_pos = parser.peek().span.start;
        let operation_type = parse_operation_type(parser)?;
        let name = match parser.peek().item {
            Token::Name(_) => Some(parser.expect_name()?),
            _ => None,
        };
        let variable_definitions = parse_variable_definitions(parser)?;
        let directives = parse_directives(parser)?;
        let selection_set = parse_selection_set(parser)?;

        Ok(Spanning::start_end(
            &start_pos,
            &selection_set.end(),
            Operation {
                operation_type: operation_type.item,
                name,
                variable_definitions,
                directives,
                selection_set,
            },
        ))
    }
}

fn parse_fragment_definition<'a>(parser: &mut Parser<'a>) -> ParseResult<Fragment<'a>> {
    let start_pos = parser.expect_keyword("fragment")?.span.start;
    let name = parser.expect_name()?;
    if name.item == "on" {
        return Err(name.map(|n| ParseError::UnexpectedName(n.into())));
    }

    parser.expect_keyword("on")?;
    let type_condition = parser.expect_name()?;
    let directives = parse_directives(parser)?;
    let selection_set = parse_selection_set(parser)?;

    Ok(Spanning::start_end(
        &start_pos,
        &selection_set.end(),
        Fragment {
            name,
            type_condition,
            directives,
            selection_set,
        },
    ))
}

fn parse_optional_selection_set<'a>(
    parser: &mut Parser<'a>,
) -> OptionParseResult<SelectionSet<'a>> {
    if parser.peek().item == Token::CurlyOpen {
        Ok(Some(parse_selection_set(parser)?))
    } else {
        Ok(None)
    }
}

fn parse_selection_set<'a>(parser: &mut Parser<'a>) -> ParseResult<SelectionSet<'a>> {
    parser.nested(|p| {
        Ok(p
            .delimited_nonempty_list(&Token::CurlyOpen, parse_selection, &Token::CurlyClose)?
            .map(|selections| SelectionSet { selections }))
    })
}

fn parse_selection<'a>(parser: &mut Parser<'a>) -> UnlocatedParseResult<Selection<'a>> {
    match parser.peek().item {
        Token::Ellipsis => parse_fragment(parser),
        _ => parse_field(parser).map(Selection::Field),
    }
}

fn parse_fragment<'a>(parser: &mut Parser<'a>) -> UnlocatedParseResult<Selection<'a>> {
    let start_pos = parser.expect(&Token::Ellipsis)?.span.start;

    match parser.peek().item {
        Token::Name("on") => {
            parser.next_token()?;
            let name = parser.expect_name()?;
            let directives = parse_directives(parser)?;
            let selection_set = parse_selection_set(parser)?;

            Ok(Selection::InlineFragment(Spanning::start_end(
                &start_pos,
                &selection_set.end(),
                InlineFragment {
                    type_condition: Some(name),
                    directives,
                    selection_set,
                },
            )))
        }
        Token::CurlyOpen | Token::At => {
            let directives = parse_directives(parser)?;
            let selection_set = parse_selection_set(parser)?;

            Ok(Selection::InlineFragment(Spanning::start_end(
                &start_pos,
                &selection_set.end(),
                InlineFragment {
                    type_condition: None,
                    directives,
                    selection_set,
                },
            )))
        }
        _ => {
            let frag_name = parser.expect_name()?;
            let directives = parse_directives(parser)?;

            Ok(Selection::FragmentSpread(Spanning::start_end(
                &start_pos,
                &directives.last().map_or(frag_name.end(), Spanning::end),
                FragmentSpread {
                    name: frag_name,
                    directives,
                },
            )))
        }
    }
}

fn parse_field<'a>(parser: &mut Parser<'a>) -> ParseResult<Field<'a>> {
    let alias = parser.expect_name()?;

    let name = if parser.skip(&Token::Colon)?.is_some() {
        parser.expect_name()?
    } else {
        alias
    };

    let arguments = parse_arguments(parser)?;
    let directives = parse_directives(parser)?;
    let selection_set = parse_optional_selection_set(parser)?;

    let end_pos = selection_set
        .as_ref()
        .map(Spanning::end)
        .or_else(|| directives.last().map(Spanning::end))
        .or_else(|| arguments.as_ref().map(Spanning::end))
        .unwrap_or(name.end());

    Ok(Spanning::start_end(
        &alias.start(),
        &end_pos,
        Field {
            alias,
            name,
            arguments,
            directives,
            selection_set,
        },
    ))
}

fn parse_arguments<'a>(parser: &mut Parser<'a>) -> OptionParseResult<Arguments<'a>> {
    if parser.peek().item != Token::ParenOpen {
        Ok(None)
    } else {
        Ok(Some(
            parser
                .delimited_nonempty_list(&Token::ParenOpen, parse_argument, &Token::ParenClose)?
                .map(|items| Arguments { items }),
        ))
    }
}

fn parse_argument<'a>(parser: &mut Parser<'a>) -> UnlocatedParseResult<Spanning<Argument<'a>>> {
    let name = parser.expect_name()?;
    parser.expect(&Token::Colon)?;
    let value = parse_value_literal(parser, false)?;

    Ok(Spanning::start_end(
        &name.start(),
        &value.end(),
        Argument { name, value },
    ))
}

fn parse_operation_type(parser: &mut Parser<'_>) -> ParseResult<OperationType> {
    match parser.peek().item {
        Token::Name("query") => Ok(parser.next_token()?.map(|_| OperationType::Query)),
        Token::Name("mutation") => Ok(parser.next_token()?.map(|_| OperationType::Mutation)),
        Token::Name("subscription") => {
            Ok(parser.next_token()?.map(|_| OperationType::Subscription))
        }
        _ => Err(parser.unexpected()),
    }
}

fn parse_variable_definitions<'a>(
    parser: &mut Parser<'a>,
) -> OptionParseResult<VariableDefinitions<'a>> {
    if parser.peek().item != Token::ParenOpen {
        Ok(None)
    } else {
        Ok(Some(
            parser
                .delimited_nonempty_list(
                    &Token::ParenOpen,
                    parse_variable_definition,
                    &Token::ParenClose,
                )?
                .map(|items| VariableDefinitions { items }),
        ))
    }
}

fn parse_variable_definition<'a>(
    parser: &mut Parser<'a>,
) -> UnlocatedParseResult<Spanning<VariableDefinition<'a>>> {
    let start_pos = parser.expect(&Token::Dollar)?.span.start;
    let var_name = parser.expect_name()?;
    parser.expect(&Token::Colon)?;
    let var_type = parse_type(parser)?;

    let default_value = if parser.skip(&Token::Equals)?.is_some() {
        Some(parse_value_literal(parser, true)?)
    } else {
        None
    };

    let directives = parse_directives(parser)?;

    let end_pos = directives
        .last()
        .map(Spanning::end)
        .or_else(|| default_value.as_ref().map(Spanning::end))
        .unwrap_or(var_type.end());

    Ok(Spanning::start_end(
        &start_pos,
        &end_pos,
        VariableDefinition {
            variable: Spanning::start_end(&start_pos, &var_name.end(), var_name.item),
            var_type,
            default_value,
            directives,
        },
    ))
}

fn parse_directives<'a>(
    parser: &mut Parser<'a>,
) -> UnlocatedParseResult<Vec<Spanning<Directive<'a>>>> {
    let mut items = Vec::new();
    while parser.peek().item == Token::At {
        items.push(parse_directive(parser)?);
    }

    Ok(items)
}

fn parse_directive<'a>(parser: &mut Parser<'a>) -> ParseResult<Directive<'a>> {
    let start_pos = parser.expect(&Token::At)?.span.start;
    let name = parser.expect_name()?;
    let arguments = parse_arguments(parser)?;

    Ok(Spanning::start_end(
        &start_pos,
        &arguments.as_ref().map_or(name.end(), Spanning::end),
        Directive { name, arguments },
    ))
}

/// Parses a type reference: a name or a bracketed type, optionally followed by
/// a single `!`.
pub fn parse_type<'a>(parser: &mut Parser<'a>) -> ParseResult<Type<'a>> {
    let parsed_type = if let Some(opening) = parser.skip(&Token::BracketOpen)? {
        let inner_type = parser.nested(parse_type)?;
        let end_pos = parser.expect(&Token::BracketClose)?.span.end;
        Spanning::start_end(
            &opening.start(),
            &end_pos,
            Type::List(Box::new(inner_type)),
        )
    } else {
        parser.expect_name()?.map(Type::Named)
    };

    Ok(match parser.peek().item {
        Token::ExclamationMark => wrap_non_null(parser, parsed_type)?,
        _ => parsed_type,
    })
}

fn wrap_non_null<'a>(parser: &mut Parser<'a>, inner: Spanning<Type<'a>>) -> ParseResult<Type<'a>> {
    let end_pos = parser.expect(&Token::ExclamationMark)?.span.end;

    Ok(Spanning::start_end(
        &inner.start(),
        &end_pos,
        Type::NonNull(Box::new(inner)),
    ))
}
