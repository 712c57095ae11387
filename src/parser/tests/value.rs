use pretty_assertions::assert_eq;

use crate::{
    ast::{ObjectField, Value},
    parser::{
        MAX_NESTING_DEPTH, ParseError, SourcePosition, Spanning, StringLiteral,
        parse_value_source,
    },
};

fn at<T>(start: usize, end: usize, item: T) -> Spanning<T> {
    Spanning::start_end(
        &SourcePosition::new(start, 1, start + 1),
        &SourcePosition::new(end, 1, end + 1),
        item,
    )
}

fn parse_value(s: &str) -> Spanning<Value<'_>> {
    parse_value_source(s, false).unwrap_or_else(|e| panic!("Parse error on input {s:#?}: {e}"))
}

fn parse_value_error(s: &str, is_const: bool) -> Spanning<ParseError> {
    match parse_value_source(s, is_const) {
        Ok(v) => panic!("*No* parse error on input {s:#?} =>\n{v:#?}"),
        Err(e) => e,
    }
}

#[test]
fn scalars() {
    assert_eq!(parse_value("123"), at(0, 3, Value::Int("123")));
    assert_eq!(parse_value("-1.5e3"), at(0, 6, Value::Float("-1.5e3")));
    assert_eq!(parse_value("true"), at(0, 4, Value::Boolean(true)));
    assert_eq!(parse_value("false"), at(0, 5, Value::Boolean(false)));
    assert_eq!(parse_value("null"), at(0, 4, Value::Null));
    assert_eq!(parse_value("RED"), at(0, 3, Value::Enum("RED")));
    assert_eq!(parse_value("$var"), at(0, 4, Value::Variable("var")));
}

#[test]
fn strings_keep_raw_content() {
    assert_eq!(
        parse_value(r#""a\nb""#),
        at(0, 6, Value::String(StringLiteral::Quoted(r"a\nb"))),
    );
    assert_eq!(
        parse_value(r#""""x""""#),
        at(0, 7, Value::String(StringLiteral::Block("x"))),
    );
    assert_eq!(parse_value(r#""a\nb""#).item.raw_value(), Some(r"a\nb"));
}

#[test]
fn lists_and_objects() {
    assert_eq!(
        parse_value("[1, $a, {b: null}]"),
        at(
            0,
            18,
            Value::List(vec![
                at(1, 2, Value::Int("1")),
                at(4, 6, Value::Variable("a")),
                at(
                    8,
                    17,
                    Value::Object(vec![at(
                        9,
                        16,
                        ObjectField {
                            name: at(9, 10, "b"),
                            value: at(12, 16, Value::Null),
                        },
                    )]),
                ),
            ]),
        ),
    );
    assert_eq!(parse_value("[]"), at(0, 2, Value::List(vec![])));
    assert_eq!(parse_value("{}"), at(0, 2, Value::Object(vec![])));
}

#[test]
fn nested_variables() {
    let value = parse_value("{a: {b: [$var, 1]}, c: $other}");

    assert!(!value.item.is_const());
    assert_eq!(value.item.referenced_variables(), ["var", "other"]);
    assert_eq!(value.item.to_string(), "{a: {b: [$var, 1]}, c: $other}");
}

#[test]
fn unlocated_equality() {
    assert!(
        parse_value("[1,2, {a: B}]")
            .item
            .unlocated_eq(&parse_value("[ 1 , 2 , { a : B } ]").item),
    );
    assert!(
        !parse_value("[1, 2]")
            .item
            .unlocated_eq(&parse_value("[2, 1]").item),
    );
}

#[test]
fn const_positions_reject_variables() {
    let err = parse_value_error("{a: [$v]}", true);

    assert_eq!(err.item, ParseError::UnexpectedToken("$".into()));
    assert_eq!(err.span.start, SourcePosition::new(5, 1, 6));
    assert!(parse_value_source("{a: [1]}", true).is_ok());
}

#[test]
fn errors() {
    let err = parse_value_error("[1", false);
    assert_eq!(err.item, ParseError::UnexpectedToken(String::new()));
    assert_eq!(err.span.start, SourcePosition::new(2, 1, 3));

    let err = parse_value_error("{a 1}", false);
    assert_eq!(
        err.item,
        ParseError::ExpectedToken {
            expected: ":".into(),
            found: "1".into(),
        },
    );
    assert_eq!(err.span.start, SourcePosition::new(3, 1, 4));

    let err = parse_value_error("1 2", false);
    assert_eq!(err.item, ParseError::UnexpectedToken("2".into()));
    assert_eq!(err.span.start, SourcePosition::new(2, 1, 3));

    let err = parse_value_error("{1: 2}", false);
    assert_eq!(err.item, ParseError::ExpectedName("1".into()));
    assert_eq!(err.span.start, SourcePosition::new(1, 1, 2));
}

#[test]
fn nesting_is_bounded() {
    let lists = format!(
        "{}{}",
        "[".repeat(MAX_NESTING_DEPTH),
        "]".repeat(MAX_NESTING_DEPTH),
    );
    assert!(parse_value_source(&lists, true).is_ok());

    let objects = format!("{}1{}", "{a:".repeat(1000), "}".repeat(1000));
    let err = parse_value_error(&objects, false);
    assert_eq!(err.item, ParseError::NestingTooDeep);
    assert_eq!(err.span.start, SourcePosition::new(192, 1, 193));
}
