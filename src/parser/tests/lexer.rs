use pretty_assertions::assert_eq;

use crate::parser::{
    Lexer, LexerError, ScalarToken, SourcePosition, Spanning, StringLiteral, Token,
};

fn tokenize_to_vec(s: &str) -> Vec<Spanning<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut lexer = Lexer::new(s);

    loop {
        match lexer.next() {
            Some(Ok(t)) => {
                let at_eof = t.item == Token::EndOfFile;
                tokens.push(t);
                if at_eof {
                    break;
                }
            }
            Some(Err(e)) => panic!("Error in input stream: {e:#?} for {s:#?}"),
            None => panic!("EOF before EndOfFile token in {s:#?}"),
        }
    }

    tokens
}

fn tokenize_single(s: &str) -> Spanning<Token<'_>> {
    let mut tokens = tokenize_to_vec(s);

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].item, Token::EndOfFile);

    tokens.remove(0)
}

fn tokenize_error(s: &str) -> Spanning<LexerError> {
    let mut lexer = Lexer::new(s);

    loop {
        match lexer.next() {
            Some(Ok(t)) => {
                if t.item == Token::EndOfFile {
                    panic!("Tokenizer did not return error for {s:#?}");
                }
            }
            Some(Err(e)) => {
                return e;
            }
            None => panic!("Tokenizer did not return error for {s:#?}"),
        }
    }
}

fn string(s: &str) -> Token<'_> {
    Token::Scalar(ScalarToken::String(StringLiteral::Quoted(s)))
}

#[test]
fn empty_source() {
    assert_eq!(
        tokenize_to_vec(""),
        vec![Spanning::zero_width(
            &SourcePosition::new_origin(),
            Token::EndOfFile,
        )],
    );
}

#[test]
fn end_of_file_is_sticky() {
    let mut lexer = Lexer::new(" ");

    assert_eq!(
        lexer.next(),
        Some(Ok(Spanning::zero_width(
            &SourcePosition::new(1, 1, 2),
            Token::EndOfFile,
        ))),
    );
    assert_eq!(lexer.next(), None);
}

#[test]
fn disallow_control_codes() {
    assert_eq!(
        Lexer::new("\u{0007}").next(),
        Some(Err(Spanning::zero_width(
            &SourcePosition::new_origin(),
            LexerError::UnknownCharacter('\u{0007}'),
        ))),
    );
}

#[test]
fn skip_whitespace_commas_and_comments() {
    assert_eq!(
        tokenize_to_vec(",,,foo,,, # comment\n  bar"),
        vec![
            Spanning::start_end(
                &SourcePosition::new(3, 1, 4),
                &SourcePosition::new(6, 1, 7),
                Token::Name("foo"),
            ),
            Spanning::start_end(
                &SourcePosition::new(22, 2, 3),
                &SourcePosition::new(25, 2, 6),
                Token::Name("bar"),
            ),
            Spanning::zero_width(&SourcePosition::new(25, 2, 6), Token::EndOfFile),
        ],
    );
}

#[test]
fn line_terminators() {
    assert_eq!(
        tokenize_to_vec("a\r\nb\rc\nd"),
        vec![
            Spanning::start_end(
                &SourcePosition::new(0, 1, 1),
                &SourcePosition::new(1, 1, 2),
                Token::Name("a"),
            ),
            Spanning::start_end(
                &SourcePosition::new(3, 2, 1),
                &SourcePosition::new(4, 2, 2),
                Token::Name("b"),
            ),
            Spanning::start_end(
                &SourcePosition::new(5, 3, 1),
                &SourcePosition::new(6, 3, 2),
                Token::Name("c"),
            ),
            Spanning::start_end(
                &SourcePosition::new(7, 4, 1),
                &SourcePosition::new(8, 4, 2),
                Token::Name("d"),
            ),
            Spanning::zero_width(&SourcePosition::new(8, 4, 2), Token::EndOfFile),
        ],
    );
}

#[test]
fn byte_order_mark_and_tabs_are_whitespace() {
    assert_eq!(
        tokenize_single("\u{feff}\tfoo"),
        Spanning::start_end(
            &SourcePosition::new(4, 1, 3),
            &SourcePosition::new(7, 1, 6),
            Token::Name("foo"),
        ),
    );
}

#[test]
fn names() {
    assert_eq!(tokenize_single("_a1").item, Token::Name("_a1"));
    assert_eq!(tokenize_single("on").item, Token::Name("on"));
    assert_eq!(
        tokenize_to_vec("a-1")
            .into_iter()
            .map(|t| t.item)
            .collect::<Vec<_>>(),
        [
            Token::Name("a"),
            Token::Scalar(ScalarToken::Int("-1")),
            Token::EndOfFile,
        ],
    );
}

#[test]
fn strings() {
    assert_eq!(
        tokenize_single(r#""simple""#),
        Spanning::start_end(
            &SourcePosition::new(0, 1, 1),
            &SourcePosition::new(8, 1, 9),
            string("simple"),
        ),
    );
    assert_eq!(
        tokenize_single(r#"" white space ""#).item,
        string(" white space "),
    );
    assert_eq!(tokenize_single(r#""quote \"""#).item, string(r#"quote \""#));
    assert_eq!(
        tokenize_single(r#""escaped \n\r\b\t\f""#).item,
        string(r"escaped \n\r\b\t\f"),
    );
    assert_eq!(
        tokenize_single(r#""slashes \\ \/""#).item,
        string(r"slashes \\ \/"),
    );
    assert_eq!(
        tokenize_single(r#""unicode \u1234\u5678\u90AB\uCDEF""#).item,
        string(r"unicode \u1234\u5678\u90AB\uCDEF"),
    );
}

#[test]
fn multi_byte_string_spans_columns() {
    assert_eq!(
        tokenize_to_vec("\"caf\u{e9}\" x"),
        vec![
            Spanning::start_end(
                &SourcePosition::new(0, 1, 1),
                &SourcePosition::new(7, 1, 7),
                string("caf\u{e9}"),
            ),
            Spanning::start_end(
                &SourcePosition::new(8, 1, 8),
                &SourcePosition::new(9, 1, 9),
                Token::Name("x"),
            ),
            Spanning::zero_width(&SourcePosition::new(9, 1, 9), Token::EndOfFile),
        ],
    );
}

#[test]
fn block_strings() {
    assert_eq!(
        tokenize_single(r#""""a\"""b""""#),
        Spanning::start_end(
            &SourcePosition::new(0, 1, 1),
            &SourcePosition::new(12, 1, 13),
            Token::Scalar(ScalarToken::String(StringLiteral::Block(r#"a\"""b"#))),
        ),
    );
    assert_eq!(
        tokenize_to_vec("\"\"\"\n  line\n\"\"\" x")[1],
        Spanning::start_end(
            &SourcePosition::new(15, 3, 5),
            &SourcePosition::new(16, 3, 6),
            Token::Name("x"),
        ),
    );
}

#[test]
fn string_errors() {
    assert_eq!(
        tokenize_error("\""),
        Spanning::zero_width(
            &SourcePosition::new(1, 1, 2),
            LexerError::UnterminatedString,
        ),
    );
    assert_eq!(
        tokenize_error("\"no end"),
        Spanning::zero_width(
            &SourcePosition::new(7, 1, 8),
            LexerError::UnterminatedString,
        ),
    );
    assert_eq!(
        tokenize_error("\"multi\nline\""),
        Spanning::zero_width(
            &SourcePosition::new(6, 1, 7),
            LexerError::UnterminatedString,
        ),
    );
    assert_eq!(
        tokenize_error(r#""bad \z esc""#),
        Spanning::zero_width(
            &SourcePosition::new(6, 1, 7),
            LexerError::UnknownEscapeSequence(r"\z".into()),
        ),
    );
    assert_eq!(
        tokenize_error(r#""bad \u12""#),
        Spanning::zero_width(
            &SourcePosition::new(6, 1, 7),
            LexerError::UnknownEscapeSequence(r"\u12".into()),
        ),
    );
    assert_eq!(
        tokenize_error("\"a\u{0007}\""),
        Spanning::zero_width(
            &SourcePosition::new(2, 1, 3),
            LexerError::UnknownCharacterInString('\u{0007}'),
        ),
    );
    assert_eq!(
        tokenize_error(r#""""abc"#),
        Spanning::zero_width(
            &SourcePosition::new(6, 1, 7),
            LexerError::UnterminatedBlockString,
        ),
    );
}

#[test]
fn numbers() {
    fn assert_int(s: &str) {
        assert_eq!(tokenize_single(s).item, Token::Scalar(ScalarToken::Int(s)));
    }

    fn assert_float(s: &str) {
        assert_eq!(
            tokenize_single(s).item,
            Token::Scalar(ScalarToken::Float(s)),
        );
    }

    assert_int("4");
    assert_int("-4");
    assert_int("9");
    assert_int("0");
    assert_int("-0");
    assert_float("4.123");
    assert_float("-4.123");
    assert_float("0.123");
    assert_float("123e4");
    assert_float("123E4");
    assert_float("123e-4");
    assert_float("123e+4");
    assert_float("-1.123e4");
    assert_float("-1.123E-4");
    assert_float("-1.123e4567");
}

#[test]
fn number_errors() {
    assert_eq!(
        tokenize_error("00"),
        Spanning::zero_width(
            &SourcePosition::new(1, 1, 2),
            LexerError::UnexpectedCharacter('0'),
        ),
    );
    assert_eq!(
        tokenize_error("-"),
        Spanning::zero_width(
            &SourcePosition::new(1, 1, 2),
            LexerError::UnexpectedEndOfFile,
        ),
    );
    assert_eq!(
        tokenize_error("-A"),
        Spanning::zero_width(
            &SourcePosition::new(1, 1, 2),
            LexerError::UnexpectedCharacter('A'),
        ),
    );
    assert_eq!(
        tokenize_error("1."),
        Spanning::zero_width(
            &SourcePosition::new(2, 1, 3),
            LexerError::UnexpectedEndOfFile,
        ),
    );
    assert_eq!(
        tokenize_error("1.A"),
        Spanning::zero_width(
            &SourcePosition::new(2, 1, 3),
            LexerError::UnexpectedCharacter('A'),
        ),
    );
    assert_eq!(
        tokenize_error("1.0e"),
        Spanning::zero_width(
            &SourcePosition::new(4, 1, 5),
            LexerError::UnexpectedEndOfFile,
        ),
    );
}

#[test]
fn punctuation() {
    assert_eq!(
        tokenize_to_vec("! $ & ( ) ... : = @ [ ] { | }")
            .into_iter()
            .map(|t| t.item)
            .collect::<Vec<_>>(),
        [
            Token::ExclamationMark,
            Token::Dollar,
            Token::Ampersand,
            Token::ParenOpen,
            Token::ParenClose,
            Token::Ellipsis,
            Token::Colon,
            Token::Equals,
            Token::At,
            Token::BracketOpen,
            Token::BracketClose,
            Token::CurlyOpen,
            Token::Pipe,
            Token::CurlyClose,
            Token::EndOfFile,
        ],
    );
    assert_eq!(
        tokenize_single("..."),
        Spanning::start_end(
            &SourcePosition::new(0, 1, 1),
            &SourcePosition::new(3, 1, 4),
            Token::Ellipsis,
        ),
    );
}

#[test]
fn unexpected_characters() {
    for s in [".", "..", ".. ."] {
        assert_eq!(
            tokenize_error(s),
            Spanning::zero_width(
                &SourcePosition::new_origin(),
                LexerError::UnexpectedCharacter('.'),
            ),
        );
    }
    assert_eq!(
        tokenize_error("?"),
        Spanning::zero_width(
            &SourcePosition::new_origin(),
            LexerError::UnknownCharacter('?'),
        ),
    );
    assert_eq!(
        tokenize_error("a \u{203b}"),
        Spanning::zero_width(
            &SourcePosition::new(2, 1, 3),
            LexerError::UnknownCharacter('\u{203b}'),
        ),
    );
}

#[test]
fn error_messages() {
    assert_eq!(
        LexerError::UnexpectedCharacter('.').to_string(),
        "Unexpected character \".\"",
    );
    assert_eq!(LexerError::UnknownCharacter('?').to_string(), "Unexpected \"?\"");
    assert_eq!(
        LexerError::UnknownEscapeSequence(r"\z".into()).to_string(),
        r#"Unknown escape sequence "\z" in string"#,
    );
    assert_eq!(
        LexerError::UnexpectedEndOfFile.to_string(),
        "Unexpected end of input",
    );
}

#[test]
fn tokens_render_raw() {
    assert_eq!(Token::Name("foo").to_string(), "foo");
    assert_eq!(string("a b").to_string(), "a b");
    assert_eq!(Token::Scalar(ScalarToken::Float("1.5e3")).to_string(), "1.5e3");
    assert_eq!(Token::CurlyOpen.to_string(), "{");
    assert_eq!(Token::CurlyClose.to_string(), "}");
    assert_eq!(Token::Ellipsis.to_string(), "...");
    assert_eq!(Token::EndOfFile.to_string(), "");
}

#[test]
fn decode_string_literals() {
    fn quoted(s: &str) -> String {
        StringLiteral::Quoted(s).parse().unwrap().into_owned()
    }

    assert_eq!(quoted("plain"), "plain");
    assert_eq!(quoted(r#"a\"b\\c\/d"#), "a\"b\\c/d");
    assert_eq!(quoted(r"\b\f\n\r\t"), "\u{8}\u{c}\n\r\t");
    assert_eq!(quoted(r"A\u00E9"), "A\u{e9}");
    assert_eq!(
        StringLiteral::Block("\n    Hello,\n      World!\n\n    Yours,\n      GraphQL.\n  ")
            .parse()
            .unwrap(),
        "Hello,\n  World!\n\nYours,\n  GraphQL.",
    );
    assert_eq!(
        StringLiteral::Block(r#"contains \""" triple"#).parse().unwrap(),
        r#"contains """ triple"#,
    );
}
