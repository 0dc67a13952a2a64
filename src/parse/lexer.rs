use winnow::combinator::{alt, not, opt, peek, terminated};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

use crate::{Token, TokenKind};

/// Split `source` into tokens. Never fails: unterminated quotes and call
/// argument lists run to the end of the input, leaving diagnosis to the
/// parser. The returned sequence always ends with a single
/// [`TokenKind::Eof`] token.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut input = source;
    let mut tokens = Vec::new();

    loop {
        // Whitespace and punctuation parsers only backtrack, so errors here
        // simply mean "not this token".
        let _ = ws(&mut input);
        let position = source.len() - input.len();
        if input.is_empty() {
            tokens.push(Token::new(TokenKind::Eof, "", position));
            return tokens;
        }

        let before = input;
        let kind = match punctuation(&mut input) {
            Ok(kind) => kind,
            Err(_) => {
                input = before;
                match operand(&mut input) {
                    Ok(text) if !text.is_empty() => classify(text),
                    _ => {
                        // Cannot happen for non-empty input, but keep the
                        // lexer total: swallow one char as an identifier.
                        input = before;
                        let _ = any::<_, winnow::error::ContextError>(&mut input);
                        TokenKind::Identifier
                    }
                }
            }
        };
        let consumed = before.len() - input.len();
        tokens.push(Token::new(kind, &before[..consumed], position));
    }
}

// -- Whitespace & punctuation -----------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_whitespace())
        .void()
        .parse_next(input)
}

fn punctuation(input: &mut &str) -> ModalResult<TokenKind> {
    alt((
        "&&".value(TokenKind::And),
        "||".value(TokenKind::Or),
        terminated('!', not('=')).value(TokenKind::Not),
        '('.value(TokenKind::LParen),
        ')'.value(TokenKind::RParen),
        ','.value(TokenKind::Comma),
    ))
    .parse_next(input)
}

// -- Operands ---------------------------------------------------------------

fn next_char(input: &mut &str) -> ModalResult<Option<char>> {
    opt(any).parse_next(input)
}

fn peek_char(input: &mut &str) -> ModalResult<Option<char>> {
    opt(peek(any)).parse_next(input)
}

/// A quoted literal in any of the three quote styles. A backslash directly
/// before the closing quote style escapes it; both characters are kept.
fn quoted<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    let start = *input;
    let quote = one_of(['\'', '"', '`']).parse_next(input)?;
    while let Some(c) = next_char(input)? {
        if c == quote {
            break;
        }
        if c == '\\' {
            let _: Option<char> = opt(quote).parse_next(input)?;
        }
    }
    Ok(&start[..start.len() - input.len()])
}

/// A parenthesized argument list directly attached to a name, e.g. the
/// `(github.event.labels, 'bug')` of `contains(...)`. Nested parentheses
/// are balanced and quoted literals are skipped over.
fn call_args<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    let start = *input;
    '('.parse_next(input)?;
    let mut depth = 1_usize;
    while let Some(c) = peek_char(input)? {
        match c {
            '\'' | '"' | '`' => {
                quoted(input)?;
            }
            '(' => {
                depth += 1;
                next_char(input)?;
            }
            ')' => {
                next_char(input)?;
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {
                next_char(input)?;
            }
        }
    }
    Ok(&start[..start.len() - input.len()])
}

/// Any run of text up to whitespace or punctuation: property paths,
/// comparison operators, numbers, booleans, quoted literals and calls.
fn operand<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    let start = *input;
    while let Some(c) = peek_char(input)? {
        let consumed = start.len() - input.len();
        match c {
            c if c.is_whitespace() => break,
            ')' | ',' => break,
            '&' if input.starts_with("&&") => break,
            '|' if input.starts_with("||") => break,
            '!' if !input[1..].starts_with('=') => break,
            '(' if consumed == 0 => break,
            '(' => {
                call_args(input)?;
            }
            '\'' | '"' | '`' => {
                quoted(input)?;
            }
            _ => {
                next_char(input)?;
            }
        }
    }
    Ok(&start[..start.len() - input.len()])
}

fn classify(text: &str) -> TokenKind {
    let bytes = text.as_bytes();
    let quoted = bytes.len() >= 2
        && matches!(bytes[0], b'\'' | b'"' | b'`')
        && bytes[bytes.len() - 1] == bytes[0];
    if quoted {
        TokenKind::StringLiteral
    } else if text == "true" || text == "false" {
        TokenKind::BooleanLiteral
    } else if is_number(text) {
        TokenKind::NumberLiteral
    } else {
        TokenKind::Identifier
    }
}

/// `-?digits(.digits)?`
pub(crate) fn is_number(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let mut parts = unsigned.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole) && parts.next().map_or(true, all_digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    fn texts(source: &str) -> Vec<&str> {
        tokenize(source).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn empty_input_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("   \t\n"), vec![TokenKind::Eof]);
    }

    #[test]
    fn operators_without_spaces() {
        assert_eq!(
            kinds("a&&b||!c"),
            vec![
                TokenKind::Identifier,
                TokenKind::And,
                TokenKind::Identifier,
                TokenKind::Or,
                TokenKind::Not,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn punctuation_tokens() {
        assert_eq!(
            kinds("( a , b )"),
            vec![
                TokenKind::LParen,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn not_equals_is_not_negation() {
        assert_eq!(texts("x != y"), vec!["x", "!=", "y", ""]);
        assert_eq!(texts("x!=y"), vec!["x!=y", ""]);
    }

    #[test]
    fn quoted_literals_keep_operators() {
        let tokens = tokenize("x == 'a && b'");
        assert_eq!(tokens[2].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[2].text, "'a && b'");
        assert_eq!(tokens[2].position, 5);
    }

    #[test]
    fn other_quote_styles_do_not_terminate() {
        let tokens = tokenize(r#""it's `fine`" && b"#);
        assert_eq!(tokens[0].text, r#""it's `fine`""#);
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[1].kind, TokenKind::And);
    }

    #[test]
    fn escaped_quote_is_retained() {
        let tokens = tokenize(r"'a\'b' || c");
        assert_eq!(tokens[0].text, r"'a\'b'");
        assert_eq!(tokens[1].kind, TokenKind::Or);
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        let tokens = tokenize("a && 'open || b");
        assert_eq!(tokens[2].text, "'open || b");
        assert_eq!(tokens[3].kind, TokenKind::Eof);
    }

    #[test]
    fn call_is_one_token() {
        let tokens = tokenize("contains(github.event.labels, 'a, b)') && x");
        assert_eq!(tokens[0].text, "contains(github.event.labels, 'a, b)')");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].kind, TokenKind::And);
    }

    #[test]
    fn call_followed_by_path() {
        assert_eq!(
            texts("fromJSON(steps.a.outputs.b).c[0]"),
            vec!["fromJSON(steps.a.outputs.b).c[0]", ""]
        );
    }

    #[test]
    fn unterminated_call_runs_to_end() {
        assert_eq!(texts("f(a, (b"), vec!["f(a, (b", ""]);
    }

    #[test]
    fn literal_classification() {
        assert_eq!(
            kinds("true 42 -1.5 'x' path.to"),
            vec![
                TokenKind::BooleanLiteral,
                TokenKind::NumberLiteral,
                TokenKind::NumberLiteral,
                TokenKind::StringLiteral,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn positions_are_byte_offsets() {
        let tokens = tokenize("é && b");
        assert_eq!(tokens[1].position, 3);
        assert_eq!(tokens[2].position, 6);
        assert_eq!(tokens[3].position, 7);
    }

    #[test]
    fn number_shapes() {
        assert!(is_number("0"));
        assert!(is_number("-12.50"));
        assert!(!is_number("1."));
        assert!(!is_number("-"));
        assert!(!is_number("1.2.3"));
        assert!(!is_number("1e5"));
    }
}
