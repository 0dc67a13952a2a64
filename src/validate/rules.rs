use std::sync::LazyLock;

use regex::Regex;

use crate::parse::is_number;

/// `needs.<job>...` and `steps.<step>...` with optional numeric indexes.
static JOB_OR_STEP_OUTPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:needs|steps)\.[A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+|\[\d+\])*$")
        .expect("job/step output pattern is valid")
});

/// Dispatch inputs, workflow-call inputs, shared-workflow inputs and env.
static INPUT_OR_ENV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:github\.event\.inputs|github\.aw\.inputs|inputs|env)\.[A-Za-z0-9_-]+$")
        .expect("input/env pattern is valid")
});

/// Single-quoted (with `''` escapes), double-quoted or backtick literal.
static STRING_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:'(?:[^']|'')*'|"[^"]*"|`[^`]*`)$"#).expect("string literal pattern is valid")
});

const COMPARISON_OPERATORS: [&str; 6] = ["==", "!=", "<=", ">=", "<", ">"];

pub(crate) fn is_dynamic_path(text: &str) -> bool {
    JOB_OR_STEP_OUTPUT.is_match(text) || INPUT_OR_ENV.is_match(text)
}

pub(crate) fn is_literal(text: &str) -> bool {
    text == "true" || text == "false" || is_number(text) || STRING_LITERAL.is_match(text)
}

/// Property-name segments of `text`. Unquoted text is split into runs of
/// identifier characters, so `.`, brackets, operators and whitespace all
/// separate segments. Quoted literals are skipped unless they sit directly
/// inside a bracket index such as `['__proto__']`, where the quoted text is
/// itself a property name. Purely numeric segments are dropped.
pub(crate) fn property_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut run_start: Option<usize> = None;
    let mut last_unquoted: Option<char> = None;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let is_ident = c.is_alphanumeric() || c == '_' || c == '$';
        if is_ident {
            run_start.get_or_insert(i);
            last_unquoted = Some(c);
            continue;
        }
        if let Some(start) = run_start.take() {
            segments.push(&text[start..i]);
        }
        if matches!(c, '\'' | '"' | '`') {
            let body_start = i + c.len_utf8();
            let mut body_end = text.len();
            while let Some((j, d)) = chars.next() {
                if d == '\\' && chars.peek().is_some_and(|&(_, e)| e == c) {
                    chars.next();
                    continue;
                }
                if d == c {
                    body_end = j;
                    break;
                }
            }
            if last_unquoted == Some('[') {
                segments.push(&text[body_start..body_end]);
            }
            last_unquoted = None;
        } else if !c.is_whitespace() {
            last_unquoted = Some(c);
        }
    }
    if let Some(start) = run_start {
        segments.push(&text[start..]);
    }
    segments.retain(|seg| !seg.is_empty() && !seg.bytes().all(|b| b.is_ascii_digit()));
    segments
}

/// Top-level `||` alternatives of `text`, ignoring quoted operators.
pub(crate) fn split_alternatives(text: &str) -> Vec<&str> {
    split_unquoted(text, |rest| rest.starts_with("||").then_some(2))
}

/// Operands of the top-level `&&` and `||` connectives of `text`, ignoring
/// operators inside quoted literals or parentheses.
pub(crate) fn split_connectives(text: &str) -> Vec<&str> {
    split_unquoted(text, |rest| {
        (rest.starts_with("&&") || rest.starts_with("||")).then_some(2)
    })
}

/// Operands of the comparison operators in `text`, ignoring quoted
/// operators. A single element means there was no comparison.
pub(crate) fn split_comparison(text: &str) -> Vec<&str> {
    split_unquoted(text, |rest| {
        COMPARISON_OPERATORS
            .iter()
            .find(|op| rest.starts_with(**op))
            .map(|op| op.len())
    })
}

/// The property path ending at the end of `operand`, if any: the longest
/// suffix of path characters, starting with a letter or underscore.
pub(crate) fn trailing_path(operand: &str) -> Option<&str> {
    let operand = operand.trim_end();
    let start = operand
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphanumeric() || matches!(*c, '_' | '.' | '-' | '[' | ']'))
        .last()
        .map(|(i, _)| i)?;
    let path = &operand[start..];
    path.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        .then_some(path)
}

/// Split `text` wherever `separator` matches outside a quoted literal and
/// outside parentheses.
/// `separator` returns the byte length of the separator at the start of
/// the slice it is given.
fn split_unquoted<F>(text: &str, separator: F) -> Vec<&str>
where
    F: Fn(&str) -> Option<usize>,
{
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut depth = 0_usize;
    let mut i = 0;
    while let Some(c) = text[i..].chars().next() {
        match quote {
            Some(q) => {
                if c == '\\' && text[i + 1..].starts_with(q) {
                    i += 1 + q.len_utf8();
                    continue;
                }
                if c == q {
                    quote = None;
                }
            }
            None if matches!(c, '\'' | '"' | '`') => quote = Some(c),
            None if c == '(' => depth += 1,
            None if c == ')' => depth = depth.saturating_sub(1),
            None if depth > 0 => {}
            None => {
                if let Some(len) = separator(&text[i..]) {
                    parts.push(&text[start..i]);
                    i += len;
                    start = i;
                    continue;
                }
            }
        }
        i += c.len_utf8();
    }
    parts.push(&text[start..]);
    parts
}
