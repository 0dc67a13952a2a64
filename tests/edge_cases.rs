use std::time::{Duration, Instant};

use exprguard::{MAX_NESTING_DEPTH, ParseError, expression, parse, tokenize, validate_document};

const BUDGET: Duration = Duration::from_secs(10);

#[test]
fn empty_and_whitespace_only() {
    assert_eq!(parse(""), Err(ParseError::EmptyExpression));
    assert_eq!(parse(" \t\r\n "), Err(ParseError::EmptyExpression));
    assert!(validate_document("").is_ok());
    assert!(validate_document("   \n\n").is_ok());
}

#[test]
fn empty_span_is_unauthorized() {
    let err = validate_document("${{ }}").unwrap_err();
    assert_eq!(err.expressions(), vec![""]);
}

#[test]
fn fifty_nested_parentheses() {
    let input = format!("{}github.workflow{}", "(".repeat(55), ")".repeat(55));
    assert_eq!(parse(&input).unwrap(), expression("github.workflow"));
    assert!(validate_document(&format!("${{{{ {input} }}}}")).is_ok());
}

#[test]
fn nesting_beyond_limit_degrades_to_whole_fragment() {
    let depth = MAX_NESTING_DEPTH * 4;
    let input = format!("{}github.workflow{}", "(".repeat(depth), ")".repeat(depth));
    assert!(matches!(
        parse(&input),
        Err(ParseError::NestingTooDeep { .. })
    ));
    let err = validate_document(&format!("${{{{ {input} }}}}")).unwrap_err();
    assert_eq!(err.expressions().len(), 1);
}

#[test]
fn unbalanced_parentheses() {
    let opens = "(".repeat(10_000);
    assert!(parse(&opens).is_err());
    let closes = ")".repeat(10_000);
    assert!(parse(&closes).is_err());
}

#[test]
fn thousands_of_unmatched_openers() {
    let start = Instant::now();
    let doc = "${{".repeat(5_000) + &"{".repeat(5_000) + &"$".repeat(5_000);
    assert!(validate_document(&doc).is_ok());
    assert!(start.elapsed() < BUDGET);
}

#[test]
fn unmatched_openers_after_valid_span() {
    let doc = format!("${{{{ github.actor }}}} {}", "${{ {".repeat(5_000));
    assert!(validate_document(&doc).is_ok());
}

#[test]
fn megabyte_document() {
    let start = Instant::now();
    let line = "Triggered by ${{ github.actor }} in ${{ github.repository }}.\n";
    let doc = line.repeat((1 << 20) / line.len() + 1);
    assert!(doc.len() >= 1 << 20);
    assert!(validate_document(&doc).is_ok());
    assert!(start.elapsed() < BUDGET);
}

#[test]
fn megabyte_expression() {
    let start = Instant::now();
    let chain = vec!["github.actor"; 80_000].join(" || ");
    assert!(chain.len() >= 1 << 20);
    assert!(matches!(
        parse(&chain),
        Err(ParseError::NestingTooDeep { .. })
    ));
    // Over-deep spans are checked operand by operand.
    assert!(validate_document(&format!("${{{{ {chain} }}}}")).is_ok());

    let tainted = format!("${{{{ {chain} || secrets.X }}}}");
    let err = validate_document(&tainted).unwrap_err();
    assert_eq!(err.expressions().len(), 1);
    assert!(start.elapsed() < BUDGET);
}

#[test]
fn long_and_chain_of_sanctioned_names() {
    let chain = vec!["github.actor"; 300].join(" && ");
    assert!(matches!(
        parse(&chain),
        Err(ParseError::NestingTooDeep { .. })
    ));
    assert!(validate_document(&format!("${{{{ {chain} }}}}")).is_ok());

    let mixed = format!("${{{{ {chain} || (needs.a.outputs.b && !secrets.X) }}}}");
    let err = validate_document(&mixed).unwrap_err();
    assert_eq!(err.expressions(), vec!["secrets.X"]);
}

#[test]
fn megabyte_single_token() {
    let start = Instant::now();
    let token = "a".repeat(1 << 20);
    let tokens = tokenize(&token);
    assert_eq!(tokens.len(), 2);
    let err = validate_document(&format!("${{{{ {token} }}}}")).unwrap_err();
    assert_eq!(err.expressions().len(), 1);
    assert!(start.elapsed() < BUDGET);
}

#[test]
fn unterminated_quotes() {
    for input in ["'abc", "\"abc", "`abc", "x == 'a && b"] {
        let tokens = tokenize(input);
        assert_eq!(tokens.last().map(|t| t.text), Some(""));
        let _ = parse(input);
        assert!(validate_document(&format!("${{{{ {input} }}}}")).is_err());
    }
}

#[test]
fn non_ascii_input() {
    assert!(parse("ñ && 日本 || ü").is_ok());
    assert!(validate_document("${{ 日本.語 }}").is_err());
    assert!(validate_document("héllo ${{ github.actor }} wörld").is_ok());
}

#[test]
fn stray_punctuation() {
    for input in [",", "!", "&&", "||", "(", ")", "a,", "!(", "a (b)"] {
        assert!(parse(input).is_err(), "{input:?} should not parse");
    }
}
