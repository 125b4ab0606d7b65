//! Scanner integration tests.
//!
//! Verifies that the scanner correctly tokenizes ActionScript constructs.

use as3ts_scanner::{Scanner, Token, TokenKind};

/// Helper: scan all tokens from source.
fn scan_tokens(source: &str) -> Vec<Token<'_>> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.scan();
        if token.is_eof() {
            break;
        }
        tokens.push(token);
    }
    tokens
}

/// Helper: scan all tokens from source and return as (kind, text) pairs.
fn scan_all(source: &str) -> Vec<(TokenKind, &str)> {
    scan_tokens(source).into_iter().map(|t| (t.kind, t.text)).collect()
}

/// Helper: scan all token texts.
fn scan_texts(source: &str) -> Vec<&str> {
    scan_tokens(source).into_iter().map(|t| t.text).collect()
}

#[test]
fn test_empty_source() {
    assert!(scan_all("").is_empty());
}

#[test]
fn test_whitespace_only() {
    assert!(scan_all("   \n\t  ").is_empty());
}

#[test]
fn test_eof_is_sticky() {
    let mut scanner = Scanner::new("x");
    assert_eq!(scanner.scan().text, "x");
    let eof = scanner.scan();
    assert!(eof.is_eof());
    assert_eq!((eof.pos, eof.end), (1, 1));
    assert!(scanner.scan().is_eof());
}

#[test]
fn test_numeric_literals() {
    let tokens = scan_all("42 3.14 .5 0xFF 1e10 2.5E-3");
    assert!(tokens.iter().all(|(kind, _)| *kind == TokenKind::NumericLiteral));
    let texts: Vec<&str> = tokens.iter().map(|(_, text)| *text).collect();
    assert_eq!(texts, vec!["42", "3.14", ".5", "0xFF", "1e10", "2.5E-3"]);
}

#[test]
fn test_number_followed_by_member_access() {
    // `1.toString` is not a fraction.
    assert_eq!(scan_texts("1.toString"), vec!["1", ".", "toString"]);
}

#[test]
fn test_string_literals_keep_quotes() {
    let tokens = scan_all(r#""hello" 'world' "say \"hi\"""#);
    assert_eq!(
        tokens,
        vec![
            (TokenKind::StringLiteral, r#""hello""#),
            (TokenKind::StringLiteral, "'world'"),
            (TokenKind::StringLiteral, r#""say \"hi\"""#),
        ]
    );
}

#[test]
fn test_unterminated_string_reports_diagnostic() {
    let mut scanner = Scanner::new("\"open\nnext");
    let token = scanner.scan();
    assert_eq!(token.kind, TokenKind::StringLiteral);
    assert_eq!(token.text, "\"open");
    assert_eq!(scanner.diagnostics().len(), 1);
    assert_eq!(scanner.diagnostics().diagnostics()[0].code, 1002);
    assert_eq!(scanner.scan().text, "next");
}

#[test]
fn test_keywords_are_identifiers() {
    let tokens = scan_all("package class function var extends");
    assert!(tokens.iter().all(|(kind, _)| *kind == TokenKind::Identifier));
}

#[test]
fn test_identifiers() {
    assert_eq!(scan_texts("_private $jq camelCase x1"), vec!["_private", "$jq", "camelCase", "x1"]);
}

#[test]
fn test_block_comment_is_a_token() {
    let tokens = scan_tokens("a /* note\n spans lines */ b");
    assert_eq!(tokens.len(), 3);
    assert!(tokens[1].is_comment());
    assert_eq!(tokens[1].text, "/* note\n spans lines */");
    assert_eq!(tokens[1].pos, 2);
    assert!(!tokens[2].preceding_line_break);
}

#[test]
fn test_unterminated_block_comment() {
    let mut scanner = Scanner::new("/* never closed");
    let token = scanner.scan();
    assert!(token.is_comment());
    assert_eq!(token.end, 15);
    let diagnostics = scanner.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.diagnostics()[0].code, 1010);
    assert!(scanner.diagnostics().is_empty());
}

#[test]
fn test_line_comments_are_skipped() {
    assert_eq!(scan_texts("a // one\n// two\r\nb // three"), vec!["a", "b"]);
}

#[test]
fn test_preceding_line_break() {
    let tokens = scan_tokens("return\nx; y");
    assert!(!tokens[0].preceding_line_break);
    assert!(tokens[1].preceding_line_break);
    assert!(!tokens[3].preceding_line_break);
}

#[test]
fn test_punctuators() {
    assert_eq!(
        scan_texts("a.b::c ... .. ? ~ @ % ^ |"),
        vec!["a", ".", "b", "::", "c", "...", "..", "?", "~", "@", "%", "^", "|"]
    );
}

#[test]
fn test_vector_type_arguments() {
    assert_eq!(
        scan_texts("Vector.<Vector.<int>>"),
        vec!["Vector", ".<", "Vector", ".<", "int", ">", ">"]
    );
}

#[test]
fn test_compound_assignment_operators() {
    assert_eq!(
        scan_texts("+= -= *= /= %= &= |= ^= <<= &&= ||="),
        vec!["+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", "&&=", "||="]
    );
}

#[test]
fn test_invalid_character() {
    let mut scanner = Scanner::new("a # b");
    scanner.scan();
    let unknown = scanner.scan();
    assert_eq!(unknown.kind, TokenKind::Unknown);
    assert_eq!(unknown.text, "#");
    let diagnostic = &scanner.diagnostics().diagnostics()[0];
    assert_eq!(diagnostic.code, 1027);
    assert_eq!(diagnostic.message_text, "Invalid character '#'.");
    assert_eq!(scanner.scan().text, "b");
}

#[test]
fn test_token_ranges_slice_source() {
    let source = "var count:int = 10;";
    for token in scan_tokens(source) {
        assert_eq!(&source[token.pos as usize..token.end as usize], token.text);
    }
}

#[test]
fn test_string_token_does_not_match_punctuator() {
    let tokens = scan_tokens("'{' {");
    assert!(!tokens[0].is("{"));
    assert!(tokens[1].is("{"));
}
