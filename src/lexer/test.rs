use logos::Logos;

use crate::lexer::Token;

fn lex(src: &str) -> Vec<Token> {
    Token::lexer(src).map(|t| t.unwrap()).collect()
}

#[test]
fn test_keywords_and_idents() {
    let tokens = lex("package main\nimport \"fmt\"");
    assert_eq!(
        tokens,
        vec![
            Token::KeywordPackage,
            Token::Ident("main".to_string()),
            Token::Newline,
            Token::KeywordImport,
            Token::Str("fmt".to_string()),
        ]
    );
}

#[test]
fn test_func_signature_tokens() {
    let tokens = lex("func add(a int32, b ...string) float64");
    assert_eq!(
        tokens,
        vec![
            Token::KeywordFunc,
            Token::Ident("add".to_string()),
            Token::LParen,
            Token::Ident("a".to_string()),
            Token::Ident("int32".to_string()),
            Token::Comma,
            Token::Ident("b".to_string()),
            Token::DotDotDot,
            Token::Ident("string".to_string()),
            Token::RParen,
            Token::Ident("float64".to_string()),
        ]
    );
}

#[test]
fn test_comments_are_skipped() {
    let tokens = lex("const x // trailing\n/* block\ncomment */ var y");
    assert_eq!(
        tokens,
        vec![
            Token::KeywordConst,
            Token::Ident("x".to_string()),
            Token::Newline,
            Token::KeywordVar,
            Token::Ident("y".to_string()),
        ]
    );
}

#[test]
fn test_string_escapes() {
    let tokens = lex(r#""a\nb" `raw\n`"#);
    assert_eq!(
        tokens,
        vec![
            Token::Str("a\nb".to_string()),
            Token::RawStr("raw\\n".to_string()),
        ]
    );
}

#[test]
fn test_operator_runs_and_literals() {
    let tokens = lex("x := 10 <= 0x1F");
    assert_eq!(
        tokens,
        vec![
            Token::Ident("x".to_string()),
            Token::Op(":=".to_string()),
            Token::Number,
            Token::Op("<=".to_string()),
            Token::Number,
        ]
    );
}

#[test]
fn test_dots_vs_dot() {
    let tokens = lex("...x a.b");
    assert_eq!(
        tokens,
        vec![
            Token::DotDotDot,
            Token::Ident("x".to_string()),
            Token::Ident("a".to_string()),
            Token::Dot,
            Token::Ident("b".to_string()),
        ]
    );
}
