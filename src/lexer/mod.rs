use logos::Logos;

#[cfg(test)]
pub mod test;

/// Token set for the Go-style surface syntax. Newlines terminate simple
/// declarations, so they are kept as a token instead of being skipped with
/// the rest of the whitespace. Function bodies and initialiser expressions
/// are only ever skipped by bracket matching, which is why operators and
/// numbers need no payloads.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\f]+")] // Horizontal whitespace only; newlines are tokens.
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
pub enum Token {
    #[token("\n")]
    Newline,

    #[token("package")]
    KeywordPackage,

    #[token("import")]
    KeywordImport,

    #[token("func")]
    KeywordFunc,

    #[token("var")]
    KeywordVar,

    #[token("const")]
    KeywordConst,

    #[token("type")]
    KeywordType,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| {
        lex.slice().to_string()
    })]
    Ident(String),

    #[regex(r#""([^"\\]*(\\.[^"\\]*)*)""#, |lex| {
        let s = lex.slice();
        s[1..s.len() - 1]
            .replace("\\\"", "\"")
            .replace("\\\\", "\\")
            .replace("\\n", "\n")
            .replace("\\r", "\r")
            .replace("\\t", "\t")
        // Removes quotes and handles the common escape sequences.
    })]
    Str(String),

    #[regex(r"`[^`]*`", |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    RawStr(String),

    #[regex(r"'([^'\\]|\\.)*'")]
    Rune,

    // Integer and float literals in all the usual spellings. The value is
    // never consumed (expression translation is out of scope), so the raw
    // slice is not kept.
    #[regex(r"[0-9][0-9a-zA-Z_.]*")]
    Number,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token("...")]
    DotDotDot,

    #[token(".")]
    Dot,

    #[token("=")]
    Assign,

    // Catch-all for operator runs inside skipped bodies and initialisers
    // (`+`, `:=`, `<-`, `&&`, ...). Low priority so the dedicated tokens
    // above win.
    #[regex(r"[-+*/%&|^<>=!:~]+", |lex| lex.slice().to_string(), priority = 1)]
    Op(String),
}
