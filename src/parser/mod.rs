pub mod declaration;

#[cfg(test)]
pub mod test;

use crate::ast;
use crate::lexer::Token;

use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use logos::SpannedIter;

use std::iter::Peekable;
use std::ops::Range;

type TokenIter<'a> = Peekable<SpannedIter<'a, Token>>;

/// Declaration-level parser: package clause, import list and top-level
/// declaration headers of one source file. Function bodies and initialiser
/// expressions are skipped by bracket matching, never parsed.
pub struct Parser<'a> {
    tokens: TokenIter<'a>,
    file: String,
    last_span: Range<usize>,
    errors: Vec<Report<'a, (String, Range<usize>)>>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: TokenIter<'a>, file: String) -> Self {
        Parser {
            tokens,
            file,
            last_span: 0..0,
            errors: vec![],
        }
    }

    pub fn parse_file(&mut self) -> ast::File {
        self.skip_terminators();
        let package = self.parse_package_clause();

        let mut imports = vec![];
        let mut decls = vec![];
        loop {
            self.skip_terminators();
            let Some((token, span)) = self.peek_token() else {
                break;
            };
            let Ok(token) = token else {
                self.error(
                    span,
                    "unrecognized token",
                    "this is not valid source text",
                );
                self.bump();
                continue;
            };
            match token {
                Token::KeywordImport => self.parse_import(&mut imports),
                Token::KeywordFunc => {
                    if let Some(decl) = self.parse_func() {
                        decls.push(ast::Decl::Func(decl));
                    }
                }
                Token::KeywordConst => self.parse_value_decl(true, &mut decls),
                Token::KeywordVar => self.parse_value_decl(false, &mut decls),
                Token::KeywordType => self.parse_type_decl(&mut decls),
                other => {
                    self.error(
                        span,
                        "expected a top-level declaration",
                        format!(
                            "found {:?}; only import, func, var, const and type may appear here",
                            other
                        ),
                    );
                    self.skip_to_terminator();
                }
            }
        }

        ast::File {
            package,
            imports,
            decls,
        }
    }

    fn parse_package_clause(&mut self) -> (String, Range<usize>) {
        let Some(start) = self.eat(&Token::KeywordPackage) else {
            let span = self
                .peek_token()
                .map(|(_, s)| s)
                .unwrap_or_else(|| self.last_span.clone());
            self.error(
                span.clone(),
                "missing package clause",
                "every source file must start with `package <name>`",
            );
            return (String::new(), span);
        };
        match self.expect_ident("a package name") {
            Some((name, span)) => (name, start.start..span.end),
            None => (String::new(), start),
        }
    }

    pub fn had_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Prints every collected report against the given source text. Returns
    /// whether any error was reported.
    pub fn report_errors(&self, source: &str) -> bool {
        let source = Source::from(source.to_string());
        for error in &self.errors {
            error.print((self.file.clone(), source.clone())).ok();
        }
        self.had_errors()
    }

    fn bump(&mut self) -> Option<(Result<Token, ()>, Range<usize>)> {
        let item = self.tokens.next();
        if let Some((_, span)) = &item {
            self.last_span = span.clone();
        }
        item
    }

    fn peek_token(&mut self) -> Option<(Result<Token, ()>, Range<usize>)> {
        self.tokens.peek().map(|(t, s)| (t.clone(), s.clone()))
    }

    fn eat(&mut self, expected: &Token) -> Option<Range<usize>> {
        match self.peek_token() {
            Some((Ok(token), span)) if token == *expected => {
                self.bump();
                Some(span)
            }
            _ => None,
        }
    }

    fn expect_ident(&mut self, what: &str) -> Option<(String, Range<usize>)> {
        match self.peek_token() {
            Some((Ok(Token::Ident(name)), span)) => {
                self.bump();
                Some((name, span))
            }
            Some((token, span)) => {
                self.error(
                    span,
                    format!("expected {}", what),
                    format!("found {:?} instead", token),
                );
                None
            }
            None => {
                self.error(
                    self.last_span.clone(),
                    format!("expected {}", what),
                    "reached end of file instead",
                );
                None
            }
        }
    }

    fn skip_terminators(&mut self) {
        while self.eat(&Token::Newline).is_some() || self.eat(&Token::Semicolon).is_some() {}
    }

    // Consumes through the next newline or semicolon at bracket depth zero,
    // stopping short of a closing bracket that would unbalance the
    // enclosing construct.
    fn skip_to_terminator(&mut self) {
        let mut depth: u32 = 0;
        while let Some((token, _)) = self.peek_token() {
            match token {
                Ok(Token::Newline) | Ok(Token::Semicolon) if depth == 0 => {
                    self.bump();
                    return;
                }
                Ok(Token::LParen) | Ok(Token::LBracket) | Ok(Token::LBrace) => {
                    depth += 1;
                    self.bump();
                }
                Ok(Token::RParen) | Ok(Token::RBracket) | Ok(Token::RBrace) => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                    self.bump();
                }
                _ => {
                    self.bump();
                }
            }
        }
    }

    // Consumes a balanced bracket pair, the opening token included.
    fn skip_balanced(&mut self, open: Token, close: Token) {
        let Some(open_span) = self.eat(&open) else {
            return;
        };
        let mut depth = 1usize;
        while let Some((token, _)) = self.bump() {
            match token {
                Ok(t) if t == open => depth += 1,
                Ok(t) if t == close => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
        self.error(
            open_span,
            "unterminated bracket",
            format!("no matching {:?} before end of file", close),
        );
    }

    fn error(&mut self, span: Range<usize>, msg: impl Into<String>, label: impl Into<String>) {
        self.errors.push(
            Report::build(ReportKind::Error, (self.file.clone(), span.clone()))
                .with_code("syntax")
                .with_label(
                    Label::new((self.file.clone(), span))
                        .with_message(label.into())
                        .with_color(ColorGenerator::new().next()),
                )
                .with_message(msg.into())
                .finish(),
        );
    }
}
