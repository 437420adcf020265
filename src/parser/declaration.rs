use std::ops::Range;

use crate::ast::{ConstDecl, Decl, FuncDecl, FuncSig, Param, TypeDecl, TypeExpr, VarDecl};
use crate::lexer::Token;
use crate::parser::Parser;

impl Parser<'_> {
    pub fn parse_import(&mut self, imports: &mut Vec<(String, Range<usize>)>) {
        self.bump(); // `import`
        let kw_span = self.last_span.clone();
        if self.eat(&Token::LParen).is_some() {
            loop {
                self.skip_terminators();
                match self.peek_token() {
                    Some((Ok(Token::RParen), _)) => {
                        self.bump();
                        break;
                    }
                    Some(_) => {
                        if let Some(path) = self.parse_import_spec() {
                            imports.push(path);
                        }
                    }
                    None => {
                        self.error(
                            kw_span,
                            "unterminated import group",
                            "no closing `)` before end of file",
                        );
                        break;
                    }
                }
            }
        } else if let Some(path) = self.parse_import_spec() {
            imports.push(path);
        }
    }

    fn parse_import_spec(&mut self) -> Option<(String, Range<usize>)> {
        // Optional alias (`name "path"`, `. "path"`, `_ "path"`). Only the
        // canonical path matters to the core, the alias is not recorded.
        if matches!(
            self.peek_token(),
            Some((Ok(Token::Ident(_)), _)) | Some((Ok(Token::Dot), _))
        ) {
            self.bump();
        }
        match self.peek_token() {
            Some((Ok(Token::Str(path)), span)) | Some((Ok(Token::RawStr(path)), span)) => {
                self.bump();
                Some((path, span))
            }
            Some((token, span)) => {
                self.error(
                    span,
                    "expected an import path string",
                    format!("found {:?} instead", token),
                );
                self.skip_to_terminator();
                None
            }
            None => {
                self.error(
                    self.last_span.clone(),
                    "expected an import path string",
                    "reached end of file instead",
                );
                None
            }
        }
    }

    pub fn parse_func(&mut self) -> Option<FuncDecl> {
        self.bump(); // `func`
        let start = self.last_span.clone();

        // Method receiver. Methods are plain functions to the core, the
        // receiver is stepped over.
        if matches!(self.peek_token(), Some((Ok(Token::LParen), _))) {
            self.skip_balanced(Token::LParen, Token::RParen);
        }

        let name = match self.expect_ident("a function name") {
            Some(name) => name,
            None => {
                self.skip_to_terminator();
                return None;
            }
        };

        // Type parameter list, stepped over.
        if matches!(self.peek_token(), Some((Ok(Token::LBracket), _))) {
            self.skip_balanced(Token::LBracket, Token::RBracket);
        }

        if self.eat(&Token::LParen).is_none() {
            let span = self
                .peek_token()
                .map(|(_, s)| s)
                .unwrap_or_else(|| self.last_span.clone());
            self.error(
                span,
                "expected `(` after the function name",
                "the parameter list starts here",
            );
            self.skip_to_terminator();
            return None;
        }
        let params = self.parse_params();
        let results = self.parse_results();

        // Body tokens are skipped wholesale; statement translation is not
        // part of this front end.
        if matches!(self.peek_token(), Some((Ok(Token::LBrace), _))) {
            self.skip_balanced(Token::LBrace, Token::RBrace);
        }

        let span = start.start..self.last_span.end;
        Some(FuncDecl {
            name,
            sig: FuncSig { params, results },
            span,
        })
    }

    /// Parses a parameter list after its `(` has been consumed, through the
    /// closing `)`. A list must be all named or all unnamed; the grouped
    /// form `a, b int32` parses as a mix and is rejected.
    pub fn parse_params(&mut self) -> Vec<Param> {
        let mut params = vec![];
        loop {
            self.skip_terminators();
            let Some((token, span)) = self.peek_token() else {
                self.error(
                    self.last_span.clone(),
                    "unterminated parameter list",
                    "no closing `)` before end of file",
                );
                break;
            };
            match token {
                Ok(Token::RParen) => {
                    self.bump();
                    break;
                }
                Ok(Token::Comma) => {
                    self.bump();
                }
                Ok(Token::Ident(first)) => {
                    self.bump();
                    if Self::is_composite_keyword(&first)
                        || matches!(self.peek_token(), Some((Ok(Token::Dot), _)))
                    {
                        // `struct{...}`, `map[K]V`, a qualified name, ...:
                        // an unnamed parameter of a composite type.
                        let ty = self.continue_type_from_ident(first, span);
                        params.push(Param { name: None, ty });
                    } else if self.starts_type() {
                        let ty = self.parse_type_expr();
                        params.push(Param {
                            name: Some((first, span)),
                            ty,
                        });
                    } else {
                        params.push(Param {
                            name: None,
                            ty: (TypeExpr::Name(first), span),
                        });
                    }
                }
                Ok(_) if self.starts_type() => {
                    let ty = self.parse_type_expr();
                    params.push(Param { name: None, ty });
                }
                other => {
                    self.error(
                        span,
                        "expected a parameter",
                        format!("found {:?} instead", other),
                    );
                    self.bump();
                }
            }
        }
        let named = params.iter().filter(|p| p.name.is_some()).count();
        if named > 0 && named < params.len() {
            let span = params
                .iter()
                .find(|p| p.name.is_none())
                .map(|p| p.ty.1.clone())
                .unwrap_or_else(|| self.last_span.clone());
            self.error(
                span,
                "mixed named and unnamed parameters",
                "grouped names (`a, b int32`) are not supported; give each parameter its own type",
            );
        }
        params
    }

    /// Result lists keep only the types; named results lose their names.
    pub fn parse_results(&mut self) -> Vec<(TypeExpr, Range<usize>)> {
        if self.eat(&Token::LParen).is_some() {
            self.parse_params().into_iter().map(|p| p.ty).collect()
        } else if self.starts_type() {
            vec![self.parse_type_expr()]
        } else {
            vec![]
        }
    }

    pub fn parse_value_decl(&mut self, is_const: bool, decls: &mut Vec<Decl>) {
        self.bump(); // `const` / `var`
        let kw_span = self.last_span.clone();
        if self.eat(&Token::LParen).is_some() {
            loop {
                self.skip_terminators();
                match self.peek_token() {
                    Some((Ok(Token::RParen), _)) => {
                        self.bump();
                        break;
                    }
                    Some(_) => {
                        if let Some(decl) = self.parse_value_spec(is_const) {
                            decls.push(decl);
                        }
                    }
                    None => {
                        self.error(
                            kw_span,
                            "unterminated declaration group",
                            "no closing `)` before end of file",
                        );
                        break;
                    }
                }
            }
        } else if let Some(decl) = self.parse_value_spec(is_const) {
            decls.push(decl);
        }
    }

    fn parse_value_spec(&mut self, is_const: bool) -> Option<Decl> {
        let what = if is_const {
            "a constant name"
        } else {
            "a variable name"
        };
        let Some(first) = self.expect_ident(what) else {
            self.skip_to_terminator();
            return None;
        };
        let start = first.1.start;
        let mut names = vec![first];
        while self.eat(&Token::Comma).is_some() {
            match self.expect_ident("another name after `,`") {
                Some(name) => names.push(name),
                None => {
                    self.skip_to_terminator();
                    break;
                }
            }
        }
        let ty = if self.starts_type() {
            Some(self.parse_type_expr())
        } else {
            None
        };
        if self.eat(&Token::Assign).is_some() {
            // Initialiser expressions are not modelled; step to end of line.
            self.skip_to_terminator();
        }
        let span = start..self.last_span.end;
        Some(if is_const {
            Decl::Const(ConstDecl { names, ty, span })
        } else {
            Decl::Var(VarDecl { names, ty, span })
        })
    }

    pub fn parse_type_decl(&mut self, decls: &mut Vec<Decl>) {
        self.bump(); // `type`
        let kw_span = self.last_span.clone();
        if self.eat(&Token::LParen).is_some() {
            loop {
                self.skip_terminators();
                match self.peek_token() {
                    Some((Ok(Token::RParen), _)) => {
                        self.bump();
                        break;
                    }
                    Some(_) => {
                        if let Some(decl) = self.parse_type_spec() {
                            decls.push(decl);
                        }
                    }
                    None => {
                        self.error(
                            kw_span,
                            "unterminated declaration group",
                            "no closing `)` before end of file",
                        );
                        break;
                    }
                }
            }
        } else if let Some(decl) = self.parse_type_spec() {
            decls.push(decl);
        }
    }

    fn parse_type_spec(&mut self) -> Option<Decl> {
        let Some(name) = self.expect_ident("a type name") else {
            self.skip_to_terminator();
            return None;
        };
        // Alias form `type A = B`; the distinction does not survive
        // translation, both sides land in the same scaffold.
        let _ = self.eat(&Token::Assign);
        let ty = self.parse_type_expr();
        let span = name.1.start..self.last_span.end;
        Some(Decl::Type(TypeDecl { name, ty, span }))
    }

    pub fn parse_type_expr(&mut self) -> (TypeExpr, Range<usize>) {
        let Some((token, span)) = self.peek_token() else {
            self.error(
                self.last_span.clone(),
                "expected a type expression",
                "reached end of file instead",
            );
            return (
                TypeExpr::Other("missing type expression".to_string()),
                self.last_span.clone(),
            );
        };
        match token {
            Ok(Token::DotDotDot) => {
                self.bump();
                let (inner, inner_span) = self.parse_type_expr();
                (
                    TypeExpr::Dots(Box::new(inner)),
                    span.start..inner_span.end,
                )
            }
            Ok(Token::Ident(name)) => {
                self.bump();
                self.continue_type_from_ident(name, span)
            }
            Ok(Token::KeywordFunc) => {
                self.bump();
                let sig = if self.eat(&Token::LParen).is_some() {
                    let params = self.parse_params();
                    let results = self.parse_results();
                    FuncSig { params, results }
                } else {
                    self.error(
                        span.clone(),
                        "expected `(` after `func` in a function type",
                        "the parameter list starts here",
                    );
                    FuncSig {
                        params: vec![],
                        results: vec![],
                    }
                };
                (
                    TypeExpr::Func(Box::new(sig)),
                    span.start..self.last_span.end,
                )
            }
            Ok(Token::LBracket) => {
                // Covers both `[]T` and `[N]T`.
                self.skip_balanced(Token::LBracket, Token::RBracket);
                let (_elem, elem_span) = self.parse_type_expr();
                (
                    TypeExpr::Other("array or slice type".to_string()),
                    span.start..elem_span.end,
                )
            }
            Ok(Token::Op(op)) if op.starts_with('*') => {
                self.bump();
                let (_inner, inner_span) = self.parse_type_expr();
                (
                    TypeExpr::Other("pointer type".to_string()),
                    span.start..inner_span.end,
                )
            }
            Ok(Token::Op(op)) if op.starts_with("<-") => {
                self.bump();
                let (_inner, inner_span) = self.parse_type_expr();
                (
                    TypeExpr::Other("channel type".to_string()),
                    span.start..inner_span.end,
                )
            }
            other => {
                self.error(
                    span.clone(),
                    "expected a type expression",
                    format!("found {:?} instead", other),
                );
                self.bump();
                (
                    TypeExpr::Other("unrecognized type expression".to_string()),
                    span,
                )
            }
        }
    }

    // The leading identifier has already been consumed.
    fn continue_type_from_ident(
        &mut self,
        name: String,
        span: Range<usize>,
    ) -> (TypeExpr, Range<usize>) {
        match name.as_str() {
            "struct" | "interface" => {
                self.skip_balanced(Token::LBrace, Token::RBrace);
                (
                    TypeExpr::Other(format!("{} type", name)),
                    span.start..self.last_span.end,
                )
            }
            "map" => {
                self.skip_balanced(Token::LBracket, Token::RBracket);
                let (_value, value_span) = self.parse_type_expr();
                (
                    TypeExpr::Other("map type".to_string()),
                    span.start..value_span.end,
                )
            }
            "chan" => {
                if let Some((Ok(Token::Op(op)), _)) = self.peek_token() {
                    if op.starts_with("<-") {
                        self.bump();
                    }
                }
                if self.starts_type() {
                    self.parse_type_expr();
                }
                (
                    TypeExpr::Other("channel type".to_string()),
                    span.start..self.last_span.end,
                )
            }
            _ => {
                if self.eat(&Token::Dot).is_some() {
                    let selector = self
                        .expect_ident("a type name after `.`")
                        .map(|(s, _)| s)
                        .unwrap_or_default();
                    (
                        TypeExpr::Other(format!("qualified type `{}.{}`", name, selector)),
                        span.start..self.last_span.end,
                    )
                } else {
                    (TypeExpr::Name(name), span)
                }
            }
        }
    }

    fn is_composite_keyword(name: &str) -> bool {
        matches!(name, "struct" | "interface" | "map" | "chan")
    }

    fn starts_type(&mut self) -> bool {
        match self.peek_token() {
            Some((Ok(Token::Ident(_)), _))
            | Some((Ok(Token::KeywordFunc), _))
            | Some((Ok(Token::LBracket), _))
            | Some((Ok(Token::DotDotDot), _)) => true,
            Some((Ok(Token::Op(op)), _)) => op.starts_with('*') || op.starts_with("<-"),
            _ => false,
        }
    }
}
