use logos::Logos;

use crate::ast::{Decl, TypeExpr};
use crate::lexer::Token;
use crate::parser::Parser;

fn parse(src: &str) -> (crate::ast::File, bool) {
    let lexer = Token::lexer(src).spanned().peekable();
    let mut parser = Parser::new(lexer, "test.go".to_string());
    let file = parser.parse_file();
    (file, parser.had_errors())
}

#[test]
fn test_package_clause_and_imports() {
    let (file, failed) = parse(
        "package main\n\
         import \"fmt\"\n\
         import (\n\
             \"strings\"\n\
             alias \"foo/bar\"\n\
         )\n",
    );
    assert!(!failed);
    assert_eq!(file.package.0, "main");
    let paths: Vec<&str> = file.imports.iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(paths, vec!["fmt", "strings", "foo/bar"]);
}

#[test]
fn test_func_decl_with_skipped_body() {
    let (file, failed) = parse(
        "package p\n\
         func add(a int32, b int32) int32 {\n\
             return a + b\n\
         }\n\
         var after int64\n",
    );
    assert!(!failed);
    assert_eq!(file.decls.len(), 2);
    let Decl::Func(func) = &file.decls[0] else {
        panic!("expected a function declaration");
    };
    assert_eq!(func.name.0, "add");
    assert_eq!(func.sig.params.len(), 2);
    assert_eq!(
        func.sig.params[0].name.as_ref().map(|(n, _)| n.as_str()),
        Some("a")
    );
    assert_eq!(func.sig.params[0].ty.0, TypeExpr::Name("int32".to_string()));
    assert_eq!(func.sig.results.len(), 1);
    // The body must not leak into the following declaration.
    assert!(matches!(&file.decls[1], Decl::Var(v) if v.names[0].0 == "after"));
}

#[test]
fn test_variadic_and_multi_result() {
    let (file, failed) = parse("package p\nfunc f(a int32, b ...string) (int32, string)\n");
    assert!(!failed);
    let Decl::Func(func) = &file.decls[0] else {
        panic!("expected a function declaration");
    };
    assert!(matches!(&func.sig.params[1].ty.0, TypeExpr::Dots(inner)
        if **inner == TypeExpr::Name("string".to_string())));
    assert_eq!(func.sig.results.len(), 2);
    assert_eq!(func.sig.results[0].0, TypeExpr::Name("int32".to_string()));
    assert_eq!(func.sig.results[1].0, TypeExpr::Name("string".to_string()));
}

#[test]
fn test_value_and_type_groups() {
    let (file, failed) = parse(
        "package p\n\
         const (\n\
             a = 1\n\
             b int32 = 2\n\
         )\n\
         var x, y float64\n\
         type (\n\
             T int32\n\
             U = string\n\
         )\n",
    );
    assert!(!failed);
    assert_eq!(file.decls.len(), 5);
    assert!(matches!(&file.decls[0], Decl::Const(c) if c.names[0].0 == "a" && c.ty.is_none()));
    assert!(matches!(&file.decls[1], Decl::Const(c) if c.ty.is_some()));
    let Decl::Var(var) = &file.decls[2] else {
        panic!("expected a var declaration");
    };
    assert_eq!(var.names.len(), 2);
    assert_eq!(
        var.ty.as_ref().map(|(t, _)| t.clone()),
        Some(TypeExpr::Name("float64".to_string()))
    );
    assert!(matches!(&file.decls[3], Decl::Type(t) if t.name.0 == "T"));
    assert!(
        matches!(&file.decls[4], Decl::Type(t) if t.ty.0 == TypeExpr::Name("string".to_string()))
    );
}

#[test]
fn test_unsupported_type_forms_become_other() {
    let (file, failed) = parse(
        "package p\n\
         var s []int32\n\
         var m map[string]int32\n\
         var q pkg.Thing\n\
         type S struct { x int32 }\n",
    );
    assert!(!failed);
    assert_eq!(file.decls.len(), 4);
    for decl in &file.decls[..3] {
        let Decl::Var(v) = decl else {
            panic!("expected a var declaration");
        };
        assert!(matches!(
            v.ty.as_ref().map(|(t, _)| t),
            Some(TypeExpr::Other(_))
        ));
    }
    assert!(matches!(&file.decls[3], Decl::Type(t)
        if matches!(&t.ty.0, TypeExpr::Other(kind) if kind == "struct type")));
}

#[test]
fn test_func_type_expr() {
    let (file, failed) = parse("package p\nvar cb func(int32, string) float64\n");
    assert!(!failed);
    let Decl::Var(var) = &file.decls[0] else {
        panic!("expected a var declaration");
    };
    let Some((TypeExpr::Func(sig), _)) = &var.ty else {
        panic!("expected a function type");
    };
    assert_eq!(sig.params.len(), 2);
    assert_eq!(sig.params[0].ty.0, TypeExpr::Name("int32".to_string()));
    assert_eq!(sig.results.len(), 1);
    assert_eq!(sig.results[0].0, TypeExpr::Name("float64".to_string()));
}

#[test]
fn test_grouped_parameter_names_are_rejected() {
    let (_, failed) = parse("package p\nfunc f(a, b int32) int32\n");
    assert!(failed);
    // An all-unnamed list stays legal.
    let (_, failed) = parse("package p\nfunc g(int32, string)\n");
    assert!(!failed);
}

#[test]
fn test_missing_package_clause_is_an_error() {
    let (_, failed) = parse("func f()\n");
    assert!(failed);
}

#[test]
fn test_recovers_after_bad_declaration() {
    let (file, failed) = parse("package p\n+ garbage\nvar ok int32\n");
    assert!(failed);
    assert!(matches!(&file.decls[0], Decl::Var(v) if v.names[0].0 == "ok"));
}
