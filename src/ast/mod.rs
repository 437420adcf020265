use std::ops::Range;

/// One parsed source file: package clause, import paths and top-level
/// declarations. Statement and expression syntax is skipped at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub package: (String, Range<usize>),
    pub imports: Vec<(String, Range<usize>)>,
    pub decls: Vec<Decl>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Const(ConstDecl),
    Func(FuncDecl),
    Type(TypeDecl),
    Var(VarDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub names: Vec<(String, Range<usize>)>,
    pub ty: Option<(TypeExpr, Range<usize>)>,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub names: Vec<(String, Range<usize>)>,
    pub ty: Option<(TypeExpr, Range<usize>)>,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: (String, Range<usize>),
    pub ty: (TypeExpr, Range<usize>),
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: (String, Range<usize>),
    pub sig: FuncSig,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncSig {
    pub params: Vec<Param>,
    pub results: Vec<(TypeExpr, Range<usize>)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Option<(String, Range<usize>)>,
    pub ty: (TypeExpr, Range<usize>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Name(String),
    Func(Box<FuncSig>),
    /// `...T`, only valid in final parameter position.
    Dots(Box<TypeExpr>),
    /// Any type form the translator does not model yet; carries a
    /// description of what was seen.
    Other(String),
}
