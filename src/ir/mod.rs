use std::fmt::{self, Display, Formatter};

use crate::loader::UnitId;

/// Width parameters of the compilation target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub int_bits: u32,
}

impl Default for Target {
    fn default() -> Self {
        Target { int_bits: 32 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IrType {
    Void,
    Int { bits: u32 },
    F32,
    F64,
    Ptr(Box<IrType>),
    Array { len: u64, elem: Box<IrType> },
    Struct { fields: Vec<IrType> },
    Func(Box<IrSignature>),
}

impl IrType {
    pub fn int(bits: u32) -> IrType {
        IrType::Int { bits }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IrSignature {
    pub params: Vec<IrType>,
    pub ret: IrType,
    pub variadic: bool,
}

/// Bodies are produced by statement translation, which this front end does
/// not perform; the type has no constructors yet, so every
/// `IrFunction::body` is statically `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum FuncBody {}

/// Scaffold for one top-level function, created with a provisional (absent)
/// signature in the index phase and finalized in the fill phase.
#[derive(Debug, Clone, PartialEq)]
pub struct IrFunction {
    pub name: String,
    pub sig: Option<IrSignature>,
    pub body: Option<FuncBody>,
}

impl IrFunction {
    pub fn scaffold(name: impl Into<String>) -> Self {
        IrFunction {
            name: name.into(),
            sig: None,
            body: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.body.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlobalKind {
    Const,
    Var,
}

/// The type stays `None` when the declaration relies on initialiser
/// inference, which is outside this front end's coverage.
#[derive(Debug, Clone, PartialEq)]
pub struct IrGlobal {
    pub name: String,
    pub kind: GlobalKind,
    pub ty: Option<IrType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IrTypeDef {
    pub name: String,
    pub ty: Option<IrType>,
}

/// One IR module per compiled unit.
#[derive(Debug, Clone, PartialEq)]
pub struct IrModule {
    pub source_unit: UnitId,
    pub typedefs: Vec<IrTypeDef>,
    pub globals: Vec<IrGlobal>,
    pub functions: Vec<IrFunction>,
}

impl IrModule {
    pub fn new(source_unit: UnitId) -> Self {
        IrModule {
            source_unit,
            typedefs: vec![],
            globals: vec![],
            functions: vec![],
        }
    }

    pub fn function_mut(&mut self, name: &str) -> Option<&mut IrFunction> {
        self.functions.iter_mut().find(|f| f.name == name)
    }

    pub fn global_mut(&mut self, name: &str) -> Option<&mut IrGlobal> {
        self.globals.iter_mut().find(|g| g.name == name)
    }

    pub fn typedef_mut(&mut self, name: &str) -> Option<&mut IrTypeDef> {
        self.typedefs.iter_mut().find(|t| t.name == name)
    }
}

// Display implementations

impl Display for IrType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Void => write!(f, "void"),
            IrType::Int { bits } => write!(f, "i{}", bits),
            IrType::F32 => write!(f, "float"),
            IrType::F64 => write!(f, "double"),
            IrType::Ptr(pointee) => write!(f, "{}*", pointee),
            IrType::Array { len, elem } => write!(f, "[{} x {}]", len, elem),
            IrType::Struct { fields } => {
                write!(f, "{{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", field)?;
                }
                write!(f, " }}")
            }
            IrType::Func(sig) => {
                write!(f, "{} (", sig.ret)?;
                for (i, param) in sig.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                if sig.variadic {
                    if !sig.params.is_empty() {
                        write!(f, ", ")?;
                    }
                    write!(f, "...")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl Display for IrFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Some(sig) = &self.sig else {
            return write!(f, "; func @{} (signature pending)", self.name);
        };
        write!(f, "declare {} @{}(", sig.ret, self.name)?;
        for (i, param) in sig.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        if sig.variadic {
            if !sig.params.is_empty() {
                write!(f, ", ")?;
            }
            write!(f, "...")?;
        }
        write!(f, ")")
    }
}

impl Display for IrGlobal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            GlobalKind::Const => "constant",
            GlobalKind::Var => "global",
        };
        match &self.ty {
            Some(ty) => write!(f, "@{} = external {} {}", self.name, kind, ty),
            None => write!(f, "; {} @{} (type pending)", kind, self.name),
        }
    }
}

impl Display for IrTypeDef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.ty {
            Some(ty) => write!(f, "%{} = type {}", self.name, ty),
            None => write!(f, "%{} = type opaque", self.name),
        }
    }
}

impl Display for IrModule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "; unit: {}", self.source_unit)?;
        for typedef in &self.typedefs {
            writeln!(f, "{}", typedef)?;
        }
        for global in &self.globals {
            writeln!(f, "{}", global)?;
        }
        for function in &self.functions {
            writeln!(f, "{}", function)?;
        }
        Ok(())
    }
}
