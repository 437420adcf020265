use crate::ast::{Decl, FuncSig, Param, TypeExpr};
use crate::error::{Error, Result};
use crate::ir::{IrSignature, IrType, Target};
use crate::loader::UnitId;
use crate::scope::Scope;

use super::Compiler;

impl Compiler<'_> {
    /// Everything outside the predeclared fixed-width table is rejected
    /// with a description of the construct that was encountered.
    pub(crate) fn lower_type(
        &self,
        unit: &UnitId,
        ty: &TypeExpr,
        scope: &Scope<'_>,
    ) -> Result<IrType> {
        match ty {
            TypeExpr::Name(name) => {
                if let Some(ty) = primitive_type(name, self.target) {
                    return Ok(ty);
                }
                let kind = match scope.lookup(name) {
                    Some(Decl::Type(_)) => format!("user-defined named type `{name}`"),
                    Some(_) => format!("`{name}` does not name a type"),
                    None => format!("unresolved type name `{name}`"),
                };
                Err(Error::UnsupportedConstruct {
                    unit: unit.clone(),
                    kind,
                })
            }
            TypeExpr::Func(sig) => {
                let sig = self.lower_signature(unit, "func type", sig, scope)?;
                Ok(IrType::Func(Box::new(sig)))
            }
            TypeExpr::Dots(_) => Err(Error::UnsupportedConstruct {
                unit: unit.clone(),
                kind: "variadic marker outside a parameter list".to_string(),
            }),
            TypeExpr::Other(kind) => Err(Error::UnsupportedConstruct {
                unit: unit.clone(),
                kind: kind.clone(),
            }),
        }
    }

    /// Zero results map to void, one to its own type, several to an
    /// anonymous struct. A variadic marker is legal only on the final
    /// parameter and only sets the flag.
    pub(crate) fn lower_signature(
        &self,
        unit: &UnitId,
        func: &str,
        sig: &FuncSig,
        scope: &Scope<'_>,
    ) -> Result<IrSignature> {
        let ret = match sig.results.len() {
            0 => IrType::Void,
            1 => self.lower_type(unit, &sig.results[0].0, scope)?,
            _ => {
                let mut fields = Vec::with_capacity(sig.results.len());
                for (result, _) in &sig.results {
                    fields.push(self.lower_type(unit, result, scope)?);
                }
                IrType::Struct { fields }
            }
        };

        let mut params = Vec::with_capacity(sig.params.len());
        let mut variadic = false;
        let last = sig.params.len().saturating_sub(1);
        for (i, param) in sig.params.iter().enumerate() {
            if let TypeExpr::Dots(_) = &param.ty.0 {
                if i != last {
                    return Err(Error::MisplacedVariadic {
                        unit: unit.clone(),
                        func: func.to_string(),
                        param: param_label(param, i),
                    });
                }
                variadic = true;
                continue;
            }
            params.push(self.lower_type(unit, &param.ty.0, scope)?);
        }
        Ok(IrSignature {
            params,
            ret,
            variadic,
        })
    }
}

fn param_label(param: &Param, index: usize) -> String {
    match &param.name {
        Some((name, _)) => name.clone(),
        None => format!("#{}", index + 1),
    }
}

/// The predeclared type names with a fixed IR lowering.
pub fn primitive_type(name: &str, target: Target) -> Option<IrType> {
    let ty = match name {
        "bool" => IrType::int(1),
        "int8" | "uint8" | "byte" => IrType::int(8),
        "int16" | "uint16" => IrType::int(16),
        "int32" | "uint32" | "rune" => IrType::int(32),
        "int64" | "uint64" => IrType::int(64),
        "int" | "uint" => IrType::int(target.int_bits),
        "float32" => IrType::F32,
        "float64" => IrType::F64,
        "complex64" => IrType::Struct {
            fields: vec![IrType::F32, IrType::F32],
        },
        "complex128" => IrType::Struct {
            fields: vec![IrType::F64, IrType::F64],
        },
        "string" => string_type(target),
        _ => return None,
    };
    Some(ty)
}

// A byte-buffer pointer plus a length of the target's word width.
pub fn string_type(target: Target) -> IrType {
    let data = IrType::Ptr(Box::new(IrType::Array {
        len: 0,
        elem: Box::new(IrType::int(8)),
    }));
    IrType::Struct {
        fields: vec![data, IrType::int(target.int_bits)],
    }
}
