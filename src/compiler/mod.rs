pub mod types;


use std::collections::BTreeMap;

use crate::ast::Decl;
use crate::diag::Diag;
use crate::error::Result;
use crate::ir::{GlobalKind, IrFunction, IrGlobal, IrModule, IrTypeDef, Target};
use crate::loader::{Unit, UnitId};
use crate::scope::{self, Scope};

/// Translates scheduled units into IR modules, two phases per unit: index
/// creates named scaffolds for every top-level declaration so forward and
/// mutual references resolve by name, fill then lowers the declared types.
/// Bodies are never filled; statement translation is not part of this
/// front end.
pub struct Compiler<'a> {
    units: &'a BTreeMap<UnitId, Unit>,
    target: Target,
    diag: &'a Diag,
    modules: BTreeMap<UnitId, IrModule>,
}

impl<'a> Compiler<'a> {
    pub fn new(units: &'a BTreeMap<UnitId, Unit>, target: Target, diag: &'a Diag) -> Self {
        Compiler {
            units,
            target,
            diag,
            modules: BTreeMap::new(),
        }
    }

    /// Compiles units in schedule order. The returned map iterates in sorted
    /// UnitId order, which is the emission order for callers.
    pub fn compile(mut self, order: &[UnitId]) -> Result<BTreeMap<UnitId, IrModule>> {
        let universe = scope::universe_scope(self.units)?;
        for id in order {
            let Some(unit) = self.units.get(id) else {
                continue;
            };
            self.diag.compile(format!("unit: {}", id));
            if unit.id.is_builtin() {
                // The builtin unit only feeds the universe scope; its module
                // carries no declarations of its own.
                self.modules.insert(id.clone(), IrModule::new(id.clone()));
                continue;
            }
            let scope = scope::unit_scope(unit, &universe)?;
            let mut module = IrModule::new(id.clone());
            self.index_unit(unit, &mut module);
            self.fill_unit(unit, &scope, &mut module)?;
            self.modules.insert(id.clone(), module);
        }
        Ok(self.modules)
    }

    fn index_unit(&self, unit: &Unit, module: &mut IrModule) {
        for decl in unit.decls() {
            match decl {
                Decl::Func(f) => {
                    self.diag.compile(format!("   index func: {}", f.name.0));
                    module
                        .functions
                        .push(IrFunction::scaffold(f.name.0.clone()));
                }
                Decl::Const(c) => {
                    for (name, _) in &c.names {
                        if name != "_" {
                            module.globals.push(IrGlobal {
                                name: name.clone(),
                                kind: GlobalKind::Const,
                                ty: None,
                            });
                        }
                    }
                }
                Decl::Var(v) => {
                    for (name, _) in &v.names {
                        if name != "_" {
                            module.globals.push(IrGlobal {
                                name: name.clone(),
                                kind: GlobalKind::Var,
                                ty: None,
                            });
                        }
                    }
                }
                Decl::Type(t) => {
                    module.typedefs.push(IrTypeDef {
                        name: t.name.0.clone(),
                        ty: None,
                    });
                }
            }
        }
    }

    fn fill_unit(&self, unit: &Unit, scope: &Scope<'_>, module: &mut IrModule) -> Result<()> {
        for decl in unit.decls() {
            match decl {
                Decl::Func(f) => {
                    self.diag.compile(format!("   fill func: {}", f.name.0));
                    let sig = self.lower_signature(&unit.id, &f.name.0, &f.sig, scope)?;
                    if let Some(scaffold) = module.function_mut(&f.name.0) {
                        scaffold.sig = Some(sig);
                    }
                }
                Decl::Const(c) => {
                    if let Some((ty, _)) = &c.ty {
                        let ty = self.lower_type(&unit.id, ty, scope)?;
                        for (name, _) in &c.names {
                            if let Some(global) = module.global_mut(name) {
                                global.ty = Some(ty.clone());
                            }
                        }
                    }
                    // Untyped constants stay pending: their type comes from
                    // the initialiser, and expression translation is out of
                    // scope.
                }
                Decl::Var(v) => {
                    if let Some((ty, _)) = &v.ty {
                        let ty = self.lower_type(&unit.id, ty, scope)?;
                        for (name, _) in &v.names {
                            if let Some(global) = module.global_mut(name) {
                                global.ty = Some(ty.clone());
                            }
                        }
                    }
                }
                Decl::Type(t) => {
                    let ty = self.lower_type(&unit.id, &t.ty.0, scope)?;
                    if let Some(typedef) = module.typedef_mut(&t.name.0) {
                        typedef.ty = Some(ty);
                    }
                }
            }
        }
        Ok(())
    }
}
