
use std::collections::{BTreeMap, HashMap};

use crate::ast::Decl;
use crate::error::{Error, Result};
use crate::loader::{Unit, UnitId};

/// A lexical scope: identifier names mapped to declarations owned by some
/// unit, plus a link to the containing scope. Only two levels exist at this
/// layer, the universe scope and one flat scope per unit chained to it.
#[derive(Debug)]
pub struct Scope<'a> {
    label: String,
    outer: Option<&'a Scope<'a>>,
    decls: HashMap<String, &'a Decl>,
}

impl<'a> Scope<'a> {
    pub fn new(label: impl Into<String>, outer: Option<&'a Scope<'a>>) -> Self {
        Scope {
            label: label.into(),
            outer,
            decls: HashMap::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Colliding with an existing binding in the same scope is an error,
    /// never a silent shadow.
    pub fn insert(&mut self, name: &str, decl: &'a Decl) -> Result<()> {
        if name == "_" {
            // The blank identifier binds nothing.
            return Ok(());
        }
        if self.decls.contains_key(name) {
            return Err(Error::DuplicateDeclaration {
                name: name.to_string(),
                scope: self.label.clone(),
            });
        }
        self.decls.insert(name.to_string(), decl);
        Ok(())
    }

    // Walks outward; the innermost binding wins.
    pub fn lookup(&self, name: &str) -> Option<&'a Decl> {
        match self.decls.get(name) {
            Some(decl) => Some(decl),
            None => self.outer.and_then(|outer| outer.lookup(name)),
        }
    }

    /// Whether `name` is bound in this scope itself.
    pub fn declares(&self, name: &str) -> bool {
        self.decls.contains_key(name)
    }
}

/// Builds the universe scope from the builtin unit's declarations. Constant
/// and variable declarations there each bind exactly one name (`true`,
/// `false`, `iota`, `nil`), so only the first declared name enters the
/// scope; function and type declarations bind their name.
pub fn universe_scope<'a>(units: &'a BTreeMap<UnitId, Unit>) -> Result<Scope<'a>> {
    let builtin = units.get(&UnitId::builtin()).ok_or(Error::MissingBuiltin)?;
    let mut scope = Scope::new("universe", None);
    for decl in builtin.decls() {
        match decl {
            Decl::Const(c) => {
                if let Some((name, _)) = c.names.first() {
                    scope.insert(name, decl)?;
                }
            }
            Decl::Var(v) => {
                if let Some((name, _)) = v.names.first() {
                    scope.insert(name, decl)?;
                }
            }
            Decl::Func(f) => scope.insert(&f.name.0, decl)?,
            Decl::Type(t) => scope.insert(&t.name.0, decl)?,
        }
    }
    Ok(scope)
}

/// One unit's top-level scope, chained to the universe scope; unit-local
/// names shadow universe ones.
pub fn unit_scope<'a>(unit: &'a Unit, universe: &'a Scope<'a>) -> Result<Scope<'a>> {
    let mut scope = Scope::new(unit.id.as_str(), Some(universe));
    for decl in unit.decls() {
        match decl {
            Decl::Const(c) => {
                for (name, _) in &c.names {
                    scope.insert(name, decl)?;
                }
            }
            Decl::Var(v) => {
                for (name, _) in &v.names {
                    scope.insert(name, decl)?;
                }
            }
            Decl::Func(f) => scope.insert(&f.name.0, decl)?,
            Decl::Type(t) => scope.insert(&t.name.0, decl)?,
        }
    }
    Ok(scope)
}
