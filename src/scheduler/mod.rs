#[cfg(test)]
pub mod test;

use std::collections::{BTreeMap, HashSet};

use crate::error::{Error, Result};
use crate::loader::{Unit, UnitId};

/// Produces a dependency-first compile order: every unit appears after all
/// units it imports. The builtin pseudo-unit is scheduled first, and units
/// and dependency lists are visited in sorted UnitId order, so the schedule
/// is deterministic for a given graph.
pub fn schedule(units: &BTreeMap<UnitId, Unit>) -> Result<Vec<UnitId>> {
    let mut order = Vec::with_capacity(units.len());
    let mut done = HashSet::new();
    let mut path = Vec::new();

    let builtin = UnitId::builtin();
    if units.contains_key(&builtin) {
        visit(units, &builtin, &mut done, &mut path, &mut order)?;
    }
    for id in units.keys() {
        visit(units, id, &mut done, &mut path, &mut order)?;
    }
    Ok(order)
}

fn visit(
    units: &BTreeMap<UnitId, Unit>,
    id: &UnitId,
    done: &mut HashSet<UnitId>,
    path: &mut Vec<UnitId>,
    order: &mut Vec<UnitId>,
) -> Result<()> {
    if done.contains(id) {
        return Ok(());
    }
    if let Some(pos) = path.iter().position(|p| p == id) {
        // An ancestor on the current DFS path: an import cycle. The worklist
        // dedup in the resolver cannot catch this, only the in-progress path
        // can.
        let mut cycle = path[pos..].to_vec();
        cycle.push(id.clone());
        return Err(Error::UnresolvedCycle { path: cycle });
    }
    let Some(unit) = units.get(id) else {
        // Dropped during resolution (no source files); nothing to schedule.
        return Ok(());
    };

    path.push(id.clone());
    let mut deps = unit.imports.clone();
    deps.sort();
    deps.dedup();
    for dep in &deps {
        visit(units, dep, done, path, order)?;
    }
    path.pop();

    done.insert(id.clone());
    if !unit.is_empty() {
        order.push(id.clone());
    }
    Ok(())
}
