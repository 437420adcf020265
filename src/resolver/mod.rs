
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::path::PathBuf;

use crate::diag::Diag;
use crate::error::Result;
use crate::loader::{Unit, UnitId, UnitLoader};

#[derive(Debug, Clone)]
struct Pending {
    id: UnitId,
    importer_dir: Option<PathBuf>,
}

// FIFO worklist that accepts each UnitId at most once, ever; the same unit
// imported from several places is still loaded exactly once.
#[derive(Debug, Default)]
struct UnitQueue {
    items: VecDeque<Pending>,
    seen: HashSet<UnitId>,
}

impl UnitQueue {
    fn push(&mut self, pending: Pending) -> bool {
        if !self.seen.insert(pending.id.clone()) {
            return false;
        }
        self.items.push_back(pending);
        true
    }

    fn pop(&mut self) -> Option<Pending> {
        self.items.pop_front()
    }
}

/// Resolves the transitive import closure of `roots` plus the builtin
/// pseudo-unit. Units without source files are dropped from the result but
/// do not abort the traversal; any other load failure aborts immediately.
/// Import cycles are not detected here, that is the scheduler's job.
pub fn resolve_units(
    loader: &dyn UnitLoader,
    roots: &[UnitId],
    diag: &Diag,
) -> Result<BTreeMap<UnitId, Unit>> {
    let mut queue = UnitQueue::default();
    queue.push(Pending {
        id: UnitId::builtin(),
        importer_dir: None,
    });
    for root in roots {
        queue.push(Pending {
            id: root.clone(),
            importer_dir: None,
        });
    }

    let mut units = BTreeMap::new();
    while let Some(pending) = queue.pop() {
        diag.resolve(format!("unit: {}", pending.id));
        let unit = match loader.load(&pending.id, pending.importer_dir.as_deref()) {
            Ok(unit) => unit,
            Err(err) if err.is_recoverable() => {
                diag.warn(format!("skipping: {}", err));
                continue;
            }
            Err(err) => return Err(err),
        };
        for dep in &unit.imports {
            let dep = loader.canonicalize(dep, Some(&unit.dir))?;
            queue.push(Pending {
                id: dep,
                importer_dir: Some(unit.dir.clone()),
            });
        }
        units.insert(pending.id, unit);
    }
    Ok(units)
}
