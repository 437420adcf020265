use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::ast::File;
use crate::error::Error;
use crate::loader::{SourceFile, Unit, UnitId};
use crate::scheduler::schedule;

fn unit(id: &str, imports: &[&str]) -> Unit {
    Unit {
        id: UnitId::new(id),
        dir: PathBuf::from(id),
        files: vec![SourceFile {
            path: PathBuf::from(format!("{id}/{id}.go")),
            ast: File {
                package: (id.to_string(), 0..0),
                imports: vec![],
                decls: vec![],
            },
        }],
        imports: imports.iter().map(|i| UnitId::new(*i)).collect(),
    }
}

fn unit_map(specs: &[(&str, &[&str])]) -> BTreeMap<UnitId, Unit> {
    let mut map = BTreeMap::new();
    map.insert(UnitId::builtin(), unit("builtin", &[]));
    for (id, imports) in specs {
        map.insert(UnitId::new(*id), unit(id, imports));
    }
    map
}

fn position(order: &[UnitId], id: &str) -> usize {
    let id = UnitId::new(id);
    order
        .iter()
        .position(|o| *o == id)
        .unwrap_or_else(|| panic!("`{id}` missing from the schedule"))
}

#[test]
fn dependencies_come_before_dependents() {
    let units = unit_map(&[
        ("app", &["lib", "util"]),
        ("lib", &["util"]),
        ("util", &[]),
    ]);
    let order = schedule(&units).unwrap();

    assert!(position(&order, "util") < position(&order, "lib"));
    assert!(position(&order, "lib") < position(&order, "app"));
}

#[test]
fn the_builtin_unit_is_scheduled_first() {
    let units = unit_map(&[("aaa", &[]), ("app", &["aaa"])]);
    let order = schedule(&units).unwrap();
    assert_eq!(order[0], UnitId::builtin());
}

#[test]
fn the_schedule_is_deterministic() {
    let units = unit_map(&[
        ("app", &["x", "y", "z"]),
        ("x", &["z"]),
        ("y", &["z"]),
        ("z", &[]),
    ]);
    let first = schedule(&units).unwrap();
    let second = schedule(&units).unwrap();
    assert_eq!(first, second);
}

#[test]
fn a_diamond_schedules_each_unit_once() {
    let units = unit_map(&[
        ("top", &["left", "right"]),
        ("left", &["base"]),
        ("right", &["base"]),
        ("base", &[]),
    ]);
    let order = schedule(&units).unwrap();
    assert_eq!(order.len(), 5);
    assert!(position(&order, "base") < position(&order, "left"));
    assert!(position(&order, "base") < position(&order, "right"));
}

#[test]
fn an_import_cycle_is_reported_with_its_path() {
    let units = unit_map(&[("a", &["b"]), ("b", &["a"])]);
    let err = schedule(&units).unwrap_err();
    match err {
        Error::UnresolvedCycle { path } => {
            assert!(path.contains(&UnitId::new("a")));
            assert!(path.contains(&UnitId::new("b")));
            // The path closes on the unit that reopened it.
            assert_eq!(path.first(), path.last());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn a_self_import_is_a_cycle() {
    let units = unit_map(&[("selfish", &["selfish"])]);
    let err = schedule(&units).unwrap_err();
    assert!(matches!(err, Error::UnresolvedCycle { .. }));
}

#[test]
fn empty_units_are_omitted_from_the_order() {
    let mut units = unit_map(&[("app", &["C"])]);
    units.insert(UnitId::foreign(), Unit::placeholder(UnitId::foreign()));

    let order = schedule(&units).unwrap();
    assert!(!order.contains(&UnitId::foreign()));
    assert!(order.contains(&UnitId::new("app")));
}

#[test]
fn dropped_dependencies_are_skipped() {
    // "gone" was dropped during resolution and never entered the unit set.
    let units = unit_map(&[("app", &["gone"])]);
    let order = schedule(&units).unwrap();
    assert!(order.contains(&UnitId::new("app")));
    assert!(!order.contains(&UnitId::new("gone")));
}
