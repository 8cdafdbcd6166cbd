//! Combined exit synthesis: schema intersection, index maps, routing of
//! sibling tuples, and the failure modes.

use invar_core::config::PointSelector;
use invar_core::errors::CombineError;
use invar_core::types::{PointDecl, RepType, Value, ValueObservation, VarDecl};
use invar_engine::ppt::{combine_exits, PptRegistry};

fn int(name: &str) -> VarDecl {
    VarDecl::new(name, "int", RepType::Int)
}

fn registry(decls: Vec<PointDecl>) -> PptRegistry {
    let selector = PointSelector::default();
    let mut reg = PptRegistry::new();
    for decl in &decls {
        reg.declare(decl, &selector).unwrap();
    }
    reg.link();
    reg
}

fn three_point_function() -> PptRegistry {
    registry(vec![
        PointDecl::new("F.f():::ENTER", vec![int("a")]),
        PointDecl::new("F.f():::EXIT1", vec![int("a"), int("b"), int("c")]),
        PointDecl::new("F.f():::EXIT2", vec![int("a"), int("c"), int("d")]),
    ])
}

fn ints(values: &[i64]) -> ValueObservation {
    ValueObservation::modified(values.iter().map(|v| Value::Int(*v)))
}

#[test]
fn test_combined_schema_is_shared_variables() {
    let mut reg = three_point_function();
    let created = combine_exits(&mut reg).unwrap();
    assert_eq!(created.len(), 1);

    let combined = &reg[created[0]];
    assert_eq!(combined.name().as_str(), "F.f():::EXIT");
    assert!(combined.is_combined());
    let names: Vec<&str> = combined.slots().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["a", "c"]);
    assert_eq!(combined.entry(), reg.id_of("F.f():::ENTER"));
}

#[test]
fn test_index_maps_per_exit() {
    let mut reg = three_point_function();
    let created = combine_exits(&mut reg).unwrap();

    let x1 = reg.by_name("F.f():::EXIT1").unwrap();
    let remap = x1.remap().unwrap();
    assert_eq!(remap.tuple_positions(), &[0, 2]);
    assert_eq!(remap.slot_map(), &[Some(0), None, Some(1)]);
    assert_eq!(x1.combined_exit(), Some(created[0]));
    assert!(x1.controllers().contains(&created[0]));

    let x2 = reg.by_name("F.f():::EXIT2").unwrap();
    let remap = x2.remap().unwrap();
    assert_eq!(remap.tuple_positions(), &[0, 1]);
    assert_eq!(remap.slot_map(), &[Some(0), Some(1), None]);
}

#[test]
fn test_sibling_tuples_reach_combined_exit() {
    let mut reg = three_point_function();
    let created = combine_exits(&mut reg).unwrap();
    reg.record("F.f():::EXIT1", ints(&[1, 2, 3])).unwrap();
    reg.record("F.f():::EXIT2", ints(&[4, 5, 6])).unwrap();
    reg.record("F.f():::EXIT2", ints(&[7, 8, 9])).unwrap();

    assert_eq!(reg.by_name("F.f():::EXIT1").unwrap().buffered(), 1);
    assert_eq!(reg.by_name("F.f():::EXIT2").unwrap().buffered(), 2);
    assert_eq!(reg[created[0]].buffered(), 3);
}

#[test]
fn test_constants_excluded_from_combined_schema() {
    let mut reg = registry(vec![
        PointDecl::new("F.g():::ENTER", vec![]),
        PointDecl::new("F.g():::EXIT1", vec![int("K").with_constant(Value::Int(3)), int("r")]),
        PointDecl::new("F.g():::EXIT2", vec![int("K").with_constant(Value::Int(3)), int("r")]),
    ]);
    let created = combine_exits(&mut reg).unwrap();
    let combined = &reg[created[0]];
    let names: Vec<&str> = combined.slots().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["r"]);
    assert_eq!(reg.by_name("F.g():::EXIT1").unwrap().remap().unwrap().tuple_positions(), &[0]);
}

#[test]
fn test_single_exit_is_not_combined() {
    let mut reg = registry(vec![
        PointDecl::new("F.h():::ENTER", vec![int("a")]),
        PointDecl::new("F.h():::EXIT4", vec![int("a")]),
    ]);
    assert!(combine_exits(&mut reg).unwrap().is_empty());
    assert!(reg.by_name("F.h():::EXIT").is_none());
}

#[test]
fn test_declared_combined_name_collides() {
    let mut reg = registry(vec![
        PointDecl::new("F.f():::ENTER", vec![]),
        PointDecl::new("F.f():::EXIT", vec![]),
        PointDecl::new("F.f():::EXIT1", vec![]),
        PointDecl::new("F.f():::EXIT2", vec![]),
    ]);
    let err = combine_exits(&mut reg).unwrap_err();
    assert!(matches!(err, CombineError::NameCollision { ref name } if name == "F.f():::EXIT"));
}

#[test]
fn test_out_of_order_shared_variables_are_structural_mismatch() {
    let mut reg = registry(vec![
        PointDecl::new("F.f():::ENTER", vec![]),
        PointDecl::new("F.f():::EXIT1", vec![int("a"), int("c")]),
        PointDecl::new("F.f():::EXIT2", vec![int("c"), int("a")]),
    ]);
    let err = combine_exits(&mut reg).unwrap_err();
    assert!(matches!(
        err,
        CombineError::StructuralMismatch { ref exit, consumed: 1, expected: 2, .. } if exit == "F.f():::EXIT2"
    ));
}
