use crate::common::descriptor::Descriptor;
use crate::common::symbol_table::SymbolTable;
use crate::common::types::{BasicType, Type, WORD_SIZE};

fn int_type() -> Type {
    Type::Basic(BasicType::new("int", WORD_SIZE, None))
}

fn local(offset: i32) -> Descriptor {
    Descriptor::LocalVariable { typ: int_type(), offset }
}

#[test]
fn define_then_lookup() {
    let mut table = SymbolTable::new();
    table.push();
    table.define("x", local(0)).unwrap();
    assert!(table.is_declared("x"));
    assert!(matches!(
        table.lookup("x").unwrap(),
        Descriptor::LocalVariable { offset: 0, .. }
    ));
}

#[test]
fn inner_scopes_shadow_and_pop_restores() {
    let mut table = SymbolTable::new();
    table.push();
    table.define("x", local(0)).unwrap();
    table.push();
    table.define("x", local(-4)).unwrap();
    assert!(matches!(
        table.lookup("x").unwrap(),
        Descriptor::LocalVariable { offset: -4, .. }
    ));
    table.pop();
    assert!(matches!(
        table.lookup("x").unwrap(),
        Descriptor::LocalVariable { offset: 0, .. }
    ));
}

#[test]
fn pop_restores_is_declared() {
    let mut table = SymbolTable::new();
    table.push();
    table.push();
    table.define("y", local(0)).unwrap();
    assert!(table.is_declared("y"));
    table.pop();
    assert!(table.is_declared("y") == false);
    assert_eq!(table.depth(), 1);
}

#[test]
fn duplicate_in_the_same_scope_is_an_error() {
    let mut table = SymbolTable::new();
    table.push();
    table.define("x", local(0)).unwrap();
    let err = table.define("x", local(-4)).unwrap_err();
    assert!(err.to_string().contains("x is already declared."));
}

#[test]
fn lookup_of_an_unknown_name_is_an_error() {
    let mut table = SymbolTable::new();
    table.push();
    let err = table.lookup("z").unwrap_err();
    assert!(err.to_string().contains("z is not declared."));
}

#[test]
#[should_panic]
fn pop_of_an_empty_table_panics() {
    SymbolTable::new().pop();
}
