use crate::common::types::{ArrayType, BasicType, ProcedureType, Type, WORD_SIZE};
use std::rc::Rc;

struct People {
    person: Type,
    child: Type,
    man: Type,
    woman: Type,
    girl: Type,
    boy: Type,
}

fn people() -> People {
    let person = BasicType::new("person", 0, None);
    let adult = BasicType::new("adult", 0, Some(Rc::clone(&person)));
    let child = BasicType::new("child", 0, Some(Rc::clone(&person)));
    let man = BasicType::new("man", 0, Some(Rc::clone(&adult)));
    let woman = BasicType::new("woman", 0, Some(Rc::clone(&adult)));
    let girl = BasicType::new("girl", 0, Some(Rc::clone(&child)));
    let boy = BasicType::new("boy", 0, Some(Rc::clone(&child)));
    People {
        person: Type::Basic(person),
        child: Type::Basic(child),
        man: Type::Basic(man),
        woman: Type::Basic(woman),
        girl: Type::Basic(girl),
        boy: Type::Basic(boy),
    }
}

fn procedure(parameters: Vec<Type>, value: Type) -> Type {
    let mut procedure_type = ProcedureType::new();
    for parameter in parameters {
        procedure_type.add_parameter(parameter);
    }
    procedure_type.set_value(value);
    Type::Procedure(Rc::new(procedure_type))
}

#[test]
fn basic_subtyping_follows_the_supertype_chain() {
    let p = people();
    assert!(p.girl.is_subtype(&p.child));
    assert!(p.girl.is_subtype(&p.person));
    assert!(p.boy.is_subtype(&p.child));
    assert!(p.boy.is_subtype(&p.person));
    assert!(p.person.is_subtype(&p.person));
    assert!(p.person.is_subtype(&p.girl) == false);
    assert!(p.man.is_subtype(&p.child) == false);
    // Siblings under one supertype are unrelated.
    assert!(p.boy.is_subtype(&p.girl) == false);
    assert!(p.girl.is_subtype(&p.boy) == false);
}

#[test]
fn array_subtyping_is_invariant() {
    let p = people();
    let person5 = Type::Array(ArrayType::new(5, p.person.clone()));
    let man5 = Type::Array(ArrayType::new(5, p.man.clone()));
    assert_eq!(person5.to_string(), "[5] person");
    assert_eq!(man5.to_string(), "[5] man");
    assert!(person5.is_subtype(&man5) == false);
    assert!(man5.is_subtype(&person5) == false);
    assert!(person5.is_subtype(&person5));

    // Same length, same element type: equal even across distinct array
    // objects.
    let person5b = Type::Array(ArrayType::new(5, p.person.clone()));
    assert!(person5.is_subtype(&person5b));
    let person4 = Type::Array(ArrayType::new(4, p.person.clone()));
    assert!(person5.is_subtype(&person4) == false);
}

#[test]
fn procedure_subtyping_is_contravariant_in_parameters() {
    let p = people();
    let make_baby = procedure(vec![p.man.clone(), p.woman.clone()], p.child.clone());
    let construct_person = procedure(vec![p.person.clone(), p.person.clone()], p.person.clone());
    assert_eq!(make_baby.to_string(), "proc (man, woman) child");
    assert_eq!(construct_person.to_string(), "proc (person, person) person");
    assert!(make_baby.is_subtype(&construct_person) == false);
    assert!(construct_person.is_subtype(&make_baby) == false);

    // Wider parameter, narrower value: an acceptable substitute.
    let take_person_give_girl = procedure(vec![p.person.clone()], p.girl.clone());
    let take_man_give_child = procedure(vec![p.man.clone()], p.child.clone());
    assert!(take_person_give_girl.is_subtype(&take_man_give_child));
    assert!(take_man_give_child.is_subtype(&take_person_give_girl) == false);
}

#[test]
fn arity_mismatch_is_never_a_subtype() {
    let p = people();
    let unary = procedure(vec![p.person.clone()], p.person.clone());
    let binary = procedure(vec![p.person.clone(), p.person.clone()], p.person.clone());
    assert!(unary.is_subtype(&binary) == false);
    assert!(binary.is_subtype(&unary) == false);
}

#[test]
fn cross_kind_subtyping_is_false() {
    let p = people();
    let person5 = Type::Array(ArrayType::new(5, p.person.clone()));
    assert!(p.person.is_subtype(&person5) == false);
    assert!(person5.is_subtype(&p.person) == false);
}

#[test]
fn sizes_follow_declared_layout() {
    let int_type = Type::Basic(BasicType::new("int", WORD_SIZE, None));
    assert_eq!(int_type.size(), 4);
    let int10 = Type::Array(ArrayType::new(10, int_type.clone()));
    assert_eq!(int10.size(), 40);
    let empty = Type::Array(ArrayType::new(0, int_type));
    assert_eq!(empty.size(), 0);
}
