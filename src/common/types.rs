use getset::{CopyGetters, Getters};
use std::fmt::{self, Display};
use std::rc::Rc;

pub const WORD_SIZE: u32 = 4;
pub const ADDRESS_SIZE: u32 = 4;

/// A SNARL type. Basic types are nominal, with an optional supertype chain;
/// array and procedure types are built over them. Shared `Rc`s carry the
/// nominal identity.
#[derive(Clone, Debug)]
pub enum Type {
    Basic(Rc<BasicType>),
    Array(Rc<ArrayType>),
    Procedure(Rc<ProcedureType>),
}
impl Type {
    pub fn size(&self) -> u32 {
        match self {
            Self::Basic(basic) => basic.size(),
            Self::Array(array) => array.length() * array.element().size(),
            Self::Procedure(_) => ADDRESS_SIZE,
        }
    }

    pub fn is_subtype(&self, other: &Type) -> bool {
        match (self, other) {
            (Self::Basic(a), Self::Basic(b)) => {
                let mut link = Rc::clone(a);
                loop {
                    if Rc::ptr_eq(&link, b) {
                        return true;
                    }
                    let parent = match link.supertype() {
                        Some(parent) => Rc::clone(parent),
                        None => return false,
                    };
                    link = parent;
                }
            }
            (Self::Array(a), Self::Array(b)) => {
                a.length() == b.length() && a.element().same(b.element())
            }
            (Self::Procedure(p), Self::Procedure(q)) => {
                p.arity() == q.arity()
                    && p.value().is_subtype(q.value())
                    && (0..q.arity()).all(|index| q.parameter(index).is_subtype(p.parameter(index)))
            }
            _ => false,
        }
    }

    /// Nominal identity: both sides name the same type object.
    fn same(&self, other: &Type) -> bool {
        match (self, other) {
            (Self::Basic(a), Self::Basic(b)) => Rc::ptr_eq(a, b),
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::Procedure(a), Self::Procedure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(basic) => write!(f, "{}", basic.name()),
            Self::Array(array) => write!(f, "[{}] {}", array.length(), array.element()),
            Self::Procedure(procedure) => {
                write!(f, "proc (")?;
                for index in 0..procedure.arity() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", procedure.parameter(index))?;
                }
                write!(f, ") {}", procedure.value())
            }
        }
    }
}

#[derive(Getters, CopyGetters, Debug)]
pub struct BasicType {
    #[getset(get = "pub")]
    name: String,
    #[getset(get_copy = "pub")]
    size: u32,
    #[getset(get = "pub")]
    supertype: Option<Rc<BasicType>>,
}
impl BasicType {
    pub fn new(name: &str, size: u32, supertype: Option<Rc<BasicType>>) -> Rc<Self> {
        Rc::new(Self {
            name: String::from(name),
            size,
            supertype,
        })
    }
}

#[derive(Getters, CopyGetters, Debug)]
pub struct ArrayType {
    #[getset(get_copy = "pub")]
    length: u32,
    #[getset(get = "pub")]
    element: Type,
}
impl ArrayType {
    pub fn new(length: u32, element: Type) -> Rc<Self> {
        Rc::new(Self { length, element })
    }
}

/// Built incrementally while a signature is parsed, then frozen behind an
/// `Rc`.
#[derive(Default, Debug)]
pub struct ProcedureType {
    parameters: Vec<Type>,
    value: Option<Type>,
}
impl ProcedureType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_parameter(&mut self, typ: Type) {
        self.parameters.push(typ);
    }

    /// Set once.
    pub fn set_value(&mut self, typ: Type) {
        assert!(self.value.is_none(), "value type set twice");
        self.value = Some(typ);
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    pub fn parameter(&self, index: usize) -> &Type {
        &self.parameters[index]
    }

    pub fn value(&self) -> &Type {
        self.value.as_ref().expect("value type not set")
    }
}
