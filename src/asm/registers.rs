use anyhow::{anyhow, Result};
use std::fmt::{self, Display};

/// The registers the emitted code may name. `$s0..$s7` are handed out by
/// the pool; the rest are always live and never allocated.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Register {
    S0,
    S1,
    S2,
    S3,
    S4,
    S5,
    S6,
    S7,
    Fp,
    Sp,
    Ra,
    V0,
    Zero,
}
impl Register {
    fn name(self) -> &'static str {
        match self {
            Self::S0 => "$s0",
            Self::S1 => "$s1",
            Self::S2 => "$s2",
            Self::S3 => "$s3",
            Self::S4 => "$s4",
            Self::S5 => "$s5",
            Self::S6 => "$s6",
            Self::S7 => "$s7",
            Self::Fp => "$fp",
            Self::Sp => "$sp",
            Self::Ra => "$ra",
            Self::V0 => "$v0",
            Self::Zero => "$zero",
        }
    }

    fn scratch_index(self) -> Option<usize> {
        match self {
            Self::S0 => Some(0),
            Self::S1 => Some(1),
            Self::S2 => Some(2),
            Self::S3 => Some(3),
            Self::S4 => Some(4),
            Self::S5 => Some(5),
            Self::S6 => Some(6),
            Self::S7 => Some(7),
            _ => None,
        }
    }
}
impl Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The callee-saved registers, in the order the prologue stores them.
pub const SCRATCH: [Register; 8] = [
    Register::S0,
    Register::S1,
    Register::S2,
    Register::S3,
    Register::S4,
    Register::S5,
    Register::S6,
    Register::S7,
];

/// A LIFO pool of the eight scratch registers. Exhaustion is a user error;
/// releasing a register twice is a bug in the compiler.
pub struct RegisterPool {
    free: Vec<Register>,
    busy: [bool; SCRATCH.len()],
}
impl RegisterPool {
    pub fn new() -> Self {
        let mut free = Vec::from(SCRATCH);
        free.reverse(); // $s0 on top
        Self { free, busy: [false; SCRATCH.len()] }
    }

    pub fn request(&mut self) -> Result<Register> {
        match self.free.pop() {
            Some(register) => {
                self.busy[register.scratch_index().unwrap()] = true;
                Ok(register)
            }
            None => Err(anyhow!("Expression is too complex.")),
        }
    }

    pub fn release(&mut self, register: Register) {
        let index = match register.scratch_index() {
            Some(index) => index,
            None => panic!("released the built-in register {register}"),
        };
        if self.busy[index] == false {
            panic!("register {register} released twice");
        }
        self.busy[index] = false;
        self.free.push(register);
    }

    pub fn busy_count(&self) -> usize {
        self.busy.iter().filter(|flag| **flag).count()
    }
}
