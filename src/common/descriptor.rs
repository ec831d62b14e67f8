use crate::asm::labels::Label;
use crate::asm::registers::{Register, RegisterPool};
use crate::asm::sink::AsmSink;
use crate::common::types::Type;
use anyhow::{anyhow, Result};

/// A name's compile-time identity: its type plus the addressing strategy
/// that turns the name into registers. `rvalue` yields a register holding
/// the value, `lvalue` a register holding the address to store through.
/// The `Register` variant is the transient result of an expression and is
/// never stored in the symbol table.
#[derive(Clone, Debug)]
pub enum Descriptor {
    GlobalVariable { typ: Type, label: Label },
    GlobalArray { typ: Type, label: Label },
    GlobalProcedure { typ: Type, label: Label },
    LocalVariable { typ: Type, offset: i32 },
    LocalArray { typ: Type, offset: i32 },
    Register { typ: Type, reg: Register },
}
impl Descriptor {
    pub fn typ(&self) -> &Type {
        match self {
            Self::GlobalVariable { typ, .. }
            | Self::GlobalArray { typ, .. }
            | Self::GlobalProcedure { typ, .. }
            | Self::LocalVariable { typ, .. }
            | Self::LocalArray { typ, .. }
            | Self::Register { typ, .. } => typ,
        }
    }

    /// The register held by an expression-result descriptor.
    pub fn register(&self) -> Register {
        match self {
            Self::Register { reg, .. } => *reg,
            _ => panic!("not a register descriptor"),
        }
    }

    pub fn rvalue(&self, registers: &mut RegisterPool, asm: &mut AsmSink) -> Result<Register> {
        match self {
            Self::GlobalVariable { label, .. } => {
                let reg = registers.request()?;
                asm.emit_rl("la", reg, label);
                asm.emit_mem("lw", reg, 0, reg);
                Ok(reg)
            }
            Self::GlobalArray { label, .. } => {
                let reg = registers.request()?;
                asm.emit_rl("la", reg, label);
                Ok(reg)
            }
            Self::GlobalProcedure { .. } => {
                Err(anyhow!("Can't store procedure into variable."))
            }
            Self::LocalVariable { offset, .. } => {
                let reg = registers.request()?;
                asm.emit_mem("lw", reg, *offset, Register::Fp);
                Ok(reg)
            }
            Self::LocalArray { offset, .. } => {
                let reg = registers.request()?;
                asm.emit_rri("addi", reg, Register::Fp, *offset);
                Ok(reg)
            }
            Self::Register { reg, .. } => Ok(*reg),
        }
    }

    pub fn lvalue(&self, registers: &mut RegisterPool, asm: &mut AsmSink) -> Result<Register> {
        match self {
            Self::GlobalVariable { label, .. } => {
                let reg = registers.request()?;
                asm.emit_rl("la", reg, label);
                Ok(reg)
            }
            Self::LocalVariable { offset, .. } => {
                let reg = registers.request()?;
                asm.emit_rri("addi", reg, Register::Fp, *offset);
                Ok(reg)
            }
            Self::GlobalArray { .. } | Self::LocalArray { .. } => {
                Err(anyhow!("Can't assign to array."))
            }
            Self::GlobalProcedure { .. } => Err(anyhow!("Can't assign to procedure.")),
            Self::Register { .. } => panic!("lvalue of a register descriptor"),
        }
    }
}
