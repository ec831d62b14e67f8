use crate::asm::registers::{Register, SCRATCH};
use crate::common::descriptor::Descriptor;
use crate::common::types::{ArrayType, Type};
use crate::stage1_lex::tokens::Token;
use crate::stage2_compile::{is_declaration, Compiler, Frame};
use anyhow::Result;

impl Compiler {
    /// One declaration: `int name`, `string name`, or `[N] int name`.
    /// Returns the declared type and the declared name.
    pub(super) fn next_declared(&mut self) -> Result<(Type, String)> {
        match self.scanner.token() {
            Token::Int => {
                self.scanner.next_token()?;
                let name = String::from(self.scanner.token_string());
                self.next_expected(Token::Name)?;
                Ok((self.int_type.clone(), name))
            }
            Token::String => {
                self.scanner.next_token()?;
                let name = String::from(self.scanner.token_string());
                self.next_expected(Token::Name)?;
                Ok((self.string_type.clone(), name))
            }
            Token::OpenBracket => {
                self.scanner.next_token()?;
                let length = self.scanner.token_int();
                self.next_expected(Token::IntConstant)?;
                self.next_expected(Token::CloseBracket)?;
                self.next_expected(Token::Int)?;
                let name = String::from(self.scanner.token_string());
                self.next_expected(Token::Name)?;
                let typ = Type::Array(ArrayType::new(length as u32, self.int_type.clone()));
                Ok((typ, name))
            }
            _ => Err(self.scanner.error("Declaration expected.")),
        }
    }

    /// The `int` / `string` keyword naming a procedure's value type.
    pub(super) fn next_value_type(&mut self) -> Result<Type> {
        let typ = match self.scanner.token() {
            Token::Int => self.int_type.clone(),
            Token::String => self.string_type.clone(),
            _ => return Err(self.scanner.error("Expected int, or string.")),
        };
        self.scanner.next_token()?;
        Ok(typ)
    }

    /// A declaration at program scope claims `.data` storage.
    pub(super) fn next_global_declaration(&mut self) -> Result<()> {
        log::trace!("next_global_declaration");
        let (typ, name) = self.next_declared()?;
        let label = self.globals.enter_variable(&mut self.labels, &typ);
        let descriptor = match typ {
            Type::Array(_) => Descriptor::GlobalArray { typ, label },
            _ => Descriptor::GlobalVariable { typ, label },
        };
        self.define(&name, descriptor)
    }

    /// `proc name (params) value : decls begin … end`, compiled against the
    /// signature pass 1 recorded under the same name.
    pub(super) fn next_procedure(&mut self) -> Result<()> {
        log::trace!("next_procedure");
        self.scanner.next_token()?;
        let name = String::from(self.scanner.token_string());
        self.next_expected(Token::Name)?;

        let (procedure_type, label) = match self.lookup(&name)? {
            Descriptor::GlobalProcedure { typ: Type::Procedure(procedure_type), label } => {
                (procedure_type, label)
            }
            _ => unreachable!("pass 1 records a procedure descriptor for every proc"),
        };
        self.asm.emit_label(&label);

        self.symbols.push();
        let arity = procedure_type.arity();

        // The signature again, this time installing parameter descriptors.
        // Parameters are caller-pushed, one word each, the first at the
        // highest positive offset.
        self.next_expected(Token::OpenParen)?;
        let mut index = 0;
        if is_declaration(self.scanner.token()) {
            self.next_parameter(arity, &mut index)?;
            while self.scanner.token() == Token::Comma {
                self.scanner.next_token()?;
                self.next_parameter(arity, &mut index)?;
            }
        }
        self.next_expected(Token::CloseParen)?;
        let value_type = self.next_value_type()?;
        self.next_expected(Token::Colon)?;

        // Body declarations claim frame slots at and below 0($fp).
        let mut local_bytes = 0u32;
        if is_declaration(self.scanner.token()) {
            self.next_local_declaration(&mut local_bytes)?;
            while self.scanner.token() == Token::Semicolon {
                self.scanner.next_token()?;
                self.next_local_declaration(&mut local_bytes)?;
            }
        }

        self.value_type = Some(value_type);
        self.frame = Some(Frame { local_bytes, arity });

        self.emit_prologue(local_bytes);
        self.next_begin()?;
        self.emit_epilogue();

        self.value_type = None;
        self.frame = None;
        self.symbols.pop();
        Ok(())
    }

    fn next_parameter(&mut self, arity: usize, index: &mut usize) -> Result<()> {
        let (typ, name) = self.next_declared()?;
        let offset = (4 * (arity - *index)) as i32;
        *index += 1;
        // Array parameters are passed by address: their word on the frame
        // holds the base address, so they address like scalars.
        self.define(&name, Descriptor::LocalVariable { typ, offset })
    }

    fn next_local_declaration(&mut self, local_bytes: &mut u32) -> Result<()> {
        let (typ, name) = self.next_declared()?;
        *local_bytes += typ.size();
        let offset = 4 - *local_bytes as i32;
        let descriptor = match typ {
            Type::Array(_) => Descriptor::LocalArray { typ, offset },
            _ => Descriptor::LocalVariable { typ, offset },
        };
        self.define(&name, descriptor)
    }

    /// Reserve the frame and save $ra, the caller's $fp, and $s0..$s7 at
    /// their fixed offsets; $fp then anchors the new frame at the
    /// callee-entry $sp.
    fn emit_prologue(&mut self, local_bytes: u32) {
        let frame_bytes = 40 + local_bytes as i32;
        self.asm.emit_rri("addi", Register::Sp, Register::Sp, -frame_bytes);
        self.asm.emit_mem("sw", Register::Ra, 40, Register::Sp);
        self.asm.emit_mem("sw", Register::Fp, 36, Register::Sp);
        for (index, register) in SCRATCH.iter().enumerate() {
            self.asm.emit_mem("sw", *register, 32 - 4 * index as i32, Register::Sp);
        }
        self.asm.emit_rri("addi", Register::Fp, Register::Sp, frame_bytes);
    }

    /// Restore the saved registers, pop the frame and the caller-pushed
    /// arguments, and return.
    pub(super) fn emit_epilogue(&mut self) {
        let Frame { local_bytes, arity } = self.frame.expect("epilogue outside a procedure");
        self.asm.emit_mem("lw", Register::Ra, 40, Register::Sp);
        self.asm.emit_mem("lw", Register::Fp, 36, Register::Sp);
        for (index, register) in SCRATCH.iter().enumerate() {
            self.asm.emit_mem("lw", *register, 32 - 4 * index as i32, Register::Sp);
        }
        let pop_bytes = 40 + local_bytes as i32 + 4 * arity as i32;
        self.asm.emit_rri("addi", Register::Sp, Register::Sp, pop_bytes);
        self.asm.emit_r("jr", Register::Ra);
    }
}
