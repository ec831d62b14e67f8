mod decl;
mod exp;
mod pass1;
mod stmt;

use crate::asm::globals::GlobalTable;
use crate::asm::labels::LabelFactory;
use crate::asm::registers::{Register, RegisterPool};
use crate::asm::sink::AsmSink;
use crate::common::descriptor::Descriptor;
use crate::common::symbol_table::SymbolTable;
use crate::common::types::{BasicType, Type, ADDRESS_SIZE, WORD_SIZE};
use crate::stage1_lex::lexer::Scanner;
use crate::stage1_lex::tokens::Token;
use anyhow::{Error, Result};

/// Frame accounting for the procedure being compiled: enough to emit its
/// epilogue from any `value` statement.
#[derive(Clone, Copy)]
struct Frame {
    local_bytes: u32,
    arity: usize,
}

/// A two-pass recursive-descent compiler. Pass 1 records every top-level
/// procedure signature; pass 2 re-reads the source and emits MIPS code as
/// it parses.
pub struct Compiler {
    scanner: Scanner,
    symbols: SymbolTable,
    registers: RegisterPool,
    labels: LabelFactory,
    globals: GlobalTable,
    asm: AsmSink,
    int_type: Type,
    string_type: Type,
    value_type: Option<Type>,
    frame: Option<Frame>,
}
impl Compiler {
    /// Compile a whole SNARL program into a finished assembler sink.
    pub fn compile(text: &str) -> Result<AsmSink> {
        let int_type = Type::Basic(BasicType::new("int", WORD_SIZE, None));
        let string_type = Type::Basic(BasicType::new("string", ADDRESS_SIZE, None));

        let mut compiler = Self {
            scanner: Scanner::new(text)?,
            symbols: SymbolTable::new(),
            registers: RegisterPool::new(),
            labels: LabelFactory::default(),
            globals: GlobalTable::new(),
            asm: AsmSink::new(),
            int_type,
            string_type,
            value_type: None,
            frame: None,
        };
        compiler.symbols.push();

        compiler.pass_one()?;

        // Pass 2 re-reads the source from the top. The global scope keeps
        // the pass-1 procedure descriptors, so forward and mutually
        // recursive calls resolve.
        compiler.scanner = Scanner::new(text)?;
        compiler.next_program()?;

        compiler.globals.emit(&mut compiler.asm);
        Ok(compiler.asm)
    }

    fn next_program(&mut self) -> Result<()> {
        log::trace!("next_program");
        self.next_program_part()?;
        while self.scanner.token() == Token::Semicolon {
            self.scanner.next_token()?;
            self.next_program_part()?;
        }
        if self.scanner.token() != Token::EndFile {
            return Err(self.scanner.error("End of program expected."));
        }
        Ok(())
    }

    fn next_program_part(&mut self) -> Result<()> {
        match self.scanner.token() {
            Token::Int | Token::String | Token::OpenBracket => self.next_global_declaration(),
            Token::Proc => self.next_procedure(),
            _ => Err(self.scanner.error("Declaration or procedure expected.")),
        }
    }

    /* Helpers shared by the parsing modules */

    /// Consume the expected token or fail with a generic message.
    fn next_expected(&mut self, token: Token) -> Result<()> {
        if self.scanner.token() == token {
            self.scanner.next_token()
        } else {
            Err(self.scanner.error(format!("{token} expected.")))
        }
    }

    fn next_expected_msg(&mut self, token: Token, message: &str) -> Result<()> {
        if self.scanner.token() == token {
            self.scanner.next_token()
        } else {
            Err(self.scanner.error(message))
        }
    }

    /// Assert that the descriptor's type is acceptable where `expected` is
    /// required.
    fn check(&self, descriptor: &Descriptor, expected: &Type) -> Result<()> {
        if descriptor.typ().is_subtype(expected) == false {
            return Err(self.scanner.error("Expression has unexpected type."));
        }
        Ok(())
    }

    /// Re-anchor a component error at the current source position.
    fn diagnose(&self, err: Error) -> Error {
        self.scanner.error(err.to_string())
    }

    fn request(&mut self) -> Result<Register> {
        let requested = self.registers.request();
        requested.map_err(|err| self.diagnose(err))
    }

    fn define(&mut self, name: &str, descriptor: Descriptor) -> Result<()> {
        let defined = self.symbols.define(name, descriptor);
        defined.map_err(|err| self.diagnose(err))
    }

    fn lookup(&self, name: &str) -> Result<Descriptor> {
        match self.symbols.lookup(name) {
            Ok(descriptor) => Ok(descriptor.clone()),
            Err(err) => Err(self.diagnose(err)),
        }
    }
}

fn is_declaration(token: Token) -> bool {
    matches!(token, Token::Int | Token::String | Token::OpenBracket)
}
