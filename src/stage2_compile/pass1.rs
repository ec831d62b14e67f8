use crate::common::descriptor::Descriptor;
use crate::common::types::{ProcedureType, Type};
use crate::stage1_lex::tokens::Token;
use crate::stage2_compile::{is_declaration, Compiler};
use anyhow::Result;
use std::rc::Rc;

impl Compiler {
    /// Scan the whole token stream, recording a global descriptor for every
    /// top-level `proc` so that later bodies may call forward. Procedure
    /// bodies are skipped token by token.
    pub(super) fn pass_one(&mut self) -> Result<()> {
        log::trace!("pass_one");
        while self.scanner.token() != Token::EndFile {
            if self.scanner.token() == Token::Proc {
                self.pass_one_procedure()?;
            } else {
                self.scanner.next_token()?;
            }
        }
        Ok(())
    }

    fn pass_one_procedure(&mut self) -> Result<()> {
        self.scanner.next_token()?;
        let name = String::from(self.scanner.token_string());
        self.next_expected(Token::Name)?;

        let mut procedure_type = ProcedureType::new();
        self.next_expected(Token::OpenParen)?;
        if is_declaration(self.scanner.token()) {
            self.pass_one_parameter(&mut procedure_type)?;
            while self.scanner.token() == Token::Comma {
                self.scanner.next_token()?;
                self.pass_one_parameter(&mut procedure_type)?;
            }
        }
        self.next_expected(Token::CloseParen)?;
        procedure_type.set_value(self.next_value_type()?);

        let label = self.labels.make(&name);
        let descriptor = Descriptor::GlobalProcedure {
            typ: Type::Procedure(Rc::new(procedure_type)),
            label,
        };
        self.define(&name, descriptor)
    }

    fn pass_one_parameter(&mut self, procedure_type: &mut ProcedureType) -> Result<()> {
        let (typ, _) = self.next_declared()?;
        procedure_type.add_parameter(typ);
        Ok(())
    }
}
