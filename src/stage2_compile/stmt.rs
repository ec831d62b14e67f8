use crate::asm::registers::Register;
use crate::common::types::Type;
use crate::stage1_lex::tokens::Token;
use crate::stage2_compile::Compiler;
use anyhow::Result;

impl Compiler {
    pub(super) fn next_statement(&mut self) -> Result<()> {
        log::trace!("next_statement");
        match self.scanner.token() {
            Token::Name => {
                let name = String::from(self.scanner.token_string());
                self.scanner.next_token()?;
                match self.scanner.token() {
                    Token::OpenParen => {
                        let (procedure_type, label) = self.procedure_target(&name)?;
                        let result = self.next_call(&procedure_type, &label)?;
                        // The result is discarded in statement position.
                        self.registers.release(result.register());
                        Ok(())
                    }
                    Token::OpenBracket => self.next_element_assignment(&name),
                    _ => self.next_assignment(&name),
                }
            }
            Token::Begin => self.next_begin(),
            Token::Code => self.next_code(),
            Token::If => self.next_if(),
            Token::Value => self.next_value(),
            Token::While => self.next_while(),
            _ => Err(self.scanner.error("Statement expected.")),
        }
    }

    /// `name := expr` for int and string scalars.
    fn next_assignment(&mut self, name: &str) -> Result<()> {
        let descriptor = self.lookup(name)?;
        if descriptor.typ().is_subtype(&self.int_type) == false
            && descriptor.typ().is_subtype(&self.string_type) == false
        {
            return Err(self
                .scanner
                .error("Only variables of type int or string may be assigned to."));
        }
        self.next_expected(Token::ColonEqual)?;
        let value = self.next_expression()?;
        self.check(&value, descriptor.typ())?;
        let address = descriptor
            .lvalue(&mut self.registers, &mut self.asm)
            .map_err(|err| self.diagnose(err))?;
        self.asm.emit_mem("sw", value.register(), 0, address);
        self.registers.release(value.register());
        self.registers.release(address);
        Ok(())
    }

    /// `name[idx] := expr`.
    fn next_element_assignment(&mut self, name: &str) -> Result<()> {
        let descriptor = self.lookup(name)?;
        let element_type = match descriptor.typ() {
            Type::Array(array) => array.element().clone(),
            _ => return Err(self.scanner.error(format!("{name} is not an array."))),
        };
        let base = descriptor
            .rvalue(&mut self.registers, &mut self.asm)
            .map_err(|err| self.diagnose(err))?;
        self.scanner.next_token()?;
        let index = self.next_expression()?;
        self.check(&index, &self.int_type)?;
        self.next_expected(Token::CloseBracket)?;
        let index_reg = index.register();
        self.asm.emit_rri("sll", index_reg, index_reg, 2);
        self.asm.emit_rrr("add", base, base, index_reg);
        self.registers.release(index_reg);
        self.next_expected(Token::ColonEqual)?;
        let value = self.next_expression()?;
        self.check(&value, &element_type)?;
        self.asm.emit_mem("sw", value.register(), 0, base);
        self.registers.release(value.register());
        self.registers.release(base);
        Ok(())
    }

    /// `begin S1; …; Sn end`, possibly empty.
    pub(super) fn next_begin(&mut self) -> Result<()> {
        self.scanner.next_token()?;
        if self.scanner.token() != Token::End {
            self.next_statement()?;
            debug_assert_eq!(self.registers.busy_count(), 0);
            while self.scanner.token() == Token::Semicolon {
                self.scanner.next_token()?;
                self.next_statement()?;
                debug_assert_eq!(self.registers.busy_count(), 0);
            }
        }
        self.next_expected(Token::End)
    }

    /// `code "…"`: the literal goes into the text stream untouched.
    fn next_code(&mut self) -> Result<()> {
        self.scanner.next_token()?;
        if self.scanner.token() != Token::StringConstant {
            return Err(self.scanner.error("string constant expected."));
        }
        self.asm.emit_verbatim(self.scanner.token_string());
        self.scanner.next_token()
    }

    /// `if E then S (else if E then S)* (else S)?`. The whole chain shares
    /// one end label.
    fn next_if(&mut self) -> Result<()> {
        let end_label = self.labels.make("endif");
        loop {
            self.scanner.next_token()?;
            let condition = self.next_expression()?;
            self.check(&condition, &self.int_type)?;
            let next_label = self.labels.make("else");
            self.asm
                .emit_rrl("beq", condition.register(), Register::Zero, &next_label);
            self.registers.release(condition.register());
            self.next_expected(Token::Then)?;
            self.next_statement()?;
            self.asm.emit_l("j", &end_label);
            self.asm.emit_label(&next_label);
            if self.scanner.token() == Token::Else {
                self.scanner.next_token()?;
                if self.scanner.token() != Token::If {
                    self.next_statement()?;
                    break;
                }
            } else {
                break;
            }
        }
        self.asm.emit_label(&end_label);
        Ok(())
    }

    /// `while E do S`, pre-tested.
    fn next_while(&mut self) -> Result<()> {
        let top_label = self.labels.make("while");
        let end_label = self.labels.make("endwhile");
        self.scanner.next_token()?;
        self.asm.emit_label(&top_label);
        let condition = self.next_expression()?;
        self.check(&condition, &self.int_type)?;
        self.asm
            .emit_rrl("beq", condition.register(), Register::Zero, &end_label);
        self.registers.release(condition.register());
        self.next_expected(Token::Do)?;
        self.next_statement()?;
        self.asm.emit_l("j", &top_label);
        self.asm.emit_label(&end_label);
        Ok(())
    }

    /// `value E`: move the result into $v0 and return through the epilogue.
    fn next_value(&mut self) -> Result<()> {
        self.scanner.next_token()?;
        let descriptor = self.next_expression()?;
        let value_type = self
            .value_type
            .clone()
            .expect("value statement outside a procedure");
        self.check(&descriptor, &value_type)?;
        self.asm.emit_rr("move", Register::V0, descriptor.register());
        self.registers.release(descriptor.register());
        self.emit_epilogue();
        Ok(())
    }
}
