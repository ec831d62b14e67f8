use crate::asm::labels::Label;
use crate::asm::registers::Register;
use crate::common::descriptor::Descriptor;
use crate::common::types::{ProcedureType, Type};
use crate::stage1_lex::tokens::Token;
use crate::stage2_compile::Compiler;
use anyhow::Result;
use std::rc::Rc;

fn is_comparison(token: Token) -> bool {
    matches!(
        token,
        Token::Less
            | Token::LessEqual
            | Token::LessGreater
            | Token::Greater
            | Token::GreaterEqual
            | Token::Equal
    )
}

fn comparison_op(token: Token) -> &'static str {
    match token {
        Token::Less => "slt",
        Token::LessEqual => "sle",
        Token::Greater => "sgt",
        Token::GreaterEqual => "sge",
        Token::LessGreater => "sne",
        Token::Equal => "seq",
        _ => panic!("not a comparison token"),
    }
}

impl Compiler {
    /// `<conjunction> (or <conjunction>)*`, short-circuit. The whole chain
    /// shares one join label and the left register carries the 0/1 result.
    pub(super) fn next_expression(&mut self) -> Result<Descriptor> {
        log::trace!("next_expression");
        let descriptor = self.next_conjunction()?;
        if self.scanner.token() != Token::Or {
            return Ok(descriptor);
        }
        let join = self.labels.make("join");
        let reg = descriptor.register();
        while self.scanner.token() == Token::Or {
            self.check(&descriptor, &self.int_type)?;
            self.asm.emit_rrr("sne", reg, reg, Register::Zero);
            self.asm.emit_rrl("bne", reg, Register::Zero, &join);
            self.scanner.next_token()?;
            let right = self.next_conjunction()?;
            self.check(&right, &self.int_type)?;
            self.asm.emit_rrr("sne", reg, right.register(), Register::Zero);
            self.registers.release(right.register());
        }
        self.asm.emit_label(&join);
        Ok(Descriptor::Register { typ: self.int_type.clone(), reg })
    }

    /// `<comparison> (and <comparison>)*`, short-circuiting on zero.
    fn next_conjunction(&mut self) -> Result<Descriptor> {
        let descriptor = self.next_comparison()?;
        if self.scanner.token() != Token::And {
            return Ok(descriptor);
        }
        let join = self.labels.make("join");
        let reg = descriptor.register();
        while self.scanner.token() == Token::And {
            self.check(&descriptor, &self.int_type)?;
            self.asm.emit_rrr("sne", reg, reg, Register::Zero);
            self.asm.emit_rrl("beq", reg, Register::Zero, &join);
            self.scanner.next_token()?;
            let right = self.next_comparison()?;
            self.check(&right, &self.int_type)?;
            self.asm.emit_rrr("sne", reg, right.register(), Register::Zero);
            self.registers.release(right.register());
        }
        self.asm.emit_label(&join);
        Ok(Descriptor::Register { typ: self.int_type.clone(), reg })
    }

    /// `<sum> [relop <sum>]`: at most one comparison, non-associative.
    fn next_comparison(&mut self) -> Result<Descriptor> {
        let descriptor = self.next_sum()?;
        if is_comparison(self.scanner.token()) == false {
            return Ok(descriptor);
        }
        self.check(&descriptor, &self.int_type)?;
        let op = comparison_op(self.scanner.token());
        self.scanner.next_token()?;
        let right = self.next_sum()?;
        self.check(&right, &self.int_type)?;
        let reg = descriptor.register();
        self.asm.emit_rrr(op, reg, reg, right.register());
        self.registers.release(right.register());
        Ok(Descriptor::Register { typ: self.int_type.clone(), reg })
    }

    /// `<product> ((+|-) <product>)*`, left associative.
    fn next_sum(&mut self) -> Result<Descriptor> {
        let mut descriptor = self.next_product()?;
        while matches!(self.scanner.token(), Token::Plus | Token::Dash) {
            self.check(&descriptor, &self.int_type)?;
            let op = match self.scanner.token() {
                Token::Plus => "add",
                _ => "sub",
            };
            self.scanner.next_token()?;
            let right = self.next_product()?;
            self.check(&right, &self.int_type)?;
            let reg = descriptor.register();
            self.asm.emit_rrr(op, reg, reg, right.register());
            self.registers.release(right.register());
            descriptor = Descriptor::Register { typ: self.int_type.clone(), reg };
        }
        Ok(descriptor)
    }

    /// `<term> ((*|/) <term>)*`, left associative.
    fn next_product(&mut self) -> Result<Descriptor> {
        let mut descriptor = self.next_term()?;
        while matches!(self.scanner.token(), Token::Star | Token::Slash) {
            self.check(&descriptor, &self.int_type)?;
            let op = match self.scanner.token() {
                Token::Star => "mul",
                _ => "div",
            };
            self.scanner.next_token()?;
            let right = self.next_term()?;
            self.check(&right, &self.int_type)?;
            let reg = descriptor.register();
            self.asm.emit_rrr(op, reg, reg, right.register());
            self.registers.release(right.register());
            descriptor = Descriptor::Register { typ: self.int_type.clone(), reg };
        }
        Ok(descriptor)
    }

    /// Prefix `-` and `not`, right associative.
    fn next_term(&mut self) -> Result<Descriptor> {
        match self.scanner.token() {
            Token::Dash => {
                self.scanner.next_token()?;
                let descriptor = self.next_term()?;
                self.check(&descriptor, &self.int_type)?;
                let reg = descriptor.register();
                self.asm.emit_rrr("sub", reg, Register::Zero, reg);
                Ok(descriptor)
            }
            Token::Not => {
                self.scanner.next_token()?;
                let descriptor = self.next_term()?;
                self.check(&descriptor, &self.int_type)?;
                let reg = descriptor.register();
                self.asm.emit_rrr("seq", reg, Register::Zero, reg);
                Ok(descriptor)
            }
            _ => self.next_unit(),
        }
    }

    fn next_unit(&mut self) -> Result<Descriptor> {
        match self.scanner.token() {
            Token::IntConstant => {
                let value = self.scanner.token_int();
                self.scanner.next_token()?;
                let reg = self.request()?;
                self.asm.emit_ri("li", reg, value);
                Ok(Descriptor::Register { typ: self.int_type.clone(), reg })
            }
            Token::StringConstant => {
                let label = self
                    .globals
                    .enter_string(&mut self.labels, self.scanner.token_string());
                self.scanner.next_token()?;
                let reg = self.request()?;
                self.asm.emit_rl("la", reg, &label);
                Ok(Descriptor::Register { typ: self.string_type.clone(), reg })
            }
            Token::OpenParen => {
                self.scanner.next_token()?;
                let descriptor = self.next_expression()?;
                self.next_expected(Token::CloseParen)?;
                Ok(descriptor)
            }
            Token::Name => {
                let name = String::from(self.scanner.token_string());
                self.scanner.next_token()?;
                match self.scanner.token() {
                    Token::OpenParen => {
                        let (procedure_type, label) = self.procedure_target(&name)?;
                        self.next_call(&procedure_type, &label)
                    }
                    Token::OpenBracket => self.next_subscript(&name),
                    _ => {
                        let descriptor = self.lookup(&name)?;
                        let typ = descriptor.typ().clone();
                        let reg = descriptor
                            .rvalue(&mut self.registers, &mut self.asm)
                            .map_err(|err| self.diagnose(err))?;
                        Ok(Descriptor::Register { typ, reg })
                    }
                }
            }
            _ => Err(self.scanner.error("Unit expected.")),
        }
    }

    /// `name[expr]`: base address plus scaled index, then load the element.
    fn next_subscript(&mut self, name: &str) -> Result<Descriptor> {
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
        self.asm.emit_mem("lw", base, 0, base);
        Ok(Descriptor::Register { typ: element_type, reg: base })
    }

    /// Resolve a name that is about to be called.
    pub(super) fn procedure_target(&self, name: &str) -> Result<(Rc<ProcedureType>, Label)> {
        match self.lookup(name)? {
            Descriptor::GlobalProcedure { typ: Type::Procedure(procedure_type), label } => {
                Ok((procedure_type, label))
            }
            _ => Err(self.scanner.error(format!("{name} is not a procedure."))),
        }
    }

    /// `f(e1, …, en)`: arguments pushed left to right, then `jal`; a fresh
    /// register receives `$v0`.
    pub(super) fn next_call(
        &mut self,
        procedure_type: &ProcedureType,
        label: &Label,
    ) -> Result<Descriptor> {
        log::trace!("next_call");
        self.scanner.next_token()?;
        let mut arity = 0;
        if self.scanner.token() != Token::CloseParen {
            loop {
                if arity >= procedure_type.arity() {
                    return Err(self.scanner.error("Invalid number of arguments."));
                }
                let argument = self.next_expression()?;
                self.check(&argument, procedure_type.parameter(arity))?;
                let reg = argument.register();
                self.asm.emit_mem("sw", reg, 0, Register::Sp);
                self.asm.emit_rri("addi", Register::Sp, Register::Sp, -4);
                self.registers.release(reg);
                arity += 1;
                if self.scanner.token() == Token::Comma {
                    self.scanner.next_token()?;
                } else {
                    break;
                }
            }
        }
        self.next_expected_msg(Token::CloseParen, ", or ) expected.")?;
        if arity != procedure_type.arity() {
            return Err(self.scanner.error("Invalid number of arguments."));
        }
        self.asm.emit_l("jal", label);
        let reg = self.request()?;
        self.asm.emit_rr("move", reg, Register::V0);
        Ok(Descriptor::Register { typ: procedure_type.value().clone(), reg })
    }
}
