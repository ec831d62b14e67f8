use crate::asm::labels::Label;
use crate::asm::registers::Register;
use std::io::{self, Write};

/// Buffered assembly output. Instructions and in-text labels append to the
/// text stream, `.data` entries to the top stream; nothing reaches the
/// output until `finish`.
#[derive(Default)]
pub struct AsmSink {
    top: Vec<String>,
    text: Vec<String>,
}
impl AsmSink {
    pub fn new() -> Self {
        Self::default()
    }

    /* Text stream */

    pub fn emit_label(&mut self, label: &Label) {
        self.text.push(format!("{label}:"));
    }

    /// Inline-assembly escape: the line goes in exactly as written.
    pub fn emit_verbatim(&mut self, line: &str) {
        self.text.push(String::from(line));
    }

    pub fn emit_r(&mut self, op: &str, rs: Register) {
        self.text.push(format!("{op} {rs}"));
    }
    pub fn emit_rr(&mut self, op: &str, rd: Register, rs: Register) {
        self.text.push(format!("{op} {rd}, {rs}"));
    }
    pub fn emit_rrr(&mut self, op: &str, rd: Register, rs: Register, rt: Register) {
        self.text.push(format!("{op} {rd}, {rs}, {rt}"));
    }
    pub fn emit_ri(&mut self, op: &str, rd: Register, immediate: i32) {
        self.text.push(format!("{op} {rd}, {immediate}"));
    }
    pub fn emit_rri(&mut self, op: &str, rd: Register, rs: Register, immediate: i32) {
        self.text.push(format!("{op} {rd}, {rs}, {immediate}"));
    }
    pub fn emit_rl(&mut self, op: &str, rd: Register, label: &Label) {
        self.text.push(format!("{op} {rd}, {label}"));
    }
    pub fn emit_rrl(&mut self, op: &str, rs: Register, rt: Register, label: &Label) {
        self.text.push(format!("{op} {rs}, {rt}, {label}"));
    }
    pub fn emit_l(&mut self, op: &str, label: &Label) {
        self.text.push(format!("{op} {label}"));
    }
    pub fn emit_mem(&mut self, op: &str, rd: Register, offset: i32, base: Register) {
        self.text.push(format!("{op} {rd}, {offset}({base})"));
    }

    /* Top stream */

    pub fn emit_top(&mut self, line: String) {
        self.top.push(line);
    }

    /// Write `.data`, the top stream, `.text`, then the text stream. The
    /// sink is consumed, so it closes exactly once.
    pub fn finish<W: Write>(self, mut w: W) -> io::Result<()> {
        writeln!(w, ".data")?;
        for line in &self.top {
            writeln!(w, "{line}")?;
        }
        writeln!(w, ".text")?;
        for line in &self.text {
            writeln!(w, "{line}")?;
        }
        w.flush()
    }

    pub fn top_lines(&self) -> &[String] {
        &self.top
    }
    pub fn text_lines(&self) -> &[String] {
        &self.text
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::asm::labels::LabelFactory;

    #[test]
    fn finish_writes_data_then_top_then_text() {
        let mut factory = LabelFactory::default();
        let variable = factory.make("variable");
        let entry = factory.make("f");

        let mut sink = AsmSink::new();
        sink.emit_top(format!("{variable}: .space 4"));
        sink.emit_label(&entry);
        sink.emit_ri("li", Register::V0, 10);
        sink.emit_mem("lw", Register::S0, -4, Register::Fp);
        assert_eq!(sink.top_lines(), vec![String::from("variable0: .space 4")]);
        assert_eq!(
            sink.text_lines(),
            vec![
                String::from("f1:"),
                String::from("li $v0, 10"),
                String::from("lw $s0, -4($fp)"),
            ]
        );

        let mut out = Vec::new();
        sink.finish(&mut out).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert_eq!(
            written,
            ".data\nvariable0: .space 4\n.text\nf1:\nli $v0, 10\nlw $s0, -4($fp)\n"
        );
    }
}
