use crate::asm::labels::{Label, LabelFactory};
use crate::asm::sink::AsmSink;
use crate::common::types::Type;
use std::collections::HashMap;

/// Interned string literals and global variable records, written into the
/// `.data` preamble after a successful compile. Identical literals share
/// one label.
#[derive(Default)]
pub struct GlobalTable {
    strings: HashMap<String, Label>,
    string_order: Vec<String>,
    variables: Vec<(Label, u32)>,
}
impl GlobalTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_string(&mut self, labels: &mut LabelFactory, text: &str) -> Label {
        if let Some(label) = self.strings.get(text) {
            return label.clone();
        }
        let label = labels.make("string");
        self.strings.insert(String::from(text), label.clone());
        self.string_order.push(String::from(text));
        label
    }

    pub fn enter_variable(&mut self, labels: &mut LabelFactory, typ: &Type) -> Label {
        let label = labels.make("variable");
        self.variables.push((label.clone(), typ.size()));
        label
    }

    /// Strings in first-interning order, then variables in declaration
    /// order.
    pub fn emit(&self, asm: &mut AsmSink) {
        for text in &self.string_order {
            let label = &self.strings[text];
            asm.emit_top(format!("{label}: .asciiz \"{text}\""));
        }
        for (label, size) in &self.variables {
            asm.emit_top(format!("{label}: .space {size}"));
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::types::{BasicType, Type, WORD_SIZE};

    #[test]
    fn identical_strings_intern_to_one_label() {
        let mut labels = LabelFactory::default();
        let mut table = GlobalTable::new();
        let a = table.enter_string(&mut labels, "hello");
        let b = table.enter_string(&mut labels, "hello");
        assert_eq!(a, b);
        let c = table.enter_string(&mut labels, "world");
        assert_ne!(a, c);

        let int_type = Type::Basic(BasicType::new("int", WORD_SIZE, None));
        table.enter_variable(&mut labels, &int_type);

        let mut sink = AsmSink::new();
        table.emit(&mut sink);
        assert_eq!(
            sink.top_lines(),
            vec![
                String::from("string0: .asciiz \"hello\""),
                String::from("string1: .asciiz \"world\""),
                String::from("variable2: .space 4"),
            ]
        );
    }
}
