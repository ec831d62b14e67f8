use crate::common::descriptor::Descriptor;
use anyhow::{anyhow, Result};
use std::collections::HashMap;

/// A stack of lexical scopes mapping names to descriptors. The innermost
/// scope is the back of the stack; lookup walks inward-out.
#[derive(Default)]
pub struct SymbolTable {
    scopes: Vec<HashMap<String, Descriptor>>,
}
impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn pop(&mut self) {
        assert!(self.scopes.pop().is_some(), "pop called on an empty symbol table");
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.contains_key(name))
    }

    pub fn lookup(&self, name: &str) -> Result<&Descriptor> {
        assert!(self.scopes.is_empty() == false, "lookup on an empty symbol table");
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .ok_or_else(|| anyhow!("{name} is not declared."))
    }

    /// Insert into the innermost scope only.
    pub fn define(&mut self, name: &str, descriptor: Descriptor) -> Result<()> {
        let scope = self.scopes.last_mut().expect("define on an empty symbol table");
        if scope.contains_key(name) {
            return Err(anyhow!("{name} is already declared."));
        }
        scope.insert(String::from(name), descriptor);
        Ok(())
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}
