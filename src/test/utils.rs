use crate::stage2_compile::Compiler;
use anyhow::Result;

macro_rules! fail {
    ( $($arg:tt),* ) => {
        panic!($($arg)*)
    };
}
pub(crate) use fail;

/// Compile source text and return the finalized assembly listing.
pub fn compile_to_asm(src: &str) -> Result<String> {
    let sink = Compiler::compile(src)?;
    let mut out = Vec::new();
    sink.finish(&mut out).expect("writing to a Vec cannot fail");
    Ok(String::from_utf8(out).expect("assembly output is ASCII"))
}

/// The rendered diagnostic of a compile that must fail.
pub fn compile_error(src: &str) -> String {
    match Compiler::compile(src) {
        Ok(_) => fail!("expected a compile error"),
        Err(err) => err.to_string(),
    }
}

/// Index of the first output line equal to `line`.
pub fn line_index(asm: &str, line: &str) -> usize {
    match asm.lines().position(|candidate| candidate == line) {
        Some(index) => index,
        None => fail!("line {line:?} not found in:\n{asm}"),
    }
}
