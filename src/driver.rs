pub mod config;
pub mod files;

use crate::driver::config::{Args, CliArgs};
use crate::driver::files::{AsmFilepath, SrcFilepath};
use crate::stage1_lex::lexer::Scanner;
use crate::stage1_lex::tokens::Token;
use crate::stage2_compile::Compiler;
use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

pub fn driver_main() -> Result<()> {
    let cli_args = CliArgs::parse();
    let args = Args::from(cli_args);

    let src_filepath = SrcFilepath::try_from(args.src_filepath)?;
    let src_text = fs::read_to_string(&src_filepath as &PathBuf)
        .with_context(|| format!("Failed to read {src_filepath:?}"))?;
    log::debug!("Read {} bytes from {:?}", src_text.len(), &src_filepath as &PathBuf);

    if args.until_lexer {
        return print_tokens(&src_text);
    }

    let asm = Compiler::compile(&src_text)?;

    let asm_filepath = AsmFilepath::from(args.out_filepath);
    let out_file = File::create(&asm_filepath as &PathBuf)
        .with_context(|| format!("Failed to create {asm_filepath:?}"))?;
    asm.finish(BufWriter::new(out_file))
        .with_context(|| format!("Failed to write {asm_filepath:?}"))?;
    log::debug!("Compiler done -> {asm_filepath:?}");

    Ok(())
}

/// List the token stream, one token per line.
fn print_tokens(src_text: &str) -> Result<()> {
    let mut scanner = Scanner::new(src_text)?;
    while scanner.token() != Token::EndFile {
        match scanner.token() {
            Token::IntConstant => println!("{} {}", scanner.token(), scanner.token_int()),
            Token::Name | Token::StringConstant => {
                println!("{} \"{}\"", scanner.token(), scanner.token_string())
            }
            token => println!("{token}"),
        }
        scanner.next_token()?;
    }
    Ok(())
}
