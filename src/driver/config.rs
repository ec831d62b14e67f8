use clap::Parser as ClapParser;
use std::path::PathBuf;

#[derive(ClapParser, Debug)]
pub struct CliArgs {
    src_filepath: PathBuf,

    /// Stop after scanning and list the token stream.
    #[clap(long = "lex")]
    until_lexer: bool,

    #[clap(short = 'o', long = "out")]
    out_filepath: Option<PathBuf>,
}

pub struct Args {
    pub src_filepath: PathBuf,
    pub until_lexer: bool,
    pub out_filepath: PathBuf,
}
impl From<CliArgs> for Args {
    fn from(cli_args: CliArgs) -> Self {
        Self {
            src_filepath: cli_args.src_filepath,
            until_lexer: cli_args.until_lexer,
            out_filepath: cli_args
                .out_filepath
                .unwrap_or_else(|| PathBuf::from("out.asm")),
        }
    }
}
