use std::{io, io::Write, time::Instant};

use log::info;
use thiserror::Error;

pub mod ast;
mod cli;
pub mod parse;

use self::{
    ast::Ast,
    parse::{
        error::{LexError, ParseError},
        lexer::Lexer,
        parser::Parser,
        token::Token,
        Position, Spanned,
    },
};

pub use self::cli::*;

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// A parsed source file
pub struct Unit<'src> {
    pub source: &'src Source,
    pub ast: Ast,
}

impl<'src> Unit<'src> {
    pub fn new(source: &'src Source, ast: Ast) -> Self {
        Unit { source, ast }
    }
}

#[derive(Debug)]
pub struct Source {
    pub name: String,
    pub code: String,
}

impl Source {
    pub fn new(name: &str, code: &str) -> Self {
        Self {
            name: name.to_owned(),
            code: code.to_owned(),
        }
    }

    /// The text of a 1-based line without its line break
    pub fn line(&self, line: u64) -> Option<&str> {
        let idx = (line as usize).checked_sub(1)?;
        self.code.lines().nth(idx)
    }
}

#[derive(Debug, Error)]
pub enum CompilationError {
    #[error("aborting due to {0} previous error(s)")]
    ParseError(usize),
    #[error(transparent)]
    IO(#[from] io::Error),
}

/// What the driver writes to its output
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Emit {
    Tokens,
    Ast,
}

impl Emit {
    pub fn convert(name: &str) -> Option<Self> {
        match name {
            "tokens" => Some(Emit::Tokens),
            "ast" => Some(Emit::Ast),
            _ => None,
        }
    }
}

fn init_ansi() {
    #[cfg(windows)]
    {
        if let Err(code) = ansi_term::enable_ansi_support() {
            eprintln!(
                "Could not initialise windows ansi support. Error code: {}",
                code
            );
        }
    }
}

/// Splits a source into tokens, collecting every lexical error.
pub fn lex(source: &Source) -> Result<Vec<Token<'_>>, Vec<Spanned<LexError>>> {
    let (tokens, errors): (Vec<_>, Vec<_>) = Lexer::new(source).partition(Result::is_ok);

    if errors.is_empty() {
        Ok(tokens.into_iter().filter_map(Result::ok).collect())
    } else {
        Err(errors.into_iter().filter_map(Result::err).collect())
    }
}

pub fn parse(source: &Source) -> Result<Ast, Vec<Spanned<ParseError>>> {
    Parser::new(Lexer::new(source)).parse()
}

/// Parses every source and reports all syntax errors to `writer`.
pub fn compile<'src, W: Write>(
    sources: &'src [Source],
    writer: &mut W,
) -> Result<Vec<Unit<'src>>, CompilationError> {
    init_ansi();
    let mut units = vec![];
    let mut err_count = 0;

    for source in sources {
        let now = Instant::now();
        match parse(source) {
            Ok(ast) => {
                info!(
                    "parsed {} ({} nodes) in {} μs",
                    source.name,
                    ast.node_count(),
                    now.elapsed().as_micros()
                );
                units.push(Unit::new(source, ast));
            }
            Err(errors) => {
                report_errors(source, &errors, writer)?;
                err_count += errors.len();
            }
        }
    }

    if err_count != 0 {
        return Err(CompilationError::ParseError(err_count));
    }

    Ok(units)
}

/// Writes one `line:column text` line per token of `source` to `out`.
pub fn dump_tokens<W: Write, E: Write>(
    source: &Source,
    out: &mut W,
    err_writer: &mut E,
) -> Result<(), CompilationError> {
    init_ansi();
    match lex(source) {
        Ok(tokens) => {
            for token in tokens {
                writeln!(out, "{}\t{}", token.pos(), token.text())?;
            }
            Ok(())
        }
        Err(errors) => {
            report_errors(source, &errors, err_writer)?;
            Err(CompilationError::ParseError(errors.len()))
        }
    }
}
