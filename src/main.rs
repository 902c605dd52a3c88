use clap::{App, Arg, ArgMatches};
use log::debug;
use std::{
    fs,
    io::{self, Write},
};

use laserc::{
    compile, dump_tokens, CompilationError, Emit, Source, AUTHOR, DESCRIPTION, NAME, VERSION,
};

fn main() -> Result<(), CompilationError> {
    env_logger::init();
    let args = parse_args();

    let stderr = io::stderr();
    let mut err_writer = stderr.lock();

    let sources = args
        .values_of("source-file")
        .into_iter()
        .flatten()
        .map(|file_name| -> io::Result<Source> {
            debug!("reading {}", file_name);
            let code = fs::read_to_string(file_name)?;
            Ok(Source {
                name: get_file_name(file_name),
                code,
            })
        })
        .collect::<io::Result<Vec<Source>>>()?;

    let mut out: Box<dyn Write> = match args.value_of("output") {
        Some(path) => Box::new(fs::File::create(path.trim())?),
        None => Box::new(io::stdout()),
    };

    let emit = args
        .value_of("emit")
        .and_then(|ty| Emit::convert(ty.trim()))
        .unwrap_or(Emit::Ast);

    match emit {
        Emit::Tokens => {
            for source in &sources {
                dump_tokens(source, &mut out, &mut err_writer)?;
            }
        }
        Emit::Ast => {
            for unit in compile(&sources, &mut err_writer)? {
                writeln!(out, "// {}", unit.source.name)?;
                write!(out, "{}", unit.ast)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

/// removes the .lsr ending
fn get_file_name(name: &str) -> String {
    let len = name.len();

    if name.ends_with(".lsr") {
        return name.split_at(len - 4).0.to_owned();
    }

    name.to_owned()
}

pub fn parse_args<'a>() -> ArgMatches<'a> {
    App::new(NAME)
        .version(VERSION)
        .author(AUTHOR)
        .about(DESCRIPTION)
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("file")
                .help("the output file, stdout if omitted")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("emit")
                .short("e")
                .long("emit")
                .value_name("type")
                .possible_values(&["tokens", "ast"])
                .takes_value(true),
        )
        .arg(Arg::with_name("source-file").multiple(true).required(true))
        .get_matches()
}
