use std::io::{self, Write};

use super::{parse::Spanned, Position, Source};

use ansi_term::Colour::Red;
use unicode_width::UnicodeWidthStr;

pub fn print_error<W: Write>(msg: &str, writer: &mut W) -> io::Result<()> {
    writer.write_all(msg.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn report_errors<W, E>(source: &Source, errors: &[Spanned<E>], writer: &mut W) -> io::Result<()>
where
    W: Write,
    E: ToString,
{
    for err in errors {
        let msg = err.node.to_string();
        print_error(&format_error(source, err.pos, err.len, &msg), writer)?;
    }

    Ok(())
}

/// Renders `msg` with the source line of `pos` and a marker under `len` chars.
pub fn format_error(source: &Source, pos: Position, len: usize, msg: &str) -> String {
    format!(
        "error: {}\n--> {}:{}:{}\n{}",
        msg,
        source.name,
        pos.line(),
        pos.column(),
        err_to_string(source, pos, len)
    )
}

fn err_to_string(source: &Source, pos: Position, len: usize) -> String {
    let line_nr = pos.line();
    let line = source.line(line_nr).unwrap_or("");

    // the number of digits in the number displayed as string
    let len_line_nr = line_nr.to_string().len();
    let filler = " ".repeat(len_line_nr + 1);

    // column 0 is treated like column 1
    let start = (pos.column() as usize).saturating_sub(1);
    let before: String = line.chars().take(start).collect();
    let marked: String = line
        .chars()
        .skip(start)
        .take(len)
        .collect();

    let dist = UnicodeWidthStr::width(before.as_str());
    let width = UnicodeWidthStr::width(marked.as_str()).max(1);

    let marker = format!("{}{}", " ".repeat(dist), "^".repeat(width));

    format!(
        "{}|\n{} |{}\n{}|{}",
        filler,
        line_nr,
        line,
        filler,
        Red.paint(marker)
    )
}
