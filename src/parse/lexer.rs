use std::{iter::Peekable, str::CharIndices};

use log::trace;

use super::{error::*, token::*, *};
use crate::Source;

type CharPos = usize;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct InputPos {
    pos: CharPos,
    value: char,
}

impl InputPos {
    fn new_opt(value: Option<(CharPos, char)>) -> Option<Self> {
        let (pos, value) = value?;

        Some(InputPos { pos, value })
    }
}

pub struct Lexer<'src> {
    src: &'src str,
    chars: Peekable<CharIndices<'src>>,
    current: Option<InputPos>,
    line: u64,
    column: u32,
    eof: Position,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src Source) -> Self {
        let src = source.code.as_str();
        let mut chars = src.char_indices().peekable();

        Lexer {
            src,
            current: InputPos::new_opt(chars.next()),
            chars,
            line: 1,
            column: 1,
            eof: end_of(src),
        }
    }
}

fn end_of(src: &str) -> Position {
    let line = src.matches('\n').count() as u64 + 1;
    let last_line = src.rsplit('\n').next().unwrap_or("");
    Position::new(line, last_line.chars().count() as u32 + 1)
}

impl<'src> Lexer<'src> {
    fn pos(&self) -> CharPos {
        if let Some(InputPos { pos, .. }) = self.current {
            return pos;
        }

        self.src.len()
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn slice(&self, start: CharPos, end: CharPos) -> &'src str {
        let end = if end > self.src.len() {
            self.src.len()
        } else {
            end
        };

        &self.src[start..end]
    }

    fn token(&self, start: CharPos, pos: Position) -> Token<'src> {
        Token::new(pos, self.slice(start, self.pos()))
    }
}

impl<'src> Scanner<'src> for Lexer<'src> {
    fn eof(&self) -> Position {
        self.eof
    }
}

macro_rules! consume_single {
    ($self:ident, $start:ident, $pos:ident) => {{
        $self.advance();
        Ok($self.token($start, $pos))
    }};
}

macro_rules! consume_double {
    ($self:ident, $start:ident, $pos:ident, $next_char:expr) => {{
        $self.advance();
        if let Some(InputPos { value: new, .. }) = $self.current {
            if new == $next_char {
                $self.advance();
            }
        }
        Ok($self.token($start, $pos))
    }};
}

impl<'src> Lexer<'src> {
    fn advance(&mut self) -> Option<InputPos> {
        let curr = self.current?;
        if curr.value == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.current = InputPos::new_opt(self.chars.next());
        Some(curr)
    }

    fn read_while<P>(&mut self, predicate: P) -> &'src str
    where
        P: Fn(char) -> bool,
    {
        let start = self.pos();

        while let Some(InputPos { value, .. }) = self.current {
            if predicate(value) {
                self.advance();
            } else {
                break;
            }
        }

        self.slice(start, self.pos())
    }

    /// Skips whitespace and `//` line comments
    fn skip_whitespace(&mut self) {
        loop {
            self.read_while(char::is_whitespace);

            let at_comment = matches!(self.current, Some(InputPos { value: '/', .. }))
                && matches!(self.chars.peek(), Some((_, '/')));
            if !at_comment {
                break;
            }
            self.read_while(|c| c != '\n');
        }
    }

    fn scan_ident(&mut self, start: CharPos, pos: Position) -> Scanned<'src> {
        self.read_while(|c| c.is_alphanumeric() || c == '_');
        Ok(self.token(start, pos))
    }

    fn scan_num(&mut self, start: CharPos, pos: Position) -> Scanned<'src> {
        self.read_while(|c| c.is_ascii_digit());
        Ok(self.token(start, pos))
    }

    fn scan_string(&mut self, start: CharPos, pos: Position) -> Scanned<'src> {
        // opening '"'
        self.advance();

        loop {
            match self.advance() {
                Some(InputPos { value: '"', .. }) => break,
                Some(InputPos { value: '\\', .. }) => {
                    // the escaped char is never a terminator
                    self.advance();
                }
                Some(_) => {}
                None => return Err(Spanned::new(pos, 1, LexError::UnterminatedString)),
            }
        }

        Ok(self.token(start, pos))
    }

    fn scan_token(&mut self) -> Option<Scanned<'src>> {
        self.skip_whitespace();
        let start = self.pos();
        let pos = self.current_position();

        let ch = self.current.map(|InputPos { value, .. }| value)?;

        let scanned: Scanned = match ch {
            '=' | '!' | '<' | '>' => consume_double!(self, start, pos, '='),
            '&' => consume_double!(self, start, pos, '&'),
            '|' => consume_double!(self, start, pos, '|'),
            '+' | '-' | '*' | '/' | ',' | ':' | ';' | '(' | ')' | '{' | '}' => {
                consume_single!(self, start, pos)
            }
            '"' => self.scan_string(start, pos),
            c if c.is_alphabetic() || c == '_' => self.scan_ident(start, pos),
            c if c.is_ascii_digit() => self.scan_num(start, pos),
            c => {
                self.advance();
                Err(Spanned::new(pos, 1, LexError::UnrecognizedChar(c)))
            }
        };

        if let Ok(token) = &scanned {
            trace!("scanned '{}' at {}", token.text(), token.pos());
        }

        Some(scanned)
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Scanned<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        self.scan_token()
    }
}
