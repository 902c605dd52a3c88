use std::{fmt, vec};

pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

use self::{
    error::{LexError, ParseError},
    token::Token,
};

pub type Scanned<'src> = Result<Token<'src>, Spanned<LexError>>;

/// A location in the source code.
///
/// Lines are 1-based. Columns count chars and are left to whoever produces the
/// tokens: the [`Lexer`](lexer::Lexer) starts them at 1, but 0 is accepted for
/// token streams built elsewhere.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Position {
    line: u64,
    column: u32,
}

impl Position {
    pub fn new(line: u64, column: u32) -> Self {
        assert!(line >= 1, "line numbers start at 1");
        Position { line, column }
    }

    #[inline(always)]
    pub fn line(&self) -> u64 {
        self.line
    }

    #[inline(always)]
    pub fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Attaches the position and the length (in chars) of the offending lexeme to a value.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Spanned<T> {
    pub pos: Position,
    pub len: usize,
    pub node: T,
}

impl<T> Spanned<T> {
    pub fn new(pos: Position, len: usize, node: T) -> Self {
        Spanned { pos, len, node }
    }

    pub fn from_token(token: &Token, node: T) -> Self {
        Spanned {
            pos: token.pos(),
            len: token.len(),
            node,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Spanned<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.pos, self.node)
    }
}

impl From<Spanned<LexError>> for Spanned<ParseError> {
    fn from(err: Spanned<LexError>) -> Self {
        Spanned {
            pos: err.pos,
            len: err.len,
            node: ParseError::from(err.node),
        }
    }
}

/// A stream of tokens that knows where its input ends.
pub trait Scanner<'src>: Iterator<Item = Scanned<'src>> {
    /// The position right after the last character of the input.
    fn eof(&self) -> Position;
}

/// Replays tokens that have already been scanned.
pub struct TokenList<'src> {
    tokens: vec::IntoIter<Token<'src>>,
    eof: Position,
}

impl<'src> TokenList<'src> {
    pub fn new(tokens: Vec<Token<'src>>, eof: Position) -> Self {
        TokenList {
            tokens: tokens.into_iter(),
            eof,
        }
    }
}

impl<'src> Iterator for TokenList<'src> {
    type Item = Scanned<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.next().map(Ok)
    }
}

impl<'src> Scanner<'src> for TokenList<'src> {
    fn eof(&self) -> Position {
        self.eof
    }
}
