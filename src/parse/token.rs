use std::fmt;

use super::Position;

pub const KEYWORDS: [&str; 3] = ["fn", "true", "false"];

/// A lexeme together with the position of its first character.
///
/// Tokens do not know what kind of lexeme they hold, the parser decides that
/// from the text and the grammar context.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token<'src> {
    pos: Position,
    text: &'src str,
}

#[repr(u8)]
#[derive(Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Debug)]
pub enum Precedence {
    None = 0,
    Or = 1,
    And = 2,
    Equality = 3,
    Comparison = 4,
    Sum = 5,
    Product = 6,
    Unary = 7,
    Call = 8,
}

impl<'src> Token<'src> {
    pub fn new(pos: Position, text: &'src str) -> Self {
        Token { pos, text }
    }

    #[inline(always)]
    pub fn pos(&self) -> Position {
        self.pos
    }

    #[inline(always)]
    pub fn line(&self) -> u64 {
        self.pos.line()
    }

    #[inline(always)]
    pub fn column(&self) -> u32 {
        self.pos.column()
    }

    #[inline(always)]
    pub fn text(&self) -> &'src str {
        self.text
    }

    /// Length of the lexeme in chars
    pub(crate) fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_keyword(&self) -> bool {
        KEYWORDS.contains(&self.text)
    }

    pub fn is_ident(&self) -> bool {
        let mut chars = self.text.chars();
        let starts_like_ident = chars
            .next()
            .map_or(false, |c| c.is_alphabetic() || c == '_');

        starts_like_ident && chars.all(|c| c.is_alphanumeric() || c == '_') && !self.is_keyword()
    }

    pub fn is_int(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(|c| c.is_ascii_digit())
    }

    pub fn is_str(&self) -> bool {
        self.text.len() >= 2 && self.text.starts_with('"') && self.text.ends_with('"')
    }

    pub fn precedence(&self) -> Precedence {
        match self.text {
            "||" => Precedence::Or,
            "&&" => Precedence::And,
            "==" | "!=" => Precedence::Equality,
            "<" | "<=" | ">" | ">=" => Precedence::Comparison,
            "+" | "-" => Precedence::Sum,
            "*" | "/" => Precedence::Product,
            "(" => Precedence::Call,
            _ => Precedence::None,
        }
    }
}

impl<'src> fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
