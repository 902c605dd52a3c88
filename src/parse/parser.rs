use std::{iter::Peekable, marker::PhantomData};

use log::debug;

use super::{error::ParseError, token::*, *};
use crate::ast::*;

type NodeResult<T> = Result<T, Spanned<ParseError>>;

/// How many blocks and expressions may be nested inside each other
pub const MAX_NESTING: usize = 128;

pub struct Parser<'src, I>
where
    I: Scanner<'src>,
{
    scanner: Peekable<I>,
    eof: Position,
    ast: Ast,
    errors: Vec<Spanned<ParseError>>,
    /// Number of consumed `{` that have not been closed yet
    open_braces: usize,
    nesting: usize,
    _src: PhantomData<Token<'src>>,
}

impl<'src, I> Parser<'src, I>
where
    I: Scanner<'src>,
{
    pub fn new(scanner: I) -> Self {
        let eof = scanner.eof();

        Parser {
            scanner: scanner.peekable(),
            eof,
            ast: Ast::new(),
            errors: vec![],
            open_braces: 0,
            nesting: 0,
            _src: PhantomData,
        }
    }
}

impl<'src, I> Parser<'src, I>
where
    I: Scanner<'src>,
{
    /// Parses all items of the unit.
    ///
    /// After an error the parser skips ahead to the next `fn` outside of any
    /// block, so every broken item is reported once. No tree is returned if
    /// anything went wrong.
    pub fn parse(mut self) -> Result<Ast, Vec<Spanned<ParseError>>> {
        while self.scanner.peek().is_some() {
            match self.item() {
                Ok(item) => self.ast.push_root(item),
                Err(err) => {
                    self.errors.push(err);
                    self.synchronize();
                }
            }
        }

        if self.errors.is_empty() {
            Ok(self.ast)
        } else {
            Err(self.errors)
        }
    }

    fn synchronize(&mut self) {
        while !(self.open_braces == 0 && self.peek_eq("fn")) {
            match self.scanner.next() {
                Some(Ok(token)) => self.track_braces(&token),
                Some(Err(err)) => self.errors.push(err.into()),
                None => break,
            }
        }
    }

    fn track_braces(&mut self, token: &Token) {
        match token.text() {
            "{" => self.open_braces += 1,
            "}" => self.open_braces = self.open_braces.saturating_sub(1),
            _ => {}
        }
    }

    fn nested<T, F>(&mut self, pos: Position, f: F) -> NodeResult<T>
    where
        F: FnOnce(&mut Self) -> NodeResult<T>,
    {
        if self.nesting >= MAX_NESTING {
            return Err(Spanned::new(
                pos,
                1,
                ParseError::NestingTooDeep(MAX_NESTING),
            ));
        }

        self.nesting += 1;
        let result = f(self);
        self.nesting -= 1;
        result
    }

    fn item(&mut self) -> NodeResult<ItemId> {
        let func = self.fn_item()?;
        Ok(self.ast.item(ItemKind::Fn(func)))
    }

    fn fn_item(&mut self) -> NodeResult<FnId> {
        let keyword = self.consume("fn", "'fn'")?;
        let name = self.ident("function name")?;
        let params = self.param_list()?;
        let code = self.block()?;

        debug!(
            "parsed fn '{}' with {} parameter(s) at {}",
            self.ast.text(name),
            params.len(),
            keyword.pos()
        );
        Ok(self.ast.fn_item(keyword.pos(), name, params, code))
    }

    fn param_list(&mut self) -> NodeResult<Vec<ParamId>> {
        self.consume("(", "'('")?;
        let mut params = vec![];

        while !self.peek_eq(")") {
            params.push(self.param()?);
            if !self.peek_eq(")") {
                self.consume(",", "',' or ')'")?;
            }
        }
        self.consume(")", "')'")?;

        Ok(params)
    }

    fn param(&mut self) -> NodeResult<ParamId> {
        let name = self.ident("parameter name")?;
        let pos = self.ast[name].pos();
        let pattern = self.ast.pattern(pos, name);

        self.consume(":", "':'")?;

        let ty_name = self.ident("type name")?;
        let ty = self.ast.type_ref(self.ast[ty_name].pos(), ty_name);

        Ok(self.ast.param(pos, pattern, ty))
    }

    fn block(&mut self) -> NodeResult<BlockId> {
        let open = self.consume("{", "'{'")?;
        self.nested(open.pos(), |p| p.block_body(open))
    }

    fn block_body(&mut self, open: Token<'src>) -> NodeResult<BlockId> {
        let mut statements = vec![];
        let mut ret_val = None;

        while !self.peek_eq("}") {
            if self.peek_eq(";") {
                self.next_token("';'")?;
            } else if self.peek_eq("fn") {
                let item = self.item()?;
                statements.push(self.ast.stmt(StmtKind::Item(item)));
            } else if self.peek_eq("{") {
                let block = self.block()?;
                if self.peek_eq(";") {
                    self.next_token("';'")?;
                }
                statements.push(self.ast.stmt(StmtKind::Block(block)));
            } else {
                let expr = self.expression()?;
                if self.peek_eq("}") {
                    ret_val = Some(expr);
                    break;
                }
                self.consume(";", "';' or '}'")?;
                statements.push(self.ast.stmt(StmtKind::Expr(expr)));
            }
        }
        self.consume("}", "'}'")?;

        Ok(self.ast.block(open.pos(), statements, ret_val))
    }

    pub fn expression(&mut self) -> NodeResult<ExprId> {
        self.parse_expression(Precedence::None)
    }

    fn parse_expression(&mut self, precedence: Precedence) -> NodeResult<ExprId> {
        let token = self.next_token("expression")?;
        let mut left = self.nested(token.pos(), |p| p.prefix(token))?;

        while self.next_higher_precedence(precedence) {
            let token = self.next_token("operator")?;
            left = self.infix(token, left)?;
        }

        Ok(left)
    }

    fn prefix(&mut self, token: Token<'src>) -> NodeResult<ExprId> {
        let pos = token.pos();

        let kind = match token.text() {
            "true" => ExprKind::Bool(Literal::new(pos, true)),
            "false" => ExprKind::Bool(Literal::new(pos, false)),
            "(" => {
                let inner = self.expression()?;
                self.consume(")", "')'")?;
                ExprKind::Paren(inner)
            }
            text => {
                if let Some(op) = UnOp::from_lexeme(text) {
                    let operand = self.parse_expression(Precedence::Unary)?;
                    ExprKind::Unary { op, operand }
                } else if token.is_int() {
                    let value = text.parse::<i64>().map_err(|_| {
                        Spanned::from_token(&token, ParseError::InvalidIntLiteral(text.to_owned()))
                    })?;
                    ExprKind::Int(Literal::new(pos, value))
                } else if token.is_str() {
                    ExprKind::Str(Literal::new(pos, unescape(&token)?))
                } else if token.is_ident() {
                    ExprKind::Path(self.ast.identifier(pos, text))
                } else {
                    return Err(unexpected(&token, "expression"));
                }
            }
        };

        Ok(self.ast.expr(pos, kind))
    }

    fn infix(&mut self, token: Token<'src>, left: ExprId) -> NodeResult<ExprId> {
        let pos = self.ast[left].pos();

        let kind = if token.text() == "(" {
            let mut args = vec![];
            while !self.peek_eq(")") {
                args.push(self.expression()?);
                if !self.peek_eq(")") {
                    self.consume(",", "',' or ')'")?;
                }
            }
            self.consume(")", "')'")?;
            ExprKind::Call { callee: left, args }
        } else if let Some(op) = BinOp::from_lexeme(token.text()) {
            let rhs = self.parse_expression(token.precedence())?;
            ExprKind::Binary { lhs: left, op, rhs }
        } else {
            return Err(unexpected(&token, "operator"));
        };

        Ok(self.ast.expr(pos, kind))
    }

    fn next_token(&mut self, expected: &'static str) -> NodeResult<Token<'src>> {
        match self.scanner.next() {
            Some(Ok(token)) => {
                self.track_braces(&token);
                Ok(token)
            }
            Some(Err(err)) => Err(err.into()),
            None => Err(Spanned::new(
                self.eof,
                1,
                ParseError::UnexpectedEof { expected },
            )),
        }
    }

    fn peek_eq(&mut self, expected: &str) -> bool {
        self.scanner.peek().map_or(false, |peek| match peek {
            Ok(token) => token.text() == expected,
            _ => false,
        })
    }

    fn next_higher_precedence(&mut self, precedence: Precedence) -> bool {
        self.scanner.peek().map_or(false, |scanned| {
            if let Ok(token) = scanned {
                token.precedence() > precedence
            } else {
                false
            }
        })
    }

    fn consume(&mut self, text: &str, expected: &'static str) -> NodeResult<Token<'src>> {
        let next = self.next_token(expected)?;
        if next.text() == text {
            Ok(next)
        } else {
            Err(unexpected(&next, expected))
        }
    }

    fn ident(&mut self, expected: &'static str) -> NodeResult<IdentId> {
        let next = self.next_token(expected)?;
        if next.is_ident() {
            Ok(self.ast.identifier(next.pos(), next.text()))
        } else {
            Err(unexpected(&next, expected))
        }
    }
}

fn unexpected(actual: &Token, expected: &'static str) -> Spanned<ParseError> {
    Spanned::from_token(
        actual,
        ParseError::UnexpectedToken {
            expected,
            actual: actual.text().to_owned(),
        },
    )
}

/// Strips the quotes and resolves escape sequences
fn unescape(token: &Token) -> NodeResult<String> {
    let text = token.text();
    let inner = &text[1..text.len() - 1];
    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }

        let escaped = match chars.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('0') => '\0',
            Some('\\') => '\\',
            Some('"') => '"',
            Some(other) => {
                return Err(Spanned::from_token(token, ParseError::InvalidEscape(other)));
            }
            None => return Err(Spanned::from_token(token, ParseError::InvalidEscape(' '))),
        };
        value.push(escaped);
    }

    Ok(value)
}
