use std::fmt;

use super::{BlockId, ExprId, FnId, IdentId, ItemId, ParamId, PatternId, StmtId, TypeRefId};
use crate::parse::Position;

/// Discriminator of the concrete node types.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum NodeKind {
    Identifier,
    Pattern,
    Type,
    Parameter,
    Fn,
    Item,
    BlockExpression,
    Statement,
    IntLiteral,
    StrLiteral,
    BoolLiteral,
    Path,
    Unary,
    Binary,
    Call,
    Paren,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Identifier => "identifier",
            NodeKind::Pattern => "pattern",
            NodeKind::Type => "type",
            NodeKind::Parameter => "parameter",
            NodeKind::Fn => "fn",
            NodeKind::Item => "item",
            NodeKind::BlockExpression => "block_expression",
            NodeKind::Statement => "statement",
            NodeKind::IntLiteral => "int_literal",
            NodeKind::StrLiteral => "string_literal",
            NodeKind::BoolLiteral => "bool_literal",
            NodeKind::Path => "path",
            NodeKind::Unary => "unary",
            NodeKind::Binary => "binary",
            NodeKind::Call => "call",
            NodeKind::Paren => "paren",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Implemented by every node of the tree.
pub trait AstNode {
    /// Position of the first token of the node
    fn pos(&self) -> Position;
    fn kind(&self) -> NodeKind;
}

/// A leaf node that carries an immutable value.
pub trait ValueNode: AstNode {
    type Value;

    fn value(&self) -> &Self::Value;
}

macro_rules! ast_node {
    ($($node:ty => $kind:expr),* $(,)?) => {
        $(
            impl AstNode for $node {
                #[inline(always)]
                fn pos(&self) -> Position {
                    self.pos
                }

                #[inline(always)]
                fn kind(&self) -> NodeKind {
                    $kind
                }
            }
        )*
    };
}

ast_node! {
    Identifier => NodeKind::Identifier,
    Pattern => NodeKind::Pattern,
    TypeRef => NodeKind::Type,
    Param => NodeKind::Parameter,
    FnItem => NodeKind::Fn,
    Item => NodeKind::Item,
    BlockExpr => NodeKind::BlockExpression,
    Stmt => NodeKind::Statement,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Identifier {
    pos: Position,
    value: String,
}

impl Identifier {
    pub(super) fn new(pos: Position, value: String) -> Self {
        assert!(!value.is_empty(), "identifiers must not be empty");
        Identifier { pos, value }
    }
}

impl ValueNode for Identifier {
    type Value = String;

    fn value(&self) -> &String {
        &self.value
    }
}

/// A binding site, currently always a single name
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Pattern {
    pub(super) pos: Position,
    pub(super) name: IdentId,
}

impl Pattern {
    pub fn name(&self) -> IdentId {
        self.name
    }
}

/// A reference to a type, currently always a single name
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TypeRef {
    pub(super) pos: Position,
    pub(super) name: IdentId,
}

impl TypeRef {
    pub fn name(&self) -> IdentId {
        self.name
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Param {
    pub(super) pos: Position,
    pub(super) pattern: PatternId,
    pub(super) ty: TypeRefId,
}

impl Param {
    pub fn pattern(&self) -> PatternId {
        self.pattern
    }

    pub fn ty(&self) -> TypeRefId {
        self.ty
    }
}

/// `fn name(param: Type, ...) { ... }`
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct FnItem {
    pub(super) pos: Position,
    pub(super) name: IdentId,
    pub(super) params: Vec<ParamId>,
    pub(super) code: BlockId,
}

impl FnItem {
    pub fn name(&self) -> IdentId {
        self.name
    }

    /// The parameters in declaration order
    pub fn params(&self) -> &[ParamId] {
        &self.params
    }

    pub fn code(&self) -> BlockId {
        self.code
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Item {
    pub(super) pos: Position,
    pub(super) kind: ItemKind,
}

impl Item {
    pub fn item_kind(&self) -> &ItemKind {
        &self.kind
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ItemKind {
    Fn(FnId),
}

/// `{ stmt ... tail }`
///
/// The value of the block is the value of its tail expression, or unit if
/// there is none.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct BlockExpr {
    pub(super) pos: Position,
    pub(super) statements: Vec<StmtId>,
    pub(super) ret_val: Option<ExprId>,
}

impl BlockExpr {
    pub fn statements(&self) -> &[StmtId] {
        &self.statements
    }

    pub fn ret_val(&self) -> Option<ExprId> {
        self.ret_val
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub(super) pos: Position,
    pub(super) kind: StmtKind,
}

impl Stmt {
    pub fn stmt_kind(&self) -> &StmtKind {
        &self.kind
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StmtKind {
    Item(ItemId),
    /// An expression without block, terminated by `;`
    Expr(ExprId),
    /// A nested block
    Block(BlockId),
}

/// Marks the types a [`Literal`] may carry.
pub trait LiteralValue {
    const KIND: NodeKind;
}

impl LiteralValue for i64 {
    const KIND: NodeKind = NodeKind::IntLiteral;
}

impl LiteralValue for String {
    const KIND: NodeKind = NodeKind::StrLiteral;
}

impl LiteralValue for bool {
    const KIND: NodeKind = NodeKind::BoolLiteral;
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Literal<T> {
    pos: Position,
    value: T,
}

impl<T: LiteralValue> Literal<T> {
    pub fn new(pos: Position, value: T) -> Self {
        Literal { pos, value }
    }
}

impl<T: LiteralValue> AstNode for Literal<T> {
    fn pos(&self) -> Position {
        self.pos
    }

    fn kind(&self) -> NodeKind {
        T::KIND
    }
}

impl<T: LiteralValue> ValueNode for Literal<T> {
    type Value = T;

    fn value(&self) -> &T {
        &self.value
    }
}

/// An expression without block
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub(super) pos: Position,
    pub(super) kind: ExprKind,
}

impl Expr {
    pub fn expr_kind(&self) -> &ExprKind {
        &self.kind
    }
}

impl AstNode for Expr {
    fn pos(&self) -> Position {
        self.pos
    }

    fn kind(&self) -> NodeKind {
        match self.kind {
            ExprKind::Int(_) => NodeKind::IntLiteral,
            ExprKind::Str(_) => NodeKind::StrLiteral,
            ExprKind::Bool(_) => NodeKind::BoolLiteral,
            ExprKind::Path(_) => NodeKind::Path,
            ExprKind::Unary { .. } => NodeKind::Unary,
            ExprKind::Binary { .. } => NodeKind::Binary,
            ExprKind::Call { .. } => NodeKind::Call,
            ExprKind::Paren(_) => NodeKind::Paren,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ExprKind {
    Int(Literal<i64>),
    Str(Literal<String>),
    Bool(Literal<bool>),
    Path(IdentId),
    Unary {
        op: UnOp,
        operand: ExprId,
    },
    Binary {
        lhs: ExprId,
        op: BinOp,
        rhs: ExprId,
    },
    Call {
        callee: ExprId,
        args: Vec<ExprId>,
    },
    Paren(ExprId),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UnOp {
    Neg,
    Not,
}

impl UnOp {
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "-" => Some(UnOp::Neg),
            "!" => Some(UnOp::Not),
            _ => None,
        }
    }
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnOp::Neg => write!(f, "-"),
            UnOp::Not => write!(f, "!"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinOp {
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        let op = match lexeme {
            "+" => BinOp::Add,
            "-" => BinOp::Sub,
            "*" => BinOp::Mul,
            "/" => BinOp::Div,
            "==" => BinOp::Eq,
            "!=" => BinOp::Ne,
            "<" => BinOp::Lt,
            "<=" => BinOp::Le,
            ">" => BinOp::Gt,
            ">=" => BinOp::Ge,
            "&&" => BinOp::And,
            "||" => BinOp::Or,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        };
        write!(f, "{}", s)
    }
}
