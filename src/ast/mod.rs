//! Syntax tree of a single compilation unit.
//!
//! All nodes of a unit live in one [`Ast`]. Parents refer to their children by
//! typed [`Id`]s and every node can be attached to at most one parent, so the
//! tree stays a tree. Nodes can only be added, never changed: a parent is built
//! from children that already exist, which also means that no node can ever be
//! reached from itself.

use std::ops::Index;

mod arena;
mod display;
mod node;
pub mod walk;

pub use self::{arena::*, node::*};
use crate::parse::Position;

pub type IdentId = Id<Identifier>;
pub type PatternId = Id<Pattern>;
pub type TypeRefId = Id<TypeRef>;
pub type ParamId = Id<Param>;
pub type FnId = Id<FnItem>;
pub type ItemId = Id<Item>;
pub type BlockId = Id<BlockExpr>;
pub type StmtId = Id<Stmt>;
pub type ExprId = Id<Expr>;

#[derive(Debug, Default, Eq, PartialEq)]
pub struct Ast {
    idents: Arena<Identifier>,
    patterns: Arena<Pattern>,
    types: Arena<TypeRef>,
    params: Arena<Param>,
    fns: Arena<FnItem>,
    items: Arena<Item>,
    blocks: Arena<BlockExpr>,
    stmts: Arena<Stmt>,
    exprs: Arena<Expr>,
    roots: Vec<ItemId>,
}

/// Node types that are stored in an [`Ast`].
pub trait Node: AstNode + Sized {
    fn arena(ast: &Ast) -> &Arena<Self>;
}

macro_rules! stored_in {
    ($($node:ty => $field:ident),* $(,)?) => {
        $(
            impl Node for $node {
                fn arena(ast: &Ast) -> &Arena<Self> {
                    &ast.$field
                }
            }
        )*
    };
}

stored_in! {
    Identifier => idents,
    Pattern => patterns,
    TypeRef => types,
    Param => params,
    FnItem => fns,
    Item => items,
    BlockExpr => blocks,
    Stmt => stmts,
    Expr => exprs,
}

impl<T: Node> Index<Id<T>> for Ast {
    type Output = T;

    fn index(&self, id: Id<T>) -> &T {
        &T::arena(self)[id]
    }
}

impl Ast {
    pub fn new() -> Self {
        Ast::default()
    }

    /// The top level items in source order
    pub fn roots(&self) -> &[ItemId] {
        &self.roots
    }

    pub fn arena<T: Node>(&self) -> &Arena<T> {
        T::arena(self)
    }

    pub fn get<T: Node>(&self, id: Id<T>) -> Option<&T> {
        T::arena(self).get(id)
    }

    /// Text of an identifier
    pub fn text(&self, id: IdentId) -> &str {
        self[id].value()
    }

    /// All top level functions in source order
    pub fn functions(&self) -> impl Iterator<Item = &FnItem> + '_ {
        self.roots.iter().map(move |&item| match self[item].kind {
            ItemKind::Fn(id) => &self[id],
        })
    }

    pub fn node_count(&self) -> usize {
        self.idents.len()
            + self.patterns.len()
            + self.types.len()
            + self.params.len()
            + self.fns.len()
            + self.items.len()
            + self.blocks.len()
            + self.stmts.len()
            + self.exprs.len()
    }
}

// Constructors. Children have to exist before their parent is created and are
// claimed by it, handing the same child to two parents is a bug in the caller.
impl Ast {
    pub fn identifier<S: Into<String>>(&mut self, pos: Position, value: S) -> IdentId {
        self.idents.alloc(Identifier::new(pos, value.into()))
    }

    pub fn pattern(&mut self, pos: Position, name: IdentId) -> PatternId {
        self.idents.claim(name, "identifier");
        self.patterns.alloc(Pattern { pos, name })
    }

    pub fn type_ref(&mut self, pos: Position, name: IdentId) -> TypeRefId {
        self.idents.claim(name, "identifier");
        self.types.alloc(TypeRef { pos, name })
    }

    pub fn param(&mut self, pos: Position, pattern: PatternId, ty: TypeRefId) -> ParamId {
        self.patterns.claim(pattern, "pattern");
        self.types.claim(ty, "type");
        self.params.alloc(Param { pos, pattern, ty })
    }

    pub fn fn_item(
        &mut self,
        pos: Position,
        name: IdentId,
        params: Vec<ParamId>,
        code: BlockId,
    ) -> FnId {
        self.idents.claim(name, "identifier");
        for &param in &params {
            self.params.claim(param, "parameter");
        }
        self.blocks.claim(code, "block");
        self.fns.alloc(FnItem {
            pos,
            name,
            params,
            code,
        })
    }

    /// Wraps an item, the position is taken from the wrapped node
    pub fn item(&mut self, kind: ItemKind) -> ItemId {
        let pos = match kind {
            ItemKind::Fn(id) => {
                self.fns.claim(id, "fn");
                self.fns[id].pos
            }
        };
        self.items.alloc(Item { pos, kind })
    }

    pub fn block(
        &mut self,
        pos: Position,
        statements: Vec<StmtId>,
        ret_val: Option<ExprId>,
    ) -> BlockId {
        for &stmt in &statements {
            self.stmts.claim(stmt, "statement");
        }
        if let Some(expr) = ret_val {
            self.exprs.claim(expr, "expression");
        }
        self.blocks.alloc(BlockExpr {
            pos,
            statements,
            ret_val,
        })
    }

    /// Wraps a statement, the position is taken from the wrapped node
    pub fn stmt(&mut self, kind: StmtKind) -> StmtId {
        let pos = match kind {
            StmtKind::Item(id) => {
                self.items.claim(id, "item");
                self.items[id].pos
            }
            StmtKind::Expr(id) => {
                self.exprs.claim(id, "expression");
                self.exprs[id].pos
            }
            StmtKind::Block(id) => {
                self.blocks.claim(id, "block");
                self.blocks[id].pos
            }
        };
        self.stmts.alloc(Stmt { pos, kind })
    }

    pub fn expr(&mut self, pos: Position, kind: ExprKind) -> ExprId {
        match &kind {
            ExprKind::Int(lit) => assert_literal_pos(pos, lit),
            ExprKind::Str(lit) => assert_literal_pos(pos, lit),
            ExprKind::Bool(lit) => assert_literal_pos(pos, lit),
            ExprKind::Path(name) => self.idents.claim(*name, "identifier"),
            ExprKind::Unary { operand, .. } => self.exprs.claim(*operand, "expression"),
            ExprKind::Binary { lhs, rhs, .. } => {
                self.exprs.claim(*lhs, "expression");
                self.exprs.claim(*rhs, "expression");
            }
            ExprKind::Call { callee, args } => {
                self.exprs.claim(*callee, "expression");
                for &arg in args {
                    self.exprs.claim(arg, "expression");
                }
            }
            ExprKind::Paren(inner) => self.exprs.claim(*inner, "expression"),
        }
        self.exprs.alloc(Expr { pos, kind })
    }

    /// Appends a top level item
    pub fn push_root(&mut self, item: ItemId) {
        self.items.claim(item, "item");
        self.roots.push(item);
    }
}

fn assert_literal_pos<T: LiteralValue>(pos: Position, lit: &Literal<T>) {
    assert_eq!(
        pos,
        lit.pos(),
        "{} must share the position of its expression",
        lit.kind()
    );
}
