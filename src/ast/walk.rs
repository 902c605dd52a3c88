//! Pre-order traversal of a tree.
//!
//! Every `visit_*` method defaults to the matching `walk_*` function, which
//! visits the children of the node. Override a method to inspect a node and
//! call the `walk_*` function yourself to keep descending.

use super::*;

pub trait Visitor<'ast>: Sized {
    fn visit_item(&mut self, ast: &'ast Ast, id: ItemId) {
        walk_item(self, ast, id);
    }

    fn visit_fn(&mut self, ast: &'ast Ast, id: FnId) {
        walk_fn(self, ast, id);
    }

    fn visit_param(&mut self, ast: &'ast Ast, id: ParamId) {
        walk_param(self, ast, id);
    }

    fn visit_pattern(&mut self, ast: &'ast Ast, id: PatternId) {
        let name = ast[id].name();
        self.visit_ident(ast, name);
    }

    fn visit_type(&mut self, ast: &'ast Ast, id: TypeRefId) {
        let name = ast[id].name();
        self.visit_ident(ast, name);
    }

    fn visit_ident(&mut self, _ast: &'ast Ast, _id: IdentId) {}

    fn visit_block(&mut self, ast: &'ast Ast, id: BlockId) {
        walk_block(self, ast, id);
    }

    fn visit_stmt(&mut self, ast: &'ast Ast, id: StmtId) {
        walk_stmt(self, ast, id);
    }

    fn visit_expr(&mut self, ast: &'ast Ast, id: ExprId) {
        walk_expr(self, ast, id);
    }
}

pub fn walk_ast<'ast, V: Visitor<'ast>>(visitor: &mut V, ast: &'ast Ast) {
    for &item in ast.roots() {
        visitor.visit_item(ast, item);
    }
}

pub fn walk_item<'ast, V: Visitor<'ast>>(visitor: &mut V, ast: &'ast Ast, id: ItemId) {
    match *ast[id].item_kind() {
        ItemKind::Fn(func) => visitor.visit_fn(ast, func),
    }
}

pub fn walk_fn<'ast, V: Visitor<'ast>>(visitor: &mut V, ast: &'ast Ast, id: FnId) {
    let func = &ast[id];
    visitor.visit_ident(ast, func.name());
    for &param in func.params() {
        visitor.visit_param(ast, param);
    }
    visitor.visit_block(ast, func.code());
}

pub fn walk_param<'ast, V: Visitor<'ast>>(visitor: &mut V, ast: &'ast Ast, id: ParamId) {
    let param = &ast[id];
    visitor.visit_pattern(ast, param.pattern());
    visitor.visit_type(ast, param.ty());
}

pub fn walk_block<'ast, V: Visitor<'ast>>(visitor: &mut V, ast: &'ast Ast, id: BlockId) {
    let block = &ast[id];
    for &stmt in block.statements() {
        visitor.visit_stmt(ast, stmt);
    }
    if let Some(tail) = block.ret_val() {
        visitor.visit_expr(ast, tail);
    }
}

pub fn walk_stmt<'ast, V: Visitor<'ast>>(visitor: &mut V, ast: &'ast Ast, id: StmtId) {
    match *ast[id].stmt_kind() {
        StmtKind::Item(item) => visitor.visit_item(ast, item),
        StmtKind::Expr(expr) => visitor.visit_expr(ast, expr),
        StmtKind::Block(block) => visitor.visit_block(ast, block),
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast>>(visitor: &mut V, ast: &'ast Ast, id: ExprId) {
    match ast[id].expr_kind() {
        ExprKind::Int(_) | ExprKind::Str(_) | ExprKind::Bool(_) => {}
        ExprKind::Path(name) => visitor.visit_ident(ast, *name),
        ExprKind::Unary { operand, .. } => visitor.visit_expr(ast, *operand),
        ExprKind::Binary { lhs, rhs, .. } => {
            visitor.visit_expr(ast, *lhs);
            visitor.visit_expr(ast, *rhs);
        }
        ExprKind::Call { callee, args } => {
            visitor.visit_expr(ast, *callee);
            for &arg in args {
                visitor.visit_expr(ast, arg);
            }
        }
        ExprKind::Paren(inner) => visitor.visit_expr(ast, *inner),
    }
}
