use std::fmt::{self, Write};

use super::{walk::*, *};

/// Renders one node per line, indented by depth.
struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn line(&mut self, node: &dyn AstNode, extra: fmt::Arguments) {
        let pos = node.pos();
        // writing to a String cannot fail
        let _ = writeln!(
            self.out,
            "{}{}@{}{}",
            "  ".repeat(self.depth),
            node.kind(),
            pos,
            extra
        );
    }

    fn nested<F: FnOnce(&mut Self)>(&mut self, f: F) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }
}

impl<'ast> Visitor<'ast> for Printer {
    // items and statements share the position of what they wrap and are not printed
    fn visit_fn(&mut self, ast: &'ast Ast, id: FnId) {
        self.line(&ast[id], format_args!(""));
        self.nested(|p| walk_fn(p, ast, id));
    }

    fn visit_param(&mut self, ast: &'ast Ast, id: ParamId) {
        self.line(&ast[id], format_args!(""));
        self.nested(|p| walk_param(p, ast, id));
    }

    fn visit_pattern(&mut self, ast: &'ast Ast, id: PatternId) {
        self.line(&ast[id], format_args!(""));
        self.nested(|p| p.visit_ident(ast, ast[id].name()));
    }

    fn visit_type(&mut self, ast: &'ast Ast, id: TypeRefId) {
        self.line(&ast[id], format_args!(""));
        self.nested(|p| p.visit_ident(ast, ast[id].name()));
    }

    fn visit_ident(&mut self, ast: &'ast Ast, id: IdentId) {
        self.line(&ast[id], format_args!(" {}", ast.text(id)));
    }

    fn visit_block(&mut self, ast: &'ast Ast, id: BlockId) {
        let block = &ast[id];
        self.line(block, format_args!(""));
        self.nested(|p| {
            for &stmt in block.statements() {
                p.visit_stmt(ast, stmt);
            }
            if let Some(tail) = block.ret_val() {
                let _ = writeln!(p.out, "{}ret_val", "  ".repeat(p.depth));
                p.nested(|p| p.visit_expr(ast, tail));
            }
        });
    }

    fn visit_expr(&mut self, ast: &'ast Ast, id: ExprId) {
        let expr = &ast[id];
        match expr.expr_kind() {
            ExprKind::Int(lit) => self.line(expr, format_args!(" {}", lit.value())),
            ExprKind::Str(lit) => self.line(expr, format_args!(" {:?}", lit.value())),
            ExprKind::Bool(lit) => self.line(expr, format_args!(" {}", lit.value())),
            ExprKind::Unary { op, .. } => self.line(expr, format_args!(" {}", op)),
            ExprKind::Binary { op, .. } => self.line(expr, format_args!(" {}", op)),
            ExprKind::Path(_) | ExprKind::Call { .. } | ExprKind::Paren(_) => {
                self.line(expr, format_args!(""))
            }
        }
        self.nested(|p| walk_expr(p, ast, id));
    }
}

impl Ast {
    /// Renders the tree as indented text, one node per line
    pub fn dump(&self) -> String {
        let mut printer = Printer {
            out: String::new(),
            depth: 0,
        };
        walk_ast(&mut printer, self);
        printer.out
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.dump())
    }
}
