use std::collections::{HashMap, HashSet};

use laserc::{
    ast::{walk::*, *},
    parse::{parser::Parser, token::Token, Position, TokenList},
    Source,
};

fn p(line: u64, column: u32) -> Position {
    Position::new(line, column)
}

fn only_fn(ast: &Ast) -> &FnItem {
    let mut functions = ast.functions();
    let func = functions.next().unwrap();
    assert!(functions.next().is_none());
    func
}

fn add_tokens() -> Vec<Token<'static>> {
    vec![
        Token::new(p(1, 1), "fn"),
        Token::new(p(1, 4), "add"),
        Token::new(p(1, 7), "("),
        Token::new(p(1, 8), "x"),
        Token::new(p(1, 9), ":"),
        Token::new(p(1, 11), "Int"),
        Token::new(p(1, 14), ","),
        Token::new(p(1, 16), "y"),
        Token::new(p(1, 17), ":"),
        Token::new(p(1, 19), "Int"),
        Token::new(p(1, 22), ")"),
        Token::new(p(1, 24), "{"),
        Token::new(p(1, 26), "}"),
    ]
}

fn parse_tokens(tokens: Vec<Token>, eof: Position) -> Ast {
    Parser::new(TokenList::new(tokens, eof)).parse().unwrap()
}

#[test]
fn test_fn_from_tokens_keeps_names_params_and_positions() {
    let ast = parse_tokens(add_tokens(), p(1, 27));

    assert_eq!(1, ast.roots().len());
    let item = &ast[ast.roots()[0]];
    let func = only_fn(&ast);
    assert_eq!(p(1, 1), item.pos());
    assert_eq!(p(1, 1), func.pos());

    assert_eq!("add", ast.text(func.name()));
    assert_eq!(p(1, 4), ast[func.name()].pos());

    let params: Vec<(&str, Position, &str, Position)> = func
        .params()
        .iter()
        .map(|&param| {
            let param = &ast[param];
            let pattern = &ast[param.pattern()];
            let ty = &ast[param.ty()];
            (
                ast.text(pattern.name()),
                pattern.pos(),
                ast.text(ty.name()),
                ty.pos(),
            )
        })
        .collect();
    assert_eq!(
        vec![("x", p(1, 8), "Int", p(1, 11)), ("y", p(1, 16), "Int", p(1, 19))],
        params
    );

    let code = &ast[func.code()];
    assert_eq!(p(1, 24), code.pos());
    assert!(code.statements().is_empty());
    assert_eq!(None, code.ret_val());
}

#[test]
fn test_tokens_and_source_build_equal_trees() {
    let source = Source::new("add", "fn add(x: Int, y: Int) { }");

    let from_tokens = parse_tokens(add_tokens(), p(1, 27));
    let from_source = laserc::parse(&source).unwrap();

    assert_eq!(from_tokens, from_source);
}

#[test]
fn test_zero_based_columns_from_foreign_tokens_are_kept() {
    let tokens = vec![
        Token::new(p(1, 0), "fn"),
        Token::new(p(1, 3), "f"),
        Token::new(p(1, 4), "("),
        Token::new(p(1, 5), ")"),
        Token::new(p(1, 7), "{"),
        Token::new(p(1, 9), "}"),
    ];
    let ast = parse_tokens(tokens, p(1, 10));

    let func = only_fn(&ast);
    assert_eq!(p(1, 0), func.pos());
    assert_eq!(p(1, 3), ast[func.name()].pos());
    assert_eq!(p(1, 7), ast[func.code()].pos());
}

#[test]
fn test_long_comment_block_before_fn() {
    let code = format!("{}fn after() {{ }}", "// c\n".repeat(5_000));
    let source = Source::new("comments", &code);
    let ast = laserc::parse(&source).unwrap();

    let func = only_fn(&ast);
    assert_eq!("after", ast.text(func.name()));
    assert_eq!(p(5_001, 1), func.pos());
}

#[test]
fn test_fn_without_params_or_statements() {
    let source = Source::new("zero", "fn zero() { }");
    let ast = laserc::parse(&source).unwrap();

    let func = only_fn(&ast);
    assert_eq!("zero", ast.text(func.name()));
    assert!(func.params().is_empty());

    let code = &ast[func.code()];
    assert_eq!(p(1, 11), code.pos());
    assert!(code.statements().is_empty());
    assert_eq!(None, code.ret_val());
}

#[test]
fn test_nested_block_is_a_statement_of_its_own() {
    let source = Source::new("nested", "fn f() { { } }");
    let ast = laserc::parse(&source).unwrap();

    let outer = &ast[only_fn(&ast).code()];
    assert_eq!(None, outer.ret_val());
    assert_eq!(1, outer.statements().len());

    let stmt = &ast[outer.statements()[0]];
    assert_eq!(p(1, 10), stmt.pos());
    assert_eq!(NodeKind::Statement, stmt.kind());
    match *stmt.stmt_kind() {
        StmtKind::Block(inner) => {
            let inner = &ast[inner];
            assert_eq!(p(1, 10), inner.pos());
            assert!(inner.statements().is_empty());
            assert_eq!(None, inner.ret_val());
        }
        ref other => panic!("expected block, got {:?}", other),
    }
}

#[test]
fn test_param_order_matches_source_order() {
    for count in 0..6 {
        let params: Vec<String> = (0..count).map(|i| format!("p{}: T{}", i, i)).collect();
        let code = format!("fn f({}) {{ }}", params.join(", "));
        let source = Source::new("params", &code);
        let ast = laserc::parse(&source).unwrap();

        let func = only_fn(&ast);
        assert_eq!(count, func.params().len(), "{}", code);
        for (i, &param) in func.params().iter().enumerate() {
            let param = &ast[param];
            assert_eq!(format!("p{}", i), ast.text(ast[param.pattern()].name()));
            assert_eq!(format!("T{}", i), ast.text(ast[param.ty()].name()));
        }
    }
}

#[test]
fn test_tail_presence_follows_semicolon() {
    let cases = [
        ("fn f() { 1 }", true),
        ("fn f() { 1; }", false),
        ("fn f() { g(); h() }", true),
        ("fn f() { { 1 } }", false),
        ("fn f() { }", false),
    ];

    for &(code, has_tail) in &cases {
        let source = Source::new("tail", code);
        let ast = laserc::parse(&source).unwrap();
        let block = &ast[only_fn(&ast).code()];

        assert_eq!(has_tail, block.ret_val().is_some(), "{}", code);
    }
}

#[test]
fn test_two_parses_are_equal_but_independent() {
    let source = Source::new("same", "fn same(a: A) { a }");

    let first = laserc::parse(&source).unwrap();
    let second = laserc::parse(&source).unwrap();

    assert_eq!(first, second);
    assert!(!std::ptr::eq(&first, &second));

    let name_a = ast_name_ptr(&first);
    let name_b = ast_name_ptr(&second);
    assert_ne!(name_a, name_b);
}

fn ast_name_ptr(ast: &Ast) -> *const u8 {
    ast.text(only_fn(ast).name()).as_ptr()
}

#[test]
fn test_tree_outlives_its_source_text() {
    let ast = {
        let source = Source::new("temp", "fn keep(v: V) { v }");
        laserc::parse(&source).unwrap()
    };

    let func = only_fn(&ast);
    assert_eq!("keep", ast.text(func.name()));
    assert_eq!(p(1, 1), func.pos());
}

/// Visits every node and remembers which ones it has already seen
#[derive(Default)]
struct Tracker {
    seen: HashSet<(&'static str, usize)>,
}

impl Tracker {
    fn see<T>(&mut self, arena: &'static str, id: Id<T>) {
        assert!(
            self.seen.insert((arena, id.index())),
            "{} {:?} reached twice",
            arena,
            id
        );
    }
}

impl<'ast> Visitor<'ast> for Tracker {
    fn visit_item(&mut self, ast: &'ast Ast, id: ItemId) {
        self.see("item", id);
        walk_item(self, ast, id);
    }

    fn visit_fn(&mut self, ast: &'ast Ast, id: FnId) {
        self.see("fn", id);
        walk_fn(self, ast, id);
    }

    fn visit_param(&mut self, ast: &'ast Ast, id: ParamId) {
        self.see("param", id);
        walk_param(self, ast, id);
    }

    fn visit_pattern(&mut self, ast: &'ast Ast, id: PatternId) {
        self.see("pattern", id);
        self.visit_ident(ast, ast[id].name());
    }

    fn visit_type(&mut self, ast: &'ast Ast, id: TypeRefId) {
        self.see("type", id);
        self.visit_ident(ast, ast[id].name());
    }

    fn visit_ident(&mut self, _ast: &'ast Ast, id: IdentId) {
        self.see("ident", id);
    }

    fn visit_block(&mut self, ast: &'ast Ast, id: BlockId) {
        self.see("block", id);
        walk_block(self, ast, id);
    }

    fn visit_stmt(&mut self, ast: &'ast Ast, id: StmtId) {
        self.see("stmt", id);
        walk_stmt(self, ast, id);
    }

    fn visit_expr(&mut self, ast: &'ast Ast, id: ExprId) {
        self.see("expr", id);
        walk_expr(self, ast, id);
    }
}

const PROGRAM: &str = r#"fn main() {
    let_it(1, "two", true);
    fn helper(a: Int, b: Str) {
        { -a * (b + 2); }
        helper(a, b) == !false
    }
    { }
    helper(3, "x")
}

fn other() { }"#;

#[test]
fn test_every_node_is_reached_exactly_once() {
    let source = Source::new("program", PROGRAM);
    let ast = laserc::parse(&source).unwrap();

    let mut tracker = Tracker::default();
    walk_ast(&mut tracker, &ast);

    assert_eq!(ast.node_count(), tracker.seen.len());
}

/// Checks every node against the token it was built from
struct PositionCheck<'src> {
    tokens: HashMap<Position, &'src str>,
    checked: usize,
}

impl<'src> PositionCheck<'src> {
    fn token_at(&mut self, node: &dyn AstNode) -> &'src str {
        self.checked += 1;
        match self.tokens.get(&node.pos()) {
            Some(text) => *text,
            None => panic!("{} at {} does not start at a token", node.kind(), node.pos()),
        }
    }
}

impl<'ast, 'src> Visitor<'ast> for PositionCheck<'src> {
    fn visit_item(&mut self, ast: &'ast Ast, id: ItemId) {
        assert_eq!("fn", self.token_at(&ast[id]));
        walk_item(self, ast, id);
    }

    fn visit_fn(&mut self, ast: &'ast Ast, id: FnId) {
        assert_eq!("fn", self.token_at(&ast[id]));
        walk_fn(self, ast, id);
    }

    fn visit_param(&mut self, ast: &'ast Ast, id: ParamId) {
        let name = ast[ast[id].pattern()].name();
        assert_eq!(ast.text(name), self.token_at(&ast[id]));
        walk_param(self, ast, id);
    }

    fn visit_ident(&mut self, ast: &'ast Ast, id: IdentId) {
        assert_eq!(ast.text(id), self.token_at(&ast[id]));
    }

    fn visit_block(&mut self, ast: &'ast Ast, id: BlockId) {
        assert_eq!("{", self.token_at(&ast[id]));
        walk_block(self, ast, id);
    }

    fn visit_stmt(&mut self, ast: &'ast Ast, id: StmtId) {
        self.token_at(&ast[id]);
        walk_stmt(self, ast, id);
    }

    fn visit_expr(&mut self, ast: &'ast Ast, id: ExprId) {
        let expr = &ast[id];
        let text = self.token_at(expr);
        match expr.expr_kind() {
            ExprKind::Int(lit) => assert_eq!(lit.value().to_string(), text),
            ExprKind::Bool(lit) => assert_eq!(lit.value().to_string(), text),
            ExprKind::Str(lit) => assert_eq!(format!("\"{}\"", lit.value()), text),
            ExprKind::Path(name) => assert_eq!(ast.text(*name), text),
            ExprKind::Unary { op, .. } => assert_eq!(op.to_string(), text),
            ExprKind::Paren(_) => assert_eq!("(", text),
            ExprKind::Binary { lhs, .. } | ExprKind::Call { callee: lhs, .. } => {
                assert_eq!(ast[*lhs].pos(), expr.pos())
            }
        }
        walk_expr(self, ast, id);
    }
}

#[test]
fn test_node_positions_point_at_their_first_token() {
    let source = Source::new("program", PROGRAM);
    let tokens = laserc::lex(&source).unwrap();
    let ast = laserc::parse(&source).unwrap();

    let mut check = PositionCheck {
        tokens: tokens.iter().map(|t| (t.pos(), t.text())).collect(),
        checked: 0,
    };
    walk_ast(&mut check, &ast);

    assert!(check.checked > 30, "only {} nodes checked", check.checked);
}

#[test]
fn test_positions_survive_multiline_input() {
    let source = Source::new("lines", "\n\nfn  late(\n  x: X\n)\n{\n}\n");
    let ast = laserc::parse(&source).unwrap();

    let func = only_fn(&ast);
    assert_eq!(p(3, 1), func.pos());
    assert_eq!(p(3, 5), ast[func.name()].pos());
    assert_eq!(p(4, 3), ast[func.params()[0]].pos());
    assert_eq!(p(4, 6), ast[ast[func.params()[0]].ty()].pos());
    assert_eq!(p(6, 1), ast[func.code()].pos());
}

#[test]
fn test_tree_can_be_read_from_many_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Ast>();

    let source = Source::new("program", PROGRAM);
    let ast = laserc::parse(&source).unwrap();
    let expected = ast.node_count();
    let ast = &ast;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(move |_| {
                scope.spawn(move || {
                    let mut tracker = Tracker::default();
                    walk_ast(&mut tracker, ast);
                    tracker.seen.len()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(expected, handle.join().unwrap());
        }
    });
}
