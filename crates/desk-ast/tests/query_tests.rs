use std::sync::Arc;
use std::thread;

use desk_ast::{Ast, AstBuilder, BinaryOp, NodeId, NodeType, UnaryOp};

/// `@Serialize @Range(0, 10) foo bar` on a single declaration.
fn tagged_declaration() -> (Ast, NodeId) {
    let mut b = AstBuilder::new();
    let ty = b.named_type("int", 0, Vec::new());
    let decl = b.declaration("hp", ty, None);
    let serialize = b.tag("@Serialize", Vec::new());
    let lo = b.numeric("0");
    let hi = b.numeric("10");
    let range = b.tag("@Range", vec![lo, hi]);
    let spaced = b.tag("foo bar", Vec::new());
    b.attach_tags(decl, vec![serialize, range, spaced]);
    b.push_root(decl);
    (b.finish(), decl)
}

fn literal(b: &mut AstBuilder, value: i64) -> NodeId {
    let n = b.numeric(&value.unsigned_abs().to_string());
    if value < 0 {
        b.unary(UnaryOp::Negate, n)
    } else {
        n
    }
}

#[test]
fn test_find_tag_returns_first_word_match() {
    let (ast, decl) = tagged_declaration();
    let found = ast.find_tag(decl, "Range").expect("tag should be found");
    assert_eq!(ast.node(found).text(), Some("@Range"));
    assert!(ast.has_tag(decl, "Serialize"));
    assert!(ast.has_tag(decl, "foo"));
    assert!(ast.has_tag(decl, "bar"));
}

#[test]
fn test_find_tag_rejects_partial_words() {
    let (ast, decl) = tagged_declaration();
    assert!(!ast.has_tag(decl, "Serial"));
    assert!(!ast.has_tag(decl, "Ran"));
    assert!(!ast.has_tag(decl, "fo"));
    assert!(!ast.has_tag(decl, "SerializeAll"));
}

#[test]
fn test_untagged_node_has_no_tags() {
    let mut b = AstBuilder::new();
    let n = b.identifier("plain");
    let ast = b.finish();
    assert_eq!(ast.find_tag(n, "anything"), None);
}

#[test]
fn test_tag_parameters_by_index() {
    let (ast, decl) = tagged_declaration();
    let range = ast.find_tag(decl, "Range").unwrap();
    let lo = ast.tag_parameter(range, 0).unwrap();
    let hi = ast.tag_parameter(range, 1).unwrap();
    assert_eq!(ast.evaluate(lo), 0);
    assert_eq!(ast.evaluate(hi), 10);
    assert_eq!(ast.tag_parameter(range, 2), None);
    assert_eq!(ast.tag_parameters(range).len(), 2);

    let serialize = ast.find_tag(decl, "Serialize").unwrap();
    assert_eq!(ast.tag_parameter(serialize, 0), None);
    // Not a tag at all.
    assert_eq!(ast.tag_parameter(decl, 0), None);
}

#[test]
fn test_evaluate_nested_arithmetic() {
    // (1 << 4) | (7 % 4) - -2
    let mut b = AstBuilder::new();
    let one = literal(&mut b, 1);
    let four = literal(&mut b, 4);
    let shl = b.binary(BinaryOp::Shl, one, four);
    let seven = literal(&mut b, 7);
    let four_again = literal(&mut b, 4);
    let rem = b.binary(BinaryOp::Mod, seven, four_again);
    let minus_two = literal(&mut b, -2);
    let sub = b.binary(BinaryOp::Sub, rem, minus_two);
    let or = b.binary(BinaryOp::BitOr, shl, sub);
    let ast = b.finish();

    assert_eq!(ast.evaluate(shl), 16);
    assert_eq!(ast.evaluate(sub), 5);
    assert_eq!(ast.evaluate(or), 21);
}

#[test]
fn test_evaluate_addition_is_additive() {
    for (x, y) in [(0, 0), (3, 4), (-8, 5), (1000, -1)] {
        let mut b = AstBuilder::new();
        let a = literal(&mut b, x);
        let c = literal(&mut b, y);
        let sum = b.binary(BinaryOp::Add, a, c);
        let ast = b.finish();
        assert_eq!(ast.evaluate(sum), ast.evaluate(a) + ast.evaluate(c));
    }
}

#[test]
fn test_evaluate_division_by_zero_subtree() {
    let mut b = AstBuilder::new();
    let ten = literal(&mut b, 10);
    let three = literal(&mut b, 3);
    let three_again = literal(&mut b, 3);
    let zero = b.binary(BinaryOp::Sub, three, three_again);
    let div = b.binary(BinaryOp::Div, ten, zero);
    let ten_again = literal(&mut b, 10);
    let rem = b.binary(BinaryOp::Mod, ten_again, zero);
    let ast = b.finish();

    assert_eq!(ast.evaluate(div), 0);
    assert_eq!(ast.evaluate(rem), 0);
}

#[test]
fn test_evaluate_non_arithmetic_is_zero() {
    let mut b = AstBuilder::new();
    let ident = b.identifier("SIZE");
    let text = b.string_literal("\"42\"");
    let ty = b.named_type("int", 0, Vec::new());
    let decl = b.declaration("x", ty, None);
    let ast = b.finish();

    assert_eq!(ast.evaluate(ident), 0);
    assert_eq!(ast.evaluate(text), 0);
    assert_eq!(ast.evaluate(decl), 0);
}

#[test]
fn test_evaluate_is_deterministic() {
    let mut b = AstBuilder::new();
    let x = literal(&mut b, 6);
    let y = literal(&mut b, 7);
    let mul = b.binary(BinaryOp::Mul, x, y);
    let not = b.unary(UnaryOp::BitNot, mul);
    let ast = b.finish();
    assert_eq!(ast.evaluate(not), ast.evaluate(not));
    assert_eq!(ast.evaluate(not), !42);
}

#[test]
fn test_declaration_is_type_matches_pointer_depth_and_name() {
    let mut b = AstBuilder::new();
    let ty = b.named_type("Widget", 2, Vec::new());
    let decl = b.declaration("widgets", ty, None);
    let ast = b.finish();

    assert!(ast.declaration_is_type(decl, "**Widget"));
    assert!(!ast.declaration_is_type(decl, "*Widget"));
    assert!(!ast.declaration_is_type(decl, "***Widget"));
    assert!(!ast.declaration_is_type(decl, "**Wid"));
    assert!(!ast.declaration_is_type(decl, "**WidgetBox"));
    assert!(ast.struct_member_is_type(decl, "**Widget"));
}

#[test]
fn test_declaration_is_type_rejects_other_kinds() {
    let mut b = AstBuilder::new();
    let ty = b.named_type("Widget", 0, Vec::new());
    let ident = b.identifier("Widget");
    let ast = b.finish();

    assert!(!ast.declaration_is_type(ty, "Widget"));
    assert!(!ast.declaration_is_type(ident, "Widget"));
}

#[test]
fn test_declaration_of_inline_aggregate_never_matches() {
    let mut b = AstBuilder::new();
    let int = b.named_type("int", 0, Vec::new());
    let field = b.declaration("a", int, None);
    let inner = b.struct_decl(None, vec![field]);
    let ty = b.inline_type(inner, 0, Vec::new());
    let decl = b.declaration("nested", ty, None);
    let ast = b.finish();

    assert!(!ast.declaration_is_type(decl, ""));
    assert!(!ast.declaration_is_type(decl, "int"));
}

#[test]
#[should_panic(expected = "type slot")]
fn test_inconsistent_declaration_panics() {
    let mut b = AstBuilder::new();
    let not_a_type = b.numeric("1");
    let decl = b.declaration("broken", not_a_type, None);
    let ast = b.finish();
    ast.declaration_is_type(decl, "int");
}

#[test]
fn test_children_skip_back_references() {
    let mut b = AstBuilder::new();
    let int = b.named_type("int", 0, Vec::new());
    let decl = b.declaration("count", int, None);
    let use_site = b.identifier("count");
    b.bind_identifier(use_site, decl);
    let tag = b.tag("@note", Vec::new());
    b.attach_tags(use_site, vec![tag]);
    let ast = b.finish();

    assert!(ast.children(use_site).is_empty());
    assert_eq!(ast.children(decl), [int]);
    assert_eq!(ast.node(decl).node_type(), NodeType::Declaration);
}

#[test]
fn test_concurrent_readers_share_one_tree() {
    let (ast, decl) = tagged_declaration();
    let ast = Arc::new(ast);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let ast = Arc::clone(&ast);
            thread::spawn(move || {
                let range = ast.find_tag(decl, "Range").unwrap();
                let hi = ast.tag_parameter(range, 1).unwrap();
                (ast.evaluate(hi), ast.declaration_is_type(decl, "int"))
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), (10, true));
    }
}

#[test]
fn test_operator_spellings_are_total() {
    assert_eq!(UnaryOp::Invalid.as_str(), "(invalid)");
    assert_eq!(UnaryOp::BitNot.as_str(), "~");
    assert_eq!(BinaryOp::Invalid.as_str(), "(invalid)");
    assert_eq!(BinaryOp::Shr.as_str(), ">>");
    assert_eq!(BinaryOp::Or.as_str(), "||");
}
