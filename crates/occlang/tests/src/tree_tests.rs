use super::*;

fn node(name: &str) -> SyntaxNode {
    SyntaxNode::new(NodeKind::Other, name)
}

#[test]
fn preorder_visits_node_before_children_left_to_right() {
    let tree = node("root").with_children(vec![
        node("a").with_children(vec![node("a1"), node("a2")]),
        node("b"),
        node("c").with_children(vec![node("c1").with_children(vec![node("c1a")])]),
    ]);

    let names: Vec<&str> = tree.preorder().map(|n| n.display_name.as_str()).collect();
    assert_eq!(names, ["root", "a", "a1", "a2", "b", "c", "c1", "c1a"]);
}

#[test]
fn preorder_of_leaf_yields_only_the_leaf() {
    let leaf = node("leaf");
    let visited: Vec<&str> = leaf.preorder().map(|n| n.display_name.as_str()).collect();
    assert_eq!(visited, ["leaf"]);
}

#[test]
fn kind_names_use_clang_spelling() {
    assert_eq!(NodeKind::MemberExpr.name(), "MemberExpr");
    assert_eq!(NodeKind::CxxRecordDecl.name(), "CXXRecordDecl");
    assert_eq!(NodeKind::TranslationUnit.name(), "TranslationUnitDecl");
}

#[test]
fn synthesized_extent_has_no_file() {
    let extent = SourceExtent::synthesized(3, 1, 4);
    assert!(extent.file.is_none());

    let concrete = SourceExtent::new("/tmp/a.cpp", 3, 1, 4);
    assert_eq!(concrete.file.as_deref(), Some("/tmp/a.cpp"));
}
