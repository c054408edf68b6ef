//! Lowering from the deserialized clang dump into the owned
//! [`SyntaxNode`] tree.

use clang_ast::SourceLocation;

use crate::parser::clang_nodes::{Clang, ClangNode, DeclData, RefExprData, resolve_loc};
use crate::tree::{NodeKind, SourceExtent, SyntaxNode};

/// Lower a clang root node (the `TranslationUnitDecl`) into a tree.
pub(crate) fn lower(node: &ClangNode) -> SyntaxNode {
    let (kind, display_name, extent) = classify(node);
    SyntaxNode {
        kind,
        display_name,
        extent,
        children: node.inner.iter().map(lower).collect(),
    }
}

fn classify(node: &ClangNode) -> (NodeKind, String, Option<SourceExtent>) {
    match &node.kind {
        Clang::TranslationUnitDecl(d) => (NodeKind::TranslationUnit, decl_name(d), decl_extent(d)),
        Clang::FunctionDecl(d) => (NodeKind::FunctionDecl, decl_name(d), decl_extent(d)),
        Clang::CXXRecordDecl(d) => (NodeKind::CxxRecordDecl, decl_name(d), decl_extent(d)),
        Clang::CXXMethodDecl(d) => (NodeKind::CxxMethodDecl, decl_name(d), decl_extent(d)),
        Clang::VarDecl(d) => (NodeKind::VarDecl, decl_name(d), decl_extent(d)),
        Clang::FieldDecl(d) => (NodeKind::FieldDecl, decl_name(d), decl_extent(d)),
        Clang::ParmVarDecl(d) => (NodeKind::ParmVarDecl, decl_name(d), decl_extent(d)),
        Clang::TypedefDecl(d) => (NodeKind::TypedefDecl, decl_name(d), decl_extent(d)),
        Clang::TypeAliasDecl(d) => (NodeKind::TypeAliasDecl, decl_name(d), decl_extent(d)),
        Clang::EnumDecl(d) => (NodeKind::EnumDecl, decl_name(d), decl_extent(d)),
        Clang::EnumConstantDecl(d) => (NodeKind::EnumConstantDecl, decl_name(d), decl_extent(d)),
        Clang::NamespaceDecl(d) => (NodeKind::NamespaceDecl, decl_name(d), decl_extent(d)),

        Clang::DeclRefExpr(d) => (NodeKind::DeclRefExpr, ref_name(d), ref_extent(d)),
        Clang::MemberExpr(d) => (NodeKind::MemberExpr, ref_name(d), ref_extent(d)),

        Clang::Other {
            loc,
            range,
        } => {
            let (begin, end) = match range {
                Some(r) => (Some(&r.begin), Some(&r.end)),
                None => (loc.as_ref(), loc.as_ref()),
            };
            (NodeKind::Other, String::new(), extent_from(begin, end))
        },
    }
}

fn decl_name(data: &DeclData) -> String {
    data.name.clone().unwrap_or_default()
}

fn ref_name(data: &RefExprData) -> String {
    data.display_name().unwrap_or_default().to_owned()
}

fn decl_extent(data: &DeclData) -> Option<SourceExtent> {
    let (begin, end) = match &data.range {
        Some(r) => (Some(&r.begin), Some(&r.end)),
        None => (data.loc.as_ref(), data.loc.as_ref()),
    };
    extent_from(begin, end)
}

fn ref_extent(data: &RefExprData) -> Option<SourceExtent> {
    let (begin, end) = match &data.range {
        Some(r) => (Some(&r.begin), Some(&r.end)),
        None => (data.loc.as_ref(), data.loc.as_ref()),
    };
    extent_from(begin, end)
}

/// Build an extent from the begin/end locations of a clang range.
///
/// The span starts at the begin token's column and ends one past the
/// end token (`col + tok_len`), so the record brackets the token the
/// way libclang extents do. A begin location without a file (or with a
/// zero line) marks a synthesized node; the extent is kept so the node
/// still debug-prints usefully, but its `file` stays `None`.
fn extent_from(
    begin: Option<&SourceLocation>,
    end: Option<&SourceLocation>,
) -> Option<SourceExtent> {
    let b = begin.and_then(resolve_loc)?;
    let e = end.and_then(resolve_loc).unwrap_or(b);

    let file = (!b.file.is_empty() && b.line > 0).then(|| b.file.to_string());
    Some(SourceExtent {
        file,
        line: b.line as u32,
        start_col: b.col as u32,
        end_col: (e.col + e.tok_len) as u32,
    })
}

#[cfg(test)]
#[path = "../../tests/src/parser/lower_tests.rs"]
mod tests;
