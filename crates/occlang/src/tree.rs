//! Owned syntax tree handed out by the parser seam.
//!
//! The tree deliberately keeps only what occurrence extraction needs:
//! a kind, a display name and a source extent per node. Everything else
//! from the clang dump is dropped during lowering.

use clap::ValueEnum;

/// Node categories recognized by the analyzer.
///
/// Mirrors the clang AST node kinds the lowering step types out;
/// everything unrecognized lands in [`NodeKind::Other`] and is still
/// traversed so matches below it are not lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum NodeKind {
    TranslationUnit,
    FunctionDecl,
    CxxRecordDecl,
    CxxMethodDecl,
    VarDecl,
    FieldDecl,
    ParmVarDecl,
    TypedefDecl,
    TypeAliasDecl,
    EnumDecl,
    EnumConstantDecl,
    NamespaceDecl,
    DeclRefExpr,
    MemberExpr,
    Other,
}

impl NodeKind {
    /// Clang's spelling for the kind, used in occurrence records.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::TranslationUnit => "TranslationUnitDecl",
            NodeKind::FunctionDecl => "FunctionDecl",
            NodeKind::CxxRecordDecl => "CXXRecordDecl",
            NodeKind::CxxMethodDecl => "CXXMethodDecl",
            NodeKind::VarDecl => "VarDecl",
            NodeKind::FieldDecl => "FieldDecl",
            NodeKind::ParmVarDecl => "ParmVarDecl",
            NodeKind::TypedefDecl => "TypedefDecl",
            NodeKind::TypeAliasDecl => "TypeAliasDecl",
            NodeKind::EnumDecl => "EnumDecl",
            NodeKind::EnumConstantDecl => "EnumConstantDecl",
            NodeKind::NamespaceDecl => "NamespaceDecl",
            NodeKind::DeclRefExpr => "DeclRefExpr",
            NodeKind::MemberExpr => "MemberExpr",
            NodeKind::Other => "Other",
        }
    }
}

/// Source span of one node.
///
/// `file` is `None` for nodes the parser synthesized rather than read
/// from source text (implicit declarations, built-ins); such nodes are
/// never reported as occurrences. `end_col` points one past the last
/// character of the final token, libclang extent style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceExtent {
    pub file: Option<String>,
    pub line: u32,
    pub start_col: u32,
    pub end_col: u32,
}

impl SourceExtent {
    pub fn new(
        file: impl Into<String>,
        line: u32,
        start_col: u32,
        end_col: u32,
    ) -> Self {
        Self {
            file: Some(file.into()),
            line,
            start_col,
            end_col,
        }
    }

    /// Extent of a synthesized node: positions without originating text.
    pub fn synthesized(
        line: u32,
        start_col: u32,
        end_col: u32,
    ) -> Self {
        Self {
            file: None,
            line,
            start_col,
            end_col,
        }
    }
}

/// One element of a parsed unit's tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub display_name: String,
    pub extent: Option<SourceExtent>,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(
        kind: NodeKind,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            display_name: display_name.into(),
            extent: None,
            children: Vec::new(),
        }
    }

    pub fn with_extent(
        mut self,
        extent: SourceExtent,
    ) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn with_children(
        mut self,
        children: Vec<SyntaxNode>,
    ) -> Self {
        self.children = children;
        self
    }

    /// Depth-first pre-order walk: a node before its children, children
    /// left-to-right in parser order. Never prunes a subtree.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            stack: vec![self],
        }
    }
}

/// Iterator over a subtree in pre-order.
pub struct Preorder<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so the leftmost child is popped first.
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
#[path = "../tests/src/tree_tests.rs"]
mod tests;
