use clang_ast::{BareSourceLocation, SourceLocation};
use serde::Deserialize;

pub(crate) type ClangNode = clang_ast::Node<Clang>;

/// Typed representation of the clang AST node kinds the lowering step
/// distinguishes.
///
/// Each variant corresponds to a clang `"kind"` value. The `Other`
/// fallback efficiently skips all unrecognized node kinds.
#[derive(Deserialize)]
pub(crate) enum Clang {
    // --- Structure ---
    TranslationUnitDecl(DeclData),

    // --- Declarations ---
    FunctionDecl(DeclData),
    CXXRecordDecl(DeclData),
    CXXMethodDecl(DeclData),
    VarDecl(DeclData),
    FieldDecl(DeclData),
    ParmVarDecl(DeclData),
    TypedefDecl(DeclData),
    TypeAliasDecl(DeclData),
    EnumDecl(DeclData),
    EnumConstantDecl(DeclData),
    NamespaceDecl(DeclData),

    // --- References ---
    DeclRefExpr(RefExprData),
    MemberExpr(RefExprData),

    // --- Catch-all ---
    // The `loc` and `range` fields MUST be deserialized even for
    // unrecognized node kinds. The `clang-ast` crate tracks "current
    // file" state across the deserialization stream via
    // `SourceLocation`; if we skip locations for nodes that set the
    // file path, all subsequent nodes inherit an empty file.
    Other {
        #[serde(default)]
        loc: Option<SourceLocation>,
        #[serde(default)]
        range: Option<clang_ast::SourceRange>,
    },
}

/// Common data for declaration nodes.
#[derive(Deserialize, Debug)]
pub(crate) struct DeclData {
    pub name: Option<String>,
    pub loc: Option<SourceLocation>,
    pub range: Option<clang_ast::SourceRange>,
}

/// Reference expression data (DeclRefExpr, MemberExpr).
///
/// `MemberExpr` carries the member name directly; `DeclRefExpr` only
/// names the target inside `referencedDecl`.
#[derive(Deserialize, Debug)]
pub(crate) struct RefExprData {
    pub name: Option<String>,
    pub loc: Option<SourceLocation>,
    pub range: Option<clang_ast::SourceRange>,
    #[serde(rename = "referencedDecl")]
    pub referenced_decl: Option<ReferencedDecl>,
}

/// Inline summary of a referenced declaration.
#[derive(Deserialize, Debug)]
pub(crate) struct ReferencedDecl {
    pub name: Option<String>,
}

impl RefExprData {
    /// Name the editor should display for the reference.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or_else(|| self.referenced_decl.as_ref().and_then(|r| r.name.as_deref()))
    }
}

/// Extract the best concrete source location from a [`SourceLocation`].
///
/// Prefers the expansion location (where a macro was invoked — the
/// position the user sees in their source file) over the spelling
/// location (inside the macro definition).
pub(crate) fn resolve_loc(loc: &SourceLocation) -> Option<&BareSourceLocation> {
    loc.expansion_loc.as_ref().or(loc.spelling_loc.as_ref())
}
