use crate::tree::SyntaxNode;

/// The parse tree of one source file, tagged with the file identity it
/// was created for.
///
/// A unit is created by an initial parse, refreshed in place by
/// reparses, and dropped only when its cache entry goes away. A unit
/// may carry no root when the parser produced nothing usable at the
/// top level; querying such a unit is an [`InvalidUnit`] error, never
/// an empty result.
///
/// [`InvalidUnit`]: crate::Error::InvalidUnit
#[derive(Debug)]
pub struct ParsedUnit {
    identity: String,
    root: Option<SyntaxNode>,
}

impl ParsedUnit {
    pub fn new(
        identity: impl Into<String>,
        root: SyntaxNode,
    ) -> Self {
        Self {
            identity: identity.into(),
            root: Some(root),
        }
    }

    /// A unit known to be broken (no usable parse tree).
    pub fn invalid(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            root: None,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn root(&self) -> Option<&SyntaxNode> {
        self.root.as_ref()
    }

    /// Swap in a freshly lowered tree. This is the in-place mutation a
    /// reparse performs; the identity never changes.
    pub fn replace_root(
        &mut self,
        root: SyntaxNode,
    ) {
        self.root = Some(root);
    }
}
