//! The parser seam.
//!
//! The analyzer treats the front end as a black box behind
//! [`UnitParser`]; the production implementation shells out to clang
//! for a JSON AST dump and lowers it into the crate's own tree.

mod clang;
mod clang_nodes;
mod lower;

pub use clang::ClangParser;

use crate::error::Result;
use crate::unit::{BufferSnapshot, ParsedUnit};

/// External parser front end.
pub trait UnitParser {
    /// Parse `identity` from its on-disk contents.
    fn parse(
        &self,
        identity: &str,
    ) -> Result<ParsedUnit>;

    /// Refresh an existing unit in place against new buffer contents.
    /// Cheaper than a fresh parse for front ends that cache state; for
    /// this crate's clang backend it is a re-dump of the snapshot text.
    fn reparse(
        &self,
        unit: &mut ParsedUnit,
        snapshot: &BufferSnapshot,
    ) -> Result<()>;
}
