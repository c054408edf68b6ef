pub mod error;
pub mod occurrences;
pub mod parser;
pub mod settings;
pub mod tree;
pub mod unit;

pub use error::{Error, Result};
pub use occurrences::{Occurrence, OccurrenceProvider, find_occurrences};
pub use parser::{ClangParser, UnitParser};
pub use settings::ParserSettings;
pub use tree::{NodeKind, SourceExtent, SyntaxNode};
pub use unit::{BufferSnapshot, ParsedUnit, SharedUnit, UnitCache, lock_unit};
