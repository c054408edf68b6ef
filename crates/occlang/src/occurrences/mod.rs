//! Kind-filtered occurrence extraction over a parsed unit.

mod provider;

pub use provider::OccurrenceProvider;

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::tree::NodeKind;
use crate::unit::ParsedUnit;

/// One matched node, flattened for the editor.
///
/// Owns all of its strings: a record stays valid after the unit that
/// produced it is reparsed or dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    pub name: String,
    pub kind: String,
    pub file: String,
    pub line: u32,
    #[serde(rename = "start")]
    pub start_col: u32,
    #[serde(rename = "end")]
    pub end_col: u32,
}

impl fmt::Display for Occurrence {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "name={} kind={} file={} line={} start={} end={}",
            self.name, self.kind, self.file, self.line, self.start_col, self.end_col,
        )
    }
}

/// Collect every node of `target` kind reachable from the unit's root,
/// in depth-first pre-order.
///
/// Matching nodes whose extent has no file (synthesized by the parser
/// rather than read from source) produce no record, but their children
/// are still visited — the target kind may recur at any depth, e.g.
/// nested member accesses. A unit without a parse tree is an
/// [`Error::InvalidUnit`], never an empty result, so callers can tell
/// "no matches" from broken input.
pub fn find_occurrences(
    unit: &ParsedUnit,
    target: NodeKind,
) -> Result<Vec<Occurrence>> {
    let root = unit.root().ok_or_else(|| Error::InvalidUnit {
        identity: unit.identity().to_owned(),
    })?;

    let mut records = Vec::new();
    for node in root.preorder() {
        if node.kind != target {
            continue;
        }
        let Some(extent) = &node.extent else {
            continue;
        };
        let Some(file) = &extent.file else {
            continue;
        };
        records.push(Occurrence {
            name: node.display_name.clone(),
            kind: node.kind.name().to_owned(),
            file: file.clone(),
            line: extent.line,
            start_col: extent.start_col,
            end_col: extent.end_col,
        });
    }

    debug!("[occurrences] {} {:?} node(s) in {}", records.len(), target, unit.identity());
    Ok(records)
}

#[cfg(test)]
#[path = "../../tests/src/occurrences/query_tests.rs"]
mod tests;
