use crate::error::Result;
use crate::occurrences::{Occurrence, find_occurrences};
use crate::parser::UnitParser;
use crate::tree::NodeKind;
use crate::unit::{BufferSnapshot, UnitCache, lock_unit};

/// Editor-facing driver: owns the unit cache and chains resolution and
/// query for one interaction.
///
/// One provider lives for the process; the cache it owns is the only
/// unit table, constructed here rather than hiding behind a global.
#[derive(Debug)]
pub struct OccurrenceProvider<P> {
    cache: UnitCache<P>,
}

impl<P: UnitParser> OccurrenceProvider<P> {
    pub fn new(parser: P) -> Self {
        Self {
            cache: UnitCache::new(parser),
        }
    }

    pub fn cache(&self) -> &UnitCache<P> {
        &self.cache
    }

    /// Resolve the snapshot's unit and collect occurrences of `kind`.
    ///
    /// `force_update` reparses a cached unit against the snapshot
    /// first; without it a cached unit is queried as-is, unsaved edits
    /// and all.
    pub fn occurrences_in(
        &self,
        snapshot: &BufferSnapshot,
        force_update: bool,
        kind: NodeKind,
    ) -> Result<Vec<Occurrence>> {
        let unit = self.cache.resolve(&snapshot.identity, snapshot, force_update)?;
        let guard = lock_unit(&unit);
        find_occurrences(&guard, kind)
    }

    /// The default editor flow: member references under the cursor's
    /// file.
    pub fn member_references(
        &self,
        snapshot: &BufferSnapshot,
        force_update: bool,
    ) -> Result<Vec<Occurrence>> {
        self.occurrences_in(snapshot, force_update, NodeKind::MemberExpr)
    }
}
