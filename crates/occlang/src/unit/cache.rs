use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dashmap::DashMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::parser::UnitParser;
use crate::unit::{BufferSnapshot, ParsedUnit};

/// Shared handle to a cached unit.
///
/// The `Arc` is what "same unit object" means to callers: every
/// resolution of the same identity hands out a clone of one allocation.
/// The `Mutex` serializes reparses against traversals — a reparse
/// mutates the tree in place, so a concurrent walk of the same unit
/// would race.
pub type SharedUnit = Arc<Mutex<ParsedUnit>>;

/// Lock a shared unit, surviving poisoning from a panicked holder.
pub fn lock_unit(unit: &SharedUnit) -> MutexGuard<'_, ParsedUnit> {
    unit.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cache of parsed units keyed by file identity.
///
/// Owns every unit it holds. `DashMap` keeps insertion of concurrent
/// first-time resolutions mutually exclusive without a table-wide lock.
/// There is no eviction: an identity whose backing file disappears
/// keeps serving (and reparsing) its stale entry.
#[derive(Debug)]
pub struct UnitCache<P> {
    parser: P,
    units: DashMap<String, SharedUnit>,
}

impl<P: UnitParser> UnitCache<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            units: DashMap::new(),
        }
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Number of cached units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn contains(
        &self,
        identity: &str,
    ) -> bool {
        self.units.contains_key(identity)
    }

    /// Resolve the unit for `identity`, parsing or reparsing as needed.
    ///
    /// Cached identity: with `force_update` the unit is reparsed in
    /// place against `snapshot` first; without it the unit is returned
    /// as-is, deliberately ignoring any edits since its last reparse
    /// (the caller trades staleness for latency).
    ///
    /// Unseen identity: the file is parsed fresh from disk, inserted,
    /// then reparsed once against `snapshot` so unsaved edits are
    /// reflected even on a non-forced first resolution. A parse failure
    /// inserts nothing.
    pub fn resolve(
        &self,
        identity: &str,
        snapshot: &BufferSnapshot,
        force_update: bool,
    ) -> Result<SharedUnit> {
        if identity.is_empty() {
            return Err(Error::InvalidRequest("file identity must be non-empty".into()));
        }
        if snapshot.identity != identity {
            return Err(Error::InvalidRequest(format!(
                "snapshot for `{}` does not match requested identity `{identity}`",
                snapshot.identity,
            )));
        }

        if let Some(entry) = self.units.get(identity) {
            let unit = entry.value().clone();
            drop(entry);
            if force_update {
                debug!("[unit-cache] reparse {identity}");
                self.parser.reparse(&mut lock_unit(&unit), snapshot)?;
            } else {
                debug!("[unit-cache] hit {identity}");
            }
            return Ok(unit);
        }

        debug!("[unit-cache] miss {identity}, parsing from disk");
        let parsed = self.parser.parse(identity)?;

        // Two racing first-time resolutions both parse, but only the
        // entry winner's unit survives; the loser adopts it.
        let unit = self
            .units
            .entry(identity.to_owned())
            .or_insert_with(|| Arc::new(Mutex::new(parsed)))
            .value()
            .clone();

        // Bring the fresh unit in sync with unsaved buffer contents.
        self.parser.reparse(&mut lock_unit(&unit), snapshot)?;
        Ok(unit)
    }
}

#[cfg(test)]
#[path = "../../tests/src/unit/cache_tests.rs"]
mod tests;
