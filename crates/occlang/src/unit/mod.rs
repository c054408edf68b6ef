//! Parsed units and the cache that owns them.

mod cache;
mod parsed_unit;
mod snapshot;

pub use cache::{SharedUnit, UnitCache, lock_unit};
pub use parsed_unit::ParsedUnit;
pub use snapshot::BufferSnapshot;
