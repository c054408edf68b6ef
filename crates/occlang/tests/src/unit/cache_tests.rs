use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::tree::{NodeKind, SyntaxNode};

/// Parser stand-in: a unit's root name carries the text it was last
/// parsed or reparsed from, so tests can observe which contents a unit
/// reflects.
struct FakeParser {
    disk: HashMap<String, String>,
    parses: AtomicUsize,
    reparses: AtomicUsize,
}

impl FakeParser {
    fn with_disk(files: &[(&str, &str)]) -> Self {
        Self {
            disk: files.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            parses: AtomicUsize::new(0),
            reparses: AtomicUsize::new(0),
        }
    }

    fn parses(&self) -> usize {
        self.parses.load(Ordering::SeqCst)
    }

    fn reparses(&self) -> usize {
        self.reparses.load(Ordering::SeqCst)
    }
}

impl UnitParser for FakeParser {
    fn parse(
        &self,
        identity: &str,
    ) -> crate::error::Result<ParsedUnit> {
        self.parses.fetch_add(1, Ordering::SeqCst);
        let text = self
            .disk
            .get(identity)
            .ok_or_else(|| Error::parse_failure(identity, "no such file"))?;
        Ok(ParsedUnit::new(identity, SyntaxNode::new(NodeKind::TranslationUnit, text.clone())))
    }

    fn reparse(
        &self,
        unit: &mut ParsedUnit,
        snapshot: &BufferSnapshot,
    ) -> crate::error::Result<()> {
        self.reparses.fetch_add(1, Ordering::SeqCst);
        unit.replace_root(SyntaxNode::new(NodeKind::TranslationUnit, snapshot.text.clone()));
        Ok(())
    }
}

fn unit_text(unit: &SharedUnit) -> String {
    lock_unit(unit).root().map(|r| r.display_name.clone()).unwrap_or_default()
}

#[test]
fn consecutive_resolves_share_one_unit() {
    let cache = UnitCache::new(FakeParser::with_disk(&[("a.cpp", "int x;")]));
    let snap = BufferSnapshot::new("a.cpp", "int x;");

    let first = cache.resolve("a.cpp", &snap, false).unwrap();
    let second = cache.resolve("a.cpp", &snap, false).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.parser().parses(), 1);
    // One reparse: the initial sync against the snapshot.
    assert_eq!(cache.parser().reparses(), 1);
}

#[test]
fn first_resolution_syncs_to_snapshot_without_force() {
    let cache = UnitCache::new(FakeParser::with_disk(&[("a.cpp", "stale on-disk text")]));
    let snap = BufferSnapshot::new("a.cpp", "fresh buffer text");

    let unit = cache.resolve("a.cpp", &snap, false).unwrap();
    assert_eq!(unit_text(&unit), "fresh buffer text");
}

#[test]
fn forced_refresh_reparses_in_place() {
    let cache = UnitCache::new(FakeParser::with_disk(&[("a.cpp", "v0")]));

    let first = cache.resolve("a.cpp", &BufferSnapshot::new("a.cpp", "v1"), false).unwrap();
    let second = cache.resolve("a.cpp", &BufferSnapshot::new("a.cpp", "v2"), true).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(unit_text(&second), "v2");
    assert_eq!(cache.parser().parses(), 1);
    assert_eq!(cache.parser().reparses(), 2);
}

#[test]
fn non_forced_resolve_keeps_stale_content() {
    let cache = UnitCache::new(FakeParser::with_disk(&[("a.cpp", "v0")]));

    cache.resolve("a.cpp", &BufferSnapshot::new("a.cpp", "v1"), false).unwrap();
    let unit = cache.resolve("a.cpp", &BufferSnapshot::new("a.cpp", "v2 with edits"), false).unwrap();

    // The staleness trade-off: edits since the last reparse are ignored.
    assert_eq!(unit_text(&unit), "v1");
}

#[test]
fn parse_failure_inserts_nothing() {
    let cache = UnitCache::new(FakeParser::with_disk(&[]));
    let snap = BufferSnapshot::new("missing.cpp", "whatever");

    let err = cache.resolve("missing.cpp", &snap, false).unwrap_err();
    assert!(matches!(err, Error::ParseFailure { .. }), "unexpected error: {err}");
    assert!(cache.is_empty());
    assert!(!cache.contains("missing.cpp"));
}

#[test]
fn empty_identity_is_rejected() {
    let cache = UnitCache::new(FakeParser::with_disk(&[]));
    let snap = BufferSnapshot::new("", "text");

    let err = cache.resolve("", &snap, false).unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)), "unexpected error: {err}");
    assert!(cache.is_empty());
}

#[test]
fn mismatched_snapshot_identity_is_rejected() {
    let cache = UnitCache::new(FakeParser::with_disk(&[("a.cpp", "v0")]));
    let snap = BufferSnapshot::new("b.cpp", "text");

    let err = cache.resolve("a.cpp", &snap, false).unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)), "unexpected error: {err}");
    assert_eq!(cache.parser().parses(), 0);
}
