// Layoutfix Table Cache
// Per-layout-identifier cache of built layout tables

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::resolver::LayoutError;
use crate::table::LayoutTable;

/// Cache of built layout tables, keyed by layout identifier.
///
/// Construction for a given identifier is serialized by holding the write
/// lock across the build, so no caller ever observes a partially populated
/// table. Built tables are immutable and shared as `Arc<LayoutTable>`.
///
/// The cache is an explicitly owned object, never ambient global state;
/// callers invalidate it when the set of installed layouts changes.
#[derive(Debug, Default)]
pub struct TableCache {
    tables: RwLock<HashMap<String, Arc<LayoutTable>>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached table for `layout_id`, if one has been built.
    pub fn get(&self, layout_id: &str) -> Option<Arc<LayoutTable>> {
        self.tables.read().get(layout_id).cloned()
    }

    /// Fetch the table for `layout_id`, building it with `build` on a miss.
    ///
    /// A build failure is propagated and nothing is cached for the
    /// identifier, so a later call retries the build.
    pub fn get_or_build<F>(&self, layout_id: &str, build: F) -> Result<Arc<LayoutTable>, LayoutError>
    where
        F: FnOnce() -> Result<LayoutTable, LayoutError>,
    {
        if let Some(table) = self.tables.read().get(layout_id) {
            return Ok(table.clone());
        }

        let mut tables = self.tables.write();
        // Another caller may have built it while we waited for the lock
        if let Some(table) = tables.get(layout_id) {
            return Ok(table.clone());
        }

        let table = Arc::new(build()?);
        tables.insert(layout_id.to_string(), table.clone());
        Ok(table)
    }

    /// Drop every cached table. Called on "reload installed layouts".
    pub fn invalidate(&self) {
        self.tables.write().clear();
    }

    /// Drop the cached table for a single layout identifier.
    pub fn remove(&self, layout_id: &str) {
        self.tables.write().remove(layout_id);
    }

    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keystroke::VirtualKey;
    use crate::resolver::StaticResolver;
    use std::cell::Cell;

    fn fixture_resolver() -> StaticResolver {
        StaticResolver::new()
            .with_layout("fixture", &[(VirtualKey::new(0x41), false, 'a')])
    }

    #[test]
    fn builds_once_per_identifier() {
        let resolver = fixture_resolver();
        let cache = TableCache::new();
        let builds = Cell::new(0u32);

        for _ in 0..3 {
            let table = cache
                .get_or_build("fixture", || {
                    builds.set(builds.get() + 1);
                    LayoutTable::build(&resolver, "fixture")
                })
                .unwrap();
            assert_eq!(table.layout_id(), "fixture");
        }

        assert_eq!(builds.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failed_builds_are_not_cached() {
        let resolver = fixture_resolver();
        let cache = TableCache::new();

        let err = cache
            .get_or_build("missing", || LayoutTable::build(&resolver, "missing"))
            .unwrap_err();
        assert_eq!(err, LayoutError::LayoutNotFound("missing".to_string()));
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidate_clears_all_entries() {
        let resolver = fixture_resolver();
        let cache = TableCache::new();
        cache
            .get_or_build("fixture", || LayoutTable::build(&resolver, "fixture"))
            .unwrap();
        assert!(!cache.is_empty());

        cache.invalidate();
        assert!(cache.is_empty());
        assert!(cache.get("fixture").is_none());
    }
}
