// Layoutfix Key Resolver Trait
//
// This module defines the interface to the platform's keyboard-layout
// capability: enumerating installed layouts, resolving a layout identifier
// to an opaque handle, and asking what character a (key, shift) pair
// produces under a given layout.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::keystroke::VirtualKey;

/// Error type for layout resolution
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The requested layout identifier has no corresponding installed layout
    #[error("no installed keyboard layout matches '{0}'")]
    LayoutNotFound(String),
}

/// Opaque handle to an installed keyboard layout.
///
/// Adapters map this to whatever the platform uses to identify a layout
/// (an HKL on Windows, an index for in-memory fixtures). The core never
/// interprets the raw value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayoutHandle(u64);

impl LayoutHandle {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

/// Interface to the platform key-resolution capability.
///
/// `resolve_char` must be a pure function of layout state at call time:
/// same handle, key and shift state, same answer. Dead keys and unmapped
/// keys return `None` and are silently omitted from layout tables.
pub trait KeyResolver {
    /// Installed layout identifiers, in adapter order, duplicates allowed.
    fn installed_layouts(&self) -> Vec<String>;

    /// Resolve a layout identifier (matched case-insensitively) to a handle.
    fn resolve_handle(&self, layout_id: &str) -> Result<LayoutHandle, LayoutError>;

    /// The character produced by pressing `vk` with or without shift under
    /// the given layout, or `None` if the combination produces nothing.
    fn resolve_char(&self, handle: &LayoutHandle, vk: VirtualKey, shift: bool) -> Option<char>;
}

/// Installed layout identifiers for display: duplicates removed, sorted
/// case-insensitively for deterministic enumeration.
pub fn installed_layout_ids<R: KeyResolver + ?Sized>(resolver: &R) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for id in resolver.installed_layouts() {
        if !ids.iter().any(|seen| seen.eq_ignore_ascii_case(&id)) {
            ids.push(id);
        }
    }
    ids.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
    ids
}

/// Deterministic in-memory resolver built from synthetic
/// `(key, shift) -> char` tables.
///
/// Used by the test suite and available to library users who want to run
/// the engine without a live platform layout (e.g. conversion previews
/// from recorded tables).
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    layouts: IndexMap<String, HashMap<(VirtualKey, bool), char>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layout from a list of `(key, shift, produced char)` entries.
    pub fn with_layout(mut self, layout_id: &str, keys: &[(VirtualKey, bool, char)]) -> Self {
        let table = keys
            .iter()
            .map(|&(vk, shift, ch)| ((vk, shift), ch))
            .collect();
        self.layouts.insert(layout_id.to_string(), table);
        self
    }
}

impl KeyResolver for StaticResolver {
    fn installed_layouts(&self) -> Vec<String> {
        self.layouts.keys().cloned().collect()
    }

    fn resolve_handle(&self, layout_id: &str) -> Result<LayoutHandle, LayoutError> {
        self.layouts
            .keys()
            .position(|id| id.eq_ignore_ascii_case(layout_id))
            .map(|index| LayoutHandle::from_raw(index as u64))
            .ok_or_else(|| LayoutError::LayoutNotFound(layout_id.to_string()))
    }

    fn resolve_char(&self, handle: &LayoutHandle, vk: VirtualKey, shift: bool) -> Option<char> {
        let (_, table) = self.layouts.get_index(handle.raw() as usize)?;
        table.get(&(vk, shift)).copied()
    }
}
