// Layoutfix Layout Table
// Bidirectional character <-> keystroke mappings for one keyboard layout

use std::iter::once;

use indexmap::IndexMap;
use unicode_normalization::UnicodeNormalization;

use crate::keystroke::{candidate_keys, KeyStroke};
use crate::resolver::{KeyResolver, LayoutError};

/// Character <-> keystroke mappings for one layout, built in a single pass
/// over the candidate key set.
///
/// Both maps are first-write-wins. All unshifted queries are issued before
/// any shifted query, so when both shift states of any keys produce the
/// same character, `char_to_key` keeps the unshifted keystroke.
///
/// Invariant: every `KeyStroke` that appears as a value in `char_to_key`
/// also appears as a key in `key_to_char` (both entries come from the same
/// resolution call). The table is immutable once built.
#[derive(Debug, Clone)]
pub struct LayoutTable {
    layout_id: String,
    char_to_key: IndexMap<char, KeyStroke>,
    key_to_char: IndexMap<KeyStroke, char>,
}

impl LayoutTable {
    /// Build the table for `layout_id` by querying the resolver for every
    /// candidate key in both shift states.
    ///
    /// A (key, shift) pair that resolves to nothing is omitted, never a
    /// build failure. Fails only when the layout itself is not installed.
    pub fn build<R: KeyResolver + ?Sized>(
        resolver: &R,
        layout_id: &str,
    ) -> Result<Self, LayoutError> {
        let handle = resolver.resolve_handle(layout_id)?;

        let mut char_to_key = IndexMap::new();
        let mut key_to_char = IndexMap::new();

        // Unshifted pass for every key before any shifted query, so ties
        // between shift states always resolve to the unshifted keystroke.
        for shift in [false, true] {
            for vk in candidate_keys() {
                let Some(raw) = resolver.resolve_char(&handle, vk, shift) else {
                    continue;
                };
                let Some(ch) = normalize_char(raw) else {
                    continue;
                };
                let stroke = KeyStroke::new(vk, shift);
                key_to_char.entry(stroke).or_insert(ch);
                char_to_key.entry(ch).or_insert(stroke);
            }
        }

        log::debug!(
            "built layout table for '{}': {} characters, {} keystrokes",
            layout_id,
            char_to_key.len(),
            key_to_char.len()
        );

        Ok(Self {
            layout_id: layout_id.to_string(),
            char_to_key,
            key_to_char,
        })
    }

    pub fn layout_id(&self) -> &str {
        &self.layout_id
    }

    /// The keystroke that produces `ch` under this layout, if any.
    pub fn char_to_key(&self, ch: char) -> Option<KeyStroke> {
        self.char_to_key.get(&ch).copied()
    }

    /// The character produced by `stroke` under this layout, if any.
    pub fn key_to_char(&self, stroke: KeyStroke) -> Option<char> {
        self.key_to_char.get(&stroke).copied()
    }

    /// Number of distinct producible characters.
    pub fn len(&self) -> usize {
        self.char_to_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.char_to_key.is_empty()
    }

    /// Iterate over `(char, keystroke)` entries in insertion order.
    pub fn chars(&self) -> impl Iterator<Item = (char, KeyStroke)> + '_ {
        self.char_to_key.iter().map(|(&ch, &ks)| (ch, ks))
    }

    /// Iterate over `(keystroke, char)` entries in insertion order.
    pub fn keystrokes(&self) -> impl Iterator<Item = (KeyStroke, char)> + '_ {
        self.key_to_char.iter().map(|(&ks, &ch)| (ks, ch))
    }
}

/// Canonical-composition normalization of a single resolved character.
/// Presentation forms that expand under NFKC keep their first character,
/// matching how resolved characters are stored.
fn normalize_char(raw: char) -> Option<char> {
    once(raw).nfkc().next()
}
