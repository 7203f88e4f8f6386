// Layoutfix Transliteration Engine
//
// Given raw text and two candidate layout identifiers, decides which layout
// was active when the text was typed and re-renders the text under the
// other layout, passing through anything that cannot be remapped.

use std::fmt;
use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;

use crate::cache::TableCache;
use crate::keystroke::KeyStroke;
use crate::resolver::{KeyResolver, LayoutError};
use crate::table::LayoutTable;

/// Converted text plus whether any character actually changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertResult {
    pub text: String,
    pub changed: bool,
}

/// The conversion direction inferred from the text itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Direction {
    /// Neither layout could account for any character.
    None,
    /// The text was typed under `source`; it was re-rendered for
    /// `destination`.
    Detected { source: String, destination: String },
}

impl Direction {
    fn detected(source: &str, destination: &str) -> Self {
        Self::Detected {
            source: source.to_string(),
            destination: destination.to_string(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::None => write!(f, "none"),
            Direction::Detected {
                source,
                destination,
            } => write!(f, "{} -> {}", source, destination),
        }
    }
}

/// The transliteration engine.
///
/// Stateless between calls apart from the table cache, which holds only
/// immutable built tables. Safe to share across threads when the resolver
/// is `Sync`.
pub struct Transliterator<R> {
    resolver: R,
    cache: TableCache,
}

impl<R: KeyResolver> Transliterator<R> {
    pub fn new(resolver: R) -> Self {
        Self::with_cache(resolver, TableCache::new())
    }

    /// Use an externally owned cache, e.g. one shared with a settings UI
    /// that also enumerates layouts.
    pub fn with_cache(resolver: R, cache: TableCache) -> Self {
        Self { resolver, cache }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn cache(&self) -> &TableCache {
        &self.cache
    }

    /// Forget all cached tables. Call after the set of installed layouts
    /// changes.
    pub fn reload_layouts(&self) {
        self.cache.invalidate();
    }

    /// Convert `text` between `layout_a` and `layout_b`, inferring the
    /// direction from which layout can account for more of the text.
    ///
    /// The input is case-folded and NFKC-normalized before scoring; the
    /// whole text is converted as one block in a single direction. Ties
    /// favor `layout_a` as the source. Characters outside both layouts'
    /// tables pass through untouched.
    ///
    /// Fails only when one of the identifiers matches no installed layout,
    /// before any output is produced.
    pub fn convert_auto(
        &self,
        text: &str,
        layout_a: &str,
        layout_b: &str,
    ) -> Result<(ConvertResult, Direction), LayoutError> {
        if text.is_empty() {
            return Ok((
                ConvertResult {
                    text: String::new(),
                    changed: false,
                },
                Direction::None,
            ));
        }

        // Fold upper case away so Caps-Lock-typed text behaves like normal
        // text, then collapse presentation-form variants before scoring.
        let folded: String = text.chars().flat_map(char::to_lowercase).collect();
        let prepared: String = folded.nfkc().collect();

        let table_a = self.table_for(layout_a)?;
        let table_b = self.table_for(layout_b)?;

        let score_a = score(&prepared, &table_a);
        let score_b = score(&prepared, &table_b);
        log::debug!(
            "scored '{}': {} / '{}': {}",
            layout_a,
            score_a,
            layout_b,
            score_b
        );

        if score_a == 0 && score_b == 0 {
            return Ok((
                ConvertResult {
                    text: prepared,
                    changed: false,
                },
                Direction::None,
            ));
        }

        let (result, direction) = if score_a >= score_b {
            (
                render(&prepared, &table_a, &table_b),
                Direction::detected(layout_a, layout_b),
            )
        } else {
            (
                render(&prepared, &table_b, &table_a),
                Direction::detected(layout_b, layout_a),
            )
        };

        log::debug!("direction {}: changed={}", direction, result.changed);
        Ok((result, direction))
    }

    fn table_for(&self, layout_id: &str) -> Result<Arc<LayoutTable>, LayoutError> {
        self.cache
            .get_or_build(layout_id, || LayoutTable::build(&self.resolver, layout_id))
    }
}

/// One point per non-control character the layout can produce. ASCII upper
/// case also tests its lower-case form; preprocessing already folds case,
/// but direct callers of the scoring path may not.
fn score(text: &str, table: &LayoutTable) -> u32 {
    let mut score = 0;
    for ch in text.chars() {
        if ch.is_control() {
            continue;
        }
        if table.char_to_key(ch).is_some() {
            score += 1;
            continue;
        }
        if ch.is_ascii_uppercase() && table.char_to_key(ch.to_ascii_lowercase()).is_some() {
            score += 1;
        }
    }
    score
}

/// Map each character through its source-layout keystroke to the
/// destination layout. Control characters and anything without a full
/// source->destination mapping pass through unchanged.
fn render(text: &str, source: &LayoutTable, destination: &LayoutTable) -> ConvertResult {
    let mut out = String::with_capacity(text.len());
    let mut changed = false;

    for ch in text.chars() {
        if ch.is_control() {
            out.push(ch);
            continue;
        }

        if let Some(stroke) = lookup_stroke(source, ch) {
            // Destination-table characters are stored NFKC-normalized
            if let Some(mapped) = destination.key_to_char(stroke) {
                if mapped != ch {
                    changed = true;
                }
                out.push(mapped);
                continue;
            }
        }

        out.push(ch);
    }

    // Guard against residual decomposed forms in the assembled output
    let text = out.nfkc().collect();
    ConvertResult { text, changed }
}

/// Exact `char_to_key` hit, with the same upper->lower fallback the scoring
/// pass uses.
fn lookup_stroke(table: &LayoutTable, ch: char) -> Option<KeyStroke> {
    if let Some(stroke) = table.char_to_key(ch) {
        return Some(stroke);
    }
    if ch.is_ascii_uppercase() {
        return table.char_to_key(ch.to_ascii_lowercase());
    }
    None
}
