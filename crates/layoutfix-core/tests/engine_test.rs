// Layoutfix Engine Integration Tests
//
// Fixture-driven tests of the full convert path: table building, layout
// scoring, direction detection and rendering, all against the in-memory
// resolver.

use layoutfix_core::{
    ConvertResult, Direction, LayoutError, StaticResolver, Transliterator, VirtualKey,
};

const VK_A: VirtualKey = VirtualKey::new(0x41);
const VK_B: VirtualKey = VirtualKey::new(0x42);
const VK_0: VirtualKey = VirtualKey::new(0x30);
const VK_SPACE: VirtualKey = VirtualKey::new(0x20);

fn detected(source: &str, destination: &str) -> Direction {
    Direction::Detected {
        source: source.to_string(),
        destination: destination.to_string(),
    }
}

/// The two-layout fixture from the concrete scenario: layout "A" produces
/// p/q on the keys where layout "B" produces x/y.
fn pq_xy_engine() -> Transliterator<StaticResolver> {
    let resolver = StaticResolver::new()
        .with_layout("A", &[(VK_A, false, 'p'), (VK_B, false, 'q')])
        .with_layout("B", &[(VK_A, false, 'x'), (VK_B, false, 'y')]);
    Transliterator::new(resolver)
}

/// Latin / Hebrew fixture covering the keys of "akuo" <-> "שלום",
/// plus space and the digit row shared by both layouts.
fn latin_hebrew_engine() -> Transliterator<StaticResolver> {
    let latin: Vec<(VirtualKey, bool, char)> = (0x41..=0x5A)
        .map(|code| {
            let letter = (b'a' + (code - 0x41) as u8) as char;
            (VirtualKey::new(code), false, letter)
        })
        .chain([(VK_SPACE, false, ' '), (VK_0, false, '0')])
        .collect();

    let hebrew = vec![
        (VirtualKey::new(0x41), false, 'ש'), // A
        (VirtualKey::new(0x4B), false, 'ל'), // K
        (VirtualKey::new(0x55), false, 'ו'), // U
        (VirtualKey::new(0x4F), false, 'ם'), // O
        (VirtualKey::new(0x47), false, 'ע'), // G
        (VK_SPACE, false, ' '),
        (VK_0, false, '0'),
    ];

    let resolver = StaticResolver::new()
        .with_layout("en-US", &latin)
        .with_layout("he-IL", &hebrew);
    Transliterator::new(resolver)
}

#[test]
fn empty_input_is_returned_unchanged() {
    let engine = pq_xy_engine();
    let (result, direction) = engine.convert_auto("", "A", "B").unwrap();
    assert_eq!(
        result,
        ConvertResult {
            text: String::new(),
            changed: false
        }
    );
    assert_eq!(direction, Direction::None);
}

#[test]
fn unknown_layout_fails_before_any_output() {
    let engine = pq_xy_engine();
    assert_eq!(
        engine.convert_auto("pq", "zz-ZZ", "B").unwrap_err(),
        LayoutError::LayoutNotFound("zz-ZZ".to_string())
    );
    assert_eq!(
        engine.convert_auto("pq", "A", "zz-ZZ").unwrap_err(),
        LayoutError::LayoutNotFound("zz-ZZ".to_string())
    );
}

#[test]
fn no_overlap_text_passes_through() {
    let engine = pq_xy_engine();
    let (result, direction) = engine.convert_auto("!?@", "A", "B").unwrap();
    assert_eq!(result.text, "!?@");
    assert!(!result.changed);
    assert_eq!(direction, Direction::None);
}

#[test]
fn concrete_two_layout_scenario() {
    let engine = pq_xy_engine();

    let (result, direction) = engine.convert_auto("pq", "A", "B").unwrap();
    assert_eq!(result.text, "xy");
    assert!(result.changed);
    assert_eq!(direction, detected("A", "B"));

    let (back, direction) = engine.convert_auto("xy", "A", "B").unwrap();
    assert_eq!(back.text, "pq");
    assert!(back.changed);
    assert_eq!(direction, detected("B", "A"));
}

#[test]
fn upper_case_input_is_folded_before_conversion() {
    let engine = pq_xy_engine();
    let (result, direction) = engine.convert_auto("PQ", "A", "B").unwrap();
    assert_eq!(result.text, "xy");
    assert!(result.changed);
    assert_eq!(direction, detected("A", "B"));
}

#[test]
fn round_trip_between_fixture_layouts() {
    let engine = latin_hebrew_engine();

    let (converted, direction) = engine.convert_auto("akuo", "he-IL", "en-US").unwrap();
    assert_eq!(converted.text, "שלום");
    assert!(converted.changed);
    assert_eq!(direction, detected("en-US", "he-IL"));

    // Scoring re-detects the other direction on the converted output
    let (back, direction) = engine
        .convert_auto(&converted.text, "he-IL", "en-US")
        .unwrap();
    assert_eq!(back.text, "akuo");
    assert!(back.changed);
    assert_eq!(direction, detected("he-IL", "en-US"));
}

#[test]
fn caps_lock_text_converts_like_lower_case() {
    let engine = latin_hebrew_engine();
    let (converted, _) = engine.convert_auto("AKUO", "he-IL", "en-US").unwrap();
    assert_eq!(converted.text, "שלום");
}

#[test]
fn shared_characters_map_to_themselves() {
    let engine = latin_hebrew_engine();

    // '0' and ' ' sit on the same keystroke in both layouts and survive
    // conversion untouched; only the letters change.
    let (converted, direction) = engine.convert_auto("akuo 0", "he-IL", "en-US").unwrap();
    assert_eq!(converted.text, "שלום 0");
    assert!(converted.changed);
    assert_eq!(direction, detected("en-US", "he-IL"));
}

#[test]
fn all_shared_text_ties_toward_layout_a_without_changes() {
    let engine = latin_hebrew_engine();

    // Every character is expressible identically in both layouts, so the
    // tie goes to layout A and nothing may change.
    let (converted, direction) = engine.convert_auto("0 0", "he-IL", "en-US").unwrap();
    assert_eq!(converted.text, "0 0");
    assert!(!converted.changed);
    assert_eq!(direction, detected("he-IL", "en-US"));
}

#[test]
fn control_characters_pass_through() {
    let engine = pq_xy_engine();
    let (result, _) = engine.convert_auto("p\nq", "A", "B").unwrap();
    assert_eq!(result.text, "x\ny");
    assert!(result.changed);
}

#[test]
fn presentation_forms_are_normalized_before_scoring() {
    let engine = latin_hebrew_engine();

    // U+FB20 (ayin presentation form) folds to U+05E2 under NFKC, which
    // the Hebrew fixture produces on the G key.
    let (converted, direction) = engine.convert_auto("\u{FB20}", "he-IL", "en-US").unwrap();
    assert_eq!(converted.text, "g");
    assert!(converted.changed);
    assert_eq!(direction, detected("he-IL", "en-US"));
}

#[test]
fn tables_are_cached_per_layout_identifier() {
    let engine = latin_hebrew_engine();
    assert!(engine.cache().is_empty());

    engine.convert_auto("akuo", "he-IL", "en-US").unwrap();
    assert_eq!(engine.cache().len(), 2);

    engine.reload_layouts();
    assert!(engine.cache().is_empty());
}
