//! Tests for `pinchtype::layout` - grid placement, strict hit-testing, and
//! the regular-before-special tie-break.

use pinchtype::config::LayoutParams;
use pinchtype::layout::{KeyKind, KeyLayout};

// -- Helpers --------------------------------------------------

fn default_layout() -> KeyLayout {
    KeyLayout::build(&LayoutParams::default())
}

/// A one-key layout matching the rect (5,5)-(55,55).
fn single_key_layout() -> KeyLayout {
    KeyLayout::build(&LayoutParams {
        rows: vec![vec!["A".to_string()]],
        ..LayoutParams::default()
    })
}

// -- Grid placement -------------------------------------------

#[test]
fn test_default_layout_counts() {
    let layout = default_layout();
    assert_eq!(layout.regular().len(), 30);
    assert_eq!(layout.special().len(), 2);
    assert_eq!(layout.targets().len(), 32);
}

#[test]
fn test_grid_positions() {
    let layout = default_layout();
    let q = &layout.regular()[0];
    assert_eq!(q.label, "Q");
    assert_eq!((q.x, q.y), (5.0, 5.0));
    assert_eq!((q.width, q.height), (50.0, 50.0));

    // Second row starts one pitch down.
    let a = &layout.regular()[10];
    assert_eq!(a.label, "A");
    assert_eq!((a.x, a.y), (5.0, 65.0));

    // Last grid key: row 2, column 9.
    let brackets = &layout.regular()[29];
    assert_eq!(brackets.label, "[]");
    assert_eq!((brackets.x, brackets.y), (545.0, 125.0));
}

#[test]
fn test_special_keys() {
    let layout = default_layout();
    let [backspace, clear] = layout.special() else {
        panic!("expected exactly two special keys");
    };
    assert_eq!(backspace.label, "Backspace");
    assert_eq!(backspace.kind, KeyKind::Backspace);
    assert_eq!((backspace.x, backspace.y), (5.0, 280.0));
    assert_eq!((backspace.width, backspace.height), (150.0, 50.0));

    assert_eq!(clear.label, "Clear All");
    assert_eq!(clear.kind, KeyKind::ClearAll);
    assert_eq!((clear.x, clear.y), (165.0, 280.0));
}

#[test]
fn test_all_grid_keys_are_character_kind() {
    let layout = default_layout();
    assert!(layout.regular().iter().all(|k| k.kind == KeyKind::Character));
}

// -- Hit testing ----------------------------------------------

#[test]
fn test_hit_inside_key() {
    let layout = single_key_layout();
    let id = layout.hit_test(30.0, 30.0).unwrap();
    assert_eq!(layout.get(id).unwrap().label, "A");
}

#[test]
fn test_boundary_is_a_miss() {
    let layout = single_key_layout();
    // Edges and corners of (5,5)-(55,55) do not count as hits.
    assert_eq!(layout.hit_test(5.0, 30.0), None);
    assert_eq!(layout.hit_test(55.0, 30.0), None);
    assert_eq!(layout.hit_test(30.0, 5.0), None);
    assert_eq!(layout.hit_test(30.0, 55.0), None);
    assert_eq!(layout.hit_test(5.0, 5.0), None);
    // Just inside is a hit.
    assert!(layout.hit_test(5.1, 5.1).is_some());
}

#[test]
fn test_gap_between_keys_is_a_miss() {
    let layout = default_layout();
    // Q ends at x=55, W starts at x=65.
    assert_eq!(layout.hit_test(60.0, 30.0), None);
}

#[test]
fn test_hit_special_key() {
    let layout = default_layout();
    let id = layout.hit_test(80.0, 305.0).unwrap();
    assert_eq!(layout.get(id).unwrap().kind, KeyKind::Backspace);

    let id = layout.hit_test(240.0, 305.0).unwrap();
    assert_eq!(layout.get(id).unwrap().kind, KeyKind::ClearAll);
}

#[test]
fn test_regular_wins_over_overlapping_special() {
    // Move Backspace on top of the grid; a point inside both resolves to
    // the grid key because regular targets are tested first.
    let layout = KeyLayout::build(&LayoutParams {
        backspace_pos: (5.0, 5.0),
        ..LayoutParams::default()
    });
    let id = layout.hit_test(30.0, 30.0).unwrap();
    assert_eq!(layout.get(id).unwrap().label, "Q");
}

#[test]
fn test_default_layout_has_no_overlaps() {
    let layout = default_layout();
    // In the default layout every point lands in at most one rectangle.
    for &(x, y) in &[(30.0, 30.0), (80.0, 305.0), (170.0, 300.0), (700.0, 700.0)] {
        let hits = layout
            .targets()
            .iter()
            .filter(|t| t.contains(x, y))
            .count();
        assert!(hits <= 1, "point ({x},{y}) hit {hits} keys");
    }
}

// -- KeyKind string conversions -------------------------------

#[test]
fn test_key_kind_round_trip() {
    assert_eq!("backspace".parse::<KeyKind>().unwrap(), KeyKind::Backspace);
    assert_eq!("clear_all".parse::<KeyKind>().unwrap(), KeyKind::ClearAll);
    assert_eq!(KeyKind::Character.to_string(), "character");
    let s: &'static str = KeyKind::Backspace.into();
    assert_eq!(s, "backspace");
}
