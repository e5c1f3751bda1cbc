//! Drag Workflow Integration Tests

use crate::helpers::{
    TestDiagramBuilder, bulk_ids, ctrl_down, drag, event_at, left_down, move_to, table_position,
    test_table, up_at,
};
use schemacanvas::geometry::Point;
use schemacanvas::pointer::{CursorStyle, Modifiers, PointerButton, PointerEvent};
use schemacanvas::selection::ElementRef;

#[test]
fn test_single_drag_snaps_to_grid() {
    let mut editor = TestDiagramBuilder::new().with_table("a", (0.0, 0.0)).build();

    // Grab at (100, 20), release 50 units down-right: 50 snaps to 48
    drag(&mut editor, (100.0, 20.0), (150.0, 70.0));

    assert_eq!(table_position(&editor, "a"), Point::new(48.0, 48.0));
    let bulk = editor.selection().bulk();
    assert_eq!(bulk.len(), 1);
    assert_eq!(bulk[0].current_coords, Point::new(48.0, 48.0));
    assert_eq!(bulk[0].initial_coords, bulk[0].current_coords);
}

#[test]
fn test_drag_by_grid_multiple_is_exact() {
    let mut editor = TestDiagramBuilder::new().with_table("a", (24.0, 24.0)).build();

    drag(&mut editor, (30.0, 30.0), (30.0 + 72.0, 30.0 - 48.0));

    assert_eq!(table_position(&editor, "a"), Point::new(96.0, -24.0));
}

#[test]
fn test_drag_without_snapping_follows_pointer() {
    let mut editor = TestDiagramBuilder::new()
        .with_table("a", (0.0, 0.0))
        .without_snapping()
        .build();

    drag(&mut editor, (100.0, 20.0), (137.5, 31.25));

    assert_eq!(table_position(&editor, "a"), Point::new(37.5, 11.25));
}

#[test]
fn test_grab_offset_is_preserved_across_moves() {
    let mut editor = TestDiagramBuilder::new()
        .with_table("a", (0.0, 0.0))
        .without_snapping()
        .build();

    left_down(&mut editor, 100.0, 20.0);
    move_to(&mut editor, 110.0, 30.0);
    move_to(&mut editor, 300.0, 220.0);
    up_at(&mut editor, 300.0, 220.0);

    assert_eq!(table_position(&editor, "a"), Point::new(200.0, 200.0));
}

#[test]
fn test_press_selects_and_starts_drag() {
    let mut editor = TestDiagramBuilder::new().with_table("a", (0.0, 0.0)).build();

    left_down(&mut editor, 100.0, 20.0);

    assert_eq!(editor.selection().selected(), &ElementRef::table("a"));
    assert_eq!(bulk_ids(&editor), ["a"]);
    assert_eq!(editor.interaction().dragged_element(), Some(&ElementRef::table("a")));
    assert_eq!(editor.cursor(), CursorStyle::Crosshair);

    up_at(&mut editor, 100.0, 20.0);
    assert!(editor.interaction().is_idle());
    assert_eq!(editor.cursor(), CursorStyle::Default);
}

#[test]
fn test_bulk_drag_moves_all_by_same_delta() {
    let mut editor = TestDiagramBuilder::new()
        .with_table("a", (0.0, 0.0))
        .with_table("b", (480.0, 240.0))
        .with_table("c", (960.0, 0.0))
        .build();

    ctrl_down(&mut editor, 100.0, 20.0);
    up_at(&mut editor, 100.0, 20.0);
    ctrl_down(&mut editor, 580.0, 260.0);
    up_at(&mut editor, 580.0, 260.0);
    assert_eq!(bulk_ids(&editor), ["a", "b"]);

    // Dragging a member of the bulk set keeps the set
    drag(&mut editor, (100.0, 20.0), (148.0, 116.0));

    assert_eq!(table_position(&editor, "a"), Point::new(48.0, 96.0));
    assert_eq!(table_position(&editor, "b"), Point::new(528.0, 336.0));
    assert_eq!(table_position(&editor, "c"), Point::new(960.0, 0.0));
    assert!(editor.selection().bulk().iter().all(|el| !el.has_moved()));
}

#[test]
fn test_press_outside_bulk_replaces_it() {
    let mut editor = TestDiagramBuilder::new()
        .with_table("a", (0.0, 0.0))
        .with_table("b", (480.0, 0.0))
        .build();

    ctrl_down(&mut editor, 100.0, 20.0);
    ctrl_down(&mut editor, 580.0, 20.0);
    assert_eq!(bulk_ids(&editor), ["a", "b"]);
    up_at(&mut editor, 580.0, 20.0);

    // A plain press on a table outside the set replaces it
    editor.diagram_mut().insert_table(test_table("c", (0.0, 480.0)), None);
    left_down(&mut editor, 100.0, 500.0);
    assert_eq!(bulk_ids(&editor), ["c"]);
    assert_eq!(editor.selection().selected(), &ElementRef::table("c"));
}

#[test]
fn test_ctrl_click_toggles_membership() {
    let mut editor = TestDiagramBuilder::new()
        .with_table("a", (0.0, 0.0))
        .with_table("b", (480.0, 0.0))
        .build();

    ctrl_down(&mut editor, 100.0, 20.0);
    ctrl_down(&mut editor, 580.0, 20.0);
    assert_eq!(bulk_ids(&editor), ["a", "b"]);
    // No drag starts under ctrl/meta
    assert!(editor.interaction().is_idle());

    // Removing with more than one selected also clears the primary selection
    ctrl_down(&mut editor, 100.0, 20.0);
    assert_eq!(bulk_ids(&editor), ["b"]);
    assert!(editor.selection().selected().is_none());

    // The last member stays
    ctrl_down(&mut editor, 580.0, 20.0);
    assert_eq!(bulk_ids(&editor), ["b"]);
}

#[test]
fn test_locked_table_selects_without_dragging() {
    let mut editor = TestDiagramBuilder::new()
        .with_locked_table("a", (0.0, 0.0))
        .build();

    left_down(&mut editor, 100.0, 20.0);
    assert_eq!(editor.selection().selected(), &ElementRef::table("a"));
    assert!(!editor.interaction().is_dragging());

    move_to(&mut editor, 300.0, 300.0);
    up_at(&mut editor, 300.0, 300.0);
    assert_eq!(table_position(&editor, "a"), Point::ZERO);
}

#[test]
fn test_bulk_drag_leaves_locked_members() {
    let mut editor = TestDiagramBuilder::new()
        .with_table("a", (0.0, 0.0))
        .with_locked_table("b", (480.0, 0.0))
        .build();

    ctrl_down(&mut editor, 100.0, 20.0);
    ctrl_down(&mut editor, 580.0, 20.0);
    up_at(&mut editor, 580.0, 20.0);

    drag(&mut editor, (100.0, 20.0), (148.0, 20.0));

    assert_eq!(table_position(&editor, "a"), Point::new(48.0, 0.0));
    assert_eq!(table_position(&editor, "b"), Point::new(480.0, 0.0));
}

#[test]
fn test_drag_at_zoom_uses_diagram_units() {
    let mut editor = TestDiagramBuilder::new()
        .with_table("a", (0.0, 0.0))
        .with_zoom(2.0)
        .without_snapping()
        .build();

    drag(&mut editor, (10.0, 10.0), (60.0, 35.0));

    assert_eq!(table_position(&editor, "a"), Point::new(50.0, 25.0));
}

#[test]
fn test_pointer_cancel_keeps_moved_positions() {
    let mut editor = TestDiagramBuilder::new().with_table("a", (0.0, 0.0)).build();

    left_down(&mut editor, 100.0, 20.0);
    move_to(&mut editor, 148.0, 20.0);
    let cancel = event_at(&editor, Point::new(148.0, 20.0), PointerButton::Left, Modifiers::default());
    editor.handle_pointer_cancel(&cancel);

    assert!(editor.interaction().is_idle());
    assert_eq!(table_position(&editor, "a"), Point::new(48.0, 0.0));
    assert!(!editor.selection().bulk()[0].has_moved());
}

#[test]
fn test_secondary_pointer_is_ignored() {
    let mut editor = TestDiagramBuilder::new().with_table("a", (0.0, 0.0)).build();

    left_down(&mut editor, 100.0, 20.0);
    let touch = PointerEvent {
        pointer_id: 7,
        is_primary: false,
        ..event_at(&editor, Point::new(400.0, 400.0), PointerButton::Left, Modifiers::default())
    };
    editor.handle_pointer_move(&touch);
    editor.handle_pointer_up(&touch);

    assert!(editor.interaction().is_dragging());
    assert_eq!(table_position(&editor, "a"), Point::ZERO);
}

#[test]
fn test_bulk_drag_commits_when_locked_member_comes_first() {
    let mut editor = TestDiagramBuilder::new()
        .with_table("a", (0.0, 0.0))
        .with_locked_table("b", (480.0, 0.0))
        .build();

    // Locked table enters the bulk set first
    ctrl_down(&mut editor, 580.0, 20.0);
    ctrl_down(&mut editor, 100.0, 20.0);
    up_at(&mut editor, 100.0, 20.0);
    assert_eq!(bulk_ids(&editor), ["b", "a"]);

    drag(&mut editor, (100.0, 20.0), (148.0, 20.0));

    assert_eq!(table_position(&editor, "a"), Point::new(48.0, 0.0));
    assert_eq!(table_position(&editor, "b"), Point::new(480.0, 0.0));
    for el in editor.selection().bulk() {
        assert_eq!(el.initial_coords, el.current_coords, "{} not committed", el.id);
    }
}
