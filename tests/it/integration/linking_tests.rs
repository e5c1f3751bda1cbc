//! Relationship Linking Integration Tests

use crate::helpers::{
    TestDiagramBuilder, bulk_ids, ctrl_down, left_down, move_to, unique_field, up_at,
};
use schemacanvas::LinkError;
use schemacanvas::editor::Editor;
use schemacanvas::geometry::Point;
use schemacanvas::pointer::CursorStyle;
use schemacanvas::selection::ElementRef;
use schemacanvas::types::{Cardinality, Constraint, Field, FieldRef, Table};

/// users at the origin, posts 400 to the right. Connector of `users_id`
/// is at (15, 68); the `posts_name` row spans y 86..122.
fn users_and_posts() -> Editor {
    TestDiagramBuilder::new()
        .with_table("users", (0.0, 0.0))
        .with_table("posts", (400.0, 0.0))
        .build()
}

#[test]
fn test_link_between_fields_creates_relationship() {
    let mut editor = users_and_posts();

    left_down(&mut editor, 15.0, 68.0);
    assert!(editor.interaction().is_linking());
    assert_eq!(editor.selection().selected(), &ElementRef::table("users"));

    move_to(&mut editor, 500.0, 104.0);
    up_at(&mut editor, 500.0, 104.0);

    let relationships = editor.diagram().relationships();
    assert_eq!(relationships.len(), 1);
    let rel = &relationships[0];
    assert_eq!(rel.start(), FieldRef::new("users", "users_id"));
    assert_eq!(rel.end(), FieldRef::new("posts", "posts_name"));
    assert_eq!(rel.cardinality, Cardinality::OneToMany);
    assert_eq!(rel.update_constraint, Constraint::None);
    assert_eq!(rel.delete_constraint, Constraint::None);
    assert_eq!(rel.name, "fk_users_id_posts");
    assert!(!rel.id.is_empty());

    assert!(editor.interaction().is_idle());
    assert!(editor.hover_target().is_none());
    assert_eq!(editor.cursor(), CursorStyle::Default);
}

#[test]
fn test_linking_does_not_move_tables() {
    let mut editor = users_and_posts();

    left_down(&mut editor, 15.0, 68.0);
    move_to(&mut editor, 500.0, 104.0);
    up_at(&mut editor, 500.0, 104.0);

    assert_eq!(editor.diagram().table("users").map(Table::position), Some(Point::ZERO));
}

#[test]
fn test_relationship_path_is_derived_from_tables() {
    let mut editor = users_and_posts();

    left_down(&mut editor, 15.0, 68.0);
    move_to(&mut editor, 500.0, 104.0);
    up_at(&mut editor, 500.0, 104.0);

    let scene = editor.scene();
    assert_eq!(scene.relationships.len(), 1);
    assert_eq!(
        scene.relationships[0].path,
        "M 220 68 L 298 68 A 12 12 0 0 1 310 80 L 310 92 A 12 12 0 0 0 322 104 L 400 104"
    );
    assert!(!scene.relationships[0].is_linear);
}

#[test]
fn test_link_to_same_field_is_rejected() {
    let mut editor = users_and_posts();

    left_down(&mut editor, 15.0, 68.0);
    move_to(&mut editor, 100.0, 68.0);
    assert_eq!(
        editor.hover_target().map(|h| h.field_ref()),
        Some(FieldRef::new("users", "users_id"))
    );
    up_at(&mut editor, 100.0, 68.0);

    assert!(editor.diagram().relationships().is_empty());
    assert!(editor.interaction().is_idle());
}

#[test]
fn test_link_to_other_field_of_same_table_is_allowed() {
    let mut editor = users_and_posts();

    left_down(&mut editor, 15.0, 68.0);
    move_to(&mut editor, 100.0, 104.0);
    up_at(&mut editor, 100.0, 104.0);

    assert_eq!(editor.diagram().relationships().len(), 1);
}

#[test]
fn test_release_over_header_creates_nothing() {
    let mut editor = users_and_posts();

    left_down(&mut editor, 15.0, 68.0);
    move_to(&mut editor, 500.0, 20.0);
    let hover = editor.hover_target().cloned();
    assert_eq!(hover.map(|h| (h.table_id, h.field_id)), Some(("posts".into(), String::new())));
    up_at(&mut editor, 500.0, 20.0);

    assert!(editor.diagram().relationships().is_empty());
}

#[test]
fn test_release_over_empty_canvas_creates_nothing() {
    let mut editor = users_and_posts();

    left_down(&mut editor, 15.0, 68.0);
    move_to(&mut editor, 300.0, 500.0);
    assert!(editor.hover_target().is_none());
    up_at(&mut editor, 300.0, 500.0);

    assert!(editor.diagram().relationships().is_empty());
    assert!(editor.interaction().is_idle());
}

#[test]
fn test_target_removed_mid_gesture_aborts_silently() {
    let mut editor = users_and_posts();

    left_down(&mut editor, 15.0, 68.0);
    move_to(&mut editor, 500.0, 104.0);
    editor.diagram_mut().remove_table("posts");
    up_at(&mut editor, 500.0, 104.0);

    assert!(editor.diagram().relationships().is_empty());
    assert!(editor.interaction().is_idle());
}

#[test]
fn test_finalize_link_reports_reason() {
    let mut editor = users_and_posts();
    let start = FieldRef::new("users", "users_id");

    assert_eq!(editor.finalize_link(&start), Err(LinkError::NoHoverTarget));

    editor.set_hover_target("users", "users_id");
    assert_eq!(editor.finalize_link(&start), Err(LinkError::SelfLink(start.clone())));

    editor.set_hover_target("gone", "gone_id");
    assert_eq!(
        editor.finalize_link(&start),
        Err(LinkError::StaleTable("gone".into()))
    );

    editor.set_hover_target("posts", "missing");
    assert!(matches!(
        editor.finalize_link(&start),
        Err(LinkError::StaleField { .. })
    ));

    editor.clear_hover_target();
    assert!(editor.hover_target().is_none());
    assert!(editor.diagram().relationships().is_empty());
}

#[test]
fn test_host_reported_hover_is_used() {
    let mut editor = users_and_posts();

    assert!(editor.begin_link("users", "users_name"));
    editor.set_hover_target("posts", "posts_id");
    let start = FieldRef::new("users", "users_name");
    let id = editor.finalize_link(&start);

    assert!(id.is_ok());
    let rel = &editor.diagram().relationships()[0];
    assert_eq!(Ok(rel.id.clone()), id);
    // Only the end is unique-like
    assert_eq!(rel.cardinality, Cardinality::ManyToOne);
    assert_eq!(rel.name, "fk_users_name_posts");
}

#[test]
fn test_begin_link_requires_existing_field() {
    let mut editor = users_and_posts();

    assert!(!editor.begin_link("users", "nope"));
    assert!(!editor.begin_link("nope", "users_id"));
    assert!(editor.interaction().is_idle());
}

#[test]
fn test_unique_fields_link_one_to_one() {
    let mut editor = TestDiagramBuilder::new()
        .with_custom_table(
            Table::new("a", "a", Point::ZERO).with_field(unique_field("a_code", "code")),
        )
        .with_custom_table(
            Table::new("b", "b", Point::new(400.0, 0.0))
                .with_field(unique_field("b_code", "code")),
        )
        .build();

    left_down(&mut editor, 15.0, 68.0);
    move_to(&mut editor, 500.0, 68.0);
    up_at(&mut editor, 500.0, 68.0);

    assert_eq!(editor.diagram().relationships()[0].cardinality, Cardinality::OneToOne);
}

#[test]
fn test_link_preview_follows_pointer() {
    let mut editor = users_and_posts();

    left_down(&mut editor, 15.0, 68.0);
    assert_eq!(
        editor.scene().link_preview.as_deref(),
        Some("M 15 68 C 15 68, 15 68, 15 68")
    );

    move_to(&mut editor, 215.0, 168.0);
    assert_eq!(
        editor.scene().link_preview.as_deref(),
        Some("M 15 68 C 115 68, 115 168, 215 168")
    );

    up_at(&mut editor, 215.0, 168.0);
    assert!(editor.scene().link_preview.is_none());
}

#[test]
fn test_ctrl_press_on_connector_toggles_instead() {
    let mut editor = users_and_posts();

    ctrl_down(&mut editor, 15.0, 68.0);

    assert!(!editor.interaction().is_linking());
    assert_eq!(editor.selection().bulk().len(), 1);
}

#[test]
fn test_plain_field_row_press_drags() {
    let mut editor = TestDiagramBuilder::new()
        .with_custom_table(
            Table::new("t", "t", Point::ZERO).with_field(Field::identity("t_id")),
        )
        .build();

    // Same row, away from the connector
    left_down(&mut editor, 120.0, 68.0);

    assert!(editor.interaction().is_dragging());
}

#[test]
fn test_connector_press_replaces_bulk_without_table() {
    let mut editor = users_and_posts();

    ctrl_down(&mut editor, 500.0, 20.0);
    up_at(&mut editor, 500.0, 20.0);
    assert_eq!(bulk_ids(&editor), ["posts"]);

    left_down(&mut editor, 15.0, 68.0);

    assert!(editor.interaction().is_linking());
    assert_eq!(bulk_ids(&editor), ["users"]);
    assert_eq!(editor.selection().selected(), &ElementRef::table("users"));
}

#[test]
fn test_connector_press_keeps_bulk_containing_table() {
    let mut editor = users_and_posts();

    ctrl_down(&mut editor, 100.0, 20.0);
    ctrl_down(&mut editor, 500.0, 20.0);
    up_at(&mut editor, 500.0, 20.0);

    left_down(&mut editor, 15.0, 68.0);

    assert!(editor.interaction().is_linking());
    assert_eq!(bulk_ids(&editor), ["users", "posts"]);
}

#[test]
fn test_connector_target_keeps_screen_size_when_zoomed_out() {
    let mut editor = TestDiagramBuilder::new()
        .with_table("users", (0.0, 0.0))
        .with_zoom(0.5)
        .build();

    // 12 diagram units from the connector is 6 pixels on screen
    left_down(&mut editor, 27.0, 68.0);

    assert!(editor.interaction().is_linking());
}

#[test]
fn test_connector_target_shrinks_in_diagram_units_when_zoomed_in() {
    let mut editor = TestDiagramBuilder::new()
        .with_table("users", (0.0, 0.0))
        .with_zoom(2.0)
        .build();

    // 6 diagram units from the connector is 12 pixels on screen
    left_down(&mut editor, 21.0, 68.0);

    assert!(editor.interaction().is_dragging());
}
