//! Integration tests for marquee selection over lanes.

use crate::helpers::{
    EventLog, TestCanvasBuilder, escape, id, ids, move_to, press_lane, rect, release,
};
use swimlane_canvas::{Canvas, InputEvent, InputStateKind, Modifiers, Point, Pointer};

fn two_items() -> (Canvas, EventLog) {
    TestCanvasBuilder::new()
        .with_lane("l1")
        .with_snippet("a", "l1", rect(0.0, 0.0, 20.0, 20.0))
        .with_snippet("b", "l1", rect(100.0, 100.0, 20.0, 20.0))
        .build()
}

fn highlighted(canvas: &Canvas) -> Vec<String> {
    let mut out: Vec<String> = canvas
        .registry()
        .items()
        .filter(|item| item.highlighted)
        .map(|item| item.id.to_string())
        .collect();
    out.sort();
    out
}

#[test]
fn test_small_marquee_selects_contained_item_only() {
    let (mut canvas, _) = two_items();

    press_lane(&mut canvas, "l1", 0.0, 0.0);
    assert_eq!(move_to(&mut canvas, 30.0, 30.0), InputStateKind::MarqueeSelect);
    assert_eq!(highlighted(&canvas), ["a"]);
    release(&mut canvas, 30.0, 30.0);

    assert_eq!(canvas.selected_ids(), ids(&["a"]));
    assert!(highlighted(&canvas).is_empty());
}

#[test]
fn test_large_marquee_selects_both() {
    let (mut canvas, _) = two_items();

    press_lane(&mut canvas, "l1", 0.0, 0.0);
    move_to(&mut canvas, 150.0, 150.0);
    release(&mut canvas, 150.0, 150.0);

    assert_eq!(canvas.selected_ids(), ids(&["a", "b"]));
}

#[test]
fn test_partial_overlap_is_not_selected() {
    let (mut canvas, _) = two_items();

    press_lane(&mut canvas, "l1", 0.0, 0.0);
    move_to(&mut canvas, 110.0, 110.0);
    assert_eq!(highlighted(&canvas), ["a"]);
    release(&mut canvas, 110.0, 110.0);
    assert_eq!(canvas.selected_ids(), ids(&["a"]));
}

#[test]
fn test_shrinking_marquee_drops_highlight() {
    let (mut canvas, _) = two_items();

    press_lane(&mut canvas, "l1", 0.0, 0.0);
    move_to(&mut canvas, 150.0, 150.0);
    assert_eq!(highlighted(&canvas), ["a", "b"]);
    move_to(&mut canvas, 30.0, 30.0);
    assert_eq!(highlighted(&canvas), ["a"]);
}

#[test]
fn test_marquee_rect_is_normalized() {
    let (mut canvas, _) = two_items();

    press_lane(&mut canvas, "l1", 140.0, 140.0);
    move_to(&mut canvas, 90.0, 60.0);

    assert_eq!(canvas.marquee_rect(), Some(rect(90.0, 60.0, 50.0, 80.0)));
    assert_eq!(highlighted(&canvas), ["b"]);
}

#[test]
fn test_escape_aborts_marquee() {
    let (mut canvas, log) = two_items();

    press_lane(&mut canvas, "l1", 0.0, 0.0);
    move_to(&mut canvas, 150.0, 150.0);
    assert_eq!(escape(&mut canvas), InputStateKind::Ready);

    assert!(canvas.selected_ids().is_empty());
    assert!(highlighted(&canvas).is_empty());
    assert!(log.is_empty());
    assert_eq!(canvas.marquee_rect(), None);
}

#[test]
fn test_shift_marquee_extends_selection() {
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_snippet("a", "l1", rect(0.0, 0.0, 20.0, 20.0))
        .with_snippet("b", "l1", rect(100.0, 100.0, 20.0, 20.0))
        .with_snippet("c", "l1", rect(300.0, 300.0, 20.0, 20.0))
        .build();
    canvas.select(&id("c"), false).unwrap();

    canvas.send(InputEvent::MouseDownOnLane {
        lane: id("l1"),
        pointer: Pointer::at(0.0, 0.0).with_modifiers(Modifiers::shift()),
    });
    move_to(&mut canvas, 30.0, 30.0);
    release(&mut canvas, 30.0, 30.0);

    assert_eq!(canvas.selected_ids(), ids(&["a", "c"]));
}

#[test]
fn test_marquee_spans_lanes_in_canvas_space() {
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_lane("l2")
        .with_snippet("top", "l1", rect(10.0, 450.0, 20.0, 20.0))
        .with_snippet("bottom", "l2", rect(10.0, 10.0, 20.0, 20.0))
        .build();
    canvas.set_lane_pan(&id("l2"), Point::new(0.0, -5.0)).unwrap();

    press_lane(&mut canvas, "l1", 0.0, 400.0);
    move_to(&mut canvas, 50.0, 530.0);
    release(&mut canvas, 50.0, 530.0);

    assert_eq!(canvas.selected_ids(), ids(&["bottom", "top"]));
}

#[test]
fn test_lanes_are_never_marquee_selected() {
    let (mut canvas, _) = TestCanvasBuilder::new().with_lane_height("l1", 100.0).build();

    press_lane(&mut canvas, "l1", -10.0, -10.0);
    move_to(&mut canvas, 5000.0, 5000.0);
    release(&mut canvas, 5000.0, 5000.0);

    assert!(canvas.selected_ids().is_empty());
}

#[test]
fn test_marquee_skips_items_hidden_by_their_lane_window() {
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_lane_height("l1", 100.0)
        .with_lane_height("l2", 100.0)
        .with_snippet("far", "l1", rect(10.0, 150.0, 20.0, 20.0))
        .with_snippet("near", "l2", rect(50.0, 50.0, 20.0, 20.0))
        .build();

    press_lane(&mut canvas, "l2", 0.0, 100.0);
    move_to(&mut canvas, 100.0, 200.0);
    assert_eq!(highlighted(&canvas), ["near"]);
    release(&mut canvas, 100.0, 200.0);

    assert_eq!(canvas.selected_ids(), ids(&["near"]));
}
