//! Integration tests for routing raw client input into classified events.

use crate::helpers::{TestCanvasBuilder, id, rect};
use swimlane_canvas::input::HitTarget;
use swimlane_canvas::{
    Anchor, CanvasEvent, InputStateKind, ItemKind, Key, Modifiers, MountPoint, Point,
};

#[test]
fn test_press_on_item_through_mount_offset() {
    let (mut canvas, log) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_snippet("s", "l1", rect(10.0, 10.0, 40.0, 40.0))
        .mounted_at(100.0, 50.0)
        .build();

    assert_eq!(
        canvas.pointer_down(Point::new(120.0, 70.0), Modifiers::NONE),
        Some(InputStateKind::MousedownOnItem)
    );
    assert_eq!(
        canvas.pointer_up(Point::new(120.0, 70.0), Modifiers::NONE),
        Some(InputStateKind::Ready)
    );
    assert_eq!(canvas.selected_ids(), vec![id("s")]);
    assert_eq!(log.take(), vec![CanvasEvent::Select { id: id("s") }]);
}

#[test]
fn test_press_on_empty_lane_space() {
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_snippet("s", "l1", rect(10.0, 10.0, 40.0, 40.0))
        .mounted_at(100.0, 50.0)
        .build();

    assert_eq!(
        canvas.pointer_down(Point::new(400.0, 300.0), Modifiers::NONE),
        Some(InputStateKind::MousedownOnLane)
    );
}

#[test]
fn test_press_below_all_lanes_is_dropped() {
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_lane("l1")
        .mounted_at(0.0, 0.0)
        .build();

    assert_eq!(canvas.pointer_down(Point::new(10.0, 900.0), Modifiers::NONE), None);
    assert!(canvas.input_state().is_ready());
}

#[test]
fn test_topmost_item_wins() {
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_snippet("a", "l1", rect(0.0, 0.0, 50.0, 50.0))
        .with_snippet("b", "l1", rect(25.0, 25.0, 50.0, 50.0))
        .build();

    let overlap = Point::new(30.0, 30.0);
    assert_eq!(canvas.hit_test(overlap), Some(HitTarget::Item(id("b"))));

    canvas.move_to_the_front(&id("a")).unwrap();
    assert_eq!(canvas.hit_test(overlap), Some(HitTarget::Item(id("a"))));
}

#[test]
fn test_nested_item_beats_its_block() {
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_block("blk", "l1", rect(0.0, 0.0, 200.0, 200.0))
        .with_nested("n", "l1", "blk", rect(50.0, 50.0, 20.0, 20.0))
        .build();

    assert_eq!(canvas.hit_test(Point::new(55.0, 55.0)), Some(HitTarget::Item(id("n"))));
    assert_eq!(canvas.hit_test(Point::new(150.0, 150.0)), Some(HitTarget::Item(id("blk"))));
}

#[test]
fn test_hit_test_reports_resize_handles_of_selection() {
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_snippet("s", "l1", rect(10.0, 10.0, 40.0, 40.0))
        .build();
    canvas.select(&id("s"), false).unwrap();

    assert_eq!(
        canvas.hit_test(Point::new(12.0, 49.0)),
        Some(HitTarget::ResizeHandle {
            item: id("s"),
            anchor: Anchor::Sw,
        })
    );
    assert_eq!(canvas.hit_test(Point::new(30.0, 30.0)), Some(HitTarget::Item(id("s"))));
}

#[test]
fn test_unmounted_router_ignores_input() {
    let (mut canvas, log) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_snippet("s", "l1", rect(10.0, 10.0, 40.0, 40.0))
        .build();

    let p = Point::new(20.0, 20.0);
    assert_eq!(canvas.pointer_down(p, Modifiers::NONE), None);
    assert_eq!(canvas.pointer_move(p, Modifiers::NONE), None);
    assert_eq!(canvas.pointer_up(p, Modifiers::NONE), None);
    assert_eq!(canvas.double_click(p, Modifiers::NONE), None);
    assert_eq!(canvas.key_down(Key::Space), None);
    assert_eq!(canvas.key_up(Key::Escape), None);
    assert!(log.is_empty());
    assert!(canvas.input_state().is_ready());

    canvas.mount(MountPoint::new(0.0, 0.0));
    assert_eq!(
        canvas.pointer_down(p, Modifiers::NONE),
        Some(InputStateKind::MousedownOnItem)
    );
}

#[test]
fn test_escape_fires_on_key_up() {
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_snippet("s", "l1", rect(10.0, 10.0, 40.0, 40.0))
        .mounted_at(0.0, 0.0)
        .build();

    canvas.pointer_down(Point::new(20.0, 20.0), Modifiers::NONE);
    canvas.pointer_move(Point::new(60.0, 20.0), Modifiers::NONE);
    assert_eq!(canvas.key_down(Key::Escape), None);
    assert!(canvas.input_state().is_dragging_items());

    assert_eq!(canvas.key_up(Key::Escape), Some(InputStateKind::Ready));
    assert_eq!(canvas.item(&id("s")).unwrap().rect, rect(10.0, 10.0, 40.0, 40.0));
}

#[test]
fn test_other_keys_are_ignored() {
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_lane("l1")
        .mounted_at(0.0, 0.0)
        .build();
    assert_eq!(canvas.key_down(Key::Other), None);
    assert_eq!(canvas.key_up(Key::Other), None);
}

#[test]
fn test_space_keys_drive_pan() {
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_lane("l1")
        .mounted_at(0.0, 0.0)
        .build();

    assert_eq!(canvas.key_down(Key::Space), Some(InputStateKind::SpaceDown));
    assert_eq!(
        canvas.pointer_down(Point::new(10.0, 10.0), Modifiers::NONE),
        Some(InputStateKind::Pan)
    );
    canvas.pointer_move(Point::new(30.0, 10.0), Modifiers::NONE);
    assert_eq!(canvas.key_up(Key::Space), Some(InputStateKind::Ready));
    assert_eq!(canvas.item(&id("l1")).unwrap().pan_offset(), Point::new(20.0, 0.0));
}

#[test]
fn test_double_click_on_lane_requests_add() {
    let (mut canvas, log) = TestCanvasBuilder::new()
        .with_lane("l1")
        .mounted_at(100.0, 50.0)
        .build();

    assert_eq!(
        canvas.double_click(Point::new(150.0, 80.0), Modifiers::alt()),
        Some(InputStateKind::Ready)
    );
    assert_eq!(
        log.take(),
        vec![CanvasEvent::Add {
            kind: ItemKind::Block,
            position: Point::new(50.0, 30.0),
            lane_position: Point::new(50.0, 30.0),
            lane_id: id("l1"),
        }]
    );
}

#[test]
fn test_double_click_on_item_is_ignored() {
    let (mut canvas, log) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_snippet("s", "l1", rect(10.0, 10.0, 40.0, 40.0))
        .mounted_at(0.0, 0.0)
        .build();

    assert_eq!(
        canvas.double_click(Point::new(20.0, 20.0), Modifiers::NONE),
        Some(InputStateKind::Ready)
    );
    assert!(log.is_empty());
}

#[test]
fn test_items_outside_their_lane_window_are_not_hit() {
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_lane_height("l1", 100.0)
        .with_lane_height("l2", 100.0)
        .with_snippet("far", "l1", rect(0.0, 150.0, 40.0, 40.0))
        .build();

    // "far" projects into l2's band but l1's window hides it.
    assert_eq!(
        canvas.hit_test(Point::new(10.0, 160.0)),
        Some(HitTarget::Lane(id("l2")))
    );

    // Panning l1 up brings it into view.
    canvas.set_lane_pan(&id("l1"), Point::new(0.0, -100.0)).unwrap();
    assert_eq!(canvas.hit_test(Point::new(10.0, 60.0)), Some(HitTarget::Item(id("far"))));
}

#[test]
fn test_partly_visible_item_is_hit_only_inside_its_lane() {
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_lane_height("l1", 100.0)
        .with_lane_height("l2", 100.0)
        .with_snippet("edge", "l1", rect(0.0, 80.0, 40.0, 40.0))
        .build();
    canvas.select(&id("edge"), false).unwrap();

    assert_eq!(canvas.hit_test(Point::new(20.0, 90.0)), Some(HitTarget::Item(id("edge"))));
    assert_eq!(
        canvas.hit_test(Point::new(20.0, 110.0)),
        Some(HitTarget::Lane(id("l2")))
    );
    // The hidden south corners have no handles.
    assert_eq!(
        canvas.hit_test(Point::new(40.0, 120.0)),
        Some(HitTarget::Lane(id("l2")))
    );
}
