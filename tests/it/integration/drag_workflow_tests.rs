//! Integration tests for complete drag gestures: press, move, drop.

use crate::helpers::{
    TestCanvasBuilder, assert_containment_consistent, id, item_rect, move_to, press_item, rect,
    release,
};
use swimlane_canvas::{CanvasEvent, CanvasEventKind, ContainerRef, DroppedItem, Point};

fn drops(events: Vec<CanvasEvent>) -> Vec<Vec<DroppedItem>> {
    events
        .into_iter()
        .filter_map(|event| match event {
            CanvasEvent::Drop { items } => Some(items),
            _ => None,
        })
        .collect()
}

#[test]
fn test_drag_across_lanes_rehomes_item() {
    let (mut canvas, log) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_lane("l2")
        .with_snippet("s", "l1", rect(10.0, 10.0, 50.0, 50.0))
        .build();

    press_item(&mut canvas, "s", 20.0, 20.0);
    move_to(&mut canvas, 20.0, 620.0);
    release(&mut canvas, 20.0, 620.0);

    assert_eq!(
        drops(log.take()),
        vec![vec![DroppedItem {
            id: id("s"),
            lane_id: Some(id("l2")),
            position: Point::new(10.0, 110.0),
        }]]
    );
    let s = canvas.item(&id("s")).unwrap();
    assert_eq!(s.lane_id, Some(id("l2")));
    assert_eq!(s.container(), Some(&ContainerRef::Lane(id("l2"))));
    assert!(canvas.lane_children(&id("l1")).unwrap().is_empty());
    assert_containment_consistent(&canvas);
}

#[test]
fn test_drag_into_panned_lane_uses_its_local_space() {
    let (mut canvas, log) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_lane("l2")
        .with_snippet("s", "l1", rect(10.0, 10.0, 50.0, 50.0))
        .build();
    canvas.set_lane_pan(&id("l2"), Point::new(-100.0, 30.0)).unwrap();

    press_item(&mut canvas, "s", 20.0, 20.0);
    move_to(&mut canvas, 20.0, 620.0);
    release(&mut canvas, 20.0, 620.0);

    // Canvas origin (10, 610) seen from l2: x + 100, y - 500 - 30.
    assert_eq!(item_rect(&canvas, "s"), rect(110.0, 80.0, 50.0, 50.0));
    assert_eq!(canvas.item_canvas_rect(&id("s")).unwrap(), rect(10.0, 610.0, 50.0, 50.0));
    assert!(log.contains_kind(CanvasEventKind::Drop));
}

#[test]
fn test_drag_within_lane_keeps_container() {
    let (mut canvas, log) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_lane("l2")
        .with_snippet("s", "l1", rect(10.0, 10.0, 50.0, 50.0))
        .build();

    press_item(&mut canvas, "s", 20.0, 20.0);
    move_to(&mut canvas, 70.0, 120.0);
    release(&mut canvas, 70.0, 120.0);

    assert_eq!(
        drops(log.take()),
        vec![vec![DroppedItem {
            id: id("s"),
            lane_id: Some(id("l1")),
            position: Point::new(60.0, 110.0),
        }]]
    );
}

#[test]
fn test_drag_past_last_lane_keeps_lane() {
    let (mut canvas, log) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_snippet("s", "l1", rect(10.0, 10.0, 50.0, 50.0))
        .build();

    press_item(&mut canvas, "s", 20.0, 20.0);
    move_to(&mut canvas, 20.0, 1020.0);
    release(&mut canvas, 20.0, 1020.0);

    let dropped = drops(log.take());
    assert_eq!(dropped[0][0].lane_id, Some(id("l1")));
    assert_eq!(dropped[0][0].position, Point::new(10.0, 1010.0));
}

#[test]
fn test_block_drag_carries_children() {
    let (mut canvas, log) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_lane("l2")
        .with_block("b", "l1", rect(0.0, 0.0, 100.0, 100.0))
        .with_nested("n", "l1", "b", rect(10.0, 10.0, 20.0, 20.0))
        .build();

    press_item(&mut canvas, "b", 50.0, 50.0);
    move_to(&mut canvas, 50.0, 650.0);
    release(&mut canvas, 50.0, 650.0);

    assert_eq!(
        drops(log.take()),
        vec![vec![
            DroppedItem {
                id: id("b"),
                lane_id: Some(id("l2")),
                position: Point::new(0.0, 100.0),
            },
            DroppedItem {
                id: id("n"),
                lane_id: Some(id("l2")),
                position: Point::new(10.0, 110.0),
            },
        ]]
    );
    let n = canvas.item(&id("n")).unwrap();
    assert_eq!(n.parent_id(), Some(&id("b")));
    assert_containment_consistent(&canvas);
}

#[test]
fn test_nested_item_drag_stays_in_block() {
    let (mut canvas, log) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_lane("l2")
        .with_block("b", "l1", rect(0.0, 0.0, 100.0, 100.0))
        .with_nested("n", "l1", "b", rect(10.0, 10.0, 20.0, 20.0))
        .build();

    press_item(&mut canvas, "n", 15.0, 15.0);
    move_to(&mut canvas, 15.0, 615.0);
    release(&mut canvas, 15.0, 615.0);

    let n = canvas.item(&id("n")).unwrap();
    assert_eq!(n.parent_id(), Some(&id("b")));
    assert_eq!(n.lane_id, Some(id("l1")));
    assert_eq!(item_rect(&canvas, "b"), rect(0.0, 0.0, 100.0, 100.0));
    assert_eq!(drops(log.take())[0].len(), 1);
}

#[test]
fn test_multi_selection_drag_reports_every_item() {
    let (mut canvas, log) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_lane("l2")
        .with_snippet("a", "l1", rect(0.0, 0.0, 20.0, 20.0))
        .with_snippet("b", "l1", rect(0.0, 400.0, 20.0, 20.0))
        .build();
    canvas.select(&id("a"), true).unwrap();
    canvas.select(&id("b"), true).unwrap();

    press_item(&mut canvas, "a", 5.0, 5.0);
    move_to(&mut canvas, 5.0, 205.0);
    release(&mut canvas, 5.0, 205.0);

    let dropped = &drops(log.take())[0];
    assert_eq!(dropped.len(), 2);
    // a lands at 200 in l1; b crosses into l2.
    assert_eq!(dropped[0].lane_id, Some(id("l1")));
    assert_eq!(dropped[0].position, Point::new(0.0, 200.0));
    assert_eq!(dropped[1].lane_id, Some(id("l2")));
    assert_eq!(dropped[1].position, Point::new(0.0, 100.0));
    assert_containment_consistent(&canvas);
}

#[test]
fn test_drag_updates_hit_testing() {
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_snippet("s", "l1", rect(0.0, 0.0, 20.0, 20.0))
        .build();
    assert_eq!(
        canvas.hit_test(Point::new(105.0, 5.0)),
        Some(swimlane_canvas::input::HitTarget::Lane(id("l1")))
    );

    press_item(&mut canvas, "s", 5.0, 5.0);
    move_to(&mut canvas, 105.0, 5.0);
    release(&mut canvas, 105.0, 5.0);

    assert_eq!(
        canvas.hit_test(Point::new(105.0, 5.0)),
        Some(swimlane_canvas::input::HitTarget::Item(id("s")))
    );
}
