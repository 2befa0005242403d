//! Snapshot tests for the JSON shape of emitted events and input events.

use crate::helpers::{TestCanvasBuilder, id, press_item, rect, release};
use swimlane_canvas::{CanvasEvent, InputEvent, InputStateKind};

#[test]
fn test_click_event_stream() {
    let (mut canvas, log) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_snippet("a", "l1", rect(0.0, 0.0, 20.0, 20.0))
        .with_snippet("b", "l1", rect(50.0, 0.0, 20.0, 20.0))
        .build();
    canvas.select(&id("a"), false).unwrap();

    press_item(&mut canvas, "b", 55.0, 5.0);
    release(&mut canvas, 55.0, 5.0);

    insta::assert_json_snapshot!(log.take(), @r###"
    [
      {
        "event": "select",
        "id": "a"
      },
      {
        "event": "deselect",
        "ids": [
          "a"
        ]
      },
      {
        "event": "select",
        "id": "b"
      }
    ]
    "###);
}

#[test]
fn test_cascade_delete_event_stream() {
    let (mut canvas, log) = TestCanvasBuilder::new()
        .with_lane("l1")
        .with_block("blk", "l1", rect(0.0, 0.0, 100.0, 100.0))
        .with_nested("inner", "l1", "blk", rect(10.0, 10.0, 20.0, 20.0))
        .build();
    canvas.select(&id("inner"), false).unwrap();
    log.clear();

    canvas.delete_item(&id("blk")).unwrap();

    insta::assert_json_snapshot!(log.take(), @r###"
    [
      {
        "event": "deselect",
        "ids": [
          "inner"
        ]
      },
      {
        "event": "delete",
        "id": "inner"
      },
      {
        "event": "delete",
        "id": "blk"
      }
    ]
    "###);
}

#[test]
fn test_input_events_parse_from_host_json() {
    let events: Vec<InputEvent> = serde_json::from_str(
        r#"[
            {"type": "spacedown"},
            {"type": "mousedown:lane", "lane": "l1", "pointer": {"position": {"x": 5, "y": 5}}},
            {"type": "mousemove", "pointer": {"position": {"x": 25, "y": 5}}},
            {"type": "mouseup", "pointer": {"position": {"x": 25, "y": 5}}},
            {"type": "spaceup"}
        ]"#,
    )
    .unwrap();

    let names: Vec<&str> = events.iter().map(InputEvent::name).collect();
    insta::assert_json_snapshot!(names, @r###"
    [
      "spacedown",
      "mousedown:lane",
      "mousemove",
      "mouseup",
      "spaceup"
    ]
    "###);

    let (mut canvas, _) = TestCanvasBuilder::new().with_lane("l1").build();
    let states: Vec<String> = events
        .into_iter()
        .map(|event| canvas.send(event).to_string())
        .collect();
    assert_eq!(states, ["space-down", "pan", "pan", "ready", "ready"]);
    assert_eq!(canvas.input_state().kind(), InputStateKind::Ready);
}

#[test]
fn test_add_event_keys() {
    let event = CanvasEvent::Add {
        kind: swimlane_canvas::ItemKind::Block,
        position: swimlane_canvas::Point::new(1.0, 2.0),
        lane_position: swimlane_canvas::Point::new(1.0, 2.0),
        lane_id: id("l1"),
    };
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["event"], "add");
    assert_eq!(value["type"], "block");
    assert_eq!(value["laneId"], "l1");
    assert_eq!(value["lanePosition"], serde_json::json!({"x": 1.0, "y": 2.0}));
}
