//! Unit tests for canvas options and runtime option patches.

use std::io::Write as _;

use crate::helpers::{TestCanvasBuilder, id, rect};
use swimlane_canvas::{CanvasError, CanvasOptions, CanvasOptionsPatch, LaneOptions};

#[test]
fn test_defaults() {
    let options = CanvasOptions::default();
    assert_eq!(options.styles.get("contain").map(String::as_str), Some("layout"));
    assert_eq!(options.lanes.default_height, 500.0);
    assert_eq!(options.lanes.window_padding, 20.0);
    assert_eq!(options.min_item_size, 10.0);
}

#[test]
fn test_partial_json_keeps_defaults() {
    let options = CanvasOptions::from_json_str(r#"{"lanes": {"defaultHeight": 300}}"#).unwrap();
    assert_eq!(options.lanes.default_height, 300.0);
    assert_eq!(options.lanes.min_height, 100.0);
    assert_eq!(options.resize_handle_size, 8.0);
}

#[test]
fn test_json_styles_get_contain_back() {
    let options = CanvasOptions::from_json_str(r#"{"styles": {"background": "white"}}"#).unwrap();
    assert_eq!(options.styles.len(), 2);
    assert_eq!(options.styles["contain"], "layout");
    assert_eq!(options.styles["background"], "white");
}

#[test]
fn test_malformed_json_is_an_error() {
    assert!(matches!(
        CanvasOptions::from_json_str("{not json"),
        Err(CanvasError::Json(_))
    ));
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("swimlane-options-{}.json", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"minItemSize": 24, "styles": {{"contain": "strict"}}}}"#).unwrap();
    }

    let options = CanvasOptions::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(options.min_item_size, 24.0);
    assert_eq!(options.styles["contain"], "strict");
}

#[test]
fn test_load_missing_file_is_io_error() {
    assert!(matches!(
        CanvasOptions::load("/definitely/not/here/options.json"),
        Err(CanvasError::Io(_))
    ));
}

#[test]
fn test_set_options_replaces_styles_and_keeps_contain() {
    let (mut canvas, _) = TestCanvasBuilder::new().with_lane("l1").build();
    canvas.set_options(CanvasOptionsPatch::styles([("cursor", "grab")]));

    let styles = &canvas.options().styles;
    assert_eq!(styles.len(), 2);
    assert_eq!(styles["cursor"], "grab");
    assert_eq!(styles["contain"], "layout");
    assert!(!styles.contains_key("overflow"));
}

#[test]
fn test_set_options_only_touches_named_fields() {
    let (mut canvas, _) = TestCanvasBuilder::new().with_lane("l1").build();
    let before = canvas.options().styles.clone();

    canvas.set_options(CanvasOptionsPatch {
        min_item_size: Some(40.0),
        ..CanvasOptionsPatch::default()
    });

    assert_eq!(canvas.options().min_item_size, 40.0);
    assert_eq!(canvas.options().styles, before);
}

#[test]
fn test_lane_options_drive_new_lanes() {
    let options = CanvasOptions {
        lanes: LaneOptions {
            default_height: 250.0,
            ..LaneOptions::default()
        },
        ..CanvasOptions::default()
    };
    let (canvas, _) = TestCanvasBuilder::new()
        .with_options(options)
        .with_lane("l1")
        .with_lane("l2")
        .with_snippet("s", "l2", rect(0.0, 0.0, 10.0, 10.0))
        .build();

    let l2 = canvas.item(&id("l2")).unwrap();
    assert_eq!(l2.rect.y, 250.0);
    assert_eq!(l2.rect.height, 250.0);
}
