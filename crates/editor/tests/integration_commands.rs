//! Integration tests for the EditorCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use vcad_editor_lib::command::{execute_json, execute_json_batch};
use vcad_editor_lib::harness::TestHarness;

const FRONT_CAMERA: &str =
    r#"{"command": "set_camera", "position": [0, 0.75, 20], "target": [0, 0.75, 0]}"#;

#[test]
fn test_command_spawn() {
    let mut h = TestHarness::new();

    let resp = execute_json(&mut h, r#"{"command": "spawn", "primitive": "box"}"#).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.as_ref().unwrap()["id"], 1);
    assert_eq!(h.object_count(), 1);
}

#[test]
fn test_command_inspect() {
    let mut h = TestHarness::new();
    h.spawn_box();
    h.spawn_sphere();

    let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
    assert!(resp.success);
    let data = resp.data.unwrap();
    assert_eq!(data["object_count"], 2);
    assert_eq!(data["active"], 2);
    assert_eq!(data["can_undo"], true);
    assert_eq!(data["frame"], "world");

    let objects = data["objects"].as_array().unwrap();
    assert_eq!(objects[0]["primitive"], "box");
    assert_eq!(objects[0]["vertex_count"], 24);
    assert_eq!(objects[1]["primitive"], "sphere");
}

#[test]
fn test_command_vertex_drag_workflow_via_json_batch() {
    let mut h = TestHarness::new();

    let json = format!(
        r#"[
        {{"command": "spawn", "primitive": "box"}},
        {FRONT_CAMERA},
        {{"command": "set_mode", "mode": "select"}},
        {{"command": "pick", "vertex": 0}},
        {{"command": "drag", "handle": {{"handle": "axis", "axis": "y"}}, "offsets": [[0, 0.25, 0], [0.4, 0.5, 0]]}},
        {{"command": "history"}}
    ]"#
    );

    let responses = execute_json_batch(&mut h, &json).unwrap();
    assert_eq!(responses.len(), 6);
    for resp in &responses {
        assert!(resp.success, "Failed: {:?}", resp.error);
    }

    let pick = responses[3].data.as_ref().unwrap();
    assert_eq!(pick["indices"].as_array().unwrap().len(), 3);
    assert_eq!(responses[4].data.as_ref().unwrap()["committed"], true);

    let history = responses[5].data.as_ref().unwrap();
    let undo = history["undo"].as_array().unwrap();
    assert_eq!(undo.len(), 2);
    assert_eq!(undo[0]["kind"], "add");
    assert_eq!(undo[1]["kind"], "sub_edit");
    let dy = undo[1]["delta"][1].as_f64().unwrap();
    assert!((dy - 0.5).abs() < 1e-9);
}

#[test]
fn test_command_stepwise_drag_and_undo() {
    let mut h = TestHarness::new();
    let id = h.spawn_box();
    let before = h.positions(id);

    let json = format!(
        r#"[
        {FRONT_CAMERA},
        {{"command": "set_mode", "mode": "select"}},
        {{"command": "pick", "vertex": 0}},
        {{"command": "begin_drag", "handle": {{"handle": "free"}}, "point": [-0.75, 0, 0.75]}},
        {{"command": "update_drag", "point": [-0.15, 0.8, 0.75]}},
        {{"command": "end_drag"}},
        {{"command": "undo"}}
    ]"#
    );

    let responses = execute_json_batch(&mut h, &json).unwrap();
    assert_eq!(responses[3].data.as_ref().unwrap()["started"], true);
    let distance = responses[4].data.as_ref().unwrap()["distance"].as_f64().unwrap();
    assert!((distance - 1.0).abs() < 1e-9);
    assert_eq!(responses[5].data.as_ref().unwrap()["committed"], true);
    assert_eq!(responses[6].data.as_ref().unwrap()["undone"], true);

    for (p, q) in h.positions(id).iter().zip(&before) {
        assert!((*p - *q).length() < 1e-12);
    }
}

#[test]
fn test_command_explode_pick() {
    let mut h = TestHarness::new();

    let json = r#"[
        {"command": "spawn", "primitive": "box"},
        {"command": "set_mode", "mode": "select"},
        {"command": "set_explode", "enabled": true},
        {"command": "pick", "vertex": 4}
    ]"#;

    let responses = execute_json_batch(&mut h, json).unwrap();
    let pick = responses[3].data.as_ref().unwrap();
    assert_eq!(pick["indices"], serde_json::json!([4]));
}

#[test]
fn test_command_pick_outside_select_mode_is_ignored() {
    let mut h = TestHarness::new();
    h.spawn_box();

    let resp = execute_json(&mut h, r#"{"command": "pick", "vertex": 0}"#).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.as_ref().unwrap()["changed"], false);
    assert_eq!(resp.data.as_ref().unwrap()["selected"], 0);
}

#[test]
fn test_command_gizmo() {
    let mut h = TestHarness::new();

    let resp = execute_json(&mut h, r#"{"command": "gizmo"}"#).unwrap();
    assert_eq!(resp.data.as_ref().unwrap()["visible"], false);

    h.spawn_box();
    execute_json(&mut h, r#"{"command": "set_mode", "mode": "rotate"}"#).unwrap();
    let resp = execute_json(&mut h, r#"{"command": "gizmo"}"#).unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data["visible"], true);
    assert_eq!(data["draggable"], false);
    assert_eq!(data["handles"].as_array().unwrap().len(), 3);
    assert_eq!(data["handles"][0]["handle"], "ring");
}

#[test]
fn test_command_set_transform_and_undo() {
    let mut h = TestHarness::new();
    let id = h.spawn_box();

    let json = r#"[
        {"command": "set_transform", "values": [1, 2, 3]},
        {"command": "set_transform", "values": [1, 2, 3]},
        {"command": "undo"},
        {"command": "redo"},
        {"command": "redo"}
    ]"#;

    let responses = execute_json_batch(&mut h, json).unwrap();
    assert_eq!(responses[0].data.as_ref().unwrap()["changed"], true);
    assert_eq!(responses[1].data.as_ref().unwrap()["changed"], false);
    assert_eq!(responses[3].data.as_ref().unwrap()["redone"], true);
    assert_eq!(responses[4].data.as_ref().unwrap()["redone"], false);
    assert_eq!(h.object_position(id), Some(glam::DVec3::new(1.0, 2.0, 3.0)));
}

#[test]
fn test_command_delete_and_select_errors() {
    let mut h = TestHarness::new();

    let resp = execute_json(&mut h, r#"{"command": "delete_active"}"#).unwrap();
    assert_eq!(resp.data.as_ref().unwrap()["deleted"], false);

    let resp = execute_json(&mut h, r#"{"command": "select_object", "id": 42}"#).unwrap();
    assert!(!resp.success);
    assert!(resp.error.unwrap().contains("42"));

    let resp = execute_json(
        &mut h,
        r#"{"command": "set_camera", "position": [1, 1, 1], "target": [1, 1, 1]}"#,
    )
    .unwrap();
    assert!(!resp.success);
}

#[test]
fn test_command_reset() {
    let mut h = TestHarness::new();
    h.spawn_box();

    let resp = execute_json(&mut h, r#"{"command": "reset"}"#).unwrap();
    assert!(resp.success);
    assert_eq!(h.object_count(), 0);
    assert_eq!(h.undo_count(), 0);
}

#[test]
fn test_command_invalid_json() {
    let mut h = TestHarness::new();

    let result = execute_json(&mut h, "not json");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("Invalid command JSON"));

    let result = execute_json(&mut h, r#"{"command": "teleport"}"#);
    assert!(result.is_err());

    let result = execute_json_batch(&mut h, r#"{"command": "undo"}"#);
    assert!(result.unwrap_err().contains("Invalid commands JSON"));
}

#[test]
fn test_command_orbit_camera_and_handle_at() {
    let mut h = TestHarness::new();
    h.spawn_box();

    let json = r#"[
        {"command": "orbit_camera", "yaw": 0, "pitch": 0, "distance": 20, "target": [0, 0.75, 0]},
        {"command": "handle_at", "point": [1.2, 0.75, 0]},
        {"command": "handle_at", "point": [0, 0.75, 0]},
        {"command": "handle_at", "point": [5, 5, 0]}
    ]"#;

    let responses = execute_json_batch(&mut h, json).unwrap();
    let camera = responses[0].data.as_ref().unwrap();
    assert!((camera["direction"][2].as_f64().unwrap() + 1.0).abs() < 1e-12);
    assert_eq!(
        responses[1].data.as_ref().unwrap()["handle"],
        serde_json::json!({"handle": "axis", "axis": "x"})
    );
    assert_eq!(
        responses[2].data.as_ref().unwrap()["handle"],
        serde_json::json!({"handle": "free"})
    );
    assert!(responses[3].data.as_ref().unwrap()["handle"].is_null());
}
