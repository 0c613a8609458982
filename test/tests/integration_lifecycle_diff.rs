//! Field-diff updates: value-identical configs issue no engine calls,
//! explicit nulls clear, visibility transitions gate show/hide, and the
//! bulk update style collapses to one master call.

use mapsync_runtime::scene::OverlayDef;
use mapsync_test::helpers::{marker_def, marker_options, ready_scene};
use mapsync_test::RecordingEngine;
use mapsync_shared::{OptionMap, OptionValue, OverlayKind};

#[test]
fn value_identical_update_issues_no_setters() {
    let mut engine = RecordingEngine::new();
    let (mut runtime, scene) = ready_scene(&mut engine);
    let node = runtime
        .add_overlay(&mut engine, scene, marker_def(1.0, 2.0))
        .unwrap();
    let host = runtime.node_host(scene, node).unwrap();

    // Same position, freshly allocated.
    runtime
        .update_overlay(&mut engine, scene, node, marker_options(1.0, 2.0), Vec::new())
        .unwrap();
    assert!(engine.setter_calls(host).is_empty());
}

#[test]
fn changed_field_issues_exactly_one_coerced_setter() {
    let mut engine = RecordingEngine::new();
    let (mut runtime, scene) = ready_scene(&mut engine);
    let node = runtime
        .add_overlay(&mut engine, scene, marker_def(1.0, 2.0))
        .unwrap();
    let host = runtime.node_host(scene, node).unwrap();

    runtime
        .update_overlay(&mut engine, scene, node, marker_options(3.0, 4.0), Vec::new())
        .unwrap();

    let calls = engine.setter_calls(host);
    assert_eq!(calls.len(), 1);
    let (setter, value) = &calls[0];
    assert_eq!(setter, "set_position");
    let OptionValue::Engine(position) = value else {
        panic!("position should reach the engine coerced");
    };
    assert_eq!(position.field("lng"), Some(3.0));
    assert_eq!(position.field("lat"), Some(4.0));
}

#[test]
fn marker_without_offset_receives_the_default_anchor_correction() {
    let mut engine = RecordingEngine::new();
    let (mut runtime, scene) = ready_scene(&mut engine);
    let node = runtime
        .add_overlay(&mut engine, scene, marker_def(1.0, 2.0))
        .unwrap();
    let host = runtime.node_host(scene, node).unwrap();

    let offset = engine
        .host_options(host)
        .and_then(|bag| bag.get("offset").cloned());
    let Some(OptionValue::Engine(offset)) = offset else {
        panic!("absent offset should reach the engine as the default pixel correction");
    };
    assert_eq!(offset.field("x"), Some(-10.0));
    assert_eq!(offset.field("y"), Some(-34.0));
}

#[test]
fn explicit_null_clears_but_omission_preserves() {
    let mut engine = RecordingEngine::new();
    let (mut runtime, scene) = ready_scene(&mut engine);
    let node = runtime
        .add_overlay(&mut engine, scene, marker_def(1.0, 2.0))
        .unwrap();
    let host = runtime.node_host(scene, node).unwrap();

    // Omitting the field entirely touches nothing.
    runtime
        .update_overlay(&mut engine, scene, node, OptionMap::new(), Vec::new())
        .unwrap();
    assert!(engine.setter_calls(host).is_empty());

    let cleared = OptionMap::new().with("position", OptionValue::Null);
    runtime
        .update_overlay(&mut engine, scene, node, cleared, Vec::new())
        .unwrap();
    let calls = engine.setter_calls(host);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "set_position");
    assert!(calls[0].1.is_null());
}

#[test]
fn only_visibility_transitions_reach_the_engine() {
    let mut engine = RecordingEngine::new();
    let (mut runtime, scene) = ready_scene(&mut engine);
    let node = runtime
        .add_overlay(&mut engine, scene, marker_def(1.0, 2.0))
        .unwrap();
    let host = runtime.node_host(scene, node).unwrap();

    // Absent counts as visible; the construct issued no hide.
    assert_eq!(engine.hide_count(host), 0);

    let hidden = marker_options(1.0, 2.0).with("visible", OptionValue::Bool(false));
    runtime
        .update_overlay(&mut engine, scene, node, hidden.clone(), Vec::new())
        .unwrap();
    assert_eq!(engine.hide_count(host), 1);
    assert_eq!(engine.show_count(host), 0);

    // Repeating the same visibility is not a transition.
    runtime
        .update_overlay(&mut engine, scene, node, hidden, Vec::new())
        .unwrap();
    assert_eq!(engine.hide_count(host), 1);

    let shown = marker_options(1.0, 2.0).with("visible", OptionValue::Bool(true));
    runtime
        .update_overlay(&mut engine, scene, node, shown, Vec::new())
        .unwrap();
    assert_eq!(engine.show_count(host), 1);
}

#[test]
fn hidden_at_construction_issues_one_hide() {
    let mut engine = RecordingEngine::new();
    let (mut runtime, scene) = ready_scene(&mut engine);
    let def = OverlayDef::new(OverlayKind::Marker)
        .options(marker_options(1.0, 2.0).with("visible", OptionValue::Bool(false)));
    let node = runtime.add_overlay(&mut engine, scene, def).unwrap();
    let host = runtime.node_host(scene, node).unwrap();
    assert_eq!(engine.hide_count(host), 1);
}

fn polygon_options(path: &[[f64; 2]]) -> OptionMap {
    let points = path
        .iter()
        .map(|point| OptionValue::tuple(&point[..]))
        .collect();
    OptionMap::new().with("path", OptionValue::seq(points))
}

#[test]
fn bulk_style_reissues_only_on_value_change() {
    let mut engine = RecordingEngine::new();
    let (mut runtime, scene) = ready_scene(&mut engine);
    let def = OverlayDef::new(OverlayKind::Polygon)
        .options(polygon_options(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]));
    let node = runtime.add_overlay(&mut engine, scene, def).unwrap();
    let host = runtime.node_host(scene, node).unwrap();
    assert_eq!(engine.set_all_options_count(host), 0);

    // Identical bag from fresh instances.
    runtime
        .update_overlay(
            &mut engine,
            scene,
            node,
            polygon_options(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]),
            Vec::new(),
        )
        .unwrap();
    assert_eq!(engine.set_all_options_count(host), 0);

    runtime
        .update_overlay(
            &mut engine,
            scene,
            node,
            polygon_options(&[[0.0, 0.0], [2.0, 0.0], [1.0, 1.0]]),
            Vec::new(),
        )
        .unwrap();
    assert_eq!(engine.set_all_options_count(host), 1);
}

#[test]
fn visibility_toggle_never_reissues_the_bulk_call() {
    let mut engine = RecordingEngine::new();
    let (mut runtime, scene) = ready_scene(&mut engine);
    let path = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];
    let def = OverlayDef::new(OverlayKind::Polygon).options(polygon_options(&path));
    let node = runtime.add_overlay(&mut engine, scene, def).unwrap();
    let host = runtime.node_host(scene, node).unwrap();

    let hidden = polygon_options(&path).with("visible", OptionValue::Bool(false));
    runtime
        .update_overlay(&mut engine, scene, node, hidden, Vec::new())
        .unwrap();
    assert_eq!(engine.hide_count(host), 1);
    assert_eq!(engine.set_all_options_count(host), 0);
}

#[test]
fn rejected_setter_surfaces_as_an_error() {
    let mut engine = RecordingEngine::new();
    engine.reject_setter("set_angle");
    let (mut runtime, scene) = ready_scene(&mut engine);
    let node = runtime
        .add_overlay(&mut engine, scene, marker_def(1.0, 2.0))
        .unwrap();

    let next = marker_options(1.0, 2.0).with("angle", OptionValue::Number(45.0));
    let result = runtime.update_overlay(&mut engine, scene, node, next, Vec::new());
    assert!(result.is_err());
}
