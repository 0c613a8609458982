//! The async two-phase providers: module-load gating, dependent
//! children, and the teardown-then-republish dataset cycle.

use mapsync_runtime::provider::ProviderPhase;
use mapsync_runtime::scene::OverlayDef;
use mapsync_test::helpers::{counting_callback, ready_scene};
use mapsync_test::{EngineCall, RecordingEngine};
use mapsync_shared::{OptionMap, OptionValue, OverlayKind};

fn path_view_options(track: &[[f64; 2]]) -> OptionMap {
    let points = track
        .iter()
        .map(|point| OptionValue::tuple(&point[..]))
        .collect();
    OptionMap::new().with("data", OptionValue::seq(points))
}

const TRACK: &[[f64; 2]] = &[[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]];

#[test]
fn provider_publishes_only_after_its_module_resolves() {
    let mut engine = RecordingEngine::new();
    let (mut runtime, scene) = ready_scene(&mut engine);

    let def = OverlayDef::new(OverlayKind::PathView).options(path_view_options(TRACK));
    let node = runtime.add_overlay(&mut engine, scene, def).unwrap();

    assert!(engine
        .calls()
        .iter()
        .any(|call| matches!(call, EngineCall::ModuleLoad { module } if module == "ui/path-view")));
    assert_eq!(runtime.provider_phase(scene, node), Some(ProviderPhase::Loading));
    assert!(runtime.node_host(scene, node).is_none());

    runtime.module_loaded(&mut engine, "ui/path-view").unwrap();
    assert_eq!(runtime.provider_phase(scene, node), Some(ProviderPhase::Ready));
    assert!(runtime.node_host(scene, node).is_some());
}

#[test]
fn dependent_child_waits_for_publication_then_attaches_to_the_provider() {
    let mut engine = RecordingEngine::new();
    let (mut runtime, scene) = ready_scene(&mut engine);

    let provider = runtime
        .add_overlay(
            &mut engine,
            scene,
            OverlayDef::new(OverlayKind::PathView).options(path_view_options(TRACK)),
        )
        .unwrap();
    let (callback, completed) = counting_callback();
    let child = runtime
        .add_overlay(
            &mut engine,
            scene,
            OverlayDef::new(OverlayKind::PathNavigator)
                .child_of(provider)
                .on("on_complete", callback),
        )
        .unwrap();
    assert!(runtime.node_host(scene, child).is_none());
    assert_eq!(completed.get(), 0);

    runtime.module_loaded(&mut engine, "ui/path-view").unwrap();

    let provider_host = runtime.node_host(scene, provider).unwrap();
    let child_host = runtime.node_host(scene, child).unwrap();
    assert!(engine.calls().iter().any(|call| matches!(
        call,
        EngineCall::CreateChildHost { host, parent, .. }
            if *host == child_host && *parent == provider_host
    )));
    assert_eq!(completed.get(), 1);
}

#[test]
fn dataset_change_tears_down_and_republishes_at_the_next_generation() {
    let mut engine = RecordingEngine::new();
    let (mut runtime, scene) = ready_scene(&mut engine);

    let provider = runtime
        .add_overlay(
            &mut engine,
            scene,
            OverlayDef::new(OverlayKind::PathView).options(path_view_options(TRACK)),
        )
        .unwrap();
    let child = runtime
        .add_overlay(
            &mut engine,
            scene,
            OverlayDef::new(OverlayKind::PathNavigator).child_of(provider),
        )
        .unwrap();
    runtime.module_loaded(&mut engine, "ui/path-view").unwrap();
    let old_host = runtime.node_host(scene, provider).unwrap();
    let old_child_host = runtime.node_host(scene, child).unwrap();

    runtime
        .update_overlay(
            &mut engine,
            scene,
            provider,
            path_view_options(&[[5.0, 5.0], [6.0, 6.0]]),
            Vec::new(),
        )
        .unwrap();
    assert_eq!(
        runtime.provider_phase(scene, provider),
        Some(ProviderPhase::TearingDown)
    );
    assert_eq!(runtime.provider_generation(scene, provider), Some(1));
    assert!(runtime.node_host(scene, provider).is_none());
    assert!(runtime.node_host(scene, child).is_none());

    runtime.advance(&mut engine).unwrap();
    assert_eq!(
        runtime.provider_phase(scene, provider),
        Some(ProviderPhase::Ready)
    );
    let new_host = runtime.node_host(scene, provider).unwrap();
    let new_child_host = runtime.node_host(scene, child).unwrap();
    assert_ne!(new_host, old_host);
    assert_ne!(new_child_host, old_child_host);
}

#[test]
fn non_dataset_change_patches_in_place() {
    let mut engine = RecordingEngine::new();
    let (mut runtime, scene) = ready_scene(&mut engine);

    let provider = runtime
        .add_overlay(
            &mut engine,
            scene,
            OverlayDef::new(OverlayKind::PathView).options(path_view_options(TRACK)),
        )
        .unwrap();
    runtime.module_loaded(&mut engine, "ui/path-view").unwrap();
    let host = runtime.node_host(scene, provider).unwrap();

    // Same dataset from fresh instances, new stacking order.
    let next = path_view_options(TRACK).with("z_index", OptionValue::Number(40.0));
    runtime
        .update_overlay(&mut engine, scene, provider, next, Vec::new())
        .unwrap();

    assert_eq!(
        runtime.provider_phase(scene, provider),
        Some(ProviderPhase::Ready)
    );
    assert_eq!(runtime.provider_generation(scene, provider), Some(0));
    assert_eq!(engine.destroy_host_count(), 0);
    let calls = engine.setter_calls(host);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "set_z_index_of_path");
}

#[test]
fn navigator_cannot_stand_alone() {
    let mut engine = RecordingEngine::new();
    let (mut runtime, scene) = ready_scene(&mut engine);

    let result = runtime.add_overlay(
        &mut engine,
        scene,
        OverlayDef::new(OverlayKind::PathNavigator),
    );
    let error = result.err().unwrap();
    assert!(error
        .to_string()
        .contains("must be a child component of PathView"));
}

#[test]
fn removing_a_provider_removes_its_dependents_first() {
    let mut engine = RecordingEngine::new();
    let (mut runtime, scene) = ready_scene(&mut engine);

    let provider = runtime
        .add_overlay(
            &mut engine,
            scene,
            OverlayDef::new(OverlayKind::PathView).options(path_view_options(TRACK)),
        )
        .unwrap();
    let child = runtime
        .add_overlay(
            &mut engine,
            scene,
            OverlayDef::new(OverlayKind::PathNavigator).child_of(provider),
        )
        .unwrap();
    runtime.module_loaded(&mut engine, "ui/path-view").unwrap();
    let provider_host = runtime.node_host(scene, provider).unwrap();
    let child_host = runtime.node_host(scene, child).unwrap();

    runtime.remove_overlay(&mut engine, scene, provider).unwrap();

    let destroys: Vec<_> = engine
        .calls()
        .iter()
        .filter_map(|call| match call {
            EngineCall::DestroyHost(host) => Some(*host),
            _ => None,
        })
        .collect();
    assert_eq!(destroys, vec![child_host, provider_host]);
}
