use std::collections::HashMap;

use log::warn;

use mapsync_shared::{engine_locator, EngineApi, EngineEvent, HostId, OptionMap, ResourceKind};

use crate::bootstrap::{BootstrapState, ResourceLoadError, ResourceLoadState};
use crate::events::OverlayCallback;
use crate::provider::{DataGeneration, ProviderPhase};
use crate::scope::{ScopeHandle, SurfaceSettings};

use super::{NodeId, OverlayDef, Scene, SceneError, SceneId};

/// The embedder-facing entry point. Owns every mounted scene plus the
/// process-wide engine-load guard, and translates the engine's async
/// completions (`resource_loaded`, `module_loaded`, `dispatch_event`)
/// into scene transitions.
///
/// All methods run to completion on the caller's thread; the embedder
/// drives progress by feeding completions in and calling `advance`
/// once per cycle.
pub struct Runtime {
    load_state: ResourceLoadState,
    scenes: HashMap<SceneId, Scene>,
    order: Vec<SceneId>,
    next_scene: u64,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            load_state: ResourceLoadState::new(),
            scenes: HashMap::new(),
            order: Vec::new(),
            next_scene: 1,
        }
    }

    pub fn load_state(&self) -> &ResourceLoadState {
        &self.load_state
    }

    /// Mount a new scope. Issues the one engine load if nobody has yet;
    /// scopes mounting while it is in flight subscribe to the same
    /// pending load and issue nothing.
    pub fn mount_scene(
        &mut self,
        engine: &mut dyn EngineApi,
        settings: SurfaceSettings,
    ) -> SceneId {
        let id = SceneId::new(self.next_scene);
        self.next_scene += 1;
        let mut scene = Scene::new(id, settings);

        if let Some(failure) = self.load_state.failure() {
            scene.fail(failure.clone());
        } else if self.load_state.engine_ready() {
            scene.begin_extension_loads(engine);
        } else {
            scene.begin_engine_load();
            if self.load_state.install_pending(id) {
                let settings = scene.settings();
                engine.begin_resource_load(
                    ResourceKind::EngineCore,
                    &engine_locator(
                        settings.protocol,
                        &settings.engine_version,
                        &settings.credential_key,
                    ),
                );
            } else if let Some(pending) = self.load_state.pending() {
                pending.subscribe(id);
            }
        }

        self.scenes.insert(id, scene);
        self.order.push(id);
        id
    }

    /// An external resource finished loading.
    pub fn resource_loaded(
        &mut self,
        engine: &mut dyn EngineApi,
        kind: ResourceKind,
    ) -> Result<(), SceneError> {
        match kind {
            ResourceKind::EngineCore => {
                self.load_state.mark_engine_ready();
                let subscribers = self
                    .load_state
                    .take_pending()
                    .map(|mut pending| pending.take_subscribers())
                    .unwrap_or_default();
                for id in subscribers {
                    if let Some(scene) = self.scenes.get_mut(&id) {
                        scene.begin_extension_loads(engine);
                    }
                }
                Ok(())
            }
            ResourceKind::UiExtension | ResourceKind::DataVisExtension => {
                for id in self.order.clone() {
                    if let Some(scene) = self.scenes.get_mut(&id) {
                        scene.resource_ready(engine, kind)?;
                    }
                }
                Ok(())
            }
        }
    }

    /// A resource load errored. Every scene still booting is failed;
    /// the failure sticks and fails later mounts immediately.
    pub fn resource_failed(&mut self, kind: ResourceKind, reason: &str) {
        let error = ResourceLoadError::new(kind, reason);
        self.load_state.record_failure(error.clone());
        self.load_state.take_pending();
        for scene in self.scenes.values_mut() {
            if !scene.is_ready() {
                scene.fail(error.clone());
            }
        }
    }

    /// An extension-hosted overlay module finished loading.
    pub fn module_loaded(
        &mut self,
        engine: &mut dyn EngineApi,
        module: &str,
    ) -> Result<(), SceneError> {
        for id in self.order.clone() {
            if let Some(scene) = self.scenes.get_mut(&id) {
                scene.module_loaded(engine, module)?;
            }
        }
        Ok(())
    }

    /// Complete any provider rebuild cycles left pending by updates.
    pub fn advance(&mut self, engine: &mut dyn EngineApi) -> Result<(), SceneError> {
        for id in self.order.clone() {
            if let Some(scene) = self.scenes.get_mut(&id) {
                scene.advance(engine)?;
            }
        }
        Ok(())
    }

    pub fn add_overlay(
        &mut self,
        engine: &mut dyn EngineApi,
        scene: SceneId,
        def: OverlayDef,
    ) -> Result<NodeId, SceneError> {
        self.scene_mut(scene)?.add_overlay(engine, def)
    }

    pub fn update_overlay(
        &mut self,
        engine: &mut dyn EngineApi,
        scene: SceneId,
        node: NodeId,
        options: OptionMap,
        callbacks: Vec<(&'static str, OverlayCallback)>,
    ) -> Result<(), SceneError> {
        self.scene_mut(scene)?
            .update_overlay(engine, node, options, callbacks)
    }

    pub fn remove_overlay(
        &mut self,
        engine: &mut dyn EngineApi,
        scene: SceneId,
        node: NodeId,
    ) -> Result<(), SceneError> {
        self.scene_mut(scene)?.remove_overlay(engine, node)
    }

    pub fn update_surface(
        &mut self,
        engine: &mut dyn EngineApi,
        scene: SceneId,
        options: OptionMap,
        callbacks: Vec<(&'static str, OverlayCallback)>,
    ) -> Result<(), SceneError> {
        self.scene_mut(scene)?
            .update_surface(engine, options, callbacks)
    }

    /// Deliver one engine event to whichever scene owns its target.
    pub fn dispatch_event(&mut self, event: &EngineEvent) {
        for scene in self.scenes.values_mut() {
            if scene.handle_event(event) {
                return;
            }
        }
        warn!("event '{}' matched no mounted target", event.name);
    }

    /// Tear a scope fully down, descendants first, and forget it.
    pub fn unmount_scene(
        &mut self,
        engine: &mut dyn EngineApi,
        scene: SceneId,
    ) -> Result<(), SceneError> {
        let Some(mut scene_entry) = self.scenes.remove(&scene) else {
            return Err(SceneError::scene_not_found(scene));
        };
        self.order.retain(|id| *id != scene);
        scene_entry.unmount(engine);
        Ok(())
    }

    pub fn scene_state(&self, scene: SceneId) -> Option<&BootstrapState> {
        self.scenes.get(&scene).map(|scene| scene.state())
    }

    pub fn scope(&self, scene: SceneId) -> Option<ScopeHandle> {
        self.scenes.get(&scene).and_then(|scene| scene.scope())
    }

    pub fn node_host(&self, scene: SceneId, node: NodeId) -> Option<HostId> {
        self.scenes.get(&scene).and_then(|scene| scene.node_host(node))
    }

    pub fn provider_phase(&self, scene: SceneId, node: NodeId) -> Option<ProviderPhase> {
        self.scenes
            .get(&scene)
            .and_then(|scene| scene.provider_phase(node))
    }

    pub fn provider_generation(&self, scene: SceneId, node: NodeId) -> Option<DataGeneration> {
        self.scenes
            .get(&scene)
            .and_then(|scene| scene.provider_generation(node))
    }

    fn scene_mut(&mut self, scene: SceneId) -> Result<&mut Scene, SceneError> {
        self.scenes
            .get_mut(&scene)
            .ok_or(SceneError::scene_not_found(scene))
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
