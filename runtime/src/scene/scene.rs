use std::collections::HashMap;

use log::info;

use mapsync_shared::{
    coerce_options, schema, EngineApi, EngineEvent, EventTarget, HostId, ListenerId, OptionMap,
    ResourceKind,
};

use crate::bootstrap::{BootstrapMachine, BootstrapState, ResourceLoadError};
use crate::events::{self, CallbackTable, OverlayCallback};
use crate::lifecycle::{diff_apply, AttachPoint, LifecycleError, OverlayNode};
use crate::provider::{module_for, DataGeneration, ProviderPhase, TwoPhaseProvider};
use crate::scope::{
    surface_accepts_callback, ScopeHandle, SurfaceSettings, SURFACE_COERCE_RULES,
    SURFACE_EVENT_FIELDS, SURFACE_SETTERS,
};

use super::{NodeId, OverlayDef, SceneError, SceneId};

/// One node in the mounted tree. Leaves run the generic lifecycle
/// driver directly; providers wrap it with module gating and the
/// dataset rebuild cycle.
enum NodeEntry {
    Leaf {
        node: OverlayNode,
        parent: Option<NodeId>,
    },
    Provider(TwoPhaseProvider),
}

/// One mounted scope: the bootstrap machine, the published surface
/// handle, the scope-level callbacks, and the declarative node tree.
///
/// Overlays declared before the scope is ready are buffered unmounted
/// and flushed, in declaration order, the moment the surface publishes.
pub struct Scene {
    id: SceneId,
    settings: SurfaceSettings,
    bootstrap: BootstrapMachine,
    scope: Option<ScopeHandle>,
    scope_listeners: Vec<ListenerId>,
    scope_callbacks: CallbackTable,
    /// Last raw surface options applied, diffed like overlay fields.
    map_snapshot: OptionMap,
    nodes: HashMap<NodeId, NodeEntry>,
    order: Vec<NodeId>,
    next_node: u64,
}

impl Scene {
    pub fn new(id: SceneId, mut settings: SurfaceSettings) -> Self {
        let mut scope_callbacks = CallbackTable::new();
        scope_callbacks.replace_all(
            "Map",
            surface_accepts_callback,
            std::mem::take(&mut settings.map_callbacks),
        );
        let map_snapshot = std::mem::take(&mut settings.map_options);
        Self {
            id,
            settings,
            bootstrap: BootstrapMachine::new(),
            scope: None,
            scope_listeners: Vec::new(),
            scope_callbacks,
            map_snapshot,
            nodes: HashMap::new(),
            order: Vec::new(),
            next_node: 1,
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    pub fn state(&self) -> &BootstrapState {
        self.bootstrap.state()
    }

    pub fn is_ready(&self) -> bool {
        self.bootstrap.is_ready()
    }

    /// The published surface handle, undefined until bootstrap completes.
    pub fn scope(&self) -> Option<ScopeHandle> {
        self.scope
    }

    pub(crate) fn settings(&self) -> &SurfaceSettings {
        &self.settings
    }

    pub(crate) fn begin_engine_load(&mut self) {
        self.bootstrap.begin_engine_load();
    }

    pub(crate) fn begin_extension_loads(&mut self, engine: &mut dyn EngineApi) {
        self.bootstrap.begin_extension_loads(engine, &self.settings);
    }

    pub(crate) fn fail(&mut self, error: ResourceLoadError) {
        self.bootstrap.fail(error);
    }

    /// One extension resolved. Publishes the scope once both have.
    pub(crate) fn resource_ready(
        &mut self,
        engine: &mut dyn EngineApi,
        kind: ResourceKind,
    ) -> Result<(), SceneError> {
        if self.bootstrap.extension_loaded(kind) {
            self.publish_scope(engine)?;
        }
        Ok(())
    }

    /// Construct the surface and flush everything buffered against it.
    /// The scope-level `on_complete` fires here, synchronously, before
    /// any buffered node mounts.
    fn publish_scope(&mut self, engine: &mut dyn EngineApi) -> Result<(), SceneError> {
        let options = coerce_options(SURFACE_COERCE_RULES, &self.map_snapshot);
        let surface = engine.create_surface(&self.settings.render_target, options);
        self.scope_listeners = events::bind_surface(engine, surface, SURFACE_EVENT_FIELDS);
        self.scope = Some(ScopeHandle::new(surface));
        self.bootstrap.mark_ready();
        info!("{}: surface published", self.id);
        self.scope_callbacks
            .fire("on_complete", EventTarget::Surface(surface), &[]);
        self.flush_buffered(engine)
    }

    /// Mount buffered nodes in declaration order. Provider children stay
    /// unmounted until their provider's module resolves.
    fn flush_buffered(&mut self, engine: &mut dyn EngineApi) -> Result<(), SceneError> {
        let Some(scope) = self.scope else {
            return Ok(());
        };
        for id in self.order.clone() {
            let Some(mut entry) = self.nodes.remove(&id) else {
                continue;
            };
            let result = match &mut entry {
                NodeEntry::Leaf { node, parent: None } if !node.is_live() => node
                    .attach(engine, AttachPoint::Surface(scope.surface()))
                    .map(|_| ()),
                NodeEntry::Leaf { .. } => Ok(()),
                NodeEntry::Provider(provider) => {
                    provider.request_module(engine);
                    Ok(())
                }
            };
            self.nodes.insert(id, entry);
            result?;
        }
        Ok(())
    }

    /// Declare one overlay. Mounts immediately when its attachment point
    /// exists, otherwise buffers until it does.
    pub fn add_overlay(
        &mut self,
        engine: &mut dyn EngineApi,
        def: OverlayDef,
    ) -> Result<NodeId, SceneError> {
        let id = NodeId::new(self.next_node);
        self.next_node += 1;

        if module_for(def.kind).is_some() {
            let provider = TwoPhaseProvider::new(def.kind, def.options, def.callbacks);
            if self.scope.is_some() {
                provider.request_module(engine);
            }
            self.nodes.insert(id, NodeEntry::Provider(provider));
            self.order.push(id);
            return Ok(id);
        }

        match def.parent {
            Some(parent) => {
                let mut node = OverlayNode::new(def.kind, def.options, def.callbacks);
                let attach_at = {
                    let entry = self
                        .nodes
                        .get_mut(&parent)
                        .ok_or(SceneError::node_not_found(parent))?;
                    let NodeEntry::Provider(provider) = entry else {
                        return Err(SceneError::ParentNotProvider { node: parent });
                    };
                    provider.adopt_child(id);
                    if self.scope.is_some() && provider.phase() == ProviderPhase::Ready {
                        provider.host().map(AttachPoint::Parent)
                    } else {
                        None
                    }
                };
                if let Some(at) = attach_at {
                    node.attach(engine, at)?;
                }
                self.nodes.insert(
                    id,
                    NodeEntry::Leaf {
                        node,
                        parent: Some(parent),
                    },
                );
                self.order.push(id);
                Ok(id)
            }
            None => {
                // Only kinds the map hosts directly may stand alone.
                let declared = schema(def.kind);
                if declared.required_parent != "Map" {
                    return Err(LifecycleError::MissingScope {
                        overlay: def.kind.label(),
                        parent: declared.required_parent,
                    }
                    .into());
                }
                let mut node = OverlayNode::new(def.kind, def.options, def.callbacks);
                if let Some(scope) = self.scope {
                    node.attach(engine, AttachPoint::Surface(scope.surface()))?;
                }
                self.nodes
                    .insert(id, NodeEntry::Leaf { node, parent: None });
                self.order.push(id);
                Ok(id)
            }
        }
    }

    /// Apply a node's next declarative config. Leaves diff in place; a
    /// provider whose dataset changed by value tears down, dependents
    /// first, and republishes on the next `advance`.
    pub fn update_overlay(
        &mut self,
        engine: &mut dyn EngineApi,
        id: NodeId,
        options: OptionMap,
        callbacks: Vec<(&'static str, OverlayCallback)>,
    ) -> Result<(), SceneError> {
        let Some(mut entry) = self.nodes.remove(&id) else {
            return Err(SceneError::node_not_found(id));
        };
        let result = match &mut entry {
            NodeEntry::Leaf { node, .. } => node
                .update(engine, options, callbacks)
                .map_err(SceneError::from),
            NodeEntry::Provider(provider) => {
                if provider.phase() == ProviderPhase::Ready && provider.dataset_changed(&options) {
                    let children = provider.children().to_vec();
                    self.detach_nodes(engine, &children);
                    provider
                        .begin_rebuild(engine, options, callbacks)
                        .map_err(SceneError::from)
                } else {
                    // Not published yet, or a non-dataset change.
                    provider
                        .patch(engine, options, callbacks)
                        .map_err(SceneError::from)
                }
            }
        };
        self.nodes.insert(id, entry);
        result
    }

    fn detach_nodes(&mut self, engine: &mut dyn EngineApi, ids: &[NodeId]) {
        for id in ids {
            if let Some(NodeEntry::Leaf { node, .. }) = self.nodes.get_mut(id) {
                node.detach(engine);
            }
        }
    }

    fn reattach_child(
        &mut self,
        engine: &mut dyn EngineApi,
        child: NodeId,
        host: HostId,
    ) -> Result<(), SceneError> {
        if let Some(NodeEntry::Leaf { node, .. }) = self.nodes.get_mut(&child) {
            if !node.is_live() {
                node.attach(engine, AttachPoint::Parent(host))
                    .map_err(SceneError::from)?;
            }
        }
        Ok(())
    }

    /// Complete any provider rebuild cycle in progress: republish the
    /// host at the new generation and re-attach its dependents.
    pub fn advance(&mut self, engine: &mut dyn EngineApi) -> Result<(), SceneError> {
        let Some(scope) = self.scope else {
            return Ok(());
        };
        for id in self.order.clone() {
            let Some(mut entry) = self.nodes.remove(&id) else {
                continue;
            };
            let result: Result<(), SceneError> = (|| {
                if let NodeEntry::Provider(provider) = &mut entry {
                    if provider.phase() == ProviderPhase::TearingDown {
                        let host =
                            provider.rebuild(engine, AttachPoint::Surface(scope.surface()))?;
                        for child in provider.children().to_vec() {
                            self.reattach_child(engine, child, host)?;
                        }
                    }
                }
                Ok(())
            })();
            self.nodes.insert(id, entry);
            result?;
        }
        Ok(())
    }

    /// A backing module resolved: publish every provider waiting on it
    /// and mount their buffered dependents.
    pub fn module_loaded(
        &mut self,
        engine: &mut dyn EngineApi,
        module: &str,
    ) -> Result<(), SceneError> {
        let Some(scope) = self.scope else {
            return Ok(());
        };
        for id in self.order.clone() {
            let Some(mut entry) = self.nodes.remove(&id) else {
                continue;
            };
            let result: Result<(), SceneError> = (|| {
                if let NodeEntry::Provider(provider) = &mut entry {
                    if provider.phase() == ProviderPhase::Loading && provider.module() == module {
                        let host =
                            provider.module_ready(engine, AttachPoint::Surface(scope.surface()))?;
                        for child in provider.children().to_vec() {
                            self.reattach_child(engine, child, host)?;
                        }
                    }
                }
                Ok(())
            })();
            self.nodes.insert(id, entry);
            result?;
        }
        Ok(())
    }

    /// Tear one node down and forget it. Removing a provider removes its
    /// dependents with it, dependents first.
    pub fn remove_overlay(
        &mut self,
        engine: &mut dyn EngineApi,
        id: NodeId,
    ) -> Result<(), SceneError> {
        let Some(entry) = self.nodes.remove(&id) else {
            return Err(SceneError::node_not_found(id));
        };
        self.order.retain(|n| *n != id);
        match entry {
            NodeEntry::Leaf { mut node, parent } => {
                node.detach(engine);
                if let Some(parent) = parent {
                    if let Some(NodeEntry::Provider(provider)) = self.nodes.get_mut(&parent) {
                        provider.drop_child(id);
                    }
                }
            }
            NodeEntry::Provider(mut provider) => {
                for child in provider.children().to_vec() {
                    if let Some(NodeEntry::Leaf { mut node, .. }) = self.nodes.remove(&child) {
                        node.detach(engine);
                    }
                    self.order.retain(|n| *n != child);
                }
                provider.teardown(engine);
            }
        }
        Ok(())
    }

    /// Route one engine event to its target. Returns whether the target
    /// belongs to this scene.
    pub fn handle_event(&mut self, event: &EngineEvent) -> bool {
        match event.target {
            EventTarget::Surface(surface) => {
                if self.scope.map(|scope| scope.surface()) != Some(surface) {
                    return false;
                }
                if let Some(field) = events::field_for_event(SURFACE_EVENT_FIELDS, &event.name) {
                    self.scope_callbacks.fire(field, event.target, &event.args);
                }
                true
            }
            EventTarget::Host(host) => {
                for entry in self.nodes.values_mut() {
                    match entry {
                        NodeEntry::Leaf { node, .. } if node.host() == Some(host) => {
                            node.handle_event(&event.name, event.target, &event.args);
                            return true;
                        }
                        NodeEntry::Provider(provider) if provider.host() == Some(host) => {
                            provider.handle_event(&event.name, event.target, &event.args);
                            return true;
                        }
                        _ => {}
                    }
                }
                false
            }
        }
    }

    /// Diff-update the surface's own options and replace its callbacks.
    /// Buffers when the surface has not published yet.
    pub fn update_surface(
        &mut self,
        engine: &mut dyn EngineApi,
        options: OptionMap,
        callbacks: Vec<(&'static str, OverlayCallback)>,
    ) -> Result<(), SceneError> {
        self.scope_callbacks
            .replace_all("Map", surface_accepts_callback, callbacks);
        let Some(scope) = self.scope else {
            self.map_snapshot = options;
            return Ok(());
        };
        diff_apply(
            &self.map_snapshot,
            &options,
            SURFACE_SETTERS,
            SURFACE_COERCE_RULES,
            &[],
            |setter, value| engine.call_surface_setter(scope.surface(), setter, value),
        )
        .map_err(LifecycleError::from)?;
        self.map_snapshot = options;
        Ok(())
    }

    /// Full teardown, strictly reverse declaration order, then the
    /// scope's own listeners, then the surface itself.
    pub fn unmount(&mut self, engine: &mut dyn EngineApi) {
        let ids: Vec<NodeId> = self.order.drain(..).rev().collect();
        for id in ids {
            match self.nodes.remove(&id) {
                Some(NodeEntry::Leaf { mut node, .. }) => node.detach(engine),
                Some(NodeEntry::Provider(mut provider)) => provider.teardown(engine),
                None => {}
            }
        }
        events::unbind(engine, &mut self.scope_listeners);
        if let Some(scope) = self.scope.take() {
            engine.destroy_surface(scope.surface());
        }
    }

    pub fn node_host(&self, id: NodeId) -> Option<HostId> {
        match self.nodes.get(&id)? {
            NodeEntry::Leaf { node, .. } => node.host(),
            NodeEntry::Provider(provider) => provider.host(),
        }
    }

    pub fn provider_phase(&self, id: NodeId) -> Option<ProviderPhase> {
        match self.nodes.get(&id)? {
            NodeEntry::Provider(provider) => Some(provider.phase()),
            NodeEntry::Leaf { .. } => None,
        }
    }

    pub fn provider_generation(&self, id: NodeId) -> Option<DataGeneration> {
        match self.nodes.get(&id)? {
            NodeEntry::Provider(provider) => Some(provider.generation()),
            NodeEntry::Leaf { .. } => None,
        }
    }
}
