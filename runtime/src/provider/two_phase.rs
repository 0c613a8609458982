use log::info;

use mapsync_shared::{shallow_eq, EngineApi, HostId, OptionMap, OptionValue, OverlayKind};

use crate::events::OverlayCallback;
use crate::lifecycle::{AttachPoint, LifecycleError, OverlayNode};
use crate::scene::NodeId;

/// Monotonic counter bumped whenever the provider's dataset changes by
/// value. Dependent children are keyed by index into the dataset and
/// rebuild across generations instead of patching.
pub type DataGeneration = u32;

/// Overlay types whose backing module loads asynchronously.
pub fn module_for(kind: OverlayKind) -> Option<&'static str> {
    match kind {
        OverlayKind::PathView => Some("ui/path-view"),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderPhase {
    /// Module requested, nothing published yet. Dependent children must
    /// not construct before publication.
    Loading,
    Ready,
    /// Forced one-cycle teardown after a dataset change; descendants
    /// render nothing until the next advance republishes.
    TearingDown,
}

/// A two-phase provider node: its overlay lifecycle is the ordinary
/// generic driver, wrapped with module-load gating and the
/// teardown-then-republish dataset cycle.
pub struct TwoPhaseProvider {
    node: OverlayNode,
    module: &'static str,
    phase: ProviderPhase,
    generation: DataGeneration,
    children: Vec<NodeId>,
}

impl TwoPhaseProvider {
    pub fn new(
        kind: OverlayKind,
        options: OptionMap,
        callbacks: Vec<(&'static str, OverlayCallback)>,
    ) -> Self {
        let module = module_for(kind).unwrap_or("ui/unknown");
        Self {
            node: OverlayNode::new(kind, options, callbacks),
            module,
            phase: ProviderPhase::Loading,
            generation: 0,
            children: Vec::new(),
        }
    }

    pub fn module(&self) -> &'static str {
        self.module
    }

    pub fn phase(&self) -> ProviderPhase {
        self.phase
    }

    pub fn generation(&self) -> DataGeneration {
        self.generation
    }

    pub fn host(&self) -> Option<HostId> {
        self.node.host()
    }

    pub fn node_mut(&mut self) -> &mut OverlayNode {
        &mut self.node
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn adopt_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub fn drop_child(&mut self, child: NodeId) {
        self.children.retain(|id| *id != child);
    }

    /// Ask the engine for the backing module. Called once the scope is
    /// available; completion arrives via `module_loaded`.
    pub fn request_module(&self, engine: &mut dyn EngineApi) {
        engine.begin_module_load(self.module);
    }

    /// Module resolved: construct the host and publish. Children buffered
    /// against this provider may attach afterwards.
    pub fn module_ready(
        &mut self,
        engine: &mut dyn EngineApi,
        at: AttachPoint,
    ) -> Result<HostId, LifecycleError> {
        let host = self.node.attach(engine, at)?;
        self.phase = ProviderPhase::Ready;
        info!(
            "{}: module '{}' ready, generation {}",
            self.node.kind().label(),
            self.module,
            self.generation
        );
        Ok(host)
    }

    /// Whether the next options carry a dataset differing by value from
    /// what the current host holds.
    pub fn dataset_changed(&self, next: &OptionMap) -> bool {
        let prev = self.node.snapshot().get("data");
        let next = next.get("data");
        match (prev, next) {
            (None, None) => false,
            (Some(a), Some(b)) => !shallow_eq(a, b),
            (Some(_), None) | (None, Some(_)) => true,
        }
    }

    /// Patch non-dataset changes in place through the normal diff.
    pub fn patch(
        &mut self,
        engine: &mut dyn EngineApi,
        options: OptionMap,
        callbacks: Vec<(&'static str, OverlayCallback)>,
    ) -> Result<(), LifecycleError> {
        self.node.update(engine, options, callbacks)
    }

    /// Begin the forced teardown cycle: unbind and destroy the host,
    /// store the next config, bump the generation. The scene detaches
    /// dependents first; `rebuild` completes the cycle on the next
    /// advance.
    pub fn begin_rebuild(
        &mut self,
        engine: &mut dyn EngineApi,
        options: OptionMap,
        callbacks: Vec<(&'static str, OverlayCallback)>,
    ) -> Result<(), LifecycleError> {
        self.node.detach(engine);
        self.node.update(engine, options, callbacks)?;
        self.generation += 1;
        self.phase = ProviderPhase::TearingDown;
        info!(
            "{}: dataset changed, tearing down for generation {}",
            self.node.kind().label(),
            self.generation
        );
        Ok(())
    }

    /// Republish a reconstructed host at the new generation.
    pub fn rebuild(
        &mut self,
        engine: &mut dyn EngineApi,
        at: AttachPoint,
    ) -> Result<HostId, LifecycleError> {
        let host = self.node.attach(engine, at)?;
        self.phase = ProviderPhase::Ready;
        Ok(host)
    }

    /// Final teardown: unbind events, release the dataset reference,
    /// drop the host.
    pub fn teardown(&mut self, engine: &mut dyn EngineApi) {
        self.node.detach(engine);
    }

    pub fn handle_event(
        &mut self,
        event: &str,
        target: mapsync_shared::EventTarget,
        args: &[OptionValue],
    ) {
        self.node.handle_event(event, target, args);
    }
}
