use crate::scene::SceneId;

use super::error::ResourceLoadError;

/// The shared in-flight guard. The first scope to request the engine
/// installs it and issues the one and only resource-load call; scopes
/// mounting later in the same tick subscribe here and issue nothing.
#[derive(Debug, Default)]
pub struct PendingEngineLoad {
    subscribers: Vec<SceneId>,
}

impl PendingEngineLoad {
    pub fn subscribe(&mut self, scene: SceneId) {
        self.subscribers.push(scene);
    }

    pub fn take_subscribers(&mut self) -> Vec<SceneId> {
        std::mem::take(&mut self.subscribers)
    }
}

/// Process-wide engine-load state, held as an explicit injectable service
/// rather than a module-level global so tests get fresh, isolated state
/// per runtime. Invariant: at most one engine load is ever in flight;
/// concurrent requesters share the same `PendingEngineLoad`.
#[derive(Debug, Default)]
pub struct ResourceLoadState {
    engine_ready: bool,
    pending: Option<PendingEngineLoad>,
    failure: Option<ResourceLoadError>,
}

impl ResourceLoadState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine_ready(&self) -> bool {
        self.engine_ready
    }

    pub fn mark_engine_ready(&mut self) {
        self.engine_ready = true;
    }

    pub fn pending(&mut self) -> Option<&mut PendingEngineLoad> {
        self.pending.as_mut()
    }

    /// Install the guard. Returns `false` when a load was already in
    /// flight and nothing may be issued.
    pub fn install_pending(&mut self, scene: SceneId) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let mut pending = PendingEngineLoad::default();
        pending.subscribe(scene);
        self.pending = Some(pending);
        true
    }

    pub fn take_pending(&mut self) -> Option<PendingEngineLoad> {
        self.pending.take()
    }

    pub fn failure(&self) -> Option<&ResourceLoadError> {
        self.failure.as_ref()
    }

    pub fn record_failure(&mut self, error: ResourceLoadError) {
        self.failure = Some(error);
    }
}
