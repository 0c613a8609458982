use log::{info, warn};

use mapsync_shared::{data_vis_locator, ui_locator, EngineApi, ResourceKind};

use crate::scope::SurfaceSettings;

use super::error::ResourceLoadError;

/// Per-scope bootstrap progress. The engine itself loads once
/// process-wide (guarded by `ResourceLoadState`); the extension loads and
/// the surface construction run per scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapState {
    Uninitialized,
    LoadingEngine,
    LoadingExtensions { ui_ready: bool, data_vis_ready: bool },
    Ready,
    LoadFailed(ResourceLoadError),
}

/// Drives one scope through
/// `Uninitialized -> LoadingEngine -> LoadingExtensions -> Ready`.
/// Reaching `Ready` requires both extension loads; they run concurrently
/// and depend only on the engine, not on each other.
#[derive(Debug)]
pub struct BootstrapMachine {
    state: BootstrapState,
}

impl BootstrapMachine {
    pub fn new() -> Self {
        Self {
            state: BootstrapState::Uninitialized,
        }
    }

    pub fn state(&self) -> &BootstrapState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, BootstrapState::Ready)
    }

    pub fn awaiting_engine(&self) -> bool {
        matches!(self.state, BootstrapState::LoadingEngine)
    }

    pub fn begin_engine_load(&mut self) {
        self.state = BootstrapState::LoadingEngine;
    }

    /// Engine is available; fork the two extension loads.
    pub fn begin_extension_loads(&mut self, engine: &mut dyn EngineApi, settings: &SurfaceSettings) {
        engine.begin_resource_load(
            ResourceKind::UiExtension,
            &ui_locator(settings.protocol, &settings.ui_version),
        );
        engine.begin_resource_load(
            ResourceKind::DataVisExtension,
            &data_vis_locator(
                settings.protocol,
                &settings.data_vis_version,
                &settings.credential_key,
            ),
        );
        self.state = BootstrapState::LoadingExtensions {
            ui_ready: false,
            data_vis_ready: false,
        };
        info!("bootstrap: engine ready, loading extensions");
    }

    /// Record one extension completion. Returns true once both have
    /// resolved and the surface may be constructed.
    pub fn extension_loaded(&mut self, kind: ResourceKind) -> bool {
        let BootstrapState::LoadingExtensions {
            ui_ready,
            data_vis_ready,
        } = &mut self.state
        else {
            return false;
        };
        match kind {
            ResourceKind::UiExtension => *ui_ready = true,
            ResourceKind::DataVisExtension => *data_vis_ready = true,
            ResourceKind::EngineCore => return false,
        }
        *ui_ready && *data_vis_ready
    }

    pub fn mark_ready(&mut self) {
        self.state = BootstrapState::Ready;
        info!("bootstrap: scope ready");
    }

    /// A load errored. The scope stays permanently un-ready; descendant
    /// overlays never mount.
    pub fn fail(&mut self, error: ResourceLoadError) {
        warn!("bootstrap: {error}");
        self.state = BootstrapState::LoadFailed(error);
    }
}
