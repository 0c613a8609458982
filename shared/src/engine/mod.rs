mod locator;

pub use locator::{data_vis_locator, engine_locator, ui_locator};

use thiserror::Error;

use crate::types::{HostId, ListenerId, OverlayKind, SurfaceId};
use crate::value::{OptionMap, OptionValue};

/// External resources the bootstrap loads before any surface exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    EngineCore,
    UiExtension,
    DataVisExtension,
}

impl ResourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::EngineCore => "engine core",
            ResourceKind::UiExtension => "ui extension",
            ResourceKind::DataVisExtension => "data-vis extension",
        }
    }
}

/// Engine rejected a setter call. Propagated unmodified to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Engine does not support setter '{setter}'")]
pub struct UnsupportedFieldError {
    pub setter: String,
}

/// What an engine event fired against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Surface(SurfaceId),
    Host(HostId),
}

/// One engine callback delivered back into the runtime by the embedder.
#[derive(Debug)]
pub struct EngineEvent {
    pub target: EventTarget,
    pub name: String,
    pub args: Vec<OptionValue>,
}

/// The embedding contract with the external map engine. The runtime only
/// ever drives the engine through this object-safe facade; the test crate
/// supplies a recording implementation.
///
/// All asynchronous work is completion-signalled by the embedder calling
/// back into the runtime (`resource_loaded`, `module_loaded`,
/// `dispatch_event`); nothing here blocks.
pub trait EngineApi {
    /// Start fetching an external resource. Must be called at most once
    /// per `EngineCore` process-wide; the runtime guards this.
    fn begin_resource_load(&mut self, kind: ResourceKind, locator: &str);

    /// Start loading an extension-hosted overlay module.
    fn begin_module_load(&mut self, module: &str);

    fn create_surface(&mut self, render_target: &str, options: OptionMap) -> SurfaceId;
    fn destroy_surface(&mut self, surface: SurfaceId);
    fn call_surface_setter(
        &mut self,
        surface: SurfaceId,
        setter: &str,
        value: OptionValue,
    ) -> Result<(), UnsupportedFieldError>;
    fn bind_surface(&mut self, surface: SurfaceId, event: &str) -> ListenerId;

    fn create_host(
        &mut self,
        surface: SurfaceId,
        kind: OverlayKind,
        options: OptionMap,
    ) -> HostId;
    /// Construct a host attached to a parent container object instead of
    /// the surface (path navigators under a path view).
    fn create_child_host(
        &mut self,
        parent: HostId,
        kind: OverlayKind,
        options: OptionMap,
    ) -> HostId;
    fn destroy_host(&mut self, host: HostId);

    fn call_setter(
        &mut self,
        host: HostId,
        setter: &str,
        value: OptionValue,
    ) -> Result<(), UnsupportedFieldError>;
    fn set_all_options(&mut self, host: HostId, options: OptionMap);

    fn show(&mut self, host: HostId);
    fn hide(&mut self, host: HostId);

    fn bind(&mut self, host: HostId, event: &str) -> ListenerId;
    fn unbind(&mut self, listener: ListenerId);
}
