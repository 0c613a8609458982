use std::collections::{HashMap, HashSet};

use mapsync_shared::{
    EngineApi, HostId, ListenerId, OptionMap, OptionValue, OverlayKind, ResourceKind, SurfaceId,
    UnsupportedFieldError,
};

/// One recorded engine invocation, in call order.
#[derive(Debug, Clone)]
pub enum EngineCall {
    ResourceLoad {
        kind: ResourceKind,
        locator: String,
    },
    ModuleLoad {
        module: String,
    },
    CreateSurface {
        surface: SurfaceId,
        render_target: String,
    },
    DestroySurface(SurfaceId),
    SurfaceSetter {
        surface: SurfaceId,
        setter: String,
        value: OptionValue,
    },
    BindSurface {
        surface: SurfaceId,
        event: String,
        listener: ListenerId,
    },
    CreateHost {
        host: HostId,
        kind: OverlayKind,
    },
    CreateChildHost {
        host: HostId,
        parent: HostId,
        kind: OverlayKind,
    },
    DestroyHost(HostId),
    Setter {
        host: HostId,
        setter: String,
        value: OptionValue,
    },
    SetAllOptions(HostId),
    Show(HostId),
    Hide(HostId),
    Bind {
        host: HostId,
        event: String,
        listener: ListenerId,
    },
    Unbind(ListenerId),
}

/// In-memory engine double. Records every call in order, hands out
/// sequential ids, and keeps the option bags it was given so tests can
/// mutate them in place and check the deep-copy boundary.
#[derive(Default)]
pub struct RecordingEngine {
    calls: Vec<EngineCall>,
    next_surface: u64,
    next_host: u64,
    next_listener: u64,
    /// Option bags exactly as received, per host.
    host_options: HashMap<HostId, OptionMap>,
    surface_options: HashMap<SurfaceId, OptionMap>,
    live_listeners: HashSet<ListenerId>,
    /// Setter names this engine pretends not to support.
    rejected_setters: HashSet<String>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `call_setter` fail for the given setter name.
    pub fn reject_setter(&mut self, setter: &str) {
        self.rejected_setters.insert(setter.to_string());
    }

    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    /// The option bag a host was last constructed or bulk-updated with.
    pub fn host_options(&self, host: HostId) -> Option<&OptionMap> {
        self.host_options.get(&host)
    }

    /// The option bag a surface was constructed with.
    pub fn surface_options(&self, surface: SurfaceId) -> Option<&OptionMap> {
        self.surface_options.get(&surface)
    }

    pub fn live_listener_count(&self) -> usize {
        self.live_listeners.len()
    }

    pub fn resource_load_count(&self, kind: ResourceKind) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, EngineCall::ResourceLoad { kind: k, .. } if *k == kind))
            .count()
    }

    /// Every `(setter, value)` pair issued against a host, in order.
    pub fn setter_calls(&self, host: HostId) -> Vec<(String, OptionValue)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                EngineCall::Setter {
                    host: h,
                    setter,
                    value,
                } if *h == host => Some((setter.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn surface_setter_calls(&self, surface: SurfaceId) -> Vec<(String, OptionValue)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                EngineCall::SurfaceSetter {
                    surface: s,
                    setter,
                    value,
                } if *s == surface => Some((setter.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn show_count(&self, host: HostId) -> usize {
        self.count(|call| matches!(call, EngineCall::Show(h) if *h == host))
    }

    pub fn hide_count(&self, host: HostId) -> usize {
        self.count(|call| matches!(call, EngineCall::Hide(h) if *h == host))
    }

    pub fn set_all_options_count(&self, host: HostId) -> usize {
        self.count(|call| matches!(call, EngineCall::SetAllOptions(h) if *h == host))
    }

    pub fn bind_count(&self, host: HostId) -> usize {
        self.count(|call| matches!(call, EngineCall::Bind { host: h, .. } if *h == host))
    }

    pub fn unbind_count(&self) -> usize {
        self.count(|call| matches!(call, EngineCall::Unbind(_)))
    }

    pub fn create_host_count(&self) -> usize {
        self.count(|call| {
            matches!(
                call,
                EngineCall::CreateHost { .. } | EngineCall::CreateChildHost { .. }
            )
        })
    }

    pub fn destroy_host_count(&self) -> usize {
        self.count(|call| matches!(call, EngineCall::DestroyHost(_)))
    }

    pub fn count(&self, predicate: impl Fn(&EngineCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    fn record(&mut self, call: EngineCall) {
        self.calls.push(call);
    }
}

impl EngineApi for RecordingEngine {
    fn begin_resource_load(&mut self, kind: ResourceKind, locator: &str) {
        self.record(EngineCall::ResourceLoad {
            kind,
            locator: locator.to_string(),
        });
    }

    fn begin_module_load(&mut self, module: &str) {
        self.record(EngineCall::ModuleLoad {
            module: module.to_string(),
        });
    }

    fn create_surface(&mut self, render_target: &str, options: OptionMap) -> SurfaceId {
        self.next_surface += 1;
        let surface = SurfaceId::new(self.next_surface);
        self.surface_options.insert(surface, options);
        self.record(EngineCall::CreateSurface {
            surface,
            render_target: render_target.to_string(),
        });
        surface
    }

    fn destroy_surface(&mut self, surface: SurfaceId) {
        self.surface_options.remove(&surface);
        self.record(EngineCall::DestroySurface(surface));
    }

    fn call_surface_setter(
        &mut self,
        surface: SurfaceId,
        setter: &str,
        value: OptionValue,
    ) -> Result<(), UnsupportedFieldError> {
        if self.rejected_setters.contains(setter) {
            return Err(UnsupportedFieldError {
                setter: setter.to_string(),
            });
        }
        self.record(EngineCall::SurfaceSetter {
            surface,
            setter: setter.to_string(),
            value,
        });
        Ok(())
    }

    fn bind_surface(&mut self, surface: SurfaceId, event: &str) -> ListenerId {
        self.next_listener += 1;
        let listener = ListenerId::new(self.next_listener);
        self.live_listeners.insert(listener);
        self.record(EngineCall::BindSurface {
            surface,
            event: event.to_string(),
            listener,
        });
        listener
    }

    fn create_host(&mut self, _surface: SurfaceId, kind: OverlayKind, options: OptionMap) -> HostId {
        self.next_host += 1;
        let host = HostId::new(self.next_host);
        self.host_options.insert(host, options);
        self.record(EngineCall::CreateHost { host, kind });
        host
    }

    fn create_child_host(&mut self, parent: HostId, kind: OverlayKind, options: OptionMap) -> HostId {
        self.next_host += 1;
        let host = HostId::new(self.next_host);
        self.host_options.insert(host, options);
        self.record(EngineCall::CreateChildHost { host, parent, kind });
        host
    }

    fn destroy_host(&mut self, host: HostId) {
        self.host_options.remove(&host);
        self.record(EngineCall::DestroyHost(host));
    }

    fn call_setter(
        &mut self,
        host: HostId,
        setter: &str,
        value: OptionValue,
    ) -> Result<(), UnsupportedFieldError> {
        if self.rejected_setters.contains(setter) {
            return Err(UnsupportedFieldError {
                setter: setter.to_string(),
            });
        }
        self.record(EngineCall::Setter {
            host,
            setter: setter.to_string(),
            value,
        });
        Ok(())
    }

    fn set_all_options(&mut self, host: HostId, options: OptionMap) {
        self.host_options.insert(host, options);
        self.record(EngineCall::SetAllOptions(host));
    }

    fn show(&mut self, host: HostId) {
        self.record(EngineCall::Show(host));
    }

    fn hide(&mut self, host: HostId) {
        self.record(EngineCall::Hide(host));
    }

    fn bind(&mut self, host: HostId, event: &str) -> ListenerId {
        self.next_listener += 1;
        let listener = ListenerId::new(self.next_listener);
        self.live_listeners.insert(listener);
        self.record(EngineCall::Bind {
            host,
            event: event.to_string(),
            listener,
        });
        listener
    }

    fn unbind(&mut self, listener: ListenerId) {
        self.live_listeners.remove(&listener);
        self.record(EngineCall::Unbind(listener));
    }
}
