use std::collections::HashMap;

use log::warn;

use mapsync_shared::{
    EngineApi, EventTarget, HostId, ListenerId, OptionValue, OverlaySchema, SurfaceId,
};

/// User event handler: `(target, engine event args)`.
pub type OverlayCallback = Box<dyn FnMut(EventTarget, &[OptionValue])>;

/// Live callback storage for one node. Listeners stay bound for the
/// node's whole lifetime; dispatch reads the current entry at fire time,
/// so swapping a handler between updates takes effect without rebinding.
#[derive(Default)]
pub struct CallbackTable {
    entries: HashMap<&'static str, OverlayCallback>,
}

impl CallbackTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register handlers, dropping any field the declaration does not
    /// accept.
    pub fn replace_all(
        &mut self,
        label: &'static str,
        accepts: impl Fn(&str) -> bool,
        callbacks: Vec<(&'static str, OverlayCallback)>,
    ) {
        self.entries.clear();
        for (field, callback) in callbacks {
            if accepts(field) {
                self.entries.insert(field, callback);
            } else {
                warn!("{label}: dropping callback for undeclared field '{field}'");
            }
        }
    }

    /// Invoke the current handler for a callback field, if registered.
    pub fn fire(&mut self, field: &str, target: EventTarget, args: &[OptionValue]) {
        if let Some(callback) = self.entries.get_mut(field) {
            callback(target, args);
        }
    }
}

/// Map an engine event name back to its callback field.
pub fn field_for_event(
    event_fields: &'static [&'static str],
    event: &str,
) -> Option<&'static str> {
    event_fields
        .iter()
        .find(|field| OverlaySchema::event_name(field) == event)
        .copied()
}

/// Bind every declared event field of a host. One listener per field;
/// the set bound here must equal the set unbound at teardown.
pub fn bind_host(
    engine: &mut dyn EngineApi,
    host: HostId,
    event_fields: &[&'static str],
) -> Vec<ListenerId> {
    event_fields
        .iter()
        .map(|field| engine.bind(host, &OverlaySchema::event_name(field)))
        .collect()
}

pub fn bind_surface(
    engine: &mut dyn EngineApi,
    surface: SurfaceId,
    event_fields: &[&'static str],
) -> Vec<ListenerId> {
    event_fields
        .iter()
        .map(|field| engine.bind_surface(surface, &OverlaySchema::event_name(field)))
        .collect()
}

/// Remove exactly the handles passed. Draining makes a second call a
/// no-op, and an empty list is safe.
pub fn unbind(engine: &mut dyn EngineApi, handles: &mut Vec<ListenerId>) {
    for listener in handles.drain(..) {
        engine.unbind(listener);
    }
}
